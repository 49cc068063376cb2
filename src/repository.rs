use std::{collections::BTreeMap, fmt, marker::PhantomData, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{
    Encode, FromRow, PgPool, Postgres, Type,
    postgres::PgRow,
    query_builder::{QueryBuilder, Separated},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::RepositoryError, models::User};

/// Entity
///
/// A persisted record type exposed through list / get / create routes.
/// Carries the table metadata `PostgresRepository` needs to build its SQL and
/// the construction rule `InMemoryRepository` uses to assign keys.
pub trait Entity:
    Clone + Send + Sync + Unpin + Serialize + for<'r> FromRow<'r, PgRow> + 'static
{
    type Id: Clone
        + Ord
        + fmt::Display
        + FromStr
        + Send
        + Sync
        + for<'q> Encode<'q, Postgres>
        + Type<Postgres>
        + 'static;
    /// Field values supplied on create.
    type Draft: Send + Sync + 'static;

    /// Type name used in not-found messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    /// Columns written by `save`, in the order `push_draft` binds them.
    /// When the key column is among them the key is caller-supplied and `save` upserts.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Self::Id;

    /// Builds the stored record. `next_id` is only used by entities with assigned keys.
    fn from_draft(draft: Self::Draft, next_id: i64) -> Self;

    fn push_draft<'args>(draft: Self::Draft, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Repository Trait
///
/// The storage contract shared by every entity: list, fetch by key, save.
/// `Send + Sync + async_trait` make `Arc<dyn Repository<E>>` shareable across handlers.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every stored record, in storage order.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError>;
    /// Inserts the draft (assigning a key where needed) and returns the stored record.
    async fn save(&self, draft: E::Draft) -> Result<E, RepositoryError>;
}

/// RepositoryState
///
/// The shared handle to one entity's persistence layer.
pub type RepositoryState<E> = Arc<dyn Repository<E>>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL, one instance per entity type.
pub struct PostgresRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PostgresRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn insert_builder(draft: E::Draft) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        builder.push_values(std::iter::once(draft), |mut row, draft| {
            E::push_draft(draft, &mut row);
        });

        if E::COLUMNS.contains(&E::KEY_COLUMN) {
            let updates: Vec<String> = E::COLUMNS
                .iter()
                .filter(|column| **column != E::KEY_COLUMN)
                .map(|column| format!("{column} = EXCLUDED.{column}"))
                .collect();
            builder.push(format!(
                " ON CONFLICT ({}) DO UPDATE SET {}",
                E::KEY_COLUMN,
                updates.join(", ")
            ));
        }

        builder.push(" RETURNING *");
        builder
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PostgresRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", E::TABLE, E::KEY_COLUMN);
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("{} find_all error: {:?}", E::NAME, e))?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id.clone())
            .fetch_optional(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("{} find_by_id({}) error: {:?}", E::NAME, id, e))?;
        Ok(row)
    }

    async fn save(&self, draft: E::Draft) -> Result<E, RepositoryError> {
        let mut builder = Self::insert_builder(draft);
        let saved = builder
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("{} save error: {:?}", E::NAME, e))?;
        tracing::debug!("{} saved with id {}", E::NAME, saved.id());
        Ok(saved)
    }
}

/// InMemoryRepository
///
/// `Repository` over an ordered map, for local runs without a database and for tests.
/// Assigned keys start at 1 and are never reused.
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<MemoryTable<E>>,
}

struct MemoryTable<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    next_id: i64,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(MemoryTable {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        Ok(self.inner.read().await.rows.get(id).cloned())
    }

    async fn save(&self, draft: E::Draft) -> Result<E, RepositoryError> {
        let mut table = self.inner.write().await;
        let record = E::from_draft(draft, table.next_id);
        table.next_id += 1;
        table.rows.insert(record.id(), record.clone());
        Ok(record)
    }
}

// --- Users (role resolution) ---

/// UserRepository
///
/// Lookup of the accounts that authenticated callers map to.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// Inserts or replaces the account with the same id.
    async fn save_user(&self, user: User) -> Result<User, RepositoryError>;
}

pub type UserRepositoryState = Arc<dyn UserRepository>;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, admin FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("find_user error: {:?}", e))?;
        Ok(user)
    }

    async fn save_user(&self, user: User) -> Result<User, RepositoryError> {
        let saved = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, admin) VALUES ($1, $2, $3)
               ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, admin = EXCLUDED.admin
               RETURNING id, email, admin"#,
        )
        .bind(user.id)
        .bind(user.email)
        .bind(user.admin)
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("save_user error: {:?}", e))?;
        Ok(saved)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save_user(&self, user: User) -> Result<User, RepositoryError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }
}
