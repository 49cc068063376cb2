use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded and
/// pulled into handlers and extractors via `FromRef`, as part of the unified state.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Postgres connection string. `None` in local mode selects the in-memory store.
    pub db_url: Option<String>,
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // Runtime environment marker. Controls the local `x-user-id` bypass.
    pub env: Env,
    // HS256 secret used to validate incoming bearer tokens.
    pub jwt_secret: String,
    // Lower-cased emails that are always granted the ADMIN role.
    pub admin_emails: Vec<String>,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (in-memory store, header bypass) and the hardened production setup.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe, non-panicking values for test state scaffolding.
    fn default() -> Self {
        Self {
            db_url: None,
            bind_addr: "127.0.0.1:3000".to_string(),
            env: Env::Local,
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
            admin_emails: Vec::new(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from the environment and fails fast.
    ///
    /// # Panics
    /// Panics if `DATABASE_URL` or `JWT_SECRET` is missing while `APP_ENV=production`.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let db_url = match env {
            Env::Production => Some(
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in production"),
            ),
            Env::Local => env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let admin_emails = env::var("ADMIN_EMAILS")
            .map(|raw| parse_admin_emails(&raw))
            .unwrap_or_default();

        Self {
            db_url,
            bind_addr,
            env,
            jwt_secret,
            admin_emails,
        }
    }

    /// True when `email` is listed in `ADMIN_EMAILS` (case-insensitive).
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

/// Splits a comma separated email list, dropping blanks.
pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}
