use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, query_builder::Separated};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::ApiError,
    params::{FromParams, QueryParams},
    repository::Entity,
};

// --- Accounts ---

/// User
///
/// An account an authenticated caller resolves to. `admin` grants the ADMIN role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Default)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub admin: bool,
}

// --- MenuItemReview ---

/// MenuItemReview
///
/// A diner's star rating and comments for one dining-commons menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItemReview {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    #[ts(type = "string")]
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItemReview {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl FromParams for NewMenuItemReview {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError> {
        Ok(Self {
            item_id: params.required("itemId", "an integer")?,
            reviewer_email: params.required_str("reviewerEmail")?,
            stars: params.required("stars", "an integer")?,
            date_reviewed: params.required_datetime("dateReviewed")?,
            comments: params.required_str("comments")?,
        })
    }
}

impl Entity for MenuItemReview {
    type Id = i64;
    type Draft = NewMenuItemReview;

    const NAME: &'static str = "MenuItemReview";
    const TABLE: &'static str = "menu_item_reviews";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["item_id", "reviewer_email", "stars", "date_reviewed", "comments"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(draft: NewMenuItemReview, next_id: i64) -> Self {
        Self {
            id: next_id,
            item_id: draft.item_id,
            reviewer_email: draft.reviewer_email,
            stars: draft.stars,
            date_reviewed: draft.date_reviewed,
            comments: draft.comments,
        }
    }

    fn push_draft<'args>(draft: NewMenuItemReview, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(draft.item_id)
            .push_bind(draft.reviewer_email)
            .push_bind(draft.stars)
            .push_bind(draft.date_reviewed)
            .push_bind(draft.comments);
    }
}

// --- Articles ---

/// Articles
///
/// A link to a news article with a short explanation of why it is interesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Articles {
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    #[ts(type = "string")]
    pub date_added: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    pub date_added: NaiveDateTime,
}

impl FromParams for NewArticle {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError> {
        Ok(Self {
            title: params.required_str("title")?,
            url: params.required_str("url")?,
            explanation: params.required_str("explanation")?,
            email: params.required_str("email")?,
            date_added: params.required_datetime("dateAdded")?,
        })
    }
}

impl Entity for Articles {
    type Id = i64;
    type Draft = NewArticle;

    const NAME: &'static str = "Articles";
    const TABLE: &'static str = "articles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["title", "url", "explanation", "email", "date_added"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(draft: NewArticle, next_id: i64) -> Self {
        Self {
            id: next_id,
            title: draft.title,
            url: draft.url,
            explanation: draft.explanation,
            email: draft.email,
            date_added: draft.date_added,
        }
    }

    fn push_draft<'args>(draft: NewArticle, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(draft.title)
            .push_bind(draft.url)
            .push_bind(draft.explanation)
            .push_bind(draft.email)
            .push_bind(draft.date_added);
    }
}

// --- HelpRequest ---

/// HelpRequest
///
/// A team's request for staff help during a lab or breakout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HelpRequest {
    #[ts(type = "number")]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    #[ts(type = "string")]
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHelpRequest {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl FromParams for NewHelpRequest {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError> {
        Ok(Self {
            requester_email: params.required_str("requesterEmail")?,
            team_id: params.required_str("teamId")?,
            table_or_breakout_room: params.required_str("tableOrBreakoutRoom")?,
            request_time: params.required_datetime("requestTime")?,
            explanation: params.required_str("explanation")?,
            solved: params.required_bool("solved")?,
        })
    }
}

impl Entity for HelpRequest {
    type Id = i64;
    type Draft = NewHelpRequest;

    const NAME: &'static str = "HelpRequest";
    const TABLE: &'static str = "help_requests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "team_id",
        "table_or_breakout_room",
        "request_time",
        "explanation",
        "solved",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(draft: NewHelpRequest, next_id: i64) -> Self {
        Self {
            id: next_id,
            requester_email: draft.requester_email,
            team_id: draft.team_id,
            table_or_breakout_room: draft.table_or_breakout_room,
            request_time: draft.request_time,
            explanation: draft.explanation,
            solved: draft.solved,
        }
    }

    fn push_draft<'args>(draft: NewHelpRequest, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(draft.requester_email)
            .push_bind(draft.team_id)
            .push_bind(draft.table_or_breakout_room)
            .push_bind(draft.request_time)
            .push_bind(draft.explanation)
            .push_bind(draft.solved);
    }
}

// --- RecommendationRequest ---

/// RecommendationRequest
///
/// A student's request for a letter of recommendation from a professor.
/// The JSON field names are all lower-case, unlike the other entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct RecommendationRequest {
    #[ts(type = "number")]
    pub id: i64,
    #[serde(rename = "requesteremail")]
    pub requester_email: String,
    #[serde(rename = "professoremail")]
    pub professor_email: String,
    pub explanation: String,
    #[serde(rename = "daterequested")]
    #[ts(type = "string")]
    pub date_requested: NaiveDateTime,
    #[serde(rename = "dateneeded")]
    #[ts(type = "string")]
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendationRequest {
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl FromParams for NewRecommendationRequest {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError> {
        Ok(Self {
            requester_email: params.required_str("requesteremail")?,
            professor_email: params.required_str("professoremail")?,
            explanation: params.required_str("explanation")?,
            date_requested: params.required_datetime("daterequested")?,
            date_needed: params.required_datetime("dateneeded")?,
            done: params.required_bool("done")?,
        })
    }
}

impl Entity for RecommendationRequest {
    type Id = i64;
    type Draft = NewRecommendationRequest;

    const NAME: &'static str = "RecommendationRequest";
    const TABLE: &'static str = "recommendation_requests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "professor_email",
        "explanation",
        "date_requested",
        "date_needed",
        "done",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(draft: NewRecommendationRequest, next_id: i64) -> Self {
        Self {
            id: next_id,
            requester_email: draft.requester_email,
            professor_email: draft.professor_email,
            explanation: draft.explanation,
            date_requested: draft.date_requested,
            date_needed: draft.date_needed,
            done: draft.done,
        }
    }

    fn push_draft<'args>(
        draft: NewRecommendationRequest,
        row: &mut Separated<'_, 'args, Postgres, &'static str>,
    ) {
        row.push_bind(draft.requester_email)
            .push_bind(draft.professor_email)
            .push_bind(draft.explanation)
            .push_bind(draft.date_requested)
            .push_bind(draft.date_needed)
            .push_bind(draft.done);
    }
}

// --- UCSBOrganization ---

/// UCSBOrganization
///
/// A registered student organization, keyed by its caller-supplied `orgCode`.
/// Saving an organization whose code already exists replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UCSBOrganization {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl FromParams for UCSBOrganization {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError> {
        Ok(Self {
            org_code: params.required_str("orgCode")?,
            org_translation_short: params.required_str("orgTranslationShort")?,
            org_translation: params.required_str("orgTranslation")?,
            inactive: params.required_bool("inactive")?,
        })
    }
}

impl Entity for UCSBOrganization {
    type Id = String;
    type Draft = UCSBOrganization;

    const NAME: &'static str = "UCSBOrganization";
    const TABLE: &'static str = "ucsb_organizations";
    const KEY_COLUMN: &'static str = "org_code";
    const COLUMNS: &'static [&'static str] =
        &["org_code", "org_translation_short", "org_translation", "inactive"];

    fn id(&self) -> String {
        self.org_code.clone()
    }

    fn from_draft(draft: UCSBOrganization, _next_id: i64) -> Self {
        draft
    }

    fn push_draft<'args>(draft: UCSBOrganization, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(draft.org_code)
            .push_bind(draft.org_translation_short)
            .push_bind(draft.org_translation)
            .push_bind(draft.inactive);
    }
}
