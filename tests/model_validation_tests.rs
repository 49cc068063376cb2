use axum::{http::StatusCode, response::IntoResponse};
use chrono::NaiveDateTime;
use serde_json::json;
use ucsb_api::{
    error::{ApiError, ErrorBody},
    models::{
        Articles, HelpRequest, MenuItemReview, NewHelpRequest, NewMenuItemReview,
        NewRecommendationRequest, RecommendationRequest, UCSBOrganization,
    },
    params::{FromParams, QueryParams},
};

fn ldt(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

// --- JSON shape ---

#[test]
fn menu_item_review_serializes_with_camel_case_and_iso_dates() {
    let review = MenuItemReview {
        id: 1,
        item_id: 10,
        reviewer_email: "admin@ucsb.edu".to_string(),
        stars: 4,
        date_reviewed: ldt("2022-01-03T00:00:00"),
        comments: "admin post rev1".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&review).unwrap(),
        json!({
            "id": 1,
            "itemId": 10,
            "reviewerEmail": "admin@ucsb.edu",
            "stars": 4,
            "dateReviewed": "2022-01-03T00:00:00",
            "comments": "admin post rev1"
        })
    );
}

#[test]
fn recommendation_request_keeps_lower_case_field_names() {
    let request = RecommendationRequest {
        id: 3,
        requester_email: "requesteremail@mail.com".to_string(),
        professor_email: "professoremail@mail.com".to_string(),
        explanation: "program".to_string(),
        date_requested: ldt("2025-01-03T00:00:00"),
        date_needed: ldt("2025-02-03T12:30:00"),
        done: true,
    };

    let json_output = serde_json::to_value(&request).unwrap();

    assert_eq!(json_output["requesteremail"], "requesteremail@mail.com");
    assert_eq!(json_output["professoremail"], "professoremail@mail.com");
    assert_eq!(json_output["daterequested"], "2025-01-03T00:00:00");
    assert_eq!(json_output["dateneeded"], "2025-02-03T12:30:00");
    assert!(json_output.get("requester_email").is_none());
}

#[test]
fn help_request_and_organization_field_names() {
    let help = HelpRequest {
        id: 1,
        requester_email: "hao_ding@ucsb.edu".to_string(),
        team_id: "13".to_string(),
        table_or_breakout_room: "13".to_string(),
        request_time: ldt("2022-01-03T00:00:00"),
        explanation: "You need to blah blah blah.".to_string(),
        solved: false,
    };
    let org = UCSBOrganization {
        org_code: "MTG".to_string(),
        org_translation_short: "MTG@UCSB".to_string(),
        org_translation: "Magic: the Gathering at UCSB".to_string(),
        inactive: false,
    };

    let help_json = serde_json::to_value(&help).unwrap();
    assert_eq!(help_json["tableOrBreakoutRoom"], "13");
    assert_eq!(help_json["requestTime"], "2022-01-03T00:00:00");

    assert_eq!(
        serde_json::to_value(&org).unwrap(),
        json!({"orgCode": "MTG", "orgTranslationShort": "MTG@UCSB", "orgTranslation": "Magic: the Gathering at UCSB", "inactive": false})
    );
}

#[test]
fn articles_deserialize_from_their_own_json() {
    let raw = r#"{"id":5,"title":"Housing","url":"https://dailynexus.com","explanation":"Fall2027","email":"n@ucsb.edu","dateAdded":"2022-01-03T00:00:00"}"#;
    let article: Articles = serde_json::from_str(raw).unwrap();

    assert_eq!(article.id, 5);
    assert_eq!(article.date_added, ldt("2022-01-03T00:00:00"));
}

// --- Parameter decoding ---

#[test]
fn menu_item_review_decodes_from_params() {
    let params: QueryParams = [
        ("itemId", "10"),
        ("reviewerEmail", "admin@ucsb.edu"),
        ("stars", "4"),
        ("dateReviewed", "2022-01-03T00:00:00"),
        ("comments", "admin post rev1"),
    ]
    .into_iter()
    .collect();

    let draft = NewMenuItemReview::from_params(&params).unwrap();

    assert_eq!(
        draft,
        NewMenuItemReview {
            item_id: 10,
            reviewer_email: "admin@ucsb.edu".to_string(),
            stars: 4,
            date_reviewed: ldt("2022-01-03T00:00:00"),
            comments: "admin post rev1".to_string(),
        }
    );
}

#[test]
fn fractional_seconds_are_accepted() {
    let params: QueryParams = [
        ("requesteremail", "r@mail.com"),
        ("professoremail", "p@mail.com"),
        ("explanation", "program"),
        ("daterequested", "2025-01-03T10:15:30.250"),
        ("dateneeded", "2025-01-04T00:00:00"),
        ("done", "FALSE"),
    ]
    .into_iter()
    .collect();

    let draft = NewRecommendationRequest::from_params(&params).unwrap();

    assert_eq!(
        draft.date_requested,
        NaiveDateTime::parse_from_str("2025-01-03 10:15:30.250", "%Y-%m-%d %H:%M:%S%.f").unwrap()
    );
    assert!(!draft.done);
}

#[test]
fn date_times_without_seconds_are_accepted() {
    let params: QueryParams = [("short", "2022-01-03T09:30"), ("full", "2022-01-03T09:30:00")]
        .into_iter()
        .collect();

    assert_eq!(
        params.required_datetime("short").unwrap(),
        params.required_datetime("full").unwrap()
    );
}

#[test]
fn booleans_accept_the_common_spellings() {
    let params: QueryParams = [("a", "on"), ("b", "No"), ("c", "1"), ("d", "0"), ("e", " TRUE ")]
        .into_iter()
        .collect();

    assert!(params.required_bool("a").unwrap());
    assert!(!params.required_bool("b").unwrap());
    assert!(params.required_bool("c").unwrap());
    assert!(!params.required_bool("d").unwrap());
    assert!(params.required_bool("e").unwrap());
}

#[test]
fn string_keys_keep_surrounding_whitespace_but_numbers_are_trimmed() {
    let params: QueryParams = [("orgCode", " GG"), ("id", " 7 ")].into_iter().collect();

    assert_eq!(params.required::<String>("orgCode", "a code").unwrap(), " GG");
    assert_eq!(params.required::<i64>("id", "an integer").unwrap(), 7);
}

#[test]
fn missing_parameter_is_named_in_the_error() {
    let params: QueryParams = [("requesterEmail", "a@ucsb.edu")].into_iter().collect();

    let err = NewHelpRequest::from_params(&params).unwrap_err();

    match err {
        ApiError::InvalidParameter { name, message } => {
            assert_eq!(name, "teamId");
            assert_eq!(message, "Required parameter 'teamId' is not present");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_values_are_typed_parse_errors() {
    let params: QueryParams = [("stars", "four"), ("when", "2022-13-45T00:00:00"), ("flag", "maybe")]
        .into_iter()
        .collect();

    assert!(matches!(
        params.required::<i32>("stars", "an integer"),
        Err(ApiError::InvalidParameter { ref name, .. }) if name == "stars"
    ));
    assert!(matches!(
        params.required_datetime("when"),
        Err(ApiError::InvalidParameter { ref name, .. }) if name == "when"
    ));
    assert!(matches!(
        params.required_bool("flag"),
        Err(ApiError::InvalidParameter { ref name, .. }) if name == "flag"
    ));
}

#[test]
fn organization_decodes_its_key_from_params() {
    let params: QueryParams = [
        ("orgCode", "GG"),
        ("orgTranslationShort", "UCSB-GG"),
        ("orgTranslation", "UCSB-Gaucho-Gaming"),
        ("inactive", "true"),
    ]
    .into_iter()
    .collect();

    let org = UCSBOrganization::from_params(&params).unwrap();
    assert_eq!(org.org_code, "GG");
    assert!(org.inactive);
}

// --- Error bodies ---

#[tokio::test]
async fn not_found_renders_the_structured_body() {
    let response = ApiError::not_found("UCSBOrganization", "GG").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        ErrorBody {
            error_type: "EntityNotFoundException".to_string(),
            message: "UCSBOrganization with id GG not found".to_string(),
        }
    );
}

#[test]
fn error_kinds_map_to_statuses() {
    assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(ApiError::not_found("Articles", 1).status(), StatusCode::NOT_FOUND);
    assert_eq!(ApiError::missing_parameter("id").status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::Forbidden.kind(), "AccessDeniedException");
}
