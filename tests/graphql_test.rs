//! End-to-end GraphQL tests against an in-memory SQLite database.

use std::sync::Arc;

use serde_json::{json, Value};

use meetings_api::api::build_schema;
use meetings_api::infra::Database;
use meetings_api::services::{ServiceContainer, Services};
use meetings_api::{AppSchema, Config};

// =============================================================================
// Test Helpers
// =============================================================================

async fn setup() -> AppSchema {
    let database = Database::connect(&Config::in_memory())
        .await
        .expect("in-memory database");
    let services: Arc<dyn ServiceContainer> =
        Arc::new(Services::from_connection(database.get_connection()));
    build_schema(services)
}

/// Execute a request and return the serialized response body.
async fn exec(schema: &AppSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    serde_json::to_value(&response).expect("serializable response")
}

/// Execute a request that must succeed and return its `data`.
async fn ok(schema: &AppSchema, query: &str) -> Value {
    let body = exec(schema, query).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {}", body);
    body["data"].clone()
}

/// Execute a request that must fail and return (message, code).
async fn fail(schema: &AppSchema, query: &str) -> (String, String) {
    let body = exec(schema, query).await;
    let error = &body["errors"][0];
    assert!(!error.is_null(), "expected an error: {}", body);
    (
        error["message"].as_str().unwrap_or_default().to_string(),
        error["extensions"]["code"].as_str().unwrap_or_default().to_string(),
    )
}

async fn create_user(schema: &AppSchema, name: &str, email: &str) -> i64 {
    let data = ok(
        schema,
        &format!(r#"mutation {{ createUser(name: "{name}", email: "{email}") {{ id }} }}"#),
    )
    .await;
    data["createUser"]["id"].as_i64().unwrap()
}

async fn create_meeting(schema: &AppSchema, title: &str, time: &str) -> i64 {
    let data = ok(
        schema,
        &format!(
            r#"mutation {{ createMeeting(title: "{title}", time: "{time}", content: "agenda") {{ id }} }}"#
        ),
    )
    .await;
    data["createMeeting"]["id"].as_i64().unwrap()
}

async fn attend(schema: &AppSchema, user_id: i64, meeting_id: i64) -> Value {
    ok(
        schema,
        &format!(
            "mutation {{ addUserToMeeting(userId: {user_id}, meetingId: {meeting_id}) {{ id attendees {{ id meetings {{ id }} }} }} }}"
        ),
    )
    .await
}

async fn attendee_ids(schema: &AppSchema, meeting_id: i64) -> Vec<i64> {
    let data = ok(
        schema,
        &format!("{{ getMeeting(id: {meeting_id}) {{ attendees {{ id }} }} }}"),
    )
    .await;
    data["getMeeting"]["attendees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_new_id_and_no_meetings() {
    let schema = setup().await;

    let data = ok(
        &schema,
        r#"mutation { createUser(name: "Ann", email: "ann@example.com") { id name email meetings { id } } }"#,
    )
    .await;

    let user = &data["createUser"];
    assert!(user["id"].as_i64().unwrap() > 0);
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["meetings"], json!([]));

    let second = create_user(&schema, "Bob", "bob@example.com").await;
    assert_ne!(second, user["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_create_user_duplicate_email_conflicts_without_insert() {
    let schema = setup().await;
    create_user(&schema, "Ann", "ann@example.com").await;

    let (message, code) = fail(
        &schema,
        r#"mutation { createUser(name: "Other Ann", email: "ann@example.com") { id } }"#,
    )
    .await;

    assert_eq!(code, "CONFLICT");
    assert_eq!(message, "User with email ann@example.com already exists");

    let data = ok(&schema, "{ getAllUsers { name } }").await;
    assert_eq!(data["getAllUsers"], json!([{ "name": "Ann" }]));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let schema = setup().await;

    let (message, code) = fail(&schema, "{ getUser(id: 99) { id } }").await;

    assert_eq!(code, "NOT_FOUND");
    assert_eq!(message, "User with id=99 not found");
}

#[tokio::test]
async fn test_get_user_embeds_meetings_without_attendees() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    attend(&schema, ann, standup).await;
    attend(&schema, bob, standup).await;

    let data = ok(
        &schema,
        &format!("{{ getUser(id: {ann}) {{ name meetings {{ title time attendees {{ id }} }} }} }}"),
    )
    .await;

    assert_eq!(
        data["getUser"],
        json!({
            "name": "Ann",
            "meetings": [{ "title": "Standup", "time": "09:30", "attendees": [] }]
        })
    );
}

#[tokio::test]
async fn test_remove_user_twice_is_not_found_both_times() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;

    let data = ok(&schema, &format!("mutation {{ removeUser(userId: {ann}) }}")).await;
    assert_eq!(
        data["removeUser"],
        format!("User with id={ann} was successfully deleted")
    );

    for _ in 0..2 {
        let (message, code) = fail(&schema, &format!("mutation {{ removeUser(userId: {ann}) }}")).await;
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, format!("User with id={ann} not found"));
    }

    // The email is free again once the user is gone
    create_user(&schema, "Ann again", "ann@example.com").await;
}

// =============================================================================
// Meetings
// =============================================================================

#[tokio::test]
async fn test_create_meeting_time_round_trips() {
    let schema = setup().await;

    let data = ok(
        &schema,
        r#"mutation { createMeeting(title: "Standup", time: "09:30", content: "daily sync") { id time content attendees { id } } }"#,
    )
    .await;
    assert_eq!(data["createMeeting"]["time"], "09:30");
    assert_eq!(data["createMeeting"]["content"], "daily sync");
    assert_eq!(data["createMeeting"]["attendees"], json!([]));

    let id = data["createMeeting"]["id"].as_i64().unwrap();
    let data = ok(&schema, &format!("{{ getMeeting(id: {id}) {{ title time }} }}")).await;
    assert_eq!(data["getMeeting"], json!({ "title": "Standup", "time": "09:30" }));
}

#[tokio::test]
async fn test_create_meeting_without_time() {
    let schema = setup().await;

    let empty = create_meeting(&schema, "Planning", "").await;
    let data = ok(&schema, &format!("{{ getMeeting(id: {empty}) {{ time }} }}")).await;
    assert_eq!(data["getMeeting"]["time"], "");

    let data = ok(
        &schema,
        r#"mutation { createMeeting(title: "Retro", content: "monthly") { time } }"#,
    )
    .await;
    assert_eq!(data["createMeeting"]["time"], "");
}

#[tokio::test]
async fn test_create_meeting_invalid_time_is_rejected() {
    let schema = setup().await;

    let (message, code) = fail(
        &schema,
        r#"mutation { createMeeting(title: "Late", time: "25:99", content: "never") { id } }"#,
    )
    .await;

    assert_eq!(code, "INVALID_ARGUMENT");
    assert_eq!(message, "Invalid time '25:99': expected HH:MM");

    let data = ok(&schema, "{ getAllMeetings { id } }").await;
    assert_eq!(data["getAllMeetings"], json!([]));
}

#[tokio::test]
async fn test_create_meeting_duplicate_title_conflicts() {
    let schema = setup().await;
    create_meeting(&schema, "Standup", "09:30").await;

    let (message, code) = fail(
        &schema,
        r#"mutation { createMeeting(title: "Standup", time: "10:00", content: "again") { id } }"#,
    )
    .await;

    assert_eq!(code, "CONFLICT");
    assert_eq!(message, "Meeting with title 'Standup' already exists");
}

#[tokio::test]
async fn test_remove_meeting_cascades_to_users() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    let retro = create_meeting(&schema, "Retro", "").await;
    attend(&schema, ann, standup).await;
    attend(&schema, ann, retro).await;

    let data = ok(&schema, &format!("mutation {{ removeMeeting(meetingId: {standup}) }}")).await;
    assert_eq!(
        data["removeMeeting"],
        format!("Meeting with id={standup} was successfully deleted")
    );

    let data = ok(&schema, &format!("{{ getUser(id: {ann}) {{ meetings {{ title }} }} }}")).await;
    assert_eq!(data["getUser"]["meetings"], json!([{ "title": "Retro" }]));

    let (_, code) = fail(&schema, &format!("{{ getMeeting(id: {standup}) {{ id }} }}")).await;
    assert_eq!(code, "NOT_FOUND");
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_add_user_to_meeting_once() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;

    let data = attend(&schema, ann, standup).await;
    assert_eq!(
        data["addUserToMeeting"],
        json!({ "id": standup, "attendees": [{ "id": ann, "meetings": [] }] })
    );
    assert_eq!(attendee_ids(&schema, standup).await, vec![ann]);

    let (message, code) = fail(
        &schema,
        &format!("mutation {{ addUserToMeeting(userId: {ann}, meetingId: {standup}) {{ id }} }}"),
    )
    .await;
    assert_eq!(code, "CONFLICT");
    assert_eq!(message, "User is already attendee");
    assert_eq!(attendee_ids(&schema, standup).await, vec![ann]);
}

#[tokio::test]
async fn test_add_user_to_meeting_requires_both_ends() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;

    let (message, code) = fail(
        &schema,
        &format!("mutation {{ addUserToMeeting(userId: 404, meetingId: {standup}) {{ id }} }}"),
    )
    .await;
    assert_eq!(code, "NOT_FOUND");
    assert_eq!(message, "User with id=404 not found");

    let (message, code) = fail(
        &schema,
        &format!("mutation {{ addUserToMeeting(userId: {ann}, meetingId: 404) {{ id }} }}"),
    )
    .await;
    assert_eq!(code, "NOT_FOUND");
    assert_eq!(message, "Meeting with id=404 not found");

    assert!(attendee_ids(&schema, standup).await.is_empty());
}

#[tokio::test]
async fn test_remove_user_from_meeting() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    attend(&schema, ann, standup).await;
    attend(&schema, bob, standup).await;

    let data = ok(
        &schema,
        &format!(
            "mutation {{ removeUserFromMeeting(userId: {ann}, meetingId: {standup}) {{ attendees {{ id }} }} }}"
        ),
    )
    .await;
    assert_eq!(
        data["removeUserFromMeeting"]["attendees"],
        json!([{ "id": bob }])
    );
}

#[tokio::test]
async fn test_remove_user_from_meeting_when_not_attending() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    attend(&schema, bob, standup).await;

    let (message, code) = fail(
        &schema,
        &format!(
            "mutation {{ removeUserFromMeeting(userId: {ann}, meetingId: {standup}) {{ id }} }}"
        ),
    )
    .await;

    assert_eq!(code, "NOT_FOUND");
    assert_eq!(message, "User is not an attendee");
    assert_eq!(attendee_ids(&schema, standup).await, vec![bob]);
}

#[tokio::test]
async fn test_remove_user_cascades_to_meetings() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    attend(&schema, ann, standup).await;
    attend(&schema, bob, standup).await;

    ok(&schema, &format!("mutation {{ removeUser(userId: {ann}) }}")).await;

    assert_eq!(attendee_ids(&schema, standup).await, vec![bob]);
    let data = ok(&schema, "{ getAllMeetings { attendees { id } } }").await;
    assert_eq!(data["getAllMeetings"], json!([{ "attendees": [{ "id": bob }] }]));
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_listings_are_empty_without_data() {
    let schema = setup().await;

    let data = ok(&schema, "{ getAllUsers { id } getAllMeetings { id } }").await;

    assert_eq!(data, json!({ "getAllUsers": [], "getAllMeetings": [] }));
}

#[tokio::test]
async fn test_listings_truncate_second_level() {
    let schema = setup().await;
    let ann = create_user(&schema, "Ann", "ann@example.com").await;
    let bob = create_user(&schema, "Bob", "bob@example.com").await;
    let standup = create_meeting(&schema, "Standup", "09:30").await;
    let retro = create_meeting(&schema, "Retro", "").await;
    attend(&schema, ann, standup).await;
    attend(&schema, ann, retro).await;
    attend(&schema, bob, standup).await;

    let data = ok(
        &schema,
        "{ getAllUsers { id meetings { id attendees { id } } } getAllMeetings { id attendees { id meetings { id } } } }",
    )
    .await;

    assert_eq!(
        data["getAllUsers"],
        json!([
            { "id": ann, "meetings": [{ "id": standup, "attendees": [] }, { "id": retro, "attendees": [] }] },
            { "id": bob, "meetings": [{ "id": standup, "attendees": [] }] }
        ])
    );
    assert_eq!(
        data["getAllMeetings"],
        json!([
            { "id": standup, "attendees": [{ "id": ann, "meetings": [] }, { "id": bob, "meetings": [] }] },
            { "id": retro, "attendees": [{ "id": ann, "meetings": [] }] }
        ])
    );
}
