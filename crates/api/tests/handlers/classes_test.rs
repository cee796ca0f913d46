use fitstudio_core::models::class::ClassView;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_list_classes() {
    let ctx = TestContext::new();
    let spin = ctx.class_in("Spin Cycle", 48, 25, 25).await;
    let yoga = ctx.class_in("Yoga Flow", 24, 20, 20).await;
    ctx.class_in("Morning Zumba", -24, 25, 5).await;

    let response = ctx
        .server()
        .get("/api/classes")
        .add_query_param("timezone", "America/New_York")
        .await;

    assert_eq!(response.status_code(), 200);
    let classes = response.json::<Vec<ClassView>>();
    let ids: Vec<i64> = classes.iter().map(|c| c.class_id).collect();
    assert_eq!(ids, vec![yoga, spin]);
    assert_eq!(classes[0].available_slots, 20);
    assert!(classes[0].start_time.ends_with("-0400") || classes[0].start_time.ends_with("-0500"));
}

#[tokio::test]
async fn test_list_classes_empty() {
    let ctx = TestContext::new();

    let response = ctx.server().get("/api/classes").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_classes_invalid_timezone() {
    let ctx = TestContext::new();
    ctx.class_in("Yoga Flow", 24, 20, 20).await;

    let response = ctx
        .server()
        .get("/api/classes")
        .add_query_param("timezone", "Invalid/Timezone")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid timezone specified." })
    );
}

#[tokio::test]
async fn test_list_classes_timezone_ignores_case() {
    let ctx = TestContext::new();
    ctx.class_in("Yoga Flow", 24, 20, 20).await;

    let response = ctx
        .server()
        .get("/api/classes")
        .add_query_param("timezone", "asia/kolkata")
        .await;

    assert_eq!(response.status_code(), 200);
    let classes = response.json::<Vec<ClassView>>();
    assert!(classes[0].start_time.ends_with(" IST+0530"));
}
