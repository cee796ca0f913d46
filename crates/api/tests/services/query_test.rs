use chrono::NaiveDate;
use fitstudio_api::services::{
    booking::attempt_booking,
    query::{list_bookings_for_email, list_classes},
};
use fitstudio_core::{errors::BookingError, models::booking::BookingHistory};
use pretty_assertions::assert_eq;

use crate::flaky_store::DownStore;
use crate::test_utils::{request, TestContext};

#[tokio::test]
async fn test_only_future_classes_in_start_order() {
    let ctx = TestContext::new();
    ctx.class_in("Meditation", 24 * 8, 30, 30).await;
    ctx.class_in("Morning Zumba", -24, 25, 5).await;
    ctx.class_in("Yoga Flow", 24, 20, 20).await;

    let classes = list_classes(&ctx.store, Some("UTC"), ctx.now).await.unwrap();

    let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Yoga Flow", "Meditation"]);
}

#[tokio::test]
async fn test_class_times_are_localized() {
    let ctx = TestContext::new();
    let start = NaiveDate::from_ymd_opt(2999, 7, 8)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let class_id = ctx.class_at("HIIT Blast", start, 15).await;

    let classes = list_classes(&ctx.store, Some("America/New_York"), ctx.now)
        .await
        .unwrap();

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].class_id, class_id);
    assert_eq!(classes[0].start_time, "2999-07-08 10:00:00 EDT-0400");
    assert_eq!(classes[0].available_slots, 15);
}

#[tokio::test]
async fn test_missing_timezone_defaults_to_utc() {
    let ctx = TestContext::new();
    ctx.class_in("Spin Cycle", 3, 25, 25).await;

    let classes = list_classes(&ctx.store, None, ctx.now).await.unwrap();

    assert!(classes[0].start_time.ends_with(" UTC+0000"));
}

#[tokio::test]
async fn test_unknown_timezone_is_rejected_on_both_reads() {
    let ctx = TestContext::new();

    let classes = list_classes(&ctx.store, Some("Atlantis/Lost_City"), ctx.now).await;
    let bookings =
        list_bookings_for_email(&ctx.store, Some("alice@example.com"), Some("Nowhere")).await;

    assert!(matches!(classes, Err(BookingError::InvalidTimezone)));
    assert!(matches!(bookings, Err(BookingError::InvalidTimezone)));
}

#[tokio::test]
async fn test_booking_history_is_ordered_and_localized() {
    let ctx = TestContext::new();
    let later = ctx.class_in("Meditation", 24 * 8, 30, 30).await;
    let sooner = ctx.class_in("Yoga Flow", 24, 20, 20).await;
    for class_id in [later, sooner] {
        attempt_booking(&ctx.store, &request(class_id, "Alice", "alice@example.com"), ctx.now)
            .await
            .unwrap();
    }

    let history =
        list_bookings_for_email(&ctx.store, Some("ALICE@example.com"), Some("Asia/Kolkata"))
            .await
            .unwrap();

    let BookingHistory::Found(bookings) = history else {
        panic!("expected bookings, got {:?}", history);
    };
    let names: Vec<&str> = bookings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Yoga Flow", "Meditation"]);
    assert!(bookings.iter().all(|b| b.start_time.ends_with(" IST+0530")));
    assert!(bookings.iter().all(|b| b.booking_date.ends_with(" IST+0530")));
}

#[tokio::test]
async fn test_no_bookings_is_not_an_error() {
    let ctx = TestContext::new();
    ctx.store.insert_user("Charlie Brown", "charlie@example.com").await.unwrap();

    let known = list_bookings_for_email(&ctx.store, Some("charlie@example.com"), None)
        .await
        .unwrap();
    let unknown = list_bookings_for_email(&ctx.store, Some("nobody@example.com"), None)
        .await
        .unwrap();

    assert_eq!(known, BookingHistory::NoBookings);
    assert_eq!(unknown, BookingHistory::NoBookings);
}

#[tokio::test]
async fn test_email_is_required() {
    let ctx = TestContext::new();

    for email in [None, Some(""), Some("   ")] {
        let result = list_bookings_for_email(&ctx.store, email, None).await;
        assert!(
            matches!(result, Err(BookingError::InvalidInput(ref msg)) if msg == "Email query parameter is required.")
        );
    }
}

#[tokio::test]
async fn test_read_failures_are_internal() {
    let ctx = TestContext::new();

    let classes = list_classes(&DownStore, None, ctx.now).await;
    let bookings = list_bookings_for_email(&DownStore, Some("alice@example.com"), None).await;

    assert!(matches!(classes, Err(BookingError::Internal(_))));
    assert!(matches!(bookings, Err(BookingError::Internal(_))));
}

#[tokio::test]
async fn test_listing_has_no_side_effects() {
    let ctx = TestContext::new();
    let class_id = ctx.class_in("CrossFit", 2, 12, 10).await;

    list_classes(&ctx.store, Some("Europe/London"), ctx.now).await.unwrap();
    list_bookings_for_email(&ctx.store, Some("sarah@example.com"), None)
        .await
        .unwrap();

    assert_eq!(ctx.store.class(class_id).await.unwrap().available_slots, 10);
    assert!(ctx.store.users().await.is_empty());
}
