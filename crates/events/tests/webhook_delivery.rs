//! Delivery fan-out tests against a local HTTP receiver.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::TimeZone;
use steampulse_db::models::achievement_event::NewAchievementEvent;
use steampulse_db::models::webhook_target::WebhookTarget;
use steampulse_events::WebhookNotifier;

/// Start a local receiver with an accepting and a rejecting route.
/// Returns its base URL.
async fn start_receiver() -> String {
    let app = Router::new()
        .route("/accept", post(|Json(_): Json<serde_json::Value>| async { StatusCode::OK }))
        .route(
            "/reject",
            post(|Json(_): Json<serde_json::Value>| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn target(id: i64, url: String) -> WebhookTarget {
    WebhookTarget {
        id,
        url,
        created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
    }
}

fn sample_event() -> NewAchievementEvent {
    NewAchievementEvent {
        steam_user_id: "76561198000000000".to_string(),
        app_id: 440,
        achievement_key: "FIRST_WIN".to_string(),
        achievement_name: Some("First Win".to_string()),
        achieved_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn delivers_to_every_target_and_isolates_failures() {
    let base = start_receiver().await;
    let notifier = WebhookNotifier::new();

    // Three targets: one accepting, one rejecting with 500, one
    // unreachable. Port 1 is never listening locally.
    let targets = vec![
        target(1, format!("{base}/accept")),
        target(2, format!("{base}/reject")),
        target(3, "http://127.0.0.1:1/hook".to_string()),
    ];

    let payload = WebhookNotifier::achievement_payload(&sample_event());
    let reports = notifier.deliver_to_all(&targets, &payload).await;

    // One report per target, in target order.
    assert_eq!(reports.len(), 3);

    assert!(reports[0].ok);
    assert_eq!(reports[0].status, Some(200));
    assert_eq!(reports[0].target_id, Some(1));

    // Application-level rejection is still a transport-level success.
    assert!(reports[1].ok);
    assert_eq!(reports[1].status, Some(500));

    // The unreachable target fails alone.
    assert!(!reports[2].ok);
    assert!(reports[2].error.is_some());
}

#[tokio::test]
async fn no_targets_means_no_reports() {
    let notifier = WebhookNotifier::new();
    let payload = WebhookNotifier::achievement_payload(&sample_event());
    let reports = notifier.deliver_to_all(&[], &payload).await;
    assert!(reports.is_empty());
}
