//! Study planner against a mocked generateContent endpoint.

use focusflow_core::planner::{
    PlanClient, BUSY_MESSAGE, EMPTY_BACKLOG_MESSAGE, NO_PLAN_MESSAGE,
};
use focusflow_core::storage::PlannerConfig;
use focusflow_core::{BacklogItem, NewBacklogItem, Priority, StudyPlanner, Subject};
use mockito::Matcher;

const PATH: &str = "/v1beta/models/test-model:generateContent";

fn backlog() -> Vec<BacklogItem> {
    let mut done = NewBacklogItem {
        title: "Kinematics".into(),
        subject: Subject::Physics,
        priority: Priority::Low,
        estimated_hours: 1.0,
    }
    .into_item()
    .unwrap();
    done.is_completed = true;

    let pending = NewBacklogItem {
        title: "Chemical Bonding".into(),
        subject: Subject::Chemistry,
        priority: Priority::High,
        estimated_hours: 3.0,
    }
    .into_item()
    .unwrap();

    vec![done, pending]
}

fn planner_for(server: &mockito::ServerGuard) -> StudyPlanner {
    let config = PlannerConfig {
        endpoint: server.url(),
        model: "test-model".into(),
        timeout_secs: 5,
        ..PlannerConfig::default()
    };
    StudyPlanner::new(PlanClient::new(&config, "test-key").unwrap())
}

#[tokio::test]
async fn empty_backlog_skips_the_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", PATH).expect(0).create_async().await;

    let planner = planner_for(&server);
    assert_eq!(planner.generate_study_plan(&[]).await, EMPTY_BACKLOG_MESSAGE);

    let mut all_done = backlog();
    all_done.iter_mut().for_each(|i| i.is_completed = true);
    assert_eq!(
        planner.generate_study_plan(&all_done).await,
        "No pending backlog items! Time to relax or start a new chapter."
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn returns_generated_text_for_pending_items() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("Chemistry: Chemical Bonding".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"parts":[{"text":"Day 1: "},{"text":"Bonding basics."}]}}]}"#,
        )
        .create_async()
        .await;

    let plan = planner_for(&server).generate_study_plan(&backlog()).await;
    assert_eq!(plan, "Day 1: Bonding basics.");
    mock.assert_async().await;
}

#[tokio::test]
async fn completed_items_are_left_out_of_the_prompt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Regex("Kinematics".into()))
        .expect(0)
        .create_async()
        .await;
    let _fallback = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
        .create_async()
        .await;

    let plan = planner_for(&server).generate_study_plan(&backlog()).await;
    assert_eq!(plan, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_answer_uses_no_plan_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let plan = planner_for(&server).generate_study_plan(&backlog()).await;
    assert_eq!(plan, NO_PLAN_MESSAGE);
}

#[tokio::test]
async fn http_failure_is_replaced_with_encouragement() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let plan = planner_for(&server).generate_study_plan(&backlog()).await;
    assert_eq!(plan, BUSY_MESSAGE);
}

#[tokio::test]
async fn malformed_json_is_replaced_with_encouragement() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let plan = planner_for(&server).generate_study_plan(&backlog()).await;
    assert_eq!(plan, BUSY_MESSAGE);
}

#[tokio::test]
async fn missing_api_key_is_replaced_with_encouragement() {
    let config = PlannerConfig {
        api_key_env: "FOCUSFLOW_PLANNER_KEY_NOT_SET_IN_TESTS".into(),
        ..PlannerConfig::default()
    };
    let plan = StudyPlanner::from_config(&config)
        .generate_study_plan(&backlog())
        .await;
    assert_eq!(plan, BUSY_MESSAGE);
}
