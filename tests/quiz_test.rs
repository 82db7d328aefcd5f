use http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{assert_error, fixture_question_json};

const INVALID_QUIZ: &str = "quiz input was bad or not formatted correctly";

#[tokio::test]
async fn test_quiz_all_categories() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [2, 3, 4, 5]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["question"], fixture_question_json(1));
    assert!(body.get("category").is_none());
}

#[tokio::test]
async fn test_quiz_null_category_means_all() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [1, 2, 3, 4], "quiz_category": null}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["question"], fixture_question_json(5));
}

#[tokio::test]
async fn test_quiz_single_category() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [2], "quiz_category": 4}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["category"], 4);
    assert_eq!(body["question"], fixture_question_json(1));
}

#[tokio::test]
async fn test_quiz_picks_unseen_question() {
    let (server, _backend) = common::setup_seeded_server().await;

    for _ in 0..10 {
        let response = server
            .post("/quizzes")
            .json(&json!({"previous_questions": [1]}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["total_questions"], 4);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!((2..=5).contains(&id));
    }
}

#[tokio::test]
async fn test_quiz_exhausted() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [1, 2], "quiz_category": 4}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({"success": true, "total_questions": 0, "category": 4}));

    let all = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [1, 2, 3, 4, 5]}))
        .await;
    all.assert_status_ok();
    assert_eq!(
        all.json::<Value>(),
        json!({"success": true, "total_questions": 0})
    );
}

#[tokio::test]
async fn test_quiz_duplicate_previous_questions() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [2, 2], "quiz_category": 4}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["question"], fixture_question_json(1));
}

#[tokio::test]
async fn test_quiz_bad_input() {
    let (server, _backend) = common::setup_seeded_server().await;

    let bad_bodies = [
        json!({"quiz_category": "dsad"}),
        json!({"previous_questions": [], "quiz_category": "dsad"}),
        json!({"previous_questions": "1"}),
        json!({"previous_questions": [99]}),
        json!({"previous_questions": [], "quiz_category": 8}),
    ];

    for body in bad_bodies {
        let response = server.post("/quizzes").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error(&response.json(), 400, "bad request", INVALID_QUIZ);
    }
}

#[tokio::test]
async fn test_quiz_question_outside_category() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [5], "quiz_category": 4}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(
        &response.json(),
        400,
        "bad request",
        "a question does not belong to category",
    );
}

#[tokio::test]
async fn test_quiz_without_body() {
    let (server, _backend) = common::setup_seeded_server().await;

    let response = server.post("/quizzes").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), 400, "bad request", "no json body was found");
}
