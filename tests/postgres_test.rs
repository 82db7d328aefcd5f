//! The HTTP scenarios again, against a PostgreSQL container.
//!
//! Run with `cargo test --test postgres_test -- --ignored` on a host with Docker.

use http::StatusCode;
use serde_json::{json, Value};
use trivia_api::error::AppError;
use trivia_api::models::{NewQuestion, QuestionPatch};

mod common;

use common::{assert_error, fixture_question_json};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_question_crud() {
    let (server, _backend, _container) = common::setup_postgres_seeded_server().await;

    let listed = server.get("/questions").add_query_param("page", 1).await;
    listed.assert_status_ok();
    let body: Value = listed.json();
    assert_eq!(body["total_questions"], 5);
    assert_eq!(body["questions"][0], fixture_question_json(1));

    let created = server
        .post("/questions")
        .json(&json!({
            "question": "Which planet has the most moons?",
            "answer": "Saturn",
            "difficulty": 3,
            "category": 1
        }))
        .await;
    created.assert_status_ok();
    assert_eq!(created.json::<Value>()["question"]["id"], 6);

    let replaced = server
        .put("/questions/6")
        .json(&json!({
            "question": "Which planet has the most known moons?",
            "answer": "Saturn",
            "difficulty": 4,
            "category": 1
        }))
        .await;
    replaced.assert_status_ok();
    assert_eq!(replaced.json::<Value>()["question"]["difficulty"], 4);

    let patched = server
        .patch("/questions/6")
        .json(&json!({"category": 3}))
        .await;
    patched.assert_status_ok();
    let body: Value = patched.json();
    assert_eq!(body["question"]["category"], 3);
    assert_eq!(body["question"]["difficulty"], 4);

    let deleted = server.delete("/questions/6").await;
    deleted.assert_status_ok();

    let missing = server.get("/questions/6").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_error(
        &missing.json(),
        404,
        "not found",
        "no question found with id 6",
    );

    let huge_page = server
        .get("/questions")
        .add_query_param("page", i64::MAX.to_string())
        .await;
    huge_page.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_search() {
    let (server, _backend, _container) = common::setup_postgres_seeded_server().await;

    let response = server
        .post("/questions")
        .json(&json!({"search_term": "WHAT"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_questions"], 2);
    assert_eq!(
        body["questions"],
        json!([fixture_question_json(2), fixture_question_json(5)])
    );

    server
        .post("/questions")
        .json(&json!({
            "question": "Où se trouve l'ÉCOLE Polytechnique?",
            "answer": "Palaiseau",
            "difficulty": 3,
            "category": 3
        }))
        .await
        .assert_status_ok();
    let folded = server
        .post("/questions")
        .json(&json!({"search_term": "école"}))
        .await;
    folded.assert_status_ok();
    assert_eq!(folded.json::<Value>()["questions"][0]["answer"], "Palaiseau");

    let wildcard = server
        .post("/questions")
        .json(&json!({"search_term": "%"}))
        .await;
    wildcard.assert_status(StatusCode::NOT_FOUND);

    let in_category = server
        .post("/categories/4/questions")
        .json(&json!({"search_term": "what"}))
        .await;
    in_category.assert_status_ok();
    assert_eq!(
        in_category.json::<Value>()["questions"],
        json!([fixture_question_json(2)])
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_categories_and_quiz() {
    let (server, _backend, _container) = common::setup_postgres_seeded_server().await;

    let categories = server.get("/categories").await;
    categories.assert_status_ok();
    assert_eq!(
        categories.json::<Value>()["categories"][3],
        json!({"id": 4, "type": "History", "questions": [1, 2]})
    );

    let quiz = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [2], "quiz_category": 4}))
        .await;
    quiz.assert_status_ok();
    let body: Value = quiz.json();
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["question"], fixture_question_json(1));

    let unknown = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [99]}))
        .await;
    unknown.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_backend_operations() {
    let (backend, _container) = common::setup_postgres_test_database().await.unwrap();
    let category = backend.create_category("Science").await.unwrap();

    let orphan = backend
        .create_question(&NewQuestion {
            question: "Orphan?".to_string(),
            answer: "Yes".to_string(),
            difficulty: 1,
            category: category.id + 100,
        })
        .await;
    assert!(matches!(orphan, Err(AppError::BadRequest(_))));

    let created = backend
        .create_question(&NewQuestion {
            question: "What is H2O?".to_string(),
            answer: "Water".to_string(),
            difficulty: 1,
            category: category.id,
        })
        .await
        .unwrap();

    let found = backend
        .find_questions_by_ids(&[created.id, created.id + 100])
        .await
        .unwrap();
    assert_eq!(found, vec![created.clone()]);

    let patched = backend
        .patch_question(
            created.id,
            &QuestionPatch {
                answer: Some("Dihydrogen monoxide".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(patched.answer, "Dihydrogen monoxide");
    assert_eq!(patched.question, created.question);

    assert!(backend
        .patch_question(created.id + 100, &QuestionPatch::default())
        .await
        .unwrap()
        .is_none());

    assert_eq!(
        backend.question_ids_for_category(category.id).await.unwrap(),
        vec![created.id]
    );
    assert!(backend.delete_question(created.id).await.unwrap().is_some());
    assert!(backend.find_question_by_id(created.id).await.unwrap().is_none());
}
