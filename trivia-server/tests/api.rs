//! End-to-end route tests against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use trivia_server::models::{Category, Question, DEFAULT_CATEGORIES};
use trivia_server::{build_router, AppState, MemoryStore, QuizRng, ServerConfig};

const ART_IDS: [i32; 6] = [3, 4, 5, 10, 11, 12];

/// 19 questions; ids 3,4,5,10,11,12 are Art (category 2).
fn fixture() -> MemoryStore {
    let categories = DEFAULT_CATEGORIES
        .iter()
        .map(|(id, kind)| Category::new(*id, *kind))
        .collect();

    let questions = (1..=19)
        .map(|id| {
            let category = if ART_IDS.contains(&id) {
                2
            } else {
                [1, 3, 4, 5, 6][id as usize % 5]
            };
            Question {
                id,
                question: format!("Question number {} about topic {}", id, category),
                answer: format!("Answer {}", id),
                category,
                difficulty: (id % 5) + 1,
            }
        })
        .collect();

    MemoryStore::with_data(categories, questions)
}

fn app_with(store: MemoryStore) -> Router {
    let state = AppState::new(Arc::new(store), QuizRng::seeded(2024));
    build_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with(fixture())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn assert_error(body: &Value, code: u16, message: &str) {
    assert_eq!(
        body,
        &json!({"error": code, "message": message, "success": false})
    );
}

// === Categories ===

#[tokio::test]
async fn get_categories() {
    let (status, body) = send(&app(), "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
    assert_eq!(body["categories"][1], json!({"id": 2, "type": "Art"}));
}

#[tokio::test]
async fn get_categories_empty_is_404() {
    let (status, body) = send(&app_with(MemoryStore::new()), "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = send(&app(), "GET", "/categories/666666", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let (status, body) = send(&app(), "PUT", "/categories", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_error(&body, 405, "method not allowed");
}

#[tokio::test]
async fn questions_by_category() {
    let (status, body) = send(&app(), "GET", "/categories/2/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["category_id"], 2);
    assert_eq!(body["current_category"], "Art");
    assert_eq!(body["total"], 6);

    let ids: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4, 5, 10, 11, 12]);
}

#[tokio::test]
async fn questions_by_unknown_category_is_404() {
    for uri in ["/categories/10/questions", "/categories/0/questions", "/categories/art/questions"] {
        let (status, body) = send(&app(), "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["success"], false);
    }
}

// === Pagination ===

#[tokio::test]
async fn first_page_has_ten_questions() {
    let (status, body) = send(&app(), "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 19);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[9]["id"], 10);
    assert_eq!(body["currentcategory"], questions[0]["category"]);
}

#[tokio::test]
async fn last_partial_page_is_not_an_error() {
    let (status, body) = send(&app(), "GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 9);
    assert_eq!(questions[0]["id"], 11);
    assert_eq!(questions[8]["id"], 19);
}

#[tokio::test]
async fn page_past_the_end_is_404() {
    for uri in ["/questions?page=3", "/questions?page=10000000"] {
        let (status, body) = send(&app(), "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, 404, "resource not found");
    }
}

#[tokio::test]
async fn non_numeric_page_falls_back_to_first() {
    let (status, body) = send(&app(), "GET", "/questions?page=first", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["id"], 1);
}

// === Create / delete ===

#[tokio::test]
async fn create_question_echoes_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({
            "question": "First human heart transplant was conducted in which year?",
            "answer": "1967",
            "category": 1,
            "difficulty": 4
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], 20);
    assert_eq!(body["answer"], "1967");
    assert_eq!(body["category"], 1);
    assert_eq!(body["difficulty"], 4);

    let (_, page) = send(&app, "GET", "/questions?page=2", None).await;
    assert_eq!(page["total"], 20);
    assert_eq!(page["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn create_accepts_string_numbers() {
    let (status, body) = send(
        &app(),
        "POST",
        "/questions",
        Some(json!({"question": "Q?", "answer": "A", "category": "3", "difficulty": "2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], 3);
}

#[tokio::test]
async fn create_with_empty_text_is_422() {
    for payload in [
        json!({"question": "", "answer": "", "category": 1, "difficulty": 1}),
        json!({"question": "", "answer": "x", "category": 1, "difficulty": 1}),
        json!({"question": "x", "answer": "", "category": 1, "difficulty": 1}),
    ] {
        let (status, body) = send(&app(), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, 422, "unprocessable");
    }
}

#[tokio::test]
async fn create_with_malformed_payload_is_422() {
    for payload in [
        json!({"question": "Q?", "answer": "A"}),
        json!({"question": "Q?", "answer": "A", "category": "art", "difficulty": 1}),
        json!({"question": "Q?", "answer": "A", "category": 1, "difficulty": 9}),
        json!([1, 2, 3]),
    ] {
        let (status, _) = send(&app(), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn delete_question_removes_it() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/questions/14", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"delete_id": 14, "success": true}));

    let (_, page) = send(&app, "GET", "/questions?page=2", None).await;
    let ids: Vec<i64> = page["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&14));
    assert_eq!(page["total"], 18);

    let (status, _) = send(&app, "DELETE", "/questions/14", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_missing_question_is_422() {
    let app = app();
    for uri in ["/questions/999999", "/questions/-1", "/questions/99999999999"] {
        let (status, body) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_error(&body, 422, "unprocessable");
    }
}

#[tokio::test]
async fn delete_non_numeric_id_is_404() {
    let (status, body) = send(&app(), "DELETE", "/questions/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
}

// === Search ===

#[tokio::test]
async fn search_is_case_insensitive() {
    let (status, body) = send(
        &app(),
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "NUMBER 1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // "number 1 ", "number 10".."number 19"
    assert_eq!(body["total"], 11);
    assert_eq!(body["currentcategory"], body["questions"][0]["category"]);
}

#[tokio::test]
async fn search_term_whitespace_is_significant() {
    let (status, body) = send(
        &app(),
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "1 "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let ids: Vec<_> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 11]);
}

#[tokio::test]
async fn search_empty_term_is_404() {
    let (status, body) = send(&app(), "POST", "/questions/search", Some(json!({"searchTerm": ""}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
}

#[tokio::test]
async fn search_without_match_is_422() {
    let (status, body) = send(
        &app(),
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "123sdkd"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, 422, "unprocessable");
}

#[tokio::test]
async fn search_without_term_field_is_400() {
    let (status, body) = send(&app(), "POST", "/questions/search", Some(json!({"term": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "bad request");
}

// === Quizzes ===

#[tokio::test]
async fn quiz_any_category_skips_previous() {
    let app = app();
    for _ in 0..30 {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [3, 4, 10, 12, 11, 5],
                "quiz_category": {"type": "click"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(![3, 4, 10, 12, 11, 5].contains(&id), "returned excluded id {}", id);
    }
}

#[tokio::test]
async fn quiz_by_category_stays_in_category() {
    let app = app();
    for _ in 0..30 {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [3, 12],
                "quiz_category": {"type": "Art", "id": 2}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], 2);
        assert_ne!(body["question"]["id"], 3);
        assert_ne!(body["question"]["id"], 12);
    }
}

#[tokio::test]
async fn quiz_exhausted_category_is_404() {
    let (status, body) = send(
        &app(),
        "POST",
        "/quizzes",
        Some(json!({
            "previous_questions": [3, 4, 10, 12, 11, 5],
            "quiz_category": {"type": "Art", "id": 2}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
}

#[tokio::test]
async fn quiz_without_category_is_400() {
    for payload in [
        json!({"previous_questions": [3, 4], "quiz_category": null}),
        json!({"previous_questions": [3, 4]}),
        json!({"previous_questions": ["a"], "quiz_category": "any"}),
    ] {
        let (status, body) = send(&app(), "POST", "/quizzes", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "bad request");
    }
}

#[tokio::test]
async fn quiz_session_walks_all_questions_once() {
    let app = app();
    let mut previous: Vec<i64> = Vec::new();

    loop {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": previous, "quiz_category": "any"})),
        )
        .await;

        if status == StatusCode::NOT_FOUND {
            break;
        }
        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    assert_eq!(previous.len(), 19);
}

#[tokio::test]
async fn health_reports_store() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
}
