#![allow(dead_code)]

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Canned responses for a fake paper backend mounted under `/api`.
#[derive(Debug, Clone)]
pub struct Stub {
    pub calendar: Value,
    pub papers: Value,
    pub breakthroughs: Value,
    pub keyword_stats: Value,
    pub papers_status: StatusCode,
    pub subscribe_status: StatusCode,
    pub subscribe_body: Value,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            calendar: json!(["2024-05-01", "2024-05-03T00:00:00", "2024-05-02", "2024-05-01"]),
            papers: json!([paper("2405.00001", "Sparse Mixtures", false, 0.2)]),
            breakthroughs: json!([]),
            keyword_stats: json!([
                { "keyword": "llm", "paper_count": 9, "last_seen_at": "2024-05-03T00:00:00" },
                { "keyword": "agents", "paper_count": 4, "last_seen_at": "2024-05-03T00:00:00" }
            ]),
            papers_status: StatusCode::OK,
            subscribe_status: StatusCode::CREATED,
            subscribe_body: json!({ "email": "a@b.c", "verified": false }),
        }
    }
}

#[derive(Clone)]
pub struct Backend {
    pub base: String,
    pub queries: Arc<Mutex<Vec<String>>>,
    pub subscriptions: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct StubState {
    stub: Arc<Stub>,
    queries: Arc<Mutex<Vec<String>>>,
    subscriptions: Arc<Mutex<Vec<Value>>>,
}

pub fn paper(id: &str, title: &str, breakthrough: bool, score: f64) -> Value {
    json!({
        "id": 1,
        "arxiv_id": id,
        "title": title,
        "authors": ["Ada Lovelace", "Grace Hopper", "Alan Turing", "Edsger Dijkstra"],
        "institutions": [],
        "hf_listing_date": "2024-05-03",
        "problem_summary": "Long contexts are slow.",
        "solution_summary": null,
        "effect_summary": "2x faster decoding.",
        "keywords": ["llm"],
        "breakthrough_label": breakthrough,
        "breakthrough_score": score,
        "breakthrough_reason": if breakthrough { json!("beats prior SOTA") } else { Value::Null },
        "findings": []
    })
}

pub async fn spawn_backend(stub: Stub) -> Backend {
    let state = StubState {
        stub: Arc::new(stub),
        queries: Arc::new(Mutex::new(Vec::new())),
        subscriptions: Arc::new(Mutex::new(Vec::new())),
    };
    let backend_state = state.clone();

    let app = Router::new()
        .route("/api/papers/calendar", get(calendar))
        .route("/api/papers", get(papers))
        .route("/api/keywords/stats", get(keyword_stats))
        .route("/api/subscribers", post(subscribe))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Backend {
        base: format!("http://{addr}/api"),
        queries: backend_state.queries,
        subscriptions: backend_state.subscriptions,
    }
}

/// A base URL nothing listens on.
pub fn dead_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

async fn calendar(State(state): State<StubState>) -> Json<Value> {
    Json(state.stub.calendar.clone())
}

async fn papers(
    State(state): State<StubState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, Json<Value>) {
    let query = query.unwrap_or_default();
    state.queries.lock().unwrap().push(query.clone());
    if !state.stub.papers_status.is_success() {
        return (state.stub.papers_status, Json(json!({ "detail": "boom" })));
    }
    let body = if query.contains("breakthrough_only=true") {
        state.stub.breakthroughs.clone()
    } else {
        state.stub.papers.clone()
    };
    (StatusCode::OK, Json(body))
}

async fn keyword_stats(State(state): State<StubState>) -> Json<Value> {
    Json(state.stub.keyword_stats.clone())
}

async fn subscribe(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.subscriptions.lock().unwrap().push(body);
    (state.stub.subscribe_status, Json(state.stub.subscribe_body.clone()))
}
