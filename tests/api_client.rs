//! Integration tests for the API client against a stub library backend

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use libdesk::api::{ApiClient, ApiError};
use libdesk::config::{Config, HttpConfig};
use libdesk::models::{NewBook, NewLoan, NewReader};

/// Requests captured by the stub backend
#[derive(Clone, Default)]
struct Captured {
    posts: Arc<Mutex<Vec<(String, Value)>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Captured {
    fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = Config {
        api_base_url: format!("http://{}", addr),
        page_limit: 10,
        http: HttpConfig::default(),
    };
    ApiClient::new(&config).unwrap()
}

fn sample_books() -> Value {
    json!([
        {"id": 1, "title": "Dune", "author": "Frank Herbert",
         "publisher": "Chilton", "topic": "SF"},
        {"id": 2, "title": "The Trial", "author": "Franz Kafka",
         "publisher": "Verlag Die Schmiede", "topic": "Fiction"}
    ])
}

fn stub_router(captured: Captured) -> Router {
    async fn record_post(
        path: &'static str,
        message: &'static str,
        state: Captured,
        body: Value,
    ) -> (StatusCode, Json<Value>) {
        state.posts.lock().unwrap().push((path.to_string(), body));
        (StatusCode::OK, Json(json!({ "message": message })))
    }

    Router::new()
        .route(
            "/books/",
            post(|State(state): State<Captured>, Json(body): Json<Value>| async move {
                record_post("/books/", "Book added successfully", state, body).await
            })
            .get(|State(state): State<Captured>, Query(params): Query<HashMap<String, String>>| async move {
                state.queries.lock().unwrap().push(params);
                Json(sample_books())
            }),
        )
        .route(
            "/readers/",
            post(|State(state): State<Captured>, Json(body): Json<Value>| async move {
                record_post("/readers/", "Reader added successfully", state, body).await
            }),
        )
        .route(
            "/loans/",
            post(|State(state): State<Captured>, Json(body): Json<Value>| async move {
                record_post("/loans/", "Book issued successfully", state, body).await
            }),
        )
        .route(
            "/books/search/",
            get(|State(state): State<Captured>, Query(params): Query<HashMap<String, String>>| async move {
                state.queries.lock().unwrap().push(params);
                Json(json!([
                    {"id": 2, "title": "The Trial", "author": "Franz Kafka",
                     "publisher": "Verlag Die Schmiede", "topic": "Fiction"}
                ]))
            }),
        )
        .with_state(captured)
}

#[tokio::test]
async fn create_book_sends_exactly_one_post_with_verbatim_fields() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured.clone())).await;
    let client = client_for(addr);

    let message = client
        .create_book(&NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publisher: "Chilton".to_string(),
            topic: "SF".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(message, "Book added successfully");

    let posts = captured.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "/books/");
    assert_eq!(posts[0].1["title"], "Dune");
    assert_eq!(posts[0].1["author"], "Frank Herbert");
    assert_eq!(posts[0].1["publisher"], "Chilton");
    assert_eq!(posts[0].1["topic"], "SF");
    assert_eq!(posts[0].1.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn create_reader_returns_server_message() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured.clone())).await;
    let client = client_for(addr);

    let message = client
        .create_reader(&NewReader {
            name: "Ada Lovelace".to_string(),
            address: "Berlin".to_string(),
            phone: "123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(message, "Reader added successfully");
    assert_eq!(captured.posts().len(), 1);
}

#[tokio::test]
async fn create_loan_sends_integer_ids_and_iso_dates() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured.clone())).await;
    let client = client_for(addr);

    let message = client
        .create_loan(&NewLoan {
            reader_id: 7,
            book_id: 42,
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(message, "Book issued successfully");

    let posts = captured.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].1["reader_id"], 7);
    assert_eq!(posts[0].1["book_id"], 42);
    assert_eq!(posts[0].1["issue_date"], "2025-03-01");
    assert_eq!(posts[0].1["due_date"], "2025-03-15");
}

#[tokio::test]
async fn list_books_sends_skip_and_limit_and_decodes_records() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured.clone())).await;
    let client = client_for(addr);

    let books = client.list_books(0, 10).await.unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[1].author, "Franz Kafka");

    let queries = captured.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("skip").map(String::as_str), Some("0"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn repeated_list_calls_return_identical_pages() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured)).await;
    let client = client_for(addr);

    let first = client.list_books(0, 10).await.unwrap();
    let second = client.list_books(0, 10).await.unwrap();

    let rows = |books: &[libdesk::models::Book]| -> Vec<String> {
        books
            .iter()
            .map(|b| format!("{}|{}|{}|{}", b.title, b.author, b.publisher, b.topic))
            .collect()
    };
    assert_eq!(rows(&first), rows(&second));
}

#[tokio::test]
async fn search_books_passes_author_and_topic_filters() {
    let captured = Captured::default();
    let addr = serve(stub_router(captured.clone())).await;
    let client = client_for(addr);

    let books = client
        .search_books(Some("Franz Kafka"), None, 0, 10)
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Trial");

    let queries = captured.queries();
    assert_eq!(
        queries[0].get("author").map(String::as_str),
        Some("Franz Kafka")
    );
    assert_eq!(queries[0].get("topic"), None);
}

#[tokio::test]
async fn rejected_create_surfaces_status_and_detail() {
    // A legitimate server error payload must not be swallowed; the
    // status code decides, the detail text is reported.
    let router = Router::new().route(
        "/books/",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Book with this title already exists"})),
            )
        }),
    );
    let addr = serve(router).await;
    let client = client_for(addr);

    let err = client
        .create_book(&NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publisher: "Chilton".to_string(),
            topic: "SF".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_rejection());
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Book with this title already exists");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let router = Router::new().route(
        "/books/",
        get(|| async { ([(header::CONTENT_TYPE, "application/json")], "not json").into_response() }),
    );
    let addr = serve(router).await;
    let client = client_for(addr);

    let err = client.list_books(0, 10).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind a port, then drop the listener so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.list_books(0, 10).await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}
