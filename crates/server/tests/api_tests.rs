use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use shelf_catalog::chat::LlmChatService;
use shelf_catalog::{seed_sample_data, CatalogStore, ChatResponse, ChatService};
use shelf_core::config::CacheSettings;
use shelf_core::{AppError, AppResult};
use shelf_llm::{ChatMessage, MockLlmClient};
use shelf_prompt::default_prompt;
use shelf_server::{create_app, create_router, AppState};
use tokio_util::sync::CancellationToken;

fn seeded_state() -> AppState {
    let store = Arc::new(CatalogStore::open_in_memory().expect("store"));
    seed_sample_data(&store).expect("seed");
    AppState::new(store, &CacheSettings::default())
}

fn server_for(state: AppState) -> TestServer {
    TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server")
}

fn create_test_server() -> TestServer {
    server_for(seeded_state())
}

struct FailingChat;

#[async_trait::async_trait]
impl ChatService for FailingChat {
    fn name(&self) -> &str {
        "FailingChat"
    }

    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _cancel: &CancellationToken,
    ) -> AppResult<ChatResponse> {
        Err(AppError::Llm("backend unreachable".to_string()))
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn test_book_search_ranks_title_first() {
        let server = create_test_server();

        let response = server
            .post("/api/ai/search")
            .json(&json!({ "query": "clean code" }))
            .await;
        response.assert_status_ok();

        let hits: Vec<Value> = response.json();
        assert!(!hits.is_empty());
        assert_eq!(hits[0]["book"]["title"], "Clean Code");
        assert!(hits[0]["score"].as_f64().unwrap() > 0.0);
        assert!(hits[0]["reason"]
            .as_str()
            .unwrap()
            .starts_with("Matched on: "));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let server = create_test_server();

        let response = server
            .post("/api/ai/search")
            .json(&json!({ "query": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["message"], "Query is required");
    }

    #[tokio::test]
    async fn test_unmatched_query_is_empty_list() {
        let server = create_test_server();

        let response = server
            .post("/api/ai/search")
            .json(&json!({ "query": "xyzzy" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_game_search_includes_discounted_price() {
        let server = create_test_server();

        let response = server
            .post("/api/games/search")
            .json(&json!({ "query": "roguelike" }))
            .await;
        response.assert_status_ok();

        let hits: Vec<Value> = response.json();
        assert_eq!(hits[0]["game"]["title"], "Hades");
        assert!(hits[0]["game"]["discountedPrice"].is_number());
    }
}

mod books {
    use super::*;

    #[tokio::test]
    async fn test_list_and_filter() {
        let server = create_test_server();

        let all: Vec<Value> = server.get("/api/books").await.json();
        assert_eq!(all.len(), 5);
        // ordered by title
        assert_eq!(all[0]["title"], "Clean Code");

        let fantasy: Vec<Value> = server.get("/api/books?genre=Fantasy").await.json();
        assert_eq!(fantasy.len(), 1);
        assert_eq!(fantasy[0]["author"], "J.R.R. Tolkien");

        let paged: Vec<Value> = server.get("/api/books?page=2&pageSize=2").await.json();
        assert_eq!(paged.len(), 2);
    }

    #[tokio::test]
    async fn test_create_returns_location() {
        let server = create_test_server();

        let response = server
            .post("/api/books")
            .json(&json!({ "title": "Dune", "author": "Frank Herbert", "year": 1965 }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: Value = response.json();
        let id = created["id"].as_i64().unwrap();
        let location = response.headers().get(header::LOCATION).unwrap();
        assert_eq!(location.to_str().unwrap(), format!("/api/books/{}", id));

        let fetched: Value = server.get(&format!("/api/books/{}", id)).await.json();
        assert_eq!(fetched["title"], "Dune");
    }

    #[tokio::test]
    async fn test_create_invalid_book_rejected() {
        let server = create_test_server();

        let response = server
            .post("/api/books")
            .json(&json!({ "title": "", "author": "Nobody" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let server = create_test_server();

        let response = server
            .put("/api/books/1")
            .json(&json!({ "id": 2, "title": "X", "author": "Y" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["message"], "ID mismatch");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let server = create_test_server();

        let response = server
            .put("/api/books/1")
            .json(&json!({ "id": 1, "title": "The Pragmatic Programmer", "author": "Hunt", "genre": "Craft" }))
            .await;
        response.assert_status_ok();

        let fetched: Value = server.get("/api/books/1").await.json();
        assert_eq!(fetched["genre"], "Craft");

        server
            .delete("/api/books/1")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get("/api/books/1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/api/books/1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_writes_visible_to_search() {
        let server = create_test_server();

        // Warm the lookup cache
        let before: Vec<Value> = server
            .post("/api/ai/search")
            .json(&json!({ "query": "herbert" }))
            .await
            .json();
        assert!(before.is_empty());

        server
            .post("/api/books")
            .json(&json!({ "title": "Dune", "author": "Frank Herbert" }))
            .await
            .assert_status(StatusCode::CREATED);

        let after: Vec<Value> = server
            .post("/api/ai/search")
            .json(&json!({ "query": "herbert" }))
            .await
            .json();
        assert_eq!(after.len(), 1);
    }
}

mod games {
    use super::*;

    #[tokio::test]
    async fn test_paged_listing_sorted_by_price() {
        let server = create_test_server();

        let page: Value = server
            .get("/api/games?sortBy=price&sortOrder=desc&pageSize=2")
            .await
            .json();
        assert_eq!(page["totalItems"], 3);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["pageSize"], 2);
        assert_eq!(page["items"][0]["title"], "Elden Ring");
        assert_eq!(page["items"][1]["title"], "Hades");
    }

    #[tokio::test]
    async fn test_get_game_and_missing() {
        let server = create_test_server();

        let game: Value = server.get("/api/games/2").await.json();
        assert_eq!(game["title"], "Hades");
        assert!(game["discountedPrice"].is_number());

        let elden: Value = server.get("/api/games/1").await.json();
        assert!(elden["discountedPrice"].is_null());

        server
            .get("/api/games/99")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_genres_and_developers() {
        let server = create_test_server();

        server
            .get("/api/games/genres")
            .await
            .assert_json(&json!(["Action RPG", "Roguelike", "Simulation"]));
        server
            .get("/api/games/developers")
            .await
            .assert_json(&json!(["ConcernedApe", "FromSoftware", "Supergiant Games"]));
    }
}

mod chat {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_service() {
        let server = create_test_server();

        let response = server.get("/api/chat/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "healthy", "service": "KeywordChatService" }));
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let server = create_test_server();

        let response = server.post("/api/chat").json(&json!({ "messages": [] })).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["message"], "Messages are required");
    }

    #[tokio::test]
    async fn test_keyword_reply_cites_books() {
        let server = create_test_server();

        let response = server
            .post("/api/chat")
            .json(&json!({ "messages": [{ "role": "user", "content": "anything in fantasy" }] }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("The Lord of the Rings"));
        assert_eq!(body["recommendedBookIds"], json!([5]));
    }

    #[tokio::test]
    async fn test_no_keywords_returns_help_without_ids() {
        let server = create_test_server();

        let body: Value = server
            .post("/api/chat")
            .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .await
            .json();
        assert!(body["recommendedBookIds"].is_null());
    }

    #[tokio::test]
    async fn test_generative_reply_filters_citations() {
        let state = seeded_state();
        let client = Arc::new(MockLlmClient::with_reply(
            "You might enjoy Clean Code (ID: 2) or book #42.",
        ));
        let service = LlmChatService::new(
            client,
            state.reader(),
            "test-model",
            default_prompt().unwrap(),
        );
        let server = server_for(state.with_chat_service(Arc::new(service)));

        let body: Value = server
            .post("/api/chat")
            .json(&json!({ "messages": [{ "role": "user", "content": "something about code" }] }))
            .await
            .json();
        assert_eq!(body["recommendedBookIds"], json!([2]));

        server
            .get("/api/chat/health")
            .await
            .assert_json(&json!({ "status": "healthy", "service": "LlmChatService" }));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_chat() {
        let shutdown = CancellationToken::new();
        let state = seeded_state().with_shutdown(shutdown.clone());
        let client = Arc::new(
            MockLlmClient::with_reply("too late").with_delay(Duration::from_secs(30)),
        );
        let service = LlmChatService::new(
            client,
            state.reader(),
            "test-model",
            default_prompt().unwrap(),
        );
        let server = server_for(state.with_chat_service(Arc::new(service)));

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            shutdown.cancel();
        });

        let response = server
            .post("/api/chat")
            .json(&json!({ "messages": [{ "role": "user", "content": "slow please" }] }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = response.json();
        assert_eq!(body["error"], "cancelled");
    }

    #[tokio::test]
    async fn test_backend_failure_is_generic_500() {
        let state = seeded_state().with_chat_service(Arc::new(FailingChat));
        let server = server_for(state);

        let response = server
            .post("/api/chat")
            .json(&json!({ "messages": [{ "role": "user", "content": "hello there" }] }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "An error occurred processing your request" }));
    }
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let server = TestServer::new(create_app(Arc::new(seeded_state()))).expect("server");

    let response = server
        .get("/api/chat/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:5173"),
        )
        .await;
    response.assert_status_ok();

    let allowed = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allowed, "http://localhost:5173");
}
