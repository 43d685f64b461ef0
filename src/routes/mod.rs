pub mod dashboard;
pub mod page;
pub mod search;
pub mod travels;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);
    Router::new()
        .merge(dashboard::router())
        .merge(travels::router())
        .merge(search::router())
        .nest_service("/static", static_dir)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tokio::sync::Notify;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::{
        config::AppConfig,
        error::RequestError,
        panel::AdminPanel,
        services::{
            client::{ApiClient, HttpRequest, HttpResponse, Transport},
            notifier::Notifier,
            testing::ScriptedTransport,
            travel_api::TravelApi,
        },
    };

    const TRAVELS: &str = r#"[{"id":7,"origin":"NYC","destination":"LON",
        "departureDate":"2024-06-01","returnDate":"2024-06-08","travelType":"Round-trip",
        "price":450.5,"currency":"USD","passengers":2}]"#;

    /// Never answers; flags when a request has been handed to it.
    #[derive(Default)]
    struct StalledTransport {
        entered: Notify,
    }

    #[async_trait]
    impl Transport for StalledTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, RequestError> {
            self.entered.notify_one();
            std::future::pending().await
        }
    }

    fn app(transport: &Arc<ScriptedTransport>) -> Router {
        app_with(transport.clone())
    }

    fn app_with(transport: Arc<dyn Transport>) -> Router {
        let api_root = Url::parse("http://backend.test/api/travels").unwrap();
        let config = AppConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            api_root: api_root.clone(),
            notification_ttl: Duration::from_secs(3),
            static_dir: "static".into(),
        };
        let api = TravelApi::new(ApiClient::new(api_root, transport));
        let panel = AdminPanel::new(api, Notifier::new(config.notification_ttl));
        create_router(AppState::new(config, panel))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn dashboard_tab_loads_and_renders_rows() {
        let transport = ScriptedTransport::new();
        transport.push(HttpResponse::json(200, TRAVELS));
        let response = app(&transport).oneshot(get("/tab/dashboard")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Jun 1, 2024"));
        assert!(html.contains("USD 450.50"));
        assert!(html.contains("$450.50"));
        assert_eq!(transport.targets(), vec!["GET /api/travels"]);
    }

    #[tokio::test]
    async fn unknown_tab_is_rejected() {
        let transport = ScriptedTransport::new();
        let response = app(&transport).oneshot(get("/tab/reports")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn add_form_posts_and_redirects() {
        let transport = ScriptedTransport::new();
        transport.push(HttpResponse::json(201, "{}"));
        let form = "origin=NYC&destination=LON&departureDate=2024-06-01&returnDate=2024-06-08\
                    &travelType=Round-trip&price=450.50&currency=USD&passengers=2&notes=";
        let response = app(&transport)
            .oneshot(post_form("/travels", form))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(
            transport.targets(),
            vec!["POST /api/travels", "GET /api/travels"]
        );
        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["price"], serde_json::json!(450.5));
        assert_eq!(body["notes"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn delete_confirmation_page_sends_nothing() {
        let transport = ScriptedTransport::new();
        let response = app(&transport)
            .oneshot(get("/travels/7/delete"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Are you sure you want to delete this travel record?"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let transport = ScriptedTransport::new();
        let response = app(&transport)
            .oneshot(post_form("/travels/7/delete", "confirm=no"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_mismatched_ids() {
        let transport = ScriptedTransport::new();
        let form = "id=8&origin=NYC&destination=LON&departureDate=2024-06-01\
                    &returnDate=2024-06-08&travelType=Leisure&price=1&currency=USD&passengers=1";
        let response = app(&transport)
            .oneshot(post_form("/travels/7", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn page_renders_while_a_request_is_in_flight() {
        let transport = Arc::new(StalledTransport::default());
        let app = app_with(transport.clone());
        let refresh = tokio::spawn(app.clone().oneshot(post_form("/travels/refresh", "")));
        transport.entered.notified().await;

        let response = tokio::time::timeout(Duration::from_secs(2), app.oneshot(get("/")))
            .await
            .expect("page rendered while the refresh was pending")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!refresh.is_finished());
        refresh.abort();
    }

    #[tokio::test]
    async fn backdrop_link_closes_the_edit_modal() {
        let transport = ScriptedTransport::new();
        transport.push(HttpResponse::json(200, TRAVELS));
        let app = app(&transport);
        app.clone().oneshot(get("/tab/dashboard")).await.unwrap();

        let opened = app.clone().oneshot(get("/travels/7/edit")).await.unwrap();
        assert_eq!(opened.status(), StatusCode::SEE_OTHER);
        let html = body_text(app.clone().oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains(r#"id="edit-modal""#));

        let closed = app.clone().oneshot(get("/edit/close")).await.unwrap();
        assert_eq!(closed.headers()[header::LOCATION], "/");
        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(!html.contains(r#"id="edit-modal""#));
        assert_eq!(transport.targets(), vec!["GET /api/travels"]);
    }

    #[tokio::test]
    async fn dismissing_hides_the_toast() {
        let transport = ScriptedTransport::new();
        let app = app(&transport);
        app.clone()
            .oneshot(post_form("/travels/refresh", ""))
            .await
            .unwrap();
        let html = body_text(app.clone().oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains("Travel records refreshed!"));

        let response = app
            .clone()
            .oneshot(post_form("/notification/dismiss", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(!html.contains(r#"id="notification""#));
    }

    #[tokio::test]
    async fn panel_state_is_shared_across_requests() {
        let transport = ScriptedTransport::new();
        let app = app(&transport);
        app.clone().oneshot(get("/tab/add-travel")).await.unwrap();

        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains(r#"id="add-travel" class="tab-content active""#));
    }

    #[tokio::test]
    async fn all_mode_hides_the_generic_search_button() {
        let transport = ScriptedTransport::new();
        let app = app(&transport);
        let response = app.clone().oneshot(get("/tab/search-travel")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Show All Travels"));
        assert!(!html.contains(">Search</button>"));

        app.clone().oneshot(get("/search/mode/origin")).await.unwrap();
        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains(">Search</button>"));
        assert!(transport.requests().is_empty());
    }
}
