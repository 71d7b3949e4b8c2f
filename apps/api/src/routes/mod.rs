pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::feed::handlers as feed;
use crate::feedback::handlers as feedback;
use crate::projects::handlers as projects;
use crate::state::AppState;
use crate::votes::handlers as votes;

pub fn build_router(state: AppState) -> Router {
    let clients_dir = state.config.clients_dir.clone();

    Router::new()
        .route("/health", get(health::health_handler))
        // Admin
        .route(
            "/api/v1/projects",
            get(projects::handle_list_projects).post(projects::handle_create_project),
        )
        .route("/api/v1/projects/:id", get(projects::handle_get_project))
        .route(
            "/api/v1/projects/:id/votes",
            get(projects::handle_project_votes),
        )
        // Client review pages
        .route("/api/v1/p/:token", get(projects::handle_project_by_token))
        .route("/api/v1/p/:token/feed", get(feed::handle_project_feed))
        .route("/api/v1/vote", post(votes::handle_vote))
        .route("/api/v1/review", post(feedback::handle_review))
        // Client folders
        .route("/api/v1/clients/:slug", get(feed::handle_client_images))
        .route("/api/v1/clients/:slug/feed", get(feed::handle_client_feed))
        .nest_service("/clients", ServeDir::new(clients_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::feedback::notifier::WebhookNotifier;
    use crate::store::MemoryReviewStore;

    fn test_state(clients_dir: &std::path::Path) -> AppState {
        AppState {
            store: Arc::new(MemoryReviewStore::new()),
            notifier: WebhookNotifier::new(None).unwrap(),
            config: Config {
                database_url: None,
                discord_webhook_url: None,
                clients_dir: clients_dir.to_path_buf(),
                feed_size: 12,
                port: 0,
                rust_log: "info".into(),
            },
        }
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(b) => request.body(Body::from(b.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_project(app: &Router) -> Value {
        let (status, body) = call(
            app,
            "POST",
            "/api/v1/projects",
            Some(json!({
                "name": "Episode 12",
                "clientName": "Acme",
                "images": [
                    {"title": "Bold", "imageUrl": "https://cdn.example/1.png"},
                    {"imageUrl": "https://cdn.example/2.png"},
                    {"imageUrl": "https://cdn.example/3.png"}
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_project_vote_flow() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let created = create_project(&app).await;
        let token = created["project"]["token"].as_str().unwrap().to_string();
        let project_id = created["project"]["id"].as_i64().unwrap();
        let thumb_id = created["project"]["thumbnails"][0]["id"].as_i64().unwrap();
        assert_eq!(created["clientPath"], format!("/p/{token}"));
        assert_eq!(created["project"]["thumbnails"][1]["title"], "Proposition");

        for value in [1, -1] {
            let (status, body) = call(
                &app,
                "POST",
                "/api/v1/vote",
                Some(json!({"token": token, "thumbnailId": thumb_id, "value": value})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["vote"]["value"], value);
        }

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/v1/projects/{project_id}/votes"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tallies"][0]["likes"], 0);
        assert_eq!(body["tallies"][0]["dislikes"], 1);
    }

    #[tokio::test]
    async fn test_invalid_vote_is_400_and_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let created = create_project(&app).await;
        let token = created["project"]["token"].as_str().unwrap().to_string();
        let project_id = created["project"]["id"].as_i64().unwrap();
        let thumb_id = created["project"]["thumbnails"][0]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/vote",
            Some(json!({"token": token, "thumbnailId": thumb_id, "value": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/v1/projects/{project_id}/votes"),
            None,
        )
        .await;
        for tally in body["tallies"].as_array().unwrap() {
            assert_eq!(tally["likes"], 0);
            assert_eq!(tally["dislikes"], 0);
            assert_eq!(tally["neutral"], 0);
        }
    }

    #[tokio::test]
    async fn test_vote_with_unknown_token_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/vote",
            Some(json!({"token": "nope", "thumbnailId": 1, "value": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_project_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let created = create_project(&app).await;
        let token = created["project"]["token"].as_str().unwrap().to_string();

        let (status, body) = call(&app, "GET", &format!("/api/v1/p/{token}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["clientName"], "Acme");

        let (status, body) = call(&app, "GET", "/api/v1/projects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);

        let (status, _) = call(&app, "GET", "/api/v1/projects/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, "GET", "/api/v1/projects/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_project_feed_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let created = create_project(&app).await;
        let token = created["project"]["token"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/p/{token}/feed?reference=https://cdn.example/2.png&size=6");

        let (status, first) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = call(&app, "GET", &uri, None).await;
        assert_eq!(first, second);
        assert_eq!(first["items"].as_array().unwrap().len(), 6);
        assert_eq!(
            first["contextKey"],
            format!("{token}|https://cdn.example/2.png|3")
        );
    }

    #[tokio::test]
    async fn test_client_folder_routes() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("acme");
        std::fs::create_dir(&folder).unwrap();
        for name in ["01.png", "02.png", "03.jpg"] {
            std::fs::write(folder.join(name), b"img").unwrap();
        }
        let app = build_router(test_state(dir.path()));

        let (status, body) = call(&app, "GET", "/api/v1/clients/acme", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["images"][0], "/clients/acme/01.png");

        let (status, body) = call(
            &app,
            "GET",
            "/api/v1/clients/acme/feed?reference=/clients/acme/03.jpg",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 12);
        assert_eq!(
            items
                .iter()
                .filter(|i| *i == "/clients/acme/03.jpg")
                .count(),
            1
        );

        let (status, _) = call(&app, "GET", "/api/v1/clients/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_review_without_webhook_is_misconfiguration() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/review",
            Some(json!({"type": "preview_feedback", "slug": "acme", "comment": "Nice"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MISCONFIGURATION");
    }
}
