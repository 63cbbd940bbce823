use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{AppState, handlers};

/// Landing page the root path redirects to.
pub const LANDING_PAGE: &str = "/static/index.html";

fn cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = if cfg!(debug_assertions) {
        let dev_ports = [3000, 5173, 8000, 8080, 8081];
        dev_ports
            .iter()
            .flat_map(|port| {
                [
                    format!("http://localhost:{port}"),
                    format!("http://127.0.0.1:{port}"),
                ]
            })
            .filter_map(|origin| origin.parse().ok())
            .collect()
    } else {
        // Production origins - add your domains here
        vec![]
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
}

/// Setup the routes for the server and configure CORS and tracing
pub fn setup_routes(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary(LANDING_PAGE) }))
        .route("/health", get(handlers::health::get))
        .route("/activities", get(handlers::activities::list))
        .route(
            "/activities/{activity_name}/signup",
            post(handlers::activities::signup),
        )
        .route(
            "/activities/{activity_name}/participants",
            delete(handlers::activities::remove_participant),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use mergington::serde_json::{self, Value};
    use tower::ServiceExt;

    use crate::services::ActivityServiceInMemory;

    const CHESS: &str = "Chess%20Club%20%E2%99%9F%EF%B8%8F";

    fn app() -> Router {
        let state = Arc::new(AppState::new(ActivityServiceInMemory::seeded()));
        setup_routes(state, Path::new("static"))
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn chess_participants(app: &Router) -> Vec<String> {
        let (_, body) = send(app, Method::GET, "/activities").await;
        serde_json::from_value(body["Chess Club ♟️"]["participants"].clone()).unwrap()
    }

    #[tokio::test]
    async fn list_activities() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/activities").await;

        assert_eq!(status, StatusCode::OK);
        let activities = body.as_object().unwrap();
        assert_eq!(activities.len(), 9);
        assert!(activities.contains_key("Programming Class 💻"));

        let chess = &body["Chess Club ♟️"];
        assert_eq!(chess["schedule"], "Fridays, 3:30 PM - 5:00 PM");
        assert_eq!(chess["max_participants"], 12);
        assert!(chess["description"].is_string());
        assert_eq!(
            chess["participants"],
            serde_json::json!(["michael@mergington.edu", "daniel@mergington.edu"])
        );
    }

    #[tokio::test]
    async fn signup_new_participant() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/activities/{CHESS}/signup?email=newstudent@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Signed up newstudent@mergington.edu for Chess Club ♟️"
        );
        assert!(
            chess_participants(&app)
                .await
                .contains(&"newstudent@mergington.edu".to_string())
        );
    }

    #[tokio::test]
    async fn signup_nonexistent_activity() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Nonexistent%20Club/signup?email=x@y.edu",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Activity not found");
    }

    #[tokio::test]
    async fn signup_duplicate_participant() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/activities/{CHESS}/signup?email=michael@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("already signed up"));
        assert_eq!(chess_participants(&app).await.len(), 2);
    }

    #[tokio::test]
    async fn signup_missing_email() {
        let app = app();
        let (status, body) = send(&app, Method::POST, &format!("/activities/{CHESS}/signup")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn duplicate_email_parameter_answers_json_detail() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/activities/{CHESS}/signup?email=a@x.edu&email=b@x.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("email"));
        assert_eq!(chess_participants(&app).await.len(), 2);
    }

    #[tokio::test]
    async fn invalid_utf8_activity_name_answers_json_detail() {
        let app = app();
        for method in [Method::POST, Method::DELETE] {
            let uri = if method == Method::POST {
                "/activities/%FF/signup?email=a@x.edu"
            } else {
                "/activities/%FF/participants?email=a@x.edu"
            };
            let (status, body) = send(&app, method, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["detail"].as_str().unwrap().contains("UTF-8"));
        }
    }

    #[tokio::test]
    async fn remove_participant() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/activities/{CHESS}/participants?email=michael@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("Removed"));
        assert_eq!(chess_participants(&app).await, vec!["daniel@mergington.edu"]);
    }

    #[tokio::test]
    async fn remove_from_nonexistent_activity() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::DELETE,
            "/activities/Nonexistent%20Club/participants?email=x@y.edu",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Activity not found");
    }

    #[tokio::test]
    async fn remove_nonexistent_participant() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/activities/{CHESS}/participants?email=notamember@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("not signed up"));
    }

    #[tokio::test]
    async fn signup_after_removal() {
        let app = app();
        let remove = format!("/activities/{CHESS}/participants?email=michael@mergington.edu");
        let signup = format!("/activities/{CHESS}/signup?email=michael@mergington.edu");

        let (status, _) = send(&app, Method::POST, &signup).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::DELETE, &remove).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &remove).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::POST, &signup).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            chess_participants(&app).await,
            vec!["daniel@mergington.edu", "michael@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn email_is_percent_decoded() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/activities/{CHESS}/signup?email=test%2Bspecial@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Signed up test+special@mergington.edu for Chess Club ♟️"
        );
        assert!(
            chess_participants(&app)
                .await
                .contains(&"test+special@mergington.edu".to_string())
        );
    }

    #[tokio::test]
    async fn root_redirects_to_landing_page() {
        let app = app();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], LANDING_PAGE);
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["activity_count"], 9);
        assert_eq!(body["services"]["participant_count"], 18);
    }
}
