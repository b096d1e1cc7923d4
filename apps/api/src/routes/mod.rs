use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::companies::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::middleware::auth::authenticate;
use crate::state::AppState;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Companies
        .route(
            "/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route(
            "/companies/:handle",
            get(companies::handle_get_company)
                .patch(companies::handle_update_company)
                .delete(companies::handle_delete_company),
        )
        // Jobs
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::tests::{token_for, SECRET};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let app = build_router(AppState::for_tests(SECRET));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_job_requires_token() {
        let body = r#"{"title":"new","companyHandle":"c1"}"#;
        let (status, body) = send(json_request(Method::POST, "/jobs", None, body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_job_rejects_non_admin() {
        let token = token_for("u1", false, SECRET);
        let body = r#"{"title":"new","companyHandle":"c1"}"#;
        let (status, _) = send(json_request(Method::POST, "/jobs", Some(&token), body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_ignored() {
        let token = token_for("admin", true, "not-the-secret");
        let (status, _) = send(json_request(Method::DELETE, "/jobs/1", Some(&token), "")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_job_validates_body() {
        let token = token_for("admin", true, SECRET);
        let body = r#"{"title":"","salary":-5,"equity":1.5}"#;
        let (status, body) = send(json_request(Method::POST, "/jobs", Some(&token), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("'companyHandle' is required"));
        assert!(message.contains("'salary' must be at least 0"));
        assert!(message.contains("'equity' must be between 0 and 1"));
    }

    #[tokio::test]
    async fn test_update_job_with_empty_body_is_no_data() {
        let token = token_for("admin", true, SECRET);
        let (status, body) = send(json_request(Method::PATCH, "/jobs/1", Some(&token), "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "NO_DATA");
        assert_eq!(body["error"]["message"], "No data");
    }

    #[tokio::test]
    async fn test_update_job_cannot_change_company() {
        let token = token_for("admin", true, SECRET);
        let body = r#"{"companyHandle":"c2"}"#;
        let (status, body) = send(json_request(Method::PATCH, "/jobs/1", Some(&token), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_company_rejects_handle_change() {
        let token = token_for("admin", true, SECRET);
        let body = r#"{"handle":"new-handle"}"#;
        let (status, _) =
            send(json_request(Method::PATCH, "/companies/c1", Some(&token), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let token = token_for("admin", true, SECRET);
        let (status, body) =
            send(json_request(Method::POST, "/companies", Some(&token), "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_jobs_rejects_bad_query() {
        let (status, _) = send(get_request("/jobs?minSalary=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(get_request("/jobs?nope=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(get_request("/jobs?minSalary=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_companies_rejects_inverted_range() {
        let (status, body) = send(get_request("/companies?minEmployees=10&maxEmployees=2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("maxEmployees"));
    }
}
