//! Routes and handlers for the public site

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::github::GithubService;
use crate::models::WaitlistSubmission;

/// Shared state for web handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the GitHub credentials are missing; pages still render
    /// but submissions are rejected.
    pub github: Option<Arc<GithubService>>,
    pub templates_dir: PathBuf,
}

/// Start the web server
pub async fn start_web_server(config: AppConfig, state: AppState) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/mockup/:name", get(mockup))
        .route("/waitlist", get(waitlist_page).post(waitlist_submit))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> &'static str {
    "Waitlist server running"
}

/// GET / - Landing page
async fn index(State(state): State<AppState>) -> Response {
    render_page(&state.templates_dir, "final-landing-page.html").await
}

/// GET /waitlist - Signup form
async fn waitlist_page(State(state): State<AppState>) -> Response {
    render_page(&state.templates_dir, "waitlist.html").await
}

/// GET /mockup/{name} - Named mockup page from the templates directory
async fn mockup(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match load_template(&state.templates_dir, &name).await {
        Ok(body) => Html(body).into_response(),
        Err(ServiceError::Template { ref source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            warn!("Mockup not found: {}", name);
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            error!("Failed to render mockup '{}': {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /waitlist - Accept a signup submission
async fn waitlist_submit(State(state): State<AppState>, body: String) -> Response {
    let submission = match parse_submission(&body) {
        Ok(submission) => submission,
        Err(e) => return error_response(&e),
    };

    let github = match &state.github {
        Some(github) => github.clone(),
        None => {
            warn!("Waitlist submission rejected: GitHub service not configured");
            return error_response(&ServiceError::NotConfigured);
        }
    };

    let email = submission.email.clone();
    match github.add_waitlist_entry(submission.into_entry()).await {
        Ok(()) => {
            info!("Recorded waitlist signup for {}", email);
            (StatusCode::OK, Json(json!({ "message": "Success" }))).into_response()
        }
        Err(e) => {
            error!("Failed to record waitlist signup for {}: {}", email, e);
            error_response(&e)
        }
    }
}

/// Parse and validate a submission body. Unparseable or null bodies and
/// missing emails are client errors; everything else passes through.
fn parse_submission(body: &str) -> crate::error::Result<WaitlistSubmission> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| ServiceError::InvalidRequest {
            message: "No data provided".to_string(),
        })?;

    if value.is_null() {
        return Err(ServiceError::InvalidRequest {
            message: "No data provided".to_string(),
        });
    }

    let submission: WaitlistSubmission =
        serde_json::from_value(value).map_err(|e| ServiceError::InvalidRequest {
            message: e.to_string(),
        })?;

    if submission.email.is_empty() {
        return Err(ServiceError::InvalidRequest {
            message: "Email is required".to_string(),
        });
    }

    Ok(submission)
}

/// Translate a service error to its HTTP response. The catch-all 500 arm
/// carries the error text so storage failures surface to the client as-is.
fn error_response(err: &ServiceError) -> Response {
    let status = match err {
        ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        ServiceError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::GitHubApi { .. }
        | ServiceError::Http { .. }
        | ServiceError::ContentDecode { .. }
        | ServiceError::Json { .. }
        | ServiceError::Template { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn load_template(dir: &FsPath, name: &str) -> crate::error::Result<String> {
    tokio::fs::read_to_string(dir.join(name))
        .await
        .map_err(|source| ServiceError::Template {
            name: name.to_string(),
            source,
        })
}

/// Render a fixed page; a missing template here is a deployment problem and
/// surfaces as a server error.
async fn render_page(dir: &FsPath, name: &str) -> Response {
    match load_template(dir, name).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_rejected() {
        let err = parse_submission("").unwrap_err();
        assert_eq!(err.to_string(), "No data provided");
    }

    #[test]
    fn test_null_body_is_rejected() {
        let err = parse_submission("null").unwrap_err();
        assert_eq!(err.to_string(), "No data provided");
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let err = parse_submission(r#"{"name": "Ada"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_empty_email_is_rejected() {
        let err = parse_submission(r#"{"email": ""}"#).unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_empty_object_proceeds_to_email_check() {
        // {} is valid JSON, so validation proceeds to the email check
        let err = parse_submission("{}").unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_minimal_submission_is_accepted() {
        let submission = parse_submission(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(submission.email, "a@b.com");
        assert_eq!(submission.name, "");
        assert!(submission.commitments.is_empty());
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let err = ServiceError::InvalidRequest {
            message: "Email is required".to_string(),
        };
        assert_eq!(error_response(&err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_configuration_maps_to_500() {
        let response = error_response(&ServiceError::NotConfigured);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_github_errors_map_to_500() {
        let err = ServiceError::GitHubApi {
            status: 422,
            body: "Validation Failed".to_string(),
        };
        assert_eq!(
            error_response(&err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
