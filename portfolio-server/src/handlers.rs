use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use portfolio_core::{ContactMessage, FetchState, Post, Project, Publication};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 10;
const SEND_FAILED: &str = "Failed to send email. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub first: Option<u32>,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub featured: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<Post>,
    pub has_next_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub success: bool,
    pub projects: Vec<Project>,
    pub count: usize,
    pub featured: bool,
    pub fallback: bool,
    pub state: FetchState,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct PublicationResponse {
    pub success: bool,
    pub publication: Publication,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Failure envelope. `empty` carries the operation's empty default
/// (`"posts": []`, `"post": null`, ...) next to the error message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(flatten)]
    pub empty: Map<String, Value>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>, empty: Option<(&str, Value)>) -> ApiError {
    let mut fields = Map::new();
    if let Some((key, value)) = empty {
        fields.insert(key.to_owned(), value);
    }
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
            empty: fields,
        }),
    )
}

fn internal_error(err: impl std::fmt::Display, empty: (&str, Value)) -> ApiError {
    error!(error = %err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), Some(empty))
}

fn bad_request(err: impl std::fmt::Display, empty: Option<(&str, Value)>) -> ApiError {
    warn!(error = %err, "rejected malformed request");
    error_response(StatusCode::BAD_REQUEST, err.to_string(), empty)
}

pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PostsQuery>, QueryRejection>,
) -> Result<Json<PostsResponse>, ApiError> {
    let Query(query) = query.map_err(|err| bad_request(err.body_text(), Some(("posts", json!([])))))?;
    let first = query.first.unwrap_or(DEFAULT_PAGE_SIZE);
    let page = state
        .blog
        .list_posts(first, query.after.as_deref())
        .await
        .map_err(|err| internal_error(err, ("posts", json!([]))))?;

    Ok(Json(PostsResponse {
        success: true,
        posts: page.posts,
        has_next_page: page.has_next_page,
        end_cursor: page.end_cursor,
    }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .blog
        .get_post(&slug)
        .await
        .map_err(|err| internal_error(err, ("post", Value::Null)))?;

    match post {
        Some(post) => Ok(Json(PostResponse {
            success: true,
            post,
        })),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Post not found",
            Some(("post", Value::Null)),
        )),
    }
}

pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<ProjectsQuery>, QueryRejection>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let Query(query) =
        query.map_err(|err| bad_request(err.body_text(), Some(("projects", json!([])))))?;
    let featured = query.featured.as_deref() == Some("true");
    let resolved = if featured {
        state.projects.list_featured_projects_resolved().await
    } else {
        state.projects.list_projects_resolved().await
    };
    info!(count = resolved.value.len(), featured, state = ?resolved.state, "serving projects");

    Ok(Json(ProjectsResponse {
        success: true,
        count: resolved.value.len(),
        featured,
        fallback: resolved.is_fallback(),
        state: resolved.state,
        projects: resolved.value,
    }))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    match state.projects.get_project(&slug).await {
        Some(project) => Ok(Json(ProjectResponse {
            success: true,
            project,
        })),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Project not found",
            Some(("project", Value::Null)),
        )),
    }
}

pub async fn publication(
    State(state): State<AppState>,
) -> Result<Json<PublicationResponse>, ApiError> {
    let publication = state
        .blog
        .publication_info()
        .await
        .map_err(|err| internal_error(err, ("publication", Value::Null)))?;

    match publication {
        Some(publication) => Ok(Json(PublicationResponse {
            success: true,
            publication,
        })),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Publication not found",
            Some(("publication", Value::Null)),
        )),
    }
}

pub async fn contact(
    State(state): State<AppState>,
    message: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(message) = message.map_err(|err| bad_request(err.body_text(), None))?;
    let email = message
        .compose()
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, err.to_string(), None))?;

    let Some(mailer) = state.mailer.as_ref() else {
        warn!("contact form submitted but mail delivery is not configured");
        return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED, None));
    };

    info!(subject = %email.subject, "sending contact email");
    if let Err(err) = mailer.send(&email).await {
        error!(error = %format!("{err:#}"), "failed to send contact email");
        return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED, None));
    }

    Ok(Json(ContactResponse {
        success: true,
        message: "Email sent successfully".to_owned(),
    }))
}
