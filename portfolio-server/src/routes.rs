use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/:slug", get(handlers::get_post))
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/projects/:slug", get(handlers::get_project))
        .route("/api/publication", get(handlers::publication))
        .route("/api/contact", post(handlers::contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
