use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/attendance", routes::attendance::router())
        .nest("/corrections", routes::corrections::router())
        .nest("/hours", routes::hours::router())
        .nest("/records", routes::records::router())
        .nest("/employees", routes::employees::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
