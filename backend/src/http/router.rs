//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Regions and catalogs
        .route("/regions", get(handlers::list_regions))
        .route("/regions/{region_id}", get(handlers::get_region))
        .route("/floats", get(handlers::get_floats))
        .route("/float-locations", get(handlers::get_float_locations))
        .route("/summary", get(handlers::get_summary))
        .route("/export", get(handlers::export_csv))
        // Plots
        .route("/plots/hovmoller", get(handlers::get_hovmoller))
        .route("/plots/depth-time", get(handlers::get_depth_time_profile))
        // Classification
        .route("/classify", post(handlers::classify_query))
        .route("/quick-queries", get(handlers::list_quick_queries))
        // Conversations
        .route(
            "/conversations",
            get(handlers::list_conversations_handler)
                .post(handlers::new_conversation)
                .delete(handlers::clear_conversations),
        )
        .route(
            "/conversations/{conversation_id}/select",
            post(handlers::select_conversation),
        )
        .route(
            "/conversations/{conversation_id}/transcript",
            get(handlers::get_transcript),
        )
        .route("/messages/search", get(handlers::search_messages))
        .route("/messages/{message_id}/payload", get(handlers::get_message_payload))
        // Chat
        .route("/chat", post(handlers::post_chat))
        .route("/chat/stream", post(handlers::stream_chat));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
