//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Catalog generation is CPU bound and runs on the blocking pool; the
//! conversation store lock is only taken inside synchronous sections.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    Json,
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    CatalogQuery, ChatRequest, ClearResponse, ConversationListResponse, HealthResponse, PlotQuery,
    SearchQuery, SearchResponse, StreamRequest, SummaryResponse, TranscriptQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    ChatTurn, ClassifyRequest, DepthTimeProfile, FloatCatalogData, HovmollerGrid,
    QueryClassification, QuickQuery, RegionSummary, SidebarPayload, StatusCount, EXPORT_FILE_NAME,
};
use crate::chat::{list_conversations, process_chat_message, transcript, ConversationId, MessageId};
use crate::models::{
    find_region, get_region_config, AggregationMethod, FloatLocation, Parameter, REGION_CONFIGS,
};
use crate::services::{
    build_filtered_dataset, classify, plots, project_for_export, responder, summarize,
};
use crate::services::catalog::generate_float_locations;
use crate::services::summary::compute_stats;
use crate::transformations::{apply_filters, count_by_status};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_LOCATION_COUNT: usize = 50;
const MAX_LOCATION_COUNT: usize = 5000;

/// Save the store after a mutation. Failures are logged, not returned: the
/// in-memory store stays authoritative.
async fn persist(state: &AppState) {
    if state.history.is_none() {
        return;
    }
    let state = state.clone();
    match tokio::task::spawn_blocking(move || state.persist()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("Failed to persist chat history: {}", e),
        Err(e) => log::warn!("History persistence task failed: {}", e),
    }
}

fn conversation_list(state: &AppState) -> ConversationListResponse {
    let store = state.store.read();
    ConversationListResponse {
        active_id: store.active_id,
        conversations: list_conversations(&store),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        provider: state.provider.name().to_string(),
        conversations: state.store.read().conversations.len(),
    }))
}

// =============================================================================
// Regions and catalogs
// =============================================================================

/// GET /v1/regions
pub async fn list_regions() -> HandlerResult<Vec<RegionSummary>> {
    Ok(Json(REGION_CONFIGS.iter().map(RegionSummary::from_config).collect()))
}

/// GET /v1/regions/{region_id}
///
/// Unknown ids resolve to the default region.
pub async fn get_region(Path(region_id): Path<String>) -> HandlerResult<RegionSummary> {
    Ok(Json(RegionSummary::from_config(get_region_config(&region_id))))
}

/// GET /v1/floats
pub async fn get_floats(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> HandlerResult<FloatCatalogData> {
    let spec = query.to_filter_spec().map_err(AppError::BadRequest)?;
    let regions = query.catalog_region_ids();
    let today = state.today();

    let data = tokio::task::spawn_blocking(move || {
        let records = build_filtered_dataset(&regions, &spec, today);
        let status_counts = count_by_status(&records)
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();
        FloatCatalogData {
            total_count: records.len(),
            records,
            regions,
            status_counts,
        }
    })
    .await?;

    Ok(Json(data))
}

/// GET /v1/float-locations
///
/// Platform-model float catalog, filtered with the same query parameters as
/// `/floats`.
pub async fn get_float_locations(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> HandlerResult<Vec<FloatLocation>> {
    let spec = query.to_filter_spec().map_err(AppError::BadRequest)?;
    let count = query
        .count
        .unwrap_or(DEFAULT_LOCATION_COUNT)
        .min(MAX_LOCATION_COUNT);
    let region_ids = query.region_ids(&[]);
    let regions: Vec<_> = region_ids.iter().filter_map(|id| find_region(id)).collect();
    let today = state.today();

    let locations = tokio::task::spawn_blocking(move || {
        let all = generate_float_locations(count, &regions, "float-locations", today);
        apply_filters(&all, &spec)
    })
    .await?;

    Ok(Json(locations))
}

/// GET /v1/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> HandlerResult<SummaryResponse> {
    let spec = query.to_filter_spec().map_err(AppError::BadRequest)?;
    let parameter: Parameter = query
        .parameter
        .as_deref()
        .unwrap_or("temperature")
        .parse()
        .map_err(AppError::BadRequest)?;
    let method = AggregationMethod::parse_or_default(query.method.as_deref().unwrap_or("mean"));
    let regions = query.catalog_region_ids();
    let today = state.today();

    let response = tokio::task::spawn_blocking(move || {
        let records = build_filtered_dataset(&regions, &spec, today);
        let values: Vec<f64> = records.iter().filter_map(|r| parameter.value_of(r)).collect();
        SummaryResponse {
            record_count: records.len(),
            snapshot: summarize(&records, parameter, method),
            stats: compute_stats(&values),
        }
    })
    .await?;

    Ok(Json(response))
}

/// GET /v1/export
///
/// Filtered catalog as a CSV attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Response, AppError> {
    let spec = query.to_filter_spec().map_err(AppError::BadRequest)?;
    let parameters = query.export_parameters().map_err(AppError::BadRequest)?;
    let regions = query.catalog_region_ids();
    let today = state.today();

    let csv = tokio::task::spawn_blocking(move || {
        let records = build_filtered_dataset(&regions, &spec, today);
        project_for_export(&records, parameters.as_deref()).to_csv()
    })
    .await??;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}

// =============================================================================
// Plots
// =============================================================================

fn plot_target(query: &PlotQuery) -> Result<(String, Parameter), AppError> {
    let region = get_region_config(query.region.as_deref().unwrap_or_default())
        .id
        .to_string();
    let parameter = query
        .parameter
        .as_deref()
        .unwrap_or("temperature")
        .parse()
        .map_err(AppError::BadRequest)?;
    Ok((region, parameter))
}

/// GET /v1/plots/hovmoller
pub async fn get_hovmoller(Query(query): Query<PlotQuery>) -> HandlerResult<HovmollerGrid> {
    let (region, parameter) = plot_target(&query)?;
    Ok(Json(plots::hovmoller(&region, parameter)))
}

/// GET /v1/plots/depth-time
pub async fn get_depth_time_profile(
    Query(query): Query<PlotQuery>,
) -> HandlerResult<DepthTimeProfile> {
    let (region, parameter) = plot_target(&query)?;
    Ok(Json(plots::depth_time_profile(&region, parameter)))
}

// =============================================================================
// Classification
// =============================================================================

/// POST /v1/classify
pub async fn classify_query(
    Json(request): Json<ClassifyRequest>,
) -> HandlerResult<QueryClassification> {
    Ok(Json(classify(&request.query)))
}

/// GET /v1/quick-queries
pub async fn list_quick_queries() -> HandlerResult<Vec<QuickQuery>> {
    Ok(Json(responder::QUICK_QUERIES.to_vec()))
}

// =============================================================================
// Conversations
// =============================================================================

/// GET /v1/conversations
pub async fn list_conversations_handler(
    State(state): State<AppState>,
) -> HandlerResult<ConversationListResponse> {
    Ok(Json(conversation_list(&state)))
}

/// POST /v1/conversations
///
/// Start a new chat and make it active.
pub async fn new_conversation(
    State(state): State<AppState>,
) -> HandlerResult<ConversationListResponse> {
    let id = state.store.write().new_chat();
    log::info!("Started conversation {}", id);
    persist(&state).await;
    Ok(Json(conversation_list(&state)))
}

/// POST /v1/conversations/{conversation_id}/select
pub async fn select_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<u64>,
) -> HandlerResult<ConversationListResponse> {
    state
        .store
        .write()
        .select(ConversationId::new(conversation_id))?;
    persist(&state).await;
    Ok(Json(conversation_list(&state)))
}

/// DELETE /v1/conversations
pub async fn clear_conversations(State(state): State<AppState>) -> HandlerResult<ClearResponse> {
    let removed = state.store.write().clear();
    log::info!("Cleared {} conversation(s)", removed);
    persist(&state).await;
    Ok(Json(ClearResponse { removed }))
}

/// GET /v1/conversations/{conversation_id}/transcript?format=txt|json
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(conversation_id): Path<u64>,
    Query(query): Query<TranscriptQuery>,
) -> Result<Response, AppError> {
    let id = ConversationId::new(conversation_id);
    let messages = state
        .store
        .read()
        .conversation(id)
        .map(|c| c.messages.clone())
        .ok_or_else(|| AppError::NotFound(format!("Conversation {} not found", id)))?;

    match query.format.as_deref().unwrap_or("txt") {
        "txt" => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            transcript::export_as_txt(&messages),
        )
            .into_response()),
        "json" => Ok((
            [(header::CONTENT_TYPE, "application/json")],
            transcript::export_as_json(&messages)?,
        )
            .into_response()),
        other => Err(AppError::BadRequest(format!(
            "Unknown transcript format '{}'",
            other
        ))),
    }
}

/// GET /v1/messages/search?q=
pub async fn search_messages(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<SearchResponse> {
    let keyword = query.q.trim().to_string();
    if keyword.is_empty() {
        return Err(AppError::BadRequest("Search keyword is empty".to_string()));
    }
    let messages = state
        .store
        .read()
        .search(&keyword)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(SearchResponse { keyword, messages }))
}

/// GET /v1/messages/{message_id}/payload
pub async fn get_message_payload(
    State(state): State<AppState>,
    Path(message_id): Path<u64>,
) -> HandlerResult<SidebarPayload> {
    let id = MessageId::new(message_id);
    state
        .store
        .read()
        .find_message_payload(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No sidebar payload for message {}", id)))
}

// =============================================================================
// Chat
// =============================================================================

/// POST /v1/chat
///
/// Answer a free-text message or a quick-query bubble in the active
/// conversation.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> HandlerResult<ChatTurn> {
    let text = match (&request.message, &request.quick_query) {
        (Some(message), _) => message.clone(),
        (None, Some(key)) => responder::quick_query(key)
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown quick query '{}'", key)))?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either 'message' or 'quick_query' is required".to_string(),
            ))
        }
    };

    let worker = state.clone();
    let turn = tokio::task::spawn_blocking(move || {
        let today = worker.today();
        let base = worker.chat_base(today);
        let mut store = worker.store.write();
        process_chat_message(&mut store, &text, &base, today)
    })
    .await?
    .ok_or_else(|| AppError::BadRequest("Message is empty".to_string()))?;

    persist(&state).await;
    Ok(Json(turn))
}

/// POST /v1/chat/stream
///
/// Stream a provider reply as Server-Sent Events: one `start` event, a `token`
/// event per fragment, an `error` event if the provider fails, and a final
/// `done` event.
pub async fn stream_chat(
    State(state): State<AppState>,
    Json(request): Json<StreamRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if request.messages.is_empty() {
        return Err(AppError::BadRequest("No messages to answer".to_string()));
    }

    let stream_id = uuid::Uuid::new_v4().to_string();
    let provider = state.provider.name().to_string();
    let mut replies = state.provider.stream_reply(&request.messages);
    log::debug!("Streaming reply {} from {} provider", stream_id, provider);

    let stream = async_stream::stream! {
        let start = serde_json::json!({ "id": stream_id, "provider": provider });
        yield Ok(Event::default().event("start").id(stream_id.clone()).data(start.to_string()));

        while let Some(item) = replies.next().await {
            match item {
                Ok(fragment) => {
                    let data = serde_json::json!({ "text": fragment });
                    yield Ok(Event::default().event("token").data(data.to_string()));
                }
                Err(e) => {
                    log::warn!("Provider stream {} failed: {}", stream_id, e);
                    let data = serde_json::json!({ "message": e.to_string() });
                    yield Ok(Event::default().event("error").data(data.to_string()));
                    break;
                }
            }
        }

        yield Ok(Event::default().event("done").id(stream_id.clone()).data("{}"));
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
