use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieDetail, MovieSummary, RecommendationList, SearchPage, SuggestionBatch},
    routes::{extract::ApiQuery, AppState},
    services::{movies, recommendations},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestQuery {
    user_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    title: Option<String>,
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverQuery {
    genre: Option<u64>,
    page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionMetadata {
    pub original_prompt: String,
    pub suggested_titles: Vec<String>,
    pub found_count: usize,
    pub total_suggestions: usize,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub results: Vec<MovieDetail>,
    pub metadata: SuggestionMetadata,
}

impl From<SuggestionBatch> for SuggestionResponse {
    fn from(batch: SuggestionBatch) -> Self {
        Self {
            results: batch.results,
            metadata: SuggestionMetadata {
                original_prompt: batch.original_prompt,
                suggested_titles: batch.suggested_titles,
                found_count: batch.found_count,
                total_suggestions: batch.total_suggestions,
            },
        }
    }
}

/// Handler for movie detail endpoint
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetail>> {
    let detail = movies::movie_details(state.provider.as_ref(), &id).await?;
    Ok(Json(detail))
}

/// Handler for AI suggestion endpoint
pub async fn suggest_and_fetch(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(params): ApiQuery<SuggestQuery>,
) -> AppResult<Json<SuggestionResponse>> {
    let prompt = params.user_prompt.unwrap_or_default();

    tracing::info!(
        request_id = %request_id,
        prompt = %prompt,
        "Processing suggestion request"
    );

    let batch = state.suggestions.suggest_and_fetch(&prompt).await?;

    tracing::info!(
        request_id = %request_id,
        found = batch.found_count,
        suggested = batch.total_suggestions,
        "Suggestion request completed"
    );

    Ok(Json(SuggestionResponse::from(batch)))
}

/// Handler for recommendations endpoint
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<RecommendationList>> {
    let list = recommendations::get_recommendations(state.provider.as_ref(), &id).await?;
    Ok(Json(list))
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let title = params.title.unwrap_or_default();
    let page = movies::search_movies(state.provider.as_ref(), &title, params.page).await?;
    Ok(Json(page))
}

/// Handler for genre discovery endpoint
pub async fn discover(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let genre = params
        .genre
        .ok_or_else(|| AppError::InvalidArgument("Genre is required".to_string()))?;
    let movies = movies::discover_movies(state.provider.as_ref(), genre, params.page).await?;
    Ok(Json(movies))
}
