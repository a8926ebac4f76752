use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::TrailerResult,
    routes::{extract::ApiQuery, AppState},
    services::trailers,
};

#[derive(Debug, Deserialize)]
pub struct TrailerQuery {
    title: Option<String>,
    year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerResponse {
    pub trailer_url: String,
}

/// Handler for trailer endpoint
pub async fn trailer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<TrailerQuery>,
) -> AppResult<Json<TrailerResponse>> {
    let result = trailers::resolve_trailer(
        state.provider.as_ref(),
        &id,
        params.title.as_deref(),
        params.year,
    )
    .await?;

    match result {
        TrailerResult::Found { embed_url } => Ok(Json(TrailerResponse {
            trailer_url: embed_url,
        })),
        TrailerResult::NotFound => Err(AppError::NotFound(
            "trailer error: Trailer not found".to_string(),
        )),
    }
}
