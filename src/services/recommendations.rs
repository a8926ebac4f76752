use crate::{
    error::{AppError, AppResult},
    models::{RecommendationEntry, RecommendationList},
    services::providers::MetadataProvider,
};

const MAX_RECOMMENDATIONS: usize = 5;

/// Recommendations for a movie
///
/// Uses the provider's embedded recommendation list when it has one. Otherwise
/// falls back to the most popular movies of the movie's first genre, excluding
/// the movie itself.
pub async fn get_recommendations(
    provider: &dyn MetadataProvider,
    movie_id: &str,
) -> AppResult<RecommendationList> {
    if movie_id.trim().is_empty() {
        return Err(AppError::InvalidArgument("Movie ID is required".to_string()));
    }

    let detail = provider.get_detail_by_id(movie_id).await.map_err(|e| {
        tracing::warn!(movie_id = %movie_id, error = %e, "Recommendation source lookup failed");
        AppError::NotFound("Movie not found".to_string())
    })?;

    if !detail.recommendations.is_empty() {
        return Ok(RecommendationList {
            movie_id: movie_id.to_string(),
            recommendations: detail.recommendations,
        });
    }

    let Some(genre_id) = detail.primary_genre_id() else {
        tracing::info!(movie_id = %movie_id, "No genre to fall back on, returning no recommendations");
        return Ok(RecommendationList {
            movie_id: movie_id.to_string(),
            recommendations: Vec::new(),
        });
    };

    let similar = provider.discover_by_genre(genre_id, 1).await?;
    let recommendations: Vec<RecommendationEntry> = similar
        .into_iter()
        .filter(|movie| movie.id != movie_id)
        .take(MAX_RECOMMENDATIONS)
        .map(RecommendationEntry::from)
        .collect();

    tracing::info!(
        movie_id = %movie_id,
        genre_id = genre_id,
        recommendations = recommendations.len(),
        "Genre fallback recommendations built"
    );

    Ok(RecommendationList {
        movie_id: movie_id.to_string(),
        recommendations,
    })
}
