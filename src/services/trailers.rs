use chrono::{DateTime, Datelike};

use crate::{
    error::AppResult,
    models::{TmdbVideo, TrailerResult},
    services::providers::MetadataProvider,
};

const TRAILER_TYPE: &str = "Trailer";
const VIDEO_SITE: &str = "YouTube";
const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Resolves one playable trailer for a movie
///
/// A movie without a usable trailer is `TrailerResult::NotFound`, not an error.
pub async fn resolve_trailer(
    provider: &dyn MetadataProvider,
    movie_id: &str,
    movie_title: Option<&str>,
    release_year: Option<i32>,
) -> AppResult<TrailerResult> {
    let videos = provider.fetch_videos(movie_id).await?;

    let result = match select_trailer(&videos, movie_title, release_year) {
        Some(video) => TrailerResult::Found {
            embed_url: embed_url(&video.key),
        },
        None => TrailerResult::NotFound,
    };

    tracing::debug!(
        movie_id = %movie_id,
        videos = videos.len(),
        found = matches!(result, TrailerResult::Found { .. }),
        "Trailer resolved"
    );

    Ok(result)
}

/// Picks a trailer, first match wins:
/// 1. name contains the movie title or "official trailer"
/// 2. published in the release year
/// 3. any trailer
///
/// Only `Trailer` entries hosted on YouTube are considered.
pub fn select_trailer<'a>(
    videos: &'a [TmdbVideo],
    movie_title: Option<&str>,
    release_year: Option<i32>,
) -> Option<&'a TmdbVideo> {
    let trailers: Vec<&TmdbVideo> = videos
        .iter()
        .filter(|video| video.video_type == TRAILER_TYPE && video.site == VIDEO_SITE)
        .collect();

    let title = movie_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_lowercase);

    trailers
        .iter()
        .copied()
        .find(|video| name_matches(video, title.as_deref()))
        .or_else(|| {
            let year = release_year?;
            trailers
                .iter()
                .copied()
                .find(|video| published_year(video) == Some(year))
        })
        .or_else(|| trailers.first().copied())
}

fn name_matches(video: &TmdbVideo, title: Option<&str>) -> bool {
    let Some(name) = video.name.as_deref() else {
        return false;
    };
    let name = name.to_lowercase();
    name.contains("official trailer") || title.is_some_and(|title| name.contains(title))
}

fn published_year(video: &TmdbVideo) -> Option<i32> {
    let published_at = video.published_at.as_deref()?;
    DateTime::parse_from_rfc3339(published_at)
        .map(|timestamp| timestamp.year())
        .ok()
        .or_else(|| published_at.get(..4)?.parse().ok())
}

pub fn embed_url(key: &str) -> String {
    format!("{}{}", EMBED_URL_BASE, key)
}
