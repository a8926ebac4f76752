/// TMDB movie metadata provider
///
/// Maps TMDB's v3 responses onto the record shapes the frontend consumes.
///
/// API Flow:
/// 1. Title Search: /search/movie → summaries (poster-less entries dropped)
/// 2. Details: /movie/{id}?append_to_response=credits,keywords,recommendations
/// 3. Discovery: /discover/movie?with_genres={id}
/// 4. Videos: /movie/{id}/videos
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        MovieDetail, MovieSummary, RecommendationEntry, SearchPage, TmdbMovie, TmdbMovieDetails,
        TmdbPage, TmdbVideo, NOT_AVAILABLE,
    },
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const LANGUAGE: &str = "en-US";
const SEARCH_REGION: &str = "US";
const MAX_CAST: usize = 5;
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.upstream_timeout(),
        )
    }

    /// Issues a GET against the TMDB API, translating every failure into a provider error
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %endpoint, error = %e, "TMDB request failed");
                AppError::provider(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "TMDB API returned an error status"
            );
            return Err(AppError::provider(format!(
                "TMDB API returned status {}",
                status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(endpoint = %endpoint, error = %e, "Failed to decode TMDB response");
            AppError::provider(e)
        })
    }

    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_base_url, path),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    fn summary_from(&self, movie: TmdbMovie) -> MovieSummary {
        MovieSummary {
            id: movie.id.to_string(),
            year: year_from(movie.release_date.as_deref()),
            poster: self.poster_url(movie.poster_path.as_deref()),
            title: movie.title,
            media_type: "movie".to_string(),
            overview: movie.overview,
            vote_average: movie.vote_average,
            popularity: movie.popularity,
        }
    }

    /// Converts a list page into summaries, dropping entries without a poster
    fn summaries_from(&self, movies: Vec<TmdbMovie>) -> Vec<MovieSummary> {
        movies
            .into_iter()
            .map(|movie| self.summary_from(movie))
            .filter(|movie| movie.poster != NOT_AVAILABLE)
            .collect()
    }

    fn search_page_from(&self, page: TmdbPage) -> SearchPage {
        let found = !page.results.is_empty();
        SearchPage {
            matches: self.summaries_from(page.results),
            total_results: page.total_results,
            page: page.page,
            total_pages: page.total_pages,
            found,
        }
    }

    fn detail_from(&self, details: TmdbMovieDetails) -> MovieDetail {
        let credits = details.credits.unwrap_or_default();

        let director = credits
            .crew
            .iter()
            .find(|person| person.job.as_deref() == Some("Director"))
            .map(|person| person.name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let actors = join_or_na(
            credits
                .cast
                .iter()
                .take(MAX_CAST)
                .map(|actor| actor.name.as_str()),
        );

        let recommendations = details
            .recommendations
            .map(|page| page.results)
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|movie| RecommendationEntry {
                id: movie.id.to_string(),
                poster: self.poster_url(movie.poster_path.as_deref()),
                title: movie.title,
            })
            .collect();

        MovieDetail {
            id: details.id.to_string(),
            year: year_from(details.release_date.as_deref()),
            rated: (if details.adult { "R" } else { "PG-13" }).to_string(),
            runtime: match details.runtime {
                Some(minutes) if minutes > 0 => format!("{} min", minutes),
                _ => NOT_AVAILABLE.to_string(),
            },
            genre: join_or_na(details.genres.iter().map(|g| g.name.as_str())),
            genre_ids: details.genres.iter().map(|g| g.id).collect(),
            director,
            actors,
            plot: details
                .overview
                .filter(|plot| !plot.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            poster: self.poster_url(details.poster_path.as_deref()),
            rating: details.vote_average.map(round_one_decimal),
            popularity: details.popularity,
            budget: details.budget.filter(|b| *b > 0),
            revenue: details.revenue.filter(|r| *r > 0),
            recommendations,
            title: details.title,
        }
    }
}

/// Year part of a `YYYY-MM-DD` release date
fn year_from(release_date: Option<&str>) -> String {
    release_date
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn join_or_na<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `/movie/{id}` path for a TMDB movie id
///
/// TMDB ids are numeric; anything else is rejected before it reaches the upstream URL.
fn movie_path(id: &str) -> AppResult<String> {
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidArgument(format!("Invalid movie ID: {}", id)));
    }
    Ok(format!("/movie/{}", id))
}

/// Extracts the `results` array of a videos response
///
/// A missing `results` field means no videos; anything other than an array is a shape error.
pub(crate) fn parse_videos(body: serde_json::Value) -> AppResult<Vec<TmdbVideo>> {
    let results = match body.get("results") {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(results) => results,
    };

    let entries = results.as_array().ok_or_else(|| {
        AppError::UpstreamDataShape("No trailers found or incorrect structure".to_string())
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<TmdbVideo>(entry.clone()).ok())
        .collect())
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_by_title(&self, title: &str, page: u32) -> AppResult<SearchPage> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Search title cannot be empty".to_string(),
            ));
        }

        let data: TmdbPage = self
            .get_json(
                "/search/movie",
                &[
                    ("query", title.to_string()),
                    ("language", LANGUAGE.to_string()),
                    ("page", page.max(1).to_string()),
                    ("include_adult", "false".to_string()),
                    ("region", SEARCH_REGION.to_string()),
                ],
            )
            .await?;

        let search_page = self.search_page_from(data);

        tracing::info!(
            title = %title,
            results = search_page.matches.len(),
            total_results = search_page.total_results,
            provider = "tmdb",
            "Title search completed"
        );

        Ok(search_page)
    }

    async fn get_detail_by_id(&self, id: &str) -> AppResult<MovieDetail> {
        let path = movie_path(id)?;
        let details: TmdbMovieDetails = self
            .get_json(
                &path,
                &[
                    ("language", LANGUAGE.to_string()),
                    (
                        "append_to_response",
                        "credits,keywords,recommendations".to_string(),
                    ),
                ],
            )
            .await?;

        let detail = self.detail_from(details);

        tracing::debug!(
            movie_id = %id,
            recommendations = detail.recommendations.len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(detail)
    }

    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> AppResult<Vec<MovieSummary>> {
        let data: TmdbPage = self
            .get_json(
                "/discover/movie",
                &[
                    ("language", LANGUAGE.to_string()),
                    ("include_adult", "false".to_string()),
                    ("page", page.max(1).to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("with_genres", genre_id.to_string()),
                ],
            )
            .await?;

        let movies = self.summaries_from(data.results);

        tracing::info!(
            genre_id = genre_id,
            results = movies.len(),
            provider = "tmdb",
            "Genre discovery completed"
        );

        Ok(movies)
    }

    async fn fetch_videos(&self, id: &str) -> AppResult<Vec<TmdbVideo>> {
        let path = format!("{}/videos", movie_path(id)?);
        let body: serde_json::Value = self
            .get_json(
                &path,
                &[("language", LANGUAGE.to_string())],
            )
            .await?;

        let videos = parse_videos(body)?;
        tracing::debug!(movie_id = %id, videos = videos.len(), "Videos fetched");
        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
