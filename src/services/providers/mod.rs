/// External data providers
///
/// The movie metadata source (TMDB) and the completion service (OpenAI) sit behind
/// traits so handlers and the suggestion pipeline can be exercised against doubles.
use crate::{
    error::AppResult,
    models::{MovieDetail, MovieSummary, SearchPage, TmdbVideo},
};

pub mod openai;
pub mod tmdb;

pub use openai::OpenAiClient;
pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Every upstream failure (non-2xx, timeout, network) surfaces as
/// `AppError::UpstreamUnavailable`; implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title
    ///
    /// Entries without a poster are dropped from `matches`.
    async fn search_by_title(&self, title: &str, page: u32) -> AppResult<SearchPage>;

    /// Fetch full details, credits and up to five recommendations for one movie
    async fn get_detail_by_id(&self, id: &str) -> AppResult<MovieDetail>;

    /// List movies of one genre, most popular first
    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> AppResult<Vec<MovieSummary>>;

    /// Fetch the video list attached to a movie
    async fn fetch_videos(&self, id: &str) -> AppResult<Vec<TmdbVideo>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for large-language-model completion services
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a system + user message pair and return the reply text
    ///
    /// A reply without usable content is an error.
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> AppResult<String>;
}
