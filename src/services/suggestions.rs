use std::{future::Future, sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, MovieSummary, SuggestionBatch},
    services::{
        providers::{CompletionClient, MetadataProvider},
        suggestion_parser::parse_titles,
    },
};

const SYSTEM_PROMPT: &str = "You are a movie recommendation expert. Provide specific, well-known movies including both popular and lesser-known films.";

/// Prompt asking the completion service for a plain numbered list of titles
pub fn build_user_prompt(user_prompt: &str) -> String {
    format!(
        "Suggest movies about \"{}\". Return only a numbered list of movie titles.",
        user_prompt
    )
}

/// Spawned tasks that are aborted when the owning future is dropped
struct TaskGroup<T>(Vec<JoinHandle<T>>);

impl<T> Drop for TaskGroup<T> {
    fn drop(&mut self) {
        for task in &self.0 {
            task.abort();
        }
    }
}

/// Runs `op` for every item concurrently and returns one result per item, in input order
///
/// Each call is bounded by `per_call`; expiry or a panicked task yields an error
/// for that slot only. Dropping the returned future aborts calls still in flight.
pub async fn settle_all<I, T, F, Fut>(items: Vec<I>, per_call: Duration, op: F) -> Vec<AppResult<T>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let call = op(item);
            tokio::spawn(async move {
                tokio::time::timeout(per_call, call)
                    .await
                    .unwrap_or_else(|_| {
                        Err(AppError::UpstreamUnavailable {
                            context: "Upstream call timed out".to_string(),
                            details: format!("no response within {:?}", per_call),
                        })
                    })
            })
        })
        .collect();
    let mut tasks = TaskGroup(handles);

    let mut results = Vec::with_capacity(tasks.0.len());
    for task in tasks.0.iter_mut() {
        results.push(match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                Err(AppError::Internal(e.to_string()))
            }
        });
    }
    results
}

/// AI-assisted movie suggestion pipeline
///
/// prompt → completion → title parsing → per-title search → per-match detail enrichment
#[derive(Clone)]
pub struct SuggestionService {
    provider: Arc<dyn MetadataProvider>,
    completion: Arc<dyn CompletionClient>,
    max_tokens: u32,
    per_call_timeout: Duration,
}

impl SuggestionService {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionClient>,
        max_tokens: u32,
        per_call_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            completion,
            max_tokens,
            per_call_timeout,
        }
    }

    pub async fn suggest_and_fetch(&self, user_prompt: &str) -> AppResult<SuggestionBatch> {
        if user_prompt.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Valid user prompt is required".to_string(),
            ));
        }

        let reply = self
            .completion
            .complete(SYSTEM_PROMPT, &build_user_prompt(user_prompt), self.max_tokens)
            .await?;

        let suggested_titles = parse_titles(&reply);
        if suggested_titles.is_empty() {
            tracing::warn!(prompt = %user_prompt, "Completion produced no parseable titles");
            return Err(AppError::NoSuggestions);
        }

        tracing::info!(
            prompt = %user_prompt,
            suggestions = suggested_titles.len(),
            provider = self.provider.name(),
            "Resolving suggested titles"
        );

        let matches = self.resolve_titles(&suggested_titles).await;
        if matches.is_empty() {
            return Err(AppError::NoMatches {
                searched_titles: suggested_titles,
            });
        }

        let results = self.enrich(matches).await;
        if results.is_empty() {
            tracing::warn!(prompt = %user_prompt, "Every matched movie failed enrichment");
            return Err(AppError::NoMatches {
                searched_titles: suggested_titles,
            });
        }

        tracing::info!(
            prompt = %user_prompt,
            suggested = suggested_titles.len(),
            found = results.len(),
            "Suggestion batch completed"
        );

        Ok(SuggestionBatch {
            original_prompt: user_prompt.to_string(),
            found_count: results.len(),
            total_suggestions: suggested_titles.len(),
            suggested_titles,
            results,
        })
    }

    /// First search match for each title, skipping titles that failed or found nothing
    async fn resolve_titles(&self, titles: &[String]) -> Vec<MovieSummary> {
        let provider = Arc::clone(&self.provider);
        let searches = settle_all(titles.to_vec(), self.per_call_timeout, move |title| {
            let provider = Arc::clone(&provider);
            async move { provider.search_by_title(&title, 1).await }
        })
        .await;

        titles
            .iter()
            .zip(searches)
            .filter_map(|(title, result)| match result {
                Ok(page) => {
                    let best = page.best_match().cloned();
                    if best.is_none() {
                        tracing::info!(title = %title, "No results found for suggested title");
                    }
                    best
                }
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "Suggested title lookup failed");
                    None
                }
            })
            .collect()
    }

    /// Full details for each match; a match whose detail lookup fails is dropped
    async fn enrich(&self, matches: Vec<MovieSummary>) -> Vec<MovieDetail> {
        let ids: Vec<String> = matches.into_iter().map(|m| m.id).collect();
        let provider = Arc::clone(&self.provider);
        let details = settle_all(ids.clone(), self.per_call_timeout, move |id| {
            let provider = Arc::clone(&provider);
            async move { provider.get_detail_by_id(&id).await }
        })
        .await;

        ids.iter()
            .zip(details)
            .filter_map(|(id, result)| match result {
                Ok(detail) => Some(detail),
                Err(e) => {
                    tracing::warn!(movie_id = %id, error = %e, "Movie detail enrichment failed");
                    None
                }
            })
            .collect()
    }
}
