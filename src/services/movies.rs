use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, MovieSummary, SearchPage},
    services::providers::MetadataProvider,
};

/// Service function for movie detail lookup
pub async fn movie_details(provider: &dyn MetadataProvider, id: &str) -> AppResult<MovieDetail> {
    if id.trim().is_empty() {
        return Err(AppError::InvalidArgument("Movie ID is required".to_string()));
    }
    provider.get_detail_by_id(id).await
}

/// Service function for title search
pub async fn search_movies(
    provider: &dyn MetadataProvider,
    title: &str,
    page: Option<u32>,
) -> AppResult<SearchPage> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "Search title cannot be empty".to_string(),
        ));
    }
    provider.search_by_title(title.trim(), page.unwrap_or(1).max(1)).await
}

/// Service function for genre discovery, most popular first
pub async fn discover_movies(
    provider: &dyn MetadataProvider,
    genre_id: u64,
    page: Option<u32>,
) -> AppResult<Vec<MovieSummary>> {
    provider.discover_by_genre(genre_id, page.unwrap_or(1).max(1)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMetadataProvider;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_search_trims_and_defaults_page() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_title()
            .with(eq("Dune"), eq(1))
            .times(1)
            .returning(|_, page| {
                Ok(SearchPage {
                    matches: vec![],
                    total_results: 0,
                    page,
                    total_pages: 0,
                    found: false,
                })
            });

        let page = search_movies(&provider, "  Dune ", Some(0)).await.unwrap();
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_blank_inputs_rejected() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_by_title().never();
        provider.expect_get_detail_by_id().never();

        assert!(matches!(
            search_movies(&provider, " ", None).await,
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            movie_details(&provider, "").await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_discover_passes_genre_and_page() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_discover_by_genre()
            .with(eq(878), eq(3))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let movies = discover_movies(&provider, 878, Some(3)).await.unwrap();
        assert!(movies.is_empty());
    }
}
