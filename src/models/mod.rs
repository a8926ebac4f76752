use serde::{Deserialize, Serialize};

/// Placeholder the frontend renders for a field the provider did not supply
pub const NOT_AVAILABLE: &str = "N/A";

/// A movie as returned by title search or genre discovery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    /// Full poster URL, or [`NOT_AVAILABLE`]
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Type")]
    pub media_type: String,
    #[serde(rename = "Overview")]
    pub overview: Option<String>,
    #[serde(rename = "VoteAverage")]
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
}

/// One page of title search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(rename = "Search")]
    pub matches: Vec<MovieSummary>,
    pub total_results: u64,
    pub page: u32,
    pub total_pages: u32,
    /// Whether the provider returned any result at all, before poster filtering
    pub found: bool,
}

impl SearchPage {
    /// First usable match, if the search found anything
    pub fn best_match(&self) -> Option<&MovieSummary> {
        if self.found {
            self.matches.first()
        } else {
            None
        }
    }
}

/// Short reference to a related movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationEntry {
    pub id: String,
    pub title: String,
    pub poster: String,
}

impl From<MovieSummary> for RecommendationEntry {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster: movie.poster,
        }
    }
}

/// Full movie record with credits and embedded recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub runtime: String,
    /// Comma-joined genre names
    pub genre: String,
    pub director: String,
    /// Comma-joined names of the top five billed cast members
    pub actors: String,
    pub plot: String,
    pub poster: String,
    /// Vote average rounded to one decimal
    #[serde(rename = "imdbRating")]
    pub rating: Option<f64>,
    pub popularity: Option<f64>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    /// At most five entries
    pub recommendations: Vec<RecommendationEntry>,
    /// Provider genre ids in the same order as `genre`
    #[serde(skip)]
    pub genre_ids: Vec<u64>,
}

impl MovieDetail {
    pub fn primary_genre_id(&self) -> Option<u64> {
        self.genre_ids.first().copied()
    }
}

/// Output of one suggestion-and-fetch request
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionBatch {
    pub original_prompt: String,
    pub suggested_titles: Vec<String>,
    /// Enriched movies, in the order their titles were suggested
    pub results: Vec<MovieDetail>,
    pub found_count: usize,
    pub total_suggestions: usize,
}

/// Recommendations for a single movie
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    pub movie_id: String,
    pub recommendations: Vec<RecommendationEntry>,
}

/// Outcome of trailer resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerResult {
    Found { embed_url: String },
    NotFound,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged list response shared by /search/movie and /discover/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Movie entry inside a TMDB list response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// Response from GET /movie/{id} with credits and recommendations appended
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub recommendations: Option<TmdbPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Entry of GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbVideo {
    #[serde(default)]
    pub name: Option<String>,
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: "https://image.tmdb.org/t/p/w500/inception.jpg".to_string(),
            media_type: "movie".to_string(),
            overview: None,
            vote_average: Some(8.4),
            popularity: Some(90.5),
        }
    }

    #[test]
    fn test_summary_serializes_frontend_field_names() {
        let json = serde_json::to_value(summary("27205")).unwrap();
        assert_eq!(json["imdbID"], "27205");
        assert_eq!(json["Title"], "Inception");
        assert_eq!(json["Type"], "movie");
        assert_eq!(json["VoteAverage"], 8.4);
        assert_eq!(json["popularity"], 90.5);
    }

    #[test]
    fn test_best_match_requires_found() {
        let page = SearchPage {
            matches: vec![summary("1"), summary("2")],
            total_results: 2,
            page: 1,
            total_pages: 1,
            found: true,
        };
        assert_eq!(page.best_match().map(|m| m.id.as_str()), Some("1"));

        let empty = SearchPage {
            matches: vec![],
            found: false,
            ..page
        };
        assert!(empty.best_match().is_none());
    }

    #[test]
    fn test_detail_hides_genre_ids() {
        let detail = MovieDetail {
            id: "603".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            rated: "PG-13".to_string(),
            runtime: "136 min".to_string(),
            genre: "Action, Science Fiction".to_string(),
            director: "Lana Wachowski".to_string(),
            actors: "Keanu Reeves".to_string(),
            plot: "N/A".to_string(),
            poster: NOT_AVAILABLE.to_string(),
            rating: Some(8.2),
            popularity: None,
            budget: Some(63_000_000),
            revenue: None,
            recommendations: vec![RecommendationEntry::from(summary("27205"))],
            genre_ids: vec![28, 878],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["imdbRating"], 8.2);
        assert_eq!(json["Genre"], "Action, Science Fiction");
        assert_eq!(json["Recommendations"][0]["id"], "27205");
        assert!(json.get("GenreIds").is_none());
        assert!(json.get("genre_ids").is_none());
        assert_eq!(detail.primary_genre_id(), Some(28));
    }

    #[test]
    fn test_tmdb_details_deserialization_with_missing_fields() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "genres": [{"id": 28, "name": "Action"}],
            "credits": {"crew": [{"name": "Christopher Nolan", "job": "Director"}]}
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 27205);
        assert!(!details.adult);
        assert_eq!(details.genres[0].name, "Action");
        let credits = details.credits.unwrap();
        assert!(credits.cast.is_empty());
        assert_eq!(credits.crew[0].job.as_deref(), Some("Director"));
        assert!(details.recommendations.is_none());
    }

    #[test]
    fn test_tmdb_video_deserialization() {
        let json = r#"{
            "name": "Official Trailer",
            "key": "YoHD9XEInc0",
            "site": "YouTube",
            "type": "Trailer",
            "published_at": "2010-05-11T00:00:00.000Z"
        }"#;

        let video: TmdbVideo = serde_json::from_str(json).unwrap();
        assert_eq!(video.video_type, "Trailer");
        assert_eq!(video.key, "YoHD9XEInc0");
    }
}
