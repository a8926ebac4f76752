pub mod movies;
pub mod providers;
pub mod recommendations;
pub mod suggestion_parser;
pub mod suggestions;
pub mod trailers;

pub use suggestions::SuggestionService;
