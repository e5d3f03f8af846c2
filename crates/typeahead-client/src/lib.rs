pub mod client;
pub mod error;
pub mod protocol;

pub use client::{SuggestionClient, SuggestionSource};
pub use error::FetchError;
