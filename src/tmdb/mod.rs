pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod search;

pub use client::TmdbClient;
pub use error::MediaNotFound;
pub use models::{Detail, MediaKind};
pub use search::{classify, Candidate, Classified};
