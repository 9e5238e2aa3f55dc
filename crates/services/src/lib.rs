#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod quiz_service;

pub use catalog::{Catalog, DEFAULT_TITLE};
pub use error::CatalogError;
pub use quiz_service::{QuizProgress, QuizService};
