#![forbid(unsafe_code)]

pub mod graph;
pub mod model;
pub mod session;

pub use graph::{GraphError, QuestionGraph};
pub use session::{QuizSession, SessionError};
