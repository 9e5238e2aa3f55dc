mod answer;
mod ids;
mod question;
mod recommendation;
pub mod text;

pub use answer::Answer;
pub use ids::{OptionId, ParseIdError, QuestionId, ROOT_QUESTION_ID, RecommendationKey};
pub use question::{AnswerOption, Question, QuestionError};
pub use recommendation::{DEFAULT_RECOMMENDATION, RecommendationTable};
pub use text::TextError;
