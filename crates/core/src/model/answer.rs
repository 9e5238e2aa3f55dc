use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, QuestionId};

/// Records that `option_id` was selected for `question_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub option_id: OptionId,
}

impl Answer {
    #[must_use]
    pub fn new(question_id: QuestionId, option_id: OptionId) -> Self {
        Self {
            question_id,
            option_id,
        }
    }
}
