mod quiz_vm;

pub use quiz_vm::{
    OptionButtonVm, QuestionCardVm, QuizIntent, QuizVm, map_question_card,
};
