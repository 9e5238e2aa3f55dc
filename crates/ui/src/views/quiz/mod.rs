mod quiz;
mod scripts;

pub use quiz::QuizView;
#[cfg(test)]
pub(crate) use quiz::QuizTestHandles;
