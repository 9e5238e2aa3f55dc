use std::sync::Arc;

use tracing::info;

use triage_core::QuizSession;
use triage_core::QuestionGraph;
use triage_core::model::RecommendationTable;

use crate::catalog::Catalog;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub answered: usize,
    pub is_complete: bool,
    pub can_go_back: bool,
}

/// Presentation-facing facade that hands out sessions over one catalog.
///
/// The graph and table are shared between every session it creates.
#[derive(Debug, Clone)]
pub struct QuizService {
    title: String,
    graph: Arc<QuestionGraph>,
    recommendations: Arc<RecommendationTable>,
}

impl QuizService {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            title: catalog.title().to_string(),
            graph: catalog.graph(),
            recommendations: catalog.recommendations(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Start a fresh session at the root question.
    #[must_use]
    pub fn start_session(&self) -> QuizSession {
        info!(root = %self.graph.root_id(), "starting quiz session");
        QuizSession::new(Arc::clone(&self.graph), Arc::clone(&self.recommendations))
    }

    #[must_use]
    pub fn progress(session: &QuizSession) -> QuizProgress {
        QuizProgress {
            answered: session.answers().len(),
            is_complete: session.is_complete(),
            can_go_back: session.can_go_back(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::model::{OptionId, QuestionId};

    #[test]
    fn sessions_share_catalog_but_not_state() {
        let service = QuizService::new(&Catalog::bundled().unwrap());
        let mut first = service.start_session();
        let second = service.start_session();

        first
            .choose(&QuestionId::new("q1"), &OptionId::new("fever"))
            .unwrap();

        assert_eq!(first.answers().len(), 1);
        assert!(second.is_fresh());
        assert_eq!(
            Arc::strong_count(&service.graph),
            3,
            "both sessions share the service graph"
        );
    }

    #[test]
    fn progress_reflects_session() {
        let service = QuizService::new(&Catalog::bundled().unwrap());
        let mut session = service.start_session();
        assert_eq!(
            QuizService::progress(&session),
            QuizProgress {
                answered: 0,
                is_complete: false,
                can_go_back: false,
            }
        );

        session
            .choose(&QuestionId::new("q1"), &OptionId::new("other"))
            .unwrap();
        let progress = QuizService::progress(&session);
        assert_eq!(progress.answered, 1);
        assert!(progress.is_complete);
        assert!(progress.can_go_back);
    }
}
