use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use triage_core::QuestionGraph;
use triage_core::model::{Question, QuestionId, RecommendationKey, RecommendationTable};

use crate::error::CatalogError;

/// Title used when the content document does not name one.
pub const DEFAULT_TITLE: &str = "Medical Quiz";

const BUNDLED_CONTENT: &str = include_str!("../content/triage.json");

/// Raw shape of a content document on disk.
#[derive(Debug, Deserialize)]
struct ContentDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    root: Option<QuestionId>,
    questions: Vec<Question>,
    #[serde(default)]
    recommendations: RecommendationTable,
}

/// Validated quiz content: the question graph plus its recommendation table.
///
/// Graph references are checked here, at load time, so sessions never have
/// to recover from a dangling question id.
#[derive(Debug, Clone)]
pub struct Catalog {
    title: String,
    graph: Arc<QuestionGraph>,
    recommendations: Arc<RecommendationTable>,
}

impl Catalog {
    /// Assemble a catalog from already-built parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        graph: QuestionGraph,
        recommendations: RecommendationTable,
    ) -> Self {
        audit_recommendations(&graph, &recommendations);
        Self {
            title: title.into(),
            graph: Arc::new(graph),
            recommendations: Arc::new(recommendations),
        }
    }

    /// Parse a JSON content document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed documents (including blank
    /// text or duplicate option ids) and `CatalogError::Graph` when the
    /// question graph is not well-formed.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: ContentDocument = serde_json::from_str(raw)?;
        let root = document.root.unwrap_or_else(QuestionId::root);
        let graph = QuestionGraph::with_root(document.questions, root)?;
        let title = document
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        info!(
            title = %title,
            questions = graph.len(),
            recommendations = document.recommendations.len(),
            "quiz content loaded"
        );
        Ok(Self::new(title, graph, document.recommendations))
    }

    /// Read and parse a JSON content document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise see
    /// [`Catalog::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading quiz content");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The triage quiz compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document itself is broken.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CONTENT)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn graph(&self) -> Arc<QuestionGraph> {
        Arc::clone(&self.graph)
    }

    #[must_use]
    pub fn recommendations(&self) -> Arc<RecommendationTable> {
        Arc::clone(&self.recommendations)
    }
}

/// Warn about terminal options that will fall back to the default text and
/// about table entries no walk can reach.
fn audit_recommendations(graph: &QuestionGraph, recommendations: &RecommendationTable) {
    let mut terminal_keys = HashSet::new();
    for (question, option) in graph.terminal_options() {
        let key = RecommendationKey::new(question.id().clone(), option.id().clone());
        if recommendations.get_key(&key).is_none() {
            warn!(%key, "terminal option has no recommendation, default text will be shown");
        }
        terminal_keys.insert(key);
    }

    for key in recommendations.keys() {
        if !terminal_keys.contains(key) {
            warn!(%key, "recommendation does not belong to a terminal option");
        }
    }
}
