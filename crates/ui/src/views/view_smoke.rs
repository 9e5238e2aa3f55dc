use dioxus::prelude::*;
use services::Catalog;
use triage_core::model::{DEFAULT_RECOMMENDATION, QuestionId};

use super::test_harness::setup_quiz_harness;
use crate::vm::QuizIntent;

const ROOT_TEXT: &str = "What is bothering you the most right now?";
const FEVER_TEXT: &str = "How high is your temperature?";

#[test]
fn quiz_view_smoke_renders_root_question() {
    let mut harness = setup_quiz_harness(&Catalog::bundled().unwrap());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Medical Quiz"), "missing title in {html}");
    assert!(html.contains(ROOT_TEXT), "missing root question in {html}");
    assert!(html.contains("Start over"), "missing restart in {html}");
    assert!(html.contains(r#"data-answered="0""#), "missing progress in {html}");
    assert!(!html.contains("Recommendations:"), "unexpected recommendation in {html}");
}

#[test]
fn quiz_view_smoke_appends_next_question() {
    let mut harness = setup_quiz_harness(&Catalog::bundled().unwrap());
    harness.rebuild();

    harness.dispatch(QuizIntent::choose("q1", "fever"));
    let html = harness.render();

    assert!(html.contains(ROOT_TEXT), "answered question should stay visible in {html}");
    assert!(html.contains(FEVER_TEXT), "missing follow-up question in {html}");
    assert!(html.contains("quiz-option--selected"), "missing selected option in {html}");
    assert!(html.contains(r#"data-answered="1""#), "progress not updated in {html}");
}

#[test]
fn quiz_view_smoke_shows_recommendation_then_back_clears_it() {
    let mut harness = setup_quiz_harness(&Catalog::bundled().unwrap());
    harness.rebuild();

    harness.dispatch(QuizIntent::choose("q1", "other"));
    let html = harness.render();
    assert!(html.contains("Recommendations:"), "missing heading in {html}");
    assert!(html.contains(DEFAULT_RECOMMENDATION), "missing default text in {html}");

    harness.dispatch(QuizIntent::Back);
    let html = harness.render();
    assert!(!html.contains("Recommendations:"), "recommendation not cleared in {html}");
    assert!(!html.contains("quiz-option--selected"), "root still answered in {html}");

    let vm = harness.handles.vm();
    let is_fresh = harness.dom.in_runtime(|| vm.read().session().is_fresh());
    assert!(is_fresh);
}

#[test]
fn quiz_view_smoke_restart_returns_to_root() {
    let mut harness = setup_quiz_harness(&Catalog::bundled().unwrap());
    harness.rebuild();

    harness.dispatch(QuizIntent::choose("q1", "fever"));
    harness.dispatch(QuizIntent::choose("q2", "high"));
    harness.dispatch(QuizIntent::Restart);
    let html = harness.render();

    assert!(html.contains(ROOT_TEXT), "missing root question in {html}");
    assert!(!html.contains(FEVER_TEXT), "stale question in {html}");
    assert!(!html.contains("Recommendations:"), "stale recommendation in {html}");

    let vm = harness.handles.vm();
    let current = harness
        .dom
        .in_runtime(|| vm.read().session().current_question_id().clone());
    assert_eq!(current, QuestionId::root());
}

#[test]
fn quiz_view_smoke_reports_unknown_choice() {
    let mut harness = setup_quiz_harness(&Catalog::bundled().unwrap());
    harness.rebuild();

    harness.dispatch(QuizIntent::choose("q1", "missing"));
    let html = harness.render();

    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains(ROOT_TEXT), "root question should remain in {html}");
}
