/// Smooth-scrolls the quiz container so the newest question or the
/// recommendation is in view.
pub(super) fn scroll_to_bottom_script(container_id: &str) -> String {
    format!(
        r#"(function() {{
                    const el = document.getElementById({container_id:?});
                    if (!el) return;
                    el.scrollTo({{ top: el.scrollHeight, behavior: "smooth" }});
                }})();"#,
        container_id = container_id,
    )
}
