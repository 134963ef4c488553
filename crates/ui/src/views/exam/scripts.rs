/// Hands the rendered results page to the host's print dialog.
pub(super) fn print_results_script() -> &'static str {
    r#"(function() {
        const root = document.getElementById("exam-results");
        if (!root) return;
        window.print();
    })();"#
}
