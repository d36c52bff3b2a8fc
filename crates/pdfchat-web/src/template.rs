use axum::response::Html;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Serve the single-page chat UI. The page is static; it drives the three
/// JSON endpoints from the browser.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
