/// Page that handles site searches
pub const SEARCH_PAGE: &str = "search.html";

/// Target of the header search box, or `None` for a blank query
pub fn search_url(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(format!("{}?q={}", SEARCH_PAGE, urlencoding::encode(query)))
}
