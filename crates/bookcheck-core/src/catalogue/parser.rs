use super::normalizer::normalize_material_tab;
use super::schema::{FormatGroup, SearchResponse};
use crate::models::LibraryResult;

/// Decode a raw catalogue body and normalize it.
///
/// Only a body that is not JSON at all (or has the wrong shape at some
/// level) is an error; missing keys are not.
pub fn parse_search_json(body: &str) -> serde_json::Result<Vec<LibraryResult>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(parse_search_results(response))
}

/// One [`LibraryResult`] per format group, in response order.
pub fn parse_search_results(response: SearchResponse) -> Vec<LibraryResult> {
    response.data.into_iter().map(parse_format_group).collect()
}

fn parse_format_group(group: FormatGroup) -> LibraryResult {
    let tabs = group.material_tabs;

    // Any tab type may carry the ISBN; only physical ones carry shelf data.
    let isbn = tabs.iter().find_map(|tab| tab.first_isbn()).map(str::to_string);

    let availabilities = tabs
        .iter()
        .filter(|tab| tab.is_physical())
        .flat_map(normalize_material_tab)
        .collect();

    LibraryResult {
        found: !tabs.is_empty(),
        title: group.title,
        author: group.primary_agent.and_then(|agent| agent.label),
        isbn,
        availabilities,
    }
}
