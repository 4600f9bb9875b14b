//! Wire shape of a Vega format-group search response.
//!
//! Every field is optional upstream. Missing keys and explicit `null`s both
//! decode to the field's default so the parser never sees a hole.

use serde::{Deserialize, Deserializer, Serialize};

/// Material tab type carrying per-copy shelf data
pub const PHYSICAL: &str = "physical";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchText")]
    pub search_text: String,
    #[serde(rename = "pageNum")]
    pub page_num: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<FormatGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatGroup {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub primary_agent: Option<PrimaryAgent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub material_tabs: Vec<MaterialTab>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimaryAgent {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTab {
    #[serde(default, rename = "type")]
    pub tab_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub call_number: Option<String>,
    #[serde(default)]
    pub item_library: Option<String>,
    #[serde(default)]
    pub identified_by: Option<IdentifiedBy>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub availability: Option<Availability>,
}

impl MaterialTab {
    pub fn is_physical(&self) -> bool {
        self.tab_type.as_deref() == Some(PHYSICAL)
    }

    pub fn first_isbn(&self) -> Option<&str> {
        self.identified_by
            .as_ref()
            .and_then(|ids| ids.isbn.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifiedBy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub status: Option<AvailabilityStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityStatus {
    #[serde(default)]
    pub general: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
