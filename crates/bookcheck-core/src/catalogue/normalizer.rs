use super::schema::MaterialTab;
use crate::models::{LibraryAvailability, UNKNOWN};

/// Turn one material tab into its per-location availability entries.
///
/// Multi-copy records list every location; summary records only carry an
/// aggregate status, which becomes a single entry. Missing fields fall back
/// to [`UNKNOWN`] and never fail.
pub fn normalize_material_tab(tab: &MaterialTab) -> Vec<LibraryAvailability> {
    if !tab.locations.is_empty() {
        return tab
            .locations
            .iter()
            .map(|loc| {
                LibraryAvailability::new(
                    or_unknown(loc.label.as_deref()),
                    tab.call_number.clone(),
                    or_unknown(loc.availability_status.as_deref()),
                )
            })
            .collect();
    }

    vec![LibraryAvailability::new(
        summary_location(tab),
        tab.call_number.clone(),
        or_unknown(summary_status(tab)),
    )]
}

fn summary_location(tab: &MaterialTab) -> String {
    match tab.item_library.as_deref() {
        Some(library) if !library.is_empty() => library.to_string(),
        _ => or_unknown(tab.name.as_deref()),
    }
}

fn summary_status(tab: &MaterialTab) -> Option<&str> {
    tab.availability
        .as_ref()
        .and_then(|a| a.status.as_ref())
        .and_then(|s| s.general.as_deref())
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}
