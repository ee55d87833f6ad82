//! Worship-schedule text composition.
//!
//! Renders the plain-text song listing for a plan: one line per song item in
//! service order, each carrying its hymnal reference numbers or a per-item
//! override, with a dated header for the two Sunday bulletin services.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::hymnal::{HymnEntry, HymnVersion, NOT_IN_HYMNAL};
use crate::planning_center::PlanItem;
use crate::types::ItemId;

/// Per-item override state for schedule rendering.
///
/// `Default` uses the matched hymn's currently selected version (or the bare
/// title when no hymn matches). The other two states are user-driven
/// overrides; `Custom` carries freeform text, initialized empty when the
/// state is entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Use the selected hymn version, or the bare title if unmatched.
    #[default]
    Default,
    /// Print the bare title with no reference.
    LeaveBlank,
    /// Print the title with freeform text in place of hymnal references.
    Custom(String),
}

/// Per-item selection state for one editing session.
///
/// Items with no recorded state are in the `Default` selection; the store
/// only grows entries when a user overrides something.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: HashMap<ItemId, Selection>,
}

impl SelectionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { selections: HashMap::new() }
    }

    /// Current selection for an item; `Default` when never overridden.
    pub fn get(&self, id: &ItemId) -> Selection {
        self.selections.get(id).cloned().unwrap_or_default()
    }

    /// Replace the selection for an item.
    pub fn set(&mut self, id: &ItemId, selection: Selection) {
        self.selections.insert(id.clone(), selection);
    }

    /// Enter the custom state for an item, preserving any text it already
    /// carries.
    pub fn enter_custom(&mut self, id: &ItemId) {
        if !matches!(self.get(id), Selection::Custom(_)) {
            self.set(id, Selection::Custom(String::new()));
        }
    }

    /// Replace the custom text for an item, but only while it is still in
    /// the custom state. A commit that lands after the user switched away is
    /// dropped.
    pub fn commit_custom_text(&mut self, id: &ItemId, text: String) -> bool {
        if let Some(Selection::Custom(current)) = self.selections.get_mut(id) {
            *current = text;
            true
        } else {
            false
        }
    }

    /// Number of items with a recorded selection.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether no item has a recorded selection.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// Join a version's per-hymnal numbers into the bulletin reference string.
///
/// References appear in fixed order (Rejoice, then Great Hymns), joined by
/// `/`; hymnals the tune is absent from are omitted.
fn version_refs(version: &HymnVersion) -> String {
    let mut refs: Vec<String> = Vec::new();
    if version.rejoice_number != NOT_IN_HYMNAL {
        refs.push(format!("R-{}", version.rejoice_number));
    }
    if version.great_hymns_number != NOT_IN_HYMNAL {
        refs.push(format!("G-{}", version.great_hymns_number));
    }
    refs.join("/")
}

/// Render the schedule line for one song item.
pub fn render_item_line(item: &PlanItem, selection: &Selection, hymn: Option<&HymnEntry>) -> String {
    let Some(hymn) = hymn else {
        // Not in the hymn books: only a non-empty custom text adds anything
        if let Selection::Custom(text) = selection {
            if !text.is_empty() {
                return format!("{} ({text})", item.title);
            }
        }
        return item.title.clone();
    };

    // Custom text wins over any hymn version
    if let Selection::Custom(text) = selection {
        if text.is_empty() {
            return item.title.clone();
        }
        return format!("{} ({text})", item.title);
    }

    let Some(version) = hymn.versions.iter().find(|v| v.selected) else {
        return item.title.clone();
    };

    let refs = version_refs(version);
    if refs.is_empty() {
        item.title.clone()
    } else {
        format!("{} ({refs})", item.title)
    }
}

/// Header for the two Sunday bulletin services; `None` for everything else.
fn header_line(service_type_name: &str, date: NaiveDate) -> Option<String> {
    let meridiem = match service_type_name {
        "Sunday Morning" => "AM",
        "Sunday Evening" => "PM",
        _ => return None,
    };
    Some(format!("Sunday {meridiem} {}", format_short_date(date)))
}

/// `M/D/YY` with no zero padding, e.g. `3/31/24`.
fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year().rem_euclid(100))
}

/// Best-effort calendar date of a plan from its `sortDate` string.
///
/// Falls back to the leading `YYYY-MM-DD` slice for timestamps that are not
/// RFC 3339; `None` suppresses the schedule header.
pub fn plan_date(sort_date: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(sort_date)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            sort_date.get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        })
}

/// Compose the full schedule text for a plan.
///
/// Song items render in ascending sequence order, one line each. The header
/// appears only for the two Sunday services and only when the plan date is
/// known.
pub fn render_schedule(
    items: &[PlanItem],
    selections: &SelectionStore,
    hymns: &[HymnEntry],
    service_type_name: &str,
    date: Option<NaiveDate>,
) -> String {
    let mut result = String::new();
    if let Some(header) = date.and_then(|date| header_line(service_type_name, date)) {
        result.push_str(&header);
        result.push_str("\n\n");
    }

    let mut song_items: Vec<&PlanItem> = items.iter().filter(|item| item.is_song()).collect();
    song_items.sort_by_key(|item| item.sequence);

    let lines: Vec<String> = song_items.iter()
        .map(|item| {
            let hymn = hymns.iter().find(|h| h.song_title == item.title);
            let selection = selections.get(&ItemId::new(item.id.as_str()));
            render_item_line(item, &selection, hymn)
        })
        .collect();

    result.push_str(&lines.join("\n"));
    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn version(rejoice: i64, great: i64, selected: bool) -> HymnVersion {
        HymnVersion {
            id: "v-0".to_string(),
            tune_name: "TUNE".to_string(),
            rejoice_number: rejoice,
            great_hymns_number: great,
            selected,
        }
    }

    fn entry(title: &str, versions: Vec<HymnVersion>) -> HymnEntry {
        HymnEntry { song_title: title.to_string(), versions }
    }

    fn item(id: &str, title: &str, sequence: i64) -> PlanItem {
        PlanItem {
            id: id.to_string(),
            title: title.to_string(),
            item_type: "song".to_string(),
            sequence,
            service_position: "during".to_string(),
            key_name: None,
            length: 0,
            description: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn refs_join_present_hymnals_in_fixed_order() {
        assert_eq!(version_refs(&version(147, 2, true)), "R-147/G-2");
        assert_eq!(version_refs(&version(NOT_IN_HYMNAL, 204, true)), "G-204");
        assert_eq!(version_refs(&version(202, NOT_IN_HYMNAL, true)), "R-202");
        assert_eq!(version_refs(&version(NOT_IN_HYMNAL, NOT_IN_HYMNAL, true)), "");
    }

    #[test]
    fn default_selection_renders_selected_version_refs() {
        let hymn = entry("Amazing Grace", vec![version(202, 107, true)]);
        let line = render_item_line(&item("1", "Amazing Grace", 1), &Selection::Default, Some(&hymn));
        assert_eq!(line, "Amazing Grace (R-202/G-107)");
    }

    #[test]
    fn absent_hymnal_numbers_drop_the_parenthetical() {
        let hymn = entry("Rare Song", vec![version(NOT_IN_HYMNAL, NOT_IN_HYMNAL, true)]);
        let line = render_item_line(&item("1", "Rare Song", 1), &Selection::Default, Some(&hymn));
        assert_eq!(line, "Rare Song");
    }

    #[test]
    fn no_selected_version_falls_back_to_bare_title() {
        let hymn = entry(
            "How Great Thou Art",
            vec![version(147, 2, false), version(NOT_IN_HYMNAL, 36, false)],
        );
        let line = render_item_line(&item("1", "How Great Thou Art", 1), &Selection::Default, Some(&hymn));
        assert_eq!(line, "How Great Thou Art");
    }

    #[test]
    fn custom_text_wins_over_hymn_version() {
        let hymn = entry("Amazing Grace", vec![version(202, 107, true)]);
        let line = render_item_line(
            &item("1", "Amazing Grace", 1),
            &Selection::Custom("insert only".to_string()),
            Some(&hymn),
        );
        assert_eq!(line, "Amazing Grace (insert only)");
    }

    #[test]
    fn empty_custom_text_renders_bare_title() {
        let hymn = entry("Amazing Grace", vec![version(202, 107, true)]);
        let line = render_item_line(
            &item("1", "Amazing Grace", 1),
            &Selection::Custom(String::new()),
            Some(&hymn),
        );
        assert_eq!(line, "Amazing Grace");
    }

    #[test]
    fn unmatched_song_renders_custom_or_bare_title() {
        let it = item("1", "New Chorus", 1);
        assert_eq!(render_item_line(&it, &Selection::Default, None), "New Chorus");
        assert_eq!(render_item_line(&it, &Selection::LeaveBlank, None), "New Chorus");
        assert_eq!(
            render_item_line(&it, &Selection::Custom("screen only".to_string()), None),
            "New Chorus (screen only)"
        );
    }

    #[test]
    fn header_only_for_sunday_services() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid date");
        assert_eq!(header_line("Sunday Morning", date).as_deref(), Some("Sunday AM 3/31/24"));
        assert_eq!(header_line("Sunday Evening", date).as_deref(), Some("Sunday PM 3/31/24"));
        assert!(header_line("Wednesday Night", date).is_none());
    }

    #[test]
    fn short_date_has_no_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).expect("valid date");
        assert_eq!(format_short_date(date), "11/2/25");
    }

    #[test]
    fn plan_date_parses_rfc3339_and_degrades_to_slice() {
        assert_eq!(
            plan_date("2024-03-31T14:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
        assert_eq!(
            plan_date("2024-03-31 oddness"),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
        assert!(plan_date("soon").is_none());
    }

    #[test]
    fn schedule_renders_header_and_ordered_lines() {
        let items = vec![
            item("2", "Second", 4),
            item("1", "Amazing Grace", 2),
        ];
        let hymns = vec![entry("Amazing Grace", vec![version(202, 107, true)])];
        let store = SelectionStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 31);

        let text = render_schedule(&items, &store, &hymns, "Sunday Morning", date);
        assert_eq!(text, "Sunday AM 3/31/24\n\nAmazing Grace (R-202/G-107)\nSecond");
    }

    #[test]
    fn non_sunday_schedule_has_no_header() {
        let items = vec![item("1", "Amazing Grace", 1)];
        let hymns = Vec::new();
        let store = SelectionStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 4, 3);

        let text = render_schedule(&items, &store, &hymns, "Wednesday Night", date);
        assert_eq!(text, "Amazing Grace");
    }

    #[test]
    fn store_commits_only_while_custom() {
        let mut store = SelectionStore::new();
        let id = ItemId::new("item-1");

        assert!(!store.commit_custom_text(&id, "late".to_string()));
        assert_eq!(store.get(&id), Selection::Default);

        store.enter_custom(&id);
        assert!(store.commit_custom_text(&id, "fresh".to_string()));
        assert_eq!(store.get(&id), Selection::Custom("fresh".to_string()));

        store.set(&id, Selection::LeaveBlank);
        assert!(!store.commit_custom_text(&id, "stale".to_string()));
        assert_eq!(store.get(&id), Selection::LeaveBlank);
    }

    #[test]
    fn entering_custom_preserves_existing_text() {
        let mut store = SelectionStore::new();
        let id = ItemId::new("item-1");

        store.enter_custom(&id);
        store.commit_custom_text(&id, "kept".to_string());
        store.enter_custom(&id);
        assert_eq!(store.get(&id), Selection::Custom("kept".to_string()));
    }
}
