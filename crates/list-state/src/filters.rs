//! Filters and the Draft-Filter Panel
//!
//! A panel holds two copies of the same filter shape: `draft`, freely edited
//! while the panel is open, and `applied`, which drives fetches. Draft only
//! reaches applied through `apply()`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ListError;

/// A single filter field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Text(String),
    /// Multi-select (categories, tags, roles, statuses)
    Multi(Vec<String>),
    Range { min: Option<f64>, max: Option<f64> },
    /// ISO dates, `YYYY-MM-DD`
    DateRange { from: Option<String>, to: Option<String> },
    Flag(bool),
}

impl FilterValue {
    /// Empty values are never sent to the server
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Multi(v) => v.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::DateRange { from, to } => from.is_none() && to.is_none(),
            FilterValue::Flag(b) => !b,
        }
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Human readable form used by filter chips
    pub fn display(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Multi(v) => v.join(", "),
            FilterValue::Range { min, max } => format_bounds(min.map(format_number), max.map(format_number)),
            FilterValue::DateRange { from, to } => format_bounds(from.clone(), to.clone()),
            FilterValue::Flag(b) => if *b { "yes".into() } else { "no".into() },
        }
    }
}

/// Whole numbers without a trailing `.0`
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn format_bounds(lo: Option<String>, hi: Option<String>) -> String {
    match (lo, hi) {
        (Some(lo), Some(hi)) => format!("{} - {}", lo, hi),
        (Some(lo), None) => format!("≥ {}", lo),
        (None, Some(hi)) => format!("≤ {}", hi),
        (None, None) => String::new(),
    }
}

/// Declared shape of a filter field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Multi,
    /// Numeric range clamped into `[lo, hi]`
    Range { lo: f64, hi: f64 },
    DateRange,
    Flag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// Ordered set of filter fields a list understands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSchema {
    fields: Vec<FieldSpec>,
}

impl FilterSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Clamp ranges into declared bounds, dedupe multi-selects, drop bad dates.
    pub fn normalize(&self, key: &str, value: FilterValue) -> FilterValue {
        let kind = self.field(key).map(|f| f.kind);
        match (value, kind) {
            (FilterValue::Multi(values), _) => {
                let mut seen = Vec::with_capacity(values.len());
                for v in values {
                    let v = v.trim().to_string();
                    if !v.is_empty() && !seen.contains(&v) {
                        seen.push(v);
                    }
                }
                FilterValue::Multi(seen)
            }
            (FilterValue::Range { min, max }, Some(FieldKind::Range { lo, hi })) => {
                let clamp = |n: f64| n.max(lo).min(hi);
                let (mut min, mut max) = (min.map(clamp), max.map(clamp));
                if let (Some(a), Some(b)) = (min, max) {
                    if a > b {
                        std::mem::swap(&mut min, &mut max);
                    }
                }
                FilterValue::Range { min, max }
            }
            (FilterValue::DateRange { from, to }, _) => {
                let parse = |d: Option<String>| {
                    d.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                };
                let (mut from, mut to) = (parse(from), parse(to));
                if let (Some(a), Some(b)) = (from, to) {
                    if a > b {
                        std::mem::swap(&mut from, &mut to);
                    }
                }
                let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());
                FilterValue::DateRange { from: fmt(from), to: fmt(to) }
            }
            (other, _) => other,
        }
    }
}

/// Filter values keyed by internal field key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Only the values that would be sent to the server
    pub fn active(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter().filter(|(_, v)| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// One removable chip in the applied-filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip {
    pub key: String,
    pub label: String,
    /// The single value the chip removes; `None` removes the whole field
    pub value: Option<String>,
    pub display: String,
}

#[derive(Debug, Clone)]
pub struct FilterPanel {
    schema: FilterSchema,
    defaults: Filters,
    applied: Filters,
    draft: Filters,
    open: bool,
}

impl FilterPanel {
    pub fn new(schema: FilterSchema, defaults: Filters) -> Self {
        Self {
            schema,
            applied: defaults.clone(),
            draft: defaults.clone(),
            defaults,
            open: false,
        }
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    pub fn defaults(&self) -> &Filters {
        &self.defaults
    }

    pub fn applied(&self) -> &Filters {
        &self.applied
    }

    pub fn draft(&self) -> &Filters {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Used when rehydrating persisted preferences
    pub fn restore_applied(&mut self, filters: Filters) {
        self.applied = filters;
        self.draft = self.applied.clone();
    }

    pub fn open(&mut self) {
        self.draft = self.applied.clone();
        self.open = true;
    }

    /// Close without applying; draft edits are discarded
    pub fn close(&mut self) {
        self.draft = self.applied.clone();
        self.open = false;
    }

    /// Shallow-merge `patch` into the draft
    pub fn mutate_draft(&mut self, patch: Filters) {
        for (key, value) in patch.0 {
            let value = self.schema.normalize(&key, value);
            self.draft.0.insert(key, value);
        }
    }

    pub fn set_draft(&mut self, key: &str, value: FilterValue) {
        self.mutate_draft(Filters::new().with(key, value));
    }

    /// Commit the draft. Returns the new applied filters.
    pub fn apply(&mut self) -> &Filters {
        self.applied = self.draft.clone();
        self.open = false;
        &self.applied
    }

    /// Restore both copies to the defaults
    pub fn reset(&mut self) -> &Filters {
        self.applied = self.defaults.clone();
        self.draft = self.defaults.clone();
        self.open = false;
        &self.applied
    }

    /// Remove one value from the applied filters (chip "×").
    ///
    /// For multi-selects `value` names the entry to drop; scalar fields fall
    /// back to their default. Returns false when nothing changed.
    pub fn remove_single(&mut self, key: &str, value: Option<&str>) -> bool {
        let before = self.applied.clone();
        remove_from(&mut self.applied, &self.defaults, key, value);
        if self.open {
            // an open draft keeps its other edits but loses the same value
            remove_from(&mut self.draft, &self.defaults, key, value);
        } else {
            self.draft = self.applied.clone();
        }
        self.applied != before
    }

    /// Chips for applied values that differ from the defaults
    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        for (key, value) in self.applied.active() {
            if self.defaults.get(key) == Some(value) {
                continue;
            }
            let label = self
                .schema
                .field(key)
                .map(|f| f.label.to_string())
                .unwrap_or_else(|| key.clone());
            match value {
                FilterValue::Multi(values) => {
                    for v in values {
                        chips.push(FilterChip {
                            key: key.clone(),
                            label: label.clone(),
                            value: Some(v.clone()),
                            display: v.clone(),
                        });
                    }
                }
                other => chips.push(FilterChip {
                    key: key.clone(),
                    label: label.clone(),
                    value: None,
                    display: other.display(),
                }),
            }
        }
        chips
    }

    /// Fail when any of `required` is empty in the draft
    pub fn validate_required(&self, required: &[&str]) -> Result<(), ListError> {
        for key in required {
            let empty = self.draft.get(key).map_or(true, FilterValue::is_empty);
            if empty {
                let label = self.schema.field(key).map_or(*key, |f| f.label);
                return Err(ListError::validation(*key, format!("{} is required", label)));
            }
        }
        Ok(())
    }
}

fn remove_from(filters: &mut Filters, defaults: &Filters, key: &str, value: Option<&str>) {
    if let (Some(FilterValue::Multi(values)), Some(v)) = (filters.0.get_mut(key), value) {
        values.retain(|x| x != v);
        return;
    }
    if filters.get(key).is_none() {
        return;
    }
    match defaults.get(key) {
        Some(default) => filters.set(key, default.clone()),
        None => {
            filters.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_panel() -> FilterPanel {
        let schema = FilterSchema::new(vec![
            FieldSpec::new("categories", "Category", FieldKind::Multi),
            FieldSpec::new("rating", "Rating", FieldKind::Range { lo: 0.0, hi: 5.0 }),
            FieldSpec::new("published", "Published", FieldKind::DateRange),
            FieldSpec::new("featured", "Featured", FieldKind::Flag),
            FieldSpec::new("status", "Status", FieldKind::Text),
        ]);
        let defaults = Filters::new()
            .with("categories", FilterValue::Multi(vec![]))
            .with("status", FilterValue::Text("published".into()));
        FilterPanel::new(schema, defaults)
    }

    #[test]
    fn test_reset_restores_defaults_exactly() {
        let mut panel = library_panel();
        panel.open();
        panel.set_draft("categories", FilterValue::multi(["news", "video"]));
        panel.set_draft("featured", FilterValue::Flag(true));
        panel.apply();
        panel.open();
        panel.set_draft("rating", FilterValue::Range { min: Some(2.0), max: None });
        panel.remove_single("categories", Some("news"));

        panel.reset();

        assert_eq!(panel.applied(), panel.defaults());
        assert_eq!(panel.draft(), panel.defaults());
        assert!(!panel.is_open());
    }

    #[test]
    fn test_close_discards_draft() {
        let mut panel = library_panel();
        panel.open();
        panel.set_draft("featured", FilterValue::Flag(true));
        panel.close();

        assert_eq!(panel.draft(), panel.applied());
        assert_eq!(panel.applied().get("featured"), None);
    }

    #[test]
    fn test_draft_does_not_touch_applied_until_apply() {
        let mut panel = library_panel();
        panel.open();
        panel.set_draft("status", FilterValue::Text("draft".into()));
        assert_eq!(panel.applied().get("status"), Some(&FilterValue::Text("published".into())));

        panel.apply();
        assert_eq!(panel.applied().get("status"), Some(&FilterValue::Text("draft".into())));
    }

    #[test]
    fn test_range_is_clamped_and_ordered() {
        let mut panel = library_panel();
        panel.set_draft("rating", FilterValue::Range { min: Some(9.0), max: Some(-1.0) });
        assert_eq!(
            panel.draft().get("rating"),
            Some(&FilterValue::Range { min: Some(0.0), max: Some(5.0) })
        );
    }

    #[test]
    fn test_multi_values_deduplicated() {
        let mut panel = library_panel();
        panel.set_draft("categories", FilterValue::multi(["a", "b", "a", " ", "b "]));
        assert_eq!(panel.draft().get("categories"), Some(&FilterValue::multi(["a", "b"])));
    }

    #[test]
    fn test_bad_dates_dropped() {
        let mut panel = library_panel();
        panel.set_draft(
            "published",
            FilterValue::DateRange { from: Some("2024-13-01".into()), to: Some("2024-02-01".into()) },
        );
        assert_eq!(
            panel.draft().get("published"),
            Some(&FilterValue::DateRange { from: None, to: Some("2024-02-01".into()) })
        );
    }

    #[test]
    fn test_remove_single_chip() {
        let mut panel = library_panel();
        panel.open();
        panel.set_draft("categories", FilterValue::multi(["news", "video"]));
        panel.set_draft("status", FilterValue::Text("archived".into()));
        panel.apply();

        assert!(panel.remove_single("categories", Some("news")));
        assert_eq!(panel.applied().get("categories"), Some(&FilterValue::multi(["video"])));

        // scalar falls back to its default
        assert!(panel.remove_single("status", None));
        assert_eq!(panel.applied().get("status"), Some(&FilterValue::Text("published".into())));

        assert!(!panel.remove_single("categories", Some("missing")));
    }

    #[test]
    fn test_chip_removed_while_open_survives_apply() {
        let mut panel = library_panel();
        panel.set_draft("categories", FilterValue::multi(["news", "video"]));
        panel.apply();

        panel.open();
        panel.set_draft("featured", FilterValue::Flag(true));
        assert!(panel.remove_single("categories", Some("news")));
        assert!(panel.is_open());
        assert_eq!(panel.draft().get("featured"), Some(&FilterValue::Flag(true)));

        panel.apply();
        assert_eq!(panel.applied().get("categories"), Some(&FilterValue::multi(["video"])));
        assert_eq!(panel.applied().get("featured"), Some(&FilterValue::Flag(true)));
    }

    #[test]
    fn test_chips_skip_defaults() {
        let mut panel = library_panel();
        assert!(panel.active_chips().is_empty());

        panel.set_draft("categories", FilterValue::multi(["news", "video"]));
        panel.set_draft("rating", FilterValue::Range { min: Some(3.0), max: None });
        panel.apply();

        let chips = panel.active_chips();
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].value.as_deref(), Some("news"));
        assert_eq!(chips[2].label, "Rating");
        assert_eq!(chips[2].display, "≥ 3");
    }

    #[test]
    fn test_validate_required() {
        let mut panel = library_panel();
        let err = panel.validate_required(&["categories"]).unwrap_err();
        assert_eq!(err, ListError::validation("categories", "Category is required"));

        panel.set_draft("categories", FilterValue::multi(["news"]));
        assert!(panel.validate_required(&["categories"]).is_ok());
    }
}
