//! List Queries
//!
//! `ListQuery` is what a list view asks for; `EndpointDescriptor` says how a
//! particular backend endpoint spells it on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filters::{format_number, FilterValue, Filters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub key: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(key: impl Into<String>) -> Self {
        Self { key: key.into(), direction: SortDirection::Asc }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self { key: key.into(), direction: SortDirection::Desc }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub filters: Filters,
    pub sort: Vec<SortKey>,
}

impl ListQuery {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            search: String::new(),
            filters: Filters::new(),
            sort: Vec::new(),
        }
    }

    /// Serialize for `endpoint`.
    ///
    /// Empty, false and zero-length values are omitted entirely; the backend
    /// treats an absent parameter differently from an empty one.
    pub fn to_params(&self, endpoint: &EndpointDescriptor) -> Vec<(String, String)> {
        let mut params = vec![
            (endpoint.page_param.to_string(), self.page.max(1).to_string()),
            (endpoint.per_page_param.to_string(), self.per_page.to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            params.push((endpoint.search_param.to_string(), search.to_string()));
        }

        for (key, value) in self.filters.active() {
            let name = endpoint.param_name(key);
            match value {
                FilterValue::Text(s) => params.push((name, s.trim().to_string())),
                FilterValue::Multi(values) => params.push((name, values.join(","))),
                FilterValue::Flag(_) => params.push((name, "1".to_string())),
                FilterValue::Range { min, max } => {
                    if let Some(min) = min {
                        params.push((endpoint.bound_name(key, "min"), format_number(*min)));
                    }
                    if let Some(max) = max {
                        params.push((endpoint.bound_name(key, "max"), format_number(*max)));
                    }
                }
                FilterValue::DateRange { from, to } => {
                    if let Some(from) = from {
                        params.push((endpoint.bound_name(key, "from"), from.clone()));
                    }
                    if let Some(to) = to {
                        params.push((endpoint.bound_name(key, "to"), to.clone()));
                    }
                }
            }
        }

        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|s| match s.direction {
                    SortDirection::Asc => s.key.clone(),
                    SortDirection::Desc => format!("-{}", s.key),
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push((endpoint.sort_param.to_string(), sort));
        }

        for (name, value) in &endpoint.fixed_params {
            params.push((name.to_string(), value.to_string()));
        }

        params
    }
}

/// How one backend list endpoint names its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub path: String,
    pub page_param: &'static str,
    pub per_page_param: &'static str,
    pub search_param: &'static str,
    pub sort_param: &'static str,
    /// Internal filter key -> server parameter name
    pub field_map: BTreeMap<&'static str, &'static str>,
    /// Always-sent parameters, e.g. `as_target=1` for "my" activity
    pub fixed_params: Vec<(&'static str, &'static str)>,
}

impl EndpointDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page_param: "page",
            per_page_param: "per_page",
            search_param: "search",
            sort_param: "sort",
            field_map: BTreeMap::new(),
            fixed_params: Vec::new(),
        }
    }

    pub fn map_field(mut self, key: &'static str, param: &'static str) -> Self {
        self.field_map.insert(key, param);
        self
    }

    pub fn fixed(mut self, name: &'static str, value: &'static str) -> Self {
        self.fixed_params.push((name, value));
        self
    }

    pub fn param_name(&self, key: &str) -> String {
        self.field_map.get(key).map_or_else(|| key.to_string(), |p| p.to_string())
    }

    /// `rating` + `min` -> `rating_min`, unless `rating.min` is mapped explicitly
    fn bound_name(&self, key: &str, bound: &str) -> String {
        let explicit = format!("{}.{}", key, bound);
        match self.field_map.get(explicit.as_str()) {
            Some(p) => p.to_string(),
            None => format!("{}_{}", self.param_name(key), bound),
        }
    }
}
