//! Article Endpoints
//!
//! Library listing, server-backed reactions and password unlock.

use std::collections::BTreeMap;

use list_state::{
    EndpointDescriptor, FieldKind, FieldSpec, FilterSchema, ListConfig, ListError, LoadMode, ReactionKind,
    ReactionState, SortKey, ViewMode,
};
use serde::Serialize;

use super::ApiClient;
use crate::config::APP_NAMESPACE;
use crate::models::{Article, ArticleContent};

pub const LIST_ID: &str = "library";

pub fn endpoint() -> EndpointDescriptor {
    EndpointDescriptor::new("/articles")
        .map_field("category", "category_ids")
        .map_field("author", "author_ids")
}

pub fn list_config() -> ListConfig {
    let mut config = ListConfig::new(APP_NAMESPACE, LIST_ID, endpoint());
    config.per_page_options = vec![12, 24, 48];
    config.default_per_page = 12;
    config.schema = FilterSchema::new(vec![
        FieldSpec::new("category", "Category", FieldKind::Multi),
        FieldSpec::new("author", "Author", FieldKind::Multi),
        FieldSpec::new("tags", "Tags", FieldKind::Multi),
        FieldSpec::new("rating", "Rating", FieldKind::Range { lo: 0.0, hi: 5.0 }),
        FieldSpec::new("featured", "Featured only", FieldKind::Flag),
    ]);
    config.default_sort = vec![SortKey::desc("published_at")];
    config.default_view = ViewMode::Grid;
    config.default_load_mode = LoadMode::Pagination;
    config
}

/// Category and author choices gathered from every page loaded so far.
///
/// Pages are already filtered, so reading only the current one would hide
/// every choice outside the applied filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCatalog {
    categories: BTreeMap<String, String>,
    authors: BTreeMap<String, String>,
}

impl FilterCatalog {
    pub fn absorb(&mut self, items: &[Article]) {
        for article in items {
            if let Some(c) = &article.category {
                self.categories.insert(c.id.to_string(), c.name.clone());
            }
            if let Some(a) = &article.author {
                self.authors.insert(a.id.to_string(), a.name.clone());
            }
        }
    }

    /// `(value, label)` pairs for `key`; selected ids never seen keep their id as label
    pub fn options(&self, key: &str, selected: &[String]) -> Vec<(String, String)> {
        let known = match key {
            "category" => &self.categories,
            "author" => &self.authors,
            _ => return Vec::new(),
        };
        let mut pairs = known.clone();
        for id in selected {
            pairs.entry(id.clone()).or_insert_with(|| id.clone());
        }
        pairs.into_iter().collect()
    }
}

#[derive(Serialize)]
struct ReactionArgs {
    #[serde(rename = "type")]
    kind: ReactionKind,
}

#[derive(Serialize)]
struct UnlockArgs<'a> {
    password: &'a str,
}

/// Toggle a reaction; the response carries the authoritative counts
pub async fn toggle_reaction(api: &ApiClient, id: u64, kind: ReactionKind) -> Result<ReactionState, ListError> {
    api.post(&format!("/articles/{}/reactions", id), &ReactionArgs { kind }).await
}

pub async fn unlock(api: &ApiClient, slug: &str, password: &str) -> Result<ArticleContent, ListError> {
    api.post(&format!("/articles/{}/unlock", slug), &UnlockArgs { password }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_state::{FilterValue, ListQuery};

    #[test]
    fn test_library_params() {
        let mut query = ListQuery::new(12);
        query.filters.set("category", FilterValue::multi(["3"]));
        query.filters.set("rating", FilterValue::Range { min: Some(4.0), max: None });
        query.filters.set("featured", FilterValue::Flag(true));
        let params = query.to_params(&endpoint());
        assert!(params.contains(&("category_ids".to_string(), "3".to_string())));
        assert!(params.contains(&("rating_min".to_string(), "4".to_string())));
        assert!(params.contains(&("featured".to_string(), "1".to_string())));
        assert!(!params.iter().any(|(n, _)| n == "rating_max"));
    }

    fn article(id: u64, category: (u64, &str), author: (u64, &str)) -> Article {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "slug": format!("a-{}", id),
            "title": "t",
            "category": { "id": category.0, "name": category.1 },
            "author": { "id": author.0, "name": author.1 },
        }))
        .unwrap()
    }

    #[test]
    fn test_catalog_keeps_choices_from_earlier_pages() {
        let mut catalog = FilterCatalog::default();
        catalog.absorb(&[article(1, (1, "News"), (7, "Ann")), article(2, (2, "Video"), (7, "Ann"))]);
        // a filtered page only carries category 2
        catalog.absorb(&[article(2, (2, "Video"), (8, "Bo"))]);

        assert_eq!(
            catalog.options("category", &[]),
            vec![("1".to_string(), "News".to_string()), ("2".to_string(), "Video".to_string())]
        );
        assert_eq!(catalog.options("author", &[]).len(), 2);
        assert!(catalog.options("tags", &[]).is_empty());
    }

    #[test]
    fn test_catalog_keeps_selected_ids_it_never_saw() {
        let catalog = FilterCatalog::default();
        assert_eq!(
            catalog.options("category", &["5".to_string()]),
            vec![("5".to_string(), "5".to_string())]
        );
    }

    #[test]
    fn test_reaction_body_uses_type() {
        let body = serde_json::to_value(ReactionArgs { kind: ReactionKind::Like }).unwrap();
        assert_eq!(body, serde_json::json!({ "type": "like" }));
    }
}
