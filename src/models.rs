//! Frontend Models
//!
//! Thin mirrors of backend resources. The server owns all of these.

use list_state::{CsvRow, ListRecord, ReactionState, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: u64,
    pub name: String,
}

/// User data structure (admin users table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_status() -> String {
    "active".to_string()
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn role_names(&self) -> String {
        self.roles.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub users_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub name: String,
}

/// One activity-log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub actor: Option<Actor>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// Library article / media item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub author: Option<Actor>,
    /// Content needs a password before it can be viewed
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub reactions: ReactionState,
}

/// Body returned once an article is unlocked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub id: u64,
    pub title: String,
    pub body_html: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
}

macro_rules! numeric_record {
    ($($ty:ty),*) => {
        $(impl ListRecord for $ty {
            fn record_id(&self) -> RecordId {
                self.id.to_string()
            }
        })*
    };
}

numeric_record!(User, Role, ActivityEntry, Article);

impl CsvRow for ActivityEntry {
    fn headers() -> Vec<&'static str> {
        vec!["id", "type", "title", "actor", "created_at"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.kind.clone(),
            self.title.clone(),
            self.actor.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            self.created_at.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_reactions_flattened() {
        let article: Article = serde_json::from_str(
            r#"{"id":3,"slug":"spring","title":"Spring","favorites_count":2,"likes_count":5,"liked":true}"#,
        )
        .unwrap();
        assert_eq!(article.reactions.favorite_count, 2);
        assert!(article.reactions.liked);
        assert_eq!(article.record_id(), "3");
    }

    #[test]
    fn test_activity_csv_row() {
        let entry: ActivityEntry = serde_json::from_str(
            r#"{"id":1,"type":"article_created","title":"A \"Quoted\" Title","created_at":"2024-01-01"}"#,
        )
        .unwrap();
        let csv = list_state::export_csv(&[entry]).unwrap();
        assert!(csv.contains(r#""A ""Quoted"" Title""#));
    }

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_str(r#"{"id":9,"name":"Ann","email":"ann@example.com"}"#).unwrap();
        assert!(user.is_active());
        assert_eq!(user.role_names(), "");
    }
}
