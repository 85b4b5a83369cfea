//! Server-Backed Reactions
//!
//! Favorite / like on grid cards: flip optimistically, then reconcile with the
//! counts the server returns, or roll back when the call fails.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Favorite,
    Like,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Favorite => "favorite",
            ReactionKind::Like => "like",
        }
    }
}

/// Authoritative counts as returned by the toggle endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionState {
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub liked: bool,
    #[serde(default, alias = "favorites_count")]
    pub favorite_count: u64,
    #[serde(default, alias = "likes_count")]
    pub like_count: u64,
}

/// Snapshot taken before an optimistic flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReaction {
    pub kind: ReactionKind,
    previous: ReactionState,
}

impl ReactionState {
    /// Flip `kind` locally and return what to restore on failure
    pub fn begin_toggle(&mut self, kind: ReactionKind) -> PendingReaction {
        let previous = *self;
        let (flag, count) = match kind {
            ReactionKind::Favorite => (&mut self.favorited, &mut self.favorite_count),
            ReactionKind::Like => (&mut self.liked, &mut self.like_count),
        };
        *flag = !*flag;
        *count = if *flag { *count + 1 } else { count.saturating_sub(1) };
        PendingReaction { kind, previous }
    }

    /// Adopt the server's numbers, whatever we guessed
    pub fn reconcile(&mut self, server: ReactionState) {
        *self = server;
    }

    pub fn rollback(&mut self, pending: PendingReaction) {
        *self = pending.previous;
    }
}
