//! Share Links and Share Tracking

use std::collections::BTreeMap;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::storage::{load_json, save_json, KeyValueStore};

pub const SHARES_KEY: &str = "media_library:shares";

/// RFC 3986 unreserved characters stay as they are
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    CopyLink,
    Email,
    X,
    Facebook,
    LinkedIn,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::CopyLink,
        ShareTarget::Email,
        ShareTarget::X,
        ShareTarget::Facebook,
        ShareTarget::LinkedIn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::CopyLink => "Copy link",
            ShareTarget::Email => "Email",
            ShareTarget::X => "X",
            ShareTarget::Facebook => "Facebook",
            ShareTarget::LinkedIn => "LinkedIn",
        }
    }

    /// The URL to open for this target; `CopyLink` returns the content URL itself
    pub fn share_url(&self, content_url: &str, title: &str) -> String {
        let url = encode(content_url);
        let title = encode(title);
        match self {
            ShareTarget::CopyLink => content_url.to_string(),
            ShareTarget::Email => format!("mailto:?subject={}&body={}", title, url),
            ShareTarget::X => format!("https://twitter.com/intent/tweet?url={}&text={}", url, title),
            ShareTarget::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
            ShareTarget::LinkedIn => format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
        }
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Local count of how often each item was shared from this browser
#[derive(Clone)]
pub struct ShareLog {
    store: Rc<dyn KeyValueStore>,
}

impl ShareLog {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> BTreeMap<String, u32> {
        load_json(self.store.as_ref(), SHARES_KEY).unwrap_or_default()
    }

    /// Returns the new count for `id`
    pub fn record(&self, id: &str, target: ShareTarget) -> u32 {
        let mut counts = self.load();
        let count = counts.entry(id.to_string()).or_insert(0);
        *count += 1;
        let now = *count;
        save_json(self.store.as_ref(), SHARES_KEY, &counts);
        log::debug!("shared {} via {} ({} total)", id, target.label(), now);
        now
    }

    pub fn count(&self, id: &str) -> u32 {
        self.load().get(id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_share_urls_are_encoded() {
        let url = "https://media.example.com/articles/a b?ref=1";
        let x = ShareTarget::X.share_url(url, "Tom & Jerry");
        assert_eq!(
            x,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fmedia.example.com%2Farticles%2Fa%20b%3Fref%3D1&text=Tom%20%26%20Jerry"
        );
        assert_eq!(ShareTarget::CopyLink.share_url(url, "t"), url);
        assert!(ShareTarget::Email.share_url(url, "Hi").starts_with("mailto:?subject=Hi&body="));
    }

    #[test]
    fn test_share_log_counts() {
        let log = ShareLog::new(Rc::new(MemoryStore::new()));
        assert_eq!(log.count("9"), 0);
        assert_eq!(log.record("9", ShareTarget::X), 1);
        assert_eq!(log.record("9", ShareTarget::CopyLink), 2);
        assert_eq!(log.count("9"), 2);
        assert_eq!(log.count("10"), 0);
    }
}
