//! Response Normalization
//!
//! Backend list endpoints answer in several envelope shapes. Everything is
//! folded into one `ListResult` right after the HTTP call.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ListError;

/// Opaque record id; numeric ids are kept in their decimal form
pub type RecordId = String;

/// Anything a list can show
pub trait ListRecord: Clone + PartialEq + 'static {
    fn record_id(&self) -> RecordId;
}

impl ListRecord for Value {
    fn record_id(&self) -> RecordId {
        match self.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

impl Default for PageMeta {
    /// Safe pagination state after a failure
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<R> {
    pub items: Vec<R>,
    pub meta: PageMeta,
}

impl<R> ListResult<R> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
        }
    }
}

/// Fold any known envelope into a `ListResult`.
///
/// `requested_page` and `per_page` fill gaps the server leaves out; a
/// `current_page` echoed by the server always wins over the request.
pub fn normalize_response<R: DeserializeOwned>(
    body: Value,
    requested_page: u32,
    per_page: u32,
) -> Result<ListResult<R>, ListError> {
    let (rows, meta_src) = split_envelope(body)?;
    let item_count = rows.len() as u64;

    let items = rows
        .into_iter()
        .map(serde_json::from_value::<R>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ListError::decode(e.to_string()))?;

    let read = |key: &str| meta_src.iter().find_map(|m| m.get(key)).and_then(as_u64);

    let per_page = read("per_page").map(clamp_u32).filter(|n| *n > 0).unwrap_or(per_page.max(1));
    let total = read("total").unwrap_or(item_count);
    let derived_last = clamp_u32(total.div_ceil(per_page as u64).max(1));
    let last_page = read("last_page").map(|n| clamp_u32(n).max(1)).unwrap_or(derived_last);
    let current_page = read("current_page")
        .map(clamp_u32)
        .unwrap_or(requested_page)
        .clamp(1, last_page);

    Ok(ListResult {
        items,
        meta: PageMeta {
            current_page,
            last_page,
            total,
        },
    })
}

/// Page numbers past `u32::MAX` saturate instead of wrapping
fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Returns the row array and the objects that may carry pagination fields
fn split_envelope(body: Value) -> Result<(Vec<Value>, Vec<Value>), ListError> {
    match body {
        Value::Array(rows) => Ok((rows, Vec::new())),
        Value::Object(mut obj) => {
            let meta = obj.remove("meta");
            match obj.remove("data") {
                // { data: [..], meta?: {..}, total? }
                Some(Value::Array(rows)) => {
                    let mut sources = Vec::new();
                    if let Some(m) = meta {
                        sources.push(m);
                    }
                    sources.push(Value::Object(obj));
                    Ok((rows, sources))
                }
                // { data: { data: [..], current_page, ... } }
                Some(Value::Object(inner)) => split_envelope(Value::Object(inner)),
                Some(other) => Err(ListError::decode(format!("`data` is not a list: {}", type_name(&other)))),
                None => match meta {
                    // { meta: { data: [..], ... } }
                    Some(Value::Object(meta)) if meta.contains_key("data") => split_envelope(Value::Object(meta)),
                    _ => Err(ListError::decode("missing `data`")),
                },
            }
        }
        other => Err(ListError::decode(format!("expected object or list, got {}", type_name(&other)))),
    }
}

fn as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
