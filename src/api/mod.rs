//! Backend API
//!
//! Frontend bindings to the REST backend, grouped by resource. Every call
//! goes through `ApiClient`, which attaches the bearer token.

pub mod activity;
pub mod articles;
pub mod profile;
pub mod roles;
pub mod users;

use std::marker::PhantomData;

use async_trait::async_trait;
use list_state::{normalize_response, FetchOutcome, FetchRequest, ListError, ListSource, Session};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// HTTP client bound to one session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base: &str, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: absolute_base(base),
            session,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.session.bearer() {
            Some(bearer) => builder.header("Authorization", bearer),
            None => builder,
        }
    }

    pub async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, ListError> {
        let request = self.authorize(self.http.get(self.url(path)).query(params));
        read_json(request.send().await).await
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ListError> {
        let mut request = self.authorize(self.http.request(method, self.url(path)));
        if let Some(body) = body {
            request = request.json(body);
        }
        read_json(request.send().await).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ListError> {
        decode(self.get_json(path, &[]).await?)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ListError> {
        decode(self.send_json(Method::POST, path, Some(body)).await?)
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ListError> {
        decode(self.send_json(Method::PUT, path, Some(body)).await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ListError> {
        self.send_json::<Value>(Method::DELETE, path, None).await.map(|_| ())
    }
}

/// reqwest on wasm needs absolute URLs
fn absolute_base(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.to_string();
    }
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}/{}", origin, base.trim_start_matches('/'))
}

async fn read_json(sent: reqwest::Result<Response>) -> Result<Value, ListError> {
    let response = sent.map_err(|e| ListError::transport(e.to_string()))?;
    let status = response.status();
    let text = response.text().await.map_err(|e| ListError::transport(e.to_string()))?;
    let body: Option<Value> = if text.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&text).ok()
    };

    if !status.is_success() {
        log::warn!("request failed with {}", status);
        return Err(ListError::from_response(status.as_u16(), body.as_ref()));
    }
    Ok(body.unwrap_or(Value::Null))
}

/// Unwrap a `{data: ...}` single-resource envelope if present
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ListError> {
    let inner = match body {
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| ListError::decode(e.to_string()))
}

/// `ListSource` backed by the REST API
pub struct HttpListSource<R> {
    api: ApiClient,
    _record: PhantomData<R>,
}

impl<R> HttpListSource<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<R: DeserializeOwned> ListSource<R> for HttpListSource<R> {
    async fn fetch(&self, request: &FetchRequest) -> FetchOutcome<R> {
        log::debug!("GET {} page {}", request.endpoint.path, request.query.page);
        let result = self
            .api
            .get_json(&request.endpoint.path, &request.params())
            .await
            .and_then(|body| normalize_response(body, request.query.page, request.query.per_page));
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: u64,
        name: String,
    }

    #[test]
    fn test_decode_unwraps_data_envelope() {
        let named: Named = decode(json!({ "data": { "id": 1, "name": "a" } })).unwrap();
        assert_eq!(named, Named { id: 1, name: "a".into() });
    }

    #[test]
    fn test_decode_plain_object() {
        let named: Named = decode(json!({ "id": 2, "name": "b" })).unwrap();
        assert_eq!(named.id, 2);
    }

    #[test]
    fn test_absolute_base_keeps_full_urls() {
        assert_eq!(absolute_base("https://api.example.com/v1/"), "https://api.example.com/v1");
    }
}
