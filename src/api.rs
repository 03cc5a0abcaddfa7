// API client module: a small blocking HTTP client for the Keep REST API.
// Every call resolves a fresh bearer token, sends one request and returns
// the decoded JSON body. There is no retry; reqwest's default blocking
// timeout is the only bound on a hung call.

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::error::{KeepError, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One outbound call: method, endpoint relative to the API base, optional
/// query pairs and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        ApiRequest {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// The seam between command handlers and the network.
pub trait KeepApi {
    /// Perform `request` and return the parsed JSON response.
    fn call(&self, request: &ApiRequest) -> Result<Value>;
}

/// Blocking reqwest client bound to an API base URL and a token source.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenProvider,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenProvider) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("keep-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
            tokens,
        })
    }

    /// Create an ApiClient from `Config::from_env`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base.clone(), TokenProvider::from_config(config))
    }

    fn headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl KeepApi for ApiClient {
    fn call(&self, request: &ApiRequest) -> Result<Value> {
        let token = self.tokens.resolve()?;
        let url = format!("{}{}", self.base_url, request.endpoint);
        debug!("{} {}", request.method, url);

        let mut req = self
            .client
            .request(request.method.clone(), &url)
            .headers(Self::headers(&token)?);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let res = req.send()?;
        let status = res.status();
        debug!("{} {} -> {}", request.method, url, status);
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(KeepError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = res.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_query_and_body() {
        let req = ApiRequest::get("/notes")
            .query("pageSize", "5")
            .query("filter", "trashed = true");
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.query,
            vec![
                ("pageSize".to_string(), "5".to_string()),
                ("filter".to_string(), "trashed = true".to_string()),
            ]
        );

        let req = ApiRequest::post("/notes").json(&json!({ "title": "t" })).unwrap();
        assert_eq!(req.body, Some(json!({ "title": "t" })));
    }

    #[test]
    fn headers_carry_bearer_and_json() {
        let headers = ApiClient::headers("abc").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn token_with_newline_is_rejected_as_header() {
        assert!(matches!(
            ApiClient::headers("bad\ntoken"),
            Err(KeepError::Header(_))
        ));
    }
}
