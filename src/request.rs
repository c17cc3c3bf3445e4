use std::fmt::Debug;

/// The content type assumed for requests that do not set one explicitly.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Describes all of the information about an outbound API call that is
/// required to produce its signature.
///
/// The path, secret key, nonce and timestamp are mandatory and supplied up
/// front; query parameters, body and content type are attached through the
/// builder-style methods. The nonce and timestamp always become part of the
/// signed parameter set — query parameters named `nonce`, `timestamp` or
/// `sign` are reserved and stripped during signing, so a caller-supplied
/// parameter bag can never override the authenticated values.
pub struct SignableRequest {
    path: String,
    secret_key: String,
    nonce: String,
    timestamp: String,
    query_params: Vec<(String, String)>,
    body: Option<Body>,
    content_type: String,
}

impl SignableRequest {
    /// Build a new [SignableRequest] with the mandatory fields. The content
    /// type defaults to [DEFAULT_CONTENT_TYPE].
    pub fn new(
            path: impl Into<String>,
            secret_key: impl Into<String>,
            nonce: impl Into<String>,
            timestamp: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            secret_key: secret_key.into(),
            nonce: nonce.into(),
            timestamp: timestamp.into(),
            query_params: Vec::new(),
            body: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Attach a single query parameter. Values are coerced to their plain
    /// string representation at this point (see [ParamValue]).
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query_params.push((key.into(), value.into().0));
        self
    }

    /// Attach a batch of query parameters.
    pub fn query_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
        where K: Into<String>, V: Into<ParamValue>
    {
        self.query_params.extend(
            params.into_iter().map(|(key, value)| (key.into(), value.into().0)));
        self
    }

    /// Attach a request body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Override the content type. Any content type containing the substring
    /// `multipart/form-data` (boundary parameters included) excludes the
    /// body from the signature.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// The request path, without scheme or host.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The attached query parameters, in insertion order and before any
    /// sanitization. Signing neither depends on this order nor keeps the
    /// reserved keys.
    pub fn raw_query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    pub fn body_ref(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn content_type_str(&self) -> &str {
        &self.content_type
    }
}

// Hand-written so the secret key never leaks through debug logging.
impl Debug for SignableRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignableRequest")
            .field("path", &self.path)
            .field("secret_key", &"<redacted>")
            .field("nonce", &self.nonce)
            .field("timestamp", &self.timestamp)
            .field("query_params", &self.query_params)
            .field("body", &self.body)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A request body, either a flat string signed verbatim or a structured
/// JSON value signed as its compact serialization. Structured bodies keep
/// their keys in natural (insertion) order — unlike query parameters, body
/// keys are never re-sorted.
///
/// A structured body with zero entries is treated as "no body" and does not
/// enter the signature at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Json(serde_json::Value),
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

/// A query parameter value coerced to the exact text form that enters the
/// canonical string. Numbers render as plain decimal (no leading zeros, no
/// separators) and booleans as `true`/`false`, so a server holding typed
/// values can reproduce the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue(pub(crate) String);

impl ParamValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue(value.clone())
    }
}

macro_rules! param_value_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue(value.to_string())
            }
        })*
    }
}

param_value_from_display!(bool, i32, i64, u32, u64, usize, f64);

/// Adds support for building a [SignableRequest] from types of the
/// [http](https://crates.io/crates/http) crate.
///
/// Requires the `http` feature to be enabled.
#[cfg(feature = "http")]
mod http_support {
    use super::SignableRequest;

    impl SignableRequest {
        /// Build a [SignableRequest] from the parts of an [http::Request].
        ///
        /// The path and query parameters come from the URI and the content
        /// type from the `content-type` header (when present and valid
        /// UTF-8). Query pairs are split on `&` and `=` and taken verbatim,
        /// without percent-decoding — callers whose parameters need
        /// decoding should attach them through
        /// [query_params](SignableRequest::query_params) instead. The body
        /// is not extracted; attach it with [body](SignableRequest::body).
        pub fn from_http_parts(
                parts: &http::request::Parts,
                secret_key: impl Into<String>,
                nonce: impl Into<String>,
                timestamp: impl Into<String>) -> Self {
            let mut request = SignableRequest::new(
                parts.uri.path(), secret_key, nonce, timestamp);
            if let Some(query) = parts.uri.query() {
                request = request.query_params(query.split('&').filter_map(|pair| {
                    if pair.is_empty() {
                        return None;
                    }
                    match pair.split_once('=') {
                        Some((key, value)) => Some((key, value)),
                        None => Some((pair, "")),
                    }
                }));
            }
            if let Some(content_type) = parts.headers
                .get(http::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
            {
                request = request.content_type(content_type);
            }
            request
        }
    }
}
