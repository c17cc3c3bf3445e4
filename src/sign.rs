use bytes::BytesMut;
use ring::hmac;
use thiserror::Error;

use crate::canonical::{canonicalize, signed_params};
use crate::request::{Body, SignableRequest};

/// Content types containing this substring never have their body signed.
/// Substring rather than exact match on purpose: real multipart content
/// types carry an appended boundary parameter and must still be excluded.
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

#[derive(Debug, Error)]
pub enum SignError {
    /// The request path was empty. A signature over a pathless request
    /// would verify against the wrong call, so the request is rejected
    /// outright instead of being signed.
    #[error("cannot sign a request with an empty path")]
    MissingPath,

    /// The secret key was empty. An empty key is technically signable but
    /// meaningless, and almost certainly a missing-configuration bug.
    #[error("cannot sign a request with an empty secret key")]
    MissingSecretKey,

    /// A structured body failed to serialize to JSON.
    #[error("failed to serialize request body: {0}")]
    BodySerialization(#[from] serde_json::Error),

    /// The signed parameter set failed to serialize into a query string.
    #[error("failed to encode query string: {0}")]
    QueryEncode(#[from] serde_qs::Error),

    /// The system clock reported a time before the Unix epoch while
    /// generating a timestamp.
    #[error("system clock is set before the Unix epoch")]
    Clock,
}

/// Computes the signature for a request: a 64-character lowercase
/// hexadecimal HMAC-SHA256 digest that the server recomputes from the same
/// inputs to authenticate the call.
///
/// The signed payload is
/// `secret ‖ path ‖ canonical-params ‖ [body] ‖ secret`, where the
/// canonical parameter string covers the nonce, the timestamp and the
/// sanitized query parameters ([canonicalize]). The secret both opens and
/// closes the payload, so the boundary between path and trailing secret is
/// never ambiguous. The body is skipped entirely for multipart content
/// types and for structured bodies with zero entries.
///
/// Purely functional: identical inputs always produce the identical
/// signature, and the call is safe to make from any number of threads at
/// once.
pub fn sign(request: &SignableRequest) -> Result<String, SignError> {
    if request.path().is_empty() {
        return Err(SignError::MissingPath);
    }
    if request.secret_key().is_empty() {
        return Err(SignError::MissingSecretKey);
    }

    let params = signed_params(
        request.nonce(), request.timestamp(), request.raw_query_params());
    let canonical = canonicalize(params);

    let secret = request.secret_key().as_bytes();
    let mut payload = BytesMut::with_capacity(
        2 * secret.len() + request.path().len() + canonical.len() + 64);
    payload.extend_from_slice(secret);
    payload.extend_from_slice(request.path().as_bytes());
    payload.extend_from_slice(canonical.as_bytes());
    if !request.content_type_str().contains(MULTIPART_CONTENT_TYPE) {
        if let Some(body) = request.body_ref() {
            append_body(&mut payload, body)?;
        }
    }
    payload.extend_from_slice(secret);

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    let tag = hmac::sign(&key, &payload);
    Ok(hex::encode(tag.as_ref()))
}

/// Appends the signable form of a body to the payload. Text bodies go in
/// verbatim; JSON bodies as their compact serialization with keys in
/// natural order. JSON objects and arrays with zero entries count as "no
/// body" and append nothing.
fn append_body(payload: &mut BytesMut, body: &Body) -> Result<(), SignError> {
    match body {
        Body::Text(text) => payload.extend_from_slice(text.as_bytes()),
        Body::Json(value) => {
            let empty = match value {
                serde_json::Value::Object(map) => map.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                _ => false,
            };
            if !empty {
                let serialized = serde_json::to_string(value)?;
                payload.extend_from_slice(serialized.as_bytes());
            }
        }
    }
    Ok(())
}
