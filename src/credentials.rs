//! Caller-side helpers for the one input the signing core treats as an
//! external collaborator: fresh nonce and timestamp generation, plus a
//! convenience that signs in one step and hands back a ready-to-serialize
//! query parameter set.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

use crate::canonical::RESERVED_PARAMS;
use crate::request::{Body, ParamValue, SignableRequest};
use crate::sign::{sign, SignError};

/// Generates a fresh nonce: a random v4 UUID, which carries enough entropy
/// to make collisions negligible across any realistic server-side replay
/// window. The core never checks uniqueness — that is the verifier's job.
pub fn generate_nonce() -> String {
    Uuid::new_v4().to_string()
}

/// The current Unix timestamp as decimal text, at seconds granularity.
pub fn unix_timestamp() -> Result<String, SignError> {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_err| SignError::Clock)?
        .as_secs();
    Ok(seconds.to_string())
}

/// The output of one-step signing: the generated credentials, the computed
/// signature, and the full sanitized parameter set (including `sign`) ready
/// to be serialized into the request's query string.
#[derive(Debug, Clone, Serialize)]
pub struct SignedQuery {
    pub nonce: String,
    pub timestamp: String,
    pub sign: String,
    /// Sanitized query parameters plus `nonce`, `timestamp` and `sign`.
    pub query: BTreeMap<String, String>,
}

impl SignedQuery {
    /// Generates a nonce and timestamp, signs the request, and returns the
    /// pieces the caller needs to put on the wire
    /// (`?nonce=...&timestamp=...&sign=...`).
    ///
    /// Reserved keys in `query_params` are dropped the same way [sign]
    /// drops them. Pass `None` for `content_type` to use the
    /// `application/json` default.
    pub fn generate<K, V>(
            path: &str,
            secret_key: &str,
            query_params: impl IntoIterator<Item = (K, V)>,
            body: Option<Body>,
            content_type: Option<&str>) -> Result<Self, SignError>
        where K: Into<String>, V: Into<ParamValue>
    {
        let mut request = SignableRequest::new(
                path, secret_key, generate_nonce(), unix_timestamp()?)
            .query_params(query_params);
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }
        let signature = sign(&request)?;

        let mut query: BTreeMap<String, String> = request.raw_query_params().iter()
            .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
            .cloned()
            .collect();
        query.insert("nonce".to_string(), request.nonce().to_string());
        query.insert("timestamp".to_string(), request.timestamp().to_string());
        query.insert("sign".to_string(), signature.clone());

        Ok(SignedQuery {
            nonce: request.nonce().to_string(),
            timestamp: request.timestamp().to_string(),
            sign: signature,
            query,
        })
    }

    /// Serializes the signed parameter set into a URL query string (no
    /// leading `?`).
    pub fn query_string(&self) -> Result<String, SignError> {
        Ok(serde_qs::to_string(&self.query)?)
    }
}
