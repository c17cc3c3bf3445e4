//! Deterministic HMAC-SHA256 request signing for API clients.
//!
//! Given a request path, a shared secret, a nonce, a timestamp, optional
//! query parameters and an optional body, [sign] produces a 64-character
//! lowercase hexadecimal signature that a server holding the same secret
//! can independently recompute to authenticate the call. The signed payload
//! is `secret ‖ path ‖ canonical-params ‖ [body] ‖ secret`, where the
//! canonical parameter string is built by [canonical::canonicalize].
//!
//! ```
//! use api_sign::{sign, SignableRequest};
//! use serde_json::json;
//!
//! let request = SignableRequest::new(
//!         "/api/v1/reminders",
//!         "shared-secret",
//!         "dddf3920-f51f-451a-959a-ec58e070853f",
//!         "1767954570")
//!     .query_param("limit", 20)
//!     .body(json!({"name": "Water plants"}));
//! let signature = sign(&request).unwrap();
//! assert_eq!(signature.len(), 64);
//! ```
//!
//! The [credentials] module generates fresh nonces and timestamps and signs
//! in one step, returning a parameter set ready to serialize into the
//! request's query string.

#![forbid(unsafe_code)]

pub mod canonical;
pub mod credentials;
pub mod request;
mod sign;

pub use request::{
    Body,
    ParamValue,
    SignableRequest,
    DEFAULT_CONTENT_TYPE,
};

pub use sign::{
    SignError,
    sign,
};

pub use credentials::{
    SignedQuery,
    generate_nonce,
    unix_timestamp,
};
