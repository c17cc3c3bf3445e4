use std::collections::BTreeMap;

/// Query parameter names that are always sourced from the request itself
/// and never from a caller-supplied parameter bag.
pub const RESERVED_PARAMS: [&str; 3] = ["nonce", "timestamp", "sign"];

/// Turns a parameter set into its single deterministic string form: keys
/// sorted ascending by code point, each key concatenated directly with its
/// value, no delimiter anywhere.
///
/// The sort is plain byte-wise comparison — not locale-aware, not
/// case-insensitive — so the output is byte-identical across calls,
/// platforms and implementations, which is what lets an independent server
/// recompute the signature. An empty set yields an empty string.
pub fn canonicalize<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let sorted: BTreeMap<&str, &str> = params.into_iter().collect();
    let mut out = String::with_capacity(
        sorted.iter().map(|(key, value)| key.len() + value.len()).sum());
    for (key, value) in &sorted {
        out.push_str(key);
        out.push_str(value);
    }
    out
}

/// Builds the sanitized parameter set that enters the signature: the
/// request's nonce and timestamp merged with the caller's query parameters,
/// after dropping any entry named like one of [RESERVED_PARAMS]. The
/// request-level values always win; a query parameter literally called
/// `nonce`, `timestamp` or `sign` is ignored rather than signed twice.
pub fn signed_params<'a>(
        nonce: &'a str,
        timestamp: &'a str,
        query_params: &'a [(String, String)]) -> BTreeMap<&'a str, &'a str> {
    let mut params: BTreeMap<&str, &str> = query_params.iter()
        .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    params.insert("nonce", nonce);
    params.insert("timestamp", timestamp);
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_yields_empty_string() {
        assert_eq!(canonicalize(std::iter::empty()), "");
    }

    #[test]
    fn pairs_concatenate_without_delimiters() {
        assert_eq!(
            canonicalize([("nonce", "abc"), ("timestamp", "1700000000")]),
            "nonceabctimestamp1700000000");
    }

    #[test]
    fn keys_sort_by_code_point_regardless_of_insertion_order() {
        let forward = canonicalize([("a", "1"), ("b", "2"), ("c", "3")]);
        let reversed = canonicalize([("c", "3"), ("b", "2"), ("a", "1")]);
        assert_eq!(forward, "a1b2c3");
        assert_eq!(forward, reversed);
    }

    #[test]
    fn sort_is_case_sensitive() {
        // Uppercase letters sort before lowercase in code-point order.
        assert_eq!(canonicalize([("a", "1"), ("B", "2")]), "B2a1");
    }

    #[test]
    fn signed_params_drops_reserved_keys() {
        let query = vec![
            ("nonce".to_string(), "evil".to_string()),
            ("sign".to_string(), "evil".to_string()),
            ("timestamp".to_string(), "0".to_string()),
            ("limit".to_string(), "20".to_string()),
        ];
        let params = signed_params("real-nonce", "1700000000", &query);
        assert_eq!(params.get("nonce"), Some(&"real-nonce"));
        assert_eq!(params.get("timestamp"), Some(&"1700000000"));
        assert_eq!(params.get("sign"), None);
        assert_eq!(params.get("limit"), Some(&"20"));
    }
}
