//! Canonical sign-content serialization

use sop_core::{FieldValue, RequestEnvelope};

/// A field name scheduled for emission, tagged with the parent it was
/// lifted out of. The tag keeps a nested child `k` under parent `p`
/// distinct from a top-level field literally named `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    name: &'a str,
    parent: Option<&'a str>,
}

/// Serialize an envelope into the exact string fed to the signature
/// algorithm.
///
/// # Rules
///
/// - Candidate names are every top-level field name plus, for each
///   nested field, the keys of the nested mapping
/// - Candidates sorted lexicographically by name (byte order,
///   case-sensitive; stable on ties)
/// - Each candidate rendered as `name=value`, joined with `&`
/// - Empty names, empty values, and nested-mapping values are skipped —
///   the gateway expects omitted, not empty, parameters
/// - Nested children are emitted under the child's own name; the parent
///   name never appears
///
/// # Example
///
/// ```rust
/// use sop_canonical::sign_content;
/// use sop_core::RequestEnvelope;
///
/// let mut envelope = RequestEnvelope::new();
/// envelope.insert("method", "map.download");
/// envelope.insert("app_id", "123");
/// assert_eq!(sign_content(&envelope), "app_id=123&method=map.download");
/// ```
pub fn sign_content(envelope: &RequestEnvelope) -> String {
    let mut candidates: Vec<Candidate<'_>> = Vec::with_capacity(envelope.len());

    for (name, value) in envelope.iter() {
        candidates.push(Candidate { name, parent: None });
        if let FieldValue::Nested(children) = value {
            for child in children.keys() {
                candidates.push(Candidate {
                    name: child,
                    parent: Some(name),
                });
            }
        }
    }

    // sort_by is stable, so same-named candidates keep their
    // collection order (name collisions are a caller error anyway)
    candidates.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let mut pairs: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let value = match candidate.parent {
            None => match envelope.get(candidate.name) {
                Some(FieldValue::Scalar(s)) => s.as_str(),
                // nested mappings contribute their leaves, never themselves
                Some(FieldValue::Nested(_)) | None => continue,
            },
            Some(parent) => match envelope.get(parent) {
                Some(FieldValue::Nested(children)) => match children.get(candidate.name) {
                    Some(s) => s.as_str(),
                    None => continue,
                },
                _ => continue,
            },
        };

        if candidate.name.is_empty() || value.is_empty() {
            continue;
        }
        pairs.push(format!("{}={}", candidate.name, value));
    }

    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_sorted_output() {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("method", "map.download");
        envelope.insert("app_id", "123");
        assert_eq!(sign_content(&envelope), "app_id=123&method=map.download");
    }

    #[test]
    fn test_empty_value_is_omitted() {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("app_id", "123");
        envelope.insert("version", "");
        assert_eq!(sign_content(&envelope), "app_id=123");
    }

    #[test]
    fn test_nested_field_flattens_to_leaf_names() {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("app_id", "123");
        envelope.insert(
            "extra",
            BTreeMap::from([("foo".to_string(), "bar".to_string())]),
        );
        assert_eq!(sign_content(&envelope), "app_id=123&foo=bar");
    }

    #[test]
    fn test_empty_envelope() {
        assert_eq!(sign_content(&RequestEnvelope::new()), "");
    }

    #[test]
    fn test_determinism() {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("c", "3");
        envelope.insert("a", "1");
        envelope.insert("b", "2");

        let first = sign_content(&envelope);
        let second = sign_content(&envelope);
        assert_eq!(first, second);
        assert_eq!(first, "a=1&b=2&c=3");
    }
}
