//! Flattening of a score dictionary into string metadata.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

const PLATFORM_SPECIFIC: &str = "platform_specific";

/// Flatten a score dictionary into a `key -> string` map.
///
/// Top-level scalars keep their key. Entries of `platform_specific` are
/// lifted to their bare key unless the top level already defines it. Any
/// other nested object is written as `parent.child`. Arrays of scalars are
/// comma-joined and nulls are dropped.
#[must_use]
pub fn flatten_score_dictionary(dict: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for (key, value) in dict {
        if key != PLATFORM_SPECIFIC {
            flatten_into(&mut out, key, value);
        }
    }

    if let Some(Value::Object(specific)) = dict.get(PLATFORM_SPECIFIC) {
        for (key, value) in specific {
            if dict.contains_key(key) || out.contains_key(key) {
                continue;
            }
            flatten_into(&mut out, key, value);
        }
    }

    out
}

fn flatten_into(out: &mut BTreeMap<String, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(children) => {
            for (child_key, child) in children {
                flatten_into(out, &format!("{key}.{child_key}"), child);
            }
        }
        Value::Array(items) => {
            if let Some(joined) = join_scalars(items) {
                out.insert(key.to_string(), joined);
            } else if let Ok(encoded) = serde_json::to_string(items) {
                out.insert(key.to_string(), encoded);
            }
        }
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                out.insert(key.to_string(), text);
            }
        }
    }
}

/// `None` if the array contains anything other than scalars.
fn join_scalars(items: &[Value]) -> Option<String> {
    let parts = items
        .iter()
        .filter(|item| !item.is_null())
        .map(scalar_to_string)
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(","))
}

/// Render a JSON scalar: integers without a decimal point, floats in their
/// shortest round-trip form, booleans as `true`/`false`.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn flatten(value: &Value) -> BTreeMap<String, String> {
        flatten_score_dictionary(value.as_object().expect("object"))
    }

    #[test]
    fn scalars_render_naturally() {
        let out = flatten(&json!({"score": 150, "rate": 17.5, "flag": true, "name": "x"}));
        assert_eq!(out["score"], "150");
        assert_eq!(out["rate"], "17.5");
        assert_eq!(out["flag"], "true");
        assert_eq!(out["name"], "x");
    }

    #[test]
    fn platform_specific_lifts_without_overwriting_top_level() {
        let out = flatten(&json!({
            "score": 1,
            "platform_specific": {"score": 99, "by": "pg"}
        }));
        assert_eq!(out["score"], "1");
        assert_eq!(out["by"], "pg");
        assert!(!out.contains_key("platform_specific.by"));
    }

    #[test]
    fn nested_objects_use_dotted_keys() {
        let out = flatten(&json!({
            "author": {"name": "ferris", "stats": {"followers": 10}},
            "platform_specific": {"external_urls": {"spotify": "https://open.spotify.com/e/1"}}
        }));
        assert_eq!(out["author.name"], "ferris");
        assert_eq!(out["author.stats.followers"], "10");
        assert_eq!(out["external_urls.spotify"], "https://open.spotify.com/e/1");
    }

    #[test]
    fn arrays_join_and_nulls_drop() {
        let out = flatten(&json!({
            "categories": ["rust", "db"],
            "mixed": [1, null, 2],
            "images": [{"url": "a"}],
            "missing": null
        }));
        assert_eq!(out["categories"], "rust,db");
        assert_eq!(out["mixed"], "1,2");
        assert_eq!(out["images"], r#"[{"url":"a"}]"#);
        assert!(!out.contains_key("missing"));
    }
}
