// Document schema checks and upgrades for files written by older versions.
// Documents are inspected as raw JSON so that a missing optional field can be
// filled in before the typed loader sees it.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

fn is_str(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::String(_)))
}

fn is_num(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Number(_)))
}

fn validate_node(node: &Value) -> bool {
    let Some(node) = node.as_object() else { return false };
    let Some(shape) = node.get("body_shape").and_then(Value::as_object) else { return false };
    let location_ok = shape
        .get("location_left_top")
        .and_then(Value::as_array)
        .map_or(false, |a| a.len() == 2 && a.iter().all(Value::is_number));
    is_str(shape.get("type"))
        && location_ok
        && is_num(shape.get("width"))
        && is_num(shape.get("height"))
        && is_str(node.get("inner_text"))
        && is_str(node.get("details"))
        && is_str(node.get("uuid"))
        && node
            .get("children")
            .and_then(Value::as_array)
            .map_or(false, |c| c.iter().all(Value::is_string))
}

fn validate_link(link: &Value) -> bool {
    let Some(link) = link.as_object() else { return false };
    is_str(link.get("source_node")) && is_str(link.get("target_node")) && is_str(link.get("inner_text"))
}

/// True when the document carries every field of the current schema.
pub fn validate_document(v: &Value) -> bool {
    let Some(doc) = v.as_object() else { return false };
    let nodes_ok = doc
        .get("nodes")
        .and_then(Value::as_array)
        .map_or(false, |nodes| nodes.iter().all(validate_node));
    let links_ok = doc
        .get("links")
        .and_then(Value::as_array)
        .map_or(false, |links| links.iter().all(validate_link));
    nodes_ok && links_ok
}

fn fill(obj: &mut Map<String, Value>, key: &str, default: Value) {
    obj.entry(key.to_string()).or_insert(default);
}

/// Upgrade for documents predating 2024-09-07: fills in `nodes`, `links`,
/// node `details`/`inner_text`/`children` and link `inner_text`. A missing
/// `uuid` is never invented.
pub fn transform_24_09_07(v: &Value) -> Value {
    let mut out = v.clone();
    let Some(doc) = out.as_object_mut() else { return out };
    fill(doc, "nodes", Value::Array(Vec::new()));
    fill(doc, "links", Value::Array(Vec::new()));
    if let Some(nodes) = doc.get_mut("nodes").and_then(Value::as_array_mut) {
        for node in nodes.iter_mut().filter_map(Value::as_object_mut) {
            fill(node, "details", Value::String(String::new()));
            fill(node, "inner_text", Value::String(String::new()));
            fill(node, "children", Value::Array(Vec::new()));
        }
    }
    if let Some(links) = doc.get_mut("links").and_then(Value::as_array_mut) {
        for link in links.iter_mut().filter_map(Value::as_object_mut) {
            fill(link, "inner_text", Value::String(String::new()));
        }
    }
    out
}

/// Bring any accepted document to the current schema, or explain why it
/// cannot be loaded. Identity (node uuids) and body shape kind are checked
/// here so the caller gets a precise error rather than a parse failure.
pub fn upgrade(v: &Value) -> Result<Value> {
    if !v.is_object() {
        return Err(Error::InvalidDocument { message: "document is not an object".into() });
    }
    let doc = if validate_document(v) {
        v.clone()
    } else {
        log::info!("upgrading legacy document (24_09_07 transform)");
        transform_24_09_07(v)
    };
    let nodes = doc
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidDocument { message: "nodes is not a list".into() })?;
    for (index, node) in nodes.iter().enumerate() {
        if !is_str(node.get("uuid")) {
            return Err(Error::MissingUuid { index });
        }
        match node.get("body_shape").and_then(|s| s.get("type")).and_then(Value::as_str) {
            Some("Rectangle") => {}
            Some(other) => return Err(Error::UnsupportedShape { shape_type: other.to_string() }),
            None => {
                return Err(Error::InvalidDocument { message: format!("node #{} has no body_shape type", index) })
            }
        }
    }
    if !doc.get("links").map_or(false, Value::is_array) {
        return Err(Error::InvalidDocument { message: "links is not a list".into() });
    }
    Ok(doc)
}
