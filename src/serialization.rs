//! JSON wire contract for the AST.
//!
//! An external parser hands the tree over as nested `{ "kind": TAG, "value": ... }`
//! objects. A `HEADING` value is the record `{ "level", "title", "paragraph" }`.

use crate::ast::{AstNode, AstValue, HeadingRecord, NodeKind};
use crate::error::AstError;
use serde_json::{json, Map, Value};

const KIND_KEY: &str = "kind";
const VALUE_KEY: &str = "value";

impl AstNode {
    /// Decodes an AST from its JSON wire form.
    ///
    /// # Errors
    /// Returns `AstError::UnknownNodeKind` for an unrecognised tag and
    /// `AstError::MalformedAst` for any other structural deviation.
    pub fn from_json(source: &str) -> Result<AstNode, AstError> {
        let value: Value = serde_json::from_str(source).map_err(|e| AstError::InvalidJson {
            reason: e.to_string(),
        })?;
        decode_node(&value)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        encode_node(self)
    }
}

pub(crate) fn decode_node(value: &Value) -> Result<AstNode, AstError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("expected a node object", value))?;

    let tag = object
        .get(KIND_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("node is missing a string `kind`", value))?;
    let kind = NodeKind::from_tag(tag).ok_or_else(|| AstError::UnknownNodeKind {
        kind: tag.to_string(),
    })?;

    let raw = object
        .get(VALUE_KEY)
        .ok_or_else(|| malformed("node is missing `value`", value))?;

    let decoded = match kind {
        NodeKind::Heading => AstValue::Heading(decode_heading(raw)?),
        _ => decode_value(raw)?,
    };
    Ok(AstNode::new(kind, decoded))
}

fn decode_value(raw: &Value) -> Result<AstValue, AstError> {
    match raw {
        Value::String(text) => Ok(AstValue::Text(text.clone())),
        Value::Object(_) => Ok(AstValue::Node(Box::new(decode_node(raw)?))),
        Value::Array(items) => {
            // An empty array is read as an empty node sequence.
            if items.iter().all(Value::is_object) {
                let nodes = items.iter().map(decode_node).collect::<Result<_, _>>()?;
                Ok(AstValue::Nodes(nodes))
            } else if items.iter().all(Value::is_string) {
                let texts = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                Ok(AstValue::Texts(texts))
            } else {
                Err(malformed("sequence mixes nodes and strings", raw))
            }
        }
        _ => Err(malformed("value must be a node, a string or a sequence", raw)),
    }
}

fn decode_heading(raw: &Value) -> Result<HeadingRecord, AstError> {
    let object = raw
        .as_object()
        .ok_or_else(|| malformed("HEADING value must be a record", raw))?;

    let level = object
        .get("level")
        .and_then(Value::as_u64)
        .and_then(|l| u32::try_from(l).ok())
        .ok_or_else(|| malformed("heading record needs a numeric `level`", raw))?;
    if level == 0 {
        return Err(malformed("heading level must be at least 1", raw));
    }

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("heading record needs a string `title`", raw))?
        .to_string();

    let paragraph = match object.get("paragraph") {
        None | Some(Value::Null) => None,
        Some(p) => Some(Box::new(decode_value(p)?)),
    };

    Ok(HeadingRecord {
        level,
        title,
        paragraph,
    })
}

fn encode_node(node: &AstNode) -> Value {
    json!({
        KIND_KEY: node.kind.tag(),
        VALUE_KEY: encode_value(&node.value),
    })
}

fn encode_value(value: &AstValue) -> Value {
    match value {
        AstValue::Node(node) => encode_node(node),
        AstValue::Nodes(nodes) => Value::Array(nodes.iter().map(encode_node).collect()),
        AstValue::Text(text) => Value::String(text.clone()),
        AstValue::Texts(texts) => Value::Array(texts.iter().cloned().map(Value::String).collect()),
        AstValue::Heading(record) => {
            let mut map = Map::new();
            map.insert("level".into(), Value::from(record.level));
            map.insert("title".into(), Value::String(record.title.clone()));
            map.insert(
                "paragraph".into(),
                record
                    .paragraph
                    .as_deref()
                    .map_or(Value::Null, encode_value),
            );
            Value::Object(map)
        }
    }
}

fn malformed(reason: &str, fragment: &Value) -> AstError {
    AstError::MalformedAst {
        reason: reason.to_string(),
        fragment: fragment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_paragraph() {
        let source = r#"{
            "kind": "ROOT",
            "value": [
                { "kind": "PARAGRAPH:BLOCK", "value": [ { "kind": "TEXT:INLINE", "value": "Hello world" } ] }
            ]
        }"#;
        let ast = AstNode::from_json(source).unwrap();
        assert_eq!(
            ast,
            AstNode::root(vec![AstNode::paragraph(vec![AstNode::text("Hello world")])])
        );
    }

    #[test]
    fn test_decode_heading_with_null_paragraph() {
        let source = r#"{
            "kind": "HEADING:BLOCK",
            "value": { "kind": "HEADING", "value": { "level": 1, "title": "Heading", "paragraph": null } }
        }"#;
        let ast = AstNode::from_json(source).unwrap();
        assert_eq!(ast, AstNode::heading(1, "Heading", None));
    }

    #[test]
    fn test_decode_heading_with_inline_paragraph() {
        let source = r#"{
            "kind": "HEADING",
            "value": {
                "level": 1,
                "title": "Heading",
                "paragraph": [ { "kind": "TEXT:INLINE", "value": "This is some text" } ]
            }
        }"#;
        let ast = AstNode::from_json(source).unwrap();
        match &ast.value {
            AstValue::Heading(record) => assert_eq!(
                record.paragraph.as_deref(),
                Some(&AstValue::Nodes(vec![AstNode::text("This is some text")]))
            ),
            other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(AstNode::from_json(&ast.to_json().to_string()).unwrap(), ast);
    }

    #[test]
    fn test_decode_string_sequence() {
        let source = r#"{ "kind": "PARAGRAPH:BLOCK", "value": ["a", "b"] }"#;
        let ast = AstNode::from_json(source).unwrap();
        assert_eq!(
            ast.value,
            AstValue::Texts(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_unknown_kind() {
        let source = r#"{ "kind": "LIST:BLOCK", "value": [] }"#;
        match AstNode::from_json(source) {
            Err(AstError::UnknownNodeKind { kind }) => assert_eq!(kind, "LIST:BLOCK"),
            other => panic!("expected UnknownNodeKind, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_sequence_is_malformed() {
        let source = r#"{ "kind": "ROOT", "value": ["a", { "kind": "TEXT:INLINE", "value": "b" }] }"#;
        assert!(matches!(
            AstNode::from_json(source),
            Err(AstError::MalformedAst { .. })
        ));
    }

    #[test]
    fn test_zero_level_heading_is_malformed() {
        let source = r#"{ "kind": "HEADING", "value": { "level": 0, "title": "T" } }"#;
        assert!(matches!(
            AstNode::from_json(source),
            Err(AstError::MalformedAst { .. })
        ));
    }

    #[test]
    fn test_encode_matches_wire_shape() {
        let ast = AstNode::heading(2, "Sub", Some(AstNode::paragraph(vec![AstNode::text("x")])));
        let expected = json!({
            "kind": "HEADING:BLOCK",
            "value": {
                "kind": "HEADING",
                "value": {
                    "level": 2,
                    "title": "Sub",
                    "paragraph": {
                        "kind": "PARAGRAPH:BLOCK",
                        "value": [ { "kind": "TEXT:INLINE", "value": "x" } ]
                    }
                }
            }
        });
        assert_eq!(ast.to_json(), expected);
    }
}
