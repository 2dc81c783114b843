//! Decoder for the component wire format.
//!
//! ```text
//! Node           := { "type": TypeName, "id": String, "data": Data(TypeName) }
//! Data("page")   := { "children": [ Node, ... ] }
//! Data("column") := { "elements": [ Node, ... ] }
//! Data("text")   := { "text": String }
//! ```

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::component::{
    ColumnData, Component, ComponentType, Definition, PageData, TextData,
};
use crate::domain::error::DecodeError;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Default nesting limit; the root component is depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest usable nesting limit.
///
/// Each component level costs three levels of JSON nesting (node object,
/// `data` object, child array) and `serde_json` refuses input nested deeper
/// than 127, so 42 component levels is the most any JSON text can carry.
pub const MAX_SUPPORTED_DEPTH: usize = 42;

const DISCRIMINATOR: &str = "type";

/// Decodes untyped JSON into a `Component` tree.
///
/// Recursion depth is tracked explicitly and bounded by `max_depth`, so
/// adversarial nesting fails with `DecodeError::TooDeep` instead of growing
/// the stack without limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Decoder {
    /// The limit is clamped to `1..=MAX_SUPPORTED_DEPTH`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MAX_SUPPORTED_DEPTH),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn decode_str(&self, input: &str) -> DecodeResult<Component> {
        let value: Value = serde_json::from_str(input)?;
        self.decode_value(&value)
    }

    #[instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn decode_slice(&self, input: &[u8]) -> DecodeResult<Component> {
        let value: Value = serde_json::from_slice(input)?;
        self.decode_value(&value)
    }

    pub fn decode_value(&self, value: &Value) -> DecodeResult<Component> {
        let mut path = String::new();
        let component = self.decode_node(value, 1, &mut path)?;
        debug!(
            "decoded {} '{}' ({} nodes)",
            component.component_type(),
            component.id(),
            component.node_count()
        );
        Ok(component)
    }

    /// `path` is a JSON pointer to `value`; it is restored before returning.
    fn decode_node(
        &self,
        value: &Value,
        depth: usize,
        path: &mut String,
    ) -> DecodeResult<Component> {
        if depth > self.max_depth {
            return Err(DecodeError::TooDeep {
                limit: self.max_depth,
                path: path.clone(),
            });
        }

        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::MissingDiscriminator { path: path.clone() })?;
        let tag = discriminator(object, path)?;

        let id = object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(tag, "id", path))?
            .to_string();
        let data = object
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid(tag, "data", path))?;

        let component = match tag {
            ComponentType::Page => {
                let children = self.decode_sequence(tag, data, "data.children", depth, path)?;
                Component::Page(Definition { id, data: PageData { children } })
            }
            ComponentType::Column => {
                let elements = self.decode_sequence(tag, data, "data.elements", depth, path)?;
                Component::Column(Definition { id, data: ColumnData { elements } })
            }
            ComponentType::Text => {
                let text = data
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid(tag, "data.text", path))?
                    .to_string();
                Component::Text(Definition { id, data: TextData { text } })
            }
        };
        Ok(component)
    }

    fn decode_sequence(
        &self,
        tag: ComponentType,
        data: &Map<String, Value>,
        field: &'static str,
        depth: usize,
        path: &mut String,
    ) -> DecodeResult<Vec<Component>> {
        let key = field.trim_start_matches("data.");
        let items = data
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| invalid(tag, field, path))?;

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let len = path.len();
            path.push_str(&format!("/data/{key}/{i}"));
            let child = self.decode_node(item, depth + 1, path);
            path.truncate(len);
            out.push(child?);
        }
        Ok(out)
    }
}

fn discriminator(object: &Map<String, Value>, path: &str) -> DecodeResult<ComponentType> {
    match object.get(DISCRIMINATOR) {
        None | Some(Value::Null) => Err(DecodeError::MissingDiscriminator {
            path: path.to_string(),
        }),
        Some(Value::String(s)) => s.parse().map_err(|_| DecodeError::UnknownType {
            value: s.clone(),
            path: path.to_string(),
        }),
        Some(other) => Err(DecodeError::UnknownType {
            value: other.to_string(),
            path: path.to_string(),
        }),
    }
}

fn invalid(tag: ComponentType, field: &'static str, path: &str) -> DecodeError {
    DecodeError::InvalidPayload {
        tag,
        field,
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_text() {
        let c = Decoder::default()
            .decode_value(&json!({"type": "text", "id": "t1", "data": {"text": "hello"}}))
            .unwrap();
        assert_eq!(c, Component::text("t1", "hello"));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let c = Decoder::default()
            .decode_value(&json!({
                "type": "text", "id": "t1", "extra": 1,
                "data": {"text": "hello", "style": "bold"}
            }))
            .unwrap();
        assert_eq!(c, Component::text("t1", "hello"));
    }

    #[test]
    fn test_null_discriminator_is_missing() {
        let err = Decoder::default()
            .decode_value(&json!({"type": null, "id": "x", "data": {}}))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingDiscriminator { .. }));
    }

    #[test]
    fn test_non_string_discriminator_is_unknown_type() {
        let err = Decoder::default()
            .decode_value(&json!({"type": 5, "id": "x", "data": {}}))
            .unwrap_err();
        match err {
            DecodeError::UnknownType { value, path } => {
                assert_eq!(value, "5");
                assert_eq!(path, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_path_points_at_nested_node() {
        let err = Decoder::default()
            .decode_value(&json!({
                "type": "page", "id": "p1",
                "data": {"children": [
                    {"type": "text", "id": "t1", "data": {"text": "ok"}},
                    {"type": "column", "id": "c1", "data": {"elements": [
                        {"type": "text", "id": "t2", "data": {}}
                    ]}}
                ]}
            }))
            .unwrap_err();
        assert_eq!(err.path(), Some("/data/children/1/data/elements/0"));
        assert!(matches!(
            err,
            DecodeError::InvalidPayload {
                tag: ComponentType::Text,
                field: "data.text",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let decoder = Decoder::new(0);
        assert_eq!(decoder.max_depth(), 1);
        assert!(decoder
            .decode_value(&json!({"type": "text", "id": "t", "data": {"text": ""}}))
            .is_ok());
    }

    #[test]
    fn test_limit_above_ceiling_is_lowered() {
        assert_eq!(Decoder::new(64).max_depth(), MAX_SUPPORTED_DEPTH);
        assert_eq!(Decoder::new(usize::MAX).max_depth(), MAX_SUPPORTED_DEPTH);
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let doc = json!({
            "type": "page", "id": "p",
            "data": {"children": [{"type": "text", "id": "t", "data": {"text": "x"}}]}
        });
        assert!(Decoder::new(2).decode_value(&doc).is_ok());
        let err = Decoder::new(1).decode_value(&doc).unwrap_err();
        match err {
            DecodeError::TooDeep { limit, path } => {
                assert_eq!(limit, 1);
                assert_eq!(path, "/data/children/0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = Decoder::default().decode_str("{\"type\": ").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
        assert_eq!(err.path(), None);
    }
}
