//! Component tree: the typed form of a server-driven UI document.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Closed set of recognized component types.
///
/// `ALL` together with `as_str` is the only mapping between wire
/// discriminators and tags; the decoder and `FromStr` both go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Page,
    Column,
    Text,
}

impl ComponentType {
    pub const ALL: [ComponentType; 3] = [
        ComponentType::Page,
        ComponentType::Column,
        ComponentType::Text,
    ];

    /// Wire name of the discriminator value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Page => "page",
            ComponentType::Column => "column",
            ComponentType::Text => "text",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a discriminator is not one of `ComponentType::ALL`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown component type: {0}")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

/// Envelope shared by every component: identity plus type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition<D> {
    pub id: String,
    pub data: D,
}

impl<D> Definition<D> {
    pub fn new(id: impl Into<String>, data: D) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Payload of a `page`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageData {
    pub children: Vec<Component>,
}

/// Payload of a `column`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnData {
    pub elements: Vec<Component>,
}

/// Payload of a `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextData {
    pub text: String,
}

/// A node of the UI tree.
///
/// Each variant owns its children exclusively; trees are immutable once
/// decoded. Serializes back to the wire shape
/// `{"type": .., "id": .., "data": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Page(Definition<PageData>),
    Column(Definition<ColumnData>),
    Text(Definition<TextData>),
}

impl Component {
    pub fn page(id: impl Into<String>, children: Vec<Component>) -> Self {
        Component::Page(Definition::new(id, PageData { children }))
    }

    pub fn column(id: impl Into<String>, elements: Vec<Component>) -> Self {
        Component::Column(Definition::new(id, ColumnData { elements }))
    }

    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Component::Text(Definition::new(id, TextData { text: text.into() }))
    }

    pub fn id(&self) -> &str {
        match self {
            Component::Page(def) => &def.id,
            Component::Column(def) => &def.id,
            Component::Text(def) => &def.id,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::Page(_) => ComponentType::Page,
            Component::Column(_) => ComponentType::Column,
            Component::Text(_) => ComponentType::Text,
        }
    }

    /// Ordered children of a container; empty for leaves.
    pub fn children(&self) -> &[Component] {
        match self {
            Component::Page(def) => &def.data.children,
            Component::Column(def) => &def.data.elements,
            Component::Text(_) => &[],
        }
    }

    /// Number of levels in the tree rooted here (a lone leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Component::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Component::node_count)
            .sum::<usize>()
    }

    /// Pre-order iterator over this component and all descendants.
    pub fn iter(&self) -> ComponentIter<'_> {
        ComponentIter { stack: vec![self] }
    }
}

/// Pre-order traversal, children visited in document order.
pub struct ComponentIter<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for ComponentIter<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Component {
        Component::page(
            "p1",
            vec![
                Component::column(
                    "c1",
                    vec![Component::text("t1", "a"), Component::text("t2", "b")],
                ),
                Component::text("t3", "c"),
            ],
        )
    }

    #[test]
    fn test_component_type_from_str() {
        assert_eq!("page".parse::<ComponentType>().unwrap(), ComponentType::Page);
        assert_eq!(
            "column".parse::<ComponentType>().unwrap(),
            ComponentType::Column
        );
        assert_eq!("text".parse::<ComponentType>().unwrap(), ComponentType::Text);
        assert_eq!(
            "Page".parse::<ComponentType>(),
            Err(UnknownComponentType("Page".to_string()))
        );
    }

    #[test]
    fn test_unknown_component_type_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(UnknownComponentType("button".into()));
        assert_eq!(err.to_string(), "unknown component type: button");
    }

    #[test]
    fn test_component_type_round_trips_through_table() {
        for t in ComponentType::ALL {
            assert_eq!(t.as_str().parse::<ComponentType>().unwrap(), t);
        }
    }

    #[test]
    fn test_depth_and_node_count() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(Component::text("t", "x").depth(), 1);
        assert_eq!(Component::page("p", vec![]).depth(), 1);
    }

    #[test]
    fn test_iter_is_preorder_in_document_order() {
        let tree = sample();
        let ids: Vec<&str> = tree.iter().map(Component::id).collect();
        assert_eq!(ids, vec!["p1", "c1", "t1", "t2", "t3"]);
    }

    #[test]
    fn test_serialize_matches_wire_shape() {
        let value = serde_json::to_value(Component::column(
            "c1",
            vec![Component::text("t1", "hello")],
        ))
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "column",
                "id": "c1",
                "data": {
                    "elements": [
                        {"type": "text", "id": "t1", "data": {"text": "hello"}}
                    ]
                }
            })
        );
    }
}
