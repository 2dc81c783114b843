//! Host-neutral view tree produced by the renderer.

use serde::Serialize;

/// Layout direction of a stack container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
}

/// A displayable node: either a container with ordered children or a leaf
/// showing literal text. `key` is the id of the component it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum View {
    Stack {
        key: String,
        axis: Axis,
        children: Vec<View>,
    },
    Label {
        key: String,
        text: String,
    },
}

impl View {
    pub fn key(&self) -> &str {
        match self {
            View::Stack { key, .. } | View::Label { key, .. } => key,
        }
    }

    pub fn children(&self) -> &[View] {
        match self {
            View::Stack { children, .. } => children,
            View::Label { .. } => &[],
        }
    }

    /// Text shown by a label; `None` for containers.
    pub fn text(&self) -> Option<&str> {
        match self {
            View::Label { text, .. } => Some(text),
            View::Stack { .. } => None,
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(View::depth).max().unwrap_or(0)
    }
}
