//! Presentation of view trees for a host display.
//!
//! The domain only defines the view shape; a `Presenter` is the host side
//! that knows how to build a stack and a label out of its own primitives.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Axis, View};

/// Host adapter for view trees.
pub trait Presenter {
    type Output;

    fn stack(&self, key: &str, axis: Axis, children: Vec<Self::Output>) -> Self::Output;

    fn label(&self, key: &str, text: &str) -> Self::Output;
}

/// Fold a view tree bottom-up through `presenter`, children in order.
pub fn present<P: Presenter>(view: &View, presenter: &P) -> P::Output {
    match view {
        View::Stack {
            key,
            axis,
            children,
        } => {
            let children = children.iter().map(|c| present(c, presenter)).collect();
            presenter.stack(key, *axis, children)
        }
        View::Label { key, text } => presenter.label(key, text),
    }
}

/// Structural outline of the view tree, one node per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlinePresenter;

impl OutlinePresenter {
    #[instrument(level = "debug", skip_all)]
    pub fn to_tree_string(&self, view: &View) -> Tree<String> {
        present(view, self)
    }
}

impl Presenter for OutlinePresenter {
    type Output = Tree<String>;

    fn stack(&self, key: &str, axis: Axis, children: Vec<Tree<String>>) -> Tree<String> {
        let name = match axis {
            Axis::Vertical => "vstack",
        };
        Tree::new(format!("{name} [{key}]")).with_leaves(children)
    }

    fn label(&self, key: &str, text: &str) -> Tree<String> {
        Tree::new(format!("label [{key}] {text:?}"))
    }
}

/// What a user would see: label text, stacked top to bottom.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    type Output = Vec<String>;

    fn stack(&self, _key: &str, axis: Axis, children: Vec<Vec<String>>) -> Vec<String> {
        match axis {
            Axis::Vertical => children.into_iter().flatten().collect(),
        }
    }

    fn label(&self, _key: &str, text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }
}
