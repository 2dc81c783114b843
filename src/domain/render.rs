//! Component → view rendering.

use crate::domain::component::Component;
use crate::domain::view::{Axis, View};

/// Render a component tree into a view tree.
///
/// Pure and total: every component has exactly one view shape. `page` and
/// `column` both become vertical stacks, `text` becomes a label showing its
/// string verbatim.
pub fn render(component: &Component) -> View {
    match component {
        Component::Page(def) => stack(&def.id, &def.data.children),
        Component::Column(def) => stack(&def.id, &def.data.elements),
        Component::Text(def) => View::Label {
            key: def.id.clone(),
            text: def.data.text.clone(),
        },
    }
}

fn stack(id: &str, children: &[Component]) -> View {
    View::Stack {
        key: id.to_string(),
        axis: Axis::Vertical,
        children: children.iter().map(render).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_is_verbatim() {
        let view = render(&Component::text("t1", "  <b>hello</b>\n"));
        assert_eq!(view.text(), Some("  <b>hello</b>\n"));
        assert_eq!(view.key(), "t1");
    }

    #[test]
    fn test_render_empty_page_is_empty_stack() {
        let view = render(&Component::page("p1", vec![]));
        assert_eq!(
            view,
            View::Stack {
                key: "p1".into(),
                axis: Axis::Vertical,
                children: vec![]
            }
        );
    }

    #[test]
    fn test_render_keeps_child_order_and_keys() {
        let column = Component::column(
            "c1",
            vec![
                Component::text("b", "second"),
                Component::text("a", "first"),
                Component::page("p", vec![]),
            ],
        );
        let view = render(&column);
        let keys: Vec<&str> = view.children().iter().map(View::key).collect();
        assert_eq!(keys, vec!["b", "a", "p"]);
        assert_eq!(view.depth(), column.depth());
    }
}
