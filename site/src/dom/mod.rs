//! Document access for the page layer
//!
//! [`Dom`] is the only way behaviors read or mutate the page. An
//! implementation supplies tree navigation, attributes, classes, styles, text,
//! layout and selector matching; the remaining queries are built on those.
//! [`MemoryDom`] is the in-process implementation, parsed with html5ever and
//! matched with the `selectors` engine through kuchikiki.

mod memory;

pub use memory::MemoryDom;

/// Handle to a node owned by a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

pub trait Dom {
    /// Root document node
    fn document(&self) -> NodeId;
    fn body(&self) -> Option<NodeId>;
    fn head(&self) -> Option<NodeId>;

    fn is_element(&self, node: NodeId) -> bool;
    /// Lowercase tag name of an element
    fn tag_name(&self, node: NodeId) -> String;

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    /// Element children in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// Whether the node is attached to the document
    fn is_connected(&self, node: NodeId) -> bool;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Concatenated text of all descendant text nodes
    fn text(&self, node: NodeId) -> String;
    /// Replace all children with a single text node
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current value of a form control
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    fn create_element(&mut self, tag: &str) -> NodeId;
    fn create_text_node(&mut self, text: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Insert `child` before `reference`, or append when `reference` is `None`
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>);
    /// Detach a node from its parent
    fn remove(&mut self, node: NodeId);

    /// Viewport-relative top edge (`getBoundingClientRect().top`)
    fn bounding_top(&self, node: NodeId) -> f64;
    fn offset_height(&self, node: NodeId) -> f64;

    /// Flip a class, returning whether it is now present
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.document())
            .into_iter()
            .find(|&n| self.attribute(n, "id").as_deref() == Some(id))
    }

    /// Element descendants of `root` in document order, excluding `root`
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// Whether an element matches a CSS selector list
    ///
    /// Invalid selectors match nothing.
    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// Element descendants of `root` matching `selector`, in document order
    fn query_all_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_all_within(self.document(), selector)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_within(root, selector).into_iter().next()
    }

    /// Nearest inclusive ancestor matching `selector`
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.matches(n, selector) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Position among the parent's element children
    fn sibling_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).into_iter().next()
    }
}
