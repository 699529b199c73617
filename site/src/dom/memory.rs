//! html5ever-backed document used for headless runs and tests.

use std::collections::HashMap;

use html5ever::{namespace_url, ns, LocalName, QualName};
use kuchikiki::traits::*;
use kuchikiki::{ElementData, Node, NodeRef, Selectors};
use tracing::warn;

use super::{Dom, NodeId};
use crate::error::SiteError;

/// Parsed document tree with stable node handles
///
/// Every node reachable from the parse or created afterwards gets a
/// [`NodeId`]. Nodes are never freed; removed nodes are detached and stay
/// addressable. Form values and layout boxes are kept beside the tree since
/// markup has no place for them.
pub struct MemoryDom {
    document: NodeRef,
    nodes: Vec<NodeRef>,
    index: HashMap<usize, NodeId>,
    values: HashMap<NodeId, String>,
    layout: HashMap<NodeId, (f64, f64)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new() -> Self {
        Self::parse("")
    }

    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        let document = kuchikiki::parse_html().one(html);
        let mut dom = Self {
            document: document.clone(),
            nodes: Vec::new(),
            index: HashMap::new(),
            values: HashMap::new(),
            layout: HashMap::new(),
        };
        for node in document.inclusive_descendants() {
            dom.register(node);
        }
        dom
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text_node(text);
        self.append_child(parent, node);
        node
    }

    /// Set the layout box reported by `bounding_top` and `offset_height`
    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64) {
        if self.is_element(node) {
            self.layout.insert(node, (top, height));
        }
    }

    fn register(&mut self, node: NodeRef) -> NodeId {
        let key = key(&node);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(key, id);
        id
    }

    fn node(&self, node: NodeId) -> Option<&NodeRef> {
        self.nodes.get(node.0)
    }

    fn id_of(&self, node: &NodeRef) -> Option<NodeId> {
        self.index.get(&key(node)).copied()
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.node(node)?.as_element()
    }

    fn styles(&self, node: NodeId) -> Vec<(String, String)> {
        self.attribute(node, "style")
            .map(|style| parse_style(&style))
            .unwrap_or_default()
    }

    fn write_styles(&mut self, node: NodeId, styles: &[(String, String)]) {
        if styles.is_empty() {
            self.remove_attribute(node, "style");
        } else {
            let style = styles
                .iter()
                .map(|(p, v)| format!("{}: {};", p, v))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attribute(node, "style", &style);
        }
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|class| class.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn write_classes(&mut self, node: NodeId, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attribute(node, "class");
        } else {
            self.set_attribute(node, "class", &classes.join(" "));
        }
    }
}

/// Identity of a node for the handle index
fn key(node: &NodeRef) -> usize {
    let node: &Node = node;
    node as *const Node as usize
}

fn compile(selector: &str) -> Option<Selectors> {
    match Selectors::compile(selector) {
        Ok(selectors) => Some(selectors),
        Err(()) => {
            warn!(
                "{}",
                SiteError::Selector {
                    selector: selector.to_string()
                }
            );
            None
        }
    }
}

/// `prop: value;` declarations in source order
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(p, v)| (p.trim().to_string(), v.trim().to_string()))
        .filter(|(p, _)| !p.is_empty())
        .collect()
}

impl Dom for MemoryDom {
    fn document(&self) -> NodeId {
        NodeId(0)
    }

    fn body(&self) -> Option<NodeId> {
        self.query_selector("body")
    }

    fn head(&self) -> Option<NodeId> {
        self.query_selector("head")
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.name.local.to_ascii_lowercase().to_string())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.id_of(&self.node(node)?.parent()?)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(node) else {
            return Vec::new();
        };
        node.children()
            .elements()
            .filter_map(|el| self.id_of(el.as_node()))
            .collect()
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.node(node)
            .and_then(|n| n.inclusive_ancestors().last())
            .is_some_and(|root| root == self.document)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = self.element(node)?;
        let attributes = el.attributes.borrow();
        attributes.get(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let value = if name == "class" {
            let mut classes: Vec<&str> = Vec::new();
            for class in value.split_whitespace() {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
            classes.join(" ")
        } else {
            value.to_string()
        };
        if name == "value" {
            self.values.insert(node, value.clone());
        }
        if let Some(el) = self.element(node) {
            el.attributes.borrow_mut().insert(name, value);
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element(node) {
            el.attributes.borrow_mut().remove(name);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let mut classes = self.classes(node);
        if self.is_element(node) && !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.write_classes(node, &classes);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let mut classes = self.classes(node);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.write_classes(node, &classes);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.styles(node)
            .into_iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if !self.is_element(node) {
            return;
        }
        let mut styles = self.styles(node);
        if value.is_empty() {
            styles.retain(|(p, _)| p != property);
        } else if let Some(entry) = styles.iter_mut().find(|(p, _)| p == property) {
            entry.1 = value.to_string();
        } else {
            styles.push((property.to_string(), value.to_string()));
        }
        self.write_styles(node, &styles);
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).map(NodeRef::text_contents).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let Some(target) = self.node(node).cloned() else {
            return;
        };
        if let Some(existing) = target.as_text() {
            *existing.borrow_mut() = text.to_string();
            return;
        }
        if target.as_element().is_none() {
            return;
        }
        let children: Vec<NodeRef> = target.children().collect();
        for child in children {
            child.detach();
        }
        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            self.append_child(node, text_node);
        }
    }

    fn value(&self, node: NodeId) -> String {
        if let Some(value) = self.values.get(&node) {
            return value.clone();
        }
        if self.tag_name(node) == "textarea" {
            return self.text(node);
        }
        self.attribute(node, "value").unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if self.is_element(node) {
            self.values.insert(node, value.to_string());
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag.to_ascii_lowercase()));
        self.register(NodeRef::new_element(name, None))
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.register(NodeRef::new_text(text))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let (Some(parent_node), Some(child_node)) = (self.node(parent), self.node(child)) else {
            return;
        };
        if parent == child || parent_node.inclusive_ancestors().any(|a| &a == child_node) {
            return;
        }
        let reference = reference
            .and_then(|r| self.node(r))
            .filter(|r| r.parent().as_ref() == Some(parent_node));
        match reference {
            Some(reference) => reference.insert_before(child_node.clone()),
            None => parent_node.append(child_node.clone()),
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(node) = self.node(node) {
            node.detach();
        }
    }

    fn bounding_top(&self, node: NodeId) -> f64 {
        self.layout.get(&node).map(|&(top, _)| top).unwrap_or_default()
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.layout.get(&node).map(|&(_, height)| height).unwrap_or_default()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let Some(element) = self.node(node).and_then(|n| n.clone().into_element_ref()) else {
            return false;
        };
        compile(selector).is_some_and(|selectors| selectors.matches(&element))
    }

    fn query_all_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let (Some(root), Some(selectors)) = (self.node(root), compile(selector)) else {
            return Vec::new();
        };
        root.descendants()
            .elements()
            .filter(|el| selectors.matches(el))
            .filter_map(|el| self.id_of(el.as_node()))
            .collect()
    }
}
