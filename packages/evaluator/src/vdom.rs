use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attributes and styles are ordered maps so the same tree always
/// serializes to the same markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Stable identity for hosts that reconcile (block id on block boxes)
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    /// Text node
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        if let VNode::Element { ref mut styles, .. } = self {
            for (key, value) in entries {
                styles.insert(key.into(), value.into());
            }
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append a child only when `condition` holds
    pub fn with_child_if(self, condition: bool, child: impl FnOnce() -> VNode) -> Self {
        if condition {
            self.with_child(child())
        } else {
            self
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|part| part == class))
            .unwrap_or(false)
    }

    /// First node (depth-first, self included) carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&VNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find_by_class(class))
    }

    pub fn find_all_by_class<'a>(&'a self, class: &str, out: &mut Vec<&'a VNode>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all_by_class(class, out);
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }

    /// Structural equality: same tags, same attribute and style keys, same
    /// child shapes. Text content and attribute/style values are
    /// ignored.
    pub fn same_shape(&self, other: &VNode) -> bool {
        match (self, other) {
            (VNode::Text { .. }, VNode::Text { .. }) => true,
            (
                VNode::Element {
                    tag: a_tag,
                    attributes: a_attrs,
                    styles: a_styles,
                    children: a_children,
                    ..
                },
                VNode::Element {
                    tag: b_tag,
                    attributes: b_attrs,
                    styles: b_styles,
                    children: b_children,
                    ..
                },
            ) => {
                a_tag == b_tag
                    && a_attrs.keys().eq(b_attrs.keys())
                    && a_styles.keys().eq(b_styles.keys())
                    && a_children.len() == b_children.len()
                    && a_children
                        .iter()
                        .zip(b_children)
                        .all(|(a, b)| a.same_shape(b))
            }
            _ => false,
        }
    }
}

/// Virtual Document (collection of root nodes with metadata)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub nodes: Vec<VNode>,
    pub styles: Vec<CssRule>,
}

/// CSS Rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub properties: BTreeMap<String, String>,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    pub fn add_style<K, V>(
        &mut self,
        selector: impl Into<String>,
        properties: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        self.styles.push(CssRule {
            selector: selector.into(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
    }

    /// Structural equality across all root nodes and style selectors
    pub fn same_shape(&self, other: &VirtualDomDocument) -> bool {
        self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| a.same_shape(b))
            && self
                .styles
                .iter()
                .map(|r| &r.selector)
                .eq(other.styles.iter().map(|r| &r.selector))
    }
}

impl Default for VirtualDomDocument {
    fn default() -> Self {
        Self::new()
    }
}
