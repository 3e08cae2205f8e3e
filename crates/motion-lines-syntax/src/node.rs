//! Owned rich text tree.
//!
//! A document is a [`Tag::Root`] element owning its children. Every node has
//! exactly one owner, so transformations always build new trees instead of
//! patching shared ones.

use crate::tag::Tag;

/// A node of the rich text tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Entity-decoded character data.
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(s: impl Into<String>) -> Node {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            Node::Element(_) => None,
        }
    }

    /// The tag of an element node, `None` for text.
    pub fn tag(&self) -> Option<Tag> {
        self.as_element().map(|el| el.tag)
    }

    /// True for text nodes made of whitespace only (including empty ones).
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(s) if s.chars().all(char::is_whitespace))
    }

    /// Concatenated character data of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A document fragment owning `children`.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            tag: Tag::Root,
            attrs: Vec::new(),
            children,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this element without its children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag,
            attrs: self.attrs.clone(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Appends a CSS class unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", value);
    }

    /// Removes a CSS class; drops the attribute once no class is left.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = remaining.join(" ");
            self.set_attr("class", joined);
        }
    }

    /// True if `child` is preceded only by whitespace text among `self.children`.
    pub fn is_first_nonempty_child(&self, index: usize) -> bool {
        self.children
            .iter()
            .take(index)
            .all(|c| matches!(c, Node::Text(s) if s.trim().is_empty()))
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_and_remove_classes() {
        let mut el = Element::new(Tag::P).with_attr("class", "a");
        el.add_class("b");
        el.add_class("b");
        assert_eq!(el.attr("class"), Some("a b"));

        el.remove_class("a");
        assert_eq!(el.attr("class"), Some("b"));
        el.remove_class("b");
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn set_attr_keeps_position() {
        let mut el = Element::new(Tag::Ol)
            .with_attr("start", "1")
            .with_attr("class", "x");
        el.set_attr("start", "4");
        assert_eq!(
            el.attrs,
            vec![
                ("start".to_string(), "4".to_string()),
                ("class".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn first_nonempty_child_skips_whitespace() {
        let el = Element::new(Tag::Ul).with_children(vec![
            Node::text("\n  "),
            Element::new(Tag::Li).into(),
            Element::new(Tag::Li).into(),
        ]);
        assert!(el.is_first_nonempty_child(0));
        assert!(el.is_first_nonempty_child(1));
        assert!(!el.is_first_nonempty_child(2));
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let el = Element::new(Tag::P).with_children(vec![
            Node::text("Hello "),
            Element::new(Tag::Strong)
                .with_children(vec![Node::text("world")])
                .into(),
        ]);
        assert_eq!(el.text_content(), "Hello world");
    }
}
