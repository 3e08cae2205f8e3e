//! Sink for converting parser events into an owned tree.

use crate::error::ParseError;
use crate::node::{Element, Node};
use crate::parser::event::Event;
use crate::tag::Tag;

/// An element still waiting for its closing tag.
struct Frame {
    element: Element,
    offset: usize,
}

/// Builds the tree from events, checking that tags nest properly.
pub struct Sink {
    events: Vec<Event>,
    stack: Vec<Frame>,
}

impl Sink {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            stack: vec![Frame {
                element: Element::root(Vec::new()),
                offset: 0,
            }],
        }
    }

    /// Consume the sink and build the document root.
    pub fn finish(mut self) -> Result<Element, ParseError> {
        let events = std::mem::take(&mut self.events);
        for event in events {
            match event {
                Event::Open {
                    tag,
                    attrs,
                    self_closing,
                    offset,
                } => {
                    let element = Element {
                        tag,
                        attrs,
                        children: Vec::new(),
                    };
                    if tag.is_void() || self_closing {
                        self.push_child(element.into());
                    } else {
                        self.stack.push(Frame { element, offset });
                    }
                }
                Event::Text(text) => self.push_text(text),
                Event::Close { tag, offset } => self.close(tag, offset)?,
            }
        }

        if self.stack.len() > 1
            && let Some(frame) = self.stack.pop()
        {
            return Err(ParseError::UnclosedTag {
                offset: frame.offset,
                name: frame.element.tag.name().to_string(),
            });
        }
        Ok(self
            .stack
            .pop()
            .map(|frame| frame.element)
            .unwrap_or_else(|| Element::root(Vec::new())))
    }

    fn close(&mut self, tag: Tag, offset: usize) -> Result<(), ParseError> {
        if self.stack.len() <= 1 || tag.is_void() {
            return Err(ParseError::StrayClosingTag {
                offset,
                name: tag.name().to_string(),
            });
        }
        let open = self.stack.last().map(|f| f.element.tag);
        if open != Some(tag) {
            return Err(ParseError::UnbalancedTag {
                offset,
                expected: open.map(|t| t.name()).unwrap_or_default().to_string(),
                found: tag.name().to_string(),
            });
        }
        if let Some(frame) = self.stack.pop() {
            self.push_child(frame.element.into());
        }
        Ok(())
    }

    fn current(&mut self) -> &mut Element {
        let last = self.stack.len() - 1;
        &mut self.stack[last].element
    }

    fn push_child(&mut self, node: Node) {
        self.current().children.push(node);
    }

    /// Appends text, merging with a directly preceding text node.
    fn push_text(&mut self, text: String) {
        let children = &mut self.current().children;
        match children.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(&text),
            _ => children.push(Node::Text(text)),
        }
    }
}
