//! Arena-backed document tree parsed from disclosure XML.
//!
//! Vendor feeds disagree on element vocabulary but all reduce to a
//! labeled tree of tag names and text. The tree is stored as a flat
//! node arena with a derived child-to-parent index, so extraction
//! passes can walk both down and up without reference cycles.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::DocumentError;

/// Stable handle to a node in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// A parsed disclosure document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    parents: Vec<Option<NodeId>>,
}

impl Document {
    /// Parse a document from XML text.
    ///
    /// Stray 0x1A control bytes seen in mainframe exports are stripped
    /// before parsing. Whitespace-only text is dropped and remaining
    /// text is stored trimmed.
    pub fn parse(content: &str) -> std::result::Result<Self, DocumentError> {
        let content = content.replace('\u{1a}', "");
        let mut reader = Reader::from_str(&content);
        reader.trim_text(true);

        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut root: Option<usize> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(start)) => {
                    let id = Self::open_node(&mut nodes, &stack, &mut root, &start)?;
                    stack.push(id);
                }
                Ok(Event::Empty(start)) => {
                    Self::open_node(&mut nodes, &stack, &mut root, &start)?;
                }
                Ok(Event::Text(text)) => {
                    let value = text
                        .unescape()
                        .map_err(|e| DocumentError::Encoding(e.to_string()))?;
                    Self::append_text(&mut nodes, &stack, value.trim());
                }
                Ok(Event::CData(data)) => {
                    let value = String::from_utf8_lossy(&data).into_owned();
                    Self::append_text(&mut nodes, &stack, value.trim());
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(DocumentError::Malformed(e.to_string())),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocumentError::Malformed(
                "unclosed element at end of input".to_string(),
            ));
        }
        let root = root.ok_or(DocumentError::NoRoot)?;

        // Child links are complete once parsing finishes; derive the
        // upward index in a single pass over the arena.
        let mut parents = vec![None; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            for child in &node.children {
                parents[child.0] = Some(NodeId(index));
            }
        }

        Ok(Self {
            nodes,
            root: NodeId(root),
            parents,
        })
    }

    fn open_node(
        nodes: &mut Vec<Node>,
        stack: &[usize],
        root: &mut Option<usize>,
        start: &BytesStart<'_>,
    ) -> std::result::Result<usize, DocumentError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let id = nodes.len();
        if let Some(&parent) = stack.last() {
            nodes[parent].children.push(NodeId(id));
        } else if root.is_some() {
            return Err(DocumentError::Malformed(format!(
                "unexpected second root element <{}>",
                tag
            )));
        } else {
            *root = Some(id);
        }
        nodes.push(Node {
            tag,
            text: None,
            children: Vec::new(),
        });
        Ok(id)
    }

    fn append_text(nodes: &mut [Node], stack: &[usize], value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(&current) = stack.last() {
            match &mut nodes[current].text {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(value);
                }
                None => nodes[current].text = Some(value.to_string()),
            }
        }
    }

    /// Root element of the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Tag name of a node.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Trimmed text of a node, if any non-empty text was present.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    /// Direct children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Ancestors of a node from its parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: self.parent(id),
        }
    }

    /// Descendants of a node in document order, the node itself excluded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// A node and its descendants in document order.
    pub fn subtree(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// First direct child with the given tag.
    pub fn child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.tag(child) == tag)
    }

    /// Trimmed non-empty text of the first direct child with the given tag.
    pub fn child_text(&self, id: NodeId, tag: &str) -> Option<&str> {
        self.child(id, tag)
            .and_then(|child| self.text(child))
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// First descendant with the given tag, in document order.
    pub fn descendant(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id).find(|&node| self.tag(node) == tag)
    }

    /// Trimmed non-empty text of the first descendant with the given tag.
    pub fn descendant_text(&self, id: NodeId, tag: &str) -> Option<&str> {
        self.descendant(id, tag)
            .and_then(|node| self.text(node))
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.doc.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.doc.children(id);
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}
