//! Heading tree construction and compression.
//!
//! Headings arrive as a flat, ordered sequence whose levels may skip
//! arbitrarily (a level-2 heading directly followed by a level-4 one). The
//! builder reconstructs a tree in which every edge descends exactly one
//! level, synthesizing empty placeholder nodes across skips so real
//! headings keep their semantic depth.

use serde::Serialize;

/// One heading marker observed in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingOccurrence {
    /// Nesting level as written in the document (1-6 for real headings).
    pub level: u8,
    /// Inline text content.
    pub text: String,
    /// Generated anchor id.
    pub id: String,
}

/// Index of a node inside the [`HeadingTree`] arena.
type NodeId = usize;

const ROOT: NodeId = 0;

/// Working tree node. Parent links are arena indices used only for upward
/// traversal during construction, never ownership.
#[derive(Debug)]
struct HeaderNode {
    id: String,
    text: String,
    level: u8,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl HeaderNode {
    fn placeholder(level: u8, parent: NodeId) -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            level,
            parent: Some(parent),
            children: Vec::new(),
        }
    }
}

/// Arena-backed working tree with a synthetic level-0 root.
///
/// Built once per document and discarded after [`HeadingTree::compress`].
#[derive(Debug)]
pub struct HeadingTree {
    nodes: Vec<HeaderNode>,
}

impl HeadingTree {
    fn new() -> Self {
        Self {
            nodes: vec![HeaderNode {
                id: String::new(),
                text: String::new(),
                level: 0,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn level(&self, node: NodeId) -> u8 {
        self.nodes[node].level
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    fn attach(&mut self, parent: NodeId, node: HeaderNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Project the working tree into serializable [`Header`]s.
    ///
    /// Drops levels, parent links, and the synthetic root; child order is
    /// preserved exactly. Recursion depth is bounded by tree depth.
    pub fn compress(&self) -> Vec<Header> {
        self.compress_children(ROOT)
    }

    fn compress_children(&self, node: NodeId) -> Vec<Header> {
        self.nodes[node]
            .children
            .iter()
            .map(|&child| Header {
                id: self.nodes[child].id.clone(),
                text: self.nodes[child].text.clone(),
                children: self.compress_children(child),
            })
            .collect()
    }
}

/// Serializable heading tree node: id, text, and ordered children only.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Header {
    /// Anchor id; empty for synthesized placeholder nodes.
    pub id: String,
    /// Heading text; empty for synthesized placeholder nodes.
    pub text: String,
    /// Child headings in document order.
    pub children: Vec<Header>,
}

/// Build the working tree from ordered heading occurrences.
///
/// For each occurrence the builder compares its level against the current
/// node. A non-positive difference walks the parent chain up to the nearest
/// ancestor whose level is strictly lower; consecutive same-level headings
/// find their common parent through that walk, never by sibling comparison.
/// The positive difference then becomes a chain of nodes where only the
/// terminal one carries the occurrence's id, text, and level.
///
/// An occurrence whose level leaves no valid ancestor ends the build: it and
/// every occurrence after it are dropped from the tree, with a single
/// warning logged.
pub fn build_heading_tree(occurrences: &[HeadingOccurrence]) -> HeadingTree {
    let mut tree = HeadingTree::new();
    let mut current = ROOT;

    for (index, occurrence) in occurrences.iter().enumerate() {
        let mut attach = current;
        if occurrence.level <= tree.level(attach) {
            attach = loop {
                match tree.parent(attach) {
                    Some(parent) if tree.level(parent) < occurrence.level => break parent,
                    Some(parent) => attach = parent,
                    None => {
                        log::warn!(
                            "heading {:?} (level {}) has no valid ancestor; dropping {} remaining heading(s)",
                            occurrence.text,
                            occurrence.level,
                            occurrences.len() - index
                        );
                        return tree;
                    }
                }
            };
        }

        // Chain of `diff` nodes between the attachment point and the
        // occurrence; intermediates exist purely for structural continuity.
        let diff = occurrence.level - tree.level(attach);
        for step in 1..=diff {
            let level = tree.level(attach) + 1;
            let node = if step == diff {
                HeaderNode {
                    id: occurrence.id.clone(),
                    text: occurrence.text.clone(),
                    level: occurrence.level,
                    parent: Some(attach),
                    children: Vec::new(),
                }
            } else {
                HeaderNode::placeholder(level, attach)
            };
            attach = tree.attach(attach, node);
        }
        current = attach;
    }

    tree
}
