//! The node contract shared by every AST type, and the keyed container
//! composite nodes keep their optional sub-nodes in.

use core::fmt;

use crate::format::{FormatFrame, FormatSettings, FormatState};

/// A tree element of a parsed statement.
///
/// Nodes own their children outright, so `Clone` on any node type is a deep
/// copy that shares nothing with the source tree.
pub trait Node: fmt::Debug {
    /// Deterministic structural key, stable for equal content.
    ///
    /// Never contains credentials.
    fn identity(&self, delimiter: char) -> String;

    /// The owned child nodes, in traversal order.
    fn children(&self) -> Vec<&dyn Node>;

    /// Writes the canonical SQL text of this node to `out`.
    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    );

    /// Formats this node with `settings` from a fresh state and frame.
    fn to_sql_with(&self, settings: &FormatSettings) -> String {
        let mut out = String::new();
        let mut state = FormatState::default();
        self.format(settings, &mut state, FormatFrame::default(), &mut out);
        out
    }

    /// Formats this node with the default settings.
    fn to_sql(&self) -> String {
        self.to_sql_with(&FormatSettings::default())
    }

    /// Identity of this node followed by the tree identities of its
    /// children: `id(child1, child2)`.
    fn tree_identity(&self, delimiter: char) -> String {
        let mut id = self.identity(delimiter);
        let children = self.children();
        if !children.is_empty() {
            id.push('(');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    id.push_str(", ");
                }
                id.push_str(&child.tree_identity(delimiter));
            }
            id.push(')');
        }
        id
    }

    /// One line per node, each indented by its depth.
    fn dump_tree(&self) -> String {
        let mut out = String::new();
        dump_into(self.identity(' '), &self.children(), 0, &mut out);
        out
    }
}

fn dump_into(id: String, children: &[&dyn Node], depth: usize, out: &mut String) {
    out.push_str(&"-".repeat(depth * 2));
    out.push_str(&id);
    out.push('\n');
    for child in children {
        dump_into(child.identity(' '), &child.children(), depth + 1, out);
    }
}

/// A typed optional sub-node of a composite node.
///
/// Each enum variant names the slot it occupies; a container holds at most
/// one part per slot.
pub trait Part: Clone + fmt::Debug {
    /// The slot key. Its ordering is the order parts are kept and
    /// traversed in.
    type Slot: Copy + Ord + fmt::Debug;

    /// The slot this part occupies.
    fn slot(&self) -> Self::Slot;

    /// The part's node.
    fn as_node(&self) -> &dyn Node;
}

/// Single source of truth for a node's optional sub-nodes.
///
/// Typed accessors on the owning node are views over this container, and
/// [`Node::children`] enumerates it, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Children<P: Part> {
    /// Sorted by slot, at most one entry per slot.
    parts: Vec<P>,
}

impl<P: Part> Default for Children<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Part> Children<P> {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    fn position(&self, slot: P::Slot) -> Result<usize, usize> {
        self.parts.binary_search_by(|p| p.slot().cmp(&slot))
    }

    /// Stores `part` in its slot and returns the part it replaced.
    pub fn attach(&mut self, part: P) -> Option<P> {
        match self.position(part.slot()) {
            Ok(i) => Some(core::mem::replace(&mut self.parts[i], part)),
            Err(i) => {
                self.parts.insert(i, part);
                None
            }
        }
    }

    /// Removes and returns the part in `slot`.
    pub fn detach(&mut self, slot: P::Slot) -> Option<P> {
        self.position(slot).ok().map(|i| self.parts.remove(i))
    }

    /// Returns the part in `slot`.
    #[must_use]
    pub fn get(&self, slot: P::Slot) -> Option<&P> {
        self.position(slot).ok().map(|i| &self.parts[i])
    }

    /// Returns the part in `slot` mutably.
    pub fn get_mut(&mut self, slot: P::Slot) -> Option<&mut P> {
        match self.position(slot) {
            Ok(i) => Some(&mut self.parts[i]),
            Err(_) => None,
        }
    }

    /// Returns true if `slot` is occupied.
    #[must_use]
    pub fn contains(&self, slot: P::Slot) -> bool {
        self.position(slot).is_ok()
    }

    /// Iterates the parts in slot order.
    pub fn iter(&self) -> core::slice::Iter<'_, P> {
        self.parts.iter()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The parts as nodes, in slot order.
    #[must_use]
    pub fn as_nodes(&self) -> Vec<&dyn Node> {
        self.parts.iter().map(Part::as_node).collect()
    }

    /// Removes every part for which `reject` returns true and returns them
    /// in slot order.
    pub fn remove_where(&mut self, mut reject: impl FnMut(&P) -> bool) -> Vec<P> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.parts.len());
        for part in self.parts.drain(..) {
            if reject(&part) {
                removed.push(part);
            } else {
                kept.push(part);
            }
        }
        self.parts = kept;
        removed
    }
}

impl<'a, P: Part> IntoIterator for &'a Children<P> {
    type Item = &'a P;
    type IntoIter = core::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
