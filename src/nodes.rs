//! Connection nodes and per-entity node containers.
//!
//! Every networked device owns a [`NodeContainer`]: a registry of named
//! connection slots, each holding one [`Node`]. A node knows which
//! [`NetworkKind`] it speaks and, while connected, which group it currently
//! belongs to. Group membership itself is owned by the group index (see
//! [`group`]); the node only keeps an id-based back reference, so a node with
//! no group is a perfectly valid disconnected node.

use crate::error::PipeworksError;
use crate::nodes::group::NodeGroupId;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod group;

pub use group::{GroupIndex, NodeGroup, NodeRef};

/// Closed enumeration of network kinds a node can participate in.
///
/// The canonical tag of each kind doubles as the container slot name it is
/// wired under, so `tag()` is always lowercase and parsing is case-sensitive
/// against exactly these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkKind {
    Pipe,
    Fuel,
    Wire,
    Apc,
}

impl NetworkKind {
    /// Every kind, for help output and tests.
    pub const ALL: [NetworkKind; 4] = [
        NetworkKind::Pipe,
        NetworkKind::Fuel,
        NetworkKind::Wire,
        NetworkKind::Apc,
    ];

    /// Canonical lowercase tag; also the container slot key for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            NetworkKind::Pipe => "pipe",
            NetworkKind::Fuel => "fuel",
            NetworkKind::Wire => "wire",
            NetworkKind::Apc => "apc",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NetworkKind {
    type Err = PipeworksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| PipeworksError::InvalidNetworkKind { tag: s.to_string() })
    }
}

/// A single connection point owned by an entity's container.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NetworkKind,
    group: Option<NodeGroupId>,
}

impl Node {
    /// Create a disconnected node of the given kind.
    pub fn new(kind: NetworkKind) -> Self {
        Self { kind, group: None }
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    /// Group this node currently belongs to, if any.
    pub fn group(&self) -> Option<NodeGroupId> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: Option<NodeGroupId>) {
        self.group = group;
    }
}

/// Per-entity registry of named connection slots.
///
/// Slot names are unique per container and compared case-insensitively; keys
/// are normalized to lowercase on insert so lookups never have to guess.
#[derive(Debug, Clone, Default)]
pub struct NodeContainer {
    slots: HashMap<String, Node>,
}

impl NodeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under `slot`. Replaces any previous node with the same
    /// (case-insensitive) name, preserving slot-name uniqueness.
    pub fn insert(&mut self, slot: impl AsRef<str>, node: Node) {
        self.slots.insert(slot.as_ref().to_lowercase(), node);
    }

    pub fn get(&self, slot: &str) -> Option<&Node> {
        self.slots.get(&slot.to_lowercase())
    }

    pub fn get_mut(&mut self, slot: &str) -> Option<&mut Node> {
        self.slots.get_mut(&slot.to_lowercase())
    }

    /// Iterate over `(slot, node)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.slots.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_kind_parses_canonical_tags() {
        assert_eq!("fuel".parse::<NetworkKind>().unwrap(), NetworkKind::Fuel);
        assert_eq!("pipe".parse::<NetworkKind>().unwrap(), NetworkKind::Pipe);
    }

    #[test]
    fn network_kind_parse_is_case_sensitive() {
        assert!("Fuel".parse::<NetworkKind>().is_err());
        assert!("FUEL".parse::<NetworkKind>().is_err());
        assert!("plasma".parse::<NetworkKind>().is_err());
    }

    #[test]
    fn slot_names_are_case_insensitive() {
        let mut container = NodeContainer::new();
        container.insert("Fuel", Node::new(NetworkKind::Fuel));

        assert!(container.get("fuel").is_some());
        assert!(container.get("FUEL").is_some());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn duplicate_slot_names_collapse() {
        let mut container = NodeContainer::new();
        container.insert("pipe", Node::new(NetworkKind::Pipe));
        container.insert("PIPE", Node::new(NetworkKind::Pipe));

        assert_eq!(container.len(), 1);
    }

    #[test]
    fn new_nodes_are_disconnected() {
        let node = Node::new(NetworkKind::Wire);
        assert!(node.group().is_none());
    }
}
