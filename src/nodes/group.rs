//! Node groups and the arena-style index that owns them.
//!
//! A [`NodeGroup`] is the connected-component abstraction over same-kind
//! nodes. Formation and topology maintenance (merge on connect, split on
//! disconnect) belong to an external engine and are deliberately absent here:
//! this index only supports explicit construction, which is all scenarios and
//! tests need. Nodes refer back to their group through a [`NodeGroupId`]
//! rather than an owning pointer, since nodes and group membership have
//! independent lifetimes.

use crate::nodes::NetworkKind;
use crate::world::EntityId;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of a group inside a [`GroupIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeGroupId(u64);

impl fmt::Display for NodeGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to one member node: the owning entity plus its slot name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub owner: EntityId,
    pub slot: String,
}

impl NodeRef {
    pub fn new(owner: EntityId, slot: impl Into<String>) -> Self {
        Self {
            owner,
            slot: slot.into(),
        }
    }
}

/// Connected component of same-kind nodes.
///
/// Membership is a set; iteration order is unspecified and callers must not
/// rely on it.
#[derive(Debug, Clone)]
pub struct NodeGroup {
    kind: NetworkKind,
    members: HashSet<NodeRef>,
}

impl NodeGroup {
    fn new(kind: NetworkKind) -> Self {
        Self {
            kind,
            members: HashSet::new(),
        }
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn members(&self) -> impl Iterator<Item = &NodeRef> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Arena of node groups, addressed by [`NodeGroupId`].
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: HashMap<u64, NodeGroup>,
    next_id: u64,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, empty group of the given kind.
    pub fn create(&mut self, kind: NetworkKind) -> NodeGroupId {
        let id = self.next_id;
        self.next_id += 1;
        self.groups.insert(id, NodeGroup::new(kind));
        NodeGroupId(id)
    }

    pub fn get(&self, id: NodeGroupId) -> Option<&NodeGroup> {
        self.groups.get(&id.0)
    }

    /// Record `member` as part of `id`. No-op when the group does not exist;
    /// the caller (`World::connect`) validates existence first.
    pub(crate) fn add_member(&mut self, id: NodeGroupId, member: NodeRef) {
        if let Some(group) = self.groups.get_mut(&id.0) {
            group.members.insert(member);
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
