//! Entity store and typed component lookup.
//!
//! The host engine this crate was carved out of owns the real
//! entity-component machinery; this module provides the slice of it the
//! adapters actually touch: spawning entities, existence checks, and optional
//! `NodeContainer` / `PipeColor` components addressed by [`EntityId`]. The
//! simulation contract is single-threaded, so there is no interior locking.

use crate::color::Color;
use crate::error::{PipeworksError, Result};
use crate::nodes::group::{GroupIndex, NodeGroupId, NodeRef};
use crate::nodes::NodeContainer;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Numeric identifier of a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paintable-pipe capability: the segment's current display color.
///
/// Entities without this component are valid group members that the paint
/// operation simply skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeColor {
    pub color: Color,
}

impl Default for PipeColor {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

/// The entity store plus the group index the nodes point into.
#[derive(Debug, Default)]
pub struct World {
    alive: BTreeSet<EntityId>,
    next_id: u32,
    node_containers: HashMap<EntityId, NodeContainer>,
    pipe_colors: HashMap<EntityId, PipeColor>,
    groups: GroupIndex,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        self.next_id += 1;
        let id = EntityId::new(self.next_id);
        self.alive.insert(id);
        id
    }

    pub fn exists(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    /// Live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    // ── NodeContainer component ──

    pub fn insert_node_container(&mut self, id: EntityId, container: NodeContainer) {
        self.node_containers.insert(id, container);
    }

    pub fn node_container(&self, id: EntityId) -> Option<&NodeContainer> {
        self.node_containers.get(&id)
    }

    pub fn node_container_mut(&mut self, id: EntityId) -> Option<&mut NodeContainer> {
        self.node_containers.get_mut(&id)
    }

    // ── PipeColor component ──

    pub fn insert_pipe_color(&mut self, id: EntityId, pipe_color: PipeColor) {
        self.pipe_colors.insert(id, pipe_color);
    }

    pub fn pipe_color(&self, id: EntityId) -> Option<&PipeColor> {
        self.pipe_colors.get(&id)
    }

    pub fn pipe_color_mut(&mut self, id: EntityId) -> Option<&mut PipeColor> {
        self.pipe_colors.get_mut(&id)
    }

    // ── Group wiring ──

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut GroupIndex {
        &mut self.groups
    }

    /// Attach the node in `owner`'s `slot` to an existing group.
    ///
    /// Sets the node's back reference and records membership in the index.
    /// The group must exist, the entity must carry a container with that
    /// slot, and the node's kind must match the group's kind.
    pub fn connect(&mut self, owner: EntityId, slot: &str, group: NodeGroupId) -> Result<()> {
        let kind = self
            .groups
            .get(group)
            .ok_or_else(|| PipeworksError::other(format!("no such node group: {group}")))?
            .kind();

        let container = self
            .node_containers
            .get_mut(&owner)
            .ok_or_else(|| PipeworksError::missing_capability(owner, "NodeContainer"))?;
        let node = container
            .get_mut(slot)
            .ok_or_else(|| PipeworksError::other(format!("entity {owner} has no slot '{slot}'")))?;

        if node.kind() != kind {
            return Err(PipeworksError::other(format!(
                "node kind {} does not match group kind {kind}",
                node.kind()
            )));
        }

        node.set_group(Some(group));
        self.groups.add_member(group, NodeRef::new(owner, slot.to_lowercase()));
        Ok(())
    }
}
