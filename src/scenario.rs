//! Canned worlds for the demo binary, tests, and benches.
//!
//! The "canister bay" mirrors the layout the admin tooling is usually pointed
//! at: a canister whose fuel slot joins a small mixed group (not every member
//! is paintable), a separate wire network, and one disconnected pipe.

use crate::nodes::{NetworkKind, Node, NodeContainer};
use crate::world::{EntityId, PipeColor, World};

/// Handles into the world [`canister_bay`] builds.
pub struct CanisterBay {
    pub world: World,
    /// The canister; owns the fuel slot the scenario group hangs off.
    pub canister: EntityId,
    /// Fuel group members carrying the paintable capability (canister included).
    pub painted_fuel_members: Vec<EntityId>,
    /// Fuel group member without the paintable capability.
    pub bare_fuel_member: EntityId,
    /// Pipe entity whose node belongs to no group.
    pub disconnected_pipe: EntityId,
}

/// Spawn an entity with a single `kind` slot, optionally paintable.
fn spawn_node_entity(world: &mut World, kind: NetworkKind, paintable: bool) -> EntityId {
    let id = world.spawn();
    let mut container = NodeContainer::new();
    container.insert(kind.tag(), Node::new(kind));
    world.insert_node_container(id, container);
    if paintable {
        world.insert_pipe_color(id, PipeColor::default());
    }
    id
}

/// Build the canister bay world.
pub fn canister_bay() -> CanisterBay {
    let mut world = World::new();

    // Fuel network: three members, two of them paintable.
    let fuel_group = world.groups_mut().create(NetworkKind::Fuel);
    let canister = spawn_node_entity(&mut world, NetworkKind::Fuel, true);
    let fuel_pipe = spawn_node_entity(&mut world, NetworkKind::Fuel, true);
    let bare_fuel_member = spawn_node_entity(&mut world, NetworkKind::Fuel, false);
    for id in [canister, fuel_pipe, bare_fuel_member] {
        world
            .connect(id, "fuel", fuel_group)
            .expect("scenario entities carry matching fuel slots");
    }

    // Independent wire network, untouched by fuel paints.
    let wire_group = world.groups_mut().create(NetworkKind::Wire);
    for _ in 0..2 {
        let id = spawn_node_entity(&mut world, NetworkKind::Wire, false);
        world
            .connect(id, "wire", wire_group)
            .expect("scenario entities carry matching wire slots");
    }

    // Paintable but never connected anywhere.
    let disconnected_pipe = spawn_node_entity(&mut world, NetworkKind::Pipe, true);

    CanisterBay {
        world,
        canister,
        painted_fuel_members: vec![canister, fuel_pipe],
        bare_fuel_member,
        disconnected_pipe,
    }
}

/// A fuel group of `paintable + bare` members, for wide-group tests/benches.
/// Returns the world and one member to aim the paint command at.
pub fn wide_fuel_group(paintable: usize, bare: usize) -> (World, EntityId) {
    let mut world = World::new();
    let group = world.groups_mut().create(NetworkKind::Fuel);

    let mut first = None;
    for idx in 0..paintable + bare {
        let id = spawn_node_entity(&mut world, NetworkKind::Fuel, idx < paintable);
        world
            .connect(id, "fuel", group)
            .expect("generated entities carry matching fuel slots");
        first.get_or_insert(id);
    }

    let anchor = first.unwrap_or_else(|| spawn_node_entity(&mut world, NetworkKind::Fuel, false));
    (world, anchor)
}
