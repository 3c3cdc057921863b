//! The `colornetwork` admin command.
//!
//! Resolves an entity, one of its node-container slots, and the node group
//! that slot belongs to, then recolors every group member that carries the
//! paintable-pipe capability. Preconditions run in a fixed order and the
//! first failure aborts with no side effects; painting itself cannot fail
//! partway, so the operation is atomic from the caller's perspective.

use crate::color::Color;
use crate::console::shell::ConsoleShell;
use crate::console::{CommandContext, ConsoleCommand};
use crate::error::{PipeworksError, Result};
use crate::nodes::NetworkKind;
use crate::world::{EntityId, World};
use log::{debug, warn};
use std::collections::BTreeSet;

/// `colornetwork <entityId> <networkKind> <colorHex>`
pub struct ColorNetworkCommand;

impl ConsoleCommand for ColorNetworkCommand {
    fn name(&self) -> &'static str {
        "colornetwork"
    }

    fn description(&self) -> &'static str {
        "Recolors every paintable pipe on the network attached to an entity's slot"
    }

    fn help(&self) -> String {
        format!(
            "Usage: {} <entityId> <networkKind> <colorHex>\nNetwork kinds: {}",
            self.name(),
            NetworkKind::ALL.map(|kind| kind.tag()).join(", ")
        )
    }

    fn execute(
        &self,
        shell: &mut dyn ConsoleShell,
        ctx: &mut CommandContext<'_>,
        args: &[&str],
    ) -> Result<()> {
        // Remote callers need the mapping privilege unless the host runs in
        // sandbox mode. The upstream implementation only warned here and fell
        // through; this one fails closed (see DESIGN.md).
        if shell.is_remote() && !ctx.sandbox_enabled && !ctx.actor.can_use_mapping {
            warn!(
                "actor '{}' denied colornetwork: mapping privilege required",
                ctx.actor.name
            );
            return Err(PipeworksError::Authorization);
        }

        if args.len() != 3 {
            return Err(PipeworksError::Usage {
                expected: 3,
                got: args.len(),
            });
        }

        let raw: u32 = args[0]
            .parse()
            .map_err(|_| PipeworksError::argument_type(args[0]))?;
        let id = EntityId::new(raw);

        if !ctx.world.exists(id) {
            return Err(PipeworksError::EntityNotFound { id });
        }

        if ctx.world.node_container(id).is_none() {
            return Err(PipeworksError::missing_capability(id, "NodeContainer"));
        }

        let kind: NetworkKind = args[1].parse()?;
        let color = Color::from_hex(args[2])?;

        let affected = paint_nodes(ctx.world, id, kind, color);
        shell.write_line(&format!(
            "recolored {affected} node(s) on the {kind} network"
        ));
        Ok(())
    }
}

/// Recolor every paintable member of the group behind `owner`'s `kind` slot.
///
/// Returns the number of entities whose color changed. A missing slot or a
/// disconnected node is not an error; it just affects zero entities. Group
/// members without the paintable capability are skipped.
pub fn paint_nodes(world: &mut World, owner: EntityId, kind: NetworkKind, color: Color) -> usize {
    // The same entity may own several nodes in one group; paint it once.
    let members: BTreeSet<EntityId> = world
        .node_container(owner)
        .and_then(|container| container.get(kind.tag()))
        .and_then(|node| node.group())
        .and_then(|group_id| world.groups().get(group_id))
        .map(|group| group.members().map(|member| member.owner).collect())
        .unwrap_or_default();

    let mut affected = 0;
    for member in members {
        if let Some(pipe) = world.pipe_color_mut(member) {
            pipe.color = color;
            affected += 1;
        }
    }

    debug!("painted {affected} entities on the {kind} network of {owner}");
    affected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::shell::{BufferShell, ConsoleActor};
    use crate::nodes::{Node, NodeContainer};
    use crate::world::PipeColor;

    fn run(
        world: &mut World,
        shell: &mut BufferShell,
        actor: ConsoleActor,
        sandbox: bool,
        args: &[&str],
    ) -> Result<()> {
        let mut ctx = CommandContext {
            world,
            actor,
            sandbox_enabled: sandbox,
        };
        ColorNetworkCommand.execute(shell, &mut ctx, args)
    }

    fn world_with_container() -> (World, EntityId) {
        let mut world = World::new();
        let id = world.spawn();
        let mut container = NodeContainer::new();
        container.insert("fuel", Node::new(NetworkKind::Fuel));
        world.insert_node_container(id, container);
        (world, id)
    }

    #[test]
    fn remote_unprivileged_caller_is_rejected_before_usage_check() {
        let mut world = World::new();
        let mut shell = BufferShell::remote();

        // Deliberately wrong arg count: authorization must win.
        let err = run(&mut world, &mut shell, ConsoleActor::player("p"), false, &[]).unwrap_err();
        assert!(matches!(err, PipeworksError::Authorization));
    }

    #[test]
    fn sandbox_mode_opens_the_command_to_remote_players() {
        let (mut world, id) = world_with_container();
        let mut shell = BufferShell::remote();
        let id_arg = id.to_string();

        run(
            &mut world,
            &mut shell,
            ConsoleActor::player("p"),
            true,
            &[&id_arg, "fuel", "#00FF00"],
        )
        .unwrap();
        assert_eq!(shell.lines.len(), 1);
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let mut world = World::new();
        let mut shell = BufferShell::local();

        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &["1", "fuel"],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipeworksError::Usage {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn entity_id_error_reported_before_network_kind_error() {
        let mut world = World::new();
        let mut shell = BufferShell::local();

        // Both the id and the kind are invalid; argument 1 is checked first.
        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &["abc", "not-a-kind", "#FF0000"],
        )
        .unwrap_err();
        assert!(matches!(err, PipeworksError::ArgumentType { .. }));
    }

    #[test]
    fn unknown_entity_is_rejected() {
        let mut world = World::new();
        let mut shell = BufferShell::local();

        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &["41", "fuel", "#FF0000"],
        )
        .unwrap_err();
        assert!(matches!(err, PipeworksError::EntityNotFound { .. }));
    }

    #[test]
    fn entity_without_container_is_rejected() {
        let mut world = World::new();
        let id = world.spawn();
        let mut shell = BufferShell::local();
        let id_arg = id.to_string();

        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &[&id_arg, "fuel", "#FF0000"],
        )
        .unwrap_err();
        assert!(matches!(err, PipeworksError::MissingCapability { .. }));
    }

    #[test]
    fn invalid_kind_is_rejected_before_color_parse() {
        let (mut world, id) = world_with_container();
        let mut shell = BufferShell::local();
        let id_arg = id.to_string();

        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &[&id_arg, "Fuel", "not-a-color"],
        )
        .unwrap_err();
        assert!(matches!(err, PipeworksError::InvalidNetworkKind { .. }));
    }

    #[test]
    fn invalid_color_is_rejected() {
        let (mut world, id) = world_with_container();
        let mut shell = BufferShell::local();
        let id_arg = id.to_string();

        let err = run(
            &mut world,
            &mut shell,
            ConsoleActor::admin("a"),
            false,
            &[&id_arg, "fuel", "red"],
        )
        .unwrap_err();
        assert!(matches!(err, PipeworksError::InvalidColor { .. }));
    }

    #[test]
    fn disconnected_slot_paints_nothing() {
        let (mut world, id) = world_with_container();
        let affected = paint_nodes(&mut world, id, NetworkKind::Fuel, Color::rgb(1, 2, 3));
        assert_eq!(affected, 0);
    }

    #[test]
    fn missing_slot_paints_nothing() {
        let (mut world, id) = world_with_container();
        let affected = paint_nodes(&mut world, id, NetworkKind::Wire, Color::rgb(1, 2, 3));
        assert_eq!(affected, 0);
    }

    #[test]
    fn paints_only_paintable_members() {
        let mut world = World::new();
        let group = world.groups_mut().create(NetworkKind::Fuel);

        let mut spawn_member = |paintable: bool| {
            let id = world.spawn();
            let mut container = NodeContainer::new();
            container.insert("fuel", Node::new(NetworkKind::Fuel));
            world.insert_node_container(id, container);
            if paintable {
                world.insert_pipe_color(id, PipeColor::default());
            }
            world.connect(id, "fuel", group).unwrap();
            id
        };

        let painted_a = spawn_member(true);
        let painted_b = spawn_member(true);
        let bare = spawn_member(false);

        let red = Color::from_hex("#FF0000").unwrap();
        let affected = paint_nodes(&mut world, painted_a, NetworkKind::Fuel, red);

        assert_eq!(affected, 2);
        assert_eq!(world.pipe_color(painted_a).unwrap().color, red);
        assert_eq!(world.pipe_color(painted_b).unwrap().color, red);
        assert!(world.pipe_color(bare).is_none());
    }
}
