//! Admin console surface.
//!
//! A [`CommandRegistry`] maps command names to [`ConsoleCommand`]
//! implementations and dispatches raw input lines against a mutable world.
//! Command failures are not fatal: each error becomes one shell error line
//! and aborts only that invocation.

use crate::console::shell::{ConsoleActor, ConsoleShell};
use crate::error::Result;
use crate::world::World;
use std::collections::BTreeMap;

pub mod color_network;
pub mod shell;

pub use color_network::ColorNetworkCommand;
pub use shell::{BufferShell, StdoutShell};

/// Everything a command may read or mutate during one invocation.
pub struct CommandContext<'a> {
    pub world: &'a mut World,
    pub actor: ConsoleActor,
    /// Host-level sandbox/mapping mode; when enabled, mapping commands are
    /// open to unprivileged remote callers.
    pub sandbox_enabled: bool,
}

/// One console command: name, user-facing strings, and the operation itself.
pub trait ConsoleCommand {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn help(&self) -> String;

    /// Run the command. Preconditions are checked in a fixed order and the
    /// first failure returns without side effects.
    fn execute(
        &self,
        shell: &mut dyn ConsoleShell,
        ctx: &mut CommandContext<'_>,
        args: &[&str],
    ) -> Result<()>;
}

/// Name-keyed registry of console commands.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ConsoleCommand>>,
}

impl CommandRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registry with every built-in command installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ColorNetworkCommand));
        registry
    }

    pub fn register(&mut self, command: Box<dyn ConsoleCommand>) {
        self.commands.insert(command.name(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ConsoleCommand> {
        self.commands.get(name).map(Box::as_ref)
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Parse and run one input line.
    ///
    /// `help` is a registry builtin so it can see every registered command.
    /// Unknown commands and command errors are reported through the shell;
    /// the dispatcher itself never fails.
    pub fn dispatch(
        &self,
        shell: &mut dyn ConsoleShell,
        ctx: &mut CommandContext<'_>,
        line: &str,
    ) {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return;
        };
        let args: Vec<&str> = parts.collect();

        if name == "help" {
            self.write_help(shell, &args);
            return;
        }

        match self.get(name) {
            Some(command) => {
                if let Err(err) = command.execute(shell, ctx, &args) {
                    shell.write_error(&err.to_string());
                }
            }
            None => shell.write_error(&format!("Unknown command: {name}")),
        }
    }

    fn write_help(&self, shell: &mut dyn ConsoleShell, args: &[&str]) {
        match args.first() {
            Some(name) => match self.get(name) {
                Some(command) => shell.write_line(&command.help()),
                None => shell.write_error(&format!("Unknown command: {name}")),
            },
            None => {
                for command in self.commands.values() {
                    shell.write_line(&format!(
                        "{} - {}",
                        command.name(),
                        command.description()
                    ));
                }
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::shell::BufferShell;

    fn context(world: &mut World) -> CommandContext<'_> {
        CommandContext {
            world,
            actor: ConsoleActor::admin("test"),
            sandbox_enabled: false,
        }
    }

    #[test]
    fn dispatch_ignores_blank_lines() {
        let registry = CommandRegistry::with_defaults();
        let mut world = World::new();
        let mut shell = BufferShell::local();

        registry.dispatch(&mut shell, &mut context(&mut world), "   ");

        assert!(shell.lines.is_empty());
        assert!(shell.errors.is_empty());
    }

    #[test]
    fn dispatch_reports_unknown_commands() {
        let registry = CommandRegistry::with_defaults();
        let mut world = World::new();
        let mut shell = BufferShell::local();

        registry.dispatch(&mut shell, &mut context(&mut world), "frobnicate 1 2");

        assert_eq!(shell.errors, vec!["Unknown command: frobnicate"]);
    }

    #[test]
    fn help_lists_registered_commands() {
        let registry = CommandRegistry::with_defaults();
        let mut world = World::new();
        let mut shell = BufferShell::local();

        registry.dispatch(&mut shell, &mut context(&mut world), "help");

        assert!(shell
            .lines
            .iter()
            .any(|line| line.starts_with("colornetwork - ")));
    }

    #[test]
    fn help_for_one_command_prints_usage() {
        let registry = CommandRegistry::with_defaults();
        let mut world = World::new();
        let mut shell = BufferShell::local();

        registry.dispatch(&mut shell, &mut context(&mut world), "help colornetwork");

        assert_eq!(shell.lines.len(), 1);
        assert!(shell.lines[0].contains("colornetwork"));
    }
}
