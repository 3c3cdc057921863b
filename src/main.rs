//! pipeworks - Station Atmospherics Adapters
//!
//! Binary entry point: an admin console REPL over a demo world, or the gas
//! canister window against a local authority.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use pipeworks::console::shell::{ConsoleActor, ConsoleShell, StdoutShell};
use pipeworks::console::{CommandContext, CommandRegistry};
use pipeworks::scenario;
use std::io::BufRead;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("pipeworks")
        .version(pipeworks::VERSION)
        .about("Atmospherics device UI and pipe-network admin tooling")
        .subcommand_required(true)
        .subcommand(
            Command::new("canister")
                .about("Open the gas canister window against a local authority"),
        )
        .subcommand(
            Command::new("console")
                .about("Run the admin console over the demo canister bay")
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .action(ArgAction::SetTrue)
                        .help("Act as a remote client session (privilege checks apply)"),
                )
                .arg(
                    Arg::new("sandbox")
                        .long("sandbox")
                        .action(ArgAction::SetTrue)
                        .help("Enable sandbox mode (mapping commands open to everyone)"),
                )
                .arg(
                    Arg::new("player")
                        .long("player")
                        .action(ArgAction::SetTrue)
                        .help("Act as an unprivileged player instead of an admin"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("canister", _)) => {
            let mut app = pipeworks::Application::new();
            app.run().await?;
        }
        Some(("console", sub)) => run_console(sub)?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

/// Read-eval loop dispatching lines against the demo world.
fn run_console(matches: &ArgMatches) -> Result<()> {
    let bay = scenario::canister_bay();
    let mut world = bay.world;

    let registry = CommandRegistry::with_defaults();
    let mut shell = if matches.get_flag("remote") {
        StdoutShell::remote()
    } else {
        StdoutShell::local()
    };
    let actor = if matches.get_flag("player") {
        ConsoleActor::player("player")
    } else {
        ConsoleActor::admin("admin")
    };
    let sandbox_enabled = matches.get_flag("sandbox");

    shell.write_line(&format!(
        "canister bay loaded; canister is entity {}. Type 'help' for commands, 'quit' to leave.",
        bay.canister
    ));

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        let mut ctx = CommandContext {
            world: &mut world,
            actor: actor.clone(),
            sandbox_enabled,
        };
        registry.dispatch(&mut shell, &mut ctx, trimmed);
    }

    Ok(())
}
