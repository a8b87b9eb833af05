/*!
 * procsim - Main Entry Point
 *
 * Seeds the init process and reads single-character commands from stdin:
 * Q (tick), U (wake), P (print state), T (print state and exit)
 */

use miette::IntoDiagnostic;
use procsim::core::limits::{DEFAULT_INIT_PROGRAM, INIT_PRIORITY};
use procsim::{
    init_tracing, CommandDispatcher, ProcessManager, SimConfig, SimError, Snapshot, SnapshotFormat,
};
use std::io::{BufRead, IsTerminal, Write};
use tracing::{error, info, warn};

fn print_snapshot(snapshot: &Snapshot, format: SnapshotFormat) -> miette::Result<()> {
    match format {
        SnapshotFormat::Text => println!("{}", snapshot),
        SnapshotFormat::Json => println!("{}", snapshot.to_json().into_diagnostic()?),
    }
    Ok(())
}

fn prompt(interactive: bool) -> miette::Result<()> {
    if interactive {
        print!("Enter command (Q/U/P/T): ");
        std::io::stdout().flush().into_diagnostic()?;
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    let config = SimConfig::from_env()?;
    init_tracing(config.trace_json);

    info!(?config, "procsim starting");

    let mut manager = ProcessManager::builder().with_config(&config).build()?;
    let init = match &config.init_program {
        Some(name) => manager.create_process_from(INIT_PRIORITY, name)?,
        None => manager.create_process(INIT_PRIORITY, DEFAULT_INIT_PROGRAM.iter().copied())?,
    };
    info!(pid = init, "Init process seeded");

    let mut dispatcher = CommandDispatcher::new(&mut manager);
    let interactive = std::io::stdin().is_terminal();
    prompt(interactive)?;
    for line in std::io::stdin().lock().lines() {
        let line = line.into_diagnostic()?;

        match dispatcher.dispatch_line(&line) {
            Ok(reply) => {
                if let Some(snapshot) = reply.snapshot() {
                    print_snapshot(snapshot, config.snapshot_format)?;
                }
                if reply.is_shutdown() {
                    return Ok(());
                }
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Simulation aborted");
                return Err(e.into());
            }
            Err(SimError::UnknownCommand(input)) => {
                warn!(input = %input, "Rejected command");
                println!("Invalid command. Please enter Q, U, P, or T.");
            }
            Err(e) => warn!(error = %e, "Command failed"),
        }

        prompt(interactive)?;
    }

    info!("Input closed, stopping");
    Ok(())
}
