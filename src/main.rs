use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use dirsnap::cli::{Cli, Commands};
use dirsnap::output::{self, Verbosity};
use dirsnap::{DirsnapContext, Error, PersistenceKind, commands, logging};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        output::error(&describe(&e));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    output::set_verbosity(verbosity);
    logging::init(verbosity);

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let ctx = match cli.config {
        Some(path) => DirsnapContext::with_config_path(path)?,
        None => DirsnapContext::new()?,
    };

    match cli.command {
        Commands::Scan { dir, output } => commands::scan::execute(&ctx, &dir, output.as_deref()),
        Commands::Rescan {
            dir,
            from,
            json,
            no_save,
        } => commands::rescan::execute(&ctx, dir.as_deref(), from.as_deref(), json, no_save),
        Commands::Diff { old, new, json } => commands::diff::execute(&old, &new, json),
        Commands::Show { snapshot, entries } => commands::show::execute(&snapshot, entries),
        Commands::List => commands::list::execute(&ctx),
        Commands::Completion { .. } => Ok(()),
    }
}

/// User-facing message for a failed command.
///
/// Typed library errors get a fixed wording per failure class; the anyhow
/// context chain is kept after it.
fn describe(e: &anyhow::Error) -> String {
    let chain = format!("{e:#}");
    let Some(typed) = e.downcast_ref::<Error>() else {
        return chain;
    };

    let headline = match typed {
        Error::DirectoryAccess { path, .. } => {
            format!("directory not found or not readable: {}", path.display())
        }
        Error::Persistence {
            kind: PersistenceKind::NotFound,
            target,
            ..
        } if target.is_dir() => {
            format!("{} has not been scanned yet", target.display())
        }
        Error::Persistence {
            kind: PersistenceKind::NotFound,
            target,
            ..
        } => format!("snapshot not found: {}", target.display()),
        Error::Persistence {
            kind: PersistenceKind::Corrupt | PersistenceKind::UnsupportedVersion,
            target,
            ..
        } => format!("snapshot is corrupt or unreadable: {}", target.display()),
        _ => return chain,
    };

    format!("{headline}\n  caused by: {chain}")
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
