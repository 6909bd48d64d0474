use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use pfetrack::api::PortalApi;
use pfetrack::error::{Result, StoreError};
use pfetrack::notifier::LogNotifier;
use pfetrack::seed::SeedRegistry;
use pfetrack::store::fs::FileBackend;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;

use args::{Cli, Commands, ListTarget};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let api = open_portal(&cli)?;

    match cli.command {
        Some(Commands::Init { empty }) => handle_init(&api, empty),
        Some(Commands::List { target }) => handle_list(&api, target),
        Some(Commands::Export { out }) => handle_export(&api, out),
        Some(Commands::Import { file }) => handle_import(&api, file),
        Some(Commands::ClearNotifications) => {
            api.clear_notifications()?;
            println!("{}", "Notification history cleared.".green());
            Ok(())
        }
        None => handle_list(&api, ListTarget::Projects),
    }
}

fn open_portal(cli: &Cli) -> Result<PortalApi<FileBackend>> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "pfetrack", "pfetrack")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StoreError::Unavailable("could not determine data dir".into()))?,
    };
    let backend = FileBackend::new(data_dir);
    Ok(PortalApi::with_notifier(backend, Box::new(LogNotifier)))
}

fn handle_init(api: &PortalApi<FileBackend>, empty: bool) -> Result<()> {
    let seed = if empty {
        SeedRegistry::empty()
    } else {
        SeedRegistry::builtin()
    };
    api.init(&seed)?;
    println!(
        "{}",
        format!(
            "Store ready at {}.",
            api.backend().root().display()
        )
        .green()
    );
    Ok(())
}

fn handle_list(api: &PortalApi<FileBackend>, target: ListTarget) -> Result<()> {
    match target {
        ListTarget::Projects => print::print_projects(&api.projects()?),
        ListTarget::Appointments => print::print_appointments(&api.appointments()?),
        ListTarget::Notifications => print::print_notifications(&api.notifications()?),
    }
    Ok(())
}

fn handle_export(api: &PortalApi<FileBackend>, out: Option<PathBuf>) -> Result<()> {
    let payload = api.export()?;
    match out {
        Some(path) => {
            fs::write(&path, &payload).map_err(StoreError::Io)?;
            println!("{}", format!("Exported to {}.", path.display()).green());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

fn handle_import(api: &PortalApi<FileBackend>, file: PathBuf) -> Result<()> {
    let payload = fs::read_to_string(&file).map_err(StoreError::Io)?;
    if !api.import(&payload)? {
        return Err(StoreError::Invalid(format!(
            "{} is not a valid backup envelope",
            file.display()
        )));
    }
    println!("{}", "Import complete.".green());
    Ok(())
}
