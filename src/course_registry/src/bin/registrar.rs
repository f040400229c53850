use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_registry::catalog::Catalog;
use course_registry::catalog::config::{CATALOG_ENV, CatalogSource};
use course_registry::registration::RegistrationService;
use course_registry::render::CourseList;
use course_registry::session::Session;
use shared_utils::env::get_env_path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Student course registration")]
struct Cli {
    /// Catalog seed (TOML). Falls back to $REGISTRAR_CATALOG, then the built-in courses.
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the course list and exit
    Courses,
    /// Read register/drop commands from stdin until EOF or `quit`
    Session,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_registry=info,registrar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = CatalogSource::select(cli.catalog, get_env_path(CATALOG_ENV));
    tracing::debug!(?source, "catalog source");
    let cfg = source.load().context("load course catalog")?;
    let catalog = Catalog::from_config(cfg).context("invalid course catalog")?;

    match cli.cmd {
        Cmd::Courses => print!("{}", CourseList(&catalog)),
        Cmd::Session => {
            let mut session = Session::new(RegistrationService::new(catalog));
            session.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
