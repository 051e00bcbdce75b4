//! mdinventory - layered virtual item containers
//!
//! Loads container packs, renders every registered container and optionally
//! shows one of them on the console.

mod config;

use anyhow::{bail, Context, Result};
use config::AppConfig;
use mdinventory_assets::install_pack;
use mdinventory_container::{Audience, Inventories, TextSurface};
use mdinventory_testkit::{MetricsSink, RenderReportBuilder};
use std::{env, io, path::PathBuf};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = CliOptions::parse(env::args().skip(1))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    // Initialize tracing with WARN level by default (RUST_LOG, then --log, override it)
    let default_filter = cli.log_filter.clone().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting mdinventory v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };

    if let Some(path) = &cli.write_config {
        config
            .save_to_path(path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        info!(path = %path.display(), "wrote effective config");
    }

    let pack = match &cli.pack {
        Some(path) => config::load_pack_strict(path)?,
        None => config::load_packs_lenient(&config.pack_path, &config.packs_dir),
    };

    let inventories = Inventories::new(config.item_factory());
    let installed = install_pack(&inventories, &pack).context("failed to install container pack")?;
    info!(containers = installed.len(), "container registry ready");

    let report = RenderReportBuilder::new("mdinventory")
        .capture_all(&inventories)
        .build();
    for grid in &report.grids {
        match (&grid.fingerprint, &grid.error) {
            (Some(fingerprint), _) => info!(
                container = %grid.container,
                occupied = grid.occupied,
                capacity = grid.capacity,
                %fingerprint,
                "rendered container"
            ),
            (None, Some(err)) => warn!(container = %grid.container, %err, "failed to render container"),
            (None, None) => {}
        }
    }

    if cli.list {
        for name in inventories.registry().names() {
            println!("{name}");
        }
    }

    if let Some(name) = &cli.open {
        let audience = Audience::new(cli.audience.clone().unwrap_or_else(|| config.audience.clone()));
        let surface = TextSurface::with_columns(io::stdout(), config.columns);
        inventories
            .open(name, &surface, &audience)
            .with_context(|| format!("failed to open container {name}"))?;
    }

    if let Some(path) = cli.grid_metrics.or(config.grid_metrics_path) {
        MetricsSink::create(&path)?.write(&report)?;
        info!(path = %path.display(), "wrote grid metrics");
    }

    Ok(())
}

const USAGE: &str = "\
usage: mdinventory [options]

  --config <path>        configuration file (default config/mdinventory.toml)
  --pack <path>          load exactly this container pack
  --list                 print registered container names
  --open <name>          print a rendered container
  --audience <name>      audience shown in the --open header
  --grid-metrics <path>  write render metrics as JSON
  --write-config <path>  save the effective configuration as TOML
  --log <filter>         tracing filter when RUST_LOG is unset (default warn)
  --help                 show this message";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    help: bool,
    list: bool,
    config: Option<PathBuf>,
    pack: Option<PathBuf>,
    open: Option<String>,
    audience: Option<String>,
    grid_metrics: Option<PathBuf>,
    write_config: Option<PathBuf>,
    log_filter: Option<String>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--list" => opts.list = true,
                "--config" => opts.config = Some(PathBuf::from(value_for(&arg, &mut args)?)),
                "--pack" => opts.pack = Some(PathBuf::from(value_for(&arg, &mut args)?)),
                "--open" => opts.open = Some(value_for(&arg, &mut args)?),
                "--audience" => opts.audience = Some(value_for(&arg, &mut args)?),
                "--grid-metrics" => {
                    opts.grid_metrics = Some(PathBuf::from(value_for(&arg, &mut args)?))
                }
                "--write-config" => {
                    opts.write_config = Some(PathBuf::from(value_for(&arg, &mut args)?))
                }
                "--log" => opts.log_filter = Some(value_for(&arg, &mut args)?),
                other => bail!("unknown argument {other} (see --help)"),
            }
        }

        Ok(opts)
    }
}

fn value_for<I: Iterator<Item = String>>(flag: &str, args: &mut I) -> Result<String> {
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => bail!("{flag} requires a value"),
    }
}
