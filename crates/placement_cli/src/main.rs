use clap::Parser;
use placement_units::UnitSystem;
use stores::local::JsonFileStore;
use stores::LocalStore;
use tracing::{debug, trace};

use crate::commands::Session;
use crate::config::Config;
use crate::opts::Opts;

mod commands;
mod config;
mod opts;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;
    trace!("opts: {:?}", opts);

    let config = Config::load_or_default(&opts.data_dir)?;

    // the unit system given on the command line takes precedence
    let unit_system = opts
        .unit
        .map(UnitSystem::from)
        .unwrap_or(config.unit_system);
    debug!("Using unit system: {}", unit_system);

    let mut session = Session {
        store: LocalStore::new(JsonFileStore::new(opts.data_dir.clone())),
        data_dir: opts.data_dir,
        config,
        unit_system,
    };

    let mut stdout = std::io::stdout().lock();

    commands::run(&mut session, opts.command, &mut stdout)
}
