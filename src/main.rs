// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plotdesk::{cli, commands, desk::Desk};

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "plotdesk=debug",
        _ => "plotdesk=trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    init_tracing(matches.get_count("verbose"));
    let desk = Desk::open(&matches)?;

    match matches.subcommand() {
        Some(("property", sub)) => commands::properties::handle(&desk, sub)?,
        Some(("project", sub)) => commands::projects::handle(&desk, sub)?,
        Some(("deal", sub)) => commands::deals::handle(&desk, sub)?,
        Some(("commission", sub)) => commands::commissions::handle(&desk, sub)?,
        Some(("lead", sub)) => commands::leads::handle(&desk, sub)?,
        Some(("agent", sub)) => commands::agents::handle(&desk, sub)?,
        Some(("exec", sub)) => commands::executive::handle(&desk, sub)?,
        Some(("reserve", sub)) => commands::reserve::handle(&desk, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&desk, sub)?,
        Some(("config", sub)) => commands::settings::handle(&desk, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
