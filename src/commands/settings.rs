// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::config_path;
use crate::desk::Desk;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => print!("{}", desk.settings.to_toml()?),
        Some(("path", _)) => println!("{}", config_path()?.display()),
        _ => {}
    }
    Ok(())
}
