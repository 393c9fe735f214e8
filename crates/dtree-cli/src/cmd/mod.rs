use anyhow::Result;
use dtree_core::config::{validate_config, CoreConfig, LimitsConfig};

use crate::args::{Cli, Command};

pub mod fingerprint;
pub mod kinds;
pub mod validate;

pub fn dispatch(cli: Cli) -> Result<()> {
    let cfg = CoreConfig {
        limits: LimitsConfig {
            max_json_bytes: cli.max_bytes,
        },
    };
    validate_config(&cfg)?;

    match cli.command {
        Command::Validate { input, out } => validate::run(&input, out.as_deref(), &cfg.limits),
        Command::Fingerprint { input } => fingerprint::run(&input, &cfg.limits),
        Command::Kinds => kinds::run(),
    }
}
