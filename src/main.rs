use std::path::PathBuf;

use anyhow::{anyhow, Result};
use env_logger::Env;

use ttngw::argsets::{RunArgs, StatusArgs};
use ttngw::command;
use ttngw::constants::{defaults, envvars};
use ttngw::helpers;

const CMD_RUN: &str = "run";
const CMD_STATUS: &str = "status";
const CMD_FIELDS: &str = "fields";

const ARG_CONFIG: &str = "--config";
const ARG_HOST: &str = "--host";
const ARG_ONCE: &str = "--once";

enum Subcommand {
    Run(RunArgs),
    Status(StatusArgs),
    Fields,
}

fn main() -> Result<()> {
    helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let subcommand = match args.subcommand()?.as_deref() {
        Some(CMD_RUN) => Subcommand::Run(RunArgs {
            once: args.contains(ARG_ONCE),
            config: args.opt_value_from_str::<_, PathBuf>(ARG_CONFIG)?,
        }),
        Some(CMD_STATUS) => Subcommand::Status(StatusArgs {
            config: args.opt_value_from_str::<_, PathBuf>(ARG_CONFIG)?,
            host: args.opt_value_from_str(ARG_HOST)?,
        }),
        Some(CMD_FIELDS) => Subcommand::Fields,
        _ => {
            return Err(anyhow!(
                "Subcommand must be one of 'run', 'status', 'fields'"
            ))
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unexpected arguments: {:?}", remaining);
    }

    match subcommand {
        Subcommand::Run(run_args) => command::run(run_args),
        Subcommand::Status(status_args) => command::status(status_args),
        Subcommand::Fields => command::fields(),
    }
}
