// SPDX-License-Identifier: MPL-2.0
use iced_atlas::app::{self, paths, Flags};
use iced_atlas::logging;

const HELP: &str = "\
IcedAtlas - interactive map view

USAGE:
  iced_atlas [OPTIONS]

OPTIONS:
  -h, --help               Print this help
  --config-dir <DIR>       Directory holding settings.toml
  --log-level <LEVEL>      error, warn, info, debug or trace (default: info)

ENVIRONMENT:
  ICED_ATLAS_CONFIG_DIR    Config directory when --config-dir is absent
  RUST_LOG                 Fine-grained log filtering
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        log_level: args.opt_value_from_str("--log-level")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments: {remaining:?}");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Err(err) = logging::init_or_default(flags.log_level.as_deref()) {
        eprintln!("{err}");
    }
    paths::init_cli_overrides(flags.config_dir.clone());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting IcedAtlas");
    app::run(flags)
}
