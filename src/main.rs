// SPDX-License-Identifier: MPL-2.0
use gif_gallery::app::{self, paths, Flags};

const HELP: &str = "\
Trending GIF gallery

USAGE:
  gif_gallery [OPTIONS]

OPTIONS:
  --lang LOCALE        UI language (e.g. en-US, fr)
  --api-key KEY        GIPHY API key (overrides GIF_GALLERY_API_KEY)
  --limit N            Number of trending images to request
  --interval-ms MS     Rotation period in milliseconds
  --config-dir DIR     Directory holding settings.toml
  -h, --help           Print this help
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        api_key: args.opt_value_from_str("--api-key")?,
        limit: args.opt_value_from_str("--limit")?,
        interval_ms: args.opt_value_from_str("--interval-ms")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {:?}", remaining);
    }
    Ok(flags)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,gif_gallery=info"),
    )
    .format_timestamp_millis()
    .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    log::info!("GifGallery {} starting", env!("CARGO_PKG_VERSION"));

    app::run(flags)
}
