// SPDX-License-Identifier: MPL-2.0
use airlens::app::{self, Flags};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        base_url: args.opt_value_from_str("--base-url").unwrap(),
        config_path: args.opt_value_from_str("--config").unwrap(),
    };

    app::run(flags)
}
