#![forbid(unsafe_code)]

use clap::Parser;
use std::io;

#[derive(Parser)]
struct CommandLineArguments {
  #[clap(long, short)]
  config: String,
}

fn main() -> io::Result<()> {
  dotenv::dotenv().ok();

  let arguments = CommandLineArguments::parse();
  let config_contents = std::fs::read_to_string(&arguments.config)?;
  let config = toml::from_str::<langcookie::server::Configuration>(config_contents.as_str()).map_err(|error| {
    io::Error::new(
      io::ErrorKind::InvalidData,
      format!("invalid configuration '{}' - {error}", arguments.config),
    )
  })?;

  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();
  tracing::event!(tracing::Level::INFO, "configuration ready, running application");
  tracing::event!(tracing::Level::DEBUG, "{config:?}");
  async_std::task::block_on(langcookie::server::start(config))
}
