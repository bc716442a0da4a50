mod app;
pub mod artifact;
pub mod audio;
pub mod cache;
pub mod capability;
pub mod config;
pub mod error;
pub mod handler;
pub mod lyrics;
pub mod music;
pub mod reconcile;
pub mod registry;
pub mod separate;
pub mod song;
pub mod transform;

pub use app::App;
pub use error::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[cfg(test)]
mod test;

pub fn init_tracing(config: &config::Log) -> Result<(), Error> {
    color_eyre::install()?;

    let fmt = tracing_subscriber::fmt::layer().with_target(false);
    let fmt = match (config.format, config.time) {
        (config::log::Format::Plain, true) => fmt.boxed(),
        (config::log::Format::Plain, false) => fmt.without_time().boxed(),
        (config::log::Format::Json, true) => fmt.json().boxed(),
        (config::log::Format::Json, false) => fmt.json().without_time().boxed(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter.as_str().into()))
        .with(fmt)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .map_err(color_eyre::Report::from)?;
    Ok(())
}
