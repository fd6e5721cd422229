use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt};

/// `-v` count to level; zero keeps warnings and errors only.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::from_level(Level::TRACE),
    }
}

pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_filter(level);

    tracing::subscriber::set_global_default(Registry::default().with(fmt_layer))?;
    Ok(())
}
