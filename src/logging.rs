use color_eyre::eyre::Result;
use swapform::config::get_data_dir;
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "swapform.log";

/// Log to a file in the data dir; the terminal belongs to the UI.
pub fn init() -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_file = std::fs::File::create(data_dir.join(LOG_FILE))?;

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::from_default_env().add_directive("swapform=debug".parse()?));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// Log a panic message and its location.
pub fn log_panic(panic: &std::panic::PanicHookInfo) {
    let msg = panic
        .payload()
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| panic.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload");

    let location = panic.location().map_or_else(
        || "unknown location".to_string(),
        |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
    );

    error!("Panic occurred: {} at {}", msg, location);
}
