use flexi_logger::{Logger, LoggerHandle};

use folio::error;
use folio::error::Result;

pub const DEFAULT_SPEC: &str = "info";

/// Starts the stderr logger. `spec` takes precedence over `RUST_LOG`, which
/// takes precedence over [`DEFAULT_SPEC`].
///
/// The returned handle must be kept alive for as long as logging is wanted.
pub fn init(spec: Option<&str>) -> Result<LoggerHandle> {
    let logger = match spec {
        Some(spec) => Logger::try_with_str(spec),
        None => Logger::try_with_env_or_str(DEFAULT_SPEC),
    };

    let logger = logger.map_err(|e| error! {
        "invalid log specification",
        "spec" => spec.unwrap_or(DEFAULT_SPEC),
        "reason" => e,
    })?;

    logger.format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| error!("failed to start logger", "reason" => e))
}
