//! Environment variable source: FSTREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `FSTREE_SCAN__CHECKSUM=blake3` sets `scan.checksum`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("FSTREE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    ))
}
