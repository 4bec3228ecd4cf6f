//! Configuration validation
//!
//! Validates what must hold before the bridge starts:
//! - Every enabled client names a cluster
//!
//! Route descriptions are not validated here. The registry owns route
//! validation and skips bad entries one by one; failing the whole file on
//! a single bad route would defeat that.

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_clients(config)?;
    Ok(())
}

/// Validate client configurations
///
/// The cluster name is what duplicate-mapping detection compares, so an
/// empty one would make unrelated clients collide. Disabled clients are
/// skipped; they resolve nothing.
fn validate_clients(config: &Config) -> Result<()> {
    for (name, client) in config.clients.iter() {
        if !client.is_enabled() {
            continue;
        }

        if client.cluster.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "client",
                name,
                "cluster",
                "must not be empty",
            ));
        }
    }

    Ok(())
}
