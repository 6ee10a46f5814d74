//! Configuration loading
//!
//! The configuration is compiled into the firmware from `controller.toml`
//! and parsed at boot with the no_std parser from blastzone-core.

use blastzone_core::config::{parse_config, ControllerConfig};
use defmt::*;

/// Embedded configuration (compiled into firmware)
/// Edit controller.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../controller.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> ControllerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded controller.toml");
            config
        }
        Err(e) => {
            error!("Invalid controller.toml ({:?}), using defaults", e);
            ControllerConfig::default()
        }
    }
}
