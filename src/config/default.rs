// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::MxcConfig;

/// Get the default configuration.
pub fn default_config() -> MxcConfig {
    MxcConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# MXC Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Storage configuration
[storage]
# Root directory for export input and structured output.
# Falls back to $MXC_DATA_ROOT, then the platform data directory.
# data_root = "/srv/mendix-data"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config: MxcConfig = toml::from_str(example_config()).unwrap();
        assert!(config.storage.data_root.is_none());
    }
}
