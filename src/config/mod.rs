// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for mxc.
//!
//! The data root is an explicitly passed configuration value (file, env var,
//! or platform default), never ambient process state.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, load_config, load_config_from};
pub use schema::*;
