//! # Command Handlers
//!
//! This module contains organized command handlers for the bioregistry CLI application.
//! Each command group is implemented in a dedicated submodule.
//!
//! ## Structure
//!
//! - `prefix` - Prefix commands (normalize, get, list)
//! - `curie` - CURIE commands (normalize, validate, resolve, providers)
//! - `convert` - Converter commands (records, prefix-map, expand, compress)
//! - `registry` - Whole-registry commands (lint, uri, export)
//! - `shared` - Shared utilities and validation functions

pub mod convert;
pub mod curie;
pub mod errors;
pub mod prefix;
pub mod registry;
pub mod shared;

pub use convert::handle_converter_command;
pub use curie::handle_curie_command;
pub use prefix::handle_prefix_command;
pub use registry::handle_registry_command;
