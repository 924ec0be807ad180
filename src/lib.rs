//! LCD theme toolkit library.
//!
//! Reads and writes the themes used by auxiliary LCD sensor panels: the
//! line-oriented description file, the vendor JSON scheme and the portable
//! `.smtheme` archive. The `ltk` binary is a thin layer over these modules.
//!
//! # Modules
//!
//! - `description`: Description file parser and generator
//! - `model`: Parsed themes and editable projects
//! - `validate`: Layout and style checks
//! - `scheme`: Vendor JSON schemes and scheme catalogs
//! - `export`: Installable theme folders
//! - `archive`: `.smtheme` packaging
//! - `config`: Configuration file handling
//! - `output`: Output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod archive;
pub mod cli;
pub mod config;
pub mod description;
pub mod error;
pub mod export;
pub mod image_ops;
pub mod logging;
pub mod model;
pub mod output;
pub mod scheme;
pub mod validate;

pub use error::{Result, ThemeError};
