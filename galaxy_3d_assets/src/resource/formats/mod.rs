//! Built-in loader and saver strategies
//!
//! - `.bin`: raw bytes into a `DataResource`
//! - `.gmat`: JSON material descriptor

mod data_format;
mod material_format;

pub use data_format::{DataLoader, DataSaver};
pub use material_format::{MaterialLoader, MaterialSaver, MATERIAL_EXTENSION};
