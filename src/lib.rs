//! # Burn Classifiers
#![forbid(unsafe_code)]

/// Reusable modules: encoders and classifiers
pub mod modules;

/// Concrete model families
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Text preprocessing
pub mod preprocessing;

/// Utilities
pub mod utils;

/// Error macros
#[macro_use]
extern crate anyhow;
