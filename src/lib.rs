//! tabprep: tabular dataset preparation with experiment tracking
//!
//! The crate covers the steps that sit in front of model training and the
//! smoke test that follows it:
//!
//! - [`validation`]: shape, class count and missing-value checks
//! - [`partition`]: seeded, stratified train/test splitting
//! - [`predict`]: one example through a model resolved from the registry
//! - [`tracking`]: parameters, metrics, tags and artifacts for every step
//! - [`storage::registry`]: versioned models with lifecycle stages
//!
//! Each step records onto a [`tracking::RunRecorder`] and reads through a
//! [`data::DatasetLoader`], so both can be swapped for in-memory doubles.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod partition;
pub mod predict;
pub mod storage;
pub mod tracking;
pub mod validation;

pub use error::{Error, Result};
