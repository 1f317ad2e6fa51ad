//! Persistent stores shared by the pipeline steps

pub mod registry;
