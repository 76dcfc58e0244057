//! Agent runs

mod run_model;

pub use run_model::*;
