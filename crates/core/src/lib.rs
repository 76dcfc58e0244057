//! Core library for the SharePoint agent
//!
//! This crate contains everything that talks to the platform:
//! - Configuration loading and validation
//! - Credential resolution
//! - Agent Service wire types and the project client

pub mod agent;
pub mod auth;
pub mod config;
pub mod error;
pub mod run;
pub mod thread;

pub use config::Config;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
