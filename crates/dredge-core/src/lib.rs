//! DredgeMap Core - Domain models, configuration and port definitions
//!
//! This crate contains the field-data domain (projects, dredge records,
//! boundaries, selection statistics) shared by every other dredgemap crate.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{DredgeError, Result};
