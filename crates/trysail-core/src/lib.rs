//! # trysail-core
//!
//! Core building blocks for talking to the Trysail control plane.
//!
//! This crate provides the configuration value, the structured error type and
//! the blocking JSON transport shared by every resource client in
//! `trysail-sdk`.
//!
//! ## Modules
//!
//! - [`config`] - Immutable client configuration
//! - [`error`] - Error type and HTTP failure mapping
//! - [`query`] - Query string construction
//! - [`client`] - HTTP client construction and the shared JSON transport

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use client::HttpTransport;
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use query::{build_query_string, QueryParams};
