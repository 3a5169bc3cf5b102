// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Secrets Builder
//!
//! `secrets_builder` is a library that assembles the YAML "secrets" configuration document
//! consumed by the deployment variants of the backend service (the main service and its
//! "images" sub-service) from environment variables and pre-existing YAML files.
//!
//! It backs the `manage_secrets` and `update_config` command line utilities shipped with
//! this crate.
//!
//! ## Features
//!
//! - Fixed set of secret records built from environment variables or explicit URLs
//! - Position-preserving upsert into an existing document's `secrets` sequence
//! - Pass-through of unrelated top-level document fields across a merge
//! - Named filter policies for deriving the images sub-service subset
//! - Block-style YAML output, written only after a successful in-memory merge
//!
//! ## Example
//!
//! ```rust,no_run
//! use secrets_builder::{SecretsBuilder, SecretsDocument};
//! use std::path::Path;
//!
//! fn merge_main() -> Result<(), secrets_builder::errors::SecretsError> {
//!     let path = Path::new("main.secrets.yaml");
//!
//!     let mut doc = SecretsDocument::load_or_default(path)?;
//!     doc.merge_records(SecretsBuilder::from_env().build());
//!     doc.save(path)?;
//!
//!     Ok(())
//! }
//! ```

mod document;
mod filter;
mod secrets_builder;

pub mod env_keys;
pub mod errors;

pub use document::{SecretRecord, SecretsDocument};
pub use filter::{FilterPolicy, create_subset};
pub use secrets_builder::SecretsBuilder;
