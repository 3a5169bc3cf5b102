// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Errors
//!
//! Error types for the secrets_builder crate.
//!
//! This module defines the error types that can occur while assembling a secrets
//! document, particularly related to reading, parsing, serializing and writing
//! YAML documents. Using dedicated error types improves error handling and
//! diagnostics throughout the application.
//!
//! The errors in this module are designed to:
//! - Provide clear and specific error messages
//! - Enable proper error handling by consumers of the library
//! - Support structured logging for better error diagnostics

use thiserror::Error;

/// Errors that can occur while assembling a secrets document.
///
/// This enum represents the various error conditions that might arise while
/// loading, merging or writing a secrets document. Each variant corresponds
/// to a specific error scenario and includes appropriate context information.
///
/// Missing environment variables and missing allow-listed keys are deliberately
/// NOT errors: the builder emits null values and the filter policies emit
/// warnings, leaving the decision to downstream consumers of the document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretsError {
    /// Error that occurred while reading a secrets document from disk.
    ///
    /// This error indicates that the document path could not be read at all.
    /// On the lenient load path a missing file is substituted with an empty
    /// document instead of producing this error.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the read error
    #[error("error to read secrets document - `{0}`")]
    DocumentReadError(String),

    /// Error that occurred while parsing a secrets document.
    ///
    /// Malformed YAML is never locally recovered; the in-memory document is
    /// left untouched and the error propagates to the process boundary.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the parse error
    #[error("error to parse secrets document - `{0}`")]
    DocumentParseError(String),

    /// Error that occurred while serializing a secrets document to YAML.
    ///
    /// Serialization happens before any byte is written to disk, so this
    /// error never leaves a partially written document behind.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the serialization error
    #[error("error to serialize secrets document - `{0}`")]
    DocumentSerializeError(String),

    /// Error that occurred while writing a secrets document to disk.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the write error
    #[error("error to write secrets document - `{0}`")]
    DocumentWriteError(String),
}
