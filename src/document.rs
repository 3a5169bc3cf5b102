// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Secrets Document
//!
//! This module provides the data model for the YAML secrets document consumed by
//! the deployment tooling: an ordered sequence of secret records under the
//! top-level `secrets` key, plus any other top-level fields the deployment system
//! stores alongside them.
//!
//! The document is read fresh from disk at the start of each invocation, mutated
//! in memory, and written back as a whole-file overwrite. Serialization happens
//! before the write, so a failed merge never leaves a corrupted document behind.

use crate::errors::SecretsError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::error;

/// One named configuration bundle inside a secrets document.
///
/// `key` is unique within a document's `secrets` sequence; `data` holds the
/// configuration values for that key. Records built from the environment carry
/// string or null values, while records copied verbatim from an existing main
/// document may carry arbitrary YAML (key material, nested mappings), hence
/// `serde_yaml::Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretRecord {
    pub key: String,
    pub data: BTreeMap<String, serde_yaml::Value>,
}

impl SecretRecord {
    /// Creates a record from string-or-absent values, mapping absent to null.
    pub fn from_entries(key: &str, entries: &[(&str, Option<&str>)]) -> SecretRecord {
        let data = entries
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Some(v) => serde_yaml::Value::String((*v).into()),
                    None => serde_yaml::Value::Null,
                };
                ((*name).into(), value)
            })
            .collect();

        SecretRecord {
            key: key.into(),
            data,
        }
    }
}

/// The top-level YAML structure holding an ordered sequence of secret records.
///
/// Top-level fields other than `secrets` are captured in `extra` and written
/// back unchanged by a merge. A document created for a filtered subset carries
/// only `secrets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretsDocument {
    #[serde(default)]
    pub secrets: Vec<SecretRecord>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl SecretsDocument {
    /// Loads a document from the given path.
    ///
    /// An empty file parses as an empty document. An unreadable path or
    /// malformed YAML is fatal.
    ///
    /// # Errors
    ///
    /// Returns `SecretsError::DocumentReadError` if the file cannot be read and
    /// `SecretsError::DocumentParseError` if its content is not a valid secrets
    /// document.
    pub fn load(path: &Path) -> Result<SecretsDocument, SecretsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    error = err.to_string(),
                    path = %path.display(),
                    "error to read secrets document"
                );
                return Err(SecretsError::DocumentReadError(err.to_string()));
            }
        };

        // An empty or whitespace-only file deserializes as YAML null, not as a
        // mapping, so it is short-circuited to the empty document here.
        if raw.trim().is_empty() {
            return Ok(SecretsDocument::default());
        }

        match serde_yaml::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                error!(
                    error = err.to_string(),
                    path = %path.display(),
                    "error to parse secrets document"
                );
                Err(SecretsError::DocumentParseError(err.to_string()))
            }
        }
    }

    /// Loads a document from the given path, substituting an empty document if
    /// the path does not exist.
    ///
    /// Malformed YAML in an existing file remains fatal; only absence is
    /// forgiven on this path.
    ///
    /// # Errors
    ///
    /// Same as [`SecretsDocument::load`], except for the missing-file case.
    pub fn load_or_default(path: &Path) -> Result<SecretsDocument, SecretsError> {
        if !path.exists() {
            return Ok(SecretsDocument::default());
        }

        SecretsDocument::load(path)
    }

    /// Serializes the document as block-style YAML and writes it to the given
    /// path, overwriting any existing file.
    ///
    /// The document is serialized in full before the write starts, so a
    /// serialization failure leaves the target file untouched.
    ///
    /// # Errors
    ///
    /// Returns `SecretsError::DocumentSerializeError` if the document cannot be
    /// serialized and `SecretsError::DocumentWriteError` if the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), SecretsError> {
        let out = match serde_yaml::to_string(self) {
            Ok(out) => out,
            Err(err) => {
                error!(
                    error = err.to_string(),
                    "error to serialize secrets document"
                );
                return Err(SecretsError::DocumentSerializeError(err.to_string()));
            }
        };

        match fs::write(path, out) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(
                    error = err.to_string(),
                    path = %path.display(),
                    "error to write secrets document"
                );
                Err(SecretsError::DocumentWriteError(err.to_string()))
            }
        }
    }

    /// Returns the record with the given key, if present.
    pub fn get(&self, key: &str) -> Option<&SecretRecord> {
        self.secrets.iter().find(|record| record.key == key)
    }

    /// Updates the record with a matching key in place, or appends the record
    /// if no match exists.
    ///
    /// Existing records keep their position in the sequence; new records are
    /// appended at the end. This preserves the key-uniqueness invariant of the
    /// `secrets` sequence.
    pub fn upsert(&mut self, record: SecretRecord) {
        match self
            .secrets
            .iter_mut()
            .find(|existing| existing.key == record.key)
        {
            Some(existing) => existing.data = record.data,
            None => self.secrets.push(record),
        }
    }

    /// Upserts every record in order.
    pub fn merge_records(&mut self, records: Vec<SecretRecord>) {
        for record in records {
            self.upsert(record);
        }
    }

    /// Keeps only the records whose key is in the given allow-list.
    pub fn retain_keys(&mut self, keys: &[String]) {
        self.secrets
            .retain(|record| keys.iter().any(|key| key == &record.key));
    }
}
