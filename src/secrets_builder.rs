// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Secrets Builder
//!
//! This module provides the main `SecretsBuilder` implementation which is responsible
//! for producing the fixed set of environment-derived secret records consumed by the
//! deployment variants of the service.
//!
//! The builder captures its inputs once at the process boundary and is a pure
//! function of its fields from then on. This keeps record construction testable
//! without touching real environment variables and makes the two schema-resolution
//! variants that exist in the deployment tooling an explicit constructor choice:
//!
//! 1. **Environment-driven** (`from_env`): schema names come from environment
//!    variables with a `"public"` fallback. Used by the in-place merge of the main
//!    service document.
//!
//! 2. **Fixed literals** (`from_urls`): connection URLs are passed as parameters and
//!    the audit/search schema names are the fixed literals `"audit"` and `"search"`.
//!    Used by the parameterized one-pass merge-then-filter utility.
//!
//! A missing environment variable is never an error at this stage: the record is
//! emitted with a null value and downstream consumers decide whether that is fatal.

use crate::{
    document::SecretRecord,
    env_keys::{
        ANALYTIC_REDIS_URL_ENV_KEY, AUDIT_DATABASE_SCHEMA_ENV_KEY, AUDIT_DATABASE_URL_ENV_KEY,
        DATABASE_SCHEMA_ENV_KEY, DATABASE_URL_ENV_KEY, DEV_ENV_FILE_NAME, LOCAL_ENV_FILE_NAME,
        PROD_FILE_NAME, REDIS_URL_ENV_KEY, SEARCH_DATABASE_SCHEMA_ENV_KEY,
        SEARCH_DATABASE_URL_ENV_KEY, STAGING_FILE_NAME,
    },
};
use dotenvy::from_filename;
use std::env;

/// Secret record keys, in the fixed order the builder emits them.
pub const DB_SECRET_KEY: &str = "db";
pub const AUDIT_DB_SECRET_KEY: &str = "audit.db";
pub const IMAGES_DB_SECRET_KEY: &str = "images.db";
pub const SEARCH_DB_SECRET_KEY: &str = "search.db";
pub const REDIS_SECRET_KEY: &str = "redis";
pub const ANALYTIC_REDIS_SECRET_KEY: &str = "analytic.redis";

/// Fallback schema name when a schema environment variable is absent.
pub const DEFAULT_DATABASE_SCHEMA: &str = "public";

/// The builder for the fixed set of environment-derived secret records.
///
/// All inputs are captured in the struct, so `build` has no side effects and no
/// hidden dependency on process state. Schemas are always present (they carry a
/// fallback); URLs may be absent, which surfaces as a null value in the record
/// data rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsBuilder {
    pub database_schema: String,
    pub database_url: Option<String>,
    pub audit_database_schema: String,
    pub audit_database_url: Option<String>,
    pub search_database_schema: String,
    pub search_database_url: Option<String>,
    pub redis_url: Option<String>,
    pub analytic_redis_url: Option<String>,
}

impl SecretsBuilder {
    /// Captures the builder inputs from the current process environment.
    ///
    /// Schema names fall back to [`DEFAULT_DATABASE_SCHEMA`] when their variable
    /// is absent; connection URLs have no fallback and are captured as `None`.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_SCHEMA`: schema for the main and images databases (default: "public")
    /// - `DATABASE_URL`: connection URL for the main and images databases
    /// - `AUDIT_DATABASE_SCHEMA`: schema for the audit database (default: "public")
    /// - `AUDIT_DATABASE_URL`: connection URL for the audit database
    /// - `SEARCH_DATABASE_SCHEMA`: schema for the search database (default: "public")
    /// - `SEARCH_DATABASE_URL`: connection URL for the search database
    /// - `REDIS_URL`: connection URL for the main Redis
    /// - `ANALYTIC_REDIS_URL`: connection URL for the analytics Redis
    pub fn from_env() -> SecretsBuilder {
        SecretsBuilder {
            database_schema: schema_or_default(DATABASE_SCHEMA_ENV_KEY),
            database_url: env::var(DATABASE_URL_ENV_KEY).ok(),
            audit_database_schema: schema_or_default(AUDIT_DATABASE_SCHEMA_ENV_KEY),
            audit_database_url: env::var(AUDIT_DATABASE_URL_ENV_KEY).ok(),
            search_database_schema: schema_or_default(SEARCH_DATABASE_SCHEMA_ENV_KEY),
            search_database_url: env::var(SEARCH_DATABASE_URL_ENV_KEY).ok(),
            redis_url: env::var(REDIS_URL_ENV_KEY).ok(),
            analytic_redis_url: env::var(ANALYTIC_REDIS_URL_ENV_KEY).ok(),
        }
    }

    /// Captures the builder inputs from explicit connection URLs, using the
    /// fixed schema literals of the parameterized utility: `"public"` for the
    /// main and images databases, `"audit"` and `"search"` for the others.
    pub fn from_urls(
        db_url: String,
        audit_db_url: String,
        search_db_url: String,
        redis_url: String,
        analytic_redis_url: String,
    ) -> SecretsBuilder {
        SecretsBuilder {
            database_schema: DEFAULT_DATABASE_SCHEMA.into(),
            database_url: Some(db_url),
            audit_database_schema: "audit".into(),
            audit_database_url: Some(audit_db_url),
            search_database_schema: "search".into(),
            search_database_url: Some(search_db_url),
            redis_url: Some(redis_url),
            analytic_redis_url: Some(analytic_redis_url),
        }
    }

    /// Loads environment variables from the appropriate .env file based on the
    /// current environment.
    ///
    /// Environment detection is based on the `RUST_ENV` environment variable:
    /// - "production" → .env.prod
    /// - "staging" → .env.staging
    /// - "develop" → .env.develop
    /// - any other value or not set → .env.local
    ///
    /// If the environment file doesn't exist, the loading operation is silently
    /// ignored and the process continues with the existing environment variables.
    pub fn load_envs() {
        let file = match env::var("RUST_ENV").unwrap_or_default().as_str() {
            "production" | "prod" => PROD_FILE_NAME,
            "staging" | "stg" => STAGING_FILE_NAME,
            "develop" | "dev" => DEV_ENV_FILE_NAME,
            _ => LOCAL_ENV_FILE_NAME,
        };

        from_filename(file).ok();
    }

    /// Produces the fixed, ordered list of secret records.
    ///
    /// The result always contains exactly six records with the keys `db`,
    /// `audit.db`, `images.db`, `search.db`, `redis` and `analytic.redis`, in
    /// that order. The `images.db` record mirrors `db`: the images sub-service
    /// shares the main database.
    pub fn build(&self) -> Vec<SecretRecord> {
        vec![
            SecretRecord::from_entries(
                DB_SECRET_KEY,
                &[
                    ("database_schema", Some(self.database_schema.as_str())),
                    ("database_url", self.database_url.as_deref()),
                ],
            ),
            SecretRecord::from_entries(
                AUDIT_DB_SECRET_KEY,
                &[
                    ("database_schema", Some(self.audit_database_schema.as_str())),
                    ("database_url", self.audit_database_url.as_deref()),
                ],
            ),
            SecretRecord::from_entries(
                IMAGES_DB_SECRET_KEY,
                &[
                    ("database_schema", Some(self.database_schema.as_str())),
                    ("database_url", self.database_url.as_deref()),
                ],
            ),
            SecretRecord::from_entries(
                SEARCH_DB_SECRET_KEY,
                &[
                    ("database_schema", Some(self.search_database_schema.as_str())),
                    ("database_url", self.search_database_url.as_deref()),
                ],
            ),
            SecretRecord::from_entries(
                REDIS_SECRET_KEY,
                &[("redis_url", self.redis_url.as_deref())],
            ),
            SecretRecord::from_entries(
                ANALYTIC_REDIS_SECRET_KEY,
                &[("redis_url", self.analytic_redis_url.as_deref())],
            ),
        ]
    }
}

fn schema_or_default(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| DEFAULT_DATABASE_SCHEMA.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn empty_builder() -> SecretsBuilder {
        SecretsBuilder {
            database_schema: DEFAULT_DATABASE_SCHEMA.into(),
            database_url: None,
            audit_database_schema: DEFAULT_DATABASE_SCHEMA.into(),
            audit_database_url: None,
            search_database_schema: DEFAULT_DATABASE_SCHEMA.into(),
            search_database_url: None,
            redis_url: None,
            analytic_redis_url: None,
        }
    }

    #[test]
    fn builds_six_records_in_fixed_order() {
        let records = empty_builder().build();

        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "db",
                "audit.db",
                "images.db",
                "search.db",
                "redis",
                "analytic.redis"
            ]
        );
    }

    #[test]
    fn absent_urls_yield_null_values() {
        let records = empty_builder().build();

        for record in &records {
            for value in record.data.values() {
                if record.key.ends_with("redis") {
                    assert_eq!(value, &serde_yaml::Value::Null);
                }
            }
            if record.key.ends_with(".db") || record.key == "db" {
                assert_eq!(record.data["database_url"], serde_yaml::Value::Null);
                assert_eq!(
                    record.data["database_schema"],
                    serde_yaml::Value::String("public".into())
                );
            }
        }
    }

    #[test]
    fn from_urls_uses_fixed_schema_literals() {
        let builder = SecretsBuilder::from_urls(
            "postgres://main".into(),
            "postgres://audit".into(),
            "postgres://search".into(),
            "redis://main".into(),
            "redis://analytic".into(),
        );
        let records = builder.build();

        let schema = |key: &str| {
            records
                .iter()
                .find(|r| r.key == key)
                .unwrap()
                .data["database_schema"]
                .clone()
        };

        assert_eq!(schema("db"), serde_yaml::Value::String("public".into()));
        assert_eq!(schema("audit.db"), serde_yaml::Value::String("audit".into()));
        assert_eq!(schema("search.db"), serde_yaml::Value::String("search".into()));
    }

    #[test]
    fn images_db_mirrors_db() {
        let mut builder = empty_builder();
        builder.database_schema = "tenant".into();
        builder.database_url = Some("postgres://main".into());

        let records = builder.build();
        let db = records.iter().find(|r| r.key == "db").unwrap();
        let images_db = records.iter().find(|r| r.key == "images.db").unwrap();

        assert_eq!(db.data, images_db.data);
    }

    #[test]
    fn redis_records_carry_only_redis_url() {
        let mut builder = empty_builder();
        builder.redis_url = Some("redis://main".into());

        let records = builder.build();
        let redis = records.iter().find(|r| r.key == "redis").unwrap();

        assert_eq!(redis.data.len(), 1);
        assert_eq!(
            redis.data["redis_url"],
            serde_yaml::Value::String("redis://main".into())
        );
    }
}
