// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Environment Keys
//!
//! This module contains constant definitions for environment variable keys used throughout the
//! application for configuration purposes.
//!
//! These constants are used by the SecretsBuilder to read values from environment variables or
//! .env files, allowing for a flexible configuration mechanism across different environments.

/// Environment file names for different deployment environments
pub const LOCAL_ENV_FILE_NAME: &str = "./.env.local";
pub const DEV_ENV_FILE_NAME: &str = "./.env.develop";
pub const STAGING_FILE_NAME: &str = "./.env.staging";
pub const PROD_FILE_NAME: &str = "./.env.prod";

/// Main database connection
pub const DATABASE_SCHEMA_ENV_KEY: &str = "DATABASE_SCHEMA";
pub const DATABASE_URL_ENV_KEY: &str = "DATABASE_URL";

/// Audit database connection
pub const AUDIT_DATABASE_SCHEMA_ENV_KEY: &str = "AUDIT_DATABASE_SCHEMA";
pub const AUDIT_DATABASE_URL_ENV_KEY: &str = "AUDIT_DATABASE_URL";

/// Search database connection
pub const SEARCH_DATABASE_SCHEMA_ENV_KEY: &str = "SEARCH_DATABASE_SCHEMA";
pub const SEARCH_DATABASE_URL_ENV_KEY: &str = "SEARCH_DATABASE_URL";

/// Redis connections
pub const REDIS_URL_ENV_KEY: &str = "REDIS_URL";
pub const ANALYTIC_REDIS_URL_ENV_KEY: &str = "ANALYTIC_REDIS_URL";
