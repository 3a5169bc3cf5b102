// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

//! # Subset Filter
//!
//! This module derives the reduced secrets document for the images sub-service.
//!
//! The deployment tooling historically shipped three mutually incompatible ways
//! of deriving that subset under the same operation name. They are kept here as
//! three named policies behind one enum, selected explicitly by the caller (the
//! `create_images` command exposes the choice as a `--policy` flag), instead of
//! silently picking one of them.
//!
//! Whatever the policy, the output is always a fresh document containing only a
//! `secrets` sequence: no top-level field of any source document passes through.

use crate::{
    document::{SecretRecord, SecretsDocument},
    secrets_builder::{DB_SECRET_KEY, IMAGES_DB_SECRET_KEY, REDIS_SECRET_KEY, SEARCH_DB_SECRET_KEY},
};
use clap::ValueEnum;
use tracing::warn;

/// Keys the images service accepts in the minimal-dependency variant.
///
/// The images service rejects documents carrying unknown secret keys, so the
/// subset is strictly limited to what it reads.
pub const IMAGES_ALLOWED_KEYS: &[&str] = &[DB_SECRET_KEY, REDIS_SECRET_KEY];

/// Record copied from the main document by the overlay variant.
pub const OVERLAY_MAIN_KEY: &str = "images";

/// Keys copied verbatim from the main document by the two-source variant.
pub const TWO_SOURCE_MAIN_KEYS: &[&str] = &["admin-api.auth", "oauth", "csrf"];

/// Environment-sourced keys kept by the two-source variant.
pub const TWO_SOURCE_ENV_KEYS: &[&str] = &[DB_SECRET_KEY, REDIS_SECRET_KEY, IMAGES_DB_SECRET_KEY];

/// Policy for deriving the images subset from the main document and the
/// environment-derived records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterPolicy {
    /// Keep only the environment-derived records whose key is in
    /// [`IMAGES_ALLOWED_KEYS`]; the main document is not consulted.
    AllowListOverEnv,

    /// Copy the `images` record from the main document when present (warn and
    /// continue when absent), then append every environment-derived record
    /// except `search.db`.
    MainOverlayMinusSearch,

    /// Copy [`TWO_SOURCE_MAIN_KEYS`] verbatim from the main document (each
    /// absent key warns and is skipped), then append the environment-derived
    /// records in [`TWO_SOURCE_ENV_KEYS`], main-sourced records first.
    TwoSourceAllowList,
}

/// Derives the images subset document according to the given policy.
///
/// A key expected from the main document but absent there is a warning, never a
/// failure: the record is omitted and derivation continues.
pub fn create_subset(
    policy: FilterPolicy,
    main: &SecretsDocument,
    env_records: &[SecretRecord],
) -> SecretsDocument {
    let secrets = match policy {
        FilterPolicy::AllowListOverEnv => allow_list_over_env(env_records),
        FilterPolicy::MainOverlayMinusSearch => main_overlay_minus_search(main, env_records),
        FilterPolicy::TwoSourceAllowList => two_source_allow_list(main, env_records),
    };

    SecretsDocument {
        secrets,
        ..Default::default()
    }
}

fn allow_list_over_env(env_records: &[SecretRecord]) -> Vec<SecretRecord> {
    env_records
        .iter()
        .filter(|record| IMAGES_ALLOWED_KEYS.contains(&record.key.as_str()))
        .cloned()
        .collect()
}

fn main_overlay_minus_search(
    main: &SecretsDocument,
    env_records: &[SecretRecord],
) -> Vec<SecretRecord> {
    let mut secrets = Vec::with_capacity(env_records.len());

    match main.get(OVERLAY_MAIN_KEY) {
        Some(record) => secrets.push(record.clone()),
        None => warn!(
            key = OVERLAY_MAIN_KEY,
            "key not found in main document, omitting from subset"
        ),
    }

    secrets.extend(
        env_records
            .iter()
            .filter(|record| record.key != SEARCH_DB_SECRET_KEY)
            .cloned(),
    );

    secrets
}

fn two_source_allow_list(
    main: &SecretsDocument,
    env_records: &[SecretRecord],
) -> Vec<SecretRecord> {
    let mut secrets = Vec::with_capacity(TWO_SOURCE_MAIN_KEYS.len() + TWO_SOURCE_ENV_KEYS.len());

    for &key in TWO_SOURCE_MAIN_KEYS {
        match main.get(key) {
            Some(record) => secrets.push(record.clone()),
            None => warn!(key, "key not found in main document, omitting from subset"),
        }
    }

    // Env-sourced records follow in allow-list order, not builder order.
    for &key in TWO_SOURCE_ENV_KEYS {
        if let Some(record) = env_records.iter().find(|record| record.key == key) {
            secrets.push(record.clone());
        }
    }

    secrets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets_builder::SecretsBuilder;
    use pretty_assertions::assert_eq;

    fn env_records() -> Vec<SecretRecord> {
        SecretsBuilder::from_urls(
            "postgres://main".into(),
            "postgres://audit".into(),
            "postgres://search".into(),
            "redis://main".into(),
            "redis://analytic".into(),
        )
        .build()
    }

    fn keys(doc: &SecretsDocument) -> Vec<&str> {
        doc.secrets.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn allow_list_keeps_db_and_redis_in_builder_order() {
        let subset = create_subset(
            FilterPolicy::AllowListOverEnv,
            &SecretsDocument::default(),
            &env_records(),
        );

        assert_eq!(keys(&subset), vec!["db", "redis"]);
    }

    #[test]
    fn overlay_includes_main_images_record_first() {
        let main: SecretsDocument = serde_yaml::from_str(
            "secrets:\n- key: images\n  data:\n    object_storage: gcs\n",
        )
        .unwrap();

        let subset = create_subset(FilterPolicy::MainOverlayMinusSearch, &main, &env_records());

        assert_eq!(
            keys(&subset),
            vec!["images", "db", "audit.db", "images.db", "redis", "analytic.redis"]
        );
        assert_eq!(subset.secrets[0], main.secrets[0]);
    }

    #[test]
    fn overlay_with_missing_images_warns_and_omits() {
        let subset = create_subset(
            FilterPolicy::MainOverlayMinusSearch,
            &SecretsDocument::default(),
            &env_records(),
        );

        assert_eq!(
            keys(&subset),
            vec!["db", "audit.db", "images.db", "redis", "analytic.redis"]
        );
    }

    #[test]
    fn two_source_picks_exact_keys_and_never_other() {
        let main: SecretsDocument = serde_yaml::from_str(
            "\
secrets:
- key: admin-api.auth
  data:
    keys:
    - kid: a
- key: oauth
  data:
    keys:
    - kid: b
- key: csrf
  data:
    secret: s
- key: other
  data:
    value: v
",
        )
        .unwrap();

        let subset = create_subset(FilterPolicy::TwoSourceAllowList, &main, &env_records());

        assert_eq!(
            keys(&subset),
            vec!["admin-api.auth", "oauth", "csrf", "db", "redis", "images.db"]
        );
        // Main-sourced records are copied verbatim, nested data included.
        assert_eq!(subset.get("oauth").unwrap(), main.get("oauth").unwrap());
    }

    #[test]
    fn two_source_skips_missing_main_keys() {
        let main: SecretsDocument =
            serde_yaml::from_str("secrets:\n- key: csrf\n  data:\n    secret: s\n").unwrap();

        let subset = create_subset(FilterPolicy::TwoSourceAllowList, &main, &env_records());

        assert_eq!(keys(&subset), vec!["csrf", "db", "redis", "images.db"]);
    }

    #[test]
    fn subset_never_passes_through_top_level_fields() {
        let main: SecretsDocument =
            serde_yaml::from_str("id: main-config\nsecrets: []\n").unwrap();

        let subset = create_subset(FilterPolicy::AllowListOverEnv, &main, &env_records());

        assert!(subset.extra.is_empty());
        let out = serde_yaml::to_string(&subset).unwrap();
        assert!(!out.contains("main-config"));
    }
}
