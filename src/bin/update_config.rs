// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

use clap::Parser;
use secrets_builder::{SecretsBuilder, SecretsDocument};
use std::path::PathBuf;

/// Parameterized merge-then-filter over an existing secrets document.
///
/// Unlike `manage_secrets merge_main`, the input document must exist and the
/// result is written to a separate output path, leaving the input untouched.
#[derive(Parser)]
#[command(name = "update_config")]
struct Cli {
    /// Existing secrets document to start from
    input_file: PathBuf,
    /// Path the updated document is written to
    output_file: PathBuf,
    /// Connection URL for the main and images databases
    db_url: String,
    /// Connection URL for the audit database
    audit_db_url: String,
    /// Connection URL for the search database
    search_db_url: String,
    /// Connection URL for the main Redis
    redis_url: String,
    /// Connection URL for the analytics Redis
    analytic_redis_url: String,
    /// Comma-separated allow-list of secret keys to keep
    #[arg(value_delimiter = ',')]
    filter_keys: Option<Vec<String>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let builder = SecretsBuilder::from_urls(
        cli.db_url,
        cli.audit_db_url,
        cli.search_db_url,
        cli.redis_url,
        cli.analytic_redis_url,
    );

    let mut doc = SecretsDocument::load(&cli.input_file)?;
    doc.merge_records(builder.build());

    if let Some(keys) = &cli.filter_keys {
        doc.retain_keys(keys);
    }

    doc.save(&cli.output_file)?;

    Ok(())
}
