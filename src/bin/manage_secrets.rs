// Copyright (c) 2026, The Secrets Builder Authors
// MIT License
// All rights reserved.

use clap::{Parser, Subcommand};
use secrets_builder::{FilterPolicy, SecretsBuilder, SecretsDocument, create_subset};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "manage_secrets",
    about = "Assemble the secrets YAML document for the service deployment variants"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge environment-derived secrets into the main document, in place
    #[command(name = "merge_main")]
    MergeMain {
        /// Path to the main secrets document (created if absent)
        main_file: PathBuf,
    },
    /// Create the reduced secrets document for the images sub-service
    #[command(name = "create_images")]
    CreateImages {
        /// Path to the main secrets document (read leniently)
        main_file: PathBuf,
        /// Path the subset document is written to
        output_file: PathBuf,
        /// Policy used to derive the subset
        #[arg(long, value_enum, default_value = "allow-list-over-env")]
        policy: FilterPolicy,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    SecretsBuilder::load_envs();

    match cli.command {
        Commands::MergeMain { main_file } => {
            let mut doc = SecretsDocument::load_or_default(&main_file)?;
            doc.merge_records(SecretsBuilder::from_env().build());
            doc.save(&main_file)?;
            println!("Updated {}", main_file.display());
        }
        Commands::CreateImages {
            main_file,
            output_file,
            policy,
        } => {
            let main = SecretsDocument::load_or_default(&main_file)?;
            let records = SecretsBuilder::from_env().build();
            let subset = create_subset(policy, &main, &records);
            subset.save(&output_file)?;
            println!("Created {}", output_file.display());
        }
    }

    Ok(())
}
