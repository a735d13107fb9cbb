mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            images_root,
            out,
            csv,
            per_pack,
            count,
            seed,
        } => {
            commands::generate::handle(&config, &images_root, &out, &csv, per_pack, count, seed)?;
        }

        Commands::Scan { images_root } => {
            commands::scan::handle(&images_root)?;
        }

        Commands::PackLog {
            csv,
            packs_dir,
            out,
        } => {
            commands::pack_log::handle(&csv, &packs_dir, &out)?;
        }

        Commands::Metadata {
            images,
            out,
            pins,
            template,
            attributes,
        } => {
            commands::metadata::handle(
                &images,
                &out,
                pins.as_deref(),
                template.as_deref(),
                attributes.as_deref(),
            )?;
        }
    }

    Ok(())
}
