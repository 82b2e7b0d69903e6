mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use picvault::config;
use picvault::repository::ImageRepository;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "picvault=trace,picvault_db=debug,picvault_common=debug".to_string()
        } else {
            "picvault=info,picvault_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Add {
            file,
            title,
            description,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(add_image(
                &file,
                title.as_deref(),
                description.as_deref(),
                cli.config.as_deref(),
            ))
        }
        Commands::List { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_images(json, cli.config.as_deref()))
        }
        Commands::Version => {
            println!("picvault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn add_image(
    file: &std::path::Path,
    title: Option<&str>,
    description: Option<&str>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let repo = ImageRepository::new(config.database_path());

    let id = repo.store_image_file(file, title, description).await?;
    println!("Stored image {} from {}", id, file.display());

    Ok(())
}

async fn list_images(json: bool, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let repo = ImageRepository::new(config.database_path());

    let images = repo.fetch_images().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
    } else if images.is_empty() {
        println!("No images stored.");
    } else {
        println!("{} image(s), newest first:", images.len());
        for image in &images {
            let size = repo.resolve(&image.url).map(|b| b.len()).unwrap_or(0);
            println!(
                "  {}  {} bytes  title={:?}  description={:?}",
                image.url, size, image.title, image.description
            );
        }
    }

    // This render owns the handles; release them once rendered.
    for image in &images {
        repo.revoke(&image.url);
    }

    Ok(())
}
