//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::new::NewPost;
use folio::navigation::Collection;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A personal-site content browser for markdown posts and demos", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post document
    New {
        /// Title of the new post
        title: String,

        /// Collection to add the post to (blog, data-demo)
        #[arg(short, long, default_value = "blog")]
        collection: Collection,

        /// Cover image URL or path
        #[arg(long, default_value = "")]
        image: String,

        /// One-line summary
        #[arg(long, default_value = "")]
        summary: String,
    },

    /// List posts and demos
    List {
        /// Collection to list (blog, data-demo, model-demo); all when omitted
        collection: Option<String>,
    },

    /// Print one post or demo
    Show {
        /// Collection (blog, data-demo, model-demo)
        collection: String,

        /// Index in the collection listing
        index: usize,
    },

    /// Run a model demo by name
    Demo {
        /// Demo name, e.g. sine_wave
        name: String,
    },

    /// Start the browsing server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,

        /// Do not reload content when files change
        #[arg(long)]
        r#static: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            collection,
            image,
            summary,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let path = site.new_post(&NewPost {
                title,
                collection,
                image,
                summary,
            })?;
            println!("Created: {:?}", path);
        }

        Commands::List { collection } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, collection.as_deref())?;
        }

        Commands::Show { collection, index } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &collection, index)?;
        }

        Commands::Demo { name } => {
            folio::commands::demo::run(&name)?;
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
