//! folio: a personal-site content browser
//!
//! Blog and data-demo posts are read from fixed-layout markdown documents,
//! model demos come from a static registry, and every visitor session keeps
//! its own list/detail navigation state for each collection.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod content;
pub mod demos;
pub mod navigation;
pub mod server;
pub mod session;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use catalog::Catalog;

/// The main site handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Blog post documents
    pub blog_dir: PathBuf,
    /// Data demo post documents
    pub data_dir: PathBuf,
    /// CV markdown file
    pub cv_path: Option<PathBuf>,
}

impl Folio {
    /// Create a new site handle from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir.as_ref());
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site handle with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let blog_dir = base_dir.join(&config.blog_dir);
        let data_dir = base_dir.join(&config.data_dir);
        let cv_path = config.cv_file.as_ref().map(|f| base_dir.join(f));

        Self {
            config,
            base_dir,
            blog_dir,
            data_dir,
            cv_path,
        }
    }

    /// Path of the site configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Load all collections
    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load(self)
    }

    /// Create a new post document
    pub fn new_post(&self, options: &commands::new::NewPost) -> Result<PathBuf> {
        commands::new::create_post(self, options)
    }
}
