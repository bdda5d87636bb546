//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Footer line shown under the navigation
    pub copyright: String,
    pub banner_image: String,

    // Directory
    pub blog_dir: String,
    pub data_dir: String,
    /// Markdown file rendered in the CV tab, relative to the base directory
    pub cv_file: Option<String>,
    /// File extensions treated as post documents
    pub extensions: Vec<String>,

    // Parsing
    /// Reject documents whose image/summary lines lack their label prefix
    pub strict_front_matter: bool,
    /// What to do when a document in a collection cannot be loaded
    pub on_malformed: MalformedPolicy,

    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Welcome to My Website!".to_string(),
            subtitle: String::new(),
            author: "Johanna Bayer".to_string(),
            copyright: String::new(),
            banner_image: "https://via.placeholder.com/800x300".to_string(),

            blog_dir: "posts".to_string(),
            data_dir: "data_posts".to_string(),
            cv_file: Some("cv.md".to_string()),
            extensions: vec!["md".to_string()],

            strict_front_matter: false,
            on_malformed: MalformedPolicy::Skip,

            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rest of the site cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.server.session_ttl_minutes == 0 {
            bail!("server.session_ttl_minutes must be at least 1");
        }
        Ok(())
    }

    /// Footer text, falling back to the author and current year
    pub fn footer(&self) -> String {
        if self.copyright.is_empty() {
            format!("(C) {}, {}", self.author, chrono::Local::now().format("%Y"))
        } else {
            self.copyright.clone()
        }
    }
}

/// Policy for documents that fail to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log a warning and leave the document out of its collection
    Skip,
    /// Fail the whole collection load
    Abort,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    /// Idle sessions older than this are dropped
    pub session_ttl_minutes: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
            session_ttl_minutes: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.blog_dir, "posts");
        assert_eq!(config.data_dir, "data_posts");
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
        assert!(!config.strict_front_matter);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.author, "Johanna Bayer");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
copyright: (C) Test User, 2024
on_malformed: abort
strict_front_matter: true
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.on_malformed, MalformedPolicy::Abort);
        assert!(config.strict_front_matter);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.session_ttl_minutes, 60);
        assert_eq!(config.blog_dir, "posts");
        assert_eq!(config.footer(), "(C) Test User, 2024");
    }

    #[test]
    fn test_footer_falls_back_to_author() {
        let config = SiteConfig {
            author: "Jo".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.footer().starts_with("(C) Jo, "));
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        let negative = "server:\n  session_ttl_minutes: -5\n";
        assert!(serde_yaml::from_str::<SiteConfig>(negative).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "server:\n  session_ttl_minutes: 0\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("session_ttl_minutes"));

        fs::write(&path, "server:\n  session_ttl_minutes: 15\n").unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap().server.session_ttl_minutes, 15);
    }
}
