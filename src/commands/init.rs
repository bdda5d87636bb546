//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::compose_document;

const CONFIG: &str = r#"# Site
title: Welcome to My Website!
subtitle: ''
author: Johanna Bayer
copyright: ''
banner_image: https://via.placeholder.com/800x300

# Directory
blog_dir: posts
data_dir: data_posts
cv_file: cv.md
extensions: [md]

# Parsing
strict_front_matter: false
# skip: leave broken documents out with a warning
# abort: refuse to load the collection
on_malformed: skip

highlight:
  theme: base16-ocean.dark
  line_number: true

server:
  ip: localhost
  port: 4000
  session_ttl_minutes: 60
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("data_posts"))?;
    fs::write(&config_path, CONFIG)?;

    fs::write(
        target_dir.join("posts/hello-world.md"),
        compose_document(
            "Hello World",
            "https://via.placeholder.com/400x200",
            "The first post on this site.",
            "Welcome! Create a new post with:\n\n```bash\n$ folio new \"My New Post\"\n```\n\nThen start the server:\n\n```bash\n$ folio server\n```\n",
        ),
    )?;

    fs::write(
        target_dir.join("data_posts/sample-dataset.md"),
        compose_document(
            "Exploring a Sample Dataset",
            "https://via.placeholder.com/400x200",
            "A first look at a small sample dataset.",
            "This post walks through a **sample dataset** with four categories.\n\n| Category | Values |\n| --- | --- |\n| A | 12 |\n| B | 47 |\n| C | 30 |\n| D | 8 |\n",
        ),
    )?;

    fs::write(target_dir.join("cv.md"), "## Experience\n\n- ...\n")?;

    tracing::info!("Created site skeleton in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Collection;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_loads() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.author, "Johanna Bayer");
        let catalog = folio.load_catalog().unwrap();
        assert_eq!(catalog.len(Collection::Blog), 1);
        assert_eq!(catalog.len(Collection::DataDemo), 1);
        assert_eq!(catalog.blog_posts[0].title, "Hello World");
        assert!(catalog.data_posts[0].content.contains("<table>"));
        assert!(catalog.cv.is_some());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
