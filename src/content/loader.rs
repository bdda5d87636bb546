//! Content loader - loads post collections from content directories

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, MarkdownRenderer, Post, PostParser};
use crate::config::MalformedPolicy;
use crate::Folio;

/// Loads posts from the site's content directories
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    parser: PostParser,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::from_config(&folio.config.highlight);
        let parser = PostParser::new(renderer).strict(folio.config.strict_front_matter);
        Self { folio, parser }
    }

    /// Load the blog collection
    pub fn load_blog_posts(&self) -> Result<Vec<Post>> {
        self.load_dir(&self.folio.blog_dir)
    }

    /// Load the data demo collection
    pub fn load_data_posts(&self) -> Result<Vec<Post>> {
        self.load_dir(&self.folio.data_dir)
    }

    /// Load every post document directly inside `dir`, ordered by file name
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<Post>> {
        if !dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(dir).to_path_buf();
                    if path != dir && !self.is_post_file(&path) {
                        tracing::debug!("Ignoring unreadable entry {:?}: {}", path, err);
                        continue;
                    }
                    let source = err.into_io_error().unwrap_or_else(|| {
                        io::Error::new(io::ErrorKind::Other, "filesystem loop")
                    });
                    let error = ContentError::Unavailable {
                        path: path.clone(),
                        source,
                    };
                    self.on_failure(&path, error)?;
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.is_post_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) => posts.push(post),
                Err(e) => self.on_failure(path, e)?,
            }
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), dir);
        Ok(posts)
    }

    /// Apply the configured policy to a document that failed to load
    fn on_failure(&self, path: &Path, error: ContentError) -> Result<()> {
        match self.folio.config.on_malformed {
            MalformedPolicy::Skip => {
                tracing::warn!("Skipping {:?}: {}", path, error);
                Ok(())
            }
            MalformedPolicy::Abort => Err(anyhow::Error::new(error)
                .context(format!("failed to load {}", path.display()))),
        }
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let document = fs::read_to_string(path).map_err(|source| ContentError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut post = self.parser.load_post(&document)?;
        post.source = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(post)
    }

    /// Render an optional standalone markdown file (the CV page)
    pub fn load_markdown(&self, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }
        let markdown = fs::read_to_string(path)?;
        Ok(Some(self.parser.renderer().render(&markdown)))
    }

    fn is_post_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.folio.config.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn post_doc(title: &str) -> String {
        format!("# {}\nimage: {}.png\nsummary: about {}\n\nBody of {}\n", title, title, title, title)
    }

    fn folio_with(config: SiteConfig, base: &Path) -> Folio {
        Folio::with_config(base, config)
    }

    #[test]
    fn test_load_sorted_by_file_name() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        write(&posts_dir, "b.md", &post_doc("Second"));
        write(&posts_dir, "a.md", &post_doc("First"));
        write(&posts_dir, "c.md", &post_doc("Third"));
        write(&posts_dir, "notes.txt", "ignored");

        let folio = folio_with(SiteConfig::default(), tmp.path());
        let posts = ContentLoader::new(&folio).load_blog_posts().unwrap();

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
        assert_eq!(posts[0].source, "a.md");
        assert_eq!(posts[0].image, "First.png");
        assert_eq!(posts[0].content, "<p>Body of First</p>\n");
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let folio = folio_with(SiteConfig::default(), tmp.path());
        let posts = ContentLoader::new(&folio).load_data_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_skip_malformed() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("data_posts");
        write(&data_dir, "1.md", &post_doc("Good"));
        write(&data_dir, "2.md", "# Too short\n");
        write(&data_dir, "3.md", &post_doc("Also good"));

        let folio = folio_with(SiteConfig::default(), tmp.path());
        let posts = ContentLoader::new(&folio).load_data_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Good", "Also good"]);
    }

    #[test]
    fn test_abort_on_malformed() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        write(&posts_dir, "1.md", &post_doc("Good"));
        write(&posts_dir, "2.md", "# Too short\n");

        let config = SiteConfig {
            on_malformed: MalformedPolicy::Abort,
            ..SiteConfig::default()
        };
        let folio = folio_with(config, tmp.path());
        let err = ContentLoader::new(&folio).load_blog_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::MalformedDocument { found: 1 })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_follows_policy() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        write(&posts_dir, "1.md", &post_doc("Good"));
        std::os::unix::fs::symlink(posts_dir.join("gone.md"), posts_dir.join("2.md")).unwrap();

        let folio = folio_with(SiteConfig::default(), tmp.path());
        let posts = ContentLoader::new(&folio).load_blog_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");

        let config = SiteConfig {
            on_malformed: MalformedPolicy::Abort,
            ..SiteConfig::default()
        };
        let folio = folio_with(config, tmp.path());
        let err = ContentLoader::new(&folio).load_blog_posts().unwrap_err();
        match err.downcast_ref::<ContentError>() {
            Some(ContentError::Unavailable { path, .. }) => {
                assert_eq!(path, &posts_dir.join("2.md"))
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_config_rejects_missing_prefix() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        write(&posts_dir, "1.md", "# T\nno-prefix.png\nsummary: s\n\nbody\n");
        write(&posts_dir, "2.md", &post_doc("Good"));

        let config = SiteConfig {
            strict_front_matter: true,
            ..SiteConfig::default()
        };
        let folio = folio_with(config, tmp.path());
        let posts = ContentLoader::new(&folio).load_blog_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_load_markdown() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "cv.md", "## Experience\n");
        let folio = folio_with(SiteConfig::default(), tmp.path());
        let loader = ContentLoader::new(&folio);

        let html = loader.load_markdown(&tmp.path().join("cv.md")).unwrap();
        assert_eq!(html.as_deref(), Some("<h2>Experience</h2>\n"));
        assert!(loader
            .load_markdown(&tmp.path().join("missing.md"))
            .unwrap()
            .is_none());
    }
}
