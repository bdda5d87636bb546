//! The loaded collections a site serves

use anyhow::Result;

use crate::content::{ContentLoader, Post};
use crate::demos::DemoRegistry;
use crate::navigation::{Collection, NavError, NavigationState};
use crate::Folio;

/// Posts, demos and the CV page, loaded once and replaced wholesale on reload
#[derive(Clone, Default)]
pub struct Catalog {
    pub data_posts: Vec<Post>,
    pub blog_posts: Vec<Post>,
    pub demos: DemoRegistry,
    /// Rendered CV page, if the site has one
    pub cv: Option<String>,
}

impl Catalog {
    /// Load every collection of a site
    pub fn load(folio: &Folio) -> Result<Self> {
        let loader = ContentLoader::new(folio);

        let data_posts = loader.load_data_posts()?;
        let blog_posts = loader.load_blog_posts()?;
        let cv = folio
            .cv_path
            .as_ref()
            .and_then(|path| match loader.load_markdown(path) {
                Ok(cv) => cv,
                Err(e) => {
                    tracing::warn!("Leaving out CV page {:?}: {}", path, e);
                    None
                }
            });

        tracing::info!(
            "Loaded {} blog posts, {} data demo posts",
            blog_posts.len(),
            data_posts.len()
        );

        Ok(Self {
            data_posts,
            blog_posts,
            demos: DemoRegistry::builtin(),
            cv,
        })
    }

    /// Posts of a post collection; `None` for the demo collection
    pub fn posts(&self, collection: Collection) -> Option<&[Post]> {
        match collection {
            Collection::DataDemo => Some(&self.data_posts),
            Collection::Blog => Some(&self.blog_posts),
            Collection::ModelDemo => None,
        }
    }

    /// Number of items in a collection
    pub fn len(&self, collection: Collection) -> usize {
        match self.posts(collection) {
            Some(posts) => posts.len(),
            None => self.demos.len(),
        }
    }

    /// Select an item, bounds-checked against this catalog
    pub fn select(
        &self,
        nav: &mut NavigationState,
        collection: Collection,
        index: usize,
    ) -> Result<(), NavError> {
        nav.select(collection, index, self.len(collection))
    }
}
