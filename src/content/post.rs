//! Post model

use serde::{Deserialize, Serialize};

/// A rendered post from one of the document collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Cover image URL or path
    pub image: String,

    /// One-line summary shown on list cards
    pub summary: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file name, empty when parsed from a bare string
    #[serde(default)]
    pub source: String,
}

impl Post {
    /// Card view of the post, without the rendered body
    pub fn card(&self, index: usize) -> PostCard<'_> {
        PostCard {
            index,
            title: &self.title,
            image: &self.image,
            summary: &self.summary,
        }
    }
}

/// The fields of a post shown in list view
#[derive(Debug, Clone, Serialize)]
pub struct PostCard<'a> {
    pub index: usize,
    pub title: &'a str,
    pub image: &'a str,
    pub summary: &'a str,
}
