//! Create a new post document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::compose_document;
use crate::navigation::Collection;
use crate::Folio;

/// Options for a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub collection: Collection,
    pub image: String,
    pub summary: String,
}

/// Write a new post document into its collection's directory
pub fn create_post(folio: &Folio, options: &NewPost) -> Result<PathBuf> {
    let target_dir = match options.collection {
        Collection::Blog => &folio.blog_dir,
        Collection::DataDemo => &folio.data_dir,
        Collection::ModelDemo => {
            anyhow::bail!("Model demos are built into the binary, not written as posts")
        }
    };

    fs::create_dir_all(target_dir)?;

    let slug = slug::slugify(&options.title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a file name", options.title);
    }
    let file_path = target_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let document = compose_document(
        &options.title,
        &options.image,
        &options.summary,
        "Write your post here.\n",
    );
    fs::write(&file_path, document)?;

    tracing::info!("Created {:?}", file_path);
    Ok(file_path)
}
