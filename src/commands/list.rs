//! List site content

use anyhow::Result;

use crate::navigation::Collection;
use crate::{Catalog, Folio};

/// List one collection, or all of them
pub fn run(folio: &Folio, collection: Option<&str>) -> Result<()> {
    let catalog = folio.load_catalog()?;

    let collections = match collection {
        Some(name) => vec![name.parse::<Collection>()?],
        None => Collection::ALL.to_vec(),
    };

    for collection in collections {
        print!("{}", format_listing(&catalog, collection));
    }

    Ok(())
}

/// Text listing of a collection, one item per line
pub fn format_listing(catalog: &Catalog, collection: Collection) -> String {
    let mut out = format!(
        "{} ({}):\n",
        collection.heading(),
        catalog.len(collection)
    );

    match catalog.posts(collection) {
        Some(posts) => {
            for (i, post) in posts.iter().enumerate() {
                out.push_str(&format!(
                    "  [{}] {} - {} [{}]\n",
                    i, post.title, post.summary, post.source
                ));
            }
        }
        None => {
            for demo in catalog.demos.descriptors() {
                out.push_str(&format!("  [{}] {} ({})\n", demo.index, demo.title, demo.name));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use crate::demos::DemoRegistry;

    #[test]
    fn test_format_listing() {
        let catalog = Catalog {
            blog_posts: vec![Post {
                title: "Hello".to_string(),
                image: "h.png".to_string(),
                summary: "first".to_string(),
                content: String::new(),
                source: "hello.md".to_string(),
            }],
            demos: DemoRegistry::builtin(),
            ..Catalog::default()
        };

        assert_eq!(
            format_listing(&catalog, Collection::Blog),
            "Blog Posts (1):\n  [0] Hello - first [hello.md]\n"
        );
        assert_eq!(
            format_listing(&catalog, Collection::DataDemo),
            "Data Demo Posts (0):\n"
        );
        assert!(format_listing(&catalog, Collection::ModelDemo)
            .contains("[0] Sine Wave (sine_wave)"));
    }
}
