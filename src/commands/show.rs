//! Show one item of a collection

use anyhow::Result;

use crate::navigation::{Collection, NavigationState};
use crate::view::{Tab, TabView};
use crate::Folio;

/// Print the detail view of `collection[index]`
pub fn run(folio: &Folio, collection: &str, index: usize) -> Result<()> {
    let collection: Collection = collection.parse()?;
    let catalog = folio.load_catalog()?;

    let mut nav = NavigationState::new();
    catalog.select(&mut nav, collection, index)?;

    match TabView::build(Tab::from(collection), &folio.config, &catalog, &mut nav) {
        TabView::PostDetail { post, dataset, .. } => {
            println!("{}", post.title);
            println!("image: {}", post.image);
            println!("summary: {}", post.summary);
            println!();
            print!("{}", post.content);
            if let Some(dataset) = dataset {
                println!();
                println!("Here's a sample dataset:");
                for row in &dataset.rows {
                    println!("{:>8} {:>4}", row.category, row.value);
                }
            }
        }
        TabView::DemoDetail { output, .. } => {
            println!("{}", output.title);
            println!();
            println!("{}", output.html);
        }
        other => anyhow::bail!("Nothing selected: {:?}", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;
    use crate::navigation::NavError;
    use tempfile::TempDir;

    #[test]
    fn test_show_valid_and_out_of_range() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        assert!(run(&folio, "blog", 0).is_ok());
        assert!(run(&folio, "data-demo", 0).is_ok());
        assert!(run(&folio, "model-demo", 0).is_ok());

        let err = run(&folio, "blog", 5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NavError>(),
            Some(NavError::IndexOutOfRange { index: 5, len: 1, .. })
        ));
        assert!(run(&folio, "cv", 0).is_err());
    }
}
