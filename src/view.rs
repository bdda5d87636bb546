//! View models handed to the presentation layer
//!
//! A view is what one tab shows right now: list or detail for the three
//! collections, static content for Home and CV.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::SiteConfig;
use crate::content::{Post, PostCard};
use crate::demos::{display_title, DemoDescriptor, DemoOutput, SampleDataset};
use crate::navigation::{Collection, NavError, NavigationState};
use crate::Catalog;

/// Sidebar tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Home,
    Blog,
    DataDemo,
    ModelDemo,
    Cv,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Blog, Tab::DataDemo, Tab::ModelDemo, Tab::Cv];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Blog => "Blog",
            Tab::DataDemo => "Data Demo",
            Tab::ModelDemo => "Model Demo",
            Tab::Cv => "CV",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Blog => "blog",
            Tab::DataDemo => "data-demo",
            Tab::ModelDemo => "model-demo",
            Tab::Cv => "cv",
        }
    }

    /// The collection browsed in this tab, if any
    pub fn collection(self) -> Option<Collection> {
        match self {
            Tab::Blog => Some(Collection::Blog),
            Tab::DataDemo => Some(Collection::DataDemo),
            Tab::ModelDemo => Some(Collection::ModelDemo),
            Tab::Home | Tab::Cv => None,
        }
    }
}

impl From<Collection> for Tab {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Blog => Tab::Blog,
            Collection::DataDemo => Tab::DataDemo,
            Collection::ModelDemo => Tab::ModelDemo,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Tab::Home),
            "cv" => Ok(Tab::Cv),
            other => match other.parse::<Collection>()? {
                Collection::Blog => Ok(Tab::Blog),
                Collection::DataDemo => Ok(Tab::DataDemo),
                Collection::ModelDemo => Ok(Tab::ModelDemo),
            },
        }
    }
}

/// Site-wide information for the navigation sidebar
#[derive(Debug, Serialize)]
pub struct SiteInfo<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub author: &'a str,
    pub footer: String,
    pub tabs: Vec<TabLink>,
}

#[derive(Debug, Serialize)]
pub struct TabLink {
    pub slug: &'static str,
    pub label: &'static str,
}

impl<'a> SiteInfo<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            title: &config.title,
            subtitle: &config.subtitle,
            author: &config.author,
            footer: config.footer(),
            tabs: Tab::ALL
                .iter()
                .map(|tab| TabLink {
                    slug: tab.slug(),
                    label: tab.label(),
                })
                .collect(),
        }
    }
}

/// What a tab currently displays
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum TabView<'a> {
    Home {
        title: &'a str,
        banner_image: &'a str,
    },
    Cv {
        content: Option<&'a str>,
    },
    PostList {
        collection: Collection,
        heading: &'static str,
        posts: Vec<PostCard<'a>>,
    },
    PostDetail {
        collection: Collection,
        index: usize,
        back_label: &'static str,
        post: &'a Post,
        /// Random table for data demo posts that mention a sample dataset
        #[serde(skip_serializing_if = "Option::is_none")]
        dataset: Option<SampleDataset>,
    },
    DemoList {
        heading: &'static str,
        demos: Vec<DemoDescriptor>,
    },
    DemoDetail {
        index: usize,
        name: String,
        title: String,
        back_label: &'static str,
        output: DemoOutput,
    },
}

impl<'a> TabView<'a> {
    /// Build the view of `tab` for a session
    ///
    /// A selection left stale by a catalog reload falls back to list view.
    pub fn build(
        tab: Tab,
        config: &'a SiteConfig,
        catalog: &'a Catalog,
        nav: &mut NavigationState,
    ) -> Self {
        match tab.collection() {
            Some(collection) => Self::collection_view(collection, catalog, nav),
            None if tab == Tab::Home => TabView::Home {
                title: &config.title,
                banner_image: &config.banner_image,
            },
            None => TabView::Cv {
                content: catalog.cv.as_deref(),
            },
        }
    }

    fn collection_view(
        collection: Collection,
        catalog: &'a Catalog,
        nav: &mut NavigationState,
    ) -> Self {
        if nav.reset_stale(collection, catalog.len(collection)) {
            tracing::warn!("{} selection no longer exists, showing list", collection);
        }

        match (catalog.posts(collection), nav.current(collection)) {
            (Some(posts), Some(index)) => TabView::PostDetail {
                collection,
                index,
                back_label: collection.back_label(),
                post: &posts[index],
                dataset: (collection == Collection::DataDemo
                    && SampleDataset::wanted_by(&posts[index].content))
                .then(SampleDataset::generate),
            },
            (Some(posts), None) => TabView::PostList {
                collection,
                heading: collection.heading(),
                posts: posts
                    .iter()
                    .enumerate()
                    .map(|(i, post)| post.card(i))
                    .collect(),
            },
            (None, Some(index)) => match catalog.demos.get_index(index) {
                Some(demo) => TabView::DemoDetail {
                    index,
                    name: demo.name().to_string(),
                    title: display_title(demo.name()),
                    back_label: collection.back_label(),
                    output: demo.run(),
                },
                None => Self::demo_list(collection, catalog),
            },
            (None, None) => Self::demo_list(collection, catalog),
        }
    }

    fn demo_list(collection: Collection, catalog: &Catalog) -> Self {
        TabView::DemoList {
            heading: collection.heading(),
            demos: catalog.demos.descriptors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::DemoRegistry;

    fn post(title: &str) -> Post {
        Post {
            title: title.to_string(),
            image: format!("{}.png", title),
            summary: format!("about {}", title),
            content: format!("<p>{}</p>\n", title),
            source: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            data_posts: vec![post("d0"), post("d1")],
            blog_posts: vec![post("b0"), post("b1"), post("b2")],
            demos: DemoRegistry::builtin(),
            cv: Some("<h2>CV</h2>\n".to_string()),
        }
    }

    #[test]
    fn test_tab_parsing() {
        for tab in Tab::ALL {
            assert_eq!(tab.slug().parse::<Tab>().unwrap(), tab);
        }
        assert!("settings".parse::<Tab>().is_err());
        for collection in Collection::ALL {
            assert_eq!(Tab::from(collection).collection(), Some(collection));
        }
    }

    #[test]
    fn test_list_then_detail() {
        let config = SiteConfig::default();
        let catalog = catalog();
        let mut nav = NavigationState::new();

        match TabView::build(Tab::Blog, &config, &catalog, &mut nav) {
            TabView::PostList { posts, heading, .. } => {
                assert_eq!(heading, "Blog Posts");
                assert_eq!(posts.len(), 3);
                assert_eq!(posts[1].title, "b1");
                assert_eq!(posts[1].index, 1);
            }
            other => panic!("expected list view, got {:?}", other),
        }

        catalog.select(&mut nav, Collection::Blog, 1).unwrap();
        match TabView::build(Tab::Blog, &config, &catalog, &mut nav) {
            TabView::PostDetail { post, index, .. } => {
                assert_eq!(index, 1);
                assert_eq!(post.title, "b1");
            }
            other => panic!("expected detail view, got {:?}", other),
        }

        // Other tabs are unaffected
        assert!(matches!(
            TabView::build(Tab::DataDemo, &config, &catalog, &mut nav),
            TabView::PostList { .. }
        ));
    }

    #[test]
    fn test_sample_dataset_only_for_data_demo_posts() {
        let mut catalog = catalog();
        catalog.data_posts[1].content = "<p>Loads a <strong>Sample Dataset</strong></p>\n".to_string();
        catalog.blog_posts[0].content = "<p>No sample dataset here either</p>\n".to_string();
        let config = SiteConfig::default();
        let mut nav = NavigationState::new();

        catalog.select(&mut nav, Collection::DataDemo, 1).unwrap();
        match TabView::build(Tab::DataDemo, &config, &catalog, &mut nav) {
            TabView::PostDetail { dataset: Some(dataset), .. } => {
                assert_eq!(dataset.rows.len(), 4);
                assert_eq!(dataset.rows[3].category, "D");
                assert!(dataset.rows.iter().all(|r| (1..100).contains(&r.value)));
            }
            other => panic!("expected detail view with dataset, got {:?}", other),
        }

        catalog.select(&mut nav, Collection::DataDemo, 0).unwrap();
        let view = TabView::build(Tab::DataDemo, &config, &catalog, &mut nav);
        assert!(matches!(view, TabView::PostDetail { dataset: None, .. }));
        assert!(serde_json::to_value(&view).unwrap().get("dataset").is_none());

        catalog.select(&mut nav, Collection::Blog, 0).unwrap();
        assert!(matches!(
            TabView::build(Tab::Blog, &config, &catalog, &mut nav),
            TabView::PostDetail { dataset: None, .. }
        ));
    }

    #[test]
    fn test_stale_selection_falls_back_to_list() {
        let config = SiteConfig::default();
        let mut catalog = catalog();
        let mut nav = NavigationState::new();
        catalog.select(&mut nav, Collection::Blog, 2).unwrap();

        catalog.blog_posts.truncate(1);
        assert!(matches!(
            TabView::build(Tab::Blog, &config, &catalog, &mut nav),
            TabView::PostList { .. }
        ));
        assert_eq!(nav.current(Collection::Blog), None);
    }

    #[test]
    fn test_demo_detail_runs_demo() {
        let config = SiteConfig::default();
        let catalog = catalog();
        let mut nav = NavigationState::new();

        assert!(matches!(
            TabView::build(Tab::ModelDemo, &config, &catalog, &mut nav),
            TabView::DemoList { .. }
        ));

        catalog.select(&mut nav, Collection::ModelDemo, 0).unwrap();
        match TabView::build(Tab::ModelDemo, &config, &catalog, &mut nav) {
            TabView::DemoDetail { name, output, back_label, .. } => {
                assert_eq!(name, "sine_wave");
                assert_eq!(output.title, "Sine Wave");
                assert_eq!(back_label, "Back to Model List");
            }
            other => panic!("expected demo detail, got {:?}", other),
        }
    }

    #[test]
    fn test_static_tabs_serialize() {
        let config = SiteConfig::default();
        let catalog = catalog();
        let mut nav = NavigationState::new();

        let home = serde_json::to_value(TabView::build(Tab::Home, &config, &catalog, &mut nav))
            .unwrap();
        assert_eq!(home["view"], "home");
        assert_eq!(home["title"], config.title.as_str());

        let cv = serde_json::to_value(TabView::build(Tab::Cv, &config, &catalog, &mut nav)).unwrap();
        assert_eq!(cv["view"], "cv");
        assert_eq!(cv["content"], "<h2>CV</h2>\n");
    }

    #[test]
    fn test_site_info_lists_tabs() {
        let config = SiteConfig::default();
        let info = SiteInfo::new(&config);
        let labels: Vec<_> = info.tabs.iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Home", "Blog", "Data Demo", "Model Demo", "CV"]);
    }
}
