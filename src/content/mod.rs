//! Content module - post documents, markdown rendering and collection loading

mod error;
pub mod loader;
mod markdown;
mod parser;
mod post;

pub use error::ContentError;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use parser::{compose_document, PostParser, MIN_LINES};
pub use post::{Post, PostCard};
