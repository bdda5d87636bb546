//! Model demos
//!
//! Demos are linked into the binary and registered by name at start-up.
//! The rest of the crate only selects them by index and calls [`Demo::run`].

mod dataset;
mod sine_wave;

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

pub use dataset::{DatasetRow, SampleDataset, DATASET_MARKER};
pub use sine_wave::SineWave;

/// A runnable demonstration
pub trait Demo: Send + Sync {
    /// Snake-case identifier, e.g. `sine_wave`
    fn name(&self) -> &str;

    /// Produce the demo's output
    fn run(&self) -> DemoOutput;
}

/// What a demo shows when opened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoOutput {
    pub title: String,
    pub html: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    #[error("a demo named {0:?} is already registered")]
    Duplicate(String),

    #[error("no demo named {0:?}")]
    NotFound(String),
}

/// Name and display title of a registered demo
#[derive(Debug, Clone, Serialize)]
pub struct DemoDescriptor {
    pub index: usize,
    pub name: String,
    pub title: String,
}

/// Demos in registration order
#[derive(Clone, Default)]
pub struct DemoRegistry {
    demos: IndexMap<String, Arc<dyn Demo>>,
}

impl DemoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every demo shipped in the binary
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let demos: Vec<Arc<dyn Demo>> = vec![Arc::new(SineWave::default())];
        for demo in demos {
            if let Err(e) = registry.register(demo) {
                tracing::warn!("Skipping demo: {}", e);
            }
        }
        registry
    }

    /// Add a demo under its own name
    pub fn register(&mut self, demo: Arc<dyn Demo>) -> Result<(), DemoError> {
        let name = demo.name().to_string();
        if self.demos.contains_key(&name) {
            return Err(DemoError::Duplicate(name));
        }
        tracing::debug!("Registered demo {}", name);
        self.demos.insert(name, demo);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn Demo>, DemoError> {
        self.demos
            .get(name)
            .ok_or_else(|| DemoError::NotFound(name.to_string()))
    }

    pub fn get_index(&self, index: usize) -> Option<&Arc<dyn Demo>> {
        self.demos.get_index(index).map(|(_, demo)| demo)
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Descriptors in list order
    pub fn descriptors(&self) -> Vec<DemoDescriptor> {
        self.demos
            .keys()
            .enumerate()
            .map(|(index, name)| DemoDescriptor {
                index,
                name: name.clone(),
                title: display_title(name),
            })
            .collect()
    }
}

/// `linear_regression` -> `Linear Regression`
pub fn display_title(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
