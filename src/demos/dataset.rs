//! Small random table shown under data demo posts that mention a sample dataset

use rand::Rng;
use serde::Serialize;

const CATEGORIES: [&str; 4] = ["A", "B", "C", "D"];

/// Phrase that makes a data demo post carry a dataset
pub const DATASET_MARKER: &str = "sample dataset";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    pub category: &'static str,
    pub value: u32,
}

/// One value per category, each in `1..100`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleDataset {
    pub rows: Vec<DatasetRow>,
}

impl SampleDataset {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let rows = CATEGORIES
            .iter()
            .map(|&category| DatasetRow {
                category,
                value: rng.random_range(1..100),
            })
            .collect();
        Self { rows }
    }

    /// Whether a post's content asks for a dataset
    pub fn wanted_by(content: &str) -> bool {
        content.to_lowercase().contains(DATASET_MARKER)
    }
}
