// Drops catalog - the static listing shown on the drops page

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

use crate::drops::card::DropCard;
use crate::drops::types::Drop;

const BUNDLED_CATALOG: &str = include_str!("../../data/drops.json");

pub const EMPTY_CATALOG_TITLE: &str = "No Drops found";
pub const EMPTY_CATALOG_HINT: &str = "Please check back again later.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropCatalog {
    drops: Vec<Drop>,
}

impl DropCatalog {
    pub fn new(drops: Vec<Drop>) -> Self {
        Self { drops }
    }

    /// The catalog shipped with the storefront
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("Bundled drops catalog is malformed")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let drops: Vec<Drop> = serde_json::from_str(json)?;
        Ok(Self::new(drops))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read drops catalog {}", path.display()))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse drops catalog {}", path.display()))?;
        tracing::debug!(path = %path.display(), drops = catalog.len(), "Loaded drops catalog");
        Ok(catalog)
    }

    /// Explicit path wins over the bundled listing
    pub fn load_or_bundled(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Cards in listing order
    pub fn cards(&self, now: DateTime<Utc>, countdown_window: Duration) -> Vec<DropCard> {
        self.drops
            .iter()
            .map(|drop| DropCard::at(drop, now, countdown_window))
            .collect()
    }

    pub fn live_count(&self, now: DateTime<Utc>) -> usize {
        self.drops.iter().filter(|d| d.is_live_at(now)).count()
    }
}
