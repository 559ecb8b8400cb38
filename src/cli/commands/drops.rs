use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

use crate::config::{config, DropsConfig};
use crate::drops::{DropCard, DropCatalog, EMPTY_CATALOG_HINT, EMPTY_CATALOG_TITLE};

pub struct DropsCommand {
    pub at: Option<String>,
    pub catalog: Option<String>,
    pub drops: Option<DropsConfig>,
}

impl DropsCommand {
    pub fn new() -> Self {
        Self {
            at: None,
            catalog: None,
            drops: None,
        }
    }

    /// Render as of an RFC 3339 instant instead of now
    pub fn with_at(mut self, at: Option<String>) -> Self {
        self.at = at;
        self
    }

    pub fn with_catalog(mut self, catalog: Option<String>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_drops_config(mut self, drops: DropsConfig) -> Self {
        self.drops = Some(drops);
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let cards = self.cards()?;

        if cards.is_empty() {
            println!("📭 {}", EMPTY_CATALOG_TITLE);
            println!("   {}", EMPTY_CATALOG_HINT);
            return Ok(());
        }

        let live = cards.iter().filter(|c| c.live).count();
        println!("🎨 Drops ({} live, {} upcoming)", live, cards.len() - live);
        println!();
        for card in &cards {
            println!("{}", card);
            println!();
        }
        Ok(())
    }

    pub fn cards(&self) -> Result<Vec<DropCard>> {
        let drops_config = match &self.drops {
            Some(drops) => drops.clone(),
            None => config()?.drops.clone(),
        };
        let now = self.now()?;

        let path = self.catalog.as_deref().or(drops_config.catalog_path.as_deref());
        let catalog = DropCatalog::load_or_bundled(path)?;
        tracing::debug!(drops = catalog.len(), at = %now, "Rendering drops");

        Ok(catalog.cards(now, Duration::hours(drops_config.countdown_window_hours)))
    }

    fn now(&self) -> Result<DateTime<Utc>> {
        match &self.at {
            Some(at) => Ok(DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("Invalid --at timestamp '{}'", at))?
                .with_timezone(&Utc)),
            None => Ok(Utc::now()),
        }
    }
}

impl Default for DropsCommand {
    fn default() -> Self {
        Self::new()
    }
}
