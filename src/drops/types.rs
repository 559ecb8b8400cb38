// Drop listing types

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a drop is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropType {
    DutchAuction,
    Auction,
    Raffle,
    FixedPrice,
}

impl DropType {
    /// Past-tense verb used on the card ("1/1, raffled in SOL")
    pub fn verb(&self) -> &'static str {
        match self {
            DropType::DutchAuction => "dutch auctioned",
            DropType::Auction => "auctioned",
            DropType::Raffle => "raffled",
            DropType::FixedPrice => "sold",
        }
    }
}

/// Currency a drop is priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropToken {
    Sol,
    Skull,
}

impl fmt::Display for DropToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropToken::Sol => write!(f, "SOL"),
            DropToken::Skull => write!(f, "$SKULL"),
        }
    }
}

/// A promotional drop listed on the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub url: String,
    pub title: String,
    pub artist: String,
    pub image: String,
    /// Start time in the drop's own offset; unscheduled drops have none
    pub start_date: Option<DateTime<FixedOffset>>,
    pub token_type: DropToken,
    pub quantity: u32,
    pub drop_type: DropType,
    #[serde(default)]
    pub is_sold_out: bool,
}

impl Drop {
    /// "1/1" for single editions, "1/33 edition" otherwise
    pub fn edition_label(&self) -> String {
        if self.quantity == 1 {
            "1/1".to_string()
        } else {
            format!("1/{} edition", self.quantity)
        }
    }

    pub fn sale_label(&self) -> String {
        format!(
            "{}, {} in {}",
            self.edition_label(),
            self.drop_type.verb(),
            self.token_type
        )
    }

    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.start_date
            .map(|start| start < now)
            .unwrap_or(false)
    }
}
