// Card view model for a single drop

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;
use std::fmt;

use crate::drops::types::Drop;

/// The button at the bottom of a drop card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallToAction {
    Buy,
    /// Sold out single edition
    Sold,
    /// Sold out multi edition
    SoldOut,
    /// Starts within the countdown window
    Countdown { remaining_seconds: i64 },
    /// Starts later than the countdown window
    Scheduled { starts_at: DateTime<FixedOffset> },
    CheckBackSoon,
}

impl fmt::Display for CallToAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallToAction::Buy => write!(f, "BUY"),
            CallToAction::Sold => write!(f, "SOLD"),
            CallToAction::SoldOut => write!(f, "SOLD OUT"),
            CallToAction::Countdown { remaining_seconds } => {
                write!(f, "Drops in {}", format_countdown(*remaining_seconds))
            }
            CallToAction::Scheduled { starts_at } => {
                write!(f, "{}", starts_at.format("%a, %-m/%-d @ %-I:%M %p"))
            }
            CallToAction::CheckBackSoon => write!(f, "Check Back Soon"),
        }
    }
}

/// HH:MM:SS, hours not capped at 24
pub fn format_countdown(remaining_seconds: i64) -> String {
    let secs = remaining_seconds.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Everything the drops page shows for one drop at a given instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropCard {
    pub title: String,
    pub artist: String,
    pub sale: String,
    pub image: String,
    pub live: bool,
    /// Only live drops link out to the sale page
    pub link: Option<String>,
    pub call_to_action: CallToAction,
}

impl DropCard {
    pub fn at(drop: &Drop, now: DateTime<Utc>, countdown_window: Duration) -> Self {
        let live = drop.is_live_at(now);

        let call_to_action = match drop.start_date {
            _ if live && drop.is_sold_out => {
                if drop.quantity > 1 {
                    CallToAction::SoldOut
                } else {
                    CallToAction::Sold
                }
            }
            _ if live => CallToAction::Buy,
            Some(start) => {
                let remaining = start.with_timezone(&Utc) - now;
                if remaining < countdown_window {
                    CallToAction::Countdown {
                        remaining_seconds: remaining.num_seconds(),
                    }
                } else {
                    CallToAction::Scheduled { starts_at: start }
                }
            }
            None => CallToAction::CheckBackSoon,
        };

        Self {
            title: drop.title.clone(),
            artist: drop.artist.clone(),
            sale: drop.sale_label(),
            image: drop.image.clone(),
            live,
            link: live.then(|| drop.url.clone()),
            call_to_action,
        }
    }
}

impl fmt::Display for DropCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.live { "🟢" } else { "⚪" };
        writeln!(f, "{} {} by {}", marker, self.title, self.artist)?;
        writeln!(f, "   {}", self.sale)?;
        write!(f, "   [{}]", self.call_to_action)?;
        if let Some(link) = &self.link {
            write!(f, " {}", link)?;
        }
        Ok(())
    }
}
