// Drops listing - promotional NFT drops with live/upcoming status

pub mod card;
pub mod catalog;
pub mod types;

pub use card::{format_countdown, CallToAction, DropCard};
pub use catalog::{DropCatalog, EMPTY_CATALOG_HINT, EMPTY_CATALOG_TITLE};
pub use types::{Drop, DropToken, DropType};
