pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::AddressBook;
pub use core::{mutators::BoxService, repository::BoxRepository};
pub use utils::error::{PackingError, Result};
