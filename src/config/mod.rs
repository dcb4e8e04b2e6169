pub mod address_book;
#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ExportFormat};

pub use address_book::AddressBook;
