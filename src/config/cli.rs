use crate::config::address_book::DEFAULT_ADDRESS_CONFIG;
use crate::core::repository::DEFAULT_DATA_FILE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "packing-slip")]
#[command(about = "Track packed shipment boxes and print packing slips")]
pub struct CliConfig {
    /// JSON document holding every box
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    pub data_file: String,

    /// Address book (JSON, or TOML when the name ends in .toml)
    #[arg(long, global = true, default_value = DEFAULT_ADDRESS_CONFIG)]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List boxes in numeric order with weights and totals
    List,
    /// Show the box type catalog
    Types,
    /// Create an empty box
    Create {
        name: String,
        #[arg(long = "type", default_value = "")]
        box_type: String,
        /// Declared weight in kg
        #[arg(long)]
        weight: Option<String>,
    },
    /// Show the items of a box with their indices
    Show { name: String },
    /// Append an item to a box
    AddItem {
        box_name: String,
        item: String,
        #[arg(default_value = "")]
        description: String,
        #[arg(default_value = "1")]
        quantity: String,
    },
    /// Change fields of the item at INDEX
    EditItem {
        box_name: String,
        index: usize,
        #[arg(long)]
        item: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
    },
    /// Remove the item at INDEX; later items move down by one
    DeleteItem { box_name: String, index: usize },
    /// Remove a box and all its items
    DeleteBox { name: String },
    /// Set the declared (scale) weight of a box in kg
    SetWeight { name: String, weight: String },
    /// Write a packing slip for a box
    Export {
        name: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Html)]
        format: ExportFormat,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Spreadsheet (CSV)
    Csv,
    /// Print-ready HTML
    Html,
    /// A4 PDF
    Pdf,
    /// Raw payload as JSON
    Json,
    /// Zip holding all of the above
    Bundle,
}

impl ConfigProvider for CliConfig {
    fn data_file(&self) -> &str {
        &self.data_file
    }

    fn address_config(&self) -> &str {
        &self.config
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file)?;
        validate_path("config", &self.config)?;
        if let Command::Export { out, .. } = &self.command {
            validate_path("out", out)?;
        }
        Ok(())
    }
}
