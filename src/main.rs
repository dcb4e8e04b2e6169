use chrono::Local;
use clap::Parser;
use packing_slip::adapters::render::{
    BundleRenderer, JsonRenderer, PdfRenderer, PrintRenderer, SpreadsheetRenderer,
};
use packing_slip::config::{Command, ExportFormat};
use packing_slip::core::export::build_export_payload;
use packing_slip::core::{catalog, repository, weight};
use packing_slip::core::{ConfigProvider, ItemUpdate, PackingSlip, SlipRenderer, Storage};
use packing_slip::utils::error::ErrorCategory;
use packing_slip::utils::{logger, validation::Validate};
use packing_slip::{AddressBook, BoxRepository, BoxService, CliConfig, LocalStorage, PackingError, Result};
use std::path::Path;

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = open_service(&config).and_then(|service| run(&config, &service)) {
        tracing::debug!("{} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // Rejected requests changed nothing; distinguish them from real failures.
        let exit_code = if e.is_rejection() {
            2
        } else {
            match e.category() {
                ErrorCategory::Storage => 3,
                ErrorCategory::Rendering => 4,
                _ => 1,
            }
        };
        std::process::exit(exit_code);
    }
}

fn open_service<C: ConfigProvider>(config: &C) -> Result<BoxService<LocalStorage>> {
    let path = Path::new(config.data_file());
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PackingError::validation("data_file", config.data_file(), "Must name a file")
        })?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let repository = BoxRepository::new(LocalStorage::new(directory), file_name);
    Ok(BoxService::new(repository))
}

fn run(config: &CliConfig, service: &BoxService<LocalStorage>) -> Result<()> {
    match &config.command {
        Command::List => print_listing(service),
        Command::Types => {
            for spec in catalog::BOX_TYPES.iter() {
                println!(
                    "{:<22} {:>3} x {:>3} x {:>3} cm  {:>4} kg volumetric",
                    spec.name,
                    spec.length,
                    spec.width,
                    spec.height,
                    weight::volumetric_weight(spec)
                );
            }
        }
        Command::Create {
            name,
            box_type,
            weight,
        } => {
            if service.create_box(name, box_type, weight.as_deref())? {
                println!("✅ Created box '{}'", name.trim());
            } else {
                println!("Box '{}' already exists; nothing changed", name.trim());
            }
        }
        Command::Show { name } => {
            let packed = service.get_box(name)?;
            let summary = repository::summarize(&packed);
            println!("{} ({})", summary.name, summary.box_type);
            println!(
                "Volumetric: {}   Actual: {}   Items: {}",
                summary.volumetric_weight_label, summary.declared_weight_label, summary.item_count
            );
            for (index, item) in packed.items.iter().enumerate() {
                println!(
                    "[{}] {} x{}  {}",
                    index, item.name, item.quantity, item.description
                );
            }
        }
        Command::AddItem {
            box_name,
            item,
            description,
            quantity,
        } => {
            let index = service.add_item(box_name, item, description, quantity)?;
            println!("✅ Added '{}' to '{}' as item {}", item, box_name, index);
        }
        Command::EditItem {
            box_name,
            index,
            item,
            description,
            quantity,
        } => {
            let update = ItemUpdate {
                name: item.clone(),
                description: description.clone(),
                quantity: quantity.clone(),
            };
            let edited = service.edit_item(box_name, *index, update)?;
            println!(
                "✅ Item {} of '{}' is now {} x{}",
                index, box_name, edited.name, edited.quantity
            );
        }
        Command::DeleteItem { box_name, index } => {
            let removed = service.delete_item(box_name, *index)?;
            println!("✅ Removed '{}' from '{}'", removed.name, box_name);
        }
        Command::DeleteBox { name } => {
            service.delete_box(name)?;
            println!("✅ Deleted box '{}'", name);
        }
        Command::SetWeight { name, weight: raw } => {
            let kg = service.edit_declared_weight(name, raw)?;
            println!("✅ '{}' declared weight: {}", name, weight::declared_label(kg));
        }
        Command::Export { name, format, out } => {
            let export = build_export_payload(&service.collection(), name)
                .ok_or_else(|| PackingError::not_found(format!("Box '{}'", name)))?;
            let addresses = AddressBook::load_or_placeholder(config.address_config());
            let slip = PackingSlip::new(export, &addresses, Local::now().date_naive());

            let renderer: &dyn SlipRenderer = match format {
                ExportFormat::Csv => &SpreadsheetRenderer,
                ExportFormat::Html => &PrintRenderer,
                ExportFormat::Pdf => &PdfRenderer,
                ExportFormat::Json => &JsonRenderer,
                ExportFormat::Bundle => &BundleRenderer,
            };
            let file_name = renderer.file_name(name);
            let bytes = renderer.render(&slip)?;
            LocalStorage::new(out).write_file(&file_name, &bytes)?;

            let written = Path::new(out).join(&file_name);
            tracing::info!("Exported '{}' to {}", name, written.display());
            println!("📁 {}", written.display());
        }
    }
    Ok(())
}

fn print_listing(service: &BoxService<LocalStorage>) {
    let summaries = repository::list_ordered(&service.collection());
    if summaries.is_empty() {
        println!("No boxes yet. Create one with `packing-slip create <name> --type <type>`.");
        return;
    }

    println!(
        "{:<20} {:>6}  {:<22} {:>10} {:>10}",
        "Box", "Items", "Type", "Volumetric", "Actual"
    );
    for summary in &summaries {
        println!(
            "{:<20} {:>6}  {:<22} {:>10} {:>10}",
            summary.name,
            summary.item_count,
            summary.box_type,
            summary.volumetric_weight_label,
            summary.declared_weight_label
        );
    }

    let totals = repository::totals(&summaries);
    println!(
        "{:<20} {:>6}  {:<22} {:>10} {:>10}",
        "Total",
        totals.total_items,
        "",
        totals.volumetric_label(),
        totals.declared_label()
    );
}
