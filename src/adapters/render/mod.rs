//! Packing slip renderers. Each one consumes a [`PackingSlip`] and produces
//! the bytes of one downloadable file.

pub mod bundle;
pub mod json;
pub mod pdf;
pub mod print;
pub mod spreadsheet;

pub use bundle::BundleRenderer;
pub use json::JsonRenderer;
pub use pdf::PdfRenderer;
pub use print::PrintRenderer;
pub use spreadsheet::SpreadsheetRenderer;

#[cfg(test)]
use crate::domain::model::PackingSlip;

/// `<box>_Packing_List.<extension>` with path separators and other characters
/// that are unsafe in file names replaced by `_`.
pub fn slip_file_name(box_name: &str, extension: &str) -> String {
    let stem: String = box_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_Packing_List.{}", stem, extension)
}

#[cfg(test)]
pub(crate) fn sample_slip() -> PackingSlip {
    use crate::config::address_book::AddressBook;
    use crate::core::export::build_export_payload;
    use crate::domain::model::{Collection, Item, PackedBox};
    use chrono::NaiveDate;

    let mut collection = Collection::new();
    let mut packed = PackedBox::new("Box 4", "Type 1 (Square)", 11.0);
    packed.items.push(Item::new("Mugs", "Ceramic, blue", 5));
    packed.items.push(Item::new("<Tea>", "Loose & leaf", 2));
    collection.insert(packed);

    let export = build_export_payload(&collection, "Box 4").expect("box exists");
    PackingSlip::new(
        export,
        &AddressBook::placeholder(),
        NaiveDate::from_ymd_opt(2024, 11, 2).expect("valid date"),
    )
}
