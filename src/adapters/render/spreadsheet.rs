use crate::adapters::render::slip_file_name;
use crate::domain::model::PackingSlip;
use crate::domain::ports::SlipRenderer;
use crate::utils::error::{PackingError, Result};

/// Packing slip as CSV, laid out to be opened in a spreadsheet: a header
/// block, the two addresses side by side, the item table and the totals.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetRenderer;

impl SlipRenderer for SpreadsheetRenderer {
    fn file_name(&self, box_name: &str) -> String {
        slip_file_name(box_name, "csv")
    }

    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(["Packing List", slip.export.box_name.as_str()])?;
        writer.write_record(["Date", slip.shipping_date.as_str()])?;

        writer.write_record(["From", "To"])?;
        let from = slip.from_address.lines();
        let to = slip.to_address.lines();
        for row in 0..from.len().max(to.len()) {
            writer.write_record([
                from.get(row).map(String::as_str).unwrap_or(""),
                to.get(row).map(String::as_str).unwrap_or(""),
            ])?;
        }

        writer.write_record(["No.", "Item", "Description", "Quantity"])?;
        for (position, item) in slip.export.items.iter().enumerate() {
            writer.write_record([
                (position + 1).to_string(),
                item.name.clone(),
                item.description.clone(),
                item.quantity.to_string(),
            ])?;
        }

        writer.write_record([
            "Total Quantity".to_string(),
            String::new(),
            String::new(),
            slip.export.total_quantity.to_string(),
        ])?;
        writer.write_record(["Volumetric Weight", slip.export.volumetric_weight_label.as_str()])?;
        writer.write_record(["Actual Weight", slip.export.declared_weight_label.as_str()])?;

        writer
            .into_inner()
            .map_err(|e| PackingError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::sample_slip;

    #[test]
    fn test_spreadsheet_rows() {
        let bytes = SpreadsheetRenderer.render(&sample_slip()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();

        assert_eq!(rows[0], vec!["Packing List", "Box 4"]);
        assert_eq!(rows[1], vec!["Date", "02/11/2024"]);
        assert_eq!(rows[2], vec!["From", "To"]);
        assert_eq!(rows[3], vec!["Default From Name", "Default To Name"]);
        assert!(rows.contains(&vec![
            "1".to_string(),
            "Mugs".to_string(),
            "Ceramic, blue".to_string(),
            "5".to_string()
        ]));
        assert!(rows.contains(&vec![
            "Total Quantity".to_string(),
            String::new(),
            String::new(),
            "7".to_string()
        ]));
        assert_eq!(rows[rows.len() - 2], vec!["Volumetric Weight", "22 kg"]);
        assert_eq!(rows[rows.len() - 1], vec!["Actual Weight", "11.0 kg"]);
    }

    #[test]
    fn test_spreadsheet_file_name() {
        assert_eq!(SpreadsheetRenderer.file_name("Box 4"), "Box 4_Packing_List.csv");
    }
}
