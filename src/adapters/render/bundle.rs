use crate::adapters::render::{
    slip_file_name, JsonRenderer, PdfRenderer, PrintRenderer, SpreadsheetRenderer,
};
use crate::domain::model::PackingSlip;
use crate::domain::ports::SlipRenderer;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Zip archive holding every other rendering of the slip.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundleRenderer;

impl SlipRenderer for BundleRenderer {
    fn file_name(&self, box_name: &str) -> String {
        slip_file_name(box_name, "zip")
    }

    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>> {
        let box_name = &slip.export.box_name;
        let parts: [&dyn SlipRenderer; 4] = [
            &SpreadsheetRenderer,
            &PrintRenderer,
            &PdfRenderer,
            &JsonRenderer,
        ];

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for renderer in parts {
            let name = renderer.file_name(box_name);
            let data = renderer.render(slip)?;
            tracing::debug!("Adding {} ({} bytes) to bundle", name, data.len());
            zip.start_file(name, SimpleFileOptions::default())?;
            zip.write_all(&data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::sample_slip;
    use std::io::Read;

    #[test]
    fn test_bundle_contains_all_renderings() {
        let slip = sample_slip();
        let bytes = BundleRenderer.render(&slip).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();

        assert_eq!(
            file_names,
            vec![
                "Box 4_Packing_List.csv",
                "Box 4_Packing_List.html",
                "Box 4_Packing_List.json",
                "Box 4_Packing_List.pdf"
            ]
        );

        let mut csv_content = String::new();
        archive
            .by_name("Box 4_Packing_List.csv")
            .unwrap()
            .read_to_string(&mut csv_content)
            .unwrap();
        assert_eq!(
            csv_content.into_bytes(),
            SpreadsheetRenderer.render(&slip).unwrap()
        );

        let mut pdf_content = Vec::new();
        archive
            .by_name("Box 4_Packing_List.pdf")
            .unwrap()
            .read_to_end(&mut pdf_content)
            .unwrap();
        assert!(pdf_content.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_bundle_file_name() {
        assert_eq!(BundleRenderer.file_name("Box 4"), "Box 4_Packing_List.zip");
    }
}
