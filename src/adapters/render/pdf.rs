use crate::adapters::render::slip_file_name;
use crate::domain::model::{Address, PackingSlip};
use crate::domain::ports::SlipRenderer;
use crate::utils::error::{PackingError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LEADING: i64 = 14;
const FONT_SIZE: i64 = 10;
const LINES_PER_PAGE: usize = 50;

const ITEM_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
}

impl Face {
    fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }
}

#[derive(Debug)]
struct Line {
    face: Face,
    text: String,
}

impl Line {
    fn regular(text: impl Into<String>) -> Self {
        Self {
            face: Face::Regular,
            text: text.into(),
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            face: Face::Bold,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::regular("")
    }
}

/// Packing slip as an A4 PDF set in Courier, with the same sections as the
/// print page. Long item lists continue onto further pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl SlipRenderer for PdfRenderer {
    fn file_name(&self, box_name: &str) -> String {
        slip_file_name(box_name, "pdf")
    }

    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>> {
        let lines = slip_lines(slip);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(font("Courier"));
        let bold_id = doc.add_object(font("Courier-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids = Vec::new();
        for page in lines.chunks(LINES_PER_PAGE) {
            let content = page_content(page).encode().map_err(pdf_error)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(pdf_error)?;
        tracing::debug!(
            "Rendered '{}' as {} PDF page(s)",
            slip.export.box_name,
            page_count
        );
        Ok(bytes)
    }
}

fn font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn pdf_error(e: impl std::fmt::Display) -> PackingError {
    PackingError::PdfError {
        message: e.to_string(),
    }
}

fn slip_lines(slip: &PackingSlip) -> Vec<Line> {
    let export = &slip.export;
    let mut lines = vec![
        Line::bold(format!("Packing List - {}", export.box_name)),
        Line::regular(format!("Date: {}", slip.shipping_date)),
        Line::blank(),
    ];

    push_address(&mut lines, "From:", &slip.from_address);
    lines.push(Line::blank());
    push_address(&mut lines, "To:", &slip.to_address);
    lines.push(Line::blank());

    lines.push(Line::bold(item_row("No.", "Item", "Description", "Quantity")));
    for (position, item) in export.items.iter().enumerate() {
        let names = wrap(&item.name, ITEM_WIDTH);
        let descriptions = wrap(&item.description, DESCRIPTION_WIDTH);
        for row in 0..names.len().max(descriptions.len()) {
            let (number, quantity) = if row == 0 {
                ((position + 1).to_string(), item.quantity.to_string())
            } else {
                (String::new(), String::new())
            };
            lines.push(Line::regular(item_row(
                &number,
                names.get(row).map(String::as_str).unwrap_or(""),
                descriptions.get(row).map(String::as_str).unwrap_or(""),
                &quantity,
            )));
        }
    }

    lines.push(Line::blank());
    lines.push(Line::bold(format!("Total Quantity: {}", export.total_quantity)));
    lines.push(Line::bold(format!(
        "Volumetric Weight: {}",
        export.volumetric_weight_label
    )));
    lines.push(Line::bold(format!(
        "Actual Weight: {}",
        export.declared_weight_label
    )));
    lines
}

fn push_address(lines: &mut Vec<Line>, heading: &str, address: &Address) {
    lines.push(Line::bold(heading));
    lines.extend(address.lines().into_iter().map(|line| Line::regular(format!("  {}", line))));
}

fn item_row(number: &str, name: &str, description: &str, quantity: &str) -> String {
    let row = format!(
        "{:<4} {:<iw$} {:<dw$} {:>8}",
        number,
        name,
        description,
        quantity,
        iw = ITEM_WIDTH,
        dw = DESCRIPTION_WIDTH
    );
    row.trim_end().to_string()
}

/// Splits `text` into chunks of at most `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

fn page_content(page: &[Line]) -> Content {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;
    for line in page {
        y -= LEADING;
        if line.text.is_empty() {
            continue;
        }
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![line.face.resource().into(), FONT_SIZE.into()]),
            Operation::new("Td", vec![MARGIN.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(&line.text))]),
            Operation::new("ET", vec![]),
        ]);
    }
    Content { operations }
}

/// The standard fonts only cover WinAnsi; Latin-1 maps directly and anything
/// else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::sample_slip;
    use crate::domain::model::Item;

    /// Text shown on each page, one entry per `Tj`.
    fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|page_id| {
                let data = doc.get_page_content(*page_id).unwrap();
                Content::decode(&data)
                    .unwrap()
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .map(|op| {
                        let raw = op.operands[0].as_str().unwrap();
                        raw.iter().map(|&b| b as char).collect::<String>()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_pdf_contains_slip_content() {
        let bytes = PdfRenderer.render(&sample_slip()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let pages = page_texts(&bytes);
        assert_eq!(pages.len(), 1);
        let text = &pages[0];

        assert_eq!(text[0], "Packing List - Box 4");
        assert!(text.contains(&"Date: 02/11/2024".to_string()));
        assert!(text.contains(&"  Default From Name".to_string()));
        assert!(text.contains(&"  Default Province".to_string()));

        let mugs = text.iter().find(|line| line.starts_with("1 ")).unwrap();
        assert!(mugs.contains("Mugs"));
        assert!(mugs.contains("Ceramic, blue"));
        assert!(mugs.ends_with(" 5"));
        assert!(text.iter().any(|line| line.contains("<Tea>") && line.contains("Loose & leaf")));

        assert!(text.contains(&"Total Quantity: 7".to_string()));
        assert!(text.contains(&"Volumetric Weight: 22 kg".to_string()));
        assert!(text.contains(&"Actual Weight: 11.0 kg".to_string()));
    }

    #[test]
    fn test_long_item_list_continues_on_new_pages() {
        let mut slip = sample_slip();
        for n in 0..120 {
            slip.export.items.push(Item::new(format!("Part {}", n), "", 1));
        }

        let pages = page_texts(&PdfRenderer.render(&slip).unwrap());
        assert_eq!(pages.len(), 3);

        let rows: Vec<&String> = pages
            .iter()
            .flatten()
            .filter(|line| line.contains("Part "))
            .collect();
        assert_eq!(rows.len(), 120);
        assert!(rows[119].contains("Part 119"));
        assert_eq!(pages[2].last().unwrap(), "Actual Weight: 11.0 kg");
    }

    #[test]
    fn test_long_description_wraps() {
        let mut slip = sample_slip();
        slip.export.items = vec![Item::new("Rug", "x".repeat(DESCRIPTION_WIDTH + 5), 1)];

        let pages = page_texts(&PdfRenderer.render(&slip).unwrap());
        let rug = pages[0].iter().position(|line| line.contains("Rug")).unwrap();
        assert!(pages[0][rug].ends_with(" 1"));
        assert_eq!(pages[0][rug + 1].trim(), "xxxxx");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("Caf\u{e9} \u{2615}"), b"Caf\xe9 ?".to_vec());
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(PdfRenderer.file_name("Box 4"), "Box 4_Packing_List.pdf");
    }
}
