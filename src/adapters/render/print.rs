use crate::adapters::render::slip_file_name;
use crate::domain::model::{Address, PackingSlip};
use crate::domain::ports::SlipRenderer;
use crate::utils::error::Result;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #444;padding:4px 8px;text-align:left}\
.addresses{display:flex;gap:4em;margin:1em 0}\
.totals td{font-weight:bold}\
@media print{button{display:none}}";

/// Self-contained HTML page of the packing slip, ready for the browser's
/// print dialog (or "save as PDF").
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintRenderer;

impl PrintRenderer {
    pub fn render_html(&self, slip: &PackingSlip) -> String {
        let box_name = escape(&slip.export.box_name);
        let mut html = String::new();

        html.push_str(&format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Packing List - {box_name}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
             <h1>Packing List - {box_name}</h1>\n<p>Date: {}</p>\n",
            escape(&slip.shipping_date)
        ));

        html.push_str("<div class=\"addresses\">\n");
        push_address(&mut html, "From", &slip.from_address);
        push_address(&mut html, "To", &slip.to_address);
        html.push_str("</div>\n");

        html.push_str(
            "<table>\n<thead><tr><th>No.</th><th>Item</th><th>Description</th><th>Quantity</th></tr></thead>\n<tbody>\n",
        );
        for (position, item) in slip.export.items.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                position + 1,
                escape(&item.name),
                escape(&item.description),
                item.quantity
            ));
        }
        html.push_str(&format!(
            "</tbody>\n<tfoot class=\"totals\">\n\
             <tr><td colspan=\"3\">Total Quantity</td><td>{}</td></tr>\n\
             <tr><td colspan=\"3\">Volumetric Weight</td><td>{}</td></tr>\n\
             <tr><td colspan=\"3\">Actual Weight</td><td>{}</td></tr>\n\
             </tfoot>\n</table>\n",
            slip.export.total_quantity,
            escape(&slip.export.volumetric_weight_label),
            escape(&slip.export.declared_weight_label)
        ));

        html.push_str("<button onclick=\"window.print()\">Print</button>\n</body>\n</html>\n");
        html
    }
}

impl SlipRenderer for PrintRenderer {
    fn file_name(&self, box_name: &str) -> String {
        slip_file_name(box_name, "html")
    }

    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>> {
        Ok(self.render_html(slip).into_bytes())
    }
}

fn push_address(html: &mut String, heading: &str, address: &Address) {
    html.push_str(&format!("<div>\n<h3>{}</h3>\n<p>", heading));
    let lines: Vec<String> = address.lines().iter().map(|line| escape(line)).collect();
    html.push_str(&lines.join("<br>\n"));
    html.push_str("</p>\n</div>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
