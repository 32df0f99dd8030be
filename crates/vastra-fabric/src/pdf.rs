//! A4 fabric recommendation report.
//!
//! Layout is done by hand on a fixed grid: Helvetica text, filled header
//! rows, thin grid lines. Long paragraphs wrap on character count and spill
//! onto new pages.

use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde_json::Value;

use crate::types::ReportRequest;
use vastra_core::{Error, Result};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 36.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Recommendation rows printed in the table.
pub const MAX_TABLE_ROWS: usize = 15;

const PURPLE: (f32, f32, f32) = (0.420, 0.275, 0.757);
const LAVENDER: (f32, f32, f32) = (0.624, 0.478, 0.918);
const LIGHT_GRAY: (f32, f32, f32) = (0.953, 0.957, 0.965);
const GRAY: (f32, f32, f32) = (0.5, 0.5, 0.5);

pub fn report_filename(now: chrono::DateTime<Local>) -> String {
    format!("fabric_recommendations_{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// Render the report and return the PDF bytes.
pub fn render_report(req: &ReportRequest, now: chrono::DateTime<Local>) -> Result<Vec<u8>> {
    let mut pdf = PageWriter::new();

    pdf.centered("Fabric Recommendation Report", 22.0, true, PURPLE);
    pdf.gap(6.0);
    pdf.line_of_text(
        &format!("Generated: {}", now.format("%B %d, %Y %I:%M %p")),
        10.0,
        false,
        (0.0, 0.0, 0.0),
    );
    pdf.gap(16.0);

    // Design analysis
    pdf.heading("Design Analysis");
    let analysis = &req.image_analysis;
    let colors = analysis["dominant_colors"]
        .as_array()
        .map(|colors| {
            colors
                .iter()
                .take(4)
                .map(|c| format!("{} ({}%)", text(&c["name"], ""), number(&c["percentage"])))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    let predicted = analysis["predicted_fabric_types"]
        .as_array()
        .map(|types| {
            types
                .iter()
                .take(3)
                .map(|t| text(t, ""))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    let rows = vec![
        vec!["Garment Type".to_string(), text(&req.user_preferences["garment_type"], "Unknown")],
        vec!["Dominant Colors".to_string(), colors],
        vec![
            "Texture Type".to_string(),
            text(&analysis["texture_analysis"]["texture_type"], "Unknown"),
        ],
        vec!["Predicted Fabrics".to_string(), predicted],
    ];
    pdf.table(&[144.0, CONTENT_WIDTH - 144.0], &rows, TableStyle::LabelColumn);
    pdf.gap(14.0);

    // Recommendations
    pdf.heading(&format!("Multi-Platform Results ({})", req.recommendations.len()));
    let mut rows = vec![["Fabric Name", "Type", "Price", "Platform", "Supplier"]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()];
    for rec in req.recommendations.iter().take(MAX_TABLE_ROWS) {
        rows.push(vec![
            clip(&text(&rec["fabric_name"], "N/A"), 30),
            clip(&text(&rec["fabric_type"], "General"), 12),
            format!("Rs.{:.0}", rec["price_per_meter"].as_f64().unwrap_or(0.0)),
            clip(&text(&rec["platform"], "N/A").to_uppercase(), 12),
            clip(&text(&rec["supplier"], "N/A"), 12),
        ]);
    }
    pdf.table(&[150.0, 80.0, 60.0, 116.0, 117.0], &rows, TableStyle::HeaderRow);
    pdf.gap(14.0);

    // Summary
    pdf.heading("AI Summary & Insights");
    pdf.paragraph(&req.ai_summary, 10.0);

    pdf.gap(20.0);
    pdf.centered(
        "VastraVaani AI - Fabric Recommender - Real-time E-commerce Data",
        7.0,
        false,
        GRAY,
    );

    pdf.finish()
}

fn text(value: &Value, default: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => default.to_string(),
    }
}

fn number(value: &Value) -> String {
    value.as_f64().map(|v| v.to_string()).unwrap_or_else(|| "0".into())
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Helvetica with the standard encoding only covers Latin-1 well.
fn pdf_safe(s: &str) -> String {
    s.replace('₹', "Rs.")
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { ' ' })
        .collect()
}

/// Rough Helvetica advance width, good enough for wrapping and centering.
fn text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * 0.5
}

fn wrap(s: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * 0.5)) as usize).max(1);
    let mut lines = Vec::new();
    for paragraph in s.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() { word.len() } else { line.len() + 1 + word.len() };
            if candidate > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[derive(Clone, Copy, PartialEq)]
enum TableStyle {
    /// First column shaded and bold.
    LabelColumn,
    /// First row filled purple with white bold text.
    HeaderRow,
}

/// Accumulates drawing operations page by page.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn draw_text(&mut self, x: f32, y: f32, s: &str, size: f32, bold: bool, color: (f32, f32, f32)) {
        let font = if bold { "F2" } else { "F1" };
        let ops = self.ops();
        ops.push(Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]));
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(pdf_safe(s))]));
        ops.push(Operation::new("ET", vec![]));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: (f32, f32, f32)) {
        let ops = self.ops();
        ops.push(Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]));
        ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        ops.push(Operation::new("f", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let ops = self.ops();
        ops.push(Operation::new("RG", vec![GRAY.0.into(), GRAY.1.into(), GRAY.2.into()]));
        ops.push(Operation::new("w", vec![0.5f32.into()]));
        ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        ops.push(Operation::new("S", vec![]));
    }

    fn line_of_text(&mut self, s: &str, size: f32, bold: bool, color: (f32, f32, f32)) {
        self.ensure_space(size * 1.4);
        self.y -= size * 1.4;
        let y = self.y;
        self.draw_text(MARGIN, y, s, size, bold, color);
    }

    fn centered(&mut self, s: &str, size: f32, bold: bool, color: (f32, f32, f32)) {
        self.ensure_space(size * 1.4);
        self.y -= size * 1.4;
        let x = (PAGE_WIDTH - text_width(s, size)).max(0.0) / 2.0;
        let y = self.y;
        self.draw_text(x, y, s, size, bold, color);
    }

    fn heading(&mut self, s: &str) {
        self.line_of_text(s, 12.0, true, LAVENDER);
        self.gap(6.0);
    }

    fn paragraph(&mut self, s: &str, size: f32) {
        for line in wrap(s, size, CONTENT_WIDTH) {
            self.line_of_text(&line, size, false, (0.0, 0.0, 0.0));
        }
    }

    fn table(&mut self, widths: &[f32], rows: &[Vec<String>], style: TableStyle) {
        const SIZE: f32 = 8.5;
        const PAD: f32 = 4.0;

        for (r, row) in rows.iter().enumerate() {
            // Wrap every cell to its column, row height follows the tallest
            let cells: Vec<Vec<String>> = row
                .iter()
                .zip(widths)
                .map(|(cell, w)| wrap(cell, SIZE, w - 2.0 * PAD))
                .collect();
            let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let height = lines as f32 * SIZE * 1.3 + 2.0 * PAD;

            self.ensure_space(height);
            let top = self.y;
            let bottom = top - height;

            let mut x = MARGIN;
            for (c, (cell, w)) in cells.iter().zip(widths).enumerate() {
                let header = match style {
                    TableStyle::HeaderRow => r == 0,
                    TableStyle::LabelColumn => c == 0,
                };
                if header {
                    let fill = if style == TableStyle::HeaderRow { PURPLE } else { LIGHT_GRAY };
                    self.fill_rect(x, bottom, *w, height, fill);
                }
                self.stroke_rect(x, bottom, *w, height);

                let color = if header && style == TableStyle::HeaderRow {
                    (1.0, 1.0, 1.0)
                } else {
                    (0.0, 0.0, 0.0)
                };
                for (i, line) in cell.iter().enumerate() {
                    let baseline = top - PAD - SIZE - i as f32 * SIZE * 1.3;
                    self.draw_text(x + PAD, baseline, line, SIZE, header, color);
                }
                x += w;
            }
            self.y = bottom;
        }
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let mut kids: Vec<ObjectId> = Vec::new();
        for operations in self.pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| Error::Internal(format!("PDF content: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            kids.push(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            }));
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => kids.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf)
            .map_err(|e| Error::Internal(format!("PDF write: {}", e)))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 5, 7).unwrap()
    }

    fn request(recommendations: usize, summary: &str) -> ReportRequest {
        ReportRequest {
            recommendations: (0..recommendations)
                .map(|i| {
                    json!({
                        "fabric_name": format!("Handloom Cotton {}", i),
                        "fabric_type": "cotton",
                        "price_per_meter": 249.5,
                        "platform": "google_shopping",
                        "supplier": "Fabriclore"
                    })
                })
                .collect(),
            image_analysis: json!({
                "dominant_colors": [{"name": "Blue", "percentage": 61.2}],
                "texture_analysis": {"texture_type": "cotton_blend"},
                "predicted_fabric_types": ["Cotton", "Poplin"]
            }),
            user_preferences: json!({"garment_type": "shirt"}),
            ai_summary: summary.into(),
        }
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            report_filename(fixed_time()),
            "fabric_recommendations_20250314_090507.pdf"
        );
    }

    #[test]
    fn test_report_is_valid_pdf() {
        let bytes = render_report(&request(3, "Breathable cotton suits ₹ budgets."), fixed_time()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("(Fabric Recommendation Report)"));
        assert!(raw.contains("(Generated: March 14, 2025 09:05 AM)"));
        assert!(raw.contains("(Handloom Cotton 2)"));
        assert!(raw.contains("(Rs.250)") || raw.contains("(Rs.249)"));
        assert!(raw.contains("(GOOGLE_SHOPP)"));
    }

    #[test]
    fn test_table_rows_capped_and_long_summary_spills() {
        let summary = "Linen breathes well in humid weather. ".repeat(300);
        let bytes = render_report(&request(40, &summary), fixed_time()).unwrap();
        let raw = String::from_utf8_lossy(&bytes);

        assert!(raw.contains("(Handloom Cotton 14)"));
        assert!(!raw.contains("(Handloom Cotton 15)"));
        assert!(raw.contains("(Multi-Platform Results \\(40\\))") || raw.contains("Multi-Platform Results"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("one two three four", 10.0, 50.0);
        assert_eq!(lines, vec!["one two", "three four"]);
        assert_eq!(wrap("", 10.0, 50.0), vec![""]);
    }
}
