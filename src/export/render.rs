use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::ExportError;
use super::layout::{FontStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PageLayout};

const PT_PER_MM: f32 = 72.0 / 25.4;

impl FontStyle {
    fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }
}

fn standard_font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Build a PDF with one content stream per laid-out page.
pub fn render(pages: &[PageLayout]) -> Result<Document, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(standard_font("Helvetica"));
    let bold_id = doc.add_object(standard_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontStyle::Regular.resource_name() => regular_id,
            FontStyle::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = Vec::with_capacity(page.lines.len() * 5);
        for line in &page.lines {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![line.style.resource_name().into(), line.size.into()],
                ),
                Operation::new("Td", vec![line.x.into(), line.baseline.into()]),
                Operation::new("Tj", vec![Object::string_literal(line.text.as_str())]),
                Operation::new("ET", vec![]),
            ]);
        }
        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (PAGE_WIDTH_MM * PT_PER_MM).into(),
                (PAGE_HEIGHT_MM * PT_PER_MM).into(),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::{build_blocks, layout};
    use crate::research::testing::summarized;

    #[test]
    fn one_pdf_page_per_layout_page() {
        let papers: Vec<_> = (0..40)
            .map(|i| summarized(&format!("Paper {i}"), &"summary text ".repeat(30)))
            .collect();
        let pages = layout(&build_blocks("Many", &papers));
        let doc = render(&pages).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
    }

    #[test]
    fn heading_only_document_has_one_page() {
        let doc = render(&layout(&build_blocks("Empty", &[]))).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
