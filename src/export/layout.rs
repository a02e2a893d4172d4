use super::fonts::text_width;
use crate::normalize::to_printable_ascii;
use crate::paper::SummarizedPaper;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
/// Distance from the bottom edge that triggers a page break.
const BREAK_MARGIN_MM: f32 = 10.0;
/// Horizontal padding inside a text cell.
const CELL_PADDING_MM: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Wrapped text; `\n` starts a new line. `line_height` is in millimetres.
    Text {
        style: FontStyle,
        size: f32,
        line_height: f32,
        text: String,
    },
    /// Vertical space in millimetres.
    Gap(f32),
}

impl Block {
    fn text(style: FontStyle, size: f32, line_height: f32, text: &str) -> Self {
        Block::Text {
            style,
            size,
            line_height,
            text: text
                .lines()
                .map(to_printable_ascii)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Heading with the topic, then a title + summary block per paper.
/// All text is reduced to printable ASCII here and nowhere earlier.
pub fn build_blocks(topic: &str, papers: &[SummarizedPaper]) -> Vec<Block> {
    let mut blocks = vec![
        Block::text(FontStyle::Bold, 16.0, 10.0, topic),
        Block::Gap(5.0),
    ];
    for entry in papers {
        blocks.push(Block::text(FontStyle::Bold, 12.0, 8.0, &entry.paper.title));
        blocks.push(Block::text(FontStyle::Regular, 11.0, 8.0, &entry.summary));
        blocks.push(Block::Gap(4.0));
    }
    blocks
}

/// One line of text at an absolute position, in PDF points with the origin
/// at the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub style: FontStyle,
    pub size: f32,
    pub x: f32,
    pub baseline: f32,
    pub text: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Flow blocks onto A4 pages. Always returns at least one page.
pub fn layout(blocks: &[Block]) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut y = MARGIN_MM;
    let max_width = (PAGE_WIDTH_MM - 2.0 * (MARGIN_MM + CELL_PADDING_MM)) * PT_PER_MM;
    let bottom = PAGE_HEIGHT_MM - BREAK_MARGIN_MM;

    for block in blocks {
        match block {
            Block::Gap(h) => y += h,
            Block::Text {
                style,
                size,
                line_height,
                text,
            } => {
                for line in wrap(text, *style, *size, max_width) {
                    if y + line_height > bottom {
                        pages.push(std::mem::take(&mut page));
                        y = MARGIN_MM;
                    }
                    if !line.is_empty() {
                        // Vertically centre the glyphs in the cell.
                        let size_mm = size / PT_PER_MM;
                        let baseline_mm = y + 0.5 * line_height + 0.3 * size_mm;
                        page.lines.push(PlacedLine {
                            style: *style,
                            size: *size,
                            x: (MARGIN_MM + CELL_PADDING_MM) * PT_PER_MM,
                            baseline: (PAGE_HEIGHT_MM - baseline_mm) * PT_PER_MM,
                            text: line,
                        });
                    }
                    y += line_height;
                }
            }
        }
    }
    pages.push(page);
    pages
}

/// Wrap each `\n`-separated segment on its own, so explicit breaks and blank
/// lines in the source text survive.
fn wrap(text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    text.split('\n')
        .flat_map(|segment| wrap_segment(segment, style, size, max_width))
        .collect()
}

/// Greedy word wrap; words wider than a line are split by character.
/// Empty input still produces one (empty) line so the cell takes up space.
fn wrap_segment(text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, style, size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
