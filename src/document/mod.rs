//! Fixed-layout page rendering.
//!
//! A [`Document`] is a display list on a single A4 page. Callers place every
//! element themselves; nothing is measured, wrapped, or clipped.

mod client_sheet;
mod writer;

pub use client_sheet::client_sheet;
pub use writer::DocumentWriter;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const TITLE_FONT_SIZE: f32 = 14.0;
pub const TEXT_FONT_SIZE: f32 = 12.0;
pub const LINE_WIDTH: f32 = 0.1;
pub const DEFAULT_DASH: f32 = 2.5;

/// Font sizes are in points; coordinates are in millimetres.
const POINT: f32 = 25.4 / 72.0;

/// A pair of coordinates: where the label (or line) starts and where the
/// value (or line) ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

impl Placement {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Bold,
    Normal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        weight: FontWeight,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        dash: f32,
        width: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Document {
    title_font_size: f32,
    text_font_size: f32,
    line_width: f32,
    elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            title_font_size: TITLE_FONT_SIZE,
            text_font_size: TEXT_FONT_SIZE,
            line_width: LINE_WIDTH,
            elements: Vec::new(),
        }
    }

    /// Bold `label` at the start coordinates, normal `value` at the end ones.
    pub fn add_label_and_value(&mut self, placement: &Placement, label: &str, value: &str) -> &mut Self {
        self.elements.push(Element::Text {
            x: placement.start_x,
            y: placement.start_y,
            text: label.to_string(),
            font_size: self.title_font_size,
            weight: FontWeight::Bold,
        });
        self.elements.push(Element::Text {
            x: placement.end_x,
            y: placement.end_y,
            text: value.to_string(),
            font_size: self.text_font_size,
            weight: FontWeight::Normal,
        });
        self
    }

    /// Dashed segment from start to end, with the default dash length.
    pub fn add_dot(&mut self, placement: &Placement) -> &mut Self {
        self.add_dot_with_dash(placement, DEFAULT_DASH)
    }

    pub fn add_dot_with_dash(&mut self, placement: &Placement, dash: f32) -> &mut Self {
        self.elements.push(Element::Line {
            from: (placement.start_x, placement.start_y),
            to: (placement.end_x, placement.end_y),
            dash,
            width: self.line_width,
        });
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n",
            w = PAGE_WIDTH,
            h = PAGE_HEIGHT
        ));
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            PAGE_WIDTH, PAGE_HEIGHT
        ));

        for element in &self.elements {
            match element {
                Element::Text { x, y, text, font_size, weight } => {
                    let weight = match weight {
                        FontWeight::Bold => "bold",
                        FontWeight::Normal => "normal",
                    };
                    svg.push_str(&format!(
                        "<text x=\"{}\" y=\"{}\" font-family=\"Helvetica, Arial, sans-serif\" font-size=\"{:.3}\" font-weight=\"{}\">{}</text>\n",
                        x,
                        y,
                        font_size * POINT,
                        weight,
                        escape(text)
                    ));
                }
                Element::Line { from, to, dash, width } => {
                    svg.push_str(&format!(
                        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"{}\" stroke-dasharray=\"{}\"/>\n",
                        from.0, from.1, to.0, to.1, width, dash
                    ));
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
