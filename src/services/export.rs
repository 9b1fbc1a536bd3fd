//! Pitch Export
//!
//! Renders a stored pitch as a Markdown document.

use pitch_writer_core::PitchField;
use serde::{Deserialize, Serialize};

use crate::models::pitch::PitchRecord;

/// Sections in document order; blank sections are skipped
const SECTIONS: [PitchField; 10] = [
    PitchField::Problem,
    PitchField::Solution,
    PitchField::MarketSize,
    PitchField::TargetAudience,
    PitchField::Usp,
    PitchField::RevenueModel,
    PitchField::GoToMarket,
    PitchField::Competition,
    PitchField::Team,
    PitchField::Ask,
];

/// A rendered export ready to be written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPitch {
    pub filename: String,
    pub content: String,
}

pub fn export_markdown(pitch: &PitchRecord) -> ExportedPitch {
    ExportedPitch {
        filename: format!("{}.md", file_stem(&pitch.fields.title)),
        content: render_markdown(pitch),
    }
}

pub fn render_markdown(pitch: &PitchRecord) -> String {
    let fields = &pitch.fields;
    let mut out = format!("# {}\n", fields.title.trim());

    if !fields.description.trim().is_empty() {
        out.push('\n');
        out.push_str(fields.description.trim());
        out.push('\n');
    }

    for field in SECTIONS {
        let text = fields.get(field).trim();
        if text.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n{}\n", field.label(), text));
    }
    out
}

/// Lowercased title with every non-alphanumeric ASCII char replaced by `_`
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "pitch".to_string()
    } else {
        stem
    }
}
