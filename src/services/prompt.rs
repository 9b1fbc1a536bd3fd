//! Prompt Builder
//!
//! Pure functions that turn pitch data into model prompts. Nothing here
//! performs I/O.

use pitch_writer_core::{PitchField, PitchFields};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Appended to every direct-provider generation prompt
pub const GENERATION_SUFFIX: &str =
    "Please provide a professional, compelling response that would work well in a business pitch context.";

const ENHANCEMENT_SUFFIX: &str = "Please rewrite this content according to the specified style while maintaining the core message and key information.";

const NOT_AVAILABLE: &str = "N/A";

/// Rewrite styles for content enhancement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhanceStyle {
    #[default]
    Formal,
    Persuasive,
    Friendly,
    Concise,
    InvestorFriendly,
}

impl EnhanceStyle {
    pub const ALL: [EnhanceStyle; 5] = [
        EnhanceStyle::Formal,
        EnhanceStyle::Persuasive,
        EnhanceStyle::Friendly,
        EnhanceStyle::Concise,
        EnhanceStyle::InvestorFriendly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnhanceStyle::Formal => "formal",
            EnhanceStyle::Persuasive => "persuasive",
            EnhanceStyle::Friendly => "friendly",
            EnhanceStyle::Concise => "concise",
            EnhanceStyle::InvestorFriendly => "investor-friendly",
        }
    }

    /// Parse a style name; unknown names fall back to `Formal`
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }

    /// Instruction given to the model for this style
    pub fn instruction(&self) -> &'static str {
        match self {
            EnhanceStyle::Formal => "Rewrite this content in a formal, professional tone suitable for corporate presentations",
            EnhanceStyle::Persuasive => "Rewrite this content to be more persuasive and compelling, using strong action words and emotional appeal",
            EnhanceStyle::Friendly => "Rewrite this content in a friendly, approachable tone while maintaining professionalism",
            EnhanceStyle::Concise => "Rewrite this content to be more concise and to-the-point, removing unnecessary words",
            EnhanceStyle::InvestorFriendly => "Rewrite this content to appeal to investors, focusing on ROI, market opportunity, and growth potential",
        }
    }
}

/// Non-empty pitch fields as a JSON object, keyed by wire name
pub fn context_json(fields: &PitchFields) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(field, text)| (field.as_str().to_string(), Value::String(text.to_string())))
        .collect();
    Value::Object(map)
}

/// Prompt for the direct-provider generation tier
pub fn generation_prompt(prompt: &str, context: Option<&PitchFields>) -> String {
    let mut out = String::new();
    if let Some(ctx) = context {
        let rendered =
            serde_json::to_string_pretty(&context_json(ctx)).unwrap_or_else(|_| "{}".to_string());
        out.push_str("Context: ");
        out.push_str(&rendered);
        out.push_str("\n\n");
    }
    out.push_str(prompt);
    out.push_str("\n\n");
    out.push_str(GENERATION_SUFFIX);
    out
}

/// Prompt for rewriting `content` in `style`
pub fn enhancement_prompt(content: &str, style: EnhanceStyle) -> String {
    format!(
        "{}:\n\n{}\n\n{}",
        style.instruction(),
        content,
        ENHANCEMENT_SUFFIX
    )
}

/// Prompt asking the model to draft one pitch section.
///
/// Sections downstream of the solution are written against the solution
/// text; the problem statement is written against the title.
pub fn field_prompt(field: PitchField, pitch: &PitchFields) -> String {
    let kind = or_default(&pitch.pitch_type, "business");
    let audience = or_default(&pitch.audience, "a general audience");
    match field {
        PitchField::Problem => format!(
            "Generate a compelling problem statement for a {} pitch targeting {}. The pitch is about: {}",
            kind, audience, pitch.title
        ),
        PitchField::Solution => format!(
            "Generate a compelling solution description for: {}. The solution should be for a {} pitch.",
            pitch.problem, kind
        ),
        PitchField::Usp => format!(
            "Generate a unique selling proposition for this solution: {}",
            pitch.solution
        ),
        PitchField::MarketSize => format!(
            "Generate market size and opportunity analysis for: {}",
            pitch.solution
        ),
        PitchField::TargetAudience => format!("Define target audience for: {}", pitch.solution),
        PitchField::RevenueModel => format!("Generate a revenue model for: {}", pitch.solution),
        PitchField::GoToMarket => {
            format!("Generate go-to-market strategy for: {}", pitch.solution)
        }
        PitchField::Competition => {
            format!("Generate competition analysis for: {}", pitch.solution)
        }
        PitchField::Team => format!(
            "Generate team description and execution plan for: {}",
            pitch.solution
        ),
        PitchField::Ask => format!(
            "Generate a compelling ask/call-to-action for a {} pitch about: {}",
            kind, pitch.solution
        ),
        other => format!(
            "Write the {} section for a {} pitch titled \"{}\" aimed at {}.",
            other.label().to_lowercase(),
            kind,
            pitch.title,
            audience
        ),
    }
}

/// The three summary prompts for one pitch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompts {
    pub one_liner: String,
    pub elevator: String,
    pub one_minute: String,
}

impl SummaryPrompts {
    pub fn build(pitch: &PitchFields) -> Self {
        let digest = pitch_digest(pitch);
        Self {
            one_liner: format!(
                "Create a compelling one-liner (maximum 15 words) that captures the essence of this pitch:\n\n{}",
                digest
            ),
            elevator: format!(
                "Create a 30-second elevator pitch (2-3 sentences) based on this information:\n\n{}",
                digest
            ),
            one_minute: format!(
                "Create a 1-minute pitch summary (4-5 sentences) that covers the key points:\n\n{}",
                digest
            ),
        }
    }
}

/// Labelled block of the pitch's headline sections, "N/A" for blanks
pub fn pitch_digest(pitch: &PitchFields) -> String {
    let lines = [
        ("Title", &pitch.title),
        ("Problem", &pitch.problem),
        ("Solution", &pitch.solution),
        ("Market", &pitch.market_size),
        ("Revenue Model", &pitch.revenue_model),
        ("Team", &pitch.team),
        ("Ask", &pitch.ask),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{}: {}", label, or_default(value, NOT_AVAILABLE)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
