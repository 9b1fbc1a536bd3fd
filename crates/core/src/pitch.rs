//! Pitch Domain Model
//!
//! The fixed, ordered set of named text sections that make up a pitch,
//! plus its lifecycle status and the partial-update (merge) type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A named text section of a pitch.
///
/// Declaration order is the canonical section order used for storage,
/// word counting and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchField {
    Title,
    Description,
    #[serde(rename = "type")]
    PitchType,
    Audience,
    Problem,
    Solution,
    MarketSize,
    TargetAudience,
    Usp,
    RevenueModel,
    GoToMarket,
    Competition,
    Team,
    Ask,
}

impl PitchField {
    /// All fields in canonical order.
    pub const ALL: [PitchField; 14] = [
        PitchField::Title,
        PitchField::Description,
        PitchField::PitchType,
        PitchField::Audience,
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

    /// Wire/column name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchField::Title => "title",
            PitchField::Description => "description",
            PitchField::PitchType => "type",
            PitchField::Audience => "audience",
            PitchField::Problem => "problem",
            PitchField::Solution => "solution",
            PitchField::MarketSize => "market_size",
            PitchField::TargetAudience => "target_audience",
            PitchField::Usp => "usp",
            PitchField::RevenueModel => "revenue_model",
            PitchField::GoToMarket => "go_to_market",
            PitchField::Competition => "competition",
            PitchField::Team => "team",
            PitchField::Ask => "ask",
        }
    }

    /// Human-readable section label.
    pub fn label(&self) -> &'static str {
        match self {
            PitchField::Title => "Title",
            PitchField::Description => "Description",
            PitchField::PitchType => "Pitch Type",
            PitchField::Audience => "Audience",
            PitchField::Problem => "Problem Statement",
            PitchField::Solution => "Solution",
            PitchField::MarketSize => "Market Size",
            PitchField::TargetAudience => "Target Audience",
            PitchField::Usp => "Unique Selling Proposition",
            PitchField::RevenueModel => "Revenue Model",
            PitchField::GoToMarket => "Go-to-Market Strategy",
            PitchField::Competition => "Competition",
            PitchField::Team => "Team",
            PitchField::Ask => "The Ask",
        }
    }

    /// Parse from the wire/column name.
    pub fn from_str_value(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::parse(format!("unknown pitch field: {}", s)))
    }
}

impl fmt::Display for PitchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PitchStatus {
    #[default]
    Draft,
    Completed,
}

impl PitchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchStatus::Draft => "draft",
            PitchStatus::Completed => "completed",
        }
    }

    /// Parse from a database string representation.
    pub fn from_str_value(s: &str) -> CoreResult<Self> {
        match s {
            "draft" => Ok(PitchStatus::Draft),
            "completed" => Ok(PitchStatus::Completed),
            other => Err(CoreError::parse(format!("unknown pitch status: {}", other))),
        }
    }
}

impl fmt::Display for PitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The text content of a pitch.
///
/// Missing fields deserialize as empty strings, matching the editor's
/// "every section starts blank" model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchFields {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pitch_type: String,
    pub audience: String,
    pub problem: String,
    pub solution: String,
    pub market_size: String,
    pub target_audience: String,
    pub usp: String,
    pub revenue_model: String,
    pub go_to_market: String,
    pub competition: String,
    pub team: String,
    pub ask: String,
}

impl PitchFields {
    /// Borrow the text of a single field
    pub fn get(&self, field: PitchField) -> &str {
        match field {
            PitchField::Title => &self.title,
            PitchField::Description => &self.description,
            PitchField::PitchType => &self.pitch_type,
            PitchField::Audience => &self.audience,
            PitchField::Problem => &self.problem,
            PitchField::Solution => &self.solution,
            PitchField::MarketSize => &self.market_size,
            PitchField::TargetAudience => &self.target_audience,
            PitchField::Usp => &self.usp,
            PitchField::RevenueModel => &self.revenue_model,
            PitchField::GoToMarket => &self.go_to_market,
            PitchField::Competition => &self.competition,
            PitchField::Team => &self.team,
            PitchField::Ask => &self.ask,
        }
    }

    fn slot(&mut self, field: PitchField) -> &mut String {
        match field {
            PitchField::Title => &mut self.title,
            PitchField::Description => &mut self.description,
            PitchField::PitchType => &mut self.pitch_type,
            PitchField::Audience => &mut self.audience,
            PitchField::Problem => &mut self.problem,
            PitchField::Solution => &mut self.solution,
            PitchField::MarketSize => &mut self.market_size,
            PitchField::TargetAudience => &mut self.target_audience,
            PitchField::Usp => &mut self.usp,
            PitchField::RevenueModel => &mut self.revenue_model,
            PitchField::GoToMarket => &mut self.go_to_market,
            PitchField::Competition => &mut self.competition,
            PitchField::Team => &mut self.team,
            PitchField::Ask => &mut self.ask,
        }
    }

    /// Replace the text of a single field
    pub fn set(&mut self, field: PitchField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Iterate `(field, text)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (PitchField, &str)> + '_ {
        PitchField::ALL.iter().map(move |field| (*field, self.get(*field)))
    }

    /// Merge a partial update; `None` leaves the field unchanged.
    pub fn apply(&mut self, patch: &PitchPatch) {
        for (field, value) in patch.iter_set() {
            self.set(field, value);
        }
    }
}

/// Partial update of a pitch (merge semantics)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pitch_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_to_market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PitchStatus>,
}

impl PitchPatch {
    fn get(&self, field: PitchField) -> Option<&String> {
        match field {
            PitchField::Title => self.title.as_ref(),
            PitchField::Description => self.description.as_ref(),
            PitchField::PitchType => self.pitch_type.as_ref(),
            PitchField::Audience => self.audience.as_ref(),
            PitchField::Problem => self.problem.as_ref(),
            PitchField::Solution => self.solution.as_ref(),
            PitchField::MarketSize => self.market_size.as_ref(),
            PitchField::TargetAudience => self.target_audience.as_ref(),
            PitchField::Usp => self.usp.as_ref(),
            PitchField::RevenueModel => self.revenue_model.as_ref(),
            PitchField::GoToMarket => self.go_to_market.as_ref(),
            PitchField::Competition => self.competition.as_ref(),
            PitchField::Team => self.team.as_ref(),
            PitchField::Ask => self.ask.as_ref(),
        }
    }

    /// Iterate the text fields present in this patch
    pub fn iter_set(&self) -> impl Iterator<Item = (PitchField, &str)> + '_ {
        PitchField::ALL
            .iter()
            .filter_map(move |field| self.get(*field).map(|v| (*field, v.as_str())))
    }

    /// Set a single text field on the patch
    pub fn with_field(mut self, field: PitchField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            PitchField::Title => self.title = value,
            PitchField::Description => self.description = value,
            PitchField::PitchType => self.pitch_type = value,
            PitchField::Audience => self.audience = value,
            PitchField::Problem => self.problem = value,
            PitchField::Solution => self.solution = value,
            PitchField::MarketSize => self.market_size = value,
            PitchField::TargetAudience => self.target_audience = value,
            PitchField::Usp => self.usp = value,
            PitchField::RevenueModel => self.revenue_model = value,
            PitchField::GoToMarket => self.go_to_market = value,
            PitchField::Competition => self.competition = value,
            PitchField::Team => self.team = value,
            PitchField::Ask => self.ask = value,
        }
        self
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.iter_set().next().is_none()
    }
}
