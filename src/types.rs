//! Shared data model for the Common Home core.
//!
//! Pure serde value types. Everything that crosses the view boundary is
//! camelCase on the wire, matching the web client's JSON shapes. Construction
//! never fails; callers supply well-formed values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::AdvisorConfig;

/// Configuration stored in ~/.commonhome/config.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

/// An owner's stance on the conversion petition.
///
/// Starts `Pending`; moves to `Signed` or `Opposed` through an external
/// action recorded via the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetitionStatus {
    Signed,
    Pending,
    Opposed,
}

impl PetitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Pending => "pending",
            Self::Opposed => "opposed",
        }
    }
}

/// Whether the team has a way to reach an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Available,
    Missing,
}

/// Elevated affordances for campaign coordinators. Descriptive only; nothing
/// in the core enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// One record per building unit/owner.
///
/// `id` is the sole stable identity for lookup and update; display fields
/// (`name`, `unit`) may change without changing identity. `status` and
/// `contact_status` are independent axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    pub id: String,
    pub unit: String,
    /// "Unknown Owner" is a valid placeholder meaning identity not yet
    /// established.
    pub name: String,
    pub status: PetitionStatus,
    pub is_resident: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub contact_status: ContactStatus,
}

/// Aggregate signature statistics. Derived from the neighbor list on every
/// read; never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingStats {
    pub total_units: u32,
    pub signed_units: u32,
    pub target_units: u32,
}

/// Static facts about the building's legal and financial ownership
/// structure. Set once at startup, read-only after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFacts {
    pub freeholder_name: String,
    pub managing_agent: String,
    /// Display string, currency-formatted (e.g. "£42,000").
    pub annual_fees: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A fixed step in the conversion process guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    /// 1-based sequence position; defines display and logical order.
    pub id: u32,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    /// Free-text duration label, e.g. "2-3 weeks".
    pub estimated_time: String,
    pub risk_level: RiskLevel,
}

/// Chat turn roles as the advisory endpoint sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn in an advisory transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// The four top-level views. A closed set so the render dispatch stays
/// exhaustive at compile time; adding a view is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    Dashboard,
    Roadmap,
    Community,
    Advisor,
}

impl ViewTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Roadmap => "roadmap",
            Self::Community => "community",
            Self::Advisor => "advisor",
        }
    }
}

/// An entry in the dashboard's recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}
