use crate::errors::ChartError;
use crate::records::RecordSet;
use serde::{Deserialize, Serialize};

/// Direction the overall chart lays out in. Vertical is the default; the
/// serializer only emits a rankdir attribute for horizontal charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartOrientation {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    Straight,
    Curved,
    #[default]
    Orthogonal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordShape {
    #[default]
    Rounded,
    Rectangle,
    Ellipse,
    Circle,
    Diamond,
}

impl RecordShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rounded => "rounded",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub orientation: ChartOrientation,
    pub link_style: LinkStyle,
    pub record_shape: RecordShape,
}

/// Which way a relationship between an auxiliary record and a primary
/// record reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    /// The satellite carries the link; the chart draws primary -> satellite
    /// and gives the satellite its own node.
    SatelliteToPrimary,
    /// The reverse read; the chart draws satellite -> primary and creates
    /// no satellite node.
    PrimaryToSatellite,
}

/// How the selector's field is matched against a primary record id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMatch {
    #[default]
    DirectLinks,
    /// Match inside the nested values-by-linked-record-id lookup cell,
    /// addressed through the first linked record id.
    LookupValues,
}

/// Identifies, for one auxiliary collection, the field holding the link
/// back to the primary table and how that relationship reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSelector {
    pub field_id: String,
    pub direction: LinkDirection,
    #[serde(default)]
    pub match_mode: LinkMatch,
}

impl LinkSelector {
    pub fn satellite_to_primary(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            direction: LinkDirection::SatelliteToPrimary,
            match_mode: LinkMatch::DirectLinks,
        }
    }

    pub fn primary_to_satellite(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            direction: LinkDirection::PrimaryToSatellite,
            match_mode: LinkMatch::DirectLinks,
        }
    }

    pub fn with_lookup_match(mut self) -> Self {
        self.match_mode = LinkMatch::LookupValues;
        self
    }
}

/// One auxiliary collection plus the selectors describing how its records
/// relate to the primary table. No selectors means no relationships.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryLinkSet {
    pub records: RecordSet,
    pub selectors: Vec<LinkSelector>,
}

/// The validated settings bundle the chart is built from. The resolver
/// that produced it already checked relational correctness; this type only
/// guards its own shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub primary: RecordSet,
    /// Multi-link field on the primary table pointing at other primary
    /// records (same-table self-links).
    pub self_link_field: Option<String>,
    /// Single-select field whose option name maps to a duration.
    pub type_field: Option<String>,
    pub auxiliary: Vec<AuxiliaryLinkSet>,
    pub style: StyleConfig,
}

/// Auxiliary collections beyond this count are rejected at validation.
pub const MAX_AUXILIARY_SETS: usize = 2;

impl ChartSettings {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.auxiliary.len() > MAX_AUXILIARY_SETS {
            return Err(ChartError::InvalidSettings(format!(
                "at most {} auxiliary link sets are supported, got {}",
                MAX_AUXILIARY_SETS,
                self.auxiliary.len()
            )));
        }
        for (slot, set) in self.auxiliary.iter().enumerate() {
            for selector in &set.selectors {
                if selector.field_id.trim().is_empty() {
                    return Err(ChartError::InvalidSettings(format!(
                        "auxiliary set {slot} has a selector with an empty field id"
                    )));
                }
            }
        }
        if matches!(self.self_link_field.as_deref(), Some(field) if field.trim().is_empty()) {
            return Err(ChartError::InvalidSettings(
                "self-link field id is empty".to_string(),
            ));
        }
        Ok(())
    }
}
