use crate::settings::RecordShape;
use serde::{Deserialize, Serialize};

/// Base color of the first visited primary record, also the back-reference
/// edge color for same-table self-links.
pub const ACCENT_COLOR: &str = "#CFA895";
/// Base color of every other visited primary record.
pub const NEUTRAL_COLOR: &str = "#63524A";

pub const PRIMARY_FONT_COLOR: &str = "white";
pub const PRIMARY_STROKE_COLOR: &str = "#B35047";
pub const PRIMARY_FILL_COLOR: &str = "#D65F55";

/// Node colors and tooltip prefix for satellite records of one auxiliary
/// slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SatellitePalette {
    pub tooltip_prefix: &'static str,
    pub font_color: &'static str,
    pub stroke_color: &'static str,
    pub fill_color: &'static str,
}

pub const SATELLITE_PALETTES: [SatellitePalette; 2] = [
    SatellitePalette {
        tooltip_prefix: "Au clique - ",
        font_color: "black",
        stroke_color: "#C2A291",
        fill_color: "#E5BFAB",
    },
    SatellitePalette {
        tooltip_prefix: "Feedback - ",
        font_color: "black",
        stroke_color: "#968881",
        fill_color: "#C99B85",
    },
];

/// Maximum label length before truncation kicks in.
pub const MAX_LABEL_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartNode {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    /// Per-node shape override; None falls through to the default node
    /// block the serializer emits.
    pub shape: Option<RecordShape>,
    pub font_color: String,
    pub stroke_color: String,
    pub fill_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEdge {
    pub source: String,
    pub target: String,
    pub color: String,
}

impl ChartEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            color: color.into(),
        }
    }

    /// Derived edge id. Two independent relationship instances between the
    /// same pair share this id; they are still distinct edges.
    pub fn id(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

/// The abstract graph the builder produces and the serializer reads.
/// Immutable once built; node and edge order is insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartGraph {
    pub nodes: Vec<ChartNode>,
    pub edges: Vec<ChartEdge>,
    pub total_seconds: u64,
    pub generated_at: String,
}

impl ChartGraph {
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == node_id)
    }

    /// Aggregated duration metric in minutes, unrounded.
    pub fn total_minutes(&self) -> f64 {
        self.total_seconds as f64 / 60.0
    }
}

/// Display label for a record name: first 50 chars, trimmed, quotes
/// escaped, ellipsis appended when the raw name was longer.
pub fn display_label(name: &str) -> String {
    let truncated: String = name.chars().take(MAX_LABEL_CHARS).collect();
    let mut label = truncated.trim().replace('"', "\\\"");
    if name.chars().count() > MAX_LABEL_CHARS {
        label.push_str(ELLIPSIS);
    }
    label
}

/// Seconds contributed by one record's type option.
pub fn duration_seconds(type_name: &str) -> u64 {
    match type_name {
        "DIALOG" => 15,
        "POSITIONNEMENT" => 0,
        "QUIZ" => 45,
        "CLIQUE_PIECE" => 10,
        "TRANSITION" => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_sixty_chars_expected_fifty_plus_ellipsis() {
        let name = "a".repeat(60);
        let label = display_label(&name);
        assert_eq!(label, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn display_label_short_name_expected_unchanged() {
        assert_eq!(display_label("Intro step"), "Intro step");
    }

    #[test]
    fn display_label_quote_expected_escaped_not_stripped() {
        assert_eq!(display_label(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn display_label_trailing_space_at_cut_expected_trimmed_before_ellipsis() {
        let name = format!("{} {}", "b".repeat(49), "tail");
        let label = display_label(&name);
        assert_eq!(label, format!("{}...", "b".repeat(49)));
    }

    #[test]
    fn duration_seconds_known_and_unknown_types_expected_table_values() {
        assert_eq!(duration_seconds("DIALOG"), 15);
        assert_eq!(duration_seconds("QUIZ"), 45);
        assert_eq!(duration_seconds("CLIQUE_PIECE"), 10);
        assert_eq!(duration_seconds("TRANSITION"), 5);
        assert_eq!(duration_seconds("POSITIONNEMENT"), 0);
        assert_eq!(duration_seconds("UNKNOWN"), 0);
    }

    #[test]
    fn edge_id_expected_source_arrow_target() {
        let edge = ChartEdge::new("recA", "recB", NEUTRAL_COLOR);
        assert_eq!(edge.id(), "recA->recB");
    }
}
