use crate::clock::Clock;
use crate::model::{
    ACCENT_COLOR, ChartEdge, ChartGraph, ChartNode, NEUTRAL_COLOR, PRIMARY_FILL_COLOR,
    PRIMARY_FONT_COLOR, PRIMARY_STROKE_COLOR, SATELLITE_PALETTES, SatellitePalette, display_label,
    duration_seconds,
};
use crate::records::SourceRecord;
use crate::settings::{
    AuxiliaryLinkSet, ChartSettings, LinkDirection, LinkMatch, LinkSelector, RecordShape,
};

/// Builds the abstract graph from a validated settings bundle. Never
/// fails: absent selectors, missing links, and empty auxiliary sets all
/// contribute nothing.
pub fn build_chart(settings: &ChartSettings, clock: &dyn Clock) -> ChartGraph {
    let mut graph = ChartGraph {
        generated_at: clock.timestamp(),
        ..ChartGraph::default()
    };
    let mut total_seconds = 0;

    let mut index = 0;
    for record in settings.primary.iter() {
        if record.is_deleted {
            continue;
        }
        let base_color = if index == 0 { ACCENT_COLOR } else { NEUTRAL_COLOR };

        graph.nodes.push(primary_node(record));

        for (slot, set) in settings.auxiliary.iter().enumerate() {
            let palette = SATELLITE_PALETTES[slot.min(SATELLITE_PALETTES.len() - 1)];
            for selector in &set.selectors {
                resolve_selector(&mut graph, record, base_color, set, selector, palette);
            }
        }

        if let Some(field_id) = settings.self_link_field.as_deref() {
            collect_self_links(&mut graph, settings, record, index, field_id);
        }

        if let Some(field_id) = settings.type_field.as_deref() {
            if let Some(option) = record.select(field_id) {
                total_seconds += duration_seconds(&option.name);
            }
        }

        index += 1;
    }

    graph.total_seconds = total_seconds;
    graph
}

fn primary_node(record: &SourceRecord) -> ChartNode {
    let label = display_label(&record.name);
    ChartNode {
        id: record.id.clone(),
        tooltip: label.clone(),
        label,
        shape: None,
        font_color: PRIMARY_FONT_COLOR.to_string(),
        stroke_color: PRIMARY_STROKE_COLOR.to_string(),
        fill_color: PRIMARY_FILL_COLOR.to_string(),
    }
}

fn satellite_node(record: &SourceRecord, palette: SatellitePalette) -> ChartNode {
    let label = display_label(&record.name);
    ChartNode {
        id: record.id.clone(),
        tooltip: format!("{}{}", palette.tooltip_prefix, label),
        label,
        shape: Some(RecordShape::Diamond),
        font_color: palette.font_color.to_string(),
        stroke_color: palette.stroke_color.to_string(),
        fill_color: palette.fill_color.to_string(),
    }
}

/// Resolves one relationship selector for the current primary record:
/// scans the auxiliary set for satellites matching the record and appends
/// the resulting node (satellite-to-primary only) and edge per match.
fn resolve_selector(
    graph: &mut ChartGraph,
    record: &SourceRecord,
    base_color: &str,
    set: &AuxiliaryLinkSet,
    selector: &LinkSelector,
    palette: SatellitePalette,
) {
    for satellite in set.records.iter() {
        if satellite.is_deleted || !selector_matches(satellite, selector, &record.id) {
            continue;
        }
        match selector.direction {
            LinkDirection::SatelliteToPrimary => {
                if !graph.contains_node(&satellite.id) {
                    graph.nodes.push(satellite_node(satellite, palette));
                }
                graph
                    .edges
                    .push(ChartEdge::new(&record.id, &satellite.id, base_color));
            }
            LinkDirection::PrimaryToSatellite => {
                graph
                    .edges
                    .push(ChartEdge::new(&satellite.id, &record.id, base_color));
            }
        }
    }
}

fn selector_matches(satellite: &SourceRecord, selector: &LinkSelector, record_id: &str) -> bool {
    match selector.match_mode {
        LinkMatch::DirectLinks => satellite.links_to(&selector.field_id, record_id),
        LinkMatch::LookupValues => satellite
            .lookup(&selector.field_id)
            .map(|lookup| lookup.primary_values().iter().any(|link| link.id == record_id))
            .unwrap_or(false),
    }
}

/// Same-table self-links. A linked id may be absent from the set or point
/// at a deleted record; both contribute nothing. Back references in
/// visitation order take the accent color.
fn collect_self_links(
    graph: &mut ChartGraph,
    settings: &ChartSettings,
    record: &SourceRecord,
    index: usize,
    field_id: &str,
) {
    for link in record.links(field_id) {
        let Some(linked) = settings.primary.get(&link.id) else {
            continue;
        };
        if linked.is_deleted {
            continue;
        }
        let color = match settings.primary.visitation_index(&linked.id) {
            Some(linked_index) if index > linked_index => ACCENT_COLOR,
            _ => NEUTRAL_COLOR,
        };
        graph.edges.push(ChartEdge::new(&record.id, &linked.id, color));
    }
}
