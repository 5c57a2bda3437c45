use crate::model::{ChartEdge, ChartGraph, ChartNode};
use crate::settings::{ChartOrientation, LinkStyle, RecordShape, StyleConfig};

/// Serializes the abstract graph into the DOT document the render engine
/// consumes. Pure and deterministic: the generation timestamp is baked
/// into the graph by the builder's clock, and label/tooltip values arrive
/// already quote-escaped from the model.
pub fn serialize_dot(graph: &ChartGraph, style: &StyleConfig) -> String {
    let mut source = String::from("digraph {\n\t");
    source.push_str("bgcolor=transparent\n\t");
    source.push_str("ratio=\"0.56\"\n\t");
    source.push_str("pad=0.25\n\t");
    source.push_str("nodesep=0.25\n\t");

    if style.orientation == ChartOrientation::Horizontal {
        source.push_str("rankdir=LR\n\t");
    }

    source.push_str(splines_attribute(style.link_style));
    source.push_str("\n\n\t");

    source.push_str("node [\n\t\t");
    source.push_str(default_shape_attribute(style.record_shape));
    source.push_str("\n\t\t");
    if style.record_shape == RecordShape::Rounded {
        source.push_str("style=\"filled,rounded\"\n\t\t");
    } else {
        source.push_str("style=\"filled\"\n\t\t");
    }
    source.push_str("fontname=Helvetica\n\t");
    source.push_str("]\n\n\t");

    source.push_str(&title_statement(graph));
    source.push_str("\n\t");

    let node_statements: Vec<String> = graph.nodes.iter().map(node_statement).collect();
    source.push_str(&node_statements.join("\n\t"));
    source.push_str("\n\n\t");

    let edge_statements: Vec<String> = graph.edges.iter().map(edge_statement).collect();
    source.push_str(&edge_statements.join("\n\t"));
    source.push_str("\n}");
    source
}

fn splines_attribute(link_style: LinkStyle) -> &'static str {
    match link_style {
        LinkStyle::Straight => "splines=line",
        LinkStyle::Curved => "splines=curved",
        LinkStyle::Orthogonal => "splines=ortho",
    }
}

fn default_shape_attribute(shape: RecordShape) -> &'static str {
    match shape {
        RecordShape::Ellipse => "shape=ellipse",
        RecordShape::Circle => "shape=circle",
        RecordShape::Diamond => "shape=diamond",
        RecordShape::Rounded | RecordShape::Rectangle => "shape=rect",
    }
}

/// Title label anchored bottom-left: the duration metric in unrounded
/// minutes plus the generation timestamp. The embedded line break is the
/// DOT `\n` escape; attribute values never carry raw newlines.
fn title_statement(graph: &ChartGraph) -> String {
    format!(
        "label=\"Total time: {} min\\nGenerated: {}\" fontsize=\"50\" labelloc=\"b\" labeljust=\"l\"",
        graph.total_minutes(),
        graph.generated_at
    )
}

fn node_statement(node: &ChartNode) -> String {
    let shape = node
        .shape
        .map(|shape| format!(" shape={}", dot_shape_name(shape)))
        .unwrap_or_default();
    format!(
        "{} [id=\"{}\" label=\"{}\" tooltip=\"{}\" fontcolor=\"{}\" color=\"{}\"{} fillcolor=\"{}\"]",
        node.id,
        node.id,
        node.label,
        node.tooltip,
        node.font_color,
        node.stroke_color,
        shape,
        node.fill_color
    )
}

fn dot_shape_name(shape: RecordShape) -> &'static str {
    match shape {
        RecordShape::Ellipse => "ellipse",
        RecordShape::Circle => "circle",
        RecordShape::Diamond => "diamond",
        RecordShape::Rounded | RecordShape::Rectangle => "rect",
    }
}

fn edge_statement(edge: &ChartEdge) -> String {
    format!(
        "{} -> {} [id=\"{}\" color=\"{}\"]",
        edge.source,
        edge.target,
        edge.id(),
        edge.color
    )
}
