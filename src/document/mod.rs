//! Document assembly.
//!
//! Composes the generated fragments into the complete three-section document:
//! a collaboration naming each endpoint's process container, the process
//! bodies themselves, and a diagram section with synthesized positions.
//! Diagram synthesis is cosmetic and never fails — it always produces some
//! valid layout, derived purely from first-appearance order.

use crate::blueprint::Blueprint;
use crate::graph::{IdAllocator, NodeOrigin, ResolvedGraph, ResolvedNode};
use crate::properties::escape_xml;
use crate::template::{write_property, Resource, XmlFragment};
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Everything one endpoint contributes to the document.
#[derive(Debug, Clone)]
pub struct EndpointArtifacts {
    pub endpoint_id: String,
    pub endpoint_name: String,
    pub graph: ResolvedGraph,
    pub fragments: Vec<XmlFragment>,
}

/// The fully assembled document plus the ancillary files referenced by it.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub xml: String,
    /// Filename → resource, ordered for reproducible packaging.
    pub resources: BTreeMap<String, Resource>,
}

const SHAPE_SPACING: f64 = 150.0;
const SHAPE_LEFT: f64 = 40.0;
const ROW_HEIGHT: f64 = 180.0;
const ROW_CENTER: f64 = 160.0;

/// Assemble the output document for a compiled blueprint.
pub fn assemble(
    blueprint: &Blueprint,
    endpoints: &[EndpointArtifacts],
    ids: &mut IdAllocator,
) -> OutputArtifact {
    let collaboration_id = ids.next_id("Collaboration");
    let process_ids: Vec<String> = endpoints
        .iter()
        .map(|_| ids.next_id("Process"))
        .collect();

    let mut xml = String::new();
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        xml,
        r#"<bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI" xmlns:dc="http://www.omg.org/spec/DD/20100524/DC" xmlns:di="http://www.omg.org/spec/DD/20100524/DI" xmlns:ifl="http:///com.sap.ifl.model/Ifl.xsd" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" id="Definitions_1">"#
    );

    // Section (a): collaboration.
    let _ = writeln!(
        xml,
        r#"  <bpmn2:collaboration id="{}" name="{}">"#,
        collaboration_id,
        escape_xml(&blueprint.name)
    );
    for (artifacts, process_id) in endpoints.iter().zip(&process_ids) {
        let _ = writeln!(
            xml,
            r#"    <bpmn2:participant id="Participant_{}" ifl:type="IntegrationProcess" name="{}" processRef="{}"/>"#,
            process_id,
            escape_xml(&artifacts.endpoint_name),
            process_id
        );
    }
    let _ = writeln!(xml, "  </bpmn2:collaboration>");

    // Section (b): one process per endpoint.
    for (artifacts, process_id) in endpoints.iter().zip(&process_ids) {
        write_process(&mut xml, artifacts, process_id);
    }

    // Section (c): diagram.
    write_diagram(&mut xml, blueprint, endpoints, &collaboration_id);

    let _ = writeln!(xml, "</bpmn2:definitions>");

    let mut resources = BTreeMap::new();
    for artifacts in endpoints {
        for fragment in &artifacts.fragments {
            for resource in &fragment.resources {
                resources.insert(resource.filename.clone(), resource.clone());
            }
        }
    }

    OutputArtifact { xml, resources }
}

fn write_process(xml: &mut String, artifacts: &EndpointArtifacts, process_id: &str) {
    let _ = writeln!(
        xml,
        r#"  <bpmn2:process id="{}" name="{}">"#,
        process_id,
        escape_xml(&artifacts.endpoint_name)
    );
    let _ = writeln!(xml, "    <bpmn2:extensionElements>");
    write_property(xml, "    ", "transactionTimeout", "30");
    write_property(xml, "    ", "transactionalHandling", "Not Required");
    let _ = writeln!(xml, "    </bpmn2:extensionElements>");

    let fragments: AHashMap<&str, &XmlFragment> = artifacts
        .fragments
        .iter()
        .map(|f| (f.node_id.as_str(), f))
        .collect();

    for node in &artifacts.graph.nodes {
        match node.origin {
            NodeOrigin::SyntheticStart => write_synthetic_event(xml, node, true),
            NodeOrigin::SyntheticEnd => write_synthetic_event(xml, node, false),
            NodeOrigin::Component(_) => {
                if let Some(fragment) = fragments.get(node.id.as_str()) {
                    xml.push_str(&fragment.xml);
                }
            }
        }
    }

    for flow in &artifacts.graph.flows {
        let _ = writeln!(
            xml,
            r#"    <bpmn2:sequenceFlow id="{}" sourceRef="{}" targetRef="{}"/>"#,
            escape_xml(&flow.id),
            escape_xml(&flow.source_id),
            escape_xml(&flow.target_id)
        );
    }

    let _ = writeln!(xml, "  </bpmn2:process>");
}

fn write_synthetic_event(xml: &mut String, node: &ResolvedNode, is_start: bool) {
    let element = if is_start {
        "bpmn2:startEvent"
    } else {
        "bpmn2:endEvent"
    };
    let _ = writeln!(
        xml,
        r#"    <{} id="{}" name="{}">"#,
        element,
        escape_xml(&node.id),
        escape_xml(&node.name)
    );
    for flow_id in &node.incoming {
        let _ = writeln!(xml, "      <bpmn2:incoming>{}</bpmn2:incoming>", escape_xml(flow_id));
    }
    for flow_id in &node.outgoing {
        let _ = writeln!(xml, "      <bpmn2:outgoing>{}</bpmn2:outgoing>", escape_xml(flow_id));
    }
    let _ = writeln!(xml, "      <bpmn2:messageEventDefinition/>");
    let _ = writeln!(xml, "    </{element}>");
}

/// Monotonic left-to-right layout: shapes in first-appearance order, one row
/// per endpoint, two-waypoint edges between shape borders.
fn write_diagram(
    xml: &mut String,
    blueprint: &Blueprint,
    endpoints: &[EndpointArtifacts],
    collaboration_id: &str,
) {
    let _ = writeln!(
        xml,
        r#"  <bpmndi:BPMNDiagram id="BPMNDiagram_1" name="{}">"#,
        escape_xml(&blueprint.name)
    );
    let _ = writeln!(
        xml,
        r#"    <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="{collaboration_id}">"#
    );

    for (row, artifacts) in endpoints.iter().enumerate() {
        let fragments: AHashMap<&str, &XmlFragment> = artifacts
            .fragments
            .iter()
            .map(|f| (f.node_id.as_str(), f))
            .collect();
        let center_y = ROW_CENTER + row as f64 * ROW_HEIGHT;

        let mut bounds: AHashMap<&str, (f64, f64, f64, f64)> = AHashMap::new();
        for (i, node) in artifacts.graph.nodes.iter().enumerate() {
            let (w, h) = fragments
                .get(node.id.as_str())
                .map(|f| f.shape)
                .unwrap_or((32.0, 32.0));
            let x = SHAPE_LEFT + i as f64 * SHAPE_SPACING;
            let y = center_y - h / 2.0;
            bounds.insert(node.id.as_str(), (x, y, w, h));
            let _ = writeln!(
                xml,
                r#"      <bpmndi:BPMNShape id="BPMNShape_{}" bpmnElement="{}">"#,
                escape_xml(&node.id),
                escape_xml(&node.id)
            );
            let _ = writeln!(
                xml,
                r#"        <dc:Bounds height="{h:.1}" width="{w:.1}" x="{x:.1}" y="{y:.1}"/>"#
            );
            let _ = writeln!(xml, "      </bpmndi:BPMNShape>");
        }

        for flow in &artifacts.graph.flows {
            let (sx, sy, sw, sh) = bounds
                .get(flow.source_id.as_str())
                .copied()
                .unwrap_or((0.0, center_y, 0.0, 0.0));
            let (tx, ty, _, th) = bounds
                .get(flow.target_id.as_str())
                .copied()
                .unwrap_or((0.0, center_y, 0.0, 0.0));
            let _ = writeln!(
                xml,
                r#"      <bpmndi:BPMNEdge id="BPMNEdge_{}" bpmnElement="{}" sourceElement="BPMNShape_{}" targetElement="BPMNShape_{}">"#,
                escape_xml(&flow.id),
                escape_xml(&flow.id),
                escape_xml(&flow.source_id),
                escape_xml(&flow.target_id)
            );
            let _ = writeln!(
                xml,
                r#"        <di:waypoint x="{:.1}" xsi:type="dc:Point" y="{:.1}"/>"#,
                sx + sw,
                sy + sh / 2.0
            );
            let _ = writeln!(
                xml,
                r#"        <di:waypoint x="{:.1}" xsi:type="dc:Point" y="{:.1}"/>"#,
                tx,
                ty + th / 2.0
            );
            let _ = writeln!(xml, "      </bpmndi:BPMNEdge>");
        }
    }

    let _ = writeln!(xml, "    </bpmndi:BPMNPlane>");
    let _ = writeln!(xml, "  </bpmndi:BPMNDiagram>");
}
