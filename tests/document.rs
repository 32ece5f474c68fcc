//! Tests for document assembly: sections, ordering, and the synthesized
//! diagram layout.
mod common;
use common::*;
use tsunagi::prelude::*;

fn assemble(bp: Blueprint) -> OutputArtifact {
    Compiler::builder(bp)
        .build()
        .compile()
        .expect("Failed to compile")
}

#[test]
fn document_has_all_three_sections() {
    let artifact = assemble(simple_blueprint());
    assert!(artifact.xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(artifact.xml.contains("<bpmn2:collaboration"));
    assert!(artifact.xml.contains(r#"ifl:type="IntegrationProcess""#));
    assert!(artifact.xml.contains("<bpmn2:process"));
    assert!(artifact.xml.contains("<bpmndi:BPMNDiagram"));
}

#[test]
fn synthetic_events_appear_in_the_process() {
    let artifact = assemble(simple_blueprint());
    assert!(artifact.xml.contains(r#"<bpmn2:startEvent id="StartEvent_"#));
    assert!(artifact.xml.contains(r#"<bpmn2:endEvent id="EndEvent_"#));
}

#[test]
fn sequence_flows_follow_declaration_order() {
    let artifact = assemble(routed_blueprint());
    let positions: Vec<usize> = ["f1", "f2", "f3", "f4", "f5", "f6"]
        .iter()
        .map(|id| {
            artifact
                .xml
                .find(&format!(r#"<bpmn2:sequenceFlow id="{id}""#))
                .unwrap_or_else(|| panic!("missing sequence flow {id}"))
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "flows emitted out of declaration order");
}

#[test]
fn sequence_flows_reference_resolved_node_ids() {
    let artifact = assemble(simple_blueprint());
    assert!(artifact
        .xml
        .contains(r#"<bpmn2:sequenceFlow id="f1" sourceRef="StartEvent_1" targetRef="c1"/>"#));
    assert!(artifact
        .xml
        .contains(r#"<bpmn2:sequenceFlow id="f2" sourceRef="c1" targetRef="EndEvent_2"/>"#));
}

#[test]
fn diagram_positions_grow_left_to_right() {
    let artifact = assemble(routed_blueprint());
    let mut xs = Vec::new();
    for line in artifact.xml.lines() {
        if let Some(rest) = line.trim().strip_prefix("<dc:Bounds ") {
            let x = rest
                .split("x=\"")
                .nth(1)
                .and_then(|s| s.split('"').next())
                .and_then(|s| s.parse::<f64>().ok())
                .expect("unparsable bounds");
            xs.push(x);
        }
    }
    assert_eq!(xs.len(), 6);
    for pair in xs.windows(2) {
        assert!(pair[0] < pair[1], "layout not monotonic: {xs:?}");
    }
}

#[test]
fn every_flow_gets_a_two_waypoint_edge() {
    let artifact = assemble(routed_blueprint());
    assert_eq!(artifact.xml.matches("<bpmndi:BPMNEdge").count(), 6);
    assert_eq!(artifact.xml.matches("<di:waypoint").count(), 12);
}

#[test]
fn one_process_per_endpoint() {
    let bp = blueprint(vec![
        endpoint(
            "first",
            vec![component("a", "groovyScript", serde_json::json!({}))],
            vec![flow("f1", "START", "a"), flow("f2", "a", "END")],
        ),
        endpoint(
            "second",
            vec![component("b", "contentModifier", serde_json::json!({}))],
            vec![flow("g1", "START", "b"), flow("g2", "b", "END")],
        ),
    ]);
    let artifact = assemble(bp);
    assert_eq!(artifact.xml.matches("<bpmn2:process").count(), 2);
    assert_eq!(artifact.xml.matches("<bpmn2:participant").count(), 2);
}

#[test]
fn compiling_twice_yields_identical_bytes() {
    let first = assemble(routed_blueprint());
    let second = assemble(routed_blueprint());
    assert_eq!(first.xml, second.xml);
}

#[test]
fn inline_resources_surface_on_the_artifact() {
    let bp = parse_blueprint(SIMPLE_BLUEPRINT_JSON).unwrap();
    let artifact = assemble(bp);
    assert_eq!(artifact.resources.len(), 1);
    let resource = artifact.resources.get("transform.groovy").unwrap();
    assert_eq!(resource.content, "msg.setBody('ok')");
}
