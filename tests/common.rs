//! Common test utilities for building blueprint definitions.
use serde_json::Value;
use tsunagi::prelude::*;

/// Creates a component with the given configuration bag.
#[allow(dead_code)]
pub fn component(id: &str, type_name: &str, config: Value) -> ComponentDefinition {
    let Value::Object(config) = config else {
        panic!("component config must be a JSON object");
    };
    ComponentDefinition {
        type_name: type_name.to_string(),
        id: id.to_string(),
        name: format!("{id} step"),
        config,
    }
}

#[allow(dead_code)]
pub fn flow(id: &str, source: &str, target: &str) -> FlowEdgeDefinition {
    FlowEdgeDefinition {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
    }
}

#[allow(dead_code)]
pub fn endpoint(
    id: &str,
    components: Vec<ComponentDefinition>,
    sequence_flows: Vec<FlowEdgeDefinition>,
) -> EndpointDefinition {
    EndpointDefinition {
        id: id.to_string(),
        name: format!("{id} flow"),
        components,
        sequence_flows,
    }
}

#[allow(dead_code)]
pub fn blueprint(endpoints: Vec<EndpointDefinition>) -> Blueprint {
    Blueprint {
        id: "bp-test".to_string(),
        name: "Test Blueprint".to_string(),
        version: "1.0.0".to_string(),
        endpoints,
    }
}

/// A minimal valid blueprint: `START -> script -> END`.
#[allow(dead_code)]
pub fn simple_blueprint() -> Blueprint {
    blueprint(vec![endpoint(
        "main",
        vec![component("c1", "groovyScript", serde_json::json!({}))],
        vec![flow("f1", "START", "c1"), flow("f2", "c1", "END")],
    )])
}

/// A routed blueprint with explicit events:
/// `start -> router -> (upper | lower) -> join -> end`.
#[allow(dead_code)]
pub fn routed_blueprint() -> Blueprint {
    blueprint(vec![endpoint(
        "routed",
        vec![
            component("start", "messageStartEvent", serde_json::json!({})),
            component("route", "router", serde_json::json!({})),
            component("upper", "contentModifier", serde_json::json!({})),
            component("lower", "groovyScript", serde_json::json!({})),
            component("merge", "join", serde_json::json!({})),
            component("end", "messageEndEvent", serde_json::json!({})),
        ],
        vec![
            flow("f1", "start", "route"),
            flow("f2", "route", "upper"),
            flow("f3", "route", "lower"),
            flow("f4", "upper", "merge"),
            flow("f5", "lower", "merge"),
            flow("f6", "merge", "end"),
        ],
    )])
}

/// The same minimal blueprint as a raw JSON document, for parser-level and
/// end-to-end tests.
#[allow(dead_code)]
pub const SIMPLE_BLUEPRINT_JSON: &str = r#"{
    "id": "order-sync",
    "name": "Order Sync",
    "version": "1.2.0",
    "endpoints": [{
        "id": "main",
        "name": "Main Flow",
        "components": [{
            "type": "groovyScript",
            "id": "transform",
            "name": "Transform Payload",
            "config": {
                "scriptContent": "msg.setBody('ok')"
            }
        }],
        "sequence_flows": [
            {"id": "f1", "source": "START", "target": "transform"},
            {"id": "f2", "source": "transform", "target": "END"}
        ]
    }]
}"#;
