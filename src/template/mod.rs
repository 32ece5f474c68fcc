//! Component fragment generation.
//!
//! Maps each resolved component node to one XML element of the target
//! dialect. The element family follows the component's role (event, gateway,
//! activity); the configuration bag is serialized into the extension property
//! block; and the node's resolved wiring is attached as incoming/outgoing
//! references.

pub mod catalog;

pub use catalog::{ComponentKind, GatewayKind, Role};

use crate::blueprint::ComponentDefinition;
use crate::error::TemplateError;
use crate::graph::ResolvedNode;
use crate::properties::{
    escape_xml, serialize_config, FlattenRules, SerializedConfig, TableFragment,
};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Where an ancillary resource lives inside the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Script,
    Mapping,
    Schema,
}

impl ResourceKind {
    /// Resource subdirectory under the package resource tree.
    pub fn directory(self) -> &'static str {
        match self {
            ResourceKind::Script => "script",
            ResourceKind::Mapping => "mapping",
            ResourceKind::Schema => "xsd",
        }
    }

    /// Configuration key carrying inline resource content.
    pub fn content_key(self) -> &'static str {
        match self {
            ResourceKind::Script => "scriptContent",
            ResourceKind::Mapping => "mappingContent",
            ResourceKind::Schema => "schemaContent",
        }
    }
}

/// An ancillary file contributed by a component's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub filename: String,
    pub content: String,
}

/// One generated element plus the resources its configuration contributed.
#[derive(Debug, Clone)]
pub struct XmlFragment {
    pub node_id: String,
    pub xml: String,
    pub resources: Vec<Resource>,
    /// Diagram shape size (width, height) for this element's role.
    pub shape: (f64, f64),
}

/// Diagram shape size per role.
pub fn shape_size(role: Role) -> (f64, f64) {
    match role {
        Role::StartEvent | Role::EndEvent | Role::IntermediateEvent => (32.0, 32.0),
        Role::Gateway(_) => (40.0, 40.0),
        Role::Activity => (100.0, 60.0),
    }
}

const NO_RULES: FlattenRules = &[];
const SCRIPT_RULES: FlattenRules = &[(
    "resource",
    &[("name", "script"), ("function", "scriptFunction")],
)];
const TIMER_RULES: FlattenRules = &[(
    "schedule",
    &[
        ("cron", "scheduleExpression"),
        ("timezone", "timeZone"),
        ("recurring", "isRecurring"),
    ],
)];
const CALL_RULES: FlattenRules = &[(
    "target",
    &[
        ("address", "address"),
        ("system", "receiverSystem"),
        ("timeout", "requestTimeout"),
    ],
)];
const MAPPING_RULES: FlattenRules = &[(
    "resource",
    &[("name", "mappingName"), ("path", "mappingPath")],
)];
const SCHEMA_RULES: FlattenRules = &[(
    "schema",
    &[("name", "xsdFile"), ("source", "schemaSource")],
)];
const DATA_STORE_RULES: FlattenRules = &[(
    "store",
    &[
        ("name", "dataStoreName"),
        ("visibility", "visibility"),
        ("retention", "retentionPeriod"),
    ],
)];
const AGGREGATE_RULES: FlattenRules = &[(
    "correlation",
    &[
        ("xpath", "correlationExpression"),
        ("completion", "completionCondition"),
        ("timeout", "completionTimeout"),
    ],
)];
const ENRICH_RULES: FlattenRules = &[(
    "lookup",
    &[("address", "lookupAddress"), ("path", "lookupPath")],
)];
const SPLITTER_RULES: FlattenRules = &[(
    "split",
    &[
        ("xpath", "splitExpression"),
        ("grouping", "grouping"),
        ("streaming", "streaming"),
    ],
)];

/// Declarative flatten mapping consulted by the generic serializer; kinds
/// without nested configuration shapes get the empty table, which makes any
/// nested object in their bag an unsupported-input error.
pub fn flatten_rules(kind: ComponentKind) -> FlattenRules {
    use ComponentKind::*;
    match kind {
        GroovyScript | JavascriptScript => SCRIPT_RULES,
        TimerStartEvent | IntermediateTimerEvent => TIMER_RULES,
        RequestReply | Send | PollEnrich => CALL_RULES,
        MessageMapping | XsltMapping | OperationMapping => MAPPING_RULES,
        XmlValidator | EdiValidator => SCHEMA_RULES,
        DataStoreWrite | DataStoreGet | DataStoreSelect | DataStoreDelete => DATA_STORE_RULES,
        Aggregator | Gather => AGGREGATE_RULES,
        ContentEnricher => ENRICH_RULES,
        GeneralSplitter | IteratingSplitter | EdiSplitter | IdocSplitter | Pkcs7Splitter => {
            SPLITTER_RULES
        }
        _ => NO_RULES,
    }
}

/// Inline-resource support: which kinds may carry resource content, the key
/// naming the file, and the fallback extension when no name is given.
fn resource_spec(kind: ComponentKind) -> Option<(ResourceKind, &'static str, &'static str)> {
    use ComponentKind::*;
    match kind {
        GroovyScript => Some((ResourceKind::Script, "script", "groovy")),
        JavascriptScript => Some((ResourceKind::Script, "script", "js")),
        MessageMapping => Some((ResourceKind::Mapping, "mappingPath", "mmap")),
        XsltMapping => Some((ResourceKind::Mapping, "mappingPath", "xsl")),
        XmlValidator | EdiValidator => Some((ResourceKind::Schema, "xsdFile", "xsd")),
        _ => None,
    }
}

/// Event-definition child element per event kind.
fn event_definition(kind: ComponentKind) -> Option<&'static str> {
    use ComponentKind::*;
    match kind {
        MessageStartEvent | MessageEndEvent => Some("bpmn2:messageEventDefinition"),
        TimerStartEvent | IntermediateTimerEvent => Some("bpmn2:timerEventDefinition"),
        ErrorStartEvent | ErrorEndEvent => Some("bpmn2:errorEventDefinition"),
        EscalationEndEvent => Some("bpmn2:escalationEventDefinition"),
        TerminateEndEvent => Some("bpmn2:terminateEventDefinition"),
        _ => None,
    }
}

/// Generate the XML fragment for one resolved component node.
pub fn generate(
    node: &ResolvedNode,
    component: &ComponentDefinition,
) -> Result<XmlFragment, TemplateError> {
    let kind = ComponentKind::from_discriminator(&component.type_name).ok_or_else(|| {
        TemplateError::UnknownComponentType {
            component_id: component.id.clone(),
            type_name: component.type_name.clone(),
        }
    })?;

    let mut config = component.config.clone();
    let resources = extract_resources(kind, component, &mut config);
    let merged = apply_defaults(kind, config);
    let serialized = serialize_config(&component.id, &merged, flatten_rules(kind))?;

    let mut xml = String::new();
    let element = element_name(kind.role());
    let _ = writeln!(
        xml,
        r#"    <{} id="{}" name="{}">"#,
        element,
        escape_xml(&component.id),
        escape_xml(&component.name)
    );
    write_extension_block(&mut xml, "      ", &serialized);
    for flow_id in &node.incoming {
        let _ = writeln!(xml, "      <bpmn2:incoming>{}</bpmn2:incoming>", escape_xml(flow_id));
    }
    for flow_id in &node.outgoing {
        let _ = writeln!(xml, "      <bpmn2:outgoing>{}</bpmn2:outgoing>", escape_xml(flow_id));
    }
    if let Some(definition) = event_definition(kind) {
        let _ = writeln!(xml, "      <{definition}/>");
    }
    let _ = writeln!(xml, "    </{element}>");

    Ok(XmlFragment {
        node_id: node.id.clone(),
        xml,
        resources,
        shape: shape_size(kind.role()),
    })
}

fn element_name(role: Role) -> &'static str {
    match role {
        Role::StartEvent => "bpmn2:startEvent",
        Role::EndEvent => "bpmn2:endEvent",
        Role::IntermediateEvent => "bpmn2:intermediateCatchEvent",
        Role::Gateway(GatewayKind::Exclusive) => "bpmn2:exclusiveGateway",
        Role::Gateway(_) => "bpmn2:parallelGateway",
        Role::Activity => "bpmn2:callActivity",
    }
}

/// Pull inline resource content out of the bag and register the referencing
/// filename property so the generated element points at the packaged file.
fn extract_resources(
    kind: ComponentKind,
    component: &ComponentDefinition,
    config: &mut Map<String, Value>,
) -> Vec<Resource> {
    let Some((resource_kind, filename_key, extension)) = resource_spec(kind) else {
        return Vec::new();
    };
    let Some(Value::String(content)) = config.remove(resource_kind.content_key()) else {
        return Vec::new();
    };
    let filename = match config.get(filename_key) {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => {
            let fallback = format!("{}.{}", component.id, extension);
            config.insert(filename_key.to_string(), Value::String(fallback.clone()));
            fallback
        }
    };
    vec![Resource {
        kind: resource_kind,
        filename,
        content,
    }]
}

/// Required-property defaults: the activity-type tag, the component version,
/// and the variant-URI derived from the two. Explicit configuration values
/// always win over derived ones; the three keys lead the property list so
/// platform-required properties stay in a fixed position.
fn apply_defaults(kind: ComponentKind, mut config: Map<String, Value>) -> Map<String, Value> {
    let activity_type = match config.remove("activityType") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => kind.activity_type().to_string(),
    };
    let version = match config.remove("componentVersion") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => kind.default_version().to_string(),
    };
    let variant_uri = match config.remove("cmdVariantUri") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => format!(
            "ctype::FlowstepVariant/cname::{}/version::{}",
            kind.variant_name(),
            version
        ),
    };

    let mut merged = Map::new();
    merged.insert("activityType".to_string(), Value::String(activity_type));
    merged.insert("componentVersion".to_string(), Value::String(version));
    merged.insert("cmdVariantUri".to_string(), Value::String(variant_uri));
    merged.append(&mut config);
    merged
}

/// Write an `extensionElements` block: flat properties first, then table
/// fragments, each table serialized as an embedded escaped row list.
pub(crate) fn write_extension_block(xml: &mut String, indent: &str, serialized: &SerializedConfig) {
    let _ = writeln!(xml, "{indent}<bpmn2:extensionElements>");
    for property in &serialized.flat {
        write_property(xml, indent, &property.key, &property.value);
    }
    for table in &serialized.tables {
        write_property(xml, indent, &table.key, &render_table(table));
    }
    let _ = writeln!(xml, "{indent}</bpmn2:extensionElements>");
}

pub(crate) fn write_property(xml: &mut String, indent: &str, key: &str, value: &str) {
    let _ = writeln!(xml, "{indent}  <ifl:property>");
    let _ = writeln!(xml, "{indent}    <key>{}</key>", escape_xml(key));
    let _ = writeln!(xml, "{indent}    <value>{}</value>", escape_xml(value));
    let _ = writeln!(xml, "{indent}  </ifl:property>");
}

/// Serialize a table to its embedded row XML. The result is stored as a
/// property value, so it gets escaped a second time on emission.
fn render_table(table: &TableFragment) -> String {
    let mut out = String::new();
    for row in &table.rows {
        out.push_str("<row>");
        for (cell_key, cell_value) in &row.cells {
            let _ = write!(
                out,
                "<cell id='{}'>{}</cell>",
                escape_xml(cell_key),
                escape_xml(cell_value)
            );
        }
        out.push_str("</row>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeOrigin;
    use serde_json::json;

    fn node_with_wiring(id: &str) -> ResolvedNode {
        ResolvedNode {
            id: id.to_string(),
            name: id.to_string(),
            origin: NodeOrigin::Component(0),
            incoming: vec!["f1".to_string()],
            outgoing: vec!["f2".to_string()],
        }
    }

    fn component(id: &str, type_name: &str, config: serde_json::Value) -> ComponentDefinition {
        let serde_json::Value::Object(config) = config else {
            panic!("expected object")
        };
        ComponentDefinition {
            type_name: type_name.to_string(),
            id: id.to_string(),
            name: format!("{id} step"),
            config,
        }
    }

    #[test]
    fn activity_carries_wiring_and_defaults() {
        let fragment = generate(
            &node_with_wiring("c1"),
            &component("c1", "groovyScript", json!({})),
        )
        .unwrap();
        assert!(fragment.xml.contains(r#"<bpmn2:callActivity id="c1""#));
        assert!(fragment.xml.contains("<bpmn2:incoming>f1</bpmn2:incoming>"));
        assert!(fragment.xml.contains("<bpmn2:outgoing>f2</bpmn2:outgoing>"));
        assert!(fragment.xml.contains("<key>activityType</key>"));
        assert!(fragment.xml.contains("<value>Script</value>"));
        assert!(fragment.xml.contains(
            "<value>ctype::FlowstepVariant/cname::GroovyScript/version::1.1</value>"
        ));
    }

    #[test]
    fn explicit_variant_uri_wins() {
        let fragment = generate(
            &node_with_wiring("c1"),
            &component("c1", "groovyScript", json!({"cmdVariantUri": "custom::uri"})),
        )
        .unwrap();
        assert!(fragment.xml.contains("<value>custom::uri</value>"));
        assert!(!fragment.xml.contains("cname::GroovyScript"));
    }

    #[test]
    fn unknown_type_is_fatal() {
        let result = generate(
            &node_with_wiring("c9"),
            &component("c9", "teleporter", json!({})),
        );
        match result {
            Err(TemplateError::UnknownComponentType {
                component_id,
                type_name,
            }) => {
                assert_eq!(component_id, "c9");
                assert_eq!(type_name, "teleporter");
            }
            other => panic!("Expected UnknownComponentType, got {other:?}"),
        }
    }

    #[test]
    fn router_emits_gateway_with_branch_references() {
        let node = ResolvedNode {
            id: "r1".to_string(),
            name: "route".to_string(),
            origin: NodeOrigin::Component(0),
            incoming: vec!["f1".to_string()],
            outgoing: vec!["f2".to_string(), "f3".to_string()],
        };
        let fragment = generate(&node, &component("r1", "router", json!({}))).unwrap();
        assert!(fragment.xml.contains("<bpmn2:exclusiveGateway"));
        assert!(fragment.xml.contains("<bpmn2:outgoing>f2</bpmn2:outgoing>"));
        assert!(fragment.xml.contains("<bpmn2:outgoing>f3</bpmn2:outgoing>"));
    }

    #[test]
    fn start_event_emits_event_definition() {
        let fragment = generate(
            &node_with_wiring("s1"),
            &component("s1", "messageStartEvent", json!({})),
        )
        .unwrap();
        assert!(fragment.xml.contains("<bpmn2:startEvent"));
        assert!(fragment.xml.contains("<bpmn2:messageEventDefinition/>"));
    }

    #[test]
    fn header_table_has_one_row_per_entry() {
        let fragment = generate(
            &node_with_wiring("c1"),
            &component(
                "c1",
                "contentModifier",
                json!({"headers": [{"name": "A"}, {"name": "B"}]}),
            ),
        )
        .unwrap();
        assert!(fragment.xml.contains("<key>headerTable</key>"));
        assert_eq!(fragment.xml.matches("&lt;row&gt;").count(), 2);
    }

    #[test]
    fn inline_script_becomes_a_resource() {
        let fragment = generate(
            &node_with_wiring("c1"),
            &component(
                "c1",
                "groovyScript",
                json!({"scriptContent": "msg.setBody('ok')"}),
            ),
        )
        .unwrap();
        assert_eq!(fragment.resources.len(), 1);
        let resource = &fragment.resources[0];
        assert_eq!(resource.kind, ResourceKind::Script);
        assert_eq!(resource.filename, "c1.groovy");
        assert!(fragment.xml.contains("<key>script</key>"));
        assert!(fragment.xml.contains("<value>c1.groovy</value>"));
        assert!(!fragment.xml.contains("scriptContent"));
    }
}
