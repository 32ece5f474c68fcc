//! Flow graph resolution.
//!
//! Turns an endpoint's declared sequence flows into per-node wiring: every
//! node ends up with an ordered list of incoming and outgoing flow ids, and
//! the reserved `START`/`END` references are bound to either a component that
//! claims the corresponding event role or a synthesized sentinel node.
//!
//! The resolved graph is immutable and is the only source of wiring
//! information for fragment generation.

use crate::blueprint::EndpointDefinition;
use crate::error::ReferenceError;
use crate::template::catalog::{ComponentKind, Role};
use ahash::AHashMap;

/// Reserved sequence-flow reference for the flow entry point.
pub const START_REF: &str = "START";
/// Reserved sequence-flow reference for the flow exit point.
pub const END_REF: &str = "END";

/// Monotonic identifier source for synthesized elements.
///
/// Threaded explicitly through resolution and assembly so that synthesized
/// ids stay deterministic and no global counter state exists.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `{prefix}_{n}` with a strictly increasing `n`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}_{}", prefix, self.next)
    }
}

/// What a resolved node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrigin {
    /// Index into the endpoint's component list.
    Component(usize),
    SyntheticStart,
    SyntheticEnd,
}

/// A component (or synthetic sentinel) annotated with its resolved wiring.
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    pub id: String,
    pub name: String,
    pub origin: NodeOrigin,
    /// Flow ids entering this node, in declaration order.
    pub incoming: Vec<String>,
    /// Flow ids leaving this node, in declaration order.
    pub outgoing: Vec<String>,
}

impl ResolvedNode {
    pub fn is_synthetic(&self) -> bool {
        !matches!(self.origin, NodeOrigin::Component(_))
    }
}

/// A sequence flow with both endpoints bound to resolved node ids
/// (sentinel references replaced by the synthesized node's id).
#[derive(Debug, Clone)]
pub struct ResolvedFlow {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
}

/// The fully resolved wiring of one endpoint.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    /// Nodes in first-appearance order: entry node first, exit node last.
    pub nodes: Vec<ResolvedNode>,
    /// Flows in declaration order.
    pub flows: Vec<ResolvedFlow>,
}

impl ResolvedGraph {
    pub fn node(&self, id: &str) -> Option<&ResolvedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Resolution switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Accept nodes without the required incoming/outgoing wiring.
    /// Default is to reject them as orphans.
    pub allow_disconnected: bool,
}

/// Resolve an endpoint's declared flows into a [`ResolvedGraph`].
///
/// Fails fast: the first dangling reference or orphaned node aborts
/// resolution, and no flow is ever retained with an unresolved endpoint.
pub fn resolve(
    endpoint: &EndpointDefinition,
    ids: &mut IdAllocator,
    options: ResolveOptions,
) -> Result<ResolvedGraph, ReferenceError> {
    let roles: Vec<Option<Role>> = endpoint
        .components
        .iter()
        .map(|c| ComponentKind::from_discriminator(&c.type_name).map(|k| k.role()))
        .collect();

    // A component with a start/end event role claims the sentinel reference;
    // otherwise a referenced sentinel is synthesized.
    let start_claim = roles
        .iter()
        .position(|r| matches!(r, Some(Role::StartEvent)));
    let end_claim = roles.iter().position(|r| matches!(r, Some(Role::EndEvent)));

    let references_start = endpoint
        .sequence_flows
        .iter()
        .any(|f| f.source == START_REF || f.target == START_REF);
    let references_end = endpoint
        .sequence_flows
        .iter()
        .any(|f| f.source == END_REF || f.target == END_REF);

    let mut nodes: Vec<ResolvedNode> = Vec::with_capacity(endpoint.components.len() + 2);
    let mut index: AHashMap<String, usize> = AHashMap::new();

    if start_claim.is_none() && references_start {
        let id = ids.next_id("StartEvent");
        index.insert(START_REF.to_string(), nodes.len());
        nodes.push(ResolvedNode {
            id,
            name: "Start".to_string(),
            origin: NodeOrigin::SyntheticStart,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
    }

    for (ci, component) in endpoint.components.iter().enumerate() {
        index.insert(component.id.clone(), nodes.len());
        if start_claim == Some(ci) {
            index.insert(START_REF.to_string(), nodes.len());
        }
        if end_claim == Some(ci) {
            index.insert(END_REF.to_string(), nodes.len());
        }
        nodes.push(ResolvedNode {
            id: component.id.clone(),
            name: component.name.clone(),
            origin: NodeOrigin::Component(ci),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
    }

    if end_claim.is_none() && references_end {
        let id = ids.next_id("EndEvent");
        index.insert(END_REF.to_string(), nodes.len());
        nodes.push(ResolvedNode {
            id,
            name: "End".to_string(),
            origin: NodeOrigin::SyntheticEnd,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
    }

    let mut flows = Vec::with_capacity(endpoint.sequence_flows.len());
    for flow in &endpoint.sequence_flows {
        let source_idx =
            *index
                .get(flow.source.as_str())
                .ok_or_else(|| ReferenceError::UnknownNode {
                    flow_id: flow.id.clone(),
                    reference: flow.source.clone(),
                    role: "source",
                })?;
        let target_idx =
            *index
                .get(flow.target.as_str())
                .ok_or_else(|| ReferenceError::UnknownNode {
                    flow_id: flow.id.clone(),
                    reference: flow.target.clone(),
                    role: "target",
                })?;
        nodes[source_idx].outgoing.push(flow.id.clone());
        nodes[target_idx].incoming.push(flow.id.clone());
        flows.push(ResolvedFlow {
            id: flow.id.clone(),
            source_id: nodes[source_idx].id.clone(),
            target_id: nodes[target_idx].id.clone(),
        });
    }

    if !options.allow_disconnected {
        for node in &nodes {
            let NodeOrigin::Component(ci) = node.origin else {
                continue;
            };
            let exempt_incoming = matches!(roles[ci], Some(Role::StartEvent));
            let exempt_outgoing = matches!(roles[ci], Some(Role::EndEvent));
            if node.incoming.is_empty() && !exempt_incoming {
                return Err(ReferenceError::OrphanNode {
                    node_id: node.id.clone(),
                    missing: "incoming",
                });
            }
            if node.outgoing.is_empty() && !exempt_outgoing {
                return Err(ReferenceError::OrphanNode {
                    node_id: node.id.clone(),
                    missing: "outgoing",
                });
            }
        }
    }

    Ok(ResolvedGraph { nodes, flows })
}
