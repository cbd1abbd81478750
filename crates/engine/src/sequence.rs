//! Execution-plan validation — run this before executing a workflow.
//!
//! Rules enforced:
//! 1. Node IDs must be unique within the workflow.
//! 2. Positions must be unique within the workflow (disabled nodes keep
//!    theirs, so the check covers all nodes, not just enabled ones).
//! 3. At least one node must be enabled.
//!
//! Returns the enabled nodes sorted by position ascending — the exact
//! order the runner will dispatch them in.

use std::collections::HashSet;

use crate::{EngineError, Workflow, WorkflowNode};

/// Validate the workflow and return its enabled nodes in execution order.
///
/// # Errors
/// - [`EngineError::DuplicateNodeId`] if two nodes share an ID.
/// - [`EngineError::DuplicatePosition`] if two nodes share a position.
/// - [`EngineError::NoEnabledNodes`] if nothing is left to run.
pub fn execution_plan(workflow: &Workflow) -> Result<Vec<&WorkflowNode>, EngineError> {
    let mut seen_ids: HashSet<uuid::Uuid> = HashSet::new();
    let mut seen_positions: HashSet<i32> = HashSet::new();

    for node in &workflow.nodes {
        if !seen_ids.insert(node.id) {
            return Err(EngineError::DuplicateNodeId {
                workflow_id: workflow.id,
                node_id: node.id,
            });
        }
        if !seen_positions.insert(node.position) {
            return Err(EngineError::DuplicatePosition {
                workflow_id: workflow.id,
                position: node.position,
            });
        }
    }

    let mut plan: Vec<&WorkflowNode> = workflow.nodes.iter().filter(|n| n.enabled).collect();
    plan.sort_by_key(|n| n.position);

    if plan.is_empty() {
        return Err(EngineError::NoEnabledNodes(workflow.id));
    }

    Ok(plan)
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WorkflowMode, WorkflowNode};
    use chrono::Utc;
    use nodes::NodeKind;
    use serde_json::Value;
    use uuid::Uuid;

    fn make_node(workflow_id: Uuid, kind: NodeKind, position: i32, enabled: bool) -> WorkflowNode {
        WorkflowNode {
            id: Uuid::new_v4(),
            workflow_id,
            kind,
            name: kind.to_string(),
            position,
            config: Value::Null,
            enabled,
        }
    }

    fn make_workflow(nodes: Vec<WorkflowNode>) -> Workflow {
        Workflow {
            id: nodes
                .first()
                .map(|n| n.workflow_id)
                .unwrap_or_else(Uuid::new_v4),
            mode: WorkflowMode::Fast,
            name: "test".into(),
            description: None,
            is_active: true,
            version: 1,
            nodes,
            connections: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn plan_is_sorted_by_position() {
        let wf_id = Uuid::new_v4();
        // Deliberately stored out of order.
        let workflow = make_workflow(vec![
            make_node(wf_id, NodeKind::Output, 4, true),
            make_node(wf_id, NodeKind::Input, 0, true),
            make_node(wf_id, NodeKind::Retriever, 2, true),
            make_node(wf_id, NodeKind::Router, 1, true),
            make_node(wf_id, NodeKind::Generator, 3, true),
        ]);

        let plan = execution_plan(&workflow).expect("should be valid");
        let kinds: Vec<NodeKind> = plan.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Input,
                NodeKind::Router,
                NodeKind::Retriever,
                NodeKind::Generator,
                NodeKind::Output,
            ]
        );
    }

    #[test]
    fn disabled_nodes_are_filtered_but_keep_their_position() {
        let wf_id = Uuid::new_v4();
        let workflow = make_workflow(vec![
            make_node(wf_id, NodeKind::Input, 0, true),
            make_node(wf_id, NodeKind::Router, 1, false),
            make_node(wf_id, NodeKind::Generator, 2, true),
        ]);

        let plan = execution_plan(&workflow).expect("should be valid");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].kind, NodeKind::Input);
        assert_eq!(plan[1].kind, NodeKind::Generator);
        assert_eq!(plan[1].position, 2);
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let wf_id = Uuid::new_v4();
        let mut a = make_node(wf_id, NodeKind::Input, 0, true);
        let b = make_node(wf_id, NodeKind::Router, 1, true);
        a.id = b.id; // duplicate!
        let workflow = make_workflow(vec![a, b]);

        assert!(matches!(
            execution_plan(&workflow),
            Err(EngineError::DuplicateNodeId { .. })
        ));
    }

    #[test]
    fn duplicate_position_is_rejected_even_when_one_is_disabled() {
        let wf_id = Uuid::new_v4();
        let workflow = make_workflow(vec![
            make_node(wf_id, NodeKind::Input, 0, true),
            make_node(wf_id, NodeKind::Router, 0, false), // same position
        ]);

        assert!(matches!(
            execution_plan(&workflow),
            Err(EngineError::DuplicatePosition { position: 0, .. })
        ));
    }

    #[test]
    fn all_disabled_is_rejected() {
        let wf_id = Uuid::new_v4();
        let workflow = make_workflow(vec![
            make_node(wf_id, NodeKind::Input, 0, false),
            make_node(wf_id, NodeKind::Output, 1, false),
        ]);

        assert!(matches!(
            execution_plan(&workflow),
            Err(EngineError::NoEnabledNodes(_))
        ));
    }

    #[test]
    fn single_enabled_node_is_valid() {
        let wf_id = Uuid::new_v4();
        let workflow = make_workflow(vec![make_node(wf_id, NodeKind::Generator, 0, true)]);
        let plan = execution_plan(&workflow).expect("single node should be valid");
        assert_eq!(plan.len(), 1);
    }
}
