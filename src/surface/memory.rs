use std::collections::BTreeMap;

use super::{Attributes, NodeId, NodeKind, VisualSurface};
use crate::design::Position;
use crate::errors::SurfaceError;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Create { id: NodeId, kind: NodeKind },
    Remove(NodeId),
    SetTag { id: NodeId, group: String, tag: String },
    ClearTag { id: NodeId, group: String },
    SetPosition { id: NodeId, at: Position },
    SetText { id: NodeId, text: String },
}

#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub attributes: Attributes,
    pub tags: BTreeMap<String, String>,
    pub position: Option<Position>,
    pub text: Option<String>,
}

/// In-memory node tree that records every call made against it.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: BTreeMap<NodeId, MemoryNode>,
    next_id: u64,
    calls: Vec<SurfaceCall>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn tag(&self, id: NodeId, group: &str) -> Option<&str> {
        self.nodes.get(&id)?.tags.get(group).map(String::as_str)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id)?.text.as_deref()
    }

    /// Live nodes of a kind, in creation order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, SurfaceError> {
        self.nodes.get_mut(&id).ok_or(SurfaceError::NodeMissing(id))
    }
}

impl VisualSurface for MemorySurface {
    fn create_node(&mut self, parent: Option<NodeId>, kind: NodeKind, attributes: Attributes) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            MemoryNode {
                kind,
                parent,
                attributes,
                tags: BTreeMap::new(),
                position: None,
                text: None,
            },
        );
        self.calls.push(SurfaceCall::Create { id, kind });
        id
    }

    fn remove_node(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        if !self.nodes.contains_key(&id) {
            return Err(SurfaceError::NodeMissing(id));
        }
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let current = doomed[i];
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|(_, n)| n.parent == Some(current))
                    .map(|(child, _)| *child),
            );
            i += 1;
        }
        for node in doomed {
            self.nodes.remove(&node);
        }
        self.calls.push(SurfaceCall::Remove(id));
        Ok(())
    }

    fn set_tag(&mut self, id: NodeId, group: &str, tag: &str) -> Result<(), SurfaceError> {
        self.node_mut(id)?
            .tags
            .insert(group.to_string(), tag.to_string());
        self.calls.push(SurfaceCall::SetTag {
            id,
            group: group.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }

    fn clear_tag(&mut self, id: NodeId, group: &str) -> Result<(), SurfaceError> {
        self.node_mut(id)?.tags.remove(group);
        self.calls.push(SurfaceCall::ClearTag {
            id,
            group: group.to_string(),
        });
        Ok(())
    }

    fn set_position(&mut self, id: NodeId, at: Position) -> Result<(), SurfaceError> {
        self.node_mut(id)?.position = Some(at);
        self.calls.push(SurfaceCall::SetPosition { id, at });
        Ok(())
    }

    fn position(&self, id: NodeId) -> Result<Position, SurfaceError> {
        let node = self.nodes.get(&id).ok_or(SurfaceError::NodeMissing(id))?;
        Ok(node.position.unwrap_or_default())
    }

    fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), SurfaceError> {
        self.node_mut(id)?.text = Some(text.to_string());
        self.calls.push(SurfaceCall::SetText {
            id,
            text: text.to_string(),
        });
        Ok(())
    }

    fn query_nodes(&self, key: &str, value: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.attributes.get(key).is_some_and(|v| v == value))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{attributes, tags};

    #[test]
    fn tags_are_exclusive_per_group() {
        let mut s = MemorySurface::new();
        let id = s.create_node(None, NodeKind::Layer, attributes([("layer", "base")]));
        s.set_tag(id, tags::MATERIAL, "grass").unwrap();
        s.set_tag(id, tags::MATERIAL, "sand").unwrap();
        s.set_tag(id, tags::EFFECT, "pulse").unwrap();
        assert_eq!(s.tag(id, tags::MATERIAL), Some("sand"));
        assert_eq!(s.node(id).unwrap().tags.len(), 2);
    }

    #[test]
    fn removing_a_node_removes_its_subtree() {
        let mut s = MemorySurface::new();
        let root = s.create_node(None, NodeKind::Mascot, Attributes::new());
        let child = s.create_node(Some(root), NodeKind::Message, Attributes::new());
        let grandchild = s.create_node(Some(child), NodeKind::Sparkle, Attributes::new());
        s.remove_node(root).unwrap();
        assert!(!s.contains(child));
        assert!(!s.contains(grandchild));
    }

    #[test]
    fn missing_nodes_are_reported() {
        let mut s = MemorySurface::new();
        let gone = NodeId(42);
        assert_eq!(s.remove_node(gone), Err(SurfaceError::NodeMissing(gone)));
        assert_eq!(s.set_tag(gone, tags::STATE, "x"), Err(SurfaceError::NodeMissing(gone)));
        assert!(s.position(gone).is_err());
    }

    #[test]
    fn query_matches_attribute_values() {
        let mut s = MemorySurface::new();
        let a = s.create_node(None, NodeKind::WallPart, attributes([("layer", "exterior-walls"), ("part", "front")]));
        let _b = s.create_node(None, NodeKind::WallPart, attributes([("layer", "interior-walls")]));
        let c = s.create_node(None, NodeKind::WallPart, attributes([("layer", "exterior-walls"), ("part", "back")]));
        assert_eq!(s.query_nodes("layer", "exterior-walls"), vec![a, c]);
        assert!(s.query_nodes("layer", "roof").is_empty());
    }
}
