//! # Synchronizer
//!
//! Mirrors design state onto the [`VisualSurface`] and reads furnishing
//! positions back for saving.
//!
//! - [`Synchronizer::apply_layer`] retags every node of a layer (wall layers
//!   fan out to their four sides); applying the same material twice is idempotent
//! - [`Synchronizer::place_furnishing`] creates one node per furnishing type at a
//!   random spot inside the house margin
//! - [`Synchronizer::remove_furnishing_visual`] detaches the node immediately and
//!   leaves the actual removal to a deferred [`Task::RemoveNode`]
//! - the drag gesture lives in [`drag`]; transient effects in [`effects`]
//!
//! Surface errors are absorbed here: a vanished node is logged and ignored.
//!
//! [`Task::RemoveNode`]: crate::host::Task::RemoveNode

pub mod drag;
pub mod effects;

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::catalog;
use crate::config::HouseConfig;
use crate::design::{Category, Layer, Position, WALL_PARTS};
use crate::errors::SurfaceError;
use crate::host::RandomSource;
use crate::surface::{attr, attributes, tags, NodeId, NodeKind, VisualSurface};

pub use drag::{clamp_and_snap, DragRelease, DragState, Grab};

/// Fixed nodes created once per session.
#[derive(Debug, Clone)]
pub struct Scaffold {
    pub house: NodeId,
    pub layers: BTreeMap<Layer, NodeId>,
    pub furnishings: NodeId,
    pub placement_grid: NodeId,
    pub mascot: NodeId,
    pub save_button: NodeId,
    pub share_button: NodeId,
}

pub struct Synchronizer<S: VisualSurface> {
    surface: S,
    house: HouseConfig,
    scaffold: Scaffold,
    /// Live (not exiting) furnishing nodes by type.
    placed: BTreeMap<String, NodeId>,
    drag: DragState,
    message: Option<NodeId>,
}

impl<S: VisualSurface> Synchronizer<S> {
    /// Build the house scaffold on `surface`.
    pub fn new(mut surface: S, house: HouseConfig) -> Self {
        let scaffold = build_scaffold(&mut surface, &house);
        Self {
            surface,
            house,
            scaffold,
            placed: BTreeMap::new(),
            drag: DragState::Idle,
            message: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scaffold(&self) -> &Scaffold {
        &self.scaffold
    }

    pub fn house(&self) -> &HouseConfig {
        &self.house
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Node currently showing `furnishing`, if placed.
    pub fn furnishing_node(&self, furnishing: &str) -> Option<NodeId> {
        self.placed.get(furnishing).copied()
    }

    /// Replace the material tag on every node of `layer`. Returns how many
    /// nodes were tagged.
    pub fn apply_layer(&mut self, layer: Layer, material: &str) -> usize {
        let nodes = self.surface.query_nodes(attr::LAYER, layer.as_str());
        let mut tagged = 0;
        for node in nodes {
            let result = self
                .surface
                .clear_tag(node, tags::MATERIAL)
                .and_then(|_| self.surface.set_tag(node, tags::MATERIAL, material));
            match result {
                Ok(()) => tagged += 1,
                Err(e) => debug!("apply_layer {}: {}", layer, e),
            }
        }
        if tagged == 0 {
            warn!("No visual nodes found for layer {}", layer);
        }
        debug!("Applied {}={} to {} node(s)", layer, material, tagged);
        tagged
    }

    /// Create the node for a newly added furnishing and start its entrance
    /// transition. Returns `None` when the type already has a node.
    pub fn place_furnishing(
        &mut self,
        category: Category,
        furnishing: &str,
        random: &mut dyn RandomSource,
    ) -> Option<NodeId> {
        if self.placed.contains_key(furnishing) {
            warn!("Furnishing {} already placed; not creating a second node", furnishing);
            return None;
        }
        let node = self.surface.create_node(
            Some(self.scaffold.furnishings),
            NodeKind::Furnishing,
            attributes([
                (attr::FURNISHING, furnishing),
                (attr::CATEGORY, category.as_str()),
            ]),
        );
        let at = self.spawn_point(random);
        absorb(self.surface.set_tag(node, tags::FURNISHING, furnishing));
        absorb(self.surface.set_position(node, at));
        absorb(self.surface.set_tag(node, tags::TRANSITION, "entering"));
        self.placed.insert(furnishing.to_string(), node);
        debug!("Placed {}/{} as {} at ({:.0}, {:.0})", category, furnishing, node, at.x, at.y);
        Some(node)
    }

    /// End a furnishing's entrance transition.
    pub fn reveal(&mut self, node: NodeId) {
        let result = self.surface.set_tag(node, tags::TRANSITION, "visible");
        absorb(result);
    }

    /// Start the exit transition for `furnishing` and detach it from the live
    /// set. The caller schedules the returned node's removal. No-op when the
    /// type has no node.
    pub fn remove_furnishing_visual(&mut self, furnishing: &str) -> Option<NodeId> {
        let node = self.placed.remove(furnishing)?;
        if self.drag.grab().is_some_and(|g| g.node == node) {
            self.end_drag_visuals(node);
            self.drag = DragState::Idle;
        }
        let result = self.surface.set_tag(node, tags::TRANSITION, "exiting");
        absorb(result);
        Some(node)
    }

    /// Remove a node for good. A node that is already gone is a no-op.
    pub fn remove_node(&mut self, node: NodeId) {
        if let Err(e) = self.surface.remove_node(node) {
            debug!("Deferred removal skipped: {}", e);
        }
        if self.message == Some(node) {
            self.message = None;
        }
    }

    /// Current positions of every placed furnishing.
    pub fn read_positions(&self) -> BTreeMap<String, Position> {
        self.placed
            .iter()
            .filter_map(|(furnishing, node)| match self.surface.position(*node) {
                Ok(at) => Some((furnishing.clone(), at)),
                Err(e) => {
                    debug!("read_positions: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Press-start. Enters `Dragging` when `node` is a placed furnishing and
    /// no drag is in progress.
    pub fn pointer_down(&mut self, node: NodeId, pointer: Position) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(furnishing) = self
            .placed
            .iter()
            .find(|(_, n)| **n == node)
            .map(|(f, _)| f.clone())
        else {
            return false;
        };
        let origin = match self.surface.position(node) {
            Ok(at) => at,
            Err(e) => {
                debug!("pointer_down: {}", e);
                return false;
            }
        };
        absorb(self.surface.set_tag(node, tags::STATE, "dragging"));
        absorb(
            self.surface
                .set_tag(self.scaffold.placement_grid, tags::STATE, "active"),
        );
        self.drag = DragState::Dragging(Grab {
            node,
            furnishing,
            offset: Position::new(pointer.x - origin.x, pointer.y - origin.y),
        });
        true
    }

    /// Pointer movement while dragging: moves the node, clamped and snapped.
    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        let grab = self.drag.grab()?;
        let node = grab.node;
        let raw = Position::new(pointer.x - grab.offset.x, pointer.y - grab.offset.y);
        let at = clamp_and_snap(raw, &self.house);
        match self.surface.set_position(node, at) {
            Ok(()) => Some(at),
            Err(e) => {
                debug!("pointer_move: {}", e);
                self.drag = DragState::Idle;
                None
            }
        }
    }

    /// Release. The settled position becomes the node's resting position.
    /// `None` when no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<DragRelease> {
        let grab = self.drag.release()?;
        self.end_drag_visuals(grab.node);
        let current = self.surface.position(grab.node).ok()?;
        let position = clamp_and_snap(current, &self.house);
        absorb(self.surface.set_position(grab.node, position));
        Some(DragRelease {
            node: grab.node,
            furnishing: grab.furnishing,
            position,
        })
    }

    fn end_drag_visuals(&mut self, node: NodeId) {
        absorb(self.surface.clear_tag(node, tags::STATE));
        let grid = self.scaffold.placement_grid;
        absorb(self.surface.clear_tag(grid, tags::STATE));
    }

    fn spawn_point(&self, random: &mut dyn RandomSource) -> Position {
        let h = &self.house;
        let margin = h.spawn_margin;
        Position::new(
            random.within(margin, h.width - 2.0 * margin - h.item_size),
            random.within(margin, h.height - 2.0 * margin - h.item_size),
        )
    }
}

/// Log and drop a surface error; a vanished node is never fatal.
pub(crate) fn absorb(result: Result<(), SurfaceError>) {
    if let Err(e) = result {
        debug!("surface: {}", e);
    }
}

fn build_scaffold<S: VisualSurface>(surface: &mut S, house: &HouseConfig) -> Scaffold {
    let root = surface.create_node(None, NodeKind::House, attributes([(attr::ROLE, "house")]));
    let mut layers = BTreeMap::new();
    for layer in Layer::ALL {
        let node = surface.create_node(
            Some(root),
            NodeKind::Layer,
            attributes([(attr::LAYER, layer.as_str()), (attr::PART, "body")]),
        );
        if layer.is_wall() {
            for part in WALL_PARTS {
                surface.create_node(
                    Some(node),
                    NodeKind::WallPart,
                    attributes([(attr::LAYER, layer.as_str()), (attr::PART, part)]),
                );
            }
        }
        layers.insert(layer, node);
    }
    let furnishings = surface.create_node(
        Some(root),
        NodeKind::FurnishingsLayer,
        attributes([(attr::ROLE, "furnishings")]),
    );
    let placement_grid = surface.create_node(
        Some(root),
        NodeKind::PlacementGrid,
        attributes([(attr::ROLE, "placement-grid")]),
    );
    let mascot = surface.create_node(Some(root), NodeKind::Mascot, attributes([(attr::ROLE, "mascot")]));
    absorb(surface.set_position(
        mascot,
        Position::new((house.width - house.mascot_width) / 2.0, house.mascot_top),
    ));
    let save_button = surface.create_node(None, NodeKind::Button, attributes([(attr::ROLE, "save-design")]));
    absorb(surface.set_text(save_button, catalog::SAVE_LABEL));
    let share_button = surface.create_node(None, NodeKind::Button, attributes([(attr::ROLE, "share-design")]));
    absorb(surface.set_text(share_button, catalog::SHARE_LABEL));

    Scaffold {
        house: root,
        layers,
        furnishings,
        placement_grid,
        mascot,
        save_button,
        share_button,
    }
}
