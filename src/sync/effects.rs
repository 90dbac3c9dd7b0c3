//! Transient visuals: the mascot's speech bubble and movement, layer pulses,
//! sparkles and button feedback. Each effect has a start here and an end the
//! controller schedules.

use super::{absorb, Synchronizer};
use crate::design::{Layer, Position};
use crate::host::RandomSource;
use crate::surface::{attr, attributes, tags, NodeId, NodeKind, Size, VisualSurface};

impl<S: VisualSurface> Synchronizer<S> {
    /// Replace the mascot's speech bubble with `text` and start the bounce.
    pub fn show_message(&mut self, text: &str) -> NodeId {
        if let Some(previous) = self.message.take() {
            absorb(self.surface.remove_node(previous));
        }
        let mascot = self.scaffold.mascot;
        let node = self.surface.create_node(
            Some(mascot),
            NodeKind::Message,
            attributes([(attr::ROLE, "mascot-message")]),
        );
        absorb(self.surface.set_text(node, text));
        absorb(self.surface.set_tag(mascot, tags::ANIMATION, "bounce"));
        self.message = Some(node);
        node
    }

    pub fn current_message(&self) -> Option<NodeId> {
        self.message
    }

    pub fn fade_message(&mut self, node: NodeId) {
        absorb(self.surface.set_tag(node, tags::TRANSITION, "fade-out"));
    }

    pub fn end_bounce(&mut self) {
        absorb(self.surface.clear_tag(self.scaffold.mascot, tags::ANIMATION));
    }

    /// Move the mascot to a random spot in its wander band.
    pub fn wander_mascot(&mut self, random: &mut dyn RandomSource) -> Position {
        let h = &self.house;
        let at = Position::new(
            random.within(h.mascot_width / 2.0, h.width - h.mascot_width),
            random.within(h.mascot_top, h.mascot_wander_height),
        );
        let mascot = self.scaffold.mascot;
        absorb(self.surface.set_tag(mascot, tags::TRANSITION, "wander"));
        absorb(self.surface.set_position(mascot, at));
        at
    }

    pub fn end_wander(&mut self) {
        absorb(self.surface.clear_tag(self.scaffold.mascot, tags::TRANSITION));
    }

    pub fn pulse_layer(&mut self, layer: Layer) -> Option<NodeId> {
        let node = *self.scaffold.layers.get(&layer)?;
        absorb(self.surface.set_tag(node, tags::EFFECT, "pulse"));
        Some(node)
    }

    pub fn end_pulse(&mut self, node: NodeId) {
        absorb(self.surface.clear_tag(node, tags::EFFECT));
    }

    /// Area sparkles are scattered over for `target`.
    pub fn sparkle_area(&self, target: NodeId) -> Size {
        if target == self.scaffold.mascot {
            self.house.mascot()
        } else if self.placed.values().any(|n| *n == target) {
            self.house.item()
        } else {
            self.house.size()
        }
    }

    /// One sparkle at a random point of `area` under `parent`. `None` when the
    /// parent is already gone.
    pub fn spawn_sparkle(
        &mut self,
        parent: NodeId,
        area: Size,
        random: &mut dyn RandomSource,
    ) -> Option<NodeId> {
        if self.surface.position(parent).is_err() {
            return None;
        }
        let node = self.surface.create_node(
            Some(parent),
            NodeKind::Sparkle,
            attributes([(attr::ROLE, "sparkle")]),
        );
        let at = Position::new(random.within(0.0, area.width), random.within(0.0, area.height));
        absorb(self.surface.set_position(node, at));
        Some(node)
    }

    pub fn show_button_feedback(&mut self, button: NodeId, label: &str, feedback: &str) {
        absorb(self.surface.set_text(button, label));
        absorb(self.surface.set_tag(button, tags::FEEDBACK, feedback));
    }

    pub fn restore_button(&mut self, button: NodeId, label: &str) {
        absorb(self.surface.set_text(button, label));
        absorb(self.surface.clear_tag(button, tags::FEEDBACK));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::HouseConfig;
    use crate::host::ScriptedRandom;
    use crate::surface::{tags, MemorySurface, NodeKind, VisualSurface};
    use crate::sync::Synchronizer;

    #[test]
    fn only_one_message_at_a_time() {
        let mut s = Synchronizer::new(MemorySurface::new(), HouseConfig::default());
        let first = s.show_message("one");
        let second = s.show_message("two");
        assert!(!s.surface().contains(first));
        assert_eq!(s.surface().text(second), Some("two"));
        assert_eq!(s.surface().nodes_of_kind(NodeKind::Message), vec![second]);
        assert_eq!(s.surface().tag(s.scaffold().mascot, tags::ANIMATION), Some("bounce"));
    }

    #[test]
    fn mascot_wanders_inside_band() {
        let mut s = Synchronizer::new(MemorySurface::new(), HouseConfig::default());
        let mut r = ScriptedRandom::new(vec![0.0, 0.999_999]);
        let at = s.wander_mascot(&mut r);
        assert_eq!(at.x, 40.0);
        assert!(at.y < 120.0 && at.y > 119.0);
        assert_eq!(s.surface().position(s.scaffold().mascot).unwrap(), at);
    }

    #[test]
    fn sparkles_need_a_live_parent() {
        let mut s = Synchronizer::new(MemorySurface::new(), HouseConfig::default());
        let mut r = ScriptedRandom::new(vec![0.5]);
        let house = s.scaffold().house;
        let area = s.sparkle_area(house);
        assert_eq!(area.width, 400.0);
        assert!(s.spawn_sparkle(house, area, &mut r).is_some());
        let gone = crate::surface::NodeId(9_999);
        assert!(s.spawn_sparkle(gone, area, &mut r).is_none());
    }
}
