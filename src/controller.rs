//! # Interaction Controller
//!
//! Top-level orchestrator for one builder session. It owns the live
//! [`DesignModel`] and the [`Synchronizer`], and reaches the host only through
//! the injected capabilities.
//!
//! ## Flows
//!
//! - **Input**: layer selection, furnishing toggles, mascot clicks and the drag
//!   gesture each update the model, mirror the change and trigger a reaction.
//! - **Reactions**: one message at a time; it fades after a while and the
//!   mascot bounces meanwhile.
//! - **Idle behaviour**: the mascot wanders periodically and sometimes says
//!   something on its own.
//! - **Save**: snapshot plus positions and timestamp, appended to the history slot.
//! - **Share**: token URL to the clipboard, or the fallback prompt.
//! - **Startup**: a sharing token in the entry query becomes the initial design.
//!
//! Every timed effect is a [`Task`] scheduled on the [`Timer`]; the host calls
//! [`InteractionController::run_task`] when it fires. No failure ends the
//! session: errors are logged and a safe default is kept.

use chrono::Utc;
use log::{debug, error, info, warn};
use std::time::Duration;

use crate::catalog;
use crate::codec;
use crate::config::{Config, TimingConfig};
use crate::design::{Category, Design, DesignModel, Layer, Position};
use crate::errors::UnknownKey;
use crate::host::{Clipboard, KeyValueStore, RandomSource, SimulatedTimer, Task, Timer};
use crate::logutil::preview;
use crate::surface::{NodeId, VisualSurface};
use crate::sync::{DragRelease, Synchronizer};

/// Host capabilities besides the surface and the timer.
pub struct Capabilities {
    pub store: Box<dyn KeyValueStore>,
    pub clipboard: Box<dyn Clipboard>,
    pub random: Box<dyn RandomSource>,
}

pub struct InteractionController<S: VisualSurface, T: Timer> {
    config: Config,
    model: DesignModel,
    sync: Synchronizer<S>,
    timer: T,
    store: Box<dyn KeyValueStore>,
    clipboard: Box<dyn Clipboard>,
    random: Box<dyn RandomSource>,
    spoken: Vec<String>,
}

impl<S: VisualSurface, T: Timer> InteractionController<S, T> {
    pub fn new(config: Config, surface: S, timer: T, caps: Capabilities) -> Self {
        let sync = Synchronizer::new(surface, config.house.clone());
        Self {
            config,
            model: DesignModel::new(),
            sync,
            timer,
            store: caps.store,
            clipboard: caps.clipboard,
            random: caps.random,
            spoken: Vec::new(),
        }
    }

    pub fn model(&self) -> &DesignModel {
        &self.model
    }

    pub fn sync(&self) -> &Synchronizer<S> {
        &self.sync
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every line the mascot has said, oldest first.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    fn after(&mut self, ms: u64, task: Task) {
        self.timer.schedule_once(TimingConfig::ms(ms), task);
    }

    /// Session startup. Applies the default layers, then the shared design
    /// found in `entry_query` (a query string or full URL), and starts the
    /// welcome and idle timers. Returns the design that was loaded, if any.
    pub fn start(&mut self, entry_query: Option<&str>) -> Option<Design> {
        for layer in Layer::ALL {
            self.sync.apply_layer(layer, self.model.layer(layer));
        }

        let param = self.config.share.query_param.clone();
        let token = entry_query.and_then(|q| codec::token_from_query(q, &param));
        let loaded = match token {
            Some(token) => match codec::decode_from_sharing(&token) {
                Ok(design) => {
                    let skipped = self.load_design(&design);
                    info!(
                        "Loaded shared design ({} furnishings, {} keys skipped)",
                        design.furnishing_count(),
                        skipped.len()
                    );
                    self.react(Some(catalog::SHARED_WELCOME));
                    Some(design)
                }
                Err(e) => {
                    error!("Failed to load shared design {}: {}", preview(&token), e);
                    None
                }
            },
            None => None,
        };

        let timing = self.config.timing.clone();
        self.after(timing.welcome_delay_ms, Task::Welcome);
        self.timer
            .schedule_repeating(TimingConfig::ms(timing.wander_interval_ms), Task::Wander);
        self.timer
            .schedule_repeating(TimingConfig::ms(timing.chatter_interval_ms), Task::Chatter);
        loaded
    }

    /// Overlay `design` onto the session. Unknown keys are logged and skipped;
    /// furnishings new to the session get placed.
    pub fn load_design(&mut self, design: &Design) -> Vec<UnknownKey> {
        let before = self.model.clone();
        let skipped = self.model.merge(design);
        for key in &skipped {
            warn!("Ignoring {}", key);
        }
        for layer in Layer::ALL {
            self.sync.apply_layer(layer, self.model.layer(layer));
        }
        for category in Category::ALL {
            let added: Vec<&'static str> = self
                .model
                .furnishings(category)
                .filter(|item| !before.contains(category, item))
                .collect();
            for item in added {
                self.place(category, item);
            }
        }
        skipped
    }

    fn place(&mut self, category: Category, furnishing: &str) {
        if let Some(node) = self
            .sync
            .place_furnishing(category, furnishing, self.random.as_mut())
        {
            let delay = self.config.timing.entrance_delay_ms;
            self.after(delay, Task::Reveal(node));
        }
    }

    /// Material picked for a layer. `false` when the name or material is unknown.
    pub fn select_layer(&mut self, layer: &str, material: &str) -> bool {
        let Some(parsed) = self.model.set_layer(layer, material) else {
            debug!("Ignoring layer selection {}={}", layer, material);
            return false;
        };
        self.sync.apply_layer(parsed, material);
        if let Some(node) = self.sync.pulse_layer(parsed) {
            let pulse = self.config.timing.layer_pulse_ms;
            self.after(pulse, Task::EndPulse(node));
            self.sparkle(node);
        }
        self.react(Some(catalog::LAYER_CHANGED));
        true
    }

    /// Furnishing checkbox changed. `false` when nothing changed.
    pub fn toggle_furnishing(&mut self, category: &str, furnishing: &str, checked: bool) -> bool {
        if checked {
            if !self.model.add_furnishing(category, furnishing) {
                return false;
            }
            if let Some(parsed) = Category::parse(category) {
                self.place(parsed, furnishing);
            }
            self.react(Some(catalog::furnishing_reaction(furnishing)));
        } else {
            if !self.model.remove_furnishing(category, furnishing) {
                return false;
            }
            if let Some(node) = self.sync.remove_furnishing_visual(furnishing) {
                let exit = self.config.timing.exit_ms;
                self.after(exit, Task::RemoveNode(node));
            }
            self.react(Some(catalog::FURNISHING_REMOVED));
        }
        true
    }

    pub fn click_mascot(&mut self) {
        self.react(None);
        let mascot = self.sync.scaffold().mascot;
        self.sparkle(mascot);
    }

    pub fn pointer_down(&mut self, node: NodeId, pointer: Position) -> bool {
        self.sync.pointer_down(node, pointer)
    }

    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        self.sync.pointer_move(pointer)
    }

    /// Release. A completed drag sparkles on the item and gets a reaction.
    pub fn pointer_up(&mut self) -> Option<DragRelease> {
        let release = self.sync.pointer_up()?;
        debug!(
            "{} settled at ({}, {})",
            release.furnishing, release.position.x, release.position.y
        );
        self.sparkle(release.node);
        self.react(Some(catalog::PLACEMENT_DONE));
        Some(release)
    }

    /// Show a mascot message: `text`, or a random chatter line for `None`.
    pub fn react(&mut self, text: Option<&str>) -> NodeId {
        let line = match text {
            Some(line) => line,
            None => catalog::random_reaction(self.random.as_mut()),
        };
        let node = self.sync.show_message(line);
        info!("Mascot: {}", preview(line));
        self.spoken.push(line.to_string());
        let timing = self.config.timing.clone();
        self.after(timing.bounce_ms, Task::EndBounce);
        self.after(timing.message_ttl_ms, Task::FadeMessage(node));
        node
    }

    /// Staggered sparkles over `target`.
    pub fn sparkle(&mut self, target: NodeId) {
        let area = self.sync.sparkle_area(target);
        let timing = &self.config.timing;
        let (count, stagger) = (timing.sparkle_count, timing.sparkle_stagger_ms);
        for i in 0..u64::from(count) {
            self.after(stagger * i, Task::Sparkle { parent: target, area });
        }
    }

    /// Append the current design to the saved history. Returns the saved
    /// design, or `None` when the store refused the write.
    pub fn save(&mut self) -> Option<Design> {
        let design = self
            .model
            .snapshot()
            .stamped(self.sync.read_positions(), Utc::now());
        let key = self.config.storage.history_key.clone();
        let existing = self.store.get(&key);
        let next = codec::append_to_saved_history(existing.as_deref(), &design);
        if let Err(e) = self.store.set(&key, &next) {
            warn!("Failed to save design: {:#}", e);
            self.react(Some(catalog::SAVE_FAILED));
            return None;
        }
        info!(
            "Saved design with {} furnishing(s) to {}",
            design.furnishing_count(),
            key
        );
        let button = self.sync.scaffold().save_button;
        self.button_feedback(button, catalog::SAVED_LABEL, "saved", catalog::SAVE_LABEL);
        self.react(Some(catalog::DESIGN_SAVED));
        let house = self.sync.scaffold().house;
        self.sparkle(house);
        Some(design)
    }

    /// Build the share link and hand it to the clipboard, falling back to the
    /// prompt. Returns the link.
    pub fn share(&mut self) -> String {
        let token = codec::encode_for_sharing(&self.model.snapshot());
        let url = codec::share_url(
            &self.config.share.base_url,
            &self.config.share.query_param,
            &token,
        );
        info!("Share link: {}", preview(&url));
        match self.clipboard.write(&url) {
            Ok(()) => {
                let button = self.sync.scaffold().share_button;
                self.button_feedback(button, catalog::COPIED_LABEL, "copied", catalog::SHARE_LABEL);
                self.react(Some(catalog::DESIGN_SHARED));
            }
            Err(e) => {
                warn!("{}; showing the link instead", e);
                self.clipboard.prompt(catalog::SHARE_PROMPT, &url);
            }
        }
        let house = self.sync.scaffold().house;
        self.sparkle(house);
        url
    }

    fn button_feedback(&mut self, button: NodeId, label: &str, feedback: &str, restore: &str) {
        self.sync.show_button_feedback(button, label, feedback);
        let delay = self.config.timing.button_feedback_ms;
        self.after(
            delay,
            Task::RestoreButton {
                node: button,
                label: restore.to_string(),
            },
        );
    }

    /// Perform a task whose timer fired.
    pub fn run_task(&mut self, task: Task) {
        debug!("Running {:?}", task);
        match task {
            Task::Reveal(node) => self.sync.reveal(node),
            Task::RemoveNode(node) => self.sync.remove_node(node),
            Task::FadeMessage(node) => {
                // A replaced message is already gone.
                if self.sync.current_message() == Some(node) {
                    self.sync.fade_message(node);
                    let fade = self.config.timing.message_fade_ms;
                    self.after(fade, Task::RemoveNode(node));
                }
            }
            Task::EndBounce => self.sync.end_bounce(),
            Task::EndWander => self.sync.end_wander(),
            Task::EndPulse(node) => self.sync.end_pulse(node),
            Task::Sparkle { parent, area } => {
                if let Some(node) = self.sync.spawn_sparkle(parent, area, self.random.as_mut()) {
                    let lifetime = self.config.timing.sparkle_lifetime_ms;
                    self.after(lifetime, Task::RemoveNode(node));
                }
            }
            Task::RestoreButton { node, label } => self.sync.restore_button(node, &label),
            Task::Welcome => {
                self.react(Some(catalog::WELCOME));
            }
            Task::Wander => {
                let at = self.sync.wander_mascot(self.random.as_mut());
                debug!("Mascot wanders to ({:.0}, {:.0})", at.x, at.y);
                let transition = self.config.timing.wander_transition_ms;
                self.after(transition, Task::EndWander);
            }
            Task::Chatter => {
                if self.random.unit() < self.config.timing.chatter_probability {
                    self.react(None);
                }
            }
        }
    }
}

impl<S: VisualSurface> InteractionController<S, SimulatedTimer> {
    /// Move simulated time forward by `by`, running every task that comes due.
    /// Returns how many ran.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timer.now() + by;
        let mut ran = 0;
        while let Some(task) = self.timer.pop_due(until) {
            self.run_task(task);
            ran += 1;
        }
        ran
    }
}
