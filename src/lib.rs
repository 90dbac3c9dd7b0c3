//! # Hamsterhouse - Visual Builder Core for a Small-Pet House
//!
//! Hamsterhouse is the engine behind a point-and-drag house customizer: pick a
//! material for each structural layer, toggle furnishings into three rooms, drag
//! them around on a grid, and let the mascot hamster comment on it all. Designs
//! can be saved to a local history and shared as a compact URL token.
//!
//! ## Features
//!
//! - **Design Model**: live layer/furnishing state with permissive updates and immutable snapshots.
//! - **Sharing Codec**: deterministic URL-safe tokens, tolerant of older standard-base64 links.
//! - **Saved History**: append-only JSON history that survives corrupt or foreign entries.
//! - **Visual Synchronizer**: mirrors state onto any [`surface::VisualSurface`], including the snapped drag gesture.
//! - **Mascot Reactions**: contextual and random lines, bounces, sparkles and idle wandering.
//! - **Deterministic Hosts**: simulated timer, scripted randomness and recording surface for tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hamsterhouse::config::Config;
//! use hamsterhouse::controller::{Capabilities, InteractionController};
//! use hamsterhouse::host::{MemoryClipboard, MemoryStore, RngSource, SimulatedTimer};
//! use hamsterhouse::surface::MemorySurface;
//! use std::time::Duration;
//!
//! let mut session = InteractionController::new(
//!     Config::default(),
//!     MemorySurface::new(),
//!     SimulatedTimer::new(),
//!     Capabilities {
//!         store: Box::new(MemoryStore::new()),
//!         clipboard: Box::new(MemoryClipboard::new()),
//!         random: Box::new(RngSource::thread()),
//!     },
//! );
//! session.start(None);
//! session.select_layer("base", "sand");
//! session.toggle_furnishing("bedroom", "soft-bed", true);
//! session.advance(Duration::from_secs(2));
//! println!("{}", session.share());
//! ```
//!
//! ## Module Organization
//!
//! - [`design`] - Vocabularies, the live model and design snapshots
//! - [`catalog`] - Mascot reaction lines
//! - [`codec`] - Sharing tokens, share links and saved history
//! - [`surface`] - Visual surface capability and the in-memory surface
//! - [`sync`] - State-to-surface synchronization, drag and effects
//! - [`host`] - Timer, storage, clipboard and randomness capabilities
//! - [`controller`] - Session orchestration
//! - [`config`] - Configuration management
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │  InteractionController  │ ← Input, reactions, save/share/load
//! └─────────────────────────┘
//!       │            │
//! ┌───────────┐ ┌──────────────┐
//! │  Codec    │ │ Synchronizer │ ← Surface mirroring
//! └───────────┘ └──────────────┘
//!       │            │
//! ┌─────────────────────────┐
//! │      Design Model       │ ← Live state
//! └─────────────────────────┘
//! ```

pub mod catalog;
pub mod codec;
pub mod config;
pub mod controller;
pub mod design;
pub mod errors;
pub mod host;
pub mod logutil;
pub mod surface;
pub mod sync;
