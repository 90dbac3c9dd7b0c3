//! Test utilities & fixtures.
//! Builds builder sessions on the in-memory surface and simulated timer, keeping
//! handles to the store and clipboard so tests can look at what was written.

use std::time::Duration;

use hamsterhouse::config::Config;
use hamsterhouse::controller::{Capabilities, InteractionController};
use hamsterhouse::host::{KeyValueStore, MemoryClipboard, MemoryStore, ScriptedRandom, SimulatedTimer};
use hamsterhouse::surface::MemorySurface;

pub type TestController = InteractionController<MemorySurface, SimulatedTimer>;

pub struct Session {
    pub controller: TestController,
    pub store: MemoryStore,
    pub clipboard: MemoryClipboard,
}

#[allow(dead_code)]
pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Session with default config, mid-range randomness and a working clipboard.
#[allow(dead_code)]
pub fn session() -> Session {
    session_with(Config::default(), vec![0.5], MemoryClipboard::new())
}

#[allow(dead_code)]
pub fn session_with(config: Config, random: Vec<f64>, clipboard: MemoryClipboard) -> Session {
    let store = MemoryStore::new();
    let controller = controller_with_store(config, random, clipboard.clone(), Box::new(store.clone()));
    Session {
        controller,
        store,
        clipboard,
    }
}

/// Controller over an arbitrary store (file-backed or failing).
#[allow(dead_code)]
pub fn controller_with_store(
    config: Config,
    random: Vec<f64>,
    clipboard: MemoryClipboard,
    store: Box<dyn KeyValueStore>,
) -> TestController {
    InteractionController::new(
        config,
        MemorySurface::new(),
        SimulatedTimer::new(),
        Capabilities {
            store,
            clipboard: Box::new(clipboard),
            random: Box::new(ScriptedRandom::new(random)),
        },
    )
}
