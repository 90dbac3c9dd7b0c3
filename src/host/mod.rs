//! Host capabilities the core reaches the outside world through: deferred
//! tasks, persistent storage, clipboard and randomness. Each has a
//! deterministic in-process implementation used by tests and the CLI.

pub mod clipboard;
pub mod random;
pub mod store;
pub mod timer;

pub use clipboard::{Clipboard, ConsoleClipboard, MemoryClipboard};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{SimulatedTimer, Task, TaskId, Timer};
