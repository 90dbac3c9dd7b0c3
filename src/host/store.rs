//! Flat key-value persistence for the saved-history slot.
//!
//! - [`MemoryStore`]: in-process map; clones share the same slots
//! - [`FileStore`]: one JSON file per key under a data directory, guarded with
//!   fs2 file locks (shared for read, exclusive for write)

use anyhow::{anyhow, Result};
use fs2::FileExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Host persistent storage capability.
pub trait KeyValueStore {
    /// Current text in the slot, `None` when the slot was never written or cannot be read.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        let mut f = fs::OpenOptions::new().read(true).open(&path).ok()?;
        let _ = f.lock_shared();
        let mut s = String::new();
        let read = f.read_to_string(&mut s);
        let _ = f.unlock();
        match read {
            Ok(_) => Some(s.trim_start_matches('\0').to_string()),
            Err(e) => {
                log::warn!("store: failed reading {:?}: {}", path, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .map_err(|e| anyhow!("Failed to create store dir {:?}: {}", self.dir, e))?;
        }
        let path = self.slot_path(key);
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| anyhow!("Failed to open {:?}: {}", path, e))?;
        f.lock_exclusive()
            .map_err(|e| anyhow!("Failed to lock {:?}: {}", path, e))?;
        let written = f
            .set_len(0)
            .and_then(|_| f.write_all(value.as_bytes()))
            .and_then(|_| f.flush())
            .and_then(|_| f.sync_all());
        let _ = f.unlock();
        written.map_err(|e| anyhow!("Failed to write {:?}: {}", path, e))
    }
}
