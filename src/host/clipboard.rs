use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::ClipboardError;

/// Host clipboard capability plus the synchronous fallback prompt shown when
/// writing fails.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn prompt(&mut self, message: &str, text: &str);
}

#[derive(Debug, Default)]
struct ClipboardState {
    unavailable: bool,
    contents: Option<String>,
    prompts: Vec<(String, String)>,
}

/// In-process clipboard. Clones share state so a test can keep a handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn unavailable() -> Self {
        let clipboard = Self::default();
        clipboard.state.borrow_mut().unavailable = true;
        clipboard
    }

    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    /// `(message, text)` pairs shown through the fallback prompt.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.state.borrow().prompts.clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.borrow_mut();
        if state.unavailable {
            return Err(ClipboardError::Unavailable("clipboard access denied".into()));
        }
        state.contents = Some(text.to_string());
        Ok(())
    }

    fn prompt(&mut self, message: &str, text: &str) {
        self.state
            .borrow_mut()
            .prompts
            .push((message.to_string(), text.to_string()));
    }
}

/// Clipboard for terminal hosts: there is no system clipboard, so every
/// write fails and the prompt prints the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleClipboard;

impl Clipboard for ConsoleClipboard {
    fn write(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard on a terminal".into()))
    }

    fn prompt(&mut self, message: &str, text: &str) {
        println!("{message} {text}");
    }
}
