use arboard::Clipboard;
use std::time::{Duration, Instant};

/// How long the copied indicator stays up before falling back to idle.
pub const COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Destination for copied text. The production sink is the system clipboard;
/// tests substitute a recording fake.
pub trait ClipboardSink {
    /// Hand off text for writing. Must not block the caller; completion and
    /// failure are not reported back.
    fn write_text(&self, text: String);
}

/// System clipboard via arboard. The write runs on a detached thread and its
/// result is dropped.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: String) {
        std::thread::spawn(move || {
            let _ = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Copied,
}

/// Two-state copy control for one code block.
///
/// Activation invokes the text producer synchronously, hands the text to the
/// sink, and flips to `Copied` without waiting for the write. The state falls
/// back to `Idle` once the fixed delay elapses; re-activation restarts the
/// clock. The only outward signal is the icon.
#[derive(Debug, Default)]
pub struct CopyControl {
    copied_until: Option<Instant>,
}

impl CopyControl {
    pub fn new() -> Self {
        Self { copied_until: None }
    }

    pub fn activate<F>(&mut self, now: Instant, sink: &dyn ClipboardSink, produce: F)
    where
        F: FnOnce() -> String,
    {
        let text = produce();
        sink.write_text(text);
        self.copied_until = Some(now + COPY_RESET_DELAY);
    }

    /// Advance the control's clock. Call on every event-loop pass.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.copied_until {
            if now >= deadline {
                self.copied_until = None;
            }
        }
    }

    pub fn state(&self) -> CopyState {
        if self.copied_until.is_some() {
            CopyState::Copied
        } else {
            CopyState::Idle
        }
    }

    pub fn icon(&self) -> char {
        match self.state() {
            CopyState::Idle => '\u{29c9}',   // ⧉
            CopyState::Copied => '\u{2713}', // ✓
        }
    }
}
