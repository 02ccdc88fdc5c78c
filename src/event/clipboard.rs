//! Clipboard plumbing.
//!
//! Reading the clipboard is asynchronous: the engine fires
//! [`ClipboardBackend::request_text`] and later picks up the answer, which
//! raises the sticky ready flag in [`ClipboardState`] until a consumer
//! clears it. There is no timeout.

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// ClipboardBackend
// ---------------------------------------------------------------------------

/// Platform clipboard as seen by the engine.
pub trait ClipboardBackend {
    /// Ask for the clipboard text. The answer arrives through
    /// [`poll_text`](Self::poll_text) or is pushed to the engine directly.
    fn request_text(&mut self);

    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str);

    /// Text that arrived since the last poll.
    fn poll_text(&mut self) -> Option<String> {
        None
    }
}

// ---------------------------------------------------------------------------
// ClipboardState
// ---------------------------------------------------------------------------

/// Readiness flag and buffer for delivered clipboard text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardState {
    ready: bool,
    text: String,
}

impl ClipboardState {
    /// Store delivered text and raise the ready flag.
    pub fn deliver(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The last delivered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clear the ready flag. The text stays until the next delivery.
    pub fn consume(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// MemoryClipboard
// ---------------------------------------------------------------------------

/// In-process clipboard. Requests are answered on the next poll.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    pending: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            pending: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn request_text(&mut self) {
        self.pending = true;
    }

    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_owned());
    }

    fn poll_text(&mut self) -> Option<String> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.contents.clone()
    }
}

// ---------------------------------------------------------------------------
// ChannelClipboard
// ---------------------------------------------------------------------------

/// A request sent from the engine to a clipboard service task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardRequest {
    GetText,
    SetText(String),
}

/// Engine side of a channel clipboard: requests go out over one channel,
/// text comes back over another.
#[derive(Debug)]
pub struct ChannelClipboard {
    requests: mpsc::UnboundedSender<ClipboardRequest>,
    replies: mpsc::UnboundedReceiver<String>,
}

/// Service side of a channel clipboard, owned by the task that talks to the
/// platform.
#[derive(Debug)]
pub struct ClipboardService {
    requests: mpsc::UnboundedReceiver<ClipboardRequest>,
    replies: mpsc::UnboundedSender<String>,
}

/// Create a connected clipboard pair.
pub fn channel_clipboard() -> (ChannelClipboard, ClipboardService) {
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (rep_tx, rep_rx) = mpsc::unbounded_channel();
    (
        ChannelClipboard { requests: req_tx, replies: rep_rx },
        ClipboardService { requests: req_rx, replies: rep_tx },
    )
}

impl ChannelClipboard {
    fn send(&self, request: ClipboardRequest) {
        if self.requests.send(request).is_err() {
            log::debug!("clipboard service is gone, request dropped");
        }
    }
}

impl ClipboardBackend for ChannelClipboard {
    fn request_text(&mut self) {
        self.send(ClipboardRequest::GetText);
    }

    fn set_text(&mut self, text: &str) {
        self.send(ClipboardRequest::SetText(text.to_owned()));
    }

    fn poll_text(&mut self) -> Option<String> {
        self.replies.try_recv().ok()
    }
}

impl ClipboardService {
    /// Wait for the next request. `None` once the engine side is dropped.
    pub async fn next_request(&mut self) -> Option<ClipboardRequest> {
        self.requests.recv().await
    }

    /// Answer a [`ClipboardRequest::GetText`].
    pub fn reply(&self, text: impl Into<String>) {
        if self.replies.send(text.into()).is_err() {
            log::debug!("clipboard reply dropped, engine side is gone");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
