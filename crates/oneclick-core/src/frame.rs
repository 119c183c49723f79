//! Document model for embedded frames
//!
//! The player locator only needs three capabilities from a rendered
//! document: enumerate its embedded frames, read and rewrite a frame's
//! source, and post a message to a frame's content window. Hosts implement
//! these traits over their own element types; the in-memory types below
//! serve hosts without a real DOM and the test suites.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cross-document messaging endpoint of an embedded frame
#[cfg_attr(test, mockall::automock)]
pub trait MessageTarget: Send + Sync {
    /// Deliver a serialized message to the frame's content
    fn post_message(&self, message: &str, target_origin: &str);
}

/// An embedded frame element
pub trait EmbedFrame: Send + Sync {
    /// Current source URL, if any
    fn src(&self) -> Option<String>;

    /// Replace the source URL. Hosts reload the frame when this changes.
    fn set_src(&self, src: &str);

    /// The frame's content window, absent until the frame has loaded
    fn content_window(&self) -> Option<Arc<dyn MessageTarget>>;
}

/// A rendered document subtree that may contain embedded frames
pub trait FrameContainer {
    /// All embedded frames, in document order
    fn frames(&self) -> Vec<Arc<dyn EmbedFrame>>;
}

/// A message recorded by [`RecordingWindow`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Serialized message body
    pub message: String,
    /// Origin the message was addressed to
    pub target_origin: String,
}

/// Content window that records every message posted to it
#[derive(Debug, Default)]
pub struct RecordingWindow {
    messages: Mutex<Vec<PostedMessage>>,
}

impl RecordingWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first
    pub fn messages(&self) -> Vec<PostedMessage> {
        self.messages.lock().clone()
    }

    /// Message bodies parsed as JSON; unparseable bodies are skipped
    pub fn json_messages(&self) -> Vec<serde_json::Value> {
        self.messages
            .lock()
            .iter()
            .filter_map(|m| serde_json::from_str(&m.message).ok())
            .collect()
    }
}

impl MessageTarget for RecordingWindow {
    fn post_message(&self, message: &str, target_origin: &str) {
        self.messages.lock().push(PostedMessage {
            message: message.to_string(),
            target_origin: target_origin.to_string(),
        });
    }
}

/// In-memory embedded frame
pub struct InlineFrame {
    src: RwLock<Option<String>>,
    window: Option<Arc<dyn MessageTarget>>,
    reloads: AtomicUsize,
}

impl fmt::Debug for InlineFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineFrame")
            .field("src", &*self.src.read())
            .field("has_window", &self.window.is_some())
            .field("reloads", &self.reloads())
            .finish()
    }
}

impl InlineFrame {
    /// Create a loaded frame with the given source and content window
    pub fn new(src: impl Into<String>, window: Arc<dyn MessageTarget>) -> Self {
        Self { src: RwLock::new(Some(src.into())), window: Some(window), reloads: AtomicUsize::new(0) }
    }

    /// Create a frame whose content has not loaded yet
    pub fn unloaded(src: impl Into<String>) -> Self {
        Self { src: RwLock::new(Some(src.into())), window: None, reloads: AtomicUsize::new(0) }
    }

    /// Create a frame without a source attribute
    pub fn without_src(window: Arc<dyn MessageTarget>) -> Self {
        Self { src: RwLock::new(None), window: Some(window), reloads: AtomicUsize::new(0) }
    }

    /// Number of times the source has been rewritten
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::Relaxed)
    }
}

impl EmbedFrame for InlineFrame {
    fn src(&self) -> Option<String> {
        self.src.read().clone()
    }

    fn set_src(&self, src: &str) {
        *self.src.write() = Some(src.to_string());
        self.reloads.fetch_add(1, Ordering::Relaxed);
    }

    fn content_window(&self) -> Option<Arc<dyn MessageTarget>> {
        self.window.clone()
    }
}

/// In-memory document view holding frames in document order
#[derive(Default)]
pub struct DocumentView {
    frames: Vec<Arc<dyn EmbedFrame>>,
}

impl fmt::Debug for DocumentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentView").field("frames", &self.frames.len()).finish()
    }
}

impl DocumentView {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame
    pub fn push(&mut self, frame: Arc<dyn EmbedFrame>) {
        self.frames.push(frame);
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_frame(mut self, frame: Arc<dyn EmbedFrame>) -> Self {
        self.push(frame);
        self
    }

    /// Number of frames in the view
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the view has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameContainer for DocumentView {
    fn frames(&self) -> Vec<Arc<dyn EmbedFrame>> {
        self.frames.clone()
    }
}
