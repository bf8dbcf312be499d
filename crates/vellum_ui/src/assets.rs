//! Collaborator interfaces: images and audio.
//!
//! The toolkit never decodes images or plays sound itself. Hosts implement
//! [`ImageProvider`] and [`AudioSink`]; widgets only hold opaque handles.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

/// Opaque reference to a decoded image owned by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHandle {
    /// Host-assigned identifier.
    pub id: u64,
    /// Natural width in pixels.
    pub width: f32,
    /// Natural height in pixels.
    pub height: f32,
}

impl ImageHandle {
    /// Creates a handle.
    #[must_use]
    pub const fn new(id: u64, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// Completion callback for [`ImageProvider::load`]. `None` means the load failed.
pub type LoadCallback = Box<dyn FnOnce(Option<ImageHandle>) + Send>;

/// Source of images by logical key.
pub trait ImageProvider {
    /// Returns the image if it is already cached.
    fn get(&self, key: &str) -> Option<ImageHandle>;

    /// Starts loading `key` and reports the result through `done`.
    ///
    /// `done` may run before this returns (cache hit) or at any later point,
    /// possibly on another thread.
    fn load(&self, key: &str, done: LoadCallback);
}

/// In-memory provider: every key is either present or missing.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: RwLock<HashMap<String, ImageHandle>>,
}

impl ImageCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an image.
    pub fn insert(&self, key: impl Into<String>, image: ImageHandle) {
        self.images.write().insert(key.into(), image);
    }

    /// Number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.read().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.read().is_empty()
    }
}

impl ImageProvider for ImageCache {
    fn get(&self, key: &str) -> Option<ImageHandle> {
        self.images.read().get(key).copied()
    }

    fn load(&self, key: &str, done: LoadCallback) {
        let image = self.get(key);
        done(image);
    }
}

/// Feedback sounds the widgets trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A press landed (button click, selection, toggle).
    Click,
    /// The pointer entered a button.
    Hover,
}

/// Fire-and-forget sound trigger.
pub trait AudioSink {
    /// Plays a cue. Must not block.
    fn play(&self, cue: SoundCue);
}

impl<T: AudioSink + ?Sized> AudioSink for std::sync::Arc<T> {
    fn play(&self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// Audio sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _cue: SoundCue) {}
}

/// Audio sink that records every cue, for headless runs.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    cues: Mutex<Vec<SoundCue>>,
}

impl RecordingAudio {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, oldest first.
    #[must_use]
    pub fn cues(&self) -> Vec<SoundCue> {
        self.cues.lock().clone()
    }

    /// Forgets recorded cues.
    pub fn clear(&self) {
        self.cues.lock().clear();
    }
}

impl AudioSink for RecordingAudio {
    fn play(&self, cue: SoundCue) {
        self.cues.lock().push(cue);
    }
}
