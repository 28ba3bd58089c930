//! Clip registry.
//!
//! Sound effects are registered once at startup and addressed by
//! [`ClipId`] afterwards. The bank is append-only: there is no unload
//! path, matching the fixed effect set of a game build.

use std::sync::Arc;

/// Immutable mono sample data for one sound effect.
///
/// Channel layout and sample-rate conversion are loading concerns and
/// happen before a clip reaches the bank.
#[derive(Debug, Clone)]
pub struct Clip {
    name: String,
    frames: Vec<f32>,
}

impl Clip {
    pub fn new(name: impl Into<String>, frames: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    pub fn len_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Opaque handle to a registered clip. Cheap to copy, valid for the
/// lifetime of the bank that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(usize);

/// Append-only registry of clips, shared with voices via `Arc`.
#[derive(Default)]
pub struct SfxBank {
    clips: Vec<Arc<Clip>>,
}

impl SfxBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip and get its handle.
    pub fn register(&mut self, clip: Clip) -> ClipId {
        self.clips.push(Arc::new(clip));
        ClipId(self.clips.len() - 1)
    }

    pub fn get(&self, id: ClipId) -> Option<&Arc<Clip>> {
        self.clips.get(id.0)
    }

    /// Look up the first clip registered under `name`.
    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.clips.iter().position(|c| c.name() == name).map(ClipId)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
