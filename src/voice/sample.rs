//! One-shot sample voice.
//!
//! Plays a single mono clip front to back, then goes idle. No looping,
//! no envelope - game sound effects fire and finish. The voice holds a
//! shared handle to its clip so the same clip can play on several
//! voices at once.

use std::sync::Arc;

use crate::{
    bank::Clip,
    voice::{Voice, VoiceFactory},
};

/// A voice that plays one clip to completion.
pub struct SampleVoice {
    /// Clip being played, if any. `None` means idle.
    clip: Option<Arc<Clip>>,
    /// Current playback position in frames.
    frame_pos: usize,
    /// Per-shot gain, set at start time.
    gain: f32,
}

impl SampleVoice {
    pub fn new() -> Self {
        Self {
            clip: None,
            frame_pos: 0,
            gain: 1.0,
        }
    }

    /// Bind a clip and begin playback from the first frame.
    ///
    /// Restarting a busy voice is allowed; the previous clip is simply
    /// replaced. The pool never does this, but callers holding a voice
    /// reference may.
    pub fn start(&mut self, clip: Arc<Clip>, gain: f32) {
        self.clip = Some(clip);
        self.frame_pos = 0;
        self.gain = gain;
    }

    /// Drop the bound clip immediately.
    pub fn stop(&mut self) {
        self.clip = None;
        self.frame_pos = 0;
    }

    /// Write the next `out.len()` frames into the buffer.
    ///
    /// Frames are scaled by the per-shot gain. If the clip ends inside
    /// the block, the tail is zero-filled and the voice goes idle.
    pub fn render(&mut self, out: &mut [f32]) {
        let Some(clip) = &self.clip else {
            out.fill(0.0);
            return;
        };

        let frames = clip.frames();
        let total = frames.len();
        let remaining = total.saturating_sub(self.frame_pos);
        let to_copy = remaining.min(out.len());

        for (o, f) in out[..to_copy]
            .iter_mut()
            .zip(&frames[self.frame_pos..self.frame_pos + to_copy])
        {
            *o = f * self.gain;
        }
        out[to_copy..].fill(0.0);

        self.frame_pos += to_copy;

        // Cursor passed the end: playback finished, go idle
        if self.frame_pos >= total {
            self.clip = None;
            self.frame_pos = 0;
        }
    }

    /// Get the current playback position in frames.
    pub fn frame_pos(&self) -> usize {
        self.frame_pos
    }

    /// Name of the clip being played (for diagnostics).
    pub fn clip_name(&self) -> Option<&str> {
        self.clip.as_deref().map(Clip::name)
    }
}

impl Default for SampleVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl Voice for SampleVoice {
    fn is_busy(&self) -> bool {
        self.clip.is_some()
    }
}

/// Factory producing plain sample voices, used by the engine's pool.
pub struct SampleVoiceFactory;

impl VoiceFactory for SampleVoiceFactory {
    type Voice = SampleVoice;

    fn create_voice(&self) -> Self::Voice {
        SampleVoice::new()
    }
}
