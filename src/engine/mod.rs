//! Sound-effect playback engine.
//!
//! The engine is the consumer side of the voice pool: a trigger
//! request acquires a voice, binds the clip, and starts it; the block
//! renderer mixes every busy voice into the output. When the pool is
//! exhausted the request is dropped - one missing effect under heavy
//! load beats an unbounded voice count.
//!
//! # Example
//!
//! ```
//! use sfx_pool::{Clip, EngineConfig, SfxBank, SfxEngine};
//!
//! let mut bank = SfxBank::new();
//! let jump = bank.register(Clip::new("jump", vec![0.5; 64]));
//!
//! let mut engine = SfxEngine::new(bank, EngineConfig::default())?;
//! engine.trigger(jump);
//!
//! let mut out = vec![0.0; 128];
//! engine.render_block(&mut out);
//! # Ok::<(), sfx_pool::PoolError>(())
//! ```

pub mod message;

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    bank::{ClipId, SfxBank},
    pool::{PoolError, VoicePool},
    voice::{sample::SampleVoiceFactory, Voice},
    MAX_BLOCK_SIZE,
};

pub use message::{MessageReceiver, SfxMessage};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Hard cap on concurrently playing voices.
    pub max_voices: usize,
    /// Gain applied to the final mix.
    pub master_gain: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_voices: 10,
            master_gain: 1.0,
        }
    }
}

pub struct SfxEngine {
    bank: SfxBank,
    pool: VoicePool<SampleVoiceFactory>,
    master_gain: f32,
    temp_buffer: Vec<f32>,
}

impl SfxEngine {
    pub fn new(bank: SfxBank, config: EngineConfig) -> Result<Self, PoolError> {
        Ok(Self {
            bank,
            pool: VoicePool::new(config.max_voices, SampleVoiceFactory)?,
            master_gain: config.master_gain,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        })
    }

    /// Start a clip at full gain. Returns false if the request was
    /// dropped (pool exhausted or unknown clip).
    pub fn trigger(&mut self, clip: ClipId) -> bool {
        self.trigger_with_gain(clip, 1.0)
    }

    /// Start a clip on an idle voice.
    ///
    /// Exhaustion is not an error: the request is dropped and logged,
    /// and the caller may retry later or simply lose the effect.
    pub fn trigger_with_gain(&mut self, clip: ClipId, gain: f32) -> bool {
        let clip_data = match self.bank.get(clip) {
            Some(c) => Arc::clone(c),
            None => {
                tracing::warn!(?clip, "trigger for unregistered clip");
                return false;
            }
        };

        match self.pool.acquire() {
            Some(voice) => {
                voice.start(clip_data, gain);
                true
            }
            None => {
                tracing::debug!(clip = %clip_data.name(), "voice pool exhausted, dropping trigger");
                false
            }
        }
    }

    /// Mix every busy voice into `out`.
    ///
    /// The output is overwritten, not accumulated into.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        out.fill(0.0);
        for voice in self.pool.iter_mut() {
            if voice.is_busy() {
                self.temp_buffer[..out.len()].fill(0.0);
                voice.render(&mut self.temp_buffer[..out.len()]);

                for (o, v) in out.iter_mut().zip(&self.temp_buffer) {
                    *o += v * self.master_gain;
                }
            }
        }
    }

    /// Stop every voice immediately. The pool keeps its voices; only
    /// their playback state is reset.
    pub fn stop_all(&mut self) {
        for voice in self.pool.iter_mut() {
            voice.stop();
        }
    }

    /// Drain queued commands and apply them, in queue order.
    ///
    /// Call once per block before rendering when the engine is fed
    /// from another thread.
    pub fn pump(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(msg) = rx.pop() {
            match msg {
                SfxMessage::Trigger { clip, gain } => {
                    self.trigger_with_gain(clip, gain);
                }
                SfxMessage::StopAll => self.stop_all(),
            }
        }
    }

    /// Number of voices currently playing.
    pub fn active_voices(&self) -> usize {
        self.pool.busy_count()
    }

    /// Number of voices created so far.
    pub fn voice_count(&self) -> usize {
        self.pool.len()
    }

    pub fn max_voices(&self) -> usize {
        self.pool.max_voices()
    }

    pub fn bank(&self) -> &SfxBank {
        &self.bank
    }
}
