pub mod bank; // Clip storage and lookup
pub mod engine; // Sound-effect triggering and mixing
pub mod pool; // Bounded voice allocation
pub mod voice; // Voice capability traits and the sample voice

pub use bank::{Clip, ClipId, SfxBank};
pub use engine::{EngineConfig, SfxEngine, SfxMessage};
pub use pool::{PoolError, VoicePool};
pub use voice::{sample::SampleVoice, Voice, VoiceFactory};

pub const MAX_BLOCK_SIZE: usize = 2048;
