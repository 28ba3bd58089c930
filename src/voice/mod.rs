// Purpose: the capability surface the pool allocates against.
// The pool never sees inside a voice; it only asks "are you busy?"
// and creates new voices through a factory.

pub mod sample;

/// A single playback channel, either busy (playing) or idle.
///
/// Busy/idle is owned by the playback mechanism, not the pool: a voice
/// turns idle on its own when its sound finishes. The pool only reads
/// this flag at allocation time.
pub trait Voice {
    fn is_busy(&self) -> bool;
}

/// Factory for creating voices with a specific playback setup
///
/// This is the "channel design" layer - you configure what a voice is
/// once, then the pool uses this factory to create identical voices on
/// demand.
pub trait VoiceFactory: Send {
    type Voice: Voice;

    fn create_voice(&self) -> Self::Voice;
}

impl<F, T> VoiceFactory for F
where
    F: Fn() -> T + Send,
    T: Voice,
{
    type Voice = T;

    fn create_voice(&self) -> Self::Voice {
        self()
    }
}
