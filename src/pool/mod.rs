//! Bounded voice pool.
//!
//! The pool hands out an idle voice per request, creating voices
//! lazily up to a hard cap. Voices are permanently retained and reused;
//! the pool never shrinks. When every voice is busy and the cap is
//! reached, [`VoicePool::acquire`] returns `None` - exhaustion is a
//! normal outcome (drop the sound, or queue it yourself), not an error.
//!
//! The pool never changes a voice's state. A voice turns idle again
//! only because its own playback finishes; the pool just reads
//! [`Voice::is_busy`](crate::voice::Voice::is_busy) at allocation time.
//!
//! Allocation is a synchronous scan-then-grow over `&mut self`, so the
//! exclusive borrow is the critical section. A multi-threaded host
//! wraps the pool in a `Mutex`; two lock-free callers could otherwise
//! both see "no idle voice, not at cap" and grow past the cap.

use thiserror::Error;

use crate::voice::{Voice, VoiceFactory};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("max_voices must be at least 1, got {0}")]
    InvalidMaxVoices(usize),
}

/// A bounded, append-only pool of playback voices.
///
/// Voices are stored in creation order and scanned in creation order,
/// so allocation is deterministic for a given sequence of busy/idle
/// states.
pub struct VoicePool<F: VoiceFactory> {
    voices: Vec<F::Voice>,
    max_voices: usize,
    factory: F,
}

impl<F: VoiceFactory> VoicePool<F> {
    /// Create an empty pool with a hard cap and a voice factory.
    ///
    /// The cap must be at least 1; a zero-capacity pool could never
    /// satisfy any request.
    pub fn new(max_voices: usize, factory: F) -> Result<Self, PoolError> {
        if max_voices == 0 {
            return Err(PoolError::InvalidMaxVoices(max_voices));
        }

        Ok(Self {
            voices: Vec::with_capacity(max_voices),
            max_voices,
            factory,
        })
    }

    /// Find or create an idle voice.
    ///
    /// Returns the earliest-created idle voice if one exists. Otherwise
    /// grows the pool by one, up to the cap. Returns `None` when every
    /// voice is busy and the pool is full. The very first call always
    /// returns a voice: an empty scan finds nothing and growth is
    /// always permitted below the cap.
    pub fn acquire(&mut self) -> Option<&mut F::Voice> {
        // First pass: earliest idle voice wins
        if let Some(idx) = self.voices.iter().position(|v| !v.is_busy()) {
            return Some(&mut self.voices[idx]);
        }

        // All busy: permanently grow by one until the cap
        if self.voices.len() < self.max_voices {
            self.voices.push(self.factory.create_voice());
            return self.voices.last_mut();
        }

        None
    }

    /// Number of voices created so far. Never exceeds the cap.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// The configured hard cap.
    pub fn max_voices(&self) -> usize {
        self.max_voices
    }

    /// Number of voices currently reporting busy.
    pub fn busy_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_busy()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F::Voice> {
        self.voices.iter()
    }

    /// Mutable iteration, in creation order. Used by callers that
    /// drive playback on every busy voice (mixing, stop-all).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut F::Voice> {
        self.voices.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Test voice whose busy flag is flipped from outside the pool,
    /// standing in for playback that finishes on its own.
    struct TestVoice {
        id: usize,
        busy: Arc<AtomicBool>,
    }

    impl Voice for TestVoice {
        fn is_busy(&self) -> bool {
            self.busy.load(Ordering::Relaxed)
        }
    }

    /// Factory that records a handle to every busy flag it hands out,
    /// so tests can mark voices busy/idle after allocation.
    fn tracking_factory() -> (
        impl Fn() -> TestVoice + Send,
        Arc<Mutex<Vec<Arc<AtomicBool>>>>,
    ) {
        let flags: Arc<Mutex<Vec<Arc<AtomicBool>>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&flags);

        let factory = move || {
            let mut flags = recorder.lock().unwrap();
            let busy = Arc::new(AtomicBool::new(false));
            flags.push(Arc::clone(&busy));
            TestVoice {
                id: flags.len() - 1,
                busy,
            }
        };

        (factory, flags)
    }

    fn mark_busy(flags: &Arc<Mutex<Vec<Arc<AtomicBool>>>>, id: usize, busy: bool) {
        flags.lock().unwrap()[id].store(busy, Ordering::Relaxed);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let (factory, flags) = tracking_factory();
        let result = VoicePool::new(0, factory);

        assert_eq!(result.err(), Some(PoolError::InvalidMaxVoices(0)));
        assert!(flags.lock().unwrap().is_empty(), "no voice may be created");
    }

    #[test]
    fn first_acquire_always_returns_a_voice() {
        for cap in 1..=4 {
            let (factory, _flags) = tracking_factory();
            let mut pool = VoicePool::new(cap, factory).unwrap();

            assert!(pool.acquire().is_some());
            assert_eq!(pool.len(), 1);
        }
    }

    #[test]
    fn idle_voice_is_reused_without_growth() {
        let (factory, _flags) = tracking_factory();
        let mut pool = VoicePool::new(4, factory).unwrap();

        pool.acquire().unwrap();
        assert_eq!(pool.len(), 1);

        // Voice 0 is still idle, so repeated acquires keep returning it
        for _ in 0..5 {
            let voice = pool.acquire().unwrap();
            assert_eq!(voice.id, 0);
        }
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn all_busy_below_cap_grows_by_one() {
        let (factory, flags) = tracking_factory();
        let mut pool = VoicePool::new(3, factory).unwrap();

        pool.acquire().unwrap();
        mark_busy(&flags, 0, true);

        let voice = pool.acquire().unwrap();
        assert_eq!(voice.id, 1, "a fresh voice, not the busy one");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn all_busy_at_cap_reports_exhaustion() {
        let (factory, flags) = tracking_factory();
        let mut pool = VoicePool::new(2, factory).unwrap();

        for id in 0..2 {
            pool.acquire().unwrap();
            mark_busy(&flags, id, true);
        }

        assert!(pool.acquire().is_none());
        assert_eq!(pool.len(), 2, "exhaustion must not grow the pool");
    }

    #[test]
    fn earliest_idle_voice_wins() {
        let (factory, flags) = tracking_factory();
        let mut pool = VoicePool::new(4, factory).unwrap();

        for id in 0..3 {
            pool.acquire().unwrap();
            mark_busy(&flags, id, true);
        }

        // Free voices 1 and 2; the scan must pick 1, the older one
        mark_busy(&flags, 1, false);
        mark_busy(&flags, 2, false);

        let voice = pool.acquire().unwrap();
        assert_eq!(voice.id, 1);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn pool_size_never_exceeds_cap() {
        let (factory, flags) = tracking_factory();
        let mut pool = VoicePool::new(5, factory).unwrap();

        for _ in 0..20 {
            if let Some(voice) = pool.acquire() {
                let id = voice.id;
                mark_busy(&flags, id, true);
            }
            assert!(pool.len() <= pool.max_voices());
        }
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.busy_count(), 5);
    }

    #[test]
    fn round_trip_at_cap_two() {
        let (factory, flags) = tracking_factory();
        let mut pool = VoicePool::new(2, factory).unwrap();

        let v1 = pool.acquire().unwrap().id;
        mark_busy(&flags, v1, true);

        let v2 = pool.acquire().unwrap().id;
        assert_ne!(v2, v1);
        mark_busy(&flags, v2, true);

        assert!(pool.acquire().is_none());
        assert_eq!(pool.len(), 2);

        // V1 finishes playing; the next request gets it back
        mark_busy(&flags, v1, false);
        let reused = pool.acquire().unwrap().id;
        assert_eq!(reused, v1);
        assert_eq!(pool.len(), 2);
    }
}
