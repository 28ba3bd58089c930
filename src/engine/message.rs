#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::bank::ClipId;

#[derive(Debug, Copy, Clone)]
pub enum SfxMessage {
    Trigger { clip: ClipId, gain: f32 },
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SfxMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SfxMessage> {
    fn pop(&mut self) -> Option<SfxMessage> {
        Consumer::pop(self).ok()
    }
}
