//! Messages exchanged with the audio thread.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Fire-and-forget one-shot at a world location.
    PlayFxAt { id: String, x: f32, y: f32 },
    Shutdown,
}

/// Events sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxPlayed { id: String },
}
