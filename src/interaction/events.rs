//! Messages emitted by the interaction layer.
use bevy::prelude::Message;

/// Why the character was asked to wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveReason {
    /// The visitor pressed Enter on the entry overlay.
    Entry,
    /// The pointer rested on the character for the hover-hold duration.
    HoverHold,
}

/// Fired when the character should play its one-shot wave.
#[derive(Message, Debug, Clone, Copy)]
pub struct WaveRequested {
    pub reason: WaveReason,
}
