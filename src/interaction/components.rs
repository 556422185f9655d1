//! Shared interaction resources.
use bevy::prelude::*;

/// Closed until the visitor presses Enter on the entry overlay.
#[derive(Resource, Debug, Default)]
pub struct EntryGate {
    entered: bool,
}

impl EntryGate {
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Opens the gate. Returns false if it was already open.
    pub fn enter(&mut self) -> bool {
        !std::mem::replace(&mut self.entered, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_opens_once() {
        let mut gate = EntryGate::default();
        assert!(!gate.is_entered());
        assert!(gate.enter());
        assert!(!gate.enter());
        assert!(gate.is_entered());
    }
}
