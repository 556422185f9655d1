//! Wave cue phase machine.
//!
//! The cue is advanced by frame time and emits the cross-fade commands the
//! animation player should apply. A trigger while a wave is in flight is ignored.
use std::time::Duration;

/// Where the cue is in its idle → wave → idle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuePhase {
    Idle,
    ToWave,
    Waving,
    ToIdle,
}

/// Cross-fade requested by the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueCommand {
    /// Fade idle out and play the wave from its first frame.
    PlayWave { fade: Duration },
    /// Fade the wave out and resume the idle loop.
    ReturnToIdle { fade: Duration },
}

#[derive(Debug, Clone)]
pub struct WaveCue {
    phase: CuePhase,
    elapsed: f32,
    clip_duration: f32,
    fade_in: f32,
    fade_out: f32,
}

impl WaveCue {
    pub fn new(clip_duration: f32, fade_in: f32, fade_out: f32) -> Self {
        Self {
            phase: CuePhase::Idle,
            elapsed: 0.0,
            clip_duration: clip_duration.max(0.0),
            fade_in: fade_in.max(0.0),
            fade_out: fade_out.max(0.0),
        }
    }

    pub fn phase(&self) -> CuePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != CuePhase::Idle
    }

    /// Seconds into the wave at which the fade back to idle starts.
    pub fn return_at(&self) -> f32 {
        (self.clip_duration - self.fade_out).max(0.0)
    }

    pub fn trigger(&mut self) -> Option<CueCommand> {
        if self.is_active() {
            return None;
        }
        self.phase = CuePhase::ToWave;
        self.elapsed = 0.0;
        Some(CueCommand::PlayWave {
            fade: Duration::from_secs_f32(self.fade_in),
        })
    }

    pub fn tick(&mut self, delta_seconds: f32) -> Option<CueCommand> {
        if self.phase == CuePhase::Idle {
            return None;
        }
        self.elapsed += delta_seconds.max(0.0);

        if self.phase == CuePhase::ToWave && self.elapsed >= self.fade_in {
            self.phase = CuePhase::Waving;
        }

        match self.phase {
            CuePhase::ToWave | CuePhase::Waving if self.elapsed >= self.return_at() => {
                self.phase = CuePhase::ToIdle;
                Some(CueCommand::ReturnToIdle {
                    fade: Duration::from_secs_f32(self.fade_out),
                })
            }
            CuePhase::ToIdle if self.elapsed >= self.return_at() + self.fade_out => {
                self.phase = CuePhase::Idle;
                self.elapsed = 0.0;
                None
            }
            _ => None,
        }
    }
}
