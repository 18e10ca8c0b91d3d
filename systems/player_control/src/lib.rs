#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that converts per-frame input snapshots into command batches.
//!
//! Rendered frames and fixed simulation steps run on different cadences: a
//! slow frame drains several steps, a fast frame may drain none. Held
//! movement flags can simply be resampled, but an edge-triggered attack
//! press observed on a frame that runs zero steps would be lost. The system
//! therefore latches attack presses and releases them with the next step's
//! command batch.

use room_crawl_core::{Command, MovementIntent};

/// Input observed by an adapter during a single rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlFrame {
    /// Movement flags held while the frame was gathered.
    pub intent: MovementIntent,
    /// Whether an attack press edge was observed during the frame.
    pub attack_pressed: bool,
}

impl ControlFrame {
    /// Creates a control frame from the captured flags.
    #[must_use]
    pub const fn new(intent: MovementIntent, attack_pressed: bool) -> Self {
        Self {
            intent,
            attack_pressed,
        }
    }
}

/// Pure system that latches frame input and emits per-step command batches.
#[derive(Debug, Default)]
pub struct PlayerControl {
    intent: MovementIntent,
    attack_latched: bool,
}

impl PlayerControl {
    /// Creates a new player control system with no latched input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the input observed during a rendered frame.
    pub fn register_frame(&mut self, frame: ControlFrame) {
        self.intent = frame.intent;
        if frame.attack_pressed {
            self.attack_latched = true;
        }
    }

    /// Emits the command batch for one fixed step.
    ///
    /// The latch clears when consumed, so a single press fires exactly once
    /// regardless of how many steps the surrounding frame drains.
    pub fn emit_step_commands(&mut self, out: &mut Vec<Command>) {
        out.push(Command::SetMovementIntent {
            intent: self.intent,
        });

        if self.attack_latched {
            self.attack_latched = false;
            out.push(Command::PressAttack);
        }
    }
}
