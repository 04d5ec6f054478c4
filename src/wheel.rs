//! Wheel spin state machine and winning-segment resolution.
//!
//! The geometry lives in free functions so the rotation-to-index mapping is
//! pure and reproducible; randomness enters only in [`Wheel::begin_spin`]
//! (spin count and duration) and at the caller boundary (the target angle).

use log::debug;
use rand::Rng;

use crate::{defaults, Entry, EntryKind};

/// Angular width in degrees of one wheel segment.
pub fn segment_angle(len: usize) -> f64 {
    if len == 0 {
        360.0
    } else {
        360.0 / len as f64
    }
}

/// Reproject the fixed top pointer into the wheel's rotated frame.
///
/// Segments are laid out from −90° (12 o'clock in a 0°-at-3-o'clock
/// coordinate system), so the same offset is corrected for here.
pub fn pointer_angle(rotation: f64) -> f64 {
    let angle = (360.0 - rotation.rem_euclid(360.0) + 90.0).rem_euclid(360.0);
    // rem_euclid on floats can round up to exactly the modulus
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Index of the entry under the pointer once the wheel rests at `rotation`.
pub fn winning_index(rotation: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (pointer_angle(rotation) / segment_angle(len)).floor() as usize;
    Some(index % len)
}

/// Cumulative rotation a spin must end at for the given target angle.
pub fn final_rotation(current: f64, spin_count: f64, target_angle: f64) -> f64 {
    current + spin_count * 360.0 + target_angle
}

/// Everything the animation layer needs to run one spin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub final_rotation: f64,
    pub duration_ms: u32,
}

/// Result of one completed spin. Ephemeral: the next spin overwrites it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpinOutcome {
    pub entry: Entry,
    /// Resting angle normalized to `[0, 360)`.
    pub final_angle: f64,
}

/// One wheel's state: entry list, cumulative rotation, and spin status.
///
/// The rotation is never normalized or reset. Keeping the unbounded value
/// means every spin animates forward in the same sense, and the delta math
/// stays consistent even when the entry list is replaced between spins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wheel {
    entries: Vec<Entry>,
    rotation: f64,
    spinning: bool,
    last_outcome: Option<SpinOutcome>,
}

impl Wheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Replace the entry list wholesale. The cumulative rotation is retained
    /// so the next spin still resolves correctly against the new segment
    /// count.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.last_outcome = None;
    }

    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.last_outcome = None;
    }

    /// Start a spin toward `target_angle` degrees.
    ///
    /// Returns `None` without touching any state when the wheel has no
    /// entries or a spin is already in flight; the trigger is gated by the
    /// UI, so the guard never raises.
    pub fn begin_spin(&mut self, target_angle: f64) -> Option<SpinPlan> {
        if self.spinning || self.entries.is_empty() {
            return None;
        }

        let mut rng = rand::rng();
        let spin_count = rng.random_range(defaults::MIN_SPINS..defaults::MAX_SPINS);
        let duration_secs = rng.random_range(defaults::MIN_SPIN_SECS..defaults::MAX_SPIN_SECS);

        self.spinning = true;
        self.last_outcome = None;

        Some(SpinPlan {
            final_rotation: final_rotation(self.rotation, spin_count, target_angle),
            duration_ms: (duration_secs * 1000.0) as u32,
        })
    }

    /// Land the wheel at the plan's rotation and resolve the winning entry.
    ///
    /// Returns `None` only if the entry list was emptied while the spin was
    /// in flight; the spinning flag and rotation are persisted either way.
    pub fn complete_spin(&mut self, plan: &SpinPlan) -> Option<SpinOutcome> {
        self.spinning = false;
        self.rotation = plan.final_rotation;

        let index = winning_index(self.rotation, self.entries.len())?;
        let outcome = SpinOutcome {
            entry: self.entries[index].clone(),
            final_angle: self.rotation.rem_euclid(360.0),
        };
        debug!("Wheel stopped on segment {} ({})", index, outcome.entry.name);
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }
}

/// Accumulates the two independent wheel results into one draw.
///
/// Completions may arrive in either order; merging never overwrites a side
/// that has already resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawOutcome {
    pub participant: Option<Entry>,
    pub prize: Option<Entry>,
}

impl DrawOutcome {
    /// Pure merge of one wheel's result into the accumulator.
    pub fn merged(&self, kind: EntryKind, entry: Entry) -> Self {
        let mut next = self.clone();
        let side = match kind {
            EntryKind::Participants => &mut next.participant,
            EntryKind::Prizes => &mut next.prize,
        };
        if side.is_none() {
            *side = Some(entry);
        }
        next
    }

    pub fn is_complete(&self) -> bool {
        self.participant.is_some() && self.prize.is_some()
    }

    pub fn pair(&self) -> Option<(&Entry, &Entry)> {
        match (&self.participant, &self.prize) {
            (Some(participant), Some(prize)) => Some((participant, prize)),
            _ => None,
        }
    }
}
