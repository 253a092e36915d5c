//! Cosmetic motion for the focus exercise area.
//!
//! Coordinates are percentages of the exercise area. The target starts in the
//! centre and wanders within [10, 90]; distractors wander within [5, 95].
//! Nothing here affects timing; the runner only calls [`MotionField::step`]
//! on the same ticks that decrement its sub-timer.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

pub const TARGET_BOUNDS: Bounds = Bounds { min: 10.0, max: 90.0 };
pub const DISTRACTOR_BOUNDS: Bounds = Bounds { min: 5.0, max: 95.0 };
pub const DISTRACTOR_COUNT: usize = 5;

const TARGET_MAX_STEP: f64 = 5.0;
const DISTRACTOR_MAX_STEP: f64 = 4.0;
const TARGET_START: Position = Position { x: 50.0, y: 50.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Position) -> bool {
        (self.min..=self.max).contains(&p.x) && (self.min..=self.max).contains(&p.y)
    }
}

/// Move `current` by `delta`, clamped into `bounds` on both axes.
pub fn next_position(current: Position, delta: (f64, f64), bounds: Bounds) -> Position {
    Position {
        x: bounds.clamp(current.x + delta.0),
        y: bounds.clamp(current.y + delta.1),
    }
}

/// Target plus distractors, driven by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct MotionField {
    rng: Mcg128Xsl64,
    target: Position,
    distractors: Vec<Position>,
}

impl MotionField {
    /// A `None` seed draws one from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Mcg128Xsl64::seed_from_u64(s),
            None => Mcg128Xsl64::from_entropy(),
        };
        let mut field = Self {
            rng,
            target: TARGET_START,
            distractors: Vec::with_capacity(DISTRACTOR_COUNT),
        };
        field.reset();
        field
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn distractors(&self) -> &[Position] {
        &self.distractors
    }

    /// Centre the target and scatter fresh distractors.
    pub fn reset(&mut self) {
        self.target = TARGET_START;
        let rng = &mut self.rng;
        self.distractors = (0..DISTRACTOR_COUNT)
            .map(|_| Position {
                x: rng.gen_range(TARGET_BOUNDS.min..TARGET_BOUNDS.max),
                y: rng.gen_range(TARGET_BOUNDS.min..TARGET_BOUNDS.max),
            })
            .collect();
    }

    pub fn step(&mut self) {
        let delta = self.jitter(TARGET_MAX_STEP);
        self.target = next_position(self.target, delta, TARGET_BOUNDS);
        for i in 0..self.distractors.len() {
            let delta = self.jitter(DISTRACTOR_MAX_STEP);
            self.distractors[i] = next_position(self.distractors[i], delta, DISTRACTOR_BOUNDS);
        }
    }

    fn jitter(&mut self, max: f64) -> (f64, f64) {
        (
            self.rng.gen_range(-max..max),
            self.rng.gen_range(-max..max),
        )
    }
}
