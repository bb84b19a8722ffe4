//! The roll animation as an explicit state machine.
//!
//! A roll runs through `WindUp → Flickering → Settling → Decaying → Idle`.
//! Every transition hands back a [`Frame`] that tells the driver what to show
//! and how long to wait before calling [`RollSequencer::advance`] again. The
//! sequencer never touches the DOM or timers itself, which keeps it usable
//! from plain unit tests with a seeded RNG.

use crate::config::{
    DECAY_MS, FLICKER_MS, FLICKER_SPREAD, MAX_CUSTOM_SIDES, MIN_FLICKERS, MIN_SIDES,
    SETTLE_MS, SLOWDOWN_INCREMENT, SLOWDOWN_START, SLOWDOWN_STEPS, WIND_UP_MS,
};
use crate::presentation::{face_symbol, FaceSymbol};
use crate::RollError;
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Where the sequencer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    WindUp { total: u32 },
    Flickering { step: u32, total: u32 },
    Settling,
    /// Result is committed; only the cosmetic decay is still playing.
    Decaying,
}

/// Visual state of the animated die element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub scale: f64,
    pub rotation_deg: f64,
}

impl Pose {
    pub const REST: Pose = Pose {
        opacity: 1.0,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    /// CSS `transform` value for this pose.
    pub fn css_transform(&self) -> String {
        format!("scale({:.3}) rotate({:.1}deg)", self.scale, self.rotation_deg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    EaseInOut,
    EaseOut,
    /// Overshooting curve used for the final bounce.
    Elastic,
}

impl Easing {
    pub fn css(&self) -> &'static str {
        match self {
            Easing::EaseInOut => "ease-in-out",
            Easing::EaseOut => "ease-out",
            Easing::Elastic => "cubic-bezier(0.34, 1.56, 0.64, 1)",
        }
    }
}

/// One step of the roll animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Phase the sequencer entered when producing this frame.
    pub phase: Phase,
    /// Pose to jump to before transitioning; `None` continues from the current one.
    pub from: Option<Pose>,
    pub pose: Pose,
    pub easing: Easing,
    pub duration_ms: u32,
    /// Face drawn for this frame, if any.
    pub face: Option<u32>,
    pub symbol: Option<FaceSymbol>,
}

impl Frame {
    /// The committed result, present only on the frame that ends the roll.
    pub fn committed(&self) -> Option<u32> {
        match self.phase {
            Phase::Decaying => self.face,
            _ => None,
        }
    }
}

/// Drives a single die through its roll animation.
///
/// Each `start` issues a new ticket; `advance` with a stale ticket is a
/// no-op, so a driver left over from an earlier roll (for instance one still
/// waiting out the decay) cannot step a newer sequence.
#[derive(Debug, Clone)]
pub struct RollSequencer {
    phase: Phase,
    sides: u32,
    faces: Option<Uniform<u32>>,
    ticket: u64,
}

impl Default for RollSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            sides: 0,
            faces: None,
            ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// True while the result is still undecided.
    pub fn is_rolling(&self) -> bool {
        matches!(
            self.phase,
            Phase::WindUp { .. } | Phase::Flickering { .. } | Phase::Settling
        )
    }

    /// Begin a roll of a `sides`-sided die and return the wind-up frame.
    pub fn start<R: Rng + ?Sized>(&mut self, sides: u32, rng: &mut R) -> Result<Frame, RollError> {
        if self.is_rolling() {
            return Err(RollError::AlreadyRolling);
        }
        if !(MIN_SIDES..=MAX_CUSTOM_SIDES).contains(&sides) {
            return Err(RollError::InvalidSides(sides));
        }
        let faces = Uniform::new_inclusive(1, sides).map_err(|_| RollError::InvalidSides(sides))?;

        let total = flicker_count(rng);
        self.sides = sides;
        self.faces = Some(faces);
        self.ticket = self.ticket.wrapping_add(1);
        self.phase = Phase::WindUp { total };
        debug!("Roll #{} of D{} starts with {} flickers", self.ticket, sides, total);

        Ok(Frame {
            phase: self.phase,
            from: Some(Pose::REST),
            pose: Pose {
                opacity: 1.0,
                scale: 1.2,
                rotation_deg: rng.random_range(-15.0..=15.0),
            },
            easing: Easing::EaseInOut,
            duration_ms: WIND_UP_MS,
            face: None,
            symbol: None,
        })
    }

    /// Move to the next phase once the previous frame has finished playing.
    ///
    /// Returns `None` when the sequence is over or `ticket` is stale.
    pub fn advance<R: Rng + ?Sized>(&mut self, ticket: u64, rng: &mut R) -> Option<Frame> {
        if ticket != self.ticket {
            return None;
        }
        let faces = self.faces.clone()?;

        let next = match self.phase {
            Phase::Idle => return None,
            Phase::WindUp { total } => Phase::Flickering { step: 0, total },
            Phase::Flickering { step, total } if step + 1 < total => Phase::Flickering {
                step: step + 1,
                total,
            },
            Phase::Flickering { .. } => Phase::Settling,
            Phase::Settling => Phase::Decaying,
            Phase::Decaying => {
                self.phase = Phase::Idle;
                self.faces = None;
                return None;
            }
        };
        self.phase = next;

        let frame = match next {
            Phase::Flickering { step, total } => {
                let face = faces.sample(rng);
                Frame {
                    phase: next,
                    from: None,
                    pose: Pose {
                        opacity: rng.random_range(0.6..1.0),
                        scale: rng.random_range(1.0..1.3),
                        rotation_deg: rng.random_range(-30.0..=30.0),
                    },
                    easing: Easing::EaseInOut,
                    duration_ms: flicker_duration_ms(step, total).round() as u32,
                    face: Some(face),
                    symbol: Some(face_symbol(face, self.sides)),
                }
            }
            Phase::Settling => Frame {
                phase: next,
                from: None,
                pose: Pose::REST,
                easing: Easing::EaseOut,
                duration_ms: SETTLE_MS,
                face: None,
                symbol: None,
            },
            _ => {
                // The commit draw is fresh; flicker faces are never reused.
                let face = faces.sample(rng);
                debug!("Roll #{} of D{} committed {}", self.ticket, self.sides, face);
                Frame {
                    phase: next,
                    from: Some(Pose {
                        opacity: 0.6,
                        scale: 1.6,
                        rotation_deg: 0.0,
                    }),
                    pose: Pose::REST,
                    easing: Easing::Elastic,
                    duration_ms: DECAY_MS,
                    face: Some(face),
                    symbol: Some(face_symbol(face, self.sides)),
                }
            }
        };
        Some(frame)
    }

    /// Abandon the current sequence without producing a result.
    ///
    /// Nothing in the UI calls this yet; it invalidates the running driver's
    /// ticket so the next `advance` ends the loop.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Idle {
            debug!("Roll #{} cancelled in {:?}", self.ticket, self.phase);
        }
        self.phase = Phase::Idle;
        self.faces = None;
        self.ticket = self.ticket.wrapping_add(1);
    }
}

/// Number of flicker steps for one roll, uniform in `15..=24`.
pub fn flicker_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    MIN_FLICKERS + rng.random_range(0..FLICKER_SPREAD)
}

/// Duration of flicker `step` out of `total`.
///
/// The last five steps are stretched by 1.5, 1.7, 1.9, 2.1 and 2.3 so the die
/// appears to settle.
pub fn flicker_duration_ms(step: u32, total: u32) -> f64 {
    let slow_from = total.saturating_sub(SLOWDOWN_STEPS);
    if step >= slow_from {
        FLICKER_MS * (SLOWDOWN_START + f64::from(step - slow_from) * SLOWDOWN_INCREMENT)
    } else {
        FLICKER_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_to_end(seq: &mut RollSequencer, sides: u32, rng: &mut StdRng) -> Vec<Frame> {
        let mut frames = vec![seq.start(sides, rng).unwrap()];
        let ticket = seq.ticket();
        while let Some(frame) = seq.advance(ticket, rng) {
            frames.push(frame);
        }
        frames
    }

    fn chi_square(counts: &[u64]) -> f64 {
        let total: u64 = counts.iter().sum();
        let expected = total as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum()
    }

    #[test]
    fn sequence_runs_through_every_phase() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seq = RollSequencer::new();
        let frames = run_to_end(&mut seq, 6, &mut rng);

        assert!(matches!(frames[0].phase, Phase::WindUp { .. }));
        let flickers = frames
            .iter()
            .filter(|f| matches!(f.phase, Phase::Flickering { .. }))
            .count();
        assert!((15..=24).contains(&flickers), "got {} flickers", flickers);
        assert_eq!(frames[frames.len() - 2].phase, Phase::Settling);
        let last = frames.last().unwrap();
        assert_eq!(last.phase, Phase::Decaying);
        assert!((1..=6).contains(&last.committed().unwrap()));
        assert_eq!(seq.phase(), Phase::Idle);
        assert!(!seq.is_rolling());
    }

    #[test]
    fn only_the_final_frame_commits() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seq = RollSequencer::new();
        let frames = run_to_end(&mut seq, 20, &mut rng);
        let committed: Vec<u32> = frames.iter().filter_map(Frame::committed).collect();
        assert_eq!(committed.len(), 1);
        assert_eq!(frames.last().unwrap().symbol, Some(FaceSymbol::Numeral(committed[0])));
    }

    #[test]
    fn flicker_faces_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seq = RollSequencer::new();
        for sides in [2, 3, 12, 100] {
            for frame in run_to_end(&mut seq, sides, &mut rng) {
                if let Some(face) = frame.face {
                    assert!((1..=sides).contains(&face));
                }
            }
        }
    }

    #[test]
    fn flicker_count_covers_its_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 10];
        for _ in 0..2_000 {
            let n = flicker_count(&mut rng);
            assert!((15..=24).contains(&n));
            seen[(n - 15) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn last_five_flickers_slow_down() {
        let total = 20;
        for step in 0..15 {
            assert_eq!(flicker_duration_ms(step, total), 75.0);
        }
        let slowed: Vec<f64> = (15..20).map(|s| flicker_duration_ms(s, total)).collect();
        let factors = [1.5, 1.7, 1.9, 2.1, 2.3];
        for (ms, factor) in slowed.iter().zip(factors) {
            assert!((ms - 75.0 * factor).abs() < 1e-9);
        }
        assert!(slowed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn start_while_rolling_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seq = RollSequencer::new();
        seq.start(6, &mut rng).unwrap();
        assert!(matches!(seq.start(6, &mut rng), Err(RollError::AlreadyRolling)));
    }

    #[test]
    fn invalid_side_counts_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seq = RollSequencer::new();
        assert!(matches!(seq.start(1, &mut rng), Err(RollError::InvalidSides(1))));
        assert!(matches!(seq.start(101, &mut rng), Err(RollError::InvalidSides(101))));
        assert_eq!(seq.phase(), Phase::Idle);
    }

    #[test]
    fn cancel_stops_the_running_driver() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seq = RollSequencer::new();
        seq.start(6, &mut rng).unwrap();
        let ticket = seq.ticket();
        seq.advance(ticket, &mut rng).unwrap();
        seq.cancel();
        assert_eq!(seq.phase(), Phase::Idle);
        assert!(seq.advance(ticket, &mut rng).is_none());
        assert!(seq.advance(seq.ticket(), &mut rng).is_none());
    }

    #[test]
    fn new_roll_during_decay_invalidates_old_ticket() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut seq = RollSequencer::new();
        seq.start(6, &mut rng).unwrap();
        let old = seq.ticket();
        while seq.phase() != Phase::Decaying {
            seq.advance(old, &mut rng).unwrap();
        }
        assert!(!seq.is_rolling());

        seq.start(6, &mut rng).unwrap();
        assert!(seq.advance(old, &mut rng).is_none());
        assert!(matches!(seq.phase(), Phase::WindUp { .. }));
    }

    #[test]
    fn draws_are_uniform_on_a_d6() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seq = RollSequencer::new();
        let mut flicker_counts = [0u64; 6];
        let mut commit_counts = [0u64; 6];

        for _ in 0..6_000 {
            for frame in run_to_end(&mut seq, 6, &mut rng) {
                match (frame.committed(), frame.face) {
                    (Some(face), _) => commit_counts[(face - 1) as usize] += 1,
                    (None, Some(face)) => flicker_counts[(face - 1) as usize] += 1,
                    _ => {}
                }
            }
        }

        // Critical value for 5 degrees of freedom at p = 0.0001 is about 25.7.
        assert!(chi_square(&flicker_counts) < 25.7, "{:?}", flicker_counts);
        assert!(chi_square(&commit_counts) < 25.7, "{:?}", commit_counts);
    }

    #[test]
    fn commit_is_not_the_last_flicker() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut seq = RollSequencer::new();
        let rolls = 6_000;
        let mut matches = 0;

        for _ in 0..rolls {
            let frames = run_to_end(&mut seq, 6, &mut rng);
            let last_flicker = frames
                .iter()
                .rev()
                .find(|f| matches!(f.phase, Phase::Flickering { .. }))
                .and_then(|f| f.face);
            let commit = frames.last().and_then(Frame::committed);
            if last_flicker == commit {
                matches += 1;
            }
        }

        // Independent draws agree about one time in six (~1000 of 6000).
        assert!((800..1200).contains(&matches), "matches = {}", matches);
    }

    #[test]
    fn pose_renders_as_css_transform() {
        let pose = Pose {
            opacity: 0.8,
            scale: 1.25,
            rotation_deg: -12.34,
        };
        assert_eq!(pose.css_transform(), "scale(1.250) rotate(-12.3deg)");
        assert_eq!(Pose::REST.css_transform(), "scale(1.000) rotate(0.0deg)");
    }
}
