use log::{debug, info};
use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod presentation;
pub mod sequencer;

use config::{DEFAULT_CUSTOM_SIDES, DEFAULT_SIDES, MAX_CUSTOM_SIDES, MIN_SIDES};
use presentation::{face_symbol, idle_symbol, label_for_face, FaceSymbol};

/// The die the user picked from the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieSelection {
    D2,
    D3,
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    Custom,
}

impl DieSelection {
    /// Selector order.
    pub const ALL: [DieSelection; 9] = [
        DieSelection::D2,
        DieSelection::D3,
        DieSelection::D4,
        DieSelection::D6,
        DieSelection::D8,
        DieSelection::D10,
        DieSelection::D12,
        DieSelection::D20,
        DieSelection::Custom,
    ];

    /// Side count of a fixed die, `None` for custom.
    pub fn sides(&self) -> Option<u32> {
        match self {
            DieSelection::D2 => Some(2),
            DieSelection::D3 => Some(3),
            DieSelection::D4 => Some(4),
            DieSelection::D6 => Some(6),
            DieSelection::D8 => Some(8),
            DieSelection::D10 => Some(10),
            DieSelection::D12 => Some(12),
            DieSelection::D20 => Some(20),
            DieSelection::Custom => None,
        }
    }

    /// Value used for the `<option>` element.
    pub fn key(&self) -> &'static str {
        match self {
            DieSelection::D2 => "2",
            DieSelection::D3 => "3",
            DieSelection::D4 => "4",
            DieSelection::D6 => "6",
            DieSelection::D8 => "8",
            DieSelection::D10 => "10",
            DieSelection::D12 => "12",
            DieSelection::D20 => "20",
            DieSelection::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DieSelection::D2 => "D2",
            DieSelection::D3 => "D3",
            DieSelection::D4 => "D4",
            DieSelection::D6 => "D6",
            DieSelection::D8 => "D8",
            DieSelection::D10 => "D10",
            DieSelection::D12 => "D12",
            DieSelection::D20 => "D20",
            DieSelection::Custom => "Custom",
        }
    }
}

impl FromStr for DieSelection {
    type Err = ParseDieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DieSelection::ALL
            .iter()
            .copied()
            .find(|die| die.key() == s.trim())
            .ok_or_else(|| ParseDieError(s.to_string()))
    }
}

/// Unknown selector value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDieError(pub String);

impl fmt::Display for ParseDieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown die type: {:?}", self.0)
    }
}

impl std::error::Error for ParseDieError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    AlreadyRolling,
    InvalidSides(u32),
    /// The element the animation plays on is not in the document.
    TargetMissing,
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollError::AlreadyRolling => write!(f, "A roll is already in progress"),
            RollError::InvalidSides(sides) => write!(
                f,
                "Cannot roll a die with {} sides (allowed: {}-{})",
                sides, MIN_SIDES, MAX_CUSTOM_SIDES
            ),
            RollError::TargetMissing => write!(f, "Animated die element not found"),
        }
    }
}

impl std::error::Error for RollError {}

/// What happened to a custom side count entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomSidesOutcome {
    Applied(u32),
    /// Input was above the maximum and was clamped.
    Capped { requested: i64 },
    /// Input was cleared; the side count fell back to the minimum.
    Reset,
    /// Input was below the minimum; nothing changed.
    Rejected { requested: i64 },
    /// A roll is in progress; nothing changed.
    Locked,
}

impl CustomSidesOutcome {
    /// Message to surface to the user, if any.
    pub fn warning(&self) -> Option<String> {
        match self {
            CustomSidesOutcome::Capped { .. } => Some(format!(
                "Maximum custom sides is {}. Input capped.",
                MAX_CUSTOM_SIDES
            )),
            _ => None,
        }
    }
}

/// Number of sides actually in play for a selection.
#[inline]
pub fn effective_sides(selection: DieSelection, custom_sides: u32) -> u32 {
    selection
        .sides()
        .unwrap_or_else(|| custom_sides.clamp(MIN_SIDES, MAX_CUSTOM_SIDES))
}

/// Pad with empty labels or truncate so there is exactly one label per face.
#[inline]
pub fn resize_labels(labels: &mut Vec<String>, sides: u32) {
    labels.resize(sides as usize, String::new());
}

/// Everything the widget remembers between events.
///
/// Configuration changes go through the methods below so the label list and
/// the result can never disagree with the side count. While a roll is in
/// flight the configuration is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionState {
    selection: DieSelection,
    custom_sides: u32,
    labels: Vec<String>,
    result: Option<u32>,
    display: FaceSymbol,
    rolling: bool,
}

impl Default for DecisionState {
    fn default() -> Self {
        Self {
            selection: DieSelection::D6,
            custom_sides: DEFAULT_CUSTOM_SIDES,
            labels: vec![String::new(); DEFAULT_SIDES as usize],
            result: None,
            display: idle_symbol(DEFAULT_SIDES),
            rolling: false,
        }
    }
}

impl DecisionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> DieSelection {
        self.selection
    }

    pub fn custom_sides(&self) -> u32 {
        self.custom_sides
    }

    pub fn effective_sides(&self) -> u32 {
        effective_sides(self.selection, self.custom_sides)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn result(&self) -> Option<u32> {
        self.result
    }

    pub fn display(&self) -> FaceSymbol {
        self.display
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    /// Label of the committed face, when it has visible text.
    pub fn decision(&self) -> Option<&str> {
        label_for_face(&self.labels, self.result?)
    }

    /// Switch die type. Returns `false` if the change was refused because a
    /// roll is running.
    pub fn select_die(&mut self, selection: DieSelection) -> bool {
        if self.rolling {
            debug!("Ignoring die change to {} during a roll", selection.label());
            return false;
        }
        let previous = self.effective_sides();
        self.selection = selection;
        self.sync_sides(previous);
        true
    }

    /// Apply a value from the custom side input. `None` means the field was
    /// cleared.
    pub fn set_custom_sides(&mut self, value: Option<i64>) -> CustomSidesOutcome {
        if self.rolling {
            return CustomSidesOutcome::Locked;
        }
        let (sides, outcome) = match value {
            None => (MIN_SIDES, CustomSidesOutcome::Reset),
            Some(v) if v < i64::from(MIN_SIDES) => {
                debug!("Custom side count {} is below the minimum, ignoring", v);
                return CustomSidesOutcome::Rejected { requested: v };
            }
            Some(v) if v > i64::from(MAX_CUSTOM_SIDES) => {
                (MAX_CUSTOM_SIDES, CustomSidesOutcome::Capped { requested: v })
            }
            // In range, so the cast cannot truncate.
            Some(v) => (v as u32, CustomSidesOutcome::Applied(v as u32)),
        };

        let previous = self.effective_sides();
        self.custom_sides = sides;
        self.selection = DieSelection::Custom;
        self.sync_sides(previous);
        outcome
    }

    /// Replace the label of face `index + 1`.
    ///
    /// # Panics
    /// Panics if `index` is not below the current side count.
    pub fn set_label(&mut self, index: usize, text: String) {
        assert!(
            index < self.labels.len(),
            "label index {} out of range for {} faces",
            index,
            self.labels.len()
        );
        if self.rolling {
            return;
        }
        self.labels[index] = text;
    }

    /// Mark a roll as started and return the side count to roll with.
    pub fn begin_roll(&mut self) -> Result<u32, RollError> {
        if self.rolling {
            return Err(RollError::AlreadyRolling);
        }
        self.rolling = true;
        self.result = None;
        Ok(self.effective_sides())
    }

    /// Show a transient face while the die flickers.
    pub fn show_symbol(&mut self, symbol: FaceSymbol) {
        self.display = symbol;
    }

    /// Record the final face and unlock the configuration.
    pub fn commit_roll(&mut self, face: u32) {
        let sides = self.effective_sides();
        debug_assert!((1..=sides).contains(&face), "face {} outside 1..={}", face, sides);
        self.result = Some(face);
        self.display = face_symbol(face, sides);
        self.rolling = false;
        info!("Rolled {} on a D{}", face, sides);
    }

    /// Give up on the current roll without a result.
    pub fn abort_roll(&mut self) {
        self.rolling = false;
    }

    fn sync_sides(&mut self, previous: u32) {
        let sides = self.effective_sides();
        if sides == previous {
            return;
        }
        debug!("Side count changed from {} to {}", previous, sides);
        resize_labels(&mut self.labels, sides);
        self.result = None;
        self.display = idle_symbol(sides);
    }
}
