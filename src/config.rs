//! Machine configuration as plain data.
//!
//! A [`MachineConfig`] describes everything needed to assemble an
//! [`Enigma`](crate::Enigma): the wheel order, the plugboard, the starting
//! positions and the ring settings. It can be built in code or decoded from
//! JSON.
//!
//! ```
//! use rotorcrypt::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{
//!     "rotors": ["UKW_B", "I", "IV", "III"],
//!     "cables": "AD CN ET FL GI JV KZ PU QY WX",
//!     "rotor_positions": "*QWE",
//!     "ring_settings": ["*", 16, 26, 8]
//! }"#).unwrap();
//! assert_eq!(config.history_capacity, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, Result};
use crate::rotor::{check_ring_setting, ring_setting_from_letter};
use crate::rotor_spec::WheelRef;

/// Default number of keystrokes kept in the routing history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Assembly parameters of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Wheels in order, reflector first, fast rotor last.
    pub rotors: Vec<WheelRef>,
    /// Plugboard cables, e.g. `"AB CD"`.
    #[serde(default)]
    pub cables: String,
    /// One letter per wheel, `*` keeps the wheel at `A`. Empty = all `A`.
    #[serde(default)]
    pub rotor_positions: String,
    /// Ring settings, one per wheel. `None` = all 1.
    #[serde(default)]
    pub ring_settings: Option<RingSettings>,
    /// Number of keystrokes kept in the routing history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Reject a turn-around wheel that is not a fixed-point-free involution.
    #[serde(default)]
    pub strict_reflector: bool,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Ring settings as letters (`"*EPEL"`) or numbers (`["*", 5, 16, 5, 12]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RingSettings {
    /// One letter per wheel, `A` = 1, `*` = skip.
    Letters(String),
    /// One entry per wheel.
    Entries(Vec<RingEntry>),
}

/// A single numeric ring setting entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RingEntry {
    /// 1-based setting.
    Number(u32),
    /// A letter (`"E"`) or `"*"` to leave the wheel unchanged.
    Symbol(String),
}

impl RingEntry {
    /// Converts the entry to a 1-based setting; `None` means skip.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidRingPosition`] for out-of-range numbers or
    /// anything but a single letter or `*`.
    pub fn to_setting(&self) -> Result<Option<u32>> {
        match self {
            RingEntry::Number(n) => check_ring_setting(*n).map(Some),
            RingEntry::Symbol(s) => {
                let mut chars = s.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some('*'), None) => Ok(None),
                    (Some(c), None) => ring_setting_from_letter(c).map(Some),
                    _ => Err(EnigmaError::InvalidRingPosition(s.clone())),
                }
            }
        }
    }
}

impl From<u32> for RingEntry {
    fn from(n: u32) -> Self {
        RingEntry::Number(n)
    }
}

impl From<&str> for RingSettings {
    fn from(letters: &str) -> Self {
        RingSettings::Letters(letters.to_string())
    }
}

impl From<Vec<u32>> for RingSettings {
    fn from(numbers: Vec<u32>) -> Self {
        RingSettings::Entries(numbers.into_iter().map(RingEntry::Number).collect())
    }
}

impl MachineConfig {
    /// Starts a configuration for the given wheels (reflector first).
    pub fn new<I, W>(rotors: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<WheelRef>,
    {
        MachineConfig {
            rotors: rotors.into_iter().map(Into::into).collect(),
            cables: String::new(),
            rotor_positions: String::new(),
            ring_settings: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            strict_reflector: false,
        }
    }

    /// Decodes a configuration from JSON.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidConfig`] if the document is malformed or a
    /// wheel specification inside it is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the plugboard cables.
    pub fn cables(mut self, cables: &str) -> Self {
        self.cables = cables.to_string();
        self
    }

    /// Sets the starting positions.
    pub fn rotor_positions(mut self, positions: &str) -> Self {
        self.rotor_positions = positions.to_string();
        self
    }

    /// Sets the ring settings.
    pub fn ring_settings(mut self, settings: impl Into<RingSettings>) -> Self {
        self.ring_settings = Some(settings.into());
        self
    }

    /// Sets the history capacity.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Enables or disables the strict reflector check.
    pub fn strict_reflector(mut self, strict: bool) -> Self {
        self.strict_reflector = strict;
        self
    }
}
