//! RotorSpec: immutable wiring and turnover definition of a wheel.
//!
//! A spec is pure data and is shared between machines through `Arc`. Rotors,
//! reflectors, entry wheels and the M4 Greek wheels are all described by the
//! same type; a spec without notches is static.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alphabet::{letter_to_index, ALPHABET_LEN};
use crate::error::{EnigmaError, Result};
use crate::registry;

/// Wiring and notch definition of a single wheel.
///
/// # Invariants
/// - `wiring` is a permutation of the alphabet (26 letters, no repeats).
/// - every notch is an alphabet letter.
///
/// # Examples
///
/// ```
/// use rotorcrypt::RotorSpec;
///
/// let spec = RotorSpec::new("I", "ekmflgdqvzntowyhxuspaibrcj", "q").unwrap();
/// assert_eq!(spec.wiring(), "EKMFLGDQVZNTOWYHXUSPAIBRCJ");
/// assert!(spec.is_dynamic());
///
/// assert!(RotorSpec::new("bad", "ABC", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRotorSpec", into = "RawRotorSpec")]
pub struct RotorSpec {
    name: String,
    wiring: String,
    notches: String,
    mapping: [u8; ALPHABET_LEN],
    notch_positions: Vec<usize>,
}

/// Unvalidated wire form of a [`RotorSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRotorSpec {
    name: String,
    wiring: String,
    #[serde(default)]
    notches: String,
}

impl TryFrom<RawRotorSpec> for RotorSpec {
    type Error = EnigmaError;

    fn try_from(raw: RawRotorSpec) -> Result<Self> {
        RotorSpec::new(&raw.name, &raw.wiring, &raw.notches)
    }
}

impl From<RotorSpec> for RawRotorSpec {
    fn from(spec: RotorSpec) -> Self {
        RawRotorSpec {
            name: spec.name,
            wiring: spec.wiring,
            notches: spec.notches,
        }
    }
}

impl RotorSpec {
    /// Creates a validated wheel specification.
    ///
    /// `wiring` and `notches` are case-insensitive. `wiring[i]` is the letter
    /// contact `i` is wired to; `notches` lists the positions at which the
    /// next slower wheel is carried along.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidWiring`] if `wiring` is not a permutation of
    ///   the alphabet.
    /// - [`EnigmaError::InvalidNotch`] if a notch is not an alphabet letter.
    pub fn new(name: &str, wiring: &str, notches: &str) -> Result<Self> {
        let wiring = wiring.to_uppercase();
        let notches = notches.to_uppercase();

        let invalid_wiring = |reason: String| EnigmaError::InvalidWiring {
            name: name.to_string(),
            reason,
        };

        let count = wiring.chars().count();
        if count != ALPHABET_LEN {
            return Err(invalid_wiring(format!(
                "expected {} letters, got {}",
                ALPHABET_LEN, count
            )));
        }

        let mut mapping = [0u8; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];
        for (slot, c) in mapping.iter_mut().zip(wiring.chars()) {
            let index = letter_to_index(c)
                .map_err(|_| invalid_wiring(format!("'{}' is not an alphabet letter", c)))?;
            if seen[index] {
                return Err(invalid_wiring(format!("letter '{}' is wired twice", c)));
            }
            seen[index] = true;
            *slot = index as u8;
        }

        let mut notch_positions = Vec::with_capacity(notches.len());
        for c in notches.chars() {
            let index = letter_to_index(c).map_err(|_| EnigmaError::InvalidNotch {
                name: name.to_string(),
                notch: c,
            })?;
            if !notch_positions.contains(&index) {
                notch_positions.push(index);
            }
        }

        Ok(RotorSpec {
            name: name.to_string(),
            wiring,
            notches,
            mapping,
            notch_positions,
        })
    }

    /// Returns the wheel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wiring as an uppercase 26-letter string.
    pub fn wiring(&self) -> &str {
        &self.wiring
    }

    /// Returns the notch letters as given (uppercased).
    pub fn notches(&self) -> &str {
        &self.notches
    }

    /// Returns the wiring as alphabet indices.
    pub fn mapping(&self) -> &[u8; ALPHABET_LEN] {
        &self.mapping
    }

    /// Returns the distinct notch positions as alphabet indices.
    pub fn notch_positions(&self) -> &[usize] {
        &self.notch_positions
    }

    /// `true` if the wheel has at least one notch and therefore steps.
    pub fn is_dynamic(&self) -> bool {
        !self.notch_positions.is_empty()
    }

    /// `true` if the wiring is an involution without fixed points.
    ///
    /// Only such a wiring can turn the signal around and keep the machine
    /// reciprocal.
    pub fn is_reflector_compatible(&self) -> bool {
        self.mapping
            .iter()
            .enumerate()
            .all(|(i, &m)| m as usize != i && self.mapping[m as usize] as usize == i)
    }
}

impl fmt::Display for RotorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (wiring: {}, notches: {})",
            self.name, self.wiring, self.notches
        )
    }
}

/// Reference to a wheel: a registry name or an explicit specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WheelRef {
    /// Name looked up in the historical registry.
    Named(String),
    /// Custom specification.
    Explicit(RotorSpec),
}

impl WheelRef {
    /// Resolves the reference to a shared specification.
    ///
    /// # Errors
    /// [`EnigmaError::UnknownSpec`] if a name is not in the registry.
    pub fn resolve(&self) -> Result<Arc<RotorSpec>> {
        match self {
            WheelRef::Named(name) => registry::lookup(name),
            WheelRef::Explicit(spec) => Ok(Arc::new(spec.clone())),
        }
    }
}

impl From<&str> for WheelRef {
    fn from(name: &str) -> Self {
        WheelRef::Named(name.to_string())
    }
}

impl From<String> for WheelRef {
    fn from(name: String) -> Self {
        WheelRef::Named(name)
    }
}

impl From<RotorSpec> for WheelRef {
    fn from(spec: RotorSpec) -> Self {
        WheelRef::Explicit(spec)
    }
}
