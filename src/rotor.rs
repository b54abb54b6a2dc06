//! Rotor: a wheel specification mounted in a machine.
//!
//! Adds the two pieces of mutable state a physical wheel has: its visible
//! rotational position and its ring setting (Ringstellung). Routing uses the
//! effective offset between the two, recomputed on every call.
//!
//! The wiring is stored as relative offsets: entry `k` of the forward table is
//! `wiring[k] - k`, the shift applied to a signal entering at contact `k`.
//! The backward table is built the same way from the inverse permutation.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::{index_to_letter, letter_to_index, wrap, ALPHABET_LEN};
use crate::error::{EnigmaError, Result};
use crate::rotor_spec::RotorSpec;
use crate::scrambler::Scrambler;

/// A wheel with position and ring setting.
#[derive(Debug, Clone)]
pub struct Rotor {
    spec: Arc<RotorSpec>,
    position: usize,
    ring_setting: u8,
    forward: [i8; ALPHABET_LEN],
    backward: [i8; ALPHABET_LEN],
}

impl Rotor {
    /// Mounts a wheel at position `A` with ring setting 1.
    ///
    /// # Parameters
    /// - `spec`: Shared wheel specification.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::{registry, Rotor};
    ///
    /// let rotor = Rotor::new(registry::lookup("I").unwrap());
    /// assert_eq!(rotor.position(), 0);
    /// assert_eq!(rotor.ring_setting(), 1);
    /// ```
    pub fn new(spec: Arc<RotorSpec>) -> Self {
        let mapping = spec.mapping();

        let mut inverse = [0u8; ALPHABET_LEN];
        for (i, &m) in mapping.iter().enumerate() {
            inverse[m as usize] = i as u8;
        }

        let forward = relative_offsets(mapping);
        let backward = relative_offsets(&inverse);

        Rotor {
            spec,
            position: 0,
            ring_setting: 1,
            forward,
            backward,
        }
    }

    /// Returns the wheel specification.
    pub fn spec(&self) -> &RotorSpec {
        &self.spec
    }

    /// Returns the visible position (`A` = 0).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Sets the visible position; values are reduced mod 26.
    pub fn set_position(&mut self, position: usize) {
        self.position = position % ALPHABET_LEN;
    }

    /// Sets the visible position from a letter.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidSymbol`] if `letter` is not an alphabet letter.
    pub fn set_position_letter(&mut self, letter: char) -> Result<()> {
        let index = letter_to_index(letter.to_ascii_uppercase())?;
        self.set_position(index);
        Ok(())
    }

    /// Advances the wheel by one position.
    pub fn advance(&mut self) {
        self.set_position(self.position + 1);
    }

    /// Returns the ring setting, 1-based (`A` = 1).
    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Sets the ring setting.
    ///
    /// # Parameters
    /// - `ring_setting`: 1-based setting in `[1, 26]`.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidRingPosition`] if out of range.
    pub fn set_ring_setting(&mut self, ring_setting: u32) -> Result<()> {
        self.ring_setting = check_ring_setting(ring_setting)? as u8;
        Ok(())
    }

    /// Sets the ring setting from a letter (`A` = 1 ... `Z` = 26).
    ///
    /// # Errors
    /// [`EnigmaError::InvalidRingPosition`] if `letter` is not an alphabet letter.
    pub fn set_ring_setting_letter(&mut self, letter: char) -> Result<()> {
        self.ring_setting = ring_setting_from_letter(letter)? as u8;
        Ok(())
    }

    /// Offset of the wiring core relative to contact `A`.
    ///
    /// `(position - (ring_setting - 1)) mod 26`.
    pub fn effective_offset(&self) -> usize {
        wrap(self.position as i32 - (self.ring_setting as i32 - 1))
    }

    /// `true` if the wheel currently sits at one of its notches.
    pub fn does_step(&self) -> bool {
        self.spec.notch_positions().contains(&self.position)
    }

    fn route_with(&self, table: &[i8; ALPHABET_LEN], letter: usize) -> usize {
        let contact = (letter + self.effective_offset()) % ALPHABET_LEN;
        wrap(letter as i32 + table[contact] as i32)
    }
}

/// Accepts a 1-based ring setting in `[1, 26]`.
pub(crate) fn check_ring_setting(ring_setting: u32) -> Result<u32> {
    if (1..=ALPHABET_LEN as u32).contains(&ring_setting) {
        Ok(ring_setting)
    } else {
        Err(EnigmaError::InvalidRingPosition(ring_setting.to_string()))
    }
}

/// Converts a ring letter to its 1-based setting (`A` = 1).
pub(crate) fn ring_setting_from_letter(letter: char) -> Result<u32> {
    letter_to_index(letter.to_ascii_uppercase())
        .map(|index| index as u32 + 1)
        .map_err(|_| EnigmaError::InvalidRingPosition(letter.to_string()))
}

/// Turns an absolute permutation into per-contact shifts.
fn relative_offsets(permutation: &[u8; ALPHABET_LEN]) -> [i8; ALPHABET_LEN] {
    let mut offsets = [0i8; ALPHABET_LEN];
    for (k, (offset, &target)) in offsets.iter_mut().zip(permutation).enumerate() {
        *offset = target as i8 - k as i8;
    }
    offsets
}

impl Scrambler for Rotor {
    fn route(&self, letter: usize) -> usize {
        self.route_with(&self.forward, letter)
    }

    fn route_backward(&self, letter: usize) -> usize {
        self.route_with(&self.backward, letter)
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Pos: {} Ring: {} Wiring: {} Notch: {}",
            self.spec.name(),
            index_to_letter(self.position),
            self.ring_setting,
            self.spec.wiring(),
            self.spec.notches()
        )
    }
}
