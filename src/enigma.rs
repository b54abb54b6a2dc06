//! Enigma: plugboard plus rotor stack, stepped and routed per keystroke.
//!
//! Wheels are held slow-first: index 0 is the reflector (the turn-around
//! point), the last index is the fast rotor next to the keyboard.
//!
//! ```text
//! key ─► PlugBoard ─► fast rotor ─► ... ─► slow rotor ─► reflector
//!                                                            │
//! lamp ◄─ PlugBoard ◄─ fast rotor ◄─ ... ◄─ slow rotor ◄─────┘
//! ```
//!
//! Each keystroke first steps the rotors, then routes the signal.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::alphabet::{index_to_letter, letter_to_index, normalize_text};
use crate::config::{MachineConfig, RingSettings};
use crate::error::{EnigmaError, Result};
use crate::plugboard::PlugBoard;
use crate::rotor::{check_ring_setting, ring_setting_from_letter, Rotor};
use crate::rotor_spec::WheelRef;
use crate::scrambler::Scrambler;

/// Symbol that leaves a wheel unchanged in position and ring setting strings.
const SKIP: char = '*';

/// Routing record of one keystroke.
///
/// `path[0]` is the pressed key, followed by the letter after every element
/// of the signal path; the last entry is the lit lamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokeTrace {
    path: Vec<char>,
}

impl KeystrokeTrace {
    /// Returns the full routing path.
    pub fn path(&self) -> &[char] {
        &self.path
    }

    /// Returns the pressed key.
    pub fn input(&self) -> char {
        self.path[0]
    }

    /// Returns the lit lamp.
    pub fn output(&self) -> char {
        self.path[self.path.len() - 1]
    }
}

impl fmt::Display for KeystrokeTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.path.iter().map(char::to_string).collect();
        write!(f, "{}", path.join(" -> "))
    }
}

/// Rotor cipher machine.
///
/// # Examples
///
/// ```
/// use rotorcrypt::{Enigma, MachineConfig};
///
/// let config = MachineConfig::new(["UKW_B", "I", "II", "III"])
///     .cables("AB CD")
///     .rotor_positions("*XYZ");
///
/// let mut sender = Enigma::assemble(&config).unwrap();
/// let cipher = sender.write("attack at dawn").unwrap();
///
/// let mut receiver = Enigma::assemble(&config).unwrap();
/// assert_eq!(receiver.write(&cipher).unwrap(), "ATTACKATDAWN");
/// ```
///
/// # Concurrency
///
/// All mutating operations take `&mut self`. A machine shared between
/// threads must be wrapped in a `Mutex` and the guard held for a whole
/// [`write`](Self::write) call, since each letter depends on every letter
/// before it.
#[derive(Debug, Clone)]
pub struct Enigma {
    plugboard: PlugBoard,
    rotors: Vec<Rotor>,
    history: VecDeque<KeystrokeTrace>,
    history_capacity: usize,
}

impl Enigma {
    /// Assembles a machine from a configuration.
    ///
    /// Wheels are resolved and mounted in order, the layout is validated,
    /// then cables, positions and ring settings are applied.
    ///
    /// # Errors
    /// - [`EnigmaError::UnknownSpec`] if a wheel name is not registered.
    /// - [`EnigmaError::InvalidMachineLayout`] if the wheel list is empty,
    ///   the first wheel steps, static wheels sit between stepping rotors,
    ///   or (with `strict_reflector`) the first wheel cannot reflect.
    /// - Any error of [`PlugBoard::add_cables`],
    ///   [`set_rotor_positions`](Self::set_rotor_positions) or
    ///   [`set_ring_settings`](Self::set_ring_settings).
    pub fn assemble(config: &MachineConfig) -> Result<Self> {
        let rotors = config
            .rotors
            .iter()
            .map(|wheel| wheel.resolve().map(Rotor::new))
            .collect::<Result<Vec<_>>>()?;

        validate_layout(&rotors, config.strict_reflector)?;

        let mut enigma = Enigma {
            plugboard: PlugBoard::with_cables(&config.cables)?,
            rotors,
            history: VecDeque::with_capacity(config.history_capacity.min(1024)),
            history_capacity: config.history_capacity,
        };

        if !config.rotor_positions.is_empty() {
            enigma.set_rotor_positions(&config.rotor_positions)?;
        }

        match &config.ring_settings {
            Some(RingSettings::Letters(letters)) if !letters.is_empty() => {
                enigma.set_ring_settings(letters)?;
            }
            Some(RingSettings::Entries(entries)) if !entries.is_empty() => {
                let settings = entries
                    .iter()
                    .map(|entry| entry.to_setting())
                    .collect::<Result<Vec<_>>>()?;
                enigma.set_ring_setting_numbers(&settings)?;
            }
            _ => {}
        }

        debug!(machine = %enigma, "machine assembled");
        Ok(enigma)
    }

    /// Assembles a machine from registry names with default settings.
    ///
    /// # Errors
    /// Same as [`assemble`](Self::assemble).
    pub fn from_names(names: &[&str]) -> Result<Self> {
        Self::assemble(&MachineConfig::new(names.iter().copied().map(WheelRef::from)))
    }

    /// Returns all wheels, reflector first.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Returns the stepping rotors, slow rotor first.
    pub fn dynamic_rotors(&self) -> Vec<&Rotor> {
        self.rotors
            .iter()
            .filter(|r| r.spec().is_dynamic())
            .collect()
    }

    /// Returns the plugboard.
    pub fn plugboard(&self) -> &PlugBoard {
        &self.plugboard
    }

    /// Returns the plugboard for rewiring between messages.
    pub fn plugboard_mut(&mut self) -> &mut PlugBoard {
        &mut self.plugboard
    }

    /// Returns the visible positions, one letter per wheel, reflector first.
    pub fn rotor_positions(&self) -> String {
        self.rotors
            .iter()
            .map(|r| index_to_letter(r.position()))
            .collect()
    }

    /// Sets the visible positions, one symbol per wheel, reflector first.
    ///
    /// `*` leaves a wheel where it is. Letters are case-insensitive.
    /// Nothing is changed unless the whole string is valid.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigurationLengthMismatch`] if the symbol count
    ///   differs from the wheel count.
    /// - [`EnigmaError::InvalidSymbol`] for anything but a letter or `*`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::Enigma;
    ///
    /// let mut enigma = Enigma::from_names(&["UKW_B", "I", "II", "III"]).unwrap();
    /// enigma.set_rotor_positions("*ADU").unwrap();
    /// assert_eq!(enigma.rotor_positions(), "AADU");
    /// ```
    pub fn set_rotor_positions(&mut self, positions: &str) -> Result<()> {
        let symbols: Vec<char> = positions.chars().collect();
        self.check_length(symbols.len())?;

        let targets = symbols
            .iter()
            .map(|&c| match c {
                SKIP => Ok(None),
                c => letter_to_index(c.to_ascii_uppercase()).map(Some),
            })
            .collect::<Result<Vec<_>>>()?;

        for (rotor, target) in self.rotors.iter_mut().zip(targets) {
            if let Some(position) = target {
                rotor.set_position(position);
            }
        }
        debug!(positions = %self.rotor_positions(), "rotor positions set");
        Ok(())
    }

    /// Returns the ring settings, 1-based, reflector first.
    pub fn ring_settings(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::ring_setting).collect()
    }

    /// Sets the ring settings from letters (`A` = 1), reflector first.
    ///
    /// `*` leaves a wheel unchanged. Nothing is changed unless the whole
    /// string is valid.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigurationLengthMismatch`] on a length mismatch.
    /// - [`EnigmaError::InvalidRingPosition`] for anything but a letter or `*`.
    pub fn set_ring_settings(&mut self, settings: &str) -> Result<()> {
        let symbols: Vec<char> = settings.chars().collect();
        self.check_length(symbols.len())?;

        let numbers = symbols
            .iter()
            .map(|&c| match c {
                SKIP => Ok(None),
                c => ring_setting_from_letter(c).map(Some),
            })
            .collect::<Result<Vec<_>>>()?;

        self.set_ring_setting_numbers(&numbers)
    }

    /// Sets the ring settings from 1-based numbers, reflector first.
    ///
    /// `None` leaves a wheel unchanged. Nothing is changed unless every
    /// entry is valid.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigurationLengthMismatch`] on a length mismatch.
    /// - [`EnigmaError::InvalidRingPosition`] for numbers outside `[1, 26]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::Enigma;
    ///
    /// let mut enigma = Enigma::from_names(&["UKW_B", "I", "IV", "III"]).unwrap();
    /// enigma.set_ring_setting_numbers(&[None, Some(16), Some(26), Some(8)]).unwrap();
    /// assert_eq!(enigma.ring_settings(), vec![1, 16, 26, 8]);
    /// assert!(enigma.set_ring_setting_numbers(&[None, Some(27), None, None]).is_err());
    /// ```
    pub fn set_ring_setting_numbers(&mut self, settings: &[Option<u32>]) -> Result<()> {
        self.check_length(settings.len())?;

        for &n in settings.iter().flatten() {
            check_ring_setting(n)?;
        }

        for (rotor, setting) in self.rotors.iter_mut().zip(settings) {
            if let Some(n) = setting {
                rotor.set_ring_setting(*n)?;
            }
        }
        debug!(rings = ?self.ring_settings(), "ring settings set");
        Ok(())
    }

    /// Returns the recorded keystrokes, oldest first.
    pub fn history(&self) -> &VecDeque<KeystrokeTrace> {
        &self.history
    }

    /// Returns the maximum number of recorded keystrokes.
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Forgets all recorded keystrokes.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Presses a single key and returns the lit lamp.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidSymbol`] if `key` is not a letter; the machine
    /// does not step in that case.
    pub fn press_key(&mut self, key: char) -> Result<char> {
        let index = letter_to_index(key.to_ascii_uppercase())?;
        Ok(index_to_letter(self.press_index(index)))
    }

    /// Enciphers (or deciphers) a text.
    ///
    /// Whitespace is dropped and letters are uppercased. The whole text is
    /// validated before the first key is pressed, so an invalid symbol leaves
    /// the machine untouched.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidSymbol`] for the first non-letter character.
    pub fn write(&mut self, text: &str) -> Result<String> {
        let keys = normalize_text(text)
            .chars()
            .map(letter_to_index)
            .collect::<Result<Vec<_>>>()?;

        Ok(keys
            .into_iter()
            .map(|key| index_to_letter(self.press_index(key)))
            .collect())
    }

    /// Steps the rotors, routes `key` through the machine and records it.
    fn press_index(&mut self, key: usize) -> usize {
        // The lever moves the wheels before the lamp circuit closes.
        self.step();

        let mut path = Vec::with_capacity(2 * self.rotors.len() + 2);
        path.push(key);

        let mut current = self.plugboard.route(key);
        path.push(current);

        for rotor in self.rotors.iter().rev() {
            current = rotor.route(current);
            path.push(current);
        }
        for rotor in self.rotors.iter().skip(1) {
            current = rotor.route_backward(current);
            path.push(current);
        }

        current = self.plugboard.route_backward(current);
        path.push(current);

        self.record(path);
        current
    }

    fn record(&mut self, path: Vec<usize>) {
        if self.history_capacity == 0 {
            return;
        }
        let trace = KeystrokeTrace {
            path: path.into_iter().map(index_to_letter).collect(),
        };
        trace!(path = %trace, "keystroke");
        while self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(trace);
    }

    /// Advances the rotors by one keystroke.
    fn step(&mut self) {
        for index in self.stepping_plan() {
            self.rotors[index].advance();
        }
    }

    /// Decides which wheels advance on the next keystroke.
    ///
    /// Works on a snapshot of the current positions: the fast rotor always
    /// moves, and a rotor sitting on a notch moves itself and its slower
    /// neighbour. The check uses pre-step positions, which yields the
    /// double step of the middle rotor. The slowest rotor's notch has no
    /// effect.
    fn stepping_plan(&self) -> Vec<usize> {
        let dynamic: Vec<usize> = (0..self.rotors.len())
            .rev()
            .filter(|&i| self.rotors[i].spec().is_dynamic())
            .collect();

        let mut advance = vec![false; dynamic.len()];
        if let Some(fast) = advance.first_mut() {
            *fast = true;
        }
        for i in 0..dynamic.len().saturating_sub(1) {
            if self.rotors[dynamic[i]].does_step() {
                advance[i] = true;
                advance[i + 1] = true;
            }
        }

        dynamic
            .into_iter()
            .zip(advance)
            .filter_map(|(index, moves)| moves.then_some(index))
            .collect()
    }

    fn check_length(&self, actual: usize) -> Result<()> {
        if actual != self.rotors.len() {
            return Err(EnigmaError::ConfigurationLengthMismatch {
                expected: self.rotors.len(),
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Enigma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rotors.iter().map(|r| r.spec().name()).collect();
        write!(
            f,
            "Enigma -> Pos: {}, Wheels: [{}], Ring: {:?}, Plugboard: [{}]",
            self.rotor_positions(),
            names.join(", "),
            self.ring_settings(),
            self.plugboard.cables().join(" ")
        )
    }
}

/// Checks that the wheel stack can work as a machine.
fn validate_layout(rotors: &[Rotor], strict_reflector: bool) -> Result<()> {
    let reflector = rotors.first().ok_or_else(|| {
        EnigmaError::InvalidMachineLayout("at least one wheel is required".to_string())
    })?;

    if reflector.spec().is_dynamic() {
        return Err(EnigmaError::InvalidMachineLayout(format!(
            "first wheel '{}' must be a static reflector",
            reflector.spec().name()
        )));
    }

    let dynamic: Vec<usize> = rotors
        .iter()
        .enumerate()
        .filter(|(_, r)| r.spec().is_dynamic())
        .map(|(i, _)| i)
        .collect();
    if dynamic.windows(2).any(|w| w[1] != w[0] + 1) {
        return Err(EnigmaError::InvalidMachineLayout(
            "static wheels are not allowed between rotors".to_string(),
        ));
    }

    if !reflector.spec().is_reflector_compatible() {
        if strict_reflector {
            return Err(EnigmaError::InvalidMachineLayout(format!(
                "wheel '{}' is not a fixed-point-free involution and cannot reflect",
                reflector.spec().name()
            )));
        }
        warn!(
            wheel = reflector.spec().name(),
            "turn-around wheel is not a fixed-point-free involution; cipher will not be reciprocal"
        );
    }

    Ok(())
}
