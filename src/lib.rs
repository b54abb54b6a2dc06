//! Rotor cipher machine engine (Enigma family).
//!
//! Simulates the electromechanical cipher machines built from a plugboard,
//! a stack of stepping rotors and a reflector. Pressing a key steps the
//! rotors, then routes the signal through the plugboard, the rotors, the
//! reflector and back. With identical settings the machine is its own
//! inverse.
//!
//! Output matches wartime Enigma I, M3 and M4 traffic letter for letter,
//! including the double step of the middle rotor.
//!
//! # Architecture
//!
//! ```text
//! RotorSpec   (immutable wiring + notches, historical registry)
//!     ↓ mounted as
//! Rotor       (position + ring setting, forward/backward routing)
//!     ↓ stacked behind a
//! PlugBoard   (involutive letter-pair swap)
//!     ↓ assembled into
//! Enigma      (stepping state machine + keystroke routing + history)
//! ```
//!
//! # Examples
//!
//! The M3 message key from the German Wikipedia Enigma article:
//!
//! ```
//! use rotorcrypt::{Enigma, MachineConfig};
//!
//! let config = MachineConfig::new(["UKW_B", "I", "IV", "III"])
//!     .cables("AD CN ET FL GI JV KZ PU QY WX")
//!     .rotor_positions("*QWE")
//!     .ring_settings(vec![1, 16, 26, 8]);
//!
//! let mut enigma = Enigma::assemble(&config).unwrap();
//! assert_eq!(enigma.write("RTZ").unwrap(), "EWG");
//! ```
//!
//! Deciphering uses the same settings:
//!
//! ```
//! use rotorcrypt::Enigma;
//!
//! let mut enigma = Enigma::from_names(&["UKW_B", "III", "II", "I"]).unwrap();
//! let cipher = enigma.write("hallo dies ist ein test").unwrap();
//! assert_eq!(cipher, "MTNCZEVKHZUDSOACOEF");
//!
//! enigma.set_rotor_positions("AAAA").unwrap();
//! assert_eq!(enigma.write(&cipher).unwrap(), "HALLODIESISTEINTEST");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod registry;
pub mod scrambler;

mod enigma;
mod plugboard;
mod rotor;
mod rotor_spec;

pub use config::{MachineConfig, RingEntry, RingSettings};
pub use enigma::{Enigma, KeystrokeTrace};
pub use error::{EnigmaError, Result};
pub use plugboard::PlugBoard;
pub use rotor::Rotor;
pub use rotor_spec::{RotorSpec, WheelRef};
pub use scrambler::Scrambler;
