//! Scrambler trait for signal-path elements.
//!
//! Every element the signal passes through (plugboard, rotors, reflector)
//! maps one alphabet index to another in each direction.

/// An element of the machine's signal path.
///
/// Implementations map an alphabet index to another alphabet index in
/// `0..26`. Inputs of 26 or more are reduced mod 26 and never panic. For
/// every input `l` in `0..26`, `route_backward(route(l)) == l` must hold under
/// the element's current state.
pub trait Scrambler {
    /// Routes a letter index from the keyboard side towards the reflector.
    fn route(&self, letter: usize) -> usize;

    /// Routes a letter index from the reflector side back towards the lamps.
    fn route_backward(&self, letter: usize) -> usize;
}
