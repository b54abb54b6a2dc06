//! PlugBoard: symmetric letter-pair swap in front of the rotor stack.
//!
//! A cable joins two letters; the signal is swapped between them on the way
//! into the rotors and again on the way out. Each letter takes at most one
//! cable, so at most 13 cables fit.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::alphabet::{index_to_letter, letter_to_index, ALPHABET_LEN};
use crate::error::{EnigmaError, Result};
use crate::scrambler::Scrambler;

/// A cable stored as an ordered pair of alphabet indices (`low < high`).
type Cable = (usize, usize);

/// Steckerbrett with its derived involutive mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlugBoard {
    cables: BTreeSet<Cable>,
    mapping: [u8; ALPHABET_LEN],
}

impl Default for PlugBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PlugBoard {
    /// Creates a plugboard with no cables (every letter maps to itself).
    pub fn new() -> Self {
        PlugBoard {
            cables: BTreeSet::new(),
            mapping: identity_mapping(),
        }
    }

    /// Creates a plugboard from a space-separated cable string such as `"AB CD"`.
    ///
    /// # Errors
    /// Same as [`add_cables`](Self::add_cables).
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::PlugBoard;
    ///
    /// let pb = PlugBoard::with_cables("AB cd HP").unwrap();
    /// assert_eq!(pb.cables(), vec!["AB", "CD", "HP"]);
    /// ```
    pub fn with_cables(cables: &str) -> Result<Self> {
        let mut board = Self::new();
        board.add_cables(cables)?;
        Ok(board)
    }

    /// Plugs in additional cables.
    ///
    /// `cables` is a whitespace-separated list of letter pairs; case is
    /// ignored. Re-adding a cable that is already plugged is a no-op.
    ///
    /// Validation is all-or-nothing: on error the board is unchanged.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidLetter`] if a cable uses a non-alphabet symbol.
    /// - [`EnigmaError::MalformedCable`] if a cable is not exactly two letters.
    /// - [`EnigmaError::DuplicateLetter`] if any letter would take two cables
    ///   (including a cable joining a letter to itself).
    pub fn add_cables(&mut self, cables: &str) -> Result<()> {
        let parsed = parse_cables(cables)?;

        let mut candidate: Vec<Cable> = self.cables.iter().copied().collect();
        for cable in parsed {
            if !candidate.contains(&cable) {
                candidate.push(cable);
            }
        }

        let mut counts = [0usize; ALPHABET_LEN];
        for &(a, b) in &candidate {
            counts[a] += 1;
            counts[b] += 1;
        }
        let reused: String = counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 1)
            .map(|(i, _)| index_to_letter(i))
            .collect();
        if !reused.is_empty() {
            return Err(EnigmaError::DuplicateLetter { letters: reused });
        }

        self.use_cables(candidate.into_iter().collect());
        Ok(())
    }

    /// Unplugs the named cables, or every cable when `cables` is blank.
    ///
    /// Cables are matched regardless of letter order (`"BA"` removes `"AB"`).
    /// Naming a cable that is not plugged is not an error.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidLetter`] or [`EnigmaError::MalformedCable`] if
    /// a named cable is malformed; the board is unchanged in that case.
    pub fn remove_cables(&mut self, cables: &str) -> Result<()> {
        if cables.trim().is_empty() {
            self.use_cables(BTreeSet::new());
            return Ok(());
        }

        let parsed = parse_cables(cables)?;
        let remaining = self
            .cables
            .iter()
            .copied()
            .filter(|cable| !parsed.contains(cable))
            .collect();
        self.use_cables(remaining);
        Ok(())
    }

    /// Unplugs every cable.
    pub fn clear(&mut self) {
        self.use_cables(BTreeSet::new());
    }

    /// Returns the plugged cables as sorted two-letter strings (`"AB"`).
    pub fn cables(&self) -> Vec<String> {
        self.cables
            .iter()
            .map(|&(a, b)| [index_to_letter(a), index_to_letter(b)].iter().collect())
            .collect()
    }

    /// Returns the number of plugged cables.
    pub fn num_cables(&self) -> usize {
        self.cables.len()
    }

    fn use_cables(&mut self, cables: BTreeSet<Cable>) {
        let mut mapping = identity_mapping();
        for &(a, b) in &cables {
            mapping[a] = b as u8;
            mapping[b] = a as u8;
        }
        self.cables = cables;
        self.mapping = mapping;
        debug!(cables = self.cables.len(), "plugboard rewired");
    }
}

impl Scrambler for PlugBoard {
    fn route(&self, letter: usize) -> usize {
        self.mapping[letter % ALPHABET_LEN] as usize
    }

    fn route_backward(&self, letter: usize) -> usize {
        self.route(letter)
    }
}

impl fmt::Display for PlugBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlugBoard({})", self.cables().join(" "))
    }
}

fn identity_mapping() -> [u8; ALPHABET_LEN] {
    let mut mapping = [0u8; ALPHABET_LEN];
    for (i, slot) in mapping.iter_mut().enumerate() {
        *slot = i as u8;
    }
    mapping
}

/// Parses a whitespace-separated cable list into ordered index pairs.
///
/// Symbols are checked before cable lengths, so `"A? BCD"` reports the
/// invalid `?` first.
fn parse_cables(cables: &str) -> Result<Vec<Cable>> {
    let tokens: Vec<String> = cables
        .split_whitespace()
        .map(|token| token.to_uppercase())
        .collect();

    let invalid: BTreeSet<char> = tokens
        .iter()
        .flat_map(|token| token.chars())
        .filter(|c| letter_to_index(*c).is_err())
        .collect();
    if !invalid.is_empty() {
        return Err(EnigmaError::InvalidLetter {
            letters: invalid.into_iter().collect(),
        });
    }

    let mut parsed = Vec::with_capacity(tokens.len());
    for token in tokens {
        let indices: Vec<usize> = token
            .chars()
            .map(letter_to_index)
            .collect::<Result<_>>()?;
        match indices.as_slice() {
            &[a, b] => {
                let cable = (a.min(b), a.max(b));
                if !parsed.contains(&cable) {
                    parsed.push(cable);
                }
            }
            _ => return Err(EnigmaError::MalformedCable { cable: token }),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_cables_is_identity() {
        let pb = PlugBoard::new();
        for letter in 0..ALPHABET_LEN {
            assert_eq!(pb.route(letter), letter);
            assert_eq!(pb.route_backward(letter), letter);
        }
    }

    #[test]
    fn test_cables_swap_both_ways() {
        let pb = PlugBoard::with_cables("BZ FG").unwrap();
        for cable in ["BZ", "FG"] {
            let mut chars = cable.chars();
            let i = letter_to_index(chars.next().unwrap()).unwrap();
            let o = letter_to_index(chars.next().unwrap()).unwrap();
            assert_eq!(pb.route(i), o);
            assert_eq!(pb.route(o), i);
        }
        assert_eq!(pb.route(0), 0);
    }

    #[test]
    fn test_lowercase_cables_accepted() {
        let pb = PlugBoard::with_cables("ab uv").unwrap();
        assert_eq!(pb.cables(), vec!["AB", "UV"]);
    }

    #[test]
    fn test_add_and_remove_cables() {
        let mut pb = PlugBoard::with_cables("AB CD HP").unwrap();
        pb.add_cables("KT").unwrap();
        pb.remove_cables("BA").unwrap();
        assert_eq!(pb.cables(), vec!["CD", "HP", "KT"]);
        assert_eq!(pb.route(0), 0);
        assert_eq!(pb.route(1), 1);

        pb.remove_cables("").unwrap();
        assert_eq!(pb.num_cables(), 0);
        assert_eq!(pb, PlugBoard::new());
    }

    #[test]
    fn test_clear_unplugs_everything() {
        let mut pb = PlugBoard::with_cables("AB CD EF").unwrap();
        pb.clear();
        assert_eq!(pb.num_cables(), 0);
        assert!(pb.cables().is_empty());
        assert_eq!(pb, PlugBoard::new());
        for letter in 0..ALPHABET_LEN {
            assert_eq!(pb.route(letter), letter);
        }
        pb.add_cables("AB").unwrap();
        assert_eq!(pb.route(0), 1);
    }

    #[test]
    fn test_out_of_range_index_wraps() {
        let pb = PlugBoard::with_cables("AB").unwrap();
        assert_eq!(pb.route(26), 1);
        assert_eq!(pb.route_backward(27), 0);
        assert_eq!(pb.route(ALPHABET_LEN * 3 + 5), 5);
    }

    #[test]
    fn test_readding_existing_cable_is_noop() {
        let mut pb = PlugBoard::with_cables("AB").unwrap();
        pb.add_cables("AB ba").unwrap();
        assert_eq!(pb.cables(), vec!["AB"]);
    }

    #[test]
    fn test_duplicate_letter_rejected_and_board_unchanged() {
        let mut pb = PlugBoard::with_cables("AB CD").unwrap();
        let before = pb.clone();

        let err = pb.add_cables("EF AG").unwrap_err();
        assert_eq!(
            err,
            EnigmaError::DuplicateLetter {
                letters: "A".to_string()
            }
        );
        assert_eq!(pb, before);
    }

    #[test]
    fn test_self_cable_rejected() {
        let err = PlugBoard::with_cables("AA").unwrap_err();
        assert_eq!(
            err,
            EnigmaError::DuplicateLetter {
                letters: "A".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_letter_rejected() {
        let err = PlugBoard::with_cables("A? B1").unwrap_err();
        assert_eq!(
            err,
            EnigmaError::InvalidLetter {
                letters: "1?".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_cable_rejected() {
        let err = PlugBoard::with_cables("AB CDE").unwrap_err();
        assert_eq!(
            err,
            EnigmaError::MalformedCable {
                cable: "CDE".to_string()
            }
        );

        let mut pb = PlugBoard::with_cables("AB").unwrap();
        assert!(pb.remove_cables("A").is_err());
        assert_eq!(pb.cables(), vec!["AB"]);
    }

    #[test]
    fn test_thirteen_cables_fill_the_board() {
        let pb = PlugBoard::with_cables("AB CD EF GH IJ KL MN OP QR ST UV WX YZ").unwrap();
        assert_eq!(pb.num_cables(), 13);
        for letter in 0..ALPHABET_LEN {
            assert_ne!(pb.route(letter), letter);
        }
    }

    #[test]
    fn test_display() {
        let pb = PlugBoard::with_cables("ZA CD").unwrap();
        assert_eq!(format!("{}", pb), "PlugBoard(AZ CD)");
    }

    fn cable_set() -> impl Strategy<Value = String> {
        Just((0..ALPHABET_LEN).collect::<Vec<usize>>())
            .prop_shuffle()
            .prop_flat_map(|letters| (Just(letters), 0usize..=13))
            .prop_map(|(letters, n)| {
                letters
                    .chunks(2)
                    .take(n)
                    .map(|pair| {
                        [index_to_letter(pair[0]), index_to_letter(pair[1])]
                            .iter()
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
    }

    proptest! {
        #[test]
        fn plugboard_is_an_involution(cables in cable_set()) {
            let pb = PlugBoard::with_cables(&cables).unwrap();
            for letter in 0..ALPHABET_LEN {
                prop_assert_eq!(pb.route(pb.route(letter)), letter);
                prop_assert_eq!(pb.route_backward(letter), pb.route(letter));
            }
        }
    }
}
