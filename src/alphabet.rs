//! Letter-to-index conversion over the fixed machine alphabet.
//!
//! All positions, offsets and notches in the crate are indices into
//! [`ALPHABET`]. Arithmetic on them goes through [`wrap`], the single modulo
//! convention of the crate.

use crate::error::{EnigmaError, Result};

/// Number of symbols on every wheel.
pub const ALPHABET_LEN: usize = 26;

/// The machine alphabet, `A` = 0 through `Z` = 25.
pub const ALPHABET: [char; ALPHABET_LEN] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Converts an alphabet letter to its index.
///
/// Only uppercase `A`-`Z` belong to the alphabet; callers normalize case first.
///
/// # Errors
/// Returns [`EnigmaError::InvalidSymbol`] for any other character.
///
/// # Examples
///
/// ```
/// use rotorcrypt::alphabet::letter_to_index;
///
/// assert_eq!(letter_to_index('A').unwrap(), 0);
/// assert_eq!(letter_to_index('Z').unwrap(), 25);
/// assert!(letter_to_index('a').is_err());
/// ```
pub fn letter_to_index(letter: char) -> Result<usize> {
    if letter.is_ascii_uppercase() {
        Ok((letter as u8 - b'A') as usize)
    } else {
        Err(EnigmaError::InvalidSymbol(letter))
    }
}

/// Converts an index back to its letter.
///
/// Indices outside `[0, 26)` are wrapped into the alphabet.
pub fn index_to_letter(index: usize) -> char {
    ALPHABET[index % ALPHABET_LEN]
}

/// Converts every character of `letters` to an index.
///
/// # Errors
/// Returns [`EnigmaError::InvalidSymbol`] for the first character outside the
/// alphabet.
pub fn letters_to_indices(letters: &str) -> Result<Vec<usize>> {
    letters.chars().map(letter_to_index).collect()
}

/// Reduces a signed offset into `[0, 26)`.
#[inline]
pub fn wrap(value: i32) -> usize {
    value.rem_euclid(ALPHABET_LEN as i32) as usize
}

/// Uppercases ASCII letters in `text` and drops all whitespace.
///
/// Every other character is kept one-for-one, so the result may still
/// contain non-alphabet characters; validation is left to the caller.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index_bijection() {
        for (i, &letter) in ALPHABET.iter().enumerate() {
            assert_eq!(letter_to_index(letter).unwrap(), i);
            assert_eq!(index_to_letter(i), letter);
        }
    }

    #[test]
    fn test_letter_to_index_rejects_non_alphabet() {
        for c in ['a', 'z', '?', '1', ' ', 'Ä', '*'] {
            assert_eq!(letter_to_index(c), Err(EnigmaError::InvalidSymbol(c)));
        }
    }

    #[test]
    fn test_index_to_letter_wraps() {
        assert_eq!(index_to_letter(26), 'A');
        assert_eq!(index_to_letter(27), 'B');
    }

    #[test]
    fn test_letters_to_indices() {
        assert_eq!(letters_to_indices("AZB").unwrap(), vec![0, 25, 1]);
        assert_eq!(letters_to_indices("").unwrap(), Vec::<usize>::new());
        assert_eq!(
            letters_to_indices("AB-"),
            Err(EnigmaError::InvalidSymbol('-'))
        );
    }

    #[test]
    fn test_wrap_is_non_negative() {
        assert_eq!(wrap(0), 0);
        assert_eq!(wrap(26), 0);
        assert_eq!(wrap(-1), 25);
        assert_eq!(wrap(-27), 25);
        assert_eq!(wrap(53), 1);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("hallo welt\n"), "HALLOWELT");
        assert_eq!(normalize_text(" a\tb\r\nc "), "ABC");
        assert_eq!(normalize_text("ab1"), "AB1");
    }

    #[test]
    fn test_normalize_text_keeps_non_ascii_as_is() {
        assert_eq!(normalize_text("straße"), "STRAßE");
        assert_eq!(normalize_text("ı"), "ı");
        assert_eq!(normalize_text("é"), "é");
    }
}
