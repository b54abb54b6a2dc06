//! Registry of historical wheel specifications.
//!
//! Wirings and notches of the Wehrmacht/Luftwaffe Enigma I, the naval M3 and
//! the M4. Sources: cryptomuseum.com wiring tables.

use std::sync::{Arc, LazyLock};

use crate::error::{EnigmaError, Result};
use crate::rotor_spec::RotorSpec;

/// A registry entry: canonical name, aliases, wiring and notches.
struct WheelEntry {
    name: &'static str,
    aliases: &'static [&'static str],
    wiring: &'static str,
    notches: &'static str,
}

const WHEELS: &[WheelEntry] = &[
    WheelEntry {
        name: "I",
        aliases: &[],
        wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        notches: "Q",
    },
    WheelEntry {
        name: "II",
        aliases: &[],
        wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
        notches: "E",
    },
    WheelEntry {
        name: "III",
        aliases: &[],
        wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
        notches: "V",
    },
    WheelEntry {
        name: "IV",
        aliases: &[],
        wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB",
        notches: "J",
    },
    WheelEntry {
        name: "V",
        aliases: &[],
        wiring: "VZBRGITYUPSDNHLXAWMJQOFECK",
        notches: "Z",
    },
    WheelEntry {
        name: "VI",
        aliases: &[],
        wiring: "JPGVOUMFYQBENHZRDKASXLICTW",
        notches: "ZM",
    },
    WheelEntry {
        name: "VII",
        aliases: &[],
        wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT",
        notches: "ZM",
    },
    WheelEntry {
        name: "VIII",
        aliases: &[],
        wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV",
        notches: "ZM",
    },
    WheelEntry {
        name: "ETW",
        aliases: &[],
        wiring: "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        notches: "",
    },
    WheelEntry {
        name: "UKW_A",
        aliases: &[],
        wiring: "EJMZALYXVBWFCRQUONTSPIKHGD",
        notches: "",
    },
    WheelEntry {
        name: "UKW_B",
        aliases: &[],
        wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT",
        notches: "",
    },
    WheelEntry {
        name: "UKW_C",
        aliases: &[],
        wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL",
        notches: "",
    },
    WheelEntry {
        name: "UKW_B_THIN",
        aliases: &["UKW_BRUNO"],
        wiring: "ENKQAUYWJICOPBLMDXZVFTHRGS",
        notches: "",
    },
    WheelEntry {
        name: "UKW_C_THIN",
        aliases: &["UKW_CAESAR"],
        wiring: "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
        notches: "",
    },
    WheelEntry {
        name: "BETA",
        aliases: &[],
        wiring: "LEYJVCNIXWPBQMDRTAKZGFUHOS",
        notches: "",
    },
    WheelEntry {
        name: "GAMMA",
        aliases: &[],
        wiring: "FSOKANUERHMBTIYCWLQPZXVGJD",
        notches: "",
    },
];

/// Validated specs, index-aligned with `WHEELS`, built on first use.
static SPECS: LazyLock<Result<Vec<Arc<RotorSpec>>>> = LazyLock::new(|| {
    WHEELS
        .iter()
        .map(|e| RotorSpec::new(e.name, e.wiring, e.notches).map(Arc::new))
        .collect()
});

/// Looks up a historical wheel by name.
///
/// Every call for the same wheel returns a handle to the same shared spec.
///
/// Names are case-insensitive and `-` is treated as `_`, so `"ukw-b"`,
/// `"UKW_B"` and `"Ukw_b"` all resolve to the same reflector.
///
/// # Errors
/// Returns [`EnigmaError::UnknownSpec`] if the name is not registered.
///
/// # Examples
///
/// ```
/// use rotorcrypt::registry;
///
/// let spec = registry::lookup("ukw-b").unwrap();
/// assert_eq!(spec.name(), "UKW_B");
/// assert!(registry::lookup("IX").is_err());
/// ```
pub fn lookup(name: &str) -> Result<Arc<RotorSpec>> {
    let key = name.trim().to_uppercase().replace('-', "_");
    let index = WHEELS
        .iter()
        .position(|e| e.name == key || e.aliases.iter().any(|alias| *alias == key))
        .ok_or_else(|| EnigmaError::UnknownSpec(name.to_string()))?;
    let specs = SPECS.as_ref().map_err(Clone::clone)?;
    Ok(Arc::clone(&specs[index]))
}

/// Returns the canonical names of all registered wheels.
pub fn names() -> Vec<&'static str> {
    WHEELS.iter().map(|e| e.name).collect()
}
