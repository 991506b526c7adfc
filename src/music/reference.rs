// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static reference tables.
//!
//! Letters, degrees, intervals, the scale and chord pattern catalogs, the
//! roman-numeral quality suffixes and the per-key-type circle of fifths.
//! Every table is built once on first use and is read-only afterwards.
//! Inverse tables are derived from the forward tables at the same point.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing::warn;

/// Sharp accidental mark
pub const SHARP: char = '#';

/// Flat accidental mark
pub const FLAT: char = 'b';

/// Number of semitones in an octave
pub const OCTAVE_STEPS: i32 = 12;

/// Largest letter distance any registered interval spans (the octave)
pub const MAX_INTERVAL_DEGREE: usize = 7;

/// Roman numerals for the seven diatonic degrees (index 0 = I)
pub const DEGREES: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    /// All letters in alphabetical order
    pub const ALL: [Letter; 7] = [
        Letter::A,
        Letter::B,
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
    ];

    /// Pitch class (0-11) of the natural note, C = 0
    pub fn pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the alphabetical letter list
    fn index(self) -> usize {
        self as usize
    }

    /// Letter reached after moving `steps` positions up the alphabet, wrapping G -> A
    pub fn advance(self, steps: usize) -> Letter {
        Letter::ALL[(self.index() + steps) % Letter::ALL.len()]
    }

    /// Parse an upper-case letter
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An interval as (scale-degree distance, semitone distance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Letter distance, 1 = second ... 7 = octave
    pub degree: usize,
    /// Semitone distance
    pub steps: i32,
}

impl Interval {
    pub const fn new(degree: usize, steps: i32) -> Self {
        Self { degree, steps }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.degree, self.steps)
    }
}

const INTERVALS: [(&str, Interval); 16] = [
    ("m2", Interval::new(1, 1)),
    ("M2", Interval::new(1, 2)),
    ("m3", Interval::new(2, 3)),
    ("M3", Interval::new(2, 4)),
    ("P4", Interval::new(3, 5)),
    ("A4", Interval::new(3, 6)),
    ("d5", Interval::new(4, 6)),
    ("P5", Interval::new(4, 7)),
    ("A5", Interval::new(4, 8)),
    ("m6", Interval::new(5, 8)),
    ("M6", Interval::new(5, 9)),
    ("d7", Interval::new(6, 9)),
    ("m7", Interval::new(6, 10)),
    ("M7", Interval::new(6, 11)),
    ("A7", Interval::new(6, 12)),
    ("P8", Interval::new(7, 12)),
];

type PatternEntry = (&'static str, &'static [&'static str]);

const SCALES: [PatternEntry; 11] = [
    ("major", &["M2", "M3", "P4", "P5", "M6", "M7"]),
    ("minor", &["M2", "m3", "P4", "P5", "m6", "m7"]),
    ("dorian", &["M2", "m3", "P4", "P5", "M6", "m7"]),
    ("phrygian", &["m2", "m3", "P4", "P5", "m6", "m7"]),
    ("lydian", &["M2", "M3", "A4", "P5", "M6", "M7"]),
    ("mixolydian", &["M2", "M3", "P4", "P5", "M6", "m7"]),
    ("locrian", &["m2", "m3", "P4", "d5", "m6", "m7"]),
    ("harmonic_minor", &["M2", "m3", "P4", "P5", "m6", "M7"]),
    ("melodic_minor", &["M2", "m3", "P4", "P5", "M6", "M7"]),
    ("major_pentatonic", &["M2", "M3", "P5", "M6"]),
    ("minor_pentatonic", &["m3", "P4", "P5", "m7"]),
];

const CHORDS: [PatternEntry; 20] = [
    ("min", &["m3", "P5"]),
    ("maj", &["M3", "P5"]),
    ("dim", &["m3", "d5"]),
    ("aug", &["M3", "A5"]),
    ("sus", &["P4", "P5"]),
    ("sus2", &["M2", "P5"]),
    ("m2", &["M2", "m3", "P5"]),
    ("M2", &["M2", "M3", "P5"]),
    ("m6", &["m3", "P5", "M6"]),
    ("M6", &["M3", "P5", "M6"]),
    ("7", &["M3", "P5", "m7"]),
    ("m7", &["m3", "P5", "m7"]),
    ("M7", &["M3", "P5", "M7"]),
    ("7sus", &["P4", "P5", "m7"]),
    ("dim7", &["m3", "d5", "d7"]),
    ("m7♭5", &["m3", "d5", "m7"]),
    ("mM7", &["m3", "P5", "M7"]),
    ("aug7", &["M3", "A5", "m7"]),
    ("M7♭5", &["M3", "d5", "M7"]),
    ("M7♯5", &["M3", "A5", "M7"]),
];

/// Chord types written with an upper-case numeral, and their roman suffix
const MAJOR_QUALITY: [(&str, &str); 12] = [
    ("maj", ""),
    ("aug", "+"),
    ("sus", "sus"),
    ("sus2", "sus2"),
    ("M2", "add2"),
    ("M6", "6"),
    ("7", "7"),
    ("M7", "M7"),
    ("7sus", "7sus"),
    ("aug7", "+7"),
    ("M7♭5", "M7♭5"),
    ("M7♯5", "+M7"),
];

/// Chord types written with a lower-case numeral, and their roman suffix
const MINOR_QUALITY: [(&str, &str); 8] = [
    ("min", ""),
    ("dim", "°"),
    ("m2", "add2"),
    ("m6", "6"),
    ("m7", "7"),
    ("dim7", "°7"),
    ("m7♭5", "ø7"),
    ("mM7", "M7"),
];

const MAJOR_CIRCLE: [&str; 15] = [
    "C", "G", "D", "A", "E", "B", "F#", "C#", "F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb",
];
const MINOR_CIRCLE: [&str; 15] = [
    "A", "E", "B", "F#", "C#", "G#", "D#", "A#", "D", "G", "C", "F", "Bb", "Eb", "Ab",
];

/// Entries 0..8 of a circle carry 0..7 sharps, the rest 1..7 flats
const SHARP_KEYS: usize = 8;

/// Tonic spellings with at most seven sharps or flats in the signature
const CIRCLE_OF_FIFTHS: [(&str, [&str; 15]); 9] = [
    ("major", MAJOR_CIRCLE),
    ("minor", MINOR_CIRCLE),
    (
        "dorian",
        ["D", "A", "E", "B", "F#", "C#", "G#", "D#", "G", "C", "F", "Bb", "Eb", "Ab", "Db"],
    ),
    (
        "phrygian",
        ["E", "B", "F#", "C#", "G#", "D#", "A#", "E#", "A", "D", "G", "C", "F", "Bb", "Eb"],
    ),
    (
        "lydian",
        ["F", "C", "G", "D", "A", "E", "B", "F#", "Bb", "Eb", "Ab", "Db", "Gb", "Cb", "Fb"],
    ),
    (
        "mixolydian",
        ["G", "D", "A", "E", "B", "F#", "C#", "G#", "C", "F", "Bb", "Eb", "Ab", "Db", "Gb"],
    ),
    (
        "locrian",
        ["B", "F#", "C#", "G#", "D#", "A#", "E#", "B#", "E", "A", "D", "G", "C", "F", "Bb"],
    ),
    ("harmonic_minor", MINOR_CIRCLE),
    ("melodic_minor", MINOR_CIRCLE),
];

/// Interval symbols and their inverse
pub struct IntervalTable {
    by_symbol: HashMap<&'static str, Interval>,
    by_value: HashMap<Interval, &'static str>,
}

impl IntervalTable {
    fn build() -> Self {
        let mut by_symbol = HashMap::new();
        let mut by_value = HashMap::new();
        for &(symbol, interval) in INTERVALS.iter() {
            by_symbol.insert(symbol, interval);
            if by_value.insert(interval, symbol).is_some() {
                warn!(symbol, %interval, "duplicate interval value in interval table");
            }
        }
        Self { by_symbol, by_value }
    }

    /// Look up an interval by symbol (e.g. "m3")
    pub fn get(&self, symbol: &str) -> Option<Interval> {
        self.by_symbol.get(symbol).copied()
    }

    /// Look up the symbol naming an interval value
    pub fn symbol_of(&self, interval: Interval) -> Option<&'static str> {
        self.by_value.get(&interval).copied()
    }
}

/// Named interval patterns with an explicit inverse mapping.
///
/// Both directions are filled from the same entry list. A pattern that is
/// registered twice keeps its first name.
pub struct PatternCatalog {
    names: Vec<&'static str>,
    by_name: HashMap<&'static str, &'static [&'static str]>,
    by_pattern: HashMap<String, &'static str>,
}

impl PatternCatalog {
    fn build(kind: &str, entries: &[PatternEntry]) -> Self {
        let mut names = Vec::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_pattern = HashMap::with_capacity(entries.len());

        for &(name, pattern) in entries {
            names.push(name);
            by_name.insert(name, pattern);
            let key = pattern_key(pattern);
            if let Some(existing) = by_pattern.get(&key) {
                warn!(kind, name, existing, pattern = %key, "pattern already registered");
                continue;
            }
            by_pattern.insert(key, name);
        }

        Self {
            names,
            by_name,
            by_pattern,
        }
    }

    /// Interval pattern registered under `name`
    pub fn pattern(&self, name: &str) -> Option<&'static [&'static str]> {
        self.by_name.get(name).copied()
    }

    /// Name registered for an interval pattern (exact match)
    pub fn name_of<S: AsRef<str>>(&self, pattern: &[S]) -> Option<&'static str> {
        self.by_pattern.get(&pattern_key(pattern)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names in registration order
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Number of distinct patterns (differs from `names().len()` only on collisions)
    pub fn pattern_count(&self) -> usize {
        self.by_pattern.len()
    }
}

fn pattern_key<S: AsRef<str>>(pattern: &[S]) -> String {
    pattern
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Roman-numeral suffixes for one chord quality, with the inverse
pub struct SuffixTable {
    by_type: HashMap<&'static str, &'static str>,
    by_suffix: HashMap<&'static str, &'static str>,
}

impl SuffixTable {
    fn build(quality: &str, entries: &[(&'static str, &'static str)]) -> Self {
        let mut by_type = HashMap::with_capacity(entries.len());
        let mut by_suffix = HashMap::with_capacity(entries.len());
        for &(chord_type, suffix) in entries {
            by_type.insert(chord_type, suffix);
            if let Some(existing) = by_suffix.get(suffix) {
                warn!(quality, chord_type, existing, suffix, "roman suffix already registered");
                continue;
            }
            by_suffix.insert(suffix, chord_type);
        }
        Self { by_type, by_suffix }
    }

    /// Suffix written after the numeral for a chord type
    pub fn suffix(&self, chord_type: &str) -> Option<&'static str> {
        self.by_type.get(chord_type).copied()
    }

    /// Chord type for a suffix
    pub fn chord_type(&self, suffix: &str) -> Option<&'static str> {
        self.by_suffix.get(suffix).copied()
    }

    pub fn contains(&self, chord_type: &str) -> bool {
        self.by_type.contains_key(chord_type)
    }
}

/// Canonical tonic spellings for one key type
pub struct KeySpelling {
    tonics: Vec<&'static str>,
    by_pitch_class: HashMap<i32, &'static str>,
}

impl KeySpelling {
    fn build(tonics: &[&'static str]) -> Self {
        // Enharmonic tonics keep the one with the smaller signature.
        let mut by_pitch_class: HashMap<i32, (usize, &'static str)> = HashMap::new();
        for (i, &tonic) in tonics.iter().enumerate() {
            let Some(pc) = spelled_pitch_class(tonic) else {
                warn!(tonic, "unparseable tonic in circle of fifths");
                continue;
            };
            let signature = if i < SHARP_KEYS { i } else { i - SHARP_KEYS + 1 };
            match by_pitch_class.get(&pc) {
                Some(&(existing, _)) if existing <= signature => {}
                _ => {
                    by_pitch_class.insert(pc, (signature, tonic));
                }
            }
        }
        let by_pitch_class = by_pitch_class
            .into_iter()
            .map(|(pc, (_, tonic))| (pc, tonic))
            .collect();
        Self {
            tonics: tonics.to_vec(),
            by_pitch_class,
        }
    }

    /// Spelling this key type uses for the tonic `name`.
    ///
    /// A name already in the circle is kept; otherwise the circle entry with
    /// the same pitch class is returned. `None` if `name` cannot be parsed.
    pub fn respell(&self, name: &str) -> Option<&'static str> {
        if let Some(&tonic) = self.tonics.iter().find(|&&t| t == name) {
            return Some(tonic);
        }
        let pc = spelled_pitch_class(name)?;
        self.by_pitch_class.get(&pc).copied()
    }
}

/// Pitch class (0-11) of a spelled name such as "Ebb" or "F#"
pub fn spelled_pitch_class(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let letter = Letter::from_char(chars.next()?)?;
    let mut offset = 0;
    for c in chars {
        match c {
            SHARP => offset += 1,
            FLAT => offset -= 1,
            _ => return None,
        }
    }
    Some((letter.pitch_class() + offset).rem_euclid(OCTAVE_STEPS))
}

pub static INTERVAL_TABLE: Lazy<IntervalTable> = Lazy::new(IntervalTable::build);

pub static SCALE_CATALOG: Lazy<PatternCatalog> =
    Lazy::new(|| PatternCatalog::build("scale", &SCALES));

pub static CHORD_CATALOG: Lazy<PatternCatalog> =
    Lazy::new(|| PatternCatalog::build("chord", &CHORDS));

pub static MAJOR_SUFFIXES: Lazy<SuffixTable> =
    Lazy::new(|| SuffixTable::build("major", &MAJOR_QUALITY));

pub static MINOR_SUFFIXES: Lazy<SuffixTable> =
    Lazy::new(|| SuffixTable::build("minor", &MINOR_QUALITY));

pub static KEY_SPELLINGS: Lazy<HashMap<&'static str, KeySpelling>> = Lazy::new(|| {
    CIRCLE_OF_FIFTHS
        .iter()
        .map(|(key_type, tonics)| (*key_type, KeySpelling::build(tonics)))
        .collect()
});

/// Interval for a symbol
pub fn interval(symbol: &str) -> Option<Interval> {
    INTERVAL_TABLE.get(symbol)
}

/// Index (0-6) of a plain roman numeral degree, case-sensitive upper-case
pub fn degree_index(symbol: &str) -> Option<usize> {
    DEGREES.iter().position(|&d| d == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_pitch_class() {
        assert_eq!(Letter::C.pitch_class(), 0);
        assert_eq!(Letter::A.pitch_class(), 9);
        assert_eq!(Letter::B.pitch_class(), 11);
    }

    #[test]
    fn test_letter_advance_wraps() {
        assert_eq!(Letter::C.advance(2), Letter::E);
        assert_eq!(Letter::G.advance(1), Letter::A);
        assert_eq!(Letter::B.advance(7), Letter::B);
        assert_eq!(Letter::F.advance(4), Letter::C);
    }

    #[test]
    fn test_interval_lookup() {
        assert_eq!(interval("m3"), Some(Interval::new(2, 3)));
        assert_eq!(interval("P8"), Some(Interval::new(7, 12)));
        assert_eq!(interval("X9"), None);
        assert_eq!(INTERVAL_TABLE.symbol_of(Interval::new(4, 6)), Some("d5"));
        assert_eq!(INTERVAL_TABLE.symbol_of(Interval::new(3, 6)), Some("A4"));
    }

    #[test]
    fn test_interval_inverse_is_complete() {
        assert_eq!(INTERVAL_TABLE.by_symbol.len(), INTERVALS.len());
        for &(symbol, value) in INTERVALS.iter() {
            assert_eq!(INTERVAL_TABLE.symbol_of(value), Some(symbol));
        }
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::new(2, 3).to_string(), "2/3");
        assert_eq!(interval("P8").unwrap().to_string(), "7/12");
    }

    #[test]
    fn test_max_interval_degree() {
        let widest = INTERVALS.iter().map(|(_, i)| i.degree).max();
        assert_eq!(widest, Some(MAX_INTERVAL_DEGREE));
    }

    #[test]
    fn test_catalogs_have_no_collisions() {
        assert_eq!(SCALE_CATALOG.pattern_count(), SCALE_CATALOG.names().len());
        assert_eq!(CHORD_CATALOG.pattern_count(), CHORD_CATALOG.names().len());
    }

    #[test]
    fn test_chord_catalog_lookup() {
        assert_eq!(CHORD_CATALOG.pattern("m7"), Some(&["m3", "P5", "m7"][..]));
        assert_eq!(CHORD_CATALOG.name_of(&["M3", "A5"]), Some("aug"));
        assert_eq!(CHORD_CATALOG.name_of(&["M3".to_string(), "P5".to_string()]), Some("maj"));
        assert_eq!(CHORD_CATALOG.name_of(&["M2", "M3"]), None);
    }

    #[test]
    fn test_scale_catalog_lookup() {
        assert!(SCALE_CATALOG.contains("dorian"));
        assert!(!SCALE_CATALOG.contains("bebop"));
        assert_eq!(
            SCALE_CATALOG.name_of(&["M2", "M3", "P4", "P5", "M6", "M7"]),
            Some("major")
        );
    }

    #[test]
    fn test_every_chord_has_exactly_one_quality() {
        for &name in CHORD_CATALOG.names() {
            let major = MAJOR_SUFFIXES.contains(name);
            let minor = MINOR_SUFFIXES.contains(name);
            assert!(major ^ minor, "chord type {} must have one quality", name);
        }
    }

    #[test]
    fn test_suffixes_do_not_start_with_numeral_letters() {
        for (_, suffix) in MAJOR_QUALITY.iter().chain(MINOR_QUALITY.iter()) {
            let first = suffix.chars().next();
            assert!(!matches!(first, Some('I' | 'V' | 'i' | 'v' | '#' | 'b')));
        }
    }

    #[test]
    fn test_spelled_pitch_class() {
        assert_eq!(spelled_pitch_class("C"), Some(0));
        assert_eq!(spelled_pitch_class("Cb"), Some(11));
        assert_eq!(spelled_pitch_class("B#"), Some(0));
        assert_eq!(spelled_pitch_class("Ebb"), Some(2));
        assert_eq!(spelled_pitch_class("H"), None);
        assert_eq!(spelled_pitch_class("Cx"), None);
    }

    #[test]
    fn test_key_spelling_respell() {
        let major = &KEY_SPELLINGS["major"];
        assert_eq!(major.respell("D#"), Some("Eb"));
        assert_eq!(major.respell("Gb"), Some("Gb"));
        assert_eq!(major.respell("F#"), Some("F#"));
        assert_eq!(major.respell("E#"), Some("F"));
        assert_eq!(major.respell("C#"), Some("C#"));
        assert_eq!(major.respell("Fb"), Some("E"));

        // B# locrian (7 sharps) loses to C locrian (5 flats)
        assert_eq!(KEY_SPELLINGS["locrian"].respell("Dbb"), Some("C"));

        let minor = &KEY_SPELLINGS["minor"];
        assert_eq!(minor.respell("D#"), Some("D#"));
        assert_eq!(minor.respell("Db"), Some("C#"));
        assert_eq!(minor.respell("Gb"), Some("F#"));
    }

    #[test]
    fn test_key_spelling_covers_every_pitch_class() {
        for (key_type, spelling) in KEY_SPELLINGS.iter() {
            for pc in 0..OCTAVE_STEPS {
                assert!(
                    spelling.by_pitch_class.contains_key(&pc),
                    "{} has no tonic for pitch class {}",
                    key_type,
                    pc
                );
            }
        }
    }

    #[test]
    fn test_degree_index() {
        assert_eq!(degree_index("I"), Some(0));
        assert_eq!(degree_index("VII"), Some(6));
        assert_eq!(degree_index("vii"), None);
        assert_eq!(degree_index("VIII"), None);
    }
}
