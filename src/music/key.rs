// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keys: a tonic plus a seven-note scale type.
//!
//! A key resolves degree symbols into chords on its scale and identifies
//! the chord type stacked on a set of scale-degree indexes.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use super::chord::Chord;
use super::degree::{Alteration, Degree};
use super::error::{Result, TheoryError};
use super::pitch::{parse_spelling, Pitch};
use super::reference::{
    Interval, Letter, CHORD_CATALOG, DEGREES, FLAT, INTERVAL_TABLE, KEY_SPELLINGS,
    MAX_INTERVAL_DEGREE, OCTAVE_STEPS, SHARP,
};
use super::sequence::PitchSequence;

/// A musical key with its canonical diatonic scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    key_type: String,
    name: String,
    scale: PitchSequence,
}

impl Key {
    /// Key on a tonic name with auto-alteration enabled (e.g. "Cb", "major")
    pub fn new(note: &str, key_type: &str) -> Result<Self> {
        Self::with_alteration(note, key_type, true)
    }

    /// Key on a tonic name.
    ///
    /// With `auto_alteration`, a tonic carrying an accidental is respelled
    /// to the spelling `key_type` uses on the circle of fifths, so
    /// "D#" major becomes Eb major instead of a scale full of double sharps.
    pub fn with_alteration(note: &str, key_type: &str, auto_alteration: bool) -> Result<Self> {
        let tonic = if auto_alteration && note.chars().count() > 1 {
            respell_tonic(note, key_type)?
        } else {
            note.to_string()
        };
        Self::from_pitch(Pitch::new(&tonic)?, key_type)
    }

    /// Key on an already-built tonic pitch; no respelling happens
    pub fn from_pitch(root: Pitch, key_type: &str) -> Result<Self> {
        let scale = root.scale(key_type)?;
        if scale.len() != DEGREES.len() {
            return Err(TheoryError::UnknownKeyType(key_type.to_string()));
        }

        let name = format!("{} {}", root.name(), key_type);
        debug!(key = %name, "built key");

        Ok(Self {
            key_type: key_type.to_string(),
            name,
            scale,
        })
    }

    /// "<tonic> <type>", e.g. "Eb major"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scale type the key was built from
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// The key's seven-note scale
    pub fn scale(&self) -> &PitchSequence {
        &self.scale
    }

    pub fn root(&self) -> &Pitch {
        self.scale.root()
    }

    pub fn octave(&self) -> i32 {
        self.scale.octave()
    }

    /// Moves the key's scale to `octave` in place, keeping relative octaves
    pub fn set_octave(&mut self, octave: i32) {
        self.scale.shift_octave(octave);
    }

    /// Orders keys by the absolute value of their tonic
    pub fn cmp_root(&self, other: &Key) -> Ordering {
        self.root().cmp_value(other.root())
    }

    /// Chord of `chord_type` on a (possibly altered) degree, e.g. ("bIII", "aug").
    ///
    /// The degree's scale tone is copied, nudged a semitone for a `b`/`#`
    /// prefix and used as the chord root. The chord is labelled with its
    /// roman numeral ("bIII+"). The key itself is never modified.
    pub fn chord(&self, degree: &str, chord_type: &str) -> Result<Chord> {
        let (alteration, index) = Degree::parse_base(degree)?;
        let mut root = self
            .scale
            .get(index)
            .ok_or_else(|| TheoryError::UnknownDegreeSymbol(degree.to_string()))?
            .copy();

        match alteration {
            Some(Alteration::Flat) => root.semitone_down(),
            Some(Alteration::Sharp) => root.semitone_up(),
            None => {}
        }

        let mut chord = root.chord(chord_type)?;
        chord.set_theory_degree(Degree::to_roman_numeral(degree, chord_type)?);
        trace!(key = %self.name, degree, chord_type, chord = %chord, "resolved degree");
        Ok(chord)
    }

    /// Chord for a traditional roman numeral such as "V7", "ii" or "bVII"
    pub fn chord_from_numeral(&self, roman: &str) -> Result<Chord> {
        let chord_type = Degree::to_chord_type(roman)?;
        self.chord(&Degree::to_base_roman(roman), chord_type)
    }

    /// Chord type formed by the scale tones at `indexes` (0 = I).
    ///
    /// The first index is the root. Indexes past 6 reach into the next
    /// octave, so `[4, 6, 8, 10]` is the dominant seventh chord.
    pub fn identify_chord_type(&self, indexes: &[usize]) -> Result<&'static str> {
        let (&root_index, members) = indexes
            .split_first()
            .ok_or_else(|| no_match(indexes, &[]))?;
        let root_value = self
            .degree_value(root_index)
            .ok_or_else(|| no_match(indexes, &[]))?;

        let intervals = members
            .iter()
            .map(|&index| {
                let degree = index.abs_diff(root_index);
                if degree > MAX_INTERVAL_DEGREE {
                    return None;
                }
                let steps = self.degree_value(index)?.checked_sub(root_value)?.checked_abs()?;
                Some(Interval::new(degree, steps))
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| no_match(indexes, &[]))?;

        let symbols = intervals
            .iter()
            .map(|&interval| INTERVAL_TABLE.symbol_of(interval))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| no_match(indexes, &intervals))?;

        let chord_type = CHORD_CATALOG
            .name_of(&symbols)
            .ok_or_else(|| no_match(indexes, &intervals))?;
        debug!(key = %self.name, ?indexes, ?symbols, chord_type, "identified chord");
        Ok(chord_type)
    }

    /// Chord formed by the scale tones at `indexes`, labelled with its
    /// roman numeral and rooted on the first index.
    pub fn identify_chord(&self, indexes: &[usize]) -> Result<Chord> {
        let chord_type = self.identify_chord_type(indexes)?;
        let root_index = indexes[0];
        let degree = root_index % DEGREES.len();

        let mut root = self.scale.pitches()[degree].copy();
        let octave = i32::try_from(root_index / DEGREES.len())
            .ok()
            .and_then(|wraps| root.octave().checked_add(wraps))
            .ok_or_else(|| no_match(indexes, &[]))?;
        root.set_octave(octave);

        let mut chord = root.chord(chord_type)?;
        chord.set_theory_degree(Degree::to_roman_numeral(DEGREES[degree], chord_type)?);
        Ok(chord)
    }

    /// Triad stacked in thirds on an unaltered degree ("I".."VII")
    pub fn diatonic_triad(&self, degree: &str) -> Result<Chord> {
        let index = diatonic_index(degree)?;
        self.identify_chord(&[index, index + 2, index + 4])
    }

    /// Seventh chord stacked in thirds on an unaltered degree ("I".."VII")
    pub fn diatonic_seventh(&self, degree: &str) -> Result<Chord> {
        let index = diatonic_index(degree)?;
        self.identify_chord(&[index, index + 2, index + 4, index + 6])
    }

    /// Absolute value of scale degree `index`, wrapping into higher octaves.
    /// `None` if the value does not fit in an `i32`.
    fn degree_value(&self, index: usize) -> Option<i32> {
        let len = self.scale.len();
        let wraps = i32::try_from(index / len).ok()?;
        wraps
            .checked_mul(OCTAVE_STEPS)?
            .checked_add(self.scale.pitches()[index % len].absolute_value())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn diatonic_index(degree: &str) -> Result<usize> {
    match Degree::parse_base(degree)? {
        (None, index) => Ok(index),
        (Some(_), _) => Err(TheoryError::UnknownDegreeSymbol(degree.to_string())),
    }
}

fn no_match(indexes: &[usize], intervals: &[Interval]) -> TheoryError {
    let intervals = intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    TheoryError::NoMatchingChordPattern {
        indexes: indexes.to_vec(),
        intervals,
    }
}

/// Respell a tonic with an accidental to the spelling `key_type` expects
fn respell_tonic(note: &str, key_type: &str) -> Result<String> {
    let mut chars = note.chars();
    let first = chars.next().unwrap_or_default();
    if Letter::from_char(first).is_none() {
        return Err(TheoryError::InvalidNoteName {
            name: note.to_string(),
            letter: first.to_string(),
        });
    }
    if !chars.all(|c| c == SHARP || c == FLAT) {
        return Err(TheoryError::MalformedKeyName(note.to_string()));
    }
    parse_spelling(note)?;

    let spelling = KEY_SPELLINGS
        .get(key_type)
        .ok_or_else(|| TheoryError::UnknownKeyType(key_type.to_string()))?;
    let respelled = spelling
        .respell(note)
        .ok_or_else(|| TheoryError::MalformedKeyName(note.to_string()))?;

    if respelled != note {
        debug!(requested = note, respelled, key_type, "respelled key tonic");
    }
    Ok(respelled.to_string())
}
