// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled, octave-placed pitches.
//!
//! A pitch keeps its letter and accidental count separately from its
//! absolute value, so enharmonic spellings (D# / Eb) stay distinct even
//! though they sound the same. The absolute value follows the MIDI
//! convention: C4 = 60, twelve per octave, octave offset by one.

use std::cmp::Ordering;
use std::fmt;

use super::chord::Chord;
use super::error::{Result, TheoryError};
use super::reference::{self, Interval, Letter, CHORD_CATALOG, FLAT, OCTAVE_STEPS, SCALE_CATALOG, SHARP};
use super::sequence::PitchSequence;

/// Octave used when a name is given without one
pub const DEFAULT_OCTAVE: i32 = 4;

/// A single named tone
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pitch {
    letter: Letter,
    /// Positive = sharps, negative = flats
    accidentals: i32,
    octave: i32,
}

impl Pitch {
    /// Parse a spelled name in the default octave 4 (e.g. "D#", "Ebb")
    pub fn new(name: &str) -> Result<Self> {
        Self::with_octave(name, DEFAULT_OCTAVE)
    }

    /// Parse a spelled name in the given octave
    pub fn with_octave(name: &str, octave: i32) -> Result<Self> {
        let (letter, accidentals) = parse_spelling(name)?;
        Ok(Self::from_parts(letter, accidentals, octave))
    }

    /// Build a pitch from its components
    pub fn from_parts(letter: Letter, accidentals: i32, octave: i32) -> Self {
        Self {
            letter,
            accidentals,
            octave,
        }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Signed accidental count: +1 per sharp, -1 per flat
    pub fn accidentals(&self) -> i32 {
        self.accidentals
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Spelled name without octave (e.g. "Ebb")
    pub fn name(&self) -> String {
        let mark = if self.accidentals > 0 { SHARP } else { FLAT };
        let mut name = String::with_capacity(1 + self.accidentals.unsigned_abs() as usize);
        name.push(self.letter.as_char());
        name.extend(std::iter::repeat(mark).take(self.accidentals.unsigned_abs() as usize));
        name
    }

    /// Absolute value (C4 = 60)
    pub fn absolute_value(&self) -> i32 {
        self.letter.pitch_class() + self.accidentals + (self.octave + 1) * OCTAVE_STEPS
    }

    /// Pitch class 0-11, independent of spelling
    pub fn pitch_class(&self) -> i32 {
        self.absolute_value().rem_euclid(OCTAVE_STEPS)
    }

    /// Returns a new pitch `symbol` above this one (e.g. "m3").
    ///
    /// The letter advances by the interval's degree and the accidentals
    /// absorb whatever the semitone count requires, so D# + m3 = F#, not Gb.
    /// `self` is left unchanged.
    pub fn add(&self, symbol: &str) -> Result<Pitch> {
        let interval =
            reference::interval(symbol).ok_or_else(|| TheoryError::UnknownInterval(symbol.to_string()))?;
        Ok(self.add_interval(interval))
    }

    /// Returns a new pitch `interval` above this one. `self` is left unchanged.
    pub fn add_interval(&self, interval: Interval) -> Pitch {
        let letter = self.letter.advance(interval.degree);

        // Passing B -> C moves into the next octave
        let mut octave = self.octave;
        if letter.pitch_class() <= self.letter.pitch_class() {
            octave += 1;
        }

        let natural = letter.pitch_class() + (octave + 1) * OCTAVE_STEPS;
        let target = self.absolute_value() + interval.steps;

        Pitch::from_parts(letter, target - natural, octave)
    }

    /// Moves the pitch to `octave` in place, keeping its spelling.
    pub fn set_octave(&mut self, octave: i32) {
        self.octave = octave;
    }

    /// Octave `delta` octaves away, or `None` if the absolute value there
    /// would not fit in an `i32`
    pub(crate) fn shifted_octave(&self, delta: i64) -> Option<i32> {
        let octave = i32::try_from(i64::from(self.octave) + delta).ok()?;
        let value = i64::from(self.letter.pitch_class())
            + i64::from(self.accidentals)
            + (i64::from(octave) + 1) * i64::from(OCTAVE_STEPS);
        i32::try_from(value).ok().map(|_| octave)
    }

    /// Raises the pitch one semitone in place.
    ///
    /// A trailing flat is cancelled, otherwise a sharp is appended. The
    /// octave never changes.
    pub fn semitone_up(&mut self) {
        self.accidentals += 1;
    }

    /// Lowers the pitch one semitone in place.
    ///
    /// A trailing sharp is cancelled, otherwise a flat is appended. The
    /// octave never changes.
    pub fn semitone_down(&mut self) {
        self.accidentals -= 1;
    }

    /// Independent copy with identical spelling and octave
    pub fn copy(&self) -> Pitch {
        self.clone()
    }

    /// Same absolute value, regardless of spelling
    pub fn is_enharmonic(&self, other: &Pitch) -> bool {
        self.absolute_value() == other.absolute_value()
    }

    /// Orders pitches by absolute value only.
    ///
    /// Enharmonic pitches compare `Equal` here while still being unequal
    /// under `==`, which is why `Pitch` does not implement `Ord`.
    pub fn cmp_value(&self, other: &Pitch) -> Ordering {
        self.absolute_value().cmp(&other.absolute_value())
    }

    /// Builds a scale of `scale_type` rooted on a copy of this pitch
    pub fn scale(&self, scale_type: &str) -> Result<PitchSequence> {
        let intervals = SCALE_CATALOG
            .pattern(scale_type)
            .ok_or_else(|| TheoryError::UnknownScaleType(scale_type.to_string()))?;
        PitchSequence::new(self.copy(), intervals)
    }

    /// Builds a chord of `chord_type` rooted on a copy of this pitch
    pub fn chord(&self, chord_type: &str) -> Result<Chord> {
        let intervals = CHORD_CATALOG
            .pattern(chord_type)
            .ok_or_else(|| TheoryError::UnknownChordType(chord_type.to_string()))?;
        Chord::new(self.copy(), intervals)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}[{}]", self.name(), self.octave, self.absolute_value())
    }
}

/// Split a spelled name into its letter and signed accidental count
pub(crate) fn parse_spelling(name: &str) -> Result<(Letter, i32)> {
    let mut chars = name.chars();
    let first = chars.next().ok_or_else(|| TheoryError::InvalidNoteName {
        name: name.to_string(),
        letter: String::new(),
    })?;
    let letter = Letter::from_char(first).ok_or_else(|| TheoryError::InvalidNoteName {
        name: name.to_string(),
        letter: first.to_string(),
    })?;

    let marks = chars.as_str();
    let count = marks.chars().count() as i32;
    if marks.is_empty() {
        Ok((letter, 0))
    } else if marks.chars().all(|c| c == SHARP) {
        Ok((letter, count))
    } else if marks.chars().all(|c| c == FLAT) {
        Ok((letter, -count))
    } else {
        Err(TheoryError::InvalidAccidental {
            name: name.to_string(),
            accidental: marks.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_octave() {
        let d_sharp = Pitch::new("D#").unwrap();
        assert_eq!(d_sharp.octave(), 4);
        assert_eq!(d_sharp.absolute_value(), 63);
        assert_eq!(d_sharp.to_string(), "D#4[63]");
    }

    #[test]
    fn test_explicit_octave() {
        let d_sharp = Pitch::with_octave("D#", 5).unwrap();
        assert_eq!(d_sharp.absolute_value(), 75);
        assert_eq!(Pitch::with_octave("C", 4).unwrap().absolute_value(), 60);
        assert_eq!(Pitch::with_octave("A", 4).unwrap().absolute_value(), 69);
        assert_eq!(Pitch::with_octave("C", -1).unwrap().absolute_value(), 0);
    }

    #[test]
    fn test_multiple_accidentals() {
        let e_double_flat = Pitch::new("Ebb").unwrap();
        assert_eq!(e_double_flat.accidentals(), -2);
        assert_eq!(e_double_flat.absolute_value(), 62);
        assert_eq!(e_double_flat.name(), "Ebb");

        let f_double_sharp = Pitch::new("F##").unwrap();
        assert_eq!(f_double_sharp.absolute_value(), 67);
    }

    #[test]
    fn test_cb_sits_below_its_octave() {
        let c_flat = Pitch::new("Cb").unwrap();
        assert_eq!(c_flat.octave(), 4);
        assert_eq!(c_flat.absolute_value(), 59);
    }

    #[test]
    fn test_invalid_note_name() {
        assert!(matches!(
            Pitch::new("H"),
            Err(TheoryError::InvalidNoteName { .. })
        ));
        assert!(matches!(
            Pitch::new("c"),
            Err(TheoryError::InvalidNoteName { .. })
        ));
        assert!(matches!(
            Pitch::new(""),
            Err(TheoryError::InvalidNoteName { .. })
        ));
    }

    #[test]
    fn test_invalid_accidental() {
        assert!(matches!(
            Pitch::new("Cx"),
            Err(TheoryError::InvalidAccidental { .. })
        ));
        assert!(matches!(
            Pitch::new("C#b"),
            Err(TheoryError::InvalidAccidental { .. })
        ));
    }

    #[test]
    fn test_add_spells_by_letter() {
        let d_sharp = Pitch::with_octave("D#", 5).unwrap();
        let third = d_sharp.add("m3").unwrap();
        assert_eq!(third.name(), "F#");
        assert_eq!(third.octave(), 5);
        assert_eq!(third.absolute_value(), 78);

        let seventh = d_sharp.add("m7").unwrap();
        assert_eq!(seventh.name(), "C#");
        assert_eq!(seventh.octave(), 6);
        assert_eq!(seventh.absolute_value(), 85);
    }

    #[test]
    fn test_add_produces_double_accidentals() {
        let d_sharp = Pitch::new("D#").unwrap();
        let sixth = d_sharp.add("M6").unwrap();
        assert_eq!(sixth.name(), "B#");
        assert_eq!(sixth.absolute_value(), 72);

        let seventh = Pitch::new("D#").unwrap().add("M7").unwrap();
        assert_eq!(seventh.name(), "C##");
        assert_eq!(seventh.octave(), 5);
        assert_eq!(seventh.absolute_value(), 74);
    }

    #[test]
    fn test_add_octave() {
        let c = Pitch::new("C").unwrap();
        let octave = c.add("P8").unwrap();
        assert_eq!(octave.name(), "C");
        assert_eq!(octave.octave(), 5);
        assert_eq!(octave.absolute_value(), 72);
    }

    #[test]
    fn test_add_leaves_original_untouched() {
        let c = Pitch::new("C").unwrap();
        let _ = c.add("P5").unwrap();
        assert_eq!(c, Pitch::new("C").unwrap());
    }

    #[test]
    fn test_add_unknown_interval() {
        let c = Pitch::new("C").unwrap();
        assert_eq!(
            c.add("P9"),
            Err(TheoryError::UnknownInterval("P9".to_string()))
        );
    }

    #[test]
    fn test_set_octave() {
        let mut g = Pitch::new("G").unwrap();
        g.set_octave(5);
        assert_eq!(g.octave(), 5);
        assert_eq!(g.absolute_value(), 79);

        g.set_octave(2);
        assert_eq!(g.absolute_value(), 43);
        assert_eq!(g.name(), "G");
    }

    #[test]
    fn test_semitone_nudges() {
        let mut e_flat = Pitch::new("Eb").unwrap();
        e_flat.semitone_down();
        assert_eq!(e_flat.name(), "Ebb");
        assert_eq!(e_flat.absolute_value(), 62);

        e_flat.semitone_up();
        assert_eq!(e_flat.name(), "Eb");
        e_flat.semitone_up();
        assert_eq!(e_flat.name(), "E");
        e_flat.semitone_up();
        assert_eq!(e_flat.name(), "E#");
        assert_eq!(e_flat.absolute_value(), 65);
        assert_eq!(e_flat.octave(), 4);
    }

    #[test]
    fn test_semitone_down_cancels_sharp() {
        let mut f_sharp = Pitch::new("F#").unwrap();
        f_sharp.semitone_down();
        assert_eq!(f_sharp.name(), "F");
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Pitch::with_octave("Bb", 3).unwrap();
        let mut copy = original.copy();
        assert_eq!(copy, original);

        copy.set_octave(6);
        copy.semitone_up();
        assert_eq!(original.to_string(), "Bb3[58]");
        assert_eq!(copy.to_string(), "B6[95]");
    }

    #[test]
    fn test_enharmonic_ordering() {
        let d_sharp = Pitch::new("D#").unwrap();
        let e_flat = Pitch::new("Eb").unwrap();
        assert_ne!(d_sharp, e_flat);
        assert!(d_sharp.is_enharmonic(&e_flat));
        assert_eq!(d_sharp.cmp_value(&e_flat), Ordering::Equal);
        assert_eq!(d_sharp.pitch_class(), 3);

        let e = Pitch::new("E").unwrap();
        assert_eq!(e_flat.cmp_value(&e), Ordering::Less);
    }

    #[test]
    fn test_factories() {
        let c = Pitch::new("C").unwrap();
        assert_eq!(c.scale("major").unwrap().len(), 7);
        assert_eq!(c.chord("maj").unwrap().len(), 3);
        assert_eq!(
            c.scale("bebop").unwrap_err(),
            TheoryError::UnknownScaleType("bebop".to_string())
        );
        assert_eq!(
            c.chord("maj13").unwrap_err(),
            TheoryError::UnknownChordType("maj13".to_string())
        );
    }
}
