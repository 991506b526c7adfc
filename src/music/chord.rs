// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords: a pitch sequence plus inversion, naming and degree label.

use std::fmt;

use super::error::{Result, TheoryError};
use super::pitch::Pitch;
use super::reference::CHORD_CATALOG;
use super::sequence::{write_pitches, PitchSequence};

/// A chord built from a registered chord interval pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    sequence: PitchSequence,
    chord_type: &'static str,
    name: String,
    position: i32,
    theory_degree: String,
}

impl Chord {
    /// Builds a chord on `root` from an interval pattern.
    ///
    /// Fails with `UnknownChordType` unless the pattern is registered
    /// exactly (same symbols, same order).
    pub fn new<S: AsRef<str>>(root: Pitch, intervals: &[S]) -> Result<Self> {
        let chord_type = CHORD_CATALOG.name_of(intervals).ok_or_else(|| {
            let pattern: Vec<&str> = intervals.iter().map(|s| s.as_ref()).collect();
            TheoryError::UnknownChordType(pattern.join(" "))
        })?;

        let suffix = if chord_type == "maj" { "" } else { chord_type };
        let name = format!("{}{}", root.name(), suffix);

        Ok(Self {
            sequence: PitchSequence::new(root, intervals)?,
            chord_type,
            name,
            position: 0,
            theory_degree: String::new(),
        })
    }

    /// Root spelling plus chord-type suffix ("Eb", "D#m7", "Caug")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered chord type ("maj", "m7", ...)
    pub fn chord_type(&self) -> &'static str {
        self.chord_type
    }

    /// Current inversion, 0 = root position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Roman numeral label, empty unless the chord came from a key
    pub fn theory_degree(&self) -> &str {
        &self.theory_degree
    }

    pub fn set_theory_degree(&mut self, label: impl Into<String>) {
        self.theory_degree = label.into();
    }

    pub fn pitches(&self) -> &[Pitch] {
        self.sequence.pitches()
    }

    /// The underlying pitch sequence
    pub fn sequence(&self) -> &PitchSequence {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Nominal octave of the chord
    pub fn octave(&self) -> i32 {
        self.sequence.octave()
    }

    /// Moves the chord to inversion `target` in place.
    ///
    /// Each step up takes the lowest-indexed tone, raises it an octave and
    /// puts it last; each step down takes the last tone, lowers it an octave
    /// and puts it first. Pitch classes never change, only octave and order.
    ///
    /// Fails with `InversionOutOfRange`, leaving the chord untouched, if a
    /// tone would land outside the representable pitch range.
    pub fn set_position(&mut self, target: i32) -> Result<()> {
        let steps = i64::from(target) - i64::from(self.position);
        let pitches = self.sequence.pitches_mut();
        let len = pitches.len() as i64;
        if steps == 0 || len == 0 {
            self.position = target;
            return Ok(());
        }

        // `len` steps up raise every tone one octave and restore the order
        let cycles = steps.div_euclid(len);
        let rest = steps.rem_euclid(len) as usize;

        let octaves = pitches
            .iter()
            .enumerate()
            .map(|(i, pitch)| {
                let shift = cycles + i64::from(i < rest);
                pitch
                    .shifted_octave(shift)
                    .ok_or(TheoryError::InversionOutOfRange(target))
            })
            .collect::<Result<Vec<_>>>()?;

        for (pitch, octave) in pitches.iter_mut().zip(octaves) {
            pitch.set_octave(octave);
        }
        pitches.rotate_left(rest);

        self.position = target;
        Ok(())
    }

    /// Places every tone in exactly `octave`, in place.
    ///
    /// Unlike [`Chord::shift_octave`] this discards the octave spread left by
    /// generation or inversion.
    pub fn set_octave(&mut self, octave: i32) {
        self.sequence.stamp_octave(octave);
    }

    /// Moves the whole chord to `octave` in place, keeping relative octaves.
    pub fn shift_octave(&mut self, octave: i32) {
        self.sequence.shift_octave(octave);
    }

    /// Reorders the tones by ascending absolute value in place
    pub fn sort(&mut self) {
        self.sequence.sort();
    }

    /// Deep copy
    pub fn copy(&self) -> Chord {
        self.clone()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} inversion[{}] ",
            self.name, self.theory_degree, self.position
        )?;
        write_pitches(f, self.pitches())
    }
}
