// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Ordered pitch sequences generated from a root and interval symbols.

use std::fmt;

use super::error::Result;
use super::pitch::Pitch;
use super::reference::SCALE_CATALOG;

/// An ordered collection of pitches built from a root (a scale).
///
/// Element 0 is the root until [`PitchSequence::sort`] is called; the rest
/// are in generation order, which is not necessarily pitch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchSequence {
    pitches: Vec<Pitch>,
    intervals: Vec<String>,
    octave: i32,
}

impl PitchSequence {
    /// Builds `root` followed by `root + interval` for every interval symbol.
    ///
    /// The interval list is taken as already resolved; scale and chord names
    /// are looked up by the factories on [`Pitch`].
    pub fn new<S: AsRef<str>>(root: Pitch, intervals: &[S]) -> Result<Self> {
        let mut pitches = Vec::with_capacity(intervals.len() + 1);
        for symbol in intervals {
            pitches.push(root.add(symbol.as_ref())?);
        }
        pitches.insert(0, root);

        Ok(Self {
            octave: pitches[0].octave(),
            intervals: intervals.iter().map(|s| s.as_ref().to_string()).collect(),
            pitches,
        })
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub(crate) fn pitches_mut(&mut self) -> &mut [Pitch] {
        &mut self.pitches
    }

    /// Element 0 (the root unless the sequence has been sorted)
    pub fn root(&self) -> &Pitch {
        &self.pitches[0]
    }

    pub fn get(&self, index: usize) -> Option<&Pitch> {
        self.pitches.get(index)
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Interval symbols the sequence was generated from
    pub fn intervals(&self) -> &[String] {
        &self.intervals
    }

    /// Registered scale name for the interval pattern, if any
    pub fn scale_type(&self) -> Option<&'static str> {
        SCALE_CATALOG.name_of(&self.intervals)
    }

    /// Nominal octave of the sequence
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Moves the whole sequence to `octave` in place.
    ///
    /// Every pitch is shifted by the same number of octaves, so pitches that
    /// crossed into the next octave during generation stay above the rest.
    pub fn shift_octave(&mut self, octave: i32) {
        let delta = octave - self.octave;
        for pitch in &mut self.pitches {
            let shifted = pitch.octave() + delta;
            pitch.set_octave(shifted);
        }
        self.octave = octave;
    }

    /// Places every pitch in exactly `octave`, dropping any octave spread.
    pub(crate) fn stamp_octave(&mut self, octave: i32) {
        for pitch in &mut self.pitches {
            pitch.set_octave(octave);
        }
        self.octave = octave;
    }

    /// Reorders the pitches by ascending absolute value in place.
    ///
    /// After sorting, element 0 is the lowest pitch, not necessarily the root.
    pub fn sort(&mut self) {
        self.pitches.sort_by(Pitch::cmp_value);
    }

    /// Deep copy
    pub fn copy(&self) -> PitchSequence {
        self.clone()
    }
}

/// Writes `{p1, p2, ...}`
pub(crate) fn write_pitches(f: &mut fmt::Formatter<'_>, pitches: &[Pitch]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, pitch) in pitches.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pitch)?;
    }
    write!(f, "}}")
}

impl fmt::Display for PitchSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.root().name())?;
        if let Some(scale_type) = self.scale_type() {
            write!(f, "{} ", scale_type)?;
        }
        write!(f, "scale ")?;
        write_pitches(f, &self.pitches)
    }
}
