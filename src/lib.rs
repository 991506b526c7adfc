// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Symbolic music theory engine.
//!
//! Builds consistently spelled pitches, scales, chords and keys from their
//! textual names, and identifies chord types from scale degrees.

pub mod config;
pub mod music;

pub use music::{Alteration, Chord, Degree, Interval, Key, Letter, Pitch, PitchSequence, TheoryError};
