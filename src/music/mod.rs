// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory engine.
//!
//! Spelled pitches, interval arithmetic, scales, chords with inversions,
//! roman numeral degrees and keys that resolve degrees into chords.

pub mod chord;
pub mod degree;
pub mod error;
pub mod key;
pub mod pitch;
pub mod reference;
pub mod sequence;

pub use chord::Chord;
pub use degree::{Alteration, Degree};
pub use error::{Result, TheoryError};
pub use key::Key;
pub use pitch::{Pitch, DEFAULT_OCTAVE};
pub use reference::{Interval, Letter};
pub use sequence::PitchSequence;
