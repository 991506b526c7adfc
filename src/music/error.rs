// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.

use thiserror::Error;

/// Errors raised while parsing or resolving musical symbols.
///
/// Every variant is an input error surfaced at the point of detection;
/// nothing in the engine catches or retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The leading letter of a note name is not one of A..G
    #[error("wrong note name '{letter}' in '{name}'")]
    InvalidNoteName { name: String, letter: String },

    /// The trailing marks of a note name are not uniform sharps or flats
    #[error("wrong note accidental '{accidental}' in '{name}'")]
    InvalidAccidental { name: String, accidental: String },

    /// Interval symbol not present in the interval table
    #[error("unknown interval symbol '{0}'")]
    UnknownInterval(String),

    /// Scale type not present in the scale catalog
    #[error("unknown scale type '{0}'")]
    UnknownScaleType(String),

    /// Chord type (or chord interval pattern) not present in the chord catalog
    #[error("unknown chord type '{0}'")]
    UnknownChordType(String),

    /// Scale type that cannot be used as a key
    #[error("unknown key type '{0}'")]
    UnknownKeyType(String),

    /// Degree symbol that does not resolve to I..VII
    #[error("unknown degree symbol '{0}'")]
    UnknownDegreeSymbol(String),

    /// Key note name whose accidental character is neither sharp nor flat
    #[error("malformed key note name '{0}'")]
    MalformedKeyName(String),

    /// No registered chord pattern matches the requested scale degrees
    #[error("no chord pattern matches scale degrees {indexes:?} ({intervals})")]
    NoMatchingChordPattern { indexes: Vec<usize>, intervals: String },

    /// Inversion whose octave placement leaves the representable pitch range
    #[error("inversion {0} moves chord tones out of range")]
    InversionOutOfRange(i32),
}

/// Result alias used throughout the theory engine.
pub type Result<T> = std::result::Result<T, TheoryError>;
