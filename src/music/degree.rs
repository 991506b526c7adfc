// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman numeral degree symbols.
//!
//! A degree symbol is an optional alteration mark (`b` or `#`), a run of
//! numeral letters (I and V only, upper case for major-quality chords, lower
//! case for minor-quality chords) and an optional chord suffix:
//! `V7`, `ii°`, `bIII+`, `#ivø7`.

use super::error::{Result, TheoryError};
use super::reference::{self, CHORD_CATALOG, FLAT, MAJOR_SUFFIXES, MINOR_SUFFIXES, SHARP};

/// Chromatic alteration applied to a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alteration {
    Flat,
    Sharp,
}

impl Alteration {
    fn from_char(c: char) -> Option<Self> {
        match c {
            FLAT => Some(Alteration::Flat),
            SHARP => Some(Alteration::Sharp),
            _ => None,
        }
    }
}

/// The three parts of a degree symbol, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Parts<'a> {
    alteration: &'a str,
    numeral: &'a str,
    suffix: &'a str,
}

fn split(symbol: &str) -> Parts<'_> {
    let alteration_len = match symbol.chars().next() {
        Some(c) if Alteration::from_char(c).is_some() => c.len_utf8(),
        _ => 0,
    };
    let rest = &symbol[alteration_len..];
    let numeral_len = rest
        .find(|c: char| !matches!(c, 'I' | 'V' | 'i' | 'v'))
        .unwrap_or(rest.len());

    Parts {
        alteration: &symbol[..alteration_len],
        numeral: &rest[..numeral_len],
        suffix: &rest[numeral_len..],
    }
}

/// Stateless conversions between degree symbols and chord types
pub struct Degree;

impl Degree {
    /// Writes `base` (e.g. "IV", "bIII") as a roman numeral for `chord_type`.
    ///
    /// Major-quality types keep an upper-case numeral, minor-quality types
    /// are lower-cased; the quality's suffix is appended ("iv7", "bIII+").
    pub fn to_roman_numeral(base: &str, chord_type: &str) -> Result<String> {
        if !CHORD_CATALOG.contains(chord_type) {
            return Err(TheoryError::UnknownChordType(chord_type.to_string()));
        }
        let parts = split(base);

        if let Some(suffix) = MAJOR_SUFFIXES.suffix(chord_type) {
            Ok(format!("{}{}{}", parts.alteration, parts.numeral.to_uppercase(), suffix))
        } else if let Some(suffix) = MINOR_SUFFIXES.suffix(chord_type) {
            Ok(format!("{}{}{}", parts.alteration, parts.numeral.to_lowercase(), suffix))
        } else {
            Err(TheoryError::UnknownChordType(chord_type.to_string()))
        }
    }

    /// Chord type named by a roman numeral ("V7" -> "7", "ii" -> "min").
    pub fn to_chord_type(roman: &str) -> Result<&'static str> {
        let parts = split(roman);
        if parts.numeral.is_empty() {
            return Err(TheoryError::UnknownDegreeSymbol(roman.to_string()));
        }

        let table = if parts.numeral == parts.numeral.to_uppercase() {
            &*MAJOR_SUFFIXES
        } else {
            &*MINOR_SUFFIXES
        };
        table
            .chord_type(parts.suffix)
            .ok_or_else(|| TheoryError::UnknownChordType(roman.to_string()))
    }

    /// Degree without its chord suffix, numeral upper-cased ("biv7" -> "bIV")
    pub fn to_base_roman(roman: &str) -> String {
        let parts = split(roman);
        format!("{}{}", parts.alteration, parts.numeral.to_uppercase())
    }

    /// Splits a base degree ("bIII", "V") into its alteration and 0-based index.
    pub fn parse_base(base: &str) -> Result<(Option<Alteration>, usize)> {
        let mut chars = base.chars();
        let alteration = chars.next().and_then(Alteration::from_char);
        let symbol = if alteration.is_some() { chars.as_str() } else { base };

        let index = reference::degree_index(symbol)
            .ok_or_else(|| TheoryError::UnknownDegreeSymbol(base.to_string()))?;
        Ok((alteration, index))
    }
}
