// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression files.
//!
//! A progression file names a key and a list of degrees to resolve in it.
//! Files are YAML unless their extension is `.toml`:
//!
//! ```yaml
//! key:
//!   note: "Bb"
//!   scale: major
//! progression:
//!   - I
//!   - vi7
//!   - degree: IV
//!     position: 1
//!   - degree: bVII
//!     chord: "7"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::{self, Chord, Key, DEFAULT_OCTAVE};

/// Root of a progression file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressionFile {
    /// Key the progression is written in
    #[serde(default)]
    pub key: KeyConfig,
    /// Degrees to resolve, in order
    #[serde(default)]
    pub progression: Vec<ProgressionStep>,
}

impl ProgressionFile {
    /// Load a progression file, TOML for `.toml` paths and YAML otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read progression file: {:?}", path))?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        };
        parsed.with_context(|| format!("Invalid progression file: {:?}", path))
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML progression")
    }

    /// Parse from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML progression")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize progression to YAML")
    }

    /// Save as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write progression file: {:?}", path.as_ref()))
    }

    /// Build the configured key
    pub fn key(&self) -> Result<Key> {
        self.key.build()
    }

    /// Resolve every step into a chord
    pub fn resolve(&self) -> Result<Vec<Chord>> {
        let key = self.key()?;
        self.progression
            .iter()
            .enumerate()
            .map(|(i, step)| {
                step.resolve(&key)
                    .with_context(|| format!("Progression step {} ({}) in {}", i + 1, step, key))
            })
            .collect()
    }
}

/// Key section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyConfig {
    /// Tonic name (e.g. "C", "F#", "Bb")
    #[serde(default = "default_note")]
    pub note: String,
    /// Scale type (e.g. "major", "dorian")
    #[serde(default = "default_scale")]
    pub scale: String,
    /// Octave of the tonic
    #[serde(default = "default_octave")]
    pub octave: i32,
    /// Respell accidental tonics to the key type's usual spelling
    #[serde(default = "default_auto_alteration")]
    pub auto_alteration: bool,
}

fn default_note() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}
fn default_octave() -> i32 {
    DEFAULT_OCTAVE
}
fn default_auto_alteration() -> bool {
    true
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            note: default_note(),
            scale: default_scale(),
            octave: default_octave(),
            auto_alteration: default_auto_alteration(),
        }
    }
}

impl KeyConfig {
    /// Build the key and move it to the configured octave
    pub fn build(&self) -> Result<Key> {
        let mut key = Key::with_alteration(&self.note, &self.scale, self.auto_alteration)
            .with_context(|| format!("Invalid key '{} {}'", self.note, self.scale))?;
        key.set_octave(self.octave);
        Ok(key)
    }
}

/// One entry of a progression
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProgressionStep {
    /// Roman numeral with suffix ("V7", "ii", "bIII+")
    Numeral(String),
    /// Detailed form
    Detailed(ChordStep),
}

/// Detailed progression entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordStep {
    /// Degree, either a full numeral or a base degree used with `chord`
    pub degree: String,
    /// Chord type; when absent the type comes from the numeral's suffix
    #[serde(default)]
    pub chord: Option<String>,
    /// Inversion
    #[serde(default)]
    pub position: i32,
    /// Octave to shift the chord to
    #[serde(default)]
    pub octave: Option<i32>,
}

impl ProgressionStep {
    /// Degree text as written in the file
    pub fn degree(&self) -> &str {
        match self {
            ProgressionStep::Numeral(degree) => degree,
            ProgressionStep::Detailed(step) => &step.degree,
        }
    }

    /// Resolve this step in `key`
    pub fn resolve(&self, key: &Key) -> music::Result<Chord> {
        match self {
            ProgressionStep::Numeral(numeral) => key.chord_from_numeral(numeral),
            ProgressionStep::Detailed(step) => {
                let mut chord = match &step.chord {
                    Some(chord_type) => key.chord(&step.degree, chord_type)?,
                    None => key.chord_from_numeral(&step.degree)?,
                };
                if let Some(octave) = step.octave {
                    chord.shift_octave(octave);
                }
                chord.set_position(step.position)?;
                Ok(chord)
            }
        }
    }
}

impl fmt::Display for ProgressionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressionStep::Numeral(numeral) => write!(f, "{}", numeral),
            ProgressionStep::Detailed(step) => match &step.chord {
                Some(chord_type) => write!(f, "{} {}", step.degree, chord_type),
                None => write!(f, "{}", step.degree),
            },
        }
    }
}

/// Load and fully resolve a progression file
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<Vec<Chord>> {
    ProgressionFile::load(path)?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
key:
  note: "Bb"
  scale: major
progression:
  - I
  - vi7
  - degree: IV
    position: 1
  - degree: bVII
    chord: "7"
    octave: 3
"#;

        let file = ProgressionFile::from_yaml(yaml).unwrap();
        assert_eq!(file.key.note, "Bb");
        assert_eq!(file.key.octave, 4);
        assert!(file.key.auto_alteration);
        assert_eq!(file.progression.len(), 4);
        assert_eq!(file.progression[0], ProgressionStep::Numeral("I".to_string()));
        assert_eq!(
            file.progression[3],
            ProgressionStep::Detailed(ChordStep {
                degree: "bVII".to_string(),
                chord: Some("7".to_string()),
                position: 0,
                octave: Some(3),
            })
        );
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
progression = ["i", "iv7", { degree = "V", chord = "7", position = 2 }]

[key]
note = "D"
scale = "harmonic_minor"
"#;

        let file = ProgressionFile::from_toml(text).unwrap();
        assert_eq!(file.key.scale, "harmonic_minor");
        assert_eq!(file.progression.len(), 3);
        assert_eq!(file.progression[2].degree(), "V");
    }

    #[test]
    fn test_default_values() {
        let file = ProgressionFile::from_yaml("progression: [I]").unwrap();
        assert_eq!(file.key, KeyConfig::default());
        assert_eq!(file.key.note, "C");
        assert_eq!(file.key.scale, "major");
    }

    #[test]
    fn test_resolve() {
        let yaml = r#"
key:
  note: "Bb"
  scale: major
progression:
  - I
  - vi7
  - degree: IV
    position: 1
  - degree: bVII
    chord: "7"
    octave: 3
"#;

        let chords = ProgressionFile::from_yaml(yaml).unwrap().resolve().unwrap();
        let names: Vec<&str> = chords.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Bb", "Gm7", "Eb", "Ab7"]);
        assert_eq!(chords[1].theory_degree(), "vi7");
        assert_eq!(chords[2].position(), 1);
        assert_eq!(chords[2].pitches()[0].name(), "G");
        assert_eq!(chords[3].pitches()[0].octave(), 3);
        assert_eq!(chords[3].theory_degree(), "bVII7");
    }

    #[test]
    fn test_resolve_reports_step() {
        let yaml = r#"
key:
  note: "C"
progression:
  - I
  - V9
"#;

        let err = ProgressionFile::from_yaml(yaml).unwrap().resolve().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Progression step 2 (V9)"), "{}", message);
        assert!(message.contains("unknown chord type"), "{}", message);
    }

    #[test]
    fn test_resolve_rejects_extreme_position() {
        let yaml = "progression:\n  - degree: I\n    position: -2147483648\n";
        let err = ProgressionFile::from_yaml(yaml).unwrap().resolve().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Progression step 1 (I)"), "{}", message);
        assert!(message.contains("out of range"), "{}", message);
    }

    #[test]
    fn test_invalid_key() {
        let file = ProgressionFile::from_yaml("key:\n  note: Cx\n").unwrap();
        let err = file.key().unwrap_err();
        assert!(format!("{:#}", err).contains("malformed key note name"));
    }

    #[test]
    fn test_key_octave() {
        let file = ProgressionFile::from_yaml("key:\n  note: E\n  octave: 2\n").unwrap();
        let key = file.key().unwrap();
        assert_eq!(key.octave(), 2);
        assert_eq!(key.root().absolute_value(), 40);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progression.yaml");

        let original = ProgressionFile {
            key: KeyConfig {
                note: "G".to_string(),
                scale: "mixolydian".to_string(),
                octave: 3,
                auto_alteration: false,
            },
            progression: vec![
                ProgressionStep::Numeral("I".to_string()),
                ProgressionStep::Detailed(ChordStep {
                    degree: "bVII".to_string(),
                    chord: None,
                    position: 1,
                    octave: None,
                }),
            ],
        };

        original.save(&path).unwrap();
        let loaded = ProgressionFile::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_toml_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progression.toml");
        fs::write(&path, "progression = [\"ii7\", \"V7\", \"I\"]\n").unwrap();

        let chords = validate_config(&path).unwrap();
        assert_eq!(chords.len(), 3);
        assert_eq!(chords[0].name(), "Dm7");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "this is not valid yaml: [").unwrap();

        assert!(ProgressionFile::load(&path).is_err());
        assert!(validate_config(dir.path().join("missing.yaml")).is_err());
    }
}
