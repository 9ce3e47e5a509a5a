//! Character persistence for save/load functionality.
//!
//! Characters are saved as pretty-printed JSON inside a small versioned
//! envelope so a directory of saves can be listed without loading every
//! character in full.

use crate::character::{Character, CharacterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Malformed(#[from] CharacterError),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save file version.
pub const CHARACTER_SAVE_VERSION: u32 = 1;

/// A saved character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCharacter {
    /// Save format version for compatibility checking.
    pub version: u32,

    pub saved_at: DateTime<Utc>,

    pub character: Character,

    pub metadata: CharacterMetadata,
}

/// Summary fields readable without parsing the whole character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub name: String,
    pub race: String,
    pub class: String,
    pub level: u32,
    pub is_npc: bool,
    pub has_backstory: bool,
}

impl CharacterMetadata {
    pub fn from_character(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            race: character.race.clone(),
            class: character.class.clone(),
            level: character.level,
            is_npc: character.is_npc,
            has_backstory: character.backstory.is_some(),
        }
    }
}

impl SavedCharacter {
    pub fn new(character: Character) -> Self {
        Self {
            version: CHARACTER_SAVE_VERSION,
            saved_at: Utc::now(),
            metadata: CharacterMetadata::from_character(&character),
            character,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a save, checking the version and the character's structure.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let mut value: Value = serde_json::from_str(json)?;
        check_version(&value)?;

        let character = value
            .get_mut("character")
            .map(Value::take)
            .unwrap_or(Value::Null);
        let character = Character::from_value(character)?;

        #[derive(Deserialize)]
        struct Envelope {
            version: u32,
            saved_at: DateTime<Utc>,
            metadata: CharacterMetadata,
        }

        let envelope: Envelope = serde_json::from_value(value)?;
        Ok(Self {
            version: envelope.version,
            saved_at: envelope.saved_at,
            character,
            metadata: envelope.metadata,
        })
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).await?;
        tracing::info!(
            character = %self.character.id,
            path = %path.display(),
            "saved character"
        );
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let saved = Self::from_json(&content)?;
        tracing::info!(
            character = %saved.character.id,
            path = %path.display(),
            "loaded character"
        );
        Ok(saved)
    }

    /// Read a save's metadata without loading the character.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<CharacterMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: CharacterMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;
        if partial.version != CHARACTER_SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: CHARACTER_SAVE_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

fn check_version(value: &Value) -> Result<(), PersistError> {
    let found = value
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;
    if found != CHARACTER_SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: CHARACTER_SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

/// A save file found on disk.
#[derive(Debug, Clone)]
pub struct CharacterSaveInfo {
    pub path: PathBuf,
    pub metadata: CharacterMetadata,
}

/// List readable character saves in a directory, sorted by path.
///
/// Files that are not valid saves are skipped.
pub async fn list_character_saves(
    dir: impl AsRef<Path>,
) -> Result<Vec<CharacterSaveInfo>, PersistError> {
    let mut saves = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.extension().is_some_and(|e| e == "json") {
            continue;
        }
        match SavedCharacter::peek_metadata(&path).await {
            Ok(metadata) => saves.push(CharacterSaveInfo { path, metadata }),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping file");
            }
        }
    }

    saves.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(saves)
}

/// File name for a character: sanitized name plus the first block of its id.
pub fn character_save_path(base_dir: impl AsRef<Path>, character: &Character) -> PathBuf {
    let sanitized = character
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    let id = character.id.to_string();
    let short_id = id.split('-').next().unwrap_or(&id);
    base_dir
        .as_ref()
        .join(format!("{sanitized}_{short_id}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RulesEngine;
    use crate::testing::sample_fighter;

    #[test]
    fn test_metadata_from_character() {
        let fighter = sample_fighter(&RulesEngine::standard());
        let saved = SavedCharacter::new(fighter);

        assert_eq!(saved.version, CHARACTER_SAVE_VERSION);
        assert_eq!(saved.metadata.name, "Roland Ashdown");
        assert_eq!(saved.metadata.class, "Fighter");
        assert_eq!(saved.metadata.level, 1);
        assert!(!saved.metadata.has_backstory);
    }

    #[test]
    fn test_round_trip_in_memory() {
        let saved = SavedCharacter::new(sample_fighter(&RulesEngine::standard()));
        let json = saved.to_json().unwrap();
        assert_eq!(SavedCharacter::from_json(&json).unwrap(), saved);
    }

    #[test]
    fn test_version_mismatch() {
        let saved = SavedCharacter::new(sample_fighter(&RulesEngine::standard()));
        let mut value = serde_json::to_value(&saved).unwrap();
        value["version"] = 99.into();

        let err = SavedCharacter::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            PersistError::VersionMismatch {
                expected: 1,
                found: 99
            }
        ));
    }

    #[test]
    fn test_missing_attributes_is_malformed() {
        let saved = SavedCharacter::new(sample_fighter(&RulesEngine::standard()));
        let mut value = serde_json::to_value(&saved).unwrap();
        value["character"]
            .as_object_mut()
            .unwrap()
            .remove("attributes");

        let err = SavedCharacter::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Malformed(CharacterError::Malformed { ref field }) if field == "attributes"
        ));
    }

    #[test]
    fn test_save_path_is_sanitized() {
        let mut fighter = sample_fighter(&RulesEngine::standard());
        fighter.name = "Sir Roland / the Bold".to_string();

        let path = character_save_path("/saves", &fighter);
        let file = path.file_name().unwrap().to_string_lossy();
        assert!(file.starts_with("Sir_Roland___the_Bold_"));
        assert!(file.ends_with(".json"));
        assert!(path.starts_with("/saves"));
    }
}
