//! The character aggregate and its JSON boundary.

use crate::abilities::{Ability, AbilityScores, Modifiers};
use crate::items::{Item, ItemId};
use crate::skills::{default_skills, Skill, SkillEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors at the character record boundary.
#[derive(Debug, Error)]
pub enum CharacterError {
    /// The record is missing a structural field, so no invariant can be
    /// re-established from it.
    #[error("Malformed character: {field} is missing or invalid")]
    Malformed { field: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CharacterError {
    fn malformed(field: impl Into<String>) -> Self {
        CharacterError::Malformed {
            field: field.into(),
        }
    }
}

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coins by denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wealth {
    pub copper: u32,
    pub silver: u32,
    pub electrum: u32,
    pub gold: u32,
    pub platinum: u32,
}

impl Wealth {
    pub fn gold(gold: u32) -> Self {
        Self {
            gold,
            ..Self::default()
        }
    }

    /// Total value expressed in copper pieces.
    pub fn total_copper(&self) -> u64 {
        self.copper as u64
            + self.silver as u64 * 10
            + self.electrum as u64 * 50
            + self.gold as u64 * 100
            + self.platinum as u64 * 1000
    }
}

/// A complete character sheet.
///
/// Base fields (attributes, level, class, equipment, skill proficiency flags,
/// proficiency bonus) are the source of truth. Everything else is derived by
/// [`RulesEngine::recalculate`](crate::rules::RulesEngine::recalculate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    pub class: String,
    #[serde(default, deserialize_with = "nullable")]
    pub background: String,
    #[serde(default, deserialize_with = "nullable")]
    pub alignment: String,
    #[serde(default = "default_level", deserialize_with = "nullable_level")]
    pub level: u32,
    #[serde(
        default = "default_proficiency_bonus",
        deserialize_with = "nullable_proficiency_bonus"
    )]
    pub proficiency_bonus: i32,

    // Health and defense
    #[serde(default, deserialize_with = "nullable")]
    pub hp: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub max_hp: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub ac: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub initiative: i32,

    // Abilities
    pub attributes: AbilityScores,
    #[serde(default, deserialize_with = "nullable")]
    pub modifiers: Modifiers,
    #[serde(default = "default_skills", deserialize_with = "nullable_skills")]
    pub skills: Vec<SkillEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub passive_perception: i32,

    // Possessions
    #[serde(default, deserialize_with = "nullable")]
    pub equipment: Vec<Item>,
    #[serde(default, deserialize_with = "nullable")]
    pub wealth: Wealth,

    // Race traits
    #[serde(default, deserialize_with = "nullable")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub senses: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,
    #[serde(default = "Utc::now", deserialize_with = "nullable_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_npc: bool,
}

fn default_level() -> u32 {
    1
}

fn default_proficiency_bonus() -> i32 {
    2
}

// Legacy records sometimes carry `null` where a value was never derived.

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_level))
}

fn nullable_proficiency_bonus<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<i32, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_proficiency_bonus))
}

fn nullable_skills<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<SkillEntry>, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_skills))
}

fn nullable_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(Utc::now))
}

/// Fields a record cannot be repaired without.
const REQUIRED_FIELDS: [&str; 5] = ["id", "name", "race", "class", "attributes"];

impl Character {
    /// A blank level 1 character with average scores and nothing derived yet.
    pub fn new(name: impl Into<String>, race: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            race: race.into(),
            class: class.into(),
            background: String::new(),
            alignment: String::new(),
            level: 1,
            proficiency_bonus: 2,
            hp: 0,
            max_hp: 0,
            ac: 10,
            initiative: 0,
            attributes: AbilityScores::default(),
            modifiers: Modifiers::default(),
            skills: default_skills(),
            passive_perception: 10,
            equipment: Vec::new(),
            wealth: Wealth::default(),
            languages: Vec::new(),
            senses: Vec::new(),
            backstory: None,
            created_at: Utc::now(),
            is_npc: false,
        }
    }

    pub fn skill(&self, skill: Skill) -> Option<&SkillEntry> {
        self.skills.iter().find(|entry| entry.name == skill)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.modifiers.get(ability)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.equipment.iter().find(|item| item.id == id)
    }

    pub fn is_conscious(&self) -> bool {
        self.hp > 0
    }

    /// Parse a stored record, rejecting structurally broken ones.
    pub fn from_json(json: &str) -> Result<Self, CharacterError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validate the structural fields of a record, then deserialize it.
    ///
    /// Derived fields may be absent or stale; run the result through the
    /// rules engine to bring them up to date.
    pub fn from_value(value: Value) -> Result<Self, CharacterError> {
        let Some(record) = value.as_object() else {
            return Err(CharacterError::malformed("record"));
        };

        for field in REQUIRED_FIELDS {
            if record.get(field).map_or(true, Value::is_null) {
                return Err(CharacterError::malformed(field));
            }
        }

        let Some(attributes) = record.get("attributes").and_then(Value::as_object) else {
            return Err(CharacterError::malformed("attributes"));
        };
        for ability in Ability::all() {
            let key = ability.name().to_lowercase();
            if !attributes.get(&key).is_some_and(Value::is_i64) {
                return Err(CharacterError::malformed(format!("attributes.{key}")));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, CharacterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
