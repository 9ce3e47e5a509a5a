//! Read-only rule tables: races, classes, backgrounds, alignments, starting
//! kits and wealth, plus the word lists the generator draws names from.
//!
//! A [`Rulebook`] is built once and shared. The built-in tables live in
//! [`crate::tables`]; alternate table sets can be loaded from JSON with
//! [`Rulebook::from_json`].

use crate::abilities::{Ability, AbilityScores};
use crate::character::Wealth;
use crate::dice::{DiceExpression, RandomSource};
use crate::items::KitItem;
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Hit die assumed for classes the rulebook does not know.
pub const DEFAULT_HIT_DIE: u32 = 8;

/// Errors from loading or validating a rulebook.
#[derive(Debug, Error)]
pub enum RulebookError {
    #[error("Rulebook has no {0}")]
    EmptyTable(&'static str),

    #[error("Class {class} has invalid hit die d{hit_die}")]
    InvalidHitDie { class: String, hit_die: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A playable race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceDefinition {
    pub name: String,
    pub speed: u32,
    /// Only the abilities the race improves are present.
    pub ability_bonuses: BTreeMap<Ability, i32>,
    pub languages: Vec<String>,
    pub senses: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl RaceDefinition {
    /// Apply racial ability score bonuses to base scores.
    pub fn apply_ability_bonuses(&self, scores: &mut AbilityScores) {
        for (&ability, &bonus) in &self.ability_bonuses {
            scores.add(ability, bonus);
        }
    }
}

/// Class-specific armor class formula used when no armor is worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnarmoredDefense {
    /// 10 + DEX + CON, shields allowed.
    Constitution,
    /// 10 + DEX + WIS, lost entirely while holding a shield.
    WisdomWithoutShield,
}

/// How a class rolls its starting coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StartingWealth {
    /// Roll `dice`, multiply by `multiplier`, paid in gold.
    Rolled {
        dice: DiceExpression,
        multiplier: u32,
    },
    Flat {
        gold: u32,
    },
}

impl StartingWealth {
    pub fn roll<S: RandomSource + ?Sized>(&self, source: &mut S) -> Wealth {
        match self {
            StartingWealth::Rolled { dice, multiplier } => {
                let roll = dice.roll_with(source);
                tracing::debug!(dice = %dice, roll = %roll, multiplier, "rolled starting wealth");
                Wealth::gold(roll.total.max(0) as u32 * multiplier)
            }
            StartingWealth::Flat { gold } => Wealth::gold(*gold),
        }
    }
}

/// A character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub hit_die: u32,
    /// Flavor only; nothing enforces them.
    pub primary_abilities: [Ability; 2],
    pub saving_throws: [Ability; 2],
    pub proficiencies: Vec<String>,
    pub skill_choices: Vec<Skill>,
    pub skill_count: usize,
    #[serde(default)]
    pub unarmored_defense: Option<UnarmoredDefense>,
    pub starting_wealth: StartingWealth,
    pub starting_kit: Vec<KitItem>,
    #[serde(default)]
    pub description: String,
}

/// The complete set of rule tables.
///
/// Deserializing always validates, so a `Rulebook` value never has an empty
/// race or class table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RulebookTables")]
pub struct Rulebook {
    races: Vec<RaceDefinition>,
    classes: Vec<ClassDefinition>,
    backgrounds: Vec<String>,
    alignments: Vec<String>,
    /// Kit for classes with no entry of their own.
    generic_kit: Vec<KitItem>,
    /// Wealth formula for classes with no entry of their own.
    default_wealth: StartingWealth,
    first_names: Vec<String>,
    last_names: Vec<String>,
    npc_quotes: Vec<String>,
}

/// Unvalidated wire form of a [`Rulebook`].
#[derive(Deserialize)]
struct RulebookTables {
    races: Vec<RaceDefinition>,
    classes: Vec<ClassDefinition>,
    backgrounds: Vec<String>,
    alignments: Vec<String>,
    generic_kit: Vec<KitItem>,
    default_wealth: StartingWealth,
    first_names: Vec<String>,
    last_names: Vec<String>,
    npc_quotes: Vec<String>,
}

impl TryFrom<RulebookTables> for Rulebook {
    type Error = RulebookError;

    fn try_from(tables: RulebookTables) -> Result<Self, Self::Error> {
        let rulebook = Rulebook {
            races: tables.races,
            classes: tables.classes,
            backgrounds: tables.backgrounds,
            alignments: tables.alignments,
            generic_kit: tables.generic_kit,
            default_wealth: tables.default_wealth,
            first_names: tables.first_names,
            last_names: tables.last_names,
            npc_quotes: tables.npc_quotes,
        };
        rulebook.validate()?;
        Ok(rulebook)
    }
}

lazy_static::lazy_static! {
    static ref SHARED: Arc<Rulebook> = Arc::new(Rulebook::standard());
}

impl Rulebook {
    /// The built-in tables.
    pub fn standard() -> Self {
        Self {
            races: crate::tables::races(),
            classes: crate::tables::classes(),
            backgrounds: to_strings(crate::tables::BACKGROUNDS),
            alignments: to_strings(crate::tables::ALIGNMENTS),
            generic_kit: crate::tables::generic_kit(),
            default_wealth: crate::tables::default_wealth(),
            first_names: to_strings(crate::tables::FIRST_NAMES),
            last_names: to_strings(crate::tables::LAST_NAMES),
            npc_quotes: to_strings(crate::tables::NPC_QUOTES),
        }
    }

    /// The process-wide standard rulebook, built on first use.
    pub fn shared() -> Arc<Rulebook> {
        Arc::clone(&SHARED)
    }

    /// Load and validate an alternate table set.
    pub fn from_json(json: &str) -> Result<Self, RulebookError> {
        let tables: RulebookTables = serde_json::from_str(json)?;
        Rulebook::try_from(tables)
    }

    pub fn to_json(&self) -> Result<String, RulebookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the race table.
    pub fn with_races(mut self, races: Vec<RaceDefinition>) -> Result<Self, RulebookError> {
        self.races = races;
        self.validate()?;
        Ok(self)
    }

    /// Replace the class table.
    pub fn with_classes(mut self, classes: Vec<ClassDefinition>) -> Result<Self, RulebookError> {
        self.classes = classes;
        self.validate()?;
        Ok(self)
    }

    /// Check the tables the generator cannot work without.
    pub fn validate(&self) -> Result<(), RulebookError> {
        if self.races.is_empty() {
            return Err(RulebookError::EmptyTable("races"));
        }
        if self.classes.is_empty() {
            return Err(RulebookError::EmptyTable("classes"));
        }
        if self.backgrounds.is_empty() {
            return Err(RulebookError::EmptyTable("backgrounds"));
        }
        if self.alignments.is_empty() {
            return Err(RulebookError::EmptyTable("alignments"));
        }
        for class in &self.classes {
            if ![6, 8, 10, 12].contains(&class.hit_die) {
                return Err(RulebookError::InvalidHitDie {
                    class: class.name.clone(),
                    hit_die: class.hit_die,
                });
            }
        }
        Ok(())
    }

    pub fn list_races(&self) -> &[RaceDefinition] {
        &self.races
    }

    pub fn list_classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn list_backgrounds(&self) -> &[String] {
        &self.backgrounds
    }

    pub fn list_alignments(&self) -> &[String] {
        &self.alignments
    }

    pub fn first_names(&self) -> &[String] {
        &self.first_names
    }

    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    pub fn npc_quotes(&self) -> &[String] {
        &self.npc_quotes
    }

    /// Case-insensitive race lookup.
    pub fn find_race_by_name(&self, name: &str) -> Option<&RaceDefinition> {
        let name = name.trim();
        self.races.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive class lookup.
    pub fn find_class_by_name(&self, name: &str) -> Option<&ClassDefinition> {
        let name = name.trim();
        self.classes.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// The first race in the table, used when a lookup fails.
    pub fn default_race(&self) -> &RaceDefinition {
        // validate() guarantees at least one race
        &self.races[0]
    }

    /// The first class in the table, used when a lookup fails.
    pub fn default_class(&self) -> &ClassDefinition {
        &self.classes[0]
    }

    /// Look up a race, falling back to the first table entry.
    pub fn race_or_default(&self, name: &str) -> &RaceDefinition {
        self.find_race_by_name(name).unwrap_or_else(|| {
            let fallback = self.default_race();
            tracing::warn!(race = name, fallback = %fallback.name, "unknown race");
            fallback
        })
    }

    /// Hit die size for a class, [`DEFAULT_HIT_DIE`] if unknown.
    pub fn hit_die_for(&self, class_name: &str) -> u32 {
        match self.find_class_by_name(class_name) {
            Some(class) => class.hit_die,
            None => {
                tracing::warn!(class = class_name, "unknown class, using d{DEFAULT_HIT_DIE}");
                DEFAULT_HIT_DIE
            }
        }
    }

    pub fn unarmored_defense_for(&self, class_name: &str) -> Option<UnarmoredDefense> {
        self.find_class_by_name(class_name)
            .and_then(|c| c.unarmored_defense)
    }

    pub fn kit_for(&self, class_name: &str) -> &[KitItem] {
        match self.find_class_by_name(class_name) {
            Some(class) if !class.starting_kit.is_empty() => &class.starting_kit,
            _ => {
                tracing::warn!(class = class_name, "no starting kit, using generic kit");
                &self.generic_kit
            }
        }
    }

    pub fn wealth_for(&self, class_name: &str) -> &StartingWealth {
        match self.find_class_by_name(class_name) {
            Some(class) => &class.starting_wealth,
            None => {
                tracing::warn!(class = class_name, "unknown class, using default wealth");
                &self.default_wealth
            }
        }
    }

    /// Saving throw proficiencies for a class; none if unknown.
    pub fn saving_throws_for(&self, class_name: &str) -> &[Ability] {
        self.find_class_by_name(class_name)
            .map(|c| c.saving_throws.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for Rulebook {
    fn default() -> Self {
        Self::standard()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSource;

    #[test]
    fn test_standard_tables_are_valid() {
        let rulebook = Rulebook::standard();
        rulebook.validate().unwrap();
        assert!(rulebook.list_classes().len() >= 12);
        assert!(rulebook.list_races().len() >= 8);
        assert!(!rulebook.list_backgrounds().is_empty());
        assert_eq!(rulebook.list_alignments().len(), 9);
        assert!(!rulebook.first_names().is_empty());
        assert!(!rulebook.last_names().is_empty());
        assert!(!rulebook.npc_quotes().is_empty());
    }

    #[test]
    fn test_every_class_can_fill_its_skills() {
        for class in Rulebook::standard().list_classes() {
            assert!(class.skill_count > 0, "{}", class.name);
            assert!(class.skill_choices.len() >= class.skill_count, "{}", class.name);
            assert!(!class.starting_kit.is_empty(), "{}", class.name);
        }
    }

    #[test]
    fn test_find_by_name() {
        let rulebook = Rulebook::standard();
        assert_eq!(rulebook.find_race_by_name("half-orc").unwrap().name, "Half-Orc");
        assert_eq!(rulebook.find_class_by_name("WIZARD").unwrap().hit_die, 6);
        assert!(rulebook.find_race_by_name("Nonexistent Race").is_none());
        assert!(rulebook.find_class_by_name("Mage").is_none());
    }

    #[test]
    fn test_fallbacks() {
        let rulebook = Rulebook::standard();
        assert_eq!(
            rulebook.race_or_default("Nonexistent Race").name,
            rulebook.list_races()[0].name
        );
        assert_eq!(rulebook.hit_die_for("Mage"), DEFAULT_HIT_DIE);
        assert_eq!(rulebook.hit_die_for("Barbarian"), 12);
        assert_eq!(rulebook.kit_for("Mage"), crate::tables::generic_kit().as_slice());
        assert!(rulebook.saving_throws_for("Mage").is_empty());
        assert_eq!(
            rulebook.saving_throws_for("Fighter"),
            &[Ability::Strength, Ability::Constitution]
        );
    }

    #[test]
    fn test_unarmored_defense_classes() {
        let rulebook = Rulebook::standard();
        assert_eq!(
            rulebook.unarmored_defense_for("Barbarian"),
            Some(UnarmoredDefense::Constitution)
        );
        assert_eq!(
            rulebook.unarmored_defense_for("Monk"),
            Some(UnarmoredDefense::WisdomWithoutShield)
        );
        assert_eq!(rulebook.unarmored_defense_for("Fighter"), None);
    }

    #[test]
    fn test_racial_bonuses_are_partial() {
        let rulebook = Rulebook::standard();
        let dwarf = rulebook.find_race_by_name("Dwarf").unwrap();
        let mut scores = AbilityScores::default();
        dwarf.apply_ability_bonuses(&mut scores);
        assert_eq!(scores.constitution, 12);
        assert_eq!(scores.strength, 10);
    }

    #[test]
    fn test_rolled_wealth() {
        let wealth = StartingWealth::Rolled {
            dice: DiceExpression::parse("2d4").unwrap(),
            multiplier: 10,
        };
        // Faces 3 and 4
        let mut source = ScriptedSource::new(vec![2, 3]);
        let rolled = wealth.roll(&mut source);
        assert_eq!(rolled, Wealth::gold(70));
        assert_eq!(StartingWealth::Flat { gold: 15 }.roll(&mut source), Wealth::gold(15));
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = Rulebook::standard().to_json().unwrap();
        let loaded = Rulebook::from_json(&json).unwrap();
        assert_eq!(loaded, Rulebook::standard());

        let err = Rulebook::standard().with_races(vec![]).unwrap_err();
        assert!(matches!(err, RulebookError::EmptyTable("races")));
    }

    #[test]
    fn test_deserialize_validates_tables() {
        let mut value = serde_json::to_value(Rulebook::standard()).unwrap();
        value["classes"] = serde_json::json!([]);

        assert!(serde_json::from_value::<Rulebook>(value.clone()).is_err());
        assert!(matches!(
            Rulebook::from_json(&value.to_string()),
            Err(RulebookError::EmptyTable("classes"))
        ));
    }

    #[test]
    fn test_invalid_hit_die_rejected() {
        let mut classes = Rulebook::standard().list_classes().to_vec();
        classes[0].hit_die = 7;
        assert!(matches!(
            Rulebook::standard().with_classes(classes),
            Err(RulebookError::InvalidHitDie { hit_die: 7, .. })
        ));
    }

    #[test]
    fn test_shared_is_standard() {
        assert_eq!(*Rulebook::shared(), Rulebook::standard());
    }
}
