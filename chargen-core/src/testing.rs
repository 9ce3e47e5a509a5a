//! Testing utilities for character generation.
//!
//! - `ScriptedSource` for deterministic generation without an RNG
//! - Sample characters with known stats
//! - Assertion helpers for verifying derived fields

use crate::abilities::{ability_modifier, Ability, AbilityScores};
use crate::character::Character;
use crate::dice::RandomSource;
use crate::items::Item;
use crate::rules::RulesEngine;
use crate::skills::{Skill, SkillEntry};

/// A random source that replays a fixed script.
///
/// Each value is reduced modulo the requested bound, and the script wraps
/// around when exhausted. An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Script that makes every die land on `face` (1-based).
    pub fn always_face(face: u32) -> Self {
        Self::new(vec![face.saturating_sub(1)])
    }

    /// Number of values consumed so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_int(&mut self, bound: u32) -> u32 {
        if self.values.is_empty() || bound <= 1 {
            self.position += 1;
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % bound
    }
}

/// A level 1 Fighter in chain mail with a shield.
///
/// STR 16, DEX 12, CON 14, INT 10, WIS 13, CHA 8; Athletics and Perception.
pub fn sample_fighter(engine: &RulesEngine) -> Character {
    let mut character = Character::new("Roland Ashdown", "Human", "Fighter");
    character.background = "Soldier".to_string();
    character.alignment = "Lawful Good".to_string();
    character.attributes = AbilityScores::new(16, 12, 14, 10, 13, 8);
    character.skills = proficient_in(&[Skill::Athletics, Skill::Perception]);
    character.equipment = vec![
        Item::weapon("Longsword", "1d8 slashing"),
        Item::armor("Chain Mail", 16, Some(0)),
        Item::shield("Shield", 2),
    ];
    character.languages = vec!["Common".to_string()];
    engine.recalculate(&character)
}

/// A level 1 Wizard with no armor.
///
/// STR 8, DEX 14, CON 12, INT 17, WIS 12, CHA 10; Arcana and History.
pub fn sample_wizard(engine: &RulesEngine) -> Character {
    let mut character = Character::new("Lia Thornfield", "Elf", "Wizard");
    character.background = "Sage".to_string();
    character.alignment = "Neutral Good".to_string();
    character.attributes = AbilityScores::new(8, 14, 12, 17, 12, 10);
    character.skills = proficient_in(&[Skill::Arcana, Skill::History]);
    character.equipment = vec![Item::weapon("Quarterstaff", "1d6 bludgeoning")];
    character.languages = vec!["Common".to_string(), "Elvish".to_string()];
    character.senses = vec!["Darkvision 60 ft.".to_string()];
    engine.recalculate(&character)
}

/// The full skill block with proficiency in exactly `skills`.
pub fn proficient_in(skills: &[Skill]) -> Vec<SkillEntry> {
    Skill::all()
        .iter()
        .map(|&skill| SkillEntry::new(skill, skills.contains(&skill)))
        .collect()
}

/// Assert that every derived field agrees with the base fields.
#[track_caller]
pub fn assert_invariants(engine: &RulesEngine, character: &Character) {
    assert!(character.level >= 1, "level {} below 1", character.level);

    for ability in Ability::all() {
        assert_eq!(
            character.modifiers.get(ability),
            ability_modifier(character.attributes.get(ability)),
            "{ability:?} modifier out of sync with score"
        );
    }

    assert_eq!(character.skills.len(), 18, "expected 18 skill entries");
    for (entry, expected) in character.skills.iter().zip(Skill::all()) {
        assert_eq!(entry.name, *expected, "skill block out of order");
        let bonus = if entry.proficient {
            character.proficiency_bonus
        } else {
            0
        };
        assert_eq!(
            entry.value,
            character.modifiers.get(entry.attribute) + bonus,
            "{} value out of sync",
            entry.name.name()
        );
    }

    let perception = character
        .skill(Skill::Perception)
        .map(|entry| entry.value)
        .unwrap_or(character.modifiers.wisdom);
    assert_eq!(character.passive_perception, 10 + perception);

    assert!(character.max_hp >= 1, "max HP {} below 1", character.max_hp);
    assert!(
        (1..=character.max_hp).contains(&character.hp),
        "HP {} outside 1..={}",
        character.hp,
        character.max_hp
    );
    assert_eq!(
        character.max_hp,
        engine.calculate_max_hp(
            &character.class,
            character.level,
            character.modifiers.constitution
        ),
        "max HP out of sync"
    );

    assert_eq!(
        character.ac,
        engine.calculate_ac(
            &character.class,
            character.modifiers.dexterity,
            character.modifiers.constitution,
            character.modifiers.wisdom,
            &character.equipment,
        ),
        "AC out of sync"
    );
    assert_eq!(character.initiative, character.modifiers.dexterity);
    assert!(
        character.equipment.iter().all(|item| item.quantity >= 1),
        "item with zero quantity"
    );
}

/// Assert current and max HP.
#[track_caller]
pub fn assert_hp(character: &Character, current: i32, max: i32) {
    assert_eq!(
        (character.hp, character.max_hp),
        (current, max),
        "Expected HP {current}/{max}, got {}/{}",
        character.hp,
        character.max_hp
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_wraps_and_reduces() {
        let mut source = ScriptedSource::new(vec![3, 9]);
        assert_eq!(source.next_int(6), 3);
        assert_eq!(source.next_int(6), 3);
        assert_eq!(source.next_int(10), 3);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_empty_script_yields_zero() {
        let mut source = ScriptedSource::default();
        assert_eq!(source.next_int(20), 0);
    }

    #[test]
    fn test_always_face() {
        let mut source = ScriptedSource::always_face(6);
        assert_eq!(crate::dice::roll_die(&mut source, 6), 6);
        assert_eq!(crate::dice::roll_ability_score(&mut source), 18);
    }

    #[test]
    fn test_sample_fighter() {
        let engine = RulesEngine::standard();
        let fighter = sample_fighter(&engine);

        assert_eq!(fighter.ac, 18);
        assert_hp(&fighter, 12, 12);
        assert_eq!(fighter.skill(Skill::Athletics).unwrap().value, 5);
        assert_eq!(fighter.passive_perception, 13);
        assert_invariants(&engine, &fighter);
    }

    #[test]
    fn test_sample_wizard() {
        let engine = RulesEngine::standard();
        let wizard = sample_wizard(&engine);

        assert_eq!(wizard.ac, 12);
        assert_hp(&wizard, 7, 7);
        assert_eq!(wizard.skill(Skill::Arcana).unwrap().value, 5);
        assert_invariants(&engine, &wizard);
    }
}
