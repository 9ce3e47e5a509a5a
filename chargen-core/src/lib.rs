//! D&D 5e character generation and stat derivation.
//!
//! This crate provides:
//! - Random character generation against a rulebook of races and classes
//! - A rules engine that re-derives every computed stat after an edit
//! - Injectable randomness for deterministic tests
//! - Character persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use chargen_core::{CharacterEdit, CharacterGenerator, RulesEngine};
//!
//! let generator = CharacterGenerator::default();
//! let hero = generator.generate_random(false, Some("Dwarf"));
//!
//! let engine = RulesEngine::standard();
//! let hero = engine.apply_edit(&hero, CharacterEdit::SetLevel(3));
//! println!("{} has {} HP and AC {}", hero.name, hero.max_hp, hero.ac);
//! ```

pub mod abilities;
pub mod character;
pub mod dice;
pub mod edits;
pub mod generator;
pub mod items;
pub mod narrative;
pub mod persist;
pub mod rulebook;
pub mod rules;
pub mod skills;
pub mod tables;
pub mod testing;

// Primary public API
pub use abilities::{ability_modifier, Ability, AbilityScores, Modifiers};
pub use character::{Character, CharacterError, CharacterId, Wealth};
pub use dice::{roll_ability_score, roll_die, DiceExpression, RandomSource, RngSource};
pub use edits::CharacterEdit;
pub use generator::{CharacterGenerator, GeneratorConfig};
pub use items::{Item, ItemId, ItemKind};
pub use narrative::{BackstoryContext, Narrator, TemplateNarrator};
pub use persist::{PersistError, SavedCharacter};
pub use rulebook::{ClassDefinition, RaceDefinition, Rulebook, RulebookError};
pub use rules::RulesEngine;
pub use skills::{Skill, SkillEntry};

/// Generate a character from the standard rulebook with the thread RNG.
pub fn generate_character(is_npc: bool, race: Option<&str>) -> Character {
    CharacterGenerator::default().generate_random(is_npc, race)
}

/// Re-derive every computed stat of a character against the standard rulebook.
pub fn recalculate_character_stats(character: &Character) -> Character {
    RulesEngine::standard().recalculate(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_invariants;

    #[test]
    fn test_generate_character() {
        let character = generate_character(false, None);
        assert_eq!(character.skills.len(), 18);
        assert!(!character.equipment.is_empty());
        assert_invariants(&RulesEngine::standard(), &character);
    }

    #[test]
    fn test_generate_npc_for_race() {
        let character = generate_character(true, Some("Tiefling"));
        assert!(character.is_npc);
        assert_eq!(character.race, "Tiefling");
    }

    #[test]
    fn test_recalculate_is_noop_on_fresh_character() {
        let character = generate_character(false, None);
        assert_eq!(recalculate_character_stats(&character), character);
    }
}
