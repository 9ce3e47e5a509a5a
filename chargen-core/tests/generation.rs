//! End-to-end tests for character generation and recalculation.
//!
//! Run with: `cargo test -p chargen-core --test generation`

use chargen_core::items::KitItem;
use chargen_core::rulebook::StartingWealth;
use chargen_core::testing::assert_invariants;
use chargen_core::{
    generate_character, recalculate_character_stats, Ability, CharacterEdit, CharacterGenerator,
    ClassDefinition, Item, ItemKind, RngSource, Rulebook, RulebookError, RulesEngine, Skill,
    Wealth,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

// =============================================================================
// Factory
// =============================================================================

#[test]
fn test_factory_completeness() {
    let engine = RulesEngine::standard();
    for _ in 0..25 {
        let character = generate_character(false, None);
        assert_eq!(character.skills.len(), 18);
        assert!(!character.equipment.is_empty());
        assert!(!character.name.is_empty());
        assert!(!character.languages.is_empty());
        assert_invariants(&engine, &character);
    }
}

#[test]
fn test_unknown_race_does_not_fail() {
    let character = generate_character(false, Some("Nonexistent Race"));
    assert_eq!(character.race, "Human");
}

#[test]
fn test_every_class_generates_consistently() {
    let generator = CharacterGenerator::default();
    let mut rng = RngSource(StdRng::seed_from_u64(2024));
    let mut seen = std::collections::HashSet::new();

    for _ in 0..400 {
        let character = generator.generate(&mut rng, false, None);
        assert_eq!(generator.engine().recalculate(&character), character);
        seen.insert(character.class.clone());
    }
    assert_eq!(seen.len(), 12);
}

#[test]
fn test_seeded_generation_repeats() {
    let generator = CharacterGenerator::default();
    let a = generator.generate(&mut RngSource::seeded(77), true, None);
    let b = generator.generate(&mut RngSource::seeded(77), true, None);

    assert_eq!(a.name, b.name);
    assert_eq!(a.class, b.class);
    assert_eq!(a.attributes, b.attributes);
    assert_eq!(a.backstory, b.backstory);
    assert_eq!(a.wealth, b.wealth);
}

// =============================================================================
// Custom rulebooks
// =============================================================================

fn knight_class() -> ClassDefinition {
    ClassDefinition {
        name: "Knight".to_string(),
        hit_die: 10,
        primary_abilities: [Ability::Strength, Ability::Charisma],
        saving_throws: [Ability::Strength, Ability::Constitution],
        proficiencies: vec!["All armor".to_string(), "Shields".to_string()],
        skill_choices: vec![Skill::Athletics, Skill::Persuasion],
        skill_count: 2,
        unarmored_defense: None,
        starting_wealth: StartingWealth::Flat { gold: 25 },
        starting_kit: vec![
            KitItem::new(
                "Plate Armor",
                1,
                ItemKind::Armor {
                    ac_base: Some(18),
                    dex_bonus_cap: Some(0),
                },
            ),
            KitItem::new("Shield", 1, ItemKind::Shield { ac_bonus: Some(2) }),
        ],
        description: String::new(),
    }
}

#[test]
fn test_custom_class_table() {
    let rulebook = Rulebook::standard()
        .with_classes(vec![knight_class()])
        .expect("valid rulebook");
    let generator = CharacterGenerator::new(RulesEngine::new(Arc::new(rulebook)));

    let character = generator.generate(&mut RngSource::seeded(3), false, Some("Dwarf"));
    assert_eq!(character.class, "Knight");
    // Plate ignores positive Dexterity but a penalty still applies
    assert_eq!(character.ac, 18 + character.modifiers.dexterity.min(0) + 2);
    assert_eq!(character.wealth, Wealth::gold(25));
    assert!(character.skill(Skill::Athletics).unwrap().proficient);
    assert!(character.skill(Skill::Persuasion).unwrap().proficient);
    assert_invariants(generator.engine(), &character);
}

#[test]
fn test_rulebook_json_round_trip() {
    let json = Rulebook::standard().to_json().unwrap();
    let loaded = Rulebook::from_json(&json).unwrap();
    assert_eq!(loaded, Rulebook::standard());
}

#[test]
fn test_invalid_hit_die_rejected() {
    let mut class = knight_class();
    class.hit_die = 7;
    let err = Rulebook::standard().with_classes(vec![class]).unwrap_err();
    assert!(matches!(err, RulebookError::InvalidHitDie { hit_die: 7, .. }));
}

// =============================================================================
// Recalculation
// =============================================================================

#[test]
fn test_recalculation_idempotent_across_edits() {
    let engine = RulesEngine::standard();
    let mut rng = RngSource::seeded(99);
    let generator = CharacterGenerator::default();

    for _ in 0..20 {
        let character = generator.generate(&mut rng, false, None);
        let edits = [
            CharacterEdit::SetAbilityScore {
                ability: Ability::Constitution,
                score: 3,
            },
            CharacterEdit::SetLevel(9),
            CharacterEdit::AddItem(Item::shield("Shield", 2)),
            CharacterEdit::SetClass("Monk".to_string()),
        ];

        let mut current = character;
        for edit in edits {
            current = engine.apply_edit(&current, edit);
            assert_invariants(&engine, &current);
            assert_eq!(recalculate_character_stats(&current), current);
        }
        assert_eq!(current.proficiency_bonus, 4);
    }
}

#[test]
fn test_stale_record_is_repaired() {
    let engine = RulesEngine::standard();
    let mut character = generate_character(false, Some("Elf"));
    character.ac = 99;
    character.max_hp = 0;
    character.hp = 500;
    character.passive_perception = -3;
    for entry in character.skills.iter_mut() {
        entry.value = 42;
    }

    let repaired = recalculate_character_stats(&character);
    assert_eq!(repaired.hp, repaired.max_hp);
    assert_invariants(&engine, &repaired);
}
