//! D&D 5e rules engine: armor class, hit points, skills, and the
//! recalculation pass that keeps every derived field of a [`Character`]
//! consistent with its base fields.
//!
//! This is the only place the derivation math lives. The generator and the
//! edit pipeline both go through it.

use crate::abilities::{Ability, Modifiers};
use crate::character::{Character, CharacterError};
use crate::edits::CharacterEdit;
use crate::items::{Item, ItemKind};
use crate::rulebook::{Rulebook, UnarmoredDefense};
use crate::skills::{normalize_skills, passive_perception, resolve_skills};
use std::sync::Arc;

/// Compute armor class from worn equipment and class features.
///
/// Only the first armor and the first shield in the list count. Armor without
/// a usable base AC is treated as absent.
pub fn armor_class(
    unarmored_defense: Option<UnarmoredDefense>,
    dex_mod: i32,
    con_mod: i32,
    wis_mod: i32,
    equipment: &[Item],
) -> i32 {
    let armor = equipment.iter().find_map(|item| match item.kind {
        ItemKind::Armor {
            ac_base,
            dex_bonus_cap,
        } => Some((ac_base, dex_bonus_cap)),
        _ => None,
    });
    let shield = equipment.iter().find_map(|item| match item.kind {
        ItemKind::Shield { ac_bonus } => Some(ac_bonus),
        _ => None,
    });

    let base = match armor {
        Some((Some(ac_base), dex_bonus_cap)) if ac_base > 0 => {
            ac_base + dex_mod.min(dex_bonus_cap.unwrap_or(dex_mod))
        }
        _ => match (unarmored_defense, shield) {
            (Some(UnarmoredDefense::Constitution), _) => 10 + dex_mod + con_mod,
            // A shield cancels the Wisdom bonus entirely
            (Some(UnarmoredDefense::WisdomWithoutShield), None) => 10 + dex_mod + wis_mod,
            _ => 10 + dex_mod,
        },
    };

    let shield_bonus = shield.flatten().unwrap_or(0);
    (base + shield_bonus).max(0)
}

/// Maximum hit points: full hit die at level 1, the rounded-up average
/// (`d/2 + 1`) for each later level, and the Constitution modifier per level.
pub fn max_hit_points(hit_die: u32, level: u32, con_mod: i32) -> i32 {
    let die = i128::from(hit_die);
    let level = i128::from(level.max(1));

    // Work in halves so an odd die still floors exactly
    let base_halves = 2 * die + (die + 2) * (level - 1);
    let total_halves = base_halves + 2 * i128::from(con_mod) * level;

    total_halves.div_euclid(2).clamp(1, i128::from(i32::MAX)) as i32
}

/// Proficiency bonus by character level.
pub fn proficiency_bonus_for_level(level: u32) -> i32 {
    match level {
        0..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        // Level 17+ caps at 6
        _ => 6,
    }
}

/// Current HP after max HP changes: non-positive HP is an invalid state and
/// heals to full, anything else is clamped to the new maximum.
pub fn settle_hit_points(current: i32, max_hp: i32) -> i32 {
    if current <= 0 {
        max_hp
    } else {
        current.min(max_hp)
    }
}

/// Resolves derived character stats against a [`Rulebook`].
#[derive(Debug, Clone)]
pub struct RulesEngine {
    rulebook: Arc<Rulebook>,
}

impl RulesEngine {
    pub fn new(rulebook: Arc<Rulebook>) -> Self {
        Self { rulebook }
    }

    /// An engine over the shared standard rulebook.
    pub fn standard() -> Self {
        Self::new(Rulebook::shared())
    }

    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    pub fn rulebook_arc(&self) -> Arc<Rulebook> {
        Arc::clone(&self.rulebook)
    }

    /// Armor class for a class name; unknown classes get no unarmored defense.
    pub fn calculate_ac(
        &self,
        class_name: &str,
        dex_mod: i32,
        con_mod: i32,
        wis_mod: i32,
        equipment: &[Item],
    ) -> i32 {
        armor_class(
            self.rulebook.unarmored_defense_for(class_name),
            dex_mod,
            con_mod,
            wis_mod,
            equipment,
        )
    }

    /// Maximum HP for a class name; unknown classes use a d8.
    pub fn calculate_max_hp(&self, class_name: &str, level: u32, con_mod: i32) -> i32 {
        max_hit_points(self.rulebook.hit_die_for(class_name), level, con_mod)
    }

    /// Saving throw bonus, with proficiency if the class grants it.
    pub fn saving_throw(&self, character: &Character, ability: Ability) -> i32 {
        let modifier = character.attributes.modifier(ability);
        if self
            .rulebook
            .saving_throws_for(&character.class)
            .contains(&ability)
        {
            modifier + character.proficiency_bonus
        } else {
            modifier
        }
    }

    /// Re-derive every computed field. Calling it twice gives the same result.
    pub fn recalculate(&self, character: &Character) -> Character {
        let mut updated = character.clone();
        self.recalculate_in_place(&mut updated);
        updated
    }

    /// Parse a stored record and bring its derived fields up to date.
    pub fn recalculate_json(&self, json: &str) -> Result<Character, CharacterError> {
        let character = Character::from_json(json)?;
        Ok(self.recalculate(&character))
    }

    /// Apply an edit to the base fields, then recalculate.
    pub fn apply_edit(&self, character: &Character, edit: CharacterEdit) -> Character {
        let mut updated = character.clone();
        let kind = edit.kind();
        if !edit.apply(&mut updated) {
            tracing::debug!(character = %character.id, edit = kind, "edit matched nothing");
        }
        self.recalculate_in_place(&mut updated);
        updated
    }

    pub(crate) fn recalculate_in_place(&self, character: &mut Character) {
        character.level = character.level.max(1);

        let modifiers = Modifiers::from_scores(&character.attributes);
        character.modifiers = modifiers;

        character.max_hp =
            self.calculate_max_hp(&character.class, character.level, modifiers.constitution);
        character.hp = settle_hit_points(character.hp, character.max_hp);

        character.skills = resolve_skills(
            &normalize_skills(&character.skills),
            &modifiers,
            character.proficiency_bonus,
        );
        character.passive_perception = passive_perception(&character.skills, &modifiers);

        character.ac = self.calculate_ac(
            &character.class,
            modifiers.dexterity,
            modifiers.constitution,
            modifiers.wisdom,
            &character.equipment,
        );
        character.initiative = modifiers.dexterity;

        tracing::debug!(
            character = %character.id,
            class = %character.class,
            level = character.level,
            max_hp = character.max_hp,
            ac = character.ac,
            "recalculated character"
        );
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::standard()
    }
}
