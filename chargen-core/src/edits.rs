//! Edits to a character's base fields.
//!
//! An edit only touches base fields. [`RulesEngine::apply_edit`] runs the
//! recalculation pass afterwards so derived fields never go stale.
//!
//! [`RulesEngine::apply_edit`]: crate::rules::RulesEngine::apply_edit

use crate::abilities::Ability;
use crate::character::{Character, Wealth};
use crate::items::{Item, ItemId};
use crate::rules::proficiency_bonus_for_level;
use crate::skills::Skill;
use serde::{Deserialize, Serialize};

/// A change a player or the sheet UI can make to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEdit {
    SetAbilityScore { ability: Ability, score: i32 },
    /// Also moves the proficiency bonus to the level's table value.
    SetLevel(u32),
    SetClass(String),
    SetProficiencyBonus(i32),
    SetSkillProficiency { skill: Skill, proficient: bool },
    AddItem(Item),
    RemoveItem(ItemId),
    SetItemQuantity { id: ItemId, quantity: u32 },
    SetHp(i32),
    SetWealth(Wealth),
    Rename(String),
    SetBackstory(Option<String>),
}

impl CharacterEdit {
    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CharacterEdit::SetAbilityScore { .. } => "set_ability_score",
            CharacterEdit::SetLevel(_) => "set_level",
            CharacterEdit::SetClass(_) => "set_class",
            CharacterEdit::SetProficiencyBonus(_) => "set_proficiency_bonus",
            CharacterEdit::SetSkillProficiency { .. } => "set_skill_proficiency",
            CharacterEdit::AddItem(_) => "add_item",
            CharacterEdit::RemoveItem(_) => "remove_item",
            CharacterEdit::SetItemQuantity { .. } => "set_item_quantity",
            CharacterEdit::SetHp(_) => "set_hp",
            CharacterEdit::SetWealth(_) => "set_wealth",
            CharacterEdit::Rename(_) => "rename",
            CharacterEdit::SetBackstory(_) => "set_backstory",
        }
    }

    /// Apply the base-field change. Returns false if nothing matched
    /// (unknown item id or skill).
    pub fn apply(self, character: &mut Character) -> bool {
        match self {
            CharacterEdit::SetAbilityScore { ability, score } => {
                character.attributes.set(ability, score);
            }
            CharacterEdit::SetLevel(level) => {
                let level = level.max(1);
                character.level = level;
                character.proficiency_bonus = proficiency_bonus_for_level(level);
            }
            CharacterEdit::SetClass(class) => character.class = class,
            CharacterEdit::SetProficiencyBonus(bonus) => character.proficiency_bonus = bonus,
            CharacterEdit::SetSkillProficiency { skill, proficient } => {
                let Some(entry) = character.skills.iter_mut().find(|e| e.name == skill) else {
                    return false;
                };
                entry.proficient = proficient;
            }
            CharacterEdit::AddItem(item) => character.equipment.push(item),
            CharacterEdit::RemoveItem(id) => {
                let before = character.equipment.len();
                character.equipment.retain(|item| item.id != id);
                return character.equipment.len() != before;
            }
            CharacterEdit::SetItemQuantity { id, quantity } => {
                let Some(item) = character.equipment.iter_mut().find(|i| i.id == id) else {
                    return false;
                };
                item.quantity = quantity.max(1);
            }
            CharacterEdit::SetHp(hp) => character.hp = hp,
            CharacterEdit::SetWealth(wealth) => character.wealth = wealth,
            CharacterEdit::Rename(name) => character.name = name,
            CharacterEdit::SetBackstory(backstory) => character.backstory = backstory,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_level_moves_proficiency_bonus() {
        let mut character = Character::new("Ada", "Human", "Wizard");
        assert!(CharacterEdit::SetLevel(5).apply(&mut character));
        assert_eq!(character.level, 5);
        assert_eq!(character.proficiency_bonus, 3);

        CharacterEdit::SetLevel(0).apply(&mut character);
        assert_eq!(character.level, 1);
        assert_eq!(character.proficiency_bonus, 2);
    }

    #[test]
    fn test_remove_unknown_item_reports_false() {
        let mut character = Character::new("Ada", "Human", "Wizard");
        let staff = Item::weapon("Quarterstaff", "1d6 bludgeoning");
        let id = staff.id;
        CharacterEdit::AddItem(staff).apply(&mut character);

        assert!(!CharacterEdit::RemoveItem(ItemId::new()).apply(&mut character));
        assert!(CharacterEdit::RemoveItem(id).apply(&mut character));
        assert!(character.equipment.is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(CharacterEdit::SetLevel(3).kind(), "set_level");
        assert_eq!(
            CharacterEdit::AddItem(Item::gear("Rope")).kind(),
            "add_item"
        );
        assert_eq!(CharacterEdit::RemoveItem(ItemId::new()).kind(), "remove_item");
    }

    #[test]
    fn test_item_quantity_never_zero() {
        let mut character = Character::new("Ada", "Human", "Wizard");
        let darts = Item::weapon("Dart", "1d4 piercing").with_quantity(10);
        let id = darts.id;
        character.equipment.push(darts);

        CharacterEdit::SetItemQuantity { id, quantity: 0 }.apply(&mut character);
        assert_eq!(character.item(id).unwrap().quantity, 1);
    }

    #[test]
    fn test_skill_proficiency_toggle() {
        let mut character = Character::new("Ada", "Human", "Wizard");
        CharacterEdit::SetSkillProficiency {
            skill: Skill::Arcana,
            proficient: true,
        }
        .apply(&mut character);
        assert!(character.skill(Skill::Arcana).unwrap().proficient);

        character.skills.clear();
        assert!(!CharacterEdit::SetSkillProficiency {
            skill: Skill::Arcana,
            proficient: true,
        }
        .apply(&mut character));
    }
}
