//! Ability scores and their modifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Convert an ability score to its modifier.
///
/// Rounds toward negative infinity: 9 -> -1, 7 -> -2.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Ability scores container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    /// Build scores by evaluating `f` once per ability, in [`Ability::all`] order.
    pub fn from_fn(mut f: impl FnMut(Ability) -> i32) -> Self {
        let mut scores = Self::default();
        for ability in Ability::all() {
            scores.set(ability, f(ability));
        }
        scores
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    pub fn add(&mut self, ability: Ability, bonus: i32) {
        self.set(ability, self.get(ability) + bonus);
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_scores(self)
    }

    /// The ability with the highest score; ties go to the earlier ability.
    pub fn highest(&self) -> Ability {
        Ability::all()
            .into_iter()
            .fold(Ability::Strength, |best, ability| {
                if self.get(ability) > self.get(best) {
                    ability
                } else {
                    best
                }
            })
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Ability modifiers, always derived from [`AbilityScores`].
///
/// Stored on the character for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Modifiers {
    pub fn from_scores(scores: &AbilityScores) -> Self {
        Self {
            strength: scores.modifier(Ability::Strength),
            dexterity: scores.modifier(Ability::Dexterity),
            constitution: scores.modifier(Ability::Constitution),
            intelligence: scores.modifier(Ability::Intelligence),
            wisdom: scores.modifier(Ability::Wisdom),
            charisma: scores.modifier(Ability::Charisma),
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_floors() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn test_modifier_matches_floor_for_all_scores() {
        for score in -10..=40 {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            assert_eq!(ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn test_modifiers_from_scores() {
        let scores = AbilityScores::new(15, 14, 13, 12, 9, 8);
        let mods = scores.modifiers();
        assert_eq!(mods.strength, 2);
        assert_eq!(mods.dexterity, 2);
        assert_eq!(mods.constitution, 1);
        assert_eq!(mods.intelligence, 1);
        assert_eq!(mods.wisdom, -1);
        assert_eq!(mods.charisma, -1);
        for ability in Ability::all() {
            assert_eq!(mods.get(ability), scores.modifier(ability));
        }
    }

    #[test]
    fn test_add_and_highest() {
        let mut scores = AbilityScores::default();
        scores.add(Ability::Wisdom, 3);
        scores.add(Ability::Charisma, 3);
        assert_eq!(scores.wisdom, 13);
        assert_eq!(scores.highest(), Ability::Wisdom);
    }

    #[test]
    fn test_from_fn_order() {
        let mut next = 0;
        let scores = AbilityScores::from_fn(|_| {
            next += 1;
            next
        });
        assert_eq!(scores, AbilityScores::new(1, 2, 3, 4, 5, 6));
    }
}
