//! The eighteen skills and their derived bonuses.

use crate::abilities::{Ability, Modifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// D&D 5e skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// Look a skill up by display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Skill> {
        Skill::all()
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    /// All skills in sheet order.
    pub fn all() -> &'static [Skill; 18] {
        &[
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One line of the skill block on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: Skill,
    pub attribute: Ability,
    pub proficient: bool,
    pub value: i32,
}

impl SkillEntry {
    pub fn new(skill: Skill, proficient: bool) -> Self {
        Self {
            name: skill,
            attribute: skill.ability(),
            proficient,
            value: 0,
        }
    }
}

/// The full eighteen-entry skill block, none proficient, values unresolved.
pub fn default_skills() -> Vec<SkillEntry> {
    Skill::all()
        .iter()
        .map(|&skill| SkillEntry::new(skill, false))
        .collect()
}

/// Rebuild the full skill block in canonical order, keeping the proficiency
/// flags of whatever entries were stored.
pub fn normalize_skills(skills: &[SkillEntry]) -> Vec<SkillEntry> {
    Skill::all()
        .iter()
        .map(|&skill| {
            let proficient = skills
                .iter()
                .any(|entry| entry.name == skill && entry.proficient);
            SkillEntry::new(skill, proficient)
        })
        .collect()
}

/// Recompute every skill value from the modifiers and proficiency bonus.
pub fn resolve_skills(
    skills: &[SkillEntry],
    modifiers: &Modifiers,
    proficiency_bonus: i32,
) -> Vec<SkillEntry> {
    skills
        .iter()
        .map(|entry| {
            let bonus = if entry.proficient { proficiency_bonus } else { 0 };
            SkillEntry {
                value: modifiers.get(entry.attribute) + bonus,
                ..entry.clone()
            }
        })
        .collect()
}

/// 10 plus the Perception bonus, or 10 plus the Wisdom modifier if the
/// skill block has no Perception entry.
pub fn passive_perception(skills: &[SkillEntry], modifiers: &Modifiers) -> i32 {
    let perception = skills
        .iter()
        .find(|entry| entry.name == Skill::Perception)
        .map(|entry| entry.value)
        .unwrap_or(modifiers.wisdom);
    10 + perception
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityScores;

    #[test]
    fn test_eighteen_unique_skills() {
        let skills = default_skills();
        assert_eq!(skills.len(), 18);
        let names: std::collections::HashSet<_> = skills.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 18);
        assert!(skills.iter().all(|s| s.attribute == s.name.ability()));
    }

    #[test]
    fn test_normalize_fills_missing_entries() {
        let stored = vec![
            SkillEntry::new(Skill::Stealth, true),
            SkillEntry::new(Skill::Arcana, false),
            SkillEntry::new(Skill::Stealth, false),
        ];
        let skills = normalize_skills(&stored);

        assert_eq!(skills.len(), 18);
        assert_eq!(skills[0].name, Skill::Acrobatics);
        let proficient: Vec<_> = skills.iter().filter(|e| e.proficient).map(|e| e.name).collect();
        assert_eq!(proficient, vec![Skill::Stealth]);
        assert_eq!(normalize_skills(&skills), skills);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Skill::from_name("sleight of hand"), Some(Skill::SleightOfHand));
        assert_eq!(Skill::from_name("Perception"), Some(Skill::Perception));
        assert_eq!(Skill::from_name("Juggling"), None);
    }

    #[test]
    fn test_resolve_skills() {
        let mods = AbilityScores::new(16, 14, 12, 10, 8, 13).modifiers();
        let mut skills = default_skills();
        for entry in skills.iter_mut() {
            entry.proficient = matches!(entry.name, Skill::Athletics | Skill::Perception);
        }

        let resolved = resolve_skills(&skills, &mods, 2);
        for entry in &resolved {
            let expected =
                mods.get(entry.attribute) + if entry.proficient { 2 } else { 0 };
            assert_eq!(entry.value, expected, "{}", entry.name);
        }

        let athletics = resolved.iter().find(|s| s.name == Skill::Athletics).unwrap();
        assert_eq!(athletics.value, 5);
        let perception = resolved.iter().find(|s| s.name == Skill::Perception).unwrap();
        assert_eq!(perception.value, 1);
        assert_eq!(passive_perception(&resolved, &mods), 11);
    }

    #[test]
    fn test_passive_perception_falls_back_to_wisdom() {
        let mods = AbilityScores::new(10, 10, 10, 10, 16, 10).modifiers();
        let skills: Vec<_> = default_skills()
            .into_iter()
            .filter(|s| s.name != Skill::Perception)
            .collect();
        assert_eq!(passive_perception(&skills, &mods), 13);
    }
}
