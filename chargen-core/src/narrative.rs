//! Backstory text for player characters.
//!
//! The generator only needs a string back, so any text source can be plugged
//! in behind [`Narrator`]. [`TemplateNarrator`] is the built-in one.

use crate::abilities::{Ability, AbilityScores};

/// What a narrator gets to work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackstoryContext<'a> {
    pub background: &'a str,
    pub class: &'a str,
    pub race: &'a str,
    pub attributes: &'a AbilityScores,
}

/// A source of backstory text.
pub trait Narrator: Send + Sync {
    fn backstory(&self, context: &BackstoryContext<'_>) -> String;
}

impl<F> Narrator for F
where
    F: Fn(&BackstoryContext<'_>) -> String + Send + Sync,
{
    fn backstory(&self, context: &BackstoryContext<'_>) -> String {
        self(context)
    }
}

/// Fills a fixed template from the character's background and best ability.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    fn strength_phrase(ability: Ability) -> &'static str {
        match ability {
            Ability::Strength => "a strong arm",
            Ability::Dexterity => "quick hands",
            Ability::Constitution => "a hard-won toughness",
            Ability::Intelligence => "a sharp mind",
            Ability::Wisdom => "a patient eye",
            Ability::Charisma => "a way with people",
        }
    }
}

impl Narrator for TemplateNarrator {
    fn backstory(&self, context: &BackstoryContext<'_>) -> String {
        let background = if context.background.is_empty() {
            "wanderer".to_string()
        } else {
            context.background.to_lowercase()
        };
        let article = match background.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        };

        format!(
            "Once {article} {background}, this {race} set out as a {class}, \
             trusting in {phrase} to see them through.",
            race = context.race,
            class = context.class.to_lowercase(),
            phrase = Self::strength_phrase(context.attributes.highest()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_mentions_background_and_class() {
        let scores = AbilityScores::new(8, 10, 12, 17, 13, 10);
        let context = BackstoryContext {
            background: "Acolyte",
            class: "Wizard",
            race: "Gnome",
            attributes: &scores,
        };

        let text = TemplateNarrator.backstory(&context);
        assert!(text.starts_with("Once an acolyte, this Gnome"));
        assert!(text.contains("wizard"));
        assert!(text.contains("a sharp mind"));
    }

    #[test]
    fn test_closure_narrator() {
        let narrator = |context: &BackstoryContext<'_>| format!("{} from nowhere", context.race);
        let scores = AbilityScores::default();
        let context = BackstoryContext {
            background: "",
            class: "Bard",
            race: "Tiefling",
            attributes: &scores,
        };
        assert_eq!(narrator.backstory(&context), "Tiefling from nowhere");
    }
}
