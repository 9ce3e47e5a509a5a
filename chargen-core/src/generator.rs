//! Random character generation.
//!
//! [`CharacterGenerator`] rolls a brand-new character against a rulebook and
//! returns it fully derived. Every random draw goes through the
//! [`RandomSource`] passed to [`CharacterGenerator::generate`], in this order:
//! race (unless pinned), class, background, alignment, the six ability
//! scores, skill picks, starting wealth, first name, last name, and the NPC
//! quote.

use crate::abilities::{Ability, AbilityScores, Modifiers};
use crate::character::{Character, CharacterId};
use crate::dice::{choose, roll_ability_score, roll_die, DieType, RandomSource, RngSource};
use crate::narrative::{BackstoryContext, Narrator, TemplateNarrator};
use crate::rulebook::{ClassDefinition, RaceDefinition, Rulebook};
use crate::rules::RulesEngine;
use crate::skills::{default_skills, passive_perception, resolve_skills, Skill};
use chrono::Utc;
use std::fmt;

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// NPC scores are `npc_base_score + 1d(npc_score_die)`.
    pub npc_base_score: i32,
    pub npc_score_die: DieType,
    pub starting_level: u32,
    pub starting_proficiency_bonus: i32,
    /// Used when a race lists no languages.
    pub default_languages: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            npc_base_score: 10,
            npc_score_die: DieType::D4,
            starting_level: 1,
            starting_proficiency_bonus: 2,
            default_languages: vec!["Common".to_string()],
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_npc_base_score(mut self, score: i32) -> Self {
        self.npc_base_score = score;
        self
    }

    pub fn with_npc_score_die(mut self, die: DieType) -> Self {
        self.npc_score_die = die;
        self
    }

    pub fn with_starting_level(mut self, level: u32) -> Self {
        self.starting_level = level.max(1);
        self
    }

    pub fn with_starting_proficiency_bonus(mut self, bonus: i32) -> Self {
        self.starting_proficiency_bonus = bonus;
        self
    }

    pub fn with_default_languages(mut self, languages: Vec<String>) -> Self {
        self.default_languages = languages;
        self
    }
}

/// Builds new characters from a rulebook.
pub struct CharacterGenerator {
    engine: RulesEngine,
    narrator: Box<dyn Narrator>,
    config: GeneratorConfig,
}

impl fmt::Debug for CharacterGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterGenerator")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CharacterGenerator {
    fn default() -> Self {
        Self::new(RulesEngine::standard())
    }
}

impl CharacterGenerator {
    pub fn new(engine: RulesEngine) -> Self {
        Self {
            engine,
            narrator: Box::new(TemplateNarrator),
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn rulebook(&self) -> &Rulebook {
        self.engine.rulebook()
    }

    /// Generate with the thread RNG.
    pub fn generate_random(&self, is_npc: bool, race: Option<&str>) -> Character {
        self.generate(&mut RngSource::thread(), is_npc, race)
    }

    /// Generate a complete character. An unknown `race` falls back to the
    /// rulebook's first race.
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        source: &mut S,
        is_npc: bool,
        race: Option<&str>,
    ) -> Character {
        let rulebook = self.rulebook();

        let race = match race {
            Some(name) => rulebook.race_or_default(name),
            None => choose(source, rulebook.list_races()).unwrap_or_else(|| rulebook.default_race()),
        };
        let class = choose(source, rulebook.list_classes())
            .unwrap_or_else(|| rulebook.default_class());
        let background = pick_string(source, rulebook.list_backgrounds());
        let alignment = pick_string(source, rulebook.list_alignments());

        let attributes = self.roll_scores(source, is_npc, race);
        let modifiers = Modifiers::from_scores(&attributes);

        let level = self.config.starting_level.max(1);
        let proficiency_bonus = self.config.starting_proficiency_bonus;
        let max_hp = self
            .engine
            .calculate_max_hp(&class.name, level, modifiers.constitution);

        let chosen = pick_skills(source, class);
        let mut skills = default_skills();
        for entry in skills.iter_mut() {
            entry.proficient = chosen.contains(&entry.name);
        }
        let skills = resolve_skills(&skills, &modifiers, proficiency_bonus);
        let passive_perception = passive_perception(&skills, &modifiers);

        let equipment: Vec<_> = rulebook
            .kit_for(&class.name)
            .iter()
            .map(|kit| kit.instantiate())
            .collect();
        let wealth = rulebook.wealth_for(&class.name).roll(source);

        let ac = self.engine.calculate_ac(
            &class.name,
            modifiers.dexterity,
            modifiers.constitution,
            modifiers.wisdom,
            &equipment,
        );

        let first = pick_string(source, rulebook.first_names());
        let last = pick_string(source, rulebook.last_names());
        let name = format!("{first} {last}").trim().to_string();

        let backstory = if is_npc {
            Some(format!("\"{}\"", pick_string(source, rulebook.npc_quotes())))
        } else {
            Some(self.narrator.backstory(&BackstoryContext {
                background: &background,
                class: &class.name,
                race: &race.name,
                attributes: &attributes,
            }))
        };

        let languages = if race.languages.is_empty() {
            self.config.default_languages.clone()
        } else {
            race.languages.clone()
        };

        let character = Character {
            id: CharacterId::new(),
            name,
            race: race.name.clone(),
            class: class.name.clone(),
            background,
            alignment,
            level,
            proficiency_bonus,
            hp: max_hp,
            max_hp,
            ac,
            initiative: modifiers.dexterity,
            attributes,
            modifiers,
            skills,
            passive_perception,
            equipment,
            wealth,
            languages,
            senses: race.senses.clone(),
            backstory,
            created_at: Utc::now(),
            is_npc,
        };

        tracing::debug!(
            character = %character.id,
            race = %character.race,
            class = %character.class,
            level = character.level,
            is_npc,
            "generated character"
        );
        character
    }

    fn roll_scores<S: RandomSource + ?Sized>(
        &self,
        source: &mut S,
        is_npc: bool,
        race: &RaceDefinition,
    ) -> AbilityScores {
        let mut scores = AbilityScores::from_fn(|_: Ability| {
            if is_npc {
                self.config.npc_base_score
                    + roll_die(source, self.config.npc_score_die.sides()) as i32
            } else {
                roll_ability_score(source)
            }
        });
        race.apply_ability_bonuses(&mut scores);
        scores
    }
}

fn pick_string<S: RandomSource + ?Sized>(source: &mut S, items: &[String]) -> String {
    choose(source, items).cloned().unwrap_or_default()
}

/// Draw up to `skill_count` distinct skills from the class list.
fn pick_skills<S: RandomSource + ?Sized>(source: &mut S, class: &ClassDefinition) -> Vec<Skill> {
    let mut remaining: Vec<Skill> = Vec::with_capacity(class.skill_choices.len());
    for &skill in &class.skill_choices {
        if !remaining.contains(&skill) {
            remaining.push(skill);
        }
    }
    let mut chosen = Vec::with_capacity(class.skill_count);

    while chosen.len() < class.skill_count && !remaining.is_empty() {
        let index = source.next_int(remaining.len() as u32) as usize;
        chosen.push(remaining.remove(index.min(remaining.len() - 1)));
    }
    chosen
}
