//! Dice rolling for character generation.
//!
//! Every random decision the generator makes is funnelled through a
//! [`RandomSource`], so a seeded or scripted source can stand in for the
//! thread RNG. Supports standard dice notation: XdY+Z and keep highest/lowest.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice parsing.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
    #[error("Cannot keep {keep} dice when only rolling {count} (in {notation})")]
    InvalidKeepCount {
        keep: u32,
        count: u32,
        notation: String,
    },
}

/// A source of uniform random integers.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, bound)`. A `bound` of 0 or 1 yields 0.
    fn next_int(&mut self, bound: u32) -> u32;
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// A reproducible source, handy for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }
}

/// Roll a single die with the given number of sides, uniform in `[1, sides]`.
pub fn roll_die<S: RandomSource + ?Sized>(source: &mut S, sides: u32) -> u32 {
    source.next_int(sides.max(1)) + 1
}

/// Roll 4d6, drop the lowest die, for ability score generation.
pub fn roll_ability_score<S: RandomSource + ?Sized>(source: &mut S) -> i32 {
    let mut rolls = [0u32; 4];
    for roll in rolls.iter_mut() {
        *roll = roll_die(source, 6);
    }
    rolls.sort_unstable();
    rolls[1..].iter().sum::<u32>() as i32
}

/// Pick one entry uniformly at random. `None` only for an empty slice.
pub fn choose<'a, T, S: RandomSource + ?Sized>(source: &mut S, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = source.next_int(items.len() as u32) as usize;
    items.get(index)
}

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A single die component of a dice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceComponent {
    pub count: u32,
    pub die_type: DieType,
    pub keep_highest: Option<u32>,
    pub keep_lowest: Option<u32>,
}

/// A complete dice expression (e.g., 5d4, 4d6kh3, 2d6+3).
///
/// Serializes as its notation string so rule tables stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpression {
    pub components: Vec<DiceComponent>,
    pub modifier: i32,
    pub original: String,
}

impl DiceExpression {
    /// Parse a dice notation string.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let notation = notation.trim().to_lowercase();
        if notation.is_empty() {
            return Err(DiceError::NoDice);
        }

        let mut components = Vec::new();
        let mut modifier: i32 = 0;
        let mut current = String::new();
        let mut sign: i32 = 1;

        for ch in notation.chars() {
            match ch {
                '+' | '-' => {
                    if !current.is_empty() {
                        Self::parse_component(&current, sign, &mut components, &mut modifier)?;
                        current.clear();
                    }
                    sign = if ch == '+' { 1 } else { -1 };
                }
                ' ' => continue,
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            Self::parse_component(&current, sign, &mut components, &mut modifier)?;
        }

        if components.is_empty() && modifier == 0 {
            return Err(DiceError::NoDice);
        }

        Ok(DiceExpression {
            components,
            modifier,
            original: notation,
        })
    }

    fn parse_component(
        s: &str,
        sign: i32,
        components: &mut Vec<DiceComponent>,
        modifier: &mut i32,
    ) -> Result<(), DiceError> {
        let Some(d_pos) = s.find('d') else {
            let value: i32 = s
                .parse()
                .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
            *modifier += sign * value;
            return Ok(());
        };

        // Subtracting dice is not supported
        if sign < 0 {
            return Err(DiceError::InvalidNotation(s.to_string()));
        }

        let count_str = &s[..d_pos];
        let rest = &s[d_pos + 1..];

        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::InvalidNotation(s.to_string()))?
        };

        let (sides_str, keep_highest, keep_lowest) = if let Some(kh_pos) = rest.find("kh") {
            let keep: u32 = rest[kh_pos + 2..]
                .parse()
                .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
            (&rest[..kh_pos], Some(keep), None)
        } else if let Some(kl_pos) = rest.find("kl") {
            let keep: u32 = rest[kl_pos + 2..]
                .parse()
                .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
            (&rest[..kl_pos], None, Some(keep))
        } else {
            (rest, None, None)
        };

        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;

        let die_type = DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))?;

        if let Some(keep) = keep_highest.or(keep_lowest) {
            if keep > count {
                return Err(DiceError::InvalidKeepCount {
                    keep,
                    count,
                    notation: s.to_string(),
                });
            }
        }

        components.push(DiceComponent {
            count,
            die_type,
            keep_highest,
            keep_lowest,
        });
        Ok(())
    }

    /// Roll the expression using the given source.
    pub fn roll_with<S: RandomSource + ?Sized>(&self, source: &mut S) -> RollResult {
        let mut component_results = Vec::with_capacity(self.components.len());

        for component in &self.components {
            let rolls: Vec<u32> = (0..component.count)
                .map(|_| roll_die(source, component.die_type.sides()))
                .collect();

            let mut kept = rolls.clone();
            if let Some(keep) = component.keep_highest {
                kept.sort_by(|a, b| b.cmp(a));
                kept.truncate(keep as usize);
            } else if let Some(keep) = component.keep_lowest {
                kept.sort();
                kept.truncate(keep as usize);
            }

            let subtotal = kept.iter().sum();
            component_results.push(ComponentResult {
                die_type: component.die_type,
                rolls,
                kept,
                subtotal,
            });
        }

        let dice_total: i32 = component_results.iter().map(|c| c.subtotal as i32).sum();

        RollResult {
            component_results,
            modifier: self.modifier,
            total: dice_total + self.modifier,
        }
    }

    /// Smallest total this expression can produce.
    pub fn min_total(&self) -> i32 {
        let dice: u32 = self
            .components
            .iter()
            .map(|c| c.keep_highest.or(c.keep_lowest).unwrap_or(c.count))
            .sum();
        dice as i32 + self.modifier
    }

    /// Largest total this expression can produce.
    pub fn max_total(&self) -> i32 {
        let dice: u32 = self
            .components
            .iter()
            .map(|c| c.keep_highest.or(c.keep_lowest).unwrap_or(c.count) * c.die_type.sides())
            .sum();
        dice as i32 + self.modifier
    }
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s)
    }
}

impl TryFrom<String> for DiceExpression {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DiceExpression::parse(&value)
    }
}

impl From<DiceExpression> for String {
    fn from(expr: DiceExpression) -> Self {
        expr.original
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Result of rolling a single dice component.
#[derive(Debug, Clone)]
pub struct ComponentResult {
    pub die_type: DieType,
    pub rolls: Vec<u32>,
    pub kept: Vec<u32>,
    pub subtotal: u32,
}

/// Complete result of a dice roll.
#[derive(Debug, Clone)]
pub struct RollResult {
    pub component_results: Vec<ComponentResult>,
    pub modifier: i32,
    pub total: i32,
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dice = self
            .component_results
            .iter()
            .map(|c| {
                let rolls: Vec<String> = c.rolls.iter().map(|r| r.to_string()).collect();
                format!("[{}]", rolls.join(", "))
            })
            .collect::<Vec<_>>()
            .join(" + ");

        match self.modifier {
            0 => write!(f, "{} = {}", dice, self.total),
            m if m > 0 => write!(f, "{} + {} = {}", dice, m, self.total),
            m => write!(f, "{} - {} = {}", dice, m.abs(), self.total),
        }
    }
}
