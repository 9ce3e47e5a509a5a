//! Equipment carried by a character.
//!
//! Items are a tagged variant: only armor carries armor fields, only shields
//! carry a shield bonus, and so on. On the wire the tag is the `type` field.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an item in an equipment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-specific item data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Weapon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage: Option<String>,
    },
    Armor {
        #[serde(rename = "acBase", default, skip_serializing_if = "Option::is_none")]
        ac_base: Option<i32>,
        /// `Some(0)` is heavy armor, `Some(2)` medium, `None` light.
        #[serde(rename = "dexBonusCap", default, skip_serializing_if = "Option::is_none")]
        dex_bonus_cap: Option<i32>,
    },
    Shield {
        #[serde(rename = "acBonus", default, skip_serializing_if = "Option::is_none")]
        ac_bonus: Option<i32>,
    },
    Consumable,
    Tool,
    Gear,
    Instrument,
}

impl ItemKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Shield { .. } => "shield",
            ItemKind::Consumable => "consumable",
            ItemKind::Tool => "tool",
            ItemKind::Gear => "gear",
            ItemKind::Instrument => "instrument",
        }
    }
}

/// An item in a character's equipment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            quantity: 1,
            kind,
        }
    }

    pub fn weapon(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self::new(
            name,
            ItemKind::Weapon {
                damage: Some(damage.into()),
            },
        )
    }

    pub fn armor(name: impl Into<String>, ac_base: i32, dex_bonus_cap: Option<i32>) -> Self {
        Self::new(
            name,
            ItemKind::Armor {
                ac_base: Some(ac_base),
                dex_bonus_cap,
            },
        )
    }

    pub fn shield(name: impl Into<String>, ac_bonus: i32) -> Self {
        Self::new(
            name,
            ItemKind::Shield {
                ac_bonus: Some(ac_bonus),
            },
        )
    }

    pub fn gear(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Gear)
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn is_armor(&self) -> bool {
        matches!(self.kind, ItemKind::Armor { .. })
    }

    pub fn is_shield(&self) -> bool {
        matches!(self.kind, ItemKind::Shield { .. })
    }
}

/// A starting-kit entry: an item minus its identity.
///
/// Every character generated from a kit gets fresh item ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

fn default_quantity() -> u32 {
    1
}

impl KitItem {
    pub fn new(name: impl Into<String>, quantity: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.max(1),
            kind,
        }
    }

    pub fn instantiate(&self) -> Item {
        Item::new(self.name.clone(), self.kind.clone()).with_quantity(self.quantity)
    }
}
