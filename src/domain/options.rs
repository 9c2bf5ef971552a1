//! 固定的加點選項、時段與分類

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoodleOption {
    pub name: &'static str,
    pub price: u32,
}

pub const NOODLE_OPTIONS: [NoodleOption; 6] = [
    NoodleOption { name: "筆尖麵", price: 0 },
    NoodleOption { name: "燉飯", price: 0 },
    NoodleOption { name: "天使細麵", price: 10 },
    NoodleOption { name: "通心麵", price: 10 },
    NoodleOption { name: "細扁麵", price: 10 },
    NoodleOption { name: "墨魚麵", price: 40 },
];

impl NoodleOption {
    pub fn default_option() -> Self {
        NOODLE_OPTIONS[0]
    }

    pub fn find(name: &str) -> Option<Self> {
        NOODLE_OPTIONS.iter().copied().find(|o| o.name == name.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboOption {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}

pub const COMBO_NONE_ID: &str = "none";

pub const COMBO_OPTIONS: [ComboOption; 3] = [
    ComboOption { id: COMBO_NONE_ID, name: "單點", price: 0 },
    ComboOption { id: "A", name: "超值套餐 (+濃湯+麵包+飲品)", price: 80 },
    ComboOption { id: "B", name: "酥皮套餐 (+酥皮濃湯+飲品)", price: 130 },
];

impl ComboOption {
    pub fn none() -> Self {
        COMBO_OPTIONS[0]
    }

    pub fn is_none(&self) -> bool {
        self.id == COMBO_NONE_ID
    }

    /// id 不分大小寫
    pub fn find(id: &str) -> Option<Self> {
        COMBO_OPTIONS
            .iter()
            .copied()
            .find(|o| o.id.eq_ignore_ascii_case(id.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpiceLevel {
    #[default]
    #[serde(rename = "不辣")]
    None,
    #[serde(rename = "小辣")]
    Mild,
    #[serde(rename = "中辣")]
    Medium,
    #[serde(rename = "大辣")]
    Hot,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] = [
        SpiceLevel::None,
        SpiceLevel::Mild,
        SpiceLevel::Medium,
        SpiceLevel::Hot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpiceLevel::None => "不辣",
            SpiceLevel::Mild => "小辣",
            SpiceLevel::Medium => "中辣",
            SpiceLevel::Hot => "大辣",
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpiceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "不辣" | "none" | "not-spicy" => Ok(SpiceLevel::None),
            "小辣" | "mild" => Ok(SpiceLevel::Mild),
            "中辣" | "medium" => Ok(SpiceLevel::Medium),
            "大辣" | "hot" => Ok(SpiceLevel::Hot),
            other => Err(format!("unknown spice level '{}'", other)),
        }
    }
}

pub const TIME_SLOTS: [&str; 12] = [
    "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "17:30", "18:00", "18:30", "19:00",
    "19:30", "20:00",
];

pub fn is_time_slot(value: &str) -> bool {
    TIME_SLOTS.contains(&value)
}

pub const FOOD_CATEGORIES: [&str; 6] = ["義大利麵", "義式燉飯", "焗烤", "PIZZA", "炸物/點心", "飲品"];

pub const MIN_PAX: u8 = 1;
pub const MAX_PAX: u8 = 10;
pub const DEFAULT_PAX: u8 = 2;
