use crate::domain::model::{CartLine, CatalogItem};
use crate::domain::options::{ComboOption, NoodleOption, SpiceLevel};
use crate::utils::error::ValidationError;
use uuid::Uuid;

/// 單一品項的加點選擇，每次開啟品項都重設
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierSelection {
    pub noodle: NoodleOption,
    pub combo: ComboOption,
    pub drink: Option<String>,
    pub spice: SpiceLevel,
}

impl Default for ModifierSelection {
    fn default() -> Self {
        Self {
            noodle: NoodleOption::default_option(),
            combo: ComboOption::none(),
            drink: None,
            spice: SpiceLevel::default(),
        }
    }
}

/// 將菜單品項加上使用者選擇的麵條、套餐、飲品與辣度組成一筆點餐
#[derive(Debug, Clone)]
pub struct OrderComposer {
    item: CatalogItem,
    drink_choices: Vec<String>,
    selection: ModifierSelection,
}

impl OrderComposer {
    /// `drinks` 為菜單中 `is_drink` 的品項，作為套餐飲品選項
    pub fn open(item: CatalogItem, drinks: &[CatalogItem]) -> Self {
        let drink_choices = drinks
            .iter()
            .filter(|d| d.is_drink)
            .map(|d| d.name.clone())
            .collect();

        Self {
            item,
            drink_choices,
            selection: ModifierSelection::default(),
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn selection(&self) -> &ModifierSelection {
        &self.selection
    }

    pub fn drink_choices(&self) -> &[String] {
        &self.drink_choices
    }

    pub fn select_noodle(&mut self, name: &str) -> Result<(), ValidationError> {
        let option = NoodleOption::find(name).ok_or_else(|| ValidationError::UnknownOption {
            kind: "noodle".to_string(),
            value: name.to_string(),
        })?;
        self.selection.noodle = option;
        Ok(())
    }

    /// 選回單點時清掉飲品
    pub fn select_combo(&mut self, id: &str) -> Result<(), ValidationError> {
        let option = ComboOption::find(id).ok_or_else(|| ValidationError::UnknownOption {
            kind: "combo".to_string(),
            value: id.to_string(),
        })?;
        if option.is_none() {
            self.selection.drink = None;
        }
        self.selection.combo = option;
        Ok(())
    }

    pub fn select_drink(&mut self, name: &str) -> Result<(), ValidationError> {
        if self.selection.combo.is_none() {
            return Err(ValidationError::DrinkWithoutCombo);
        }

        let name = name.trim();
        let known = if self.drink_choices.is_empty() {
            !name.is_empty()
        } else {
            self.drink_choices.iter().any(|d| d == name)
        };
        if !known {
            return Err(ValidationError::UnknownOption {
                kind: "drink".to_string(),
                value: name.to_string(),
            });
        }

        self.selection.drink = Some(name.to_string());
        Ok(())
    }

    pub fn select_spice(&mut self, level: SpiceLevel) {
        self.selection.spice = level;
    }

    fn effective_noodle(&self) -> Option<NoodleOption> {
        self.item
            .has_noodle_selection
            .then_some(self.selection.noodle)
    }

    fn effective_combo(&self) -> ComboOption {
        if self.item.allow_combo {
            self.selection.combo
        } else {
            ComboOption::none()
        }
    }

    /// 確認按鈕上顯示的單價
    pub fn preview_price(&self) -> u64 {
        u64::from(self.item.price)
            + self.effective_noodle().map(|n| u64::from(n.price)).unwrap_or(0)
            + u64::from(self.effective_combo().price)
    }

    pub fn commit(&self) -> Result<CartLine, ValidationError> {
        let combo = self.effective_combo();
        let drink = self
            .selection
            .drink
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        if !combo.is_none() && drink.is_none() {
            return Err(ValidationError::DrinkRequired);
        }

        let noodle = self.effective_noodle();

        Ok(CartLine {
            item: self.item.clone(),
            unique_id: Uuid::new_v4().to_string(),
            quantity: 1,
            selected_noodle: noodle.map(|n| n.name.to_string()),
            noodle_price: noodle.map(|n| n.price).unwrap_or(0),
            selected_combo: (!combo.is_none()).then(|| combo.name.to_string()),
            combo_price: combo.price,
            selected_drink: if combo.is_none() {
                None
            } else {
                drink.map(str::to_string)
            },
            note: Some(self.selection.spice.label().to_string()),
        })
    }
}
