//! 以 TOML 描述一次訂位與預點內容，讓文字介面走完整個訂位流程
//!
//! ```toml
//! [booking]
//! date = "2026-10-20"
//! time = "18:00"
//! pax = 2
//!
//! [[picks]]
//! item = "青醬雞肉"
//! noodle = "天使細麵"
//! combo = "A"
//! drink = "紅茶"
//! spice = "小辣"
//! ```

use crate::core::reservation_flow::ReservationFlow;
use crate::domain::options::SpiceLevel;
use crate::utils::error::{OrderError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFile {
    pub booking: BookingSection,
    #[serde(default)]
    pub picks: Vec<OrderPick>,
}

/// 姓名電話預設沿用會員資料
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSection {
    pub date: Option<String>,
    pub time: Option<String>,
    pub pax: Option<u8>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPick {
    /// 品項 id 或名稱
    pub item: String,
    pub noodle: Option<String>,
    pub combo: Option<String>,
    pub drink: Option<String>,
    pub spice: Option<String>,
}

impl OrderFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| OrderError::ConfigValidationError {
            field: "order".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 依序填寫訂位資訊並把每個品項加入購物車，停在可送出的狀態
    pub fn apply(&self, flow: &mut ReservationFlow) -> Result<()> {
        {
            let form = flow.form_mut()?;
            if let Some(name) = &self.booking.name {
                form.set_name(name);
            }
            if let Some(phone) = &self.booking.phone {
                form.set_phone(phone);
            }
            if let Some(date) = &self.booking.date {
                form.set_date(date)?;
            }
            if let Some(time) = &self.booking.time {
                form.set_time(time)?;
            }
            if let Some(pax) = self.booking.pax {
                form.set_pax(pax);
            }
        }
        flow.proceed_to_order()?;

        for pick in &self.picks {
            let item_id = flow
                .catalog()
                .find_by_name(&pick.item)
                .map(|item| item.id.clone())
                .ok_or_else(|| ValidationError::UnknownItem {
                    id: pick.item.clone(),
                })?;

            let composer = flow.open_item(&item_id)?;
            if let Some(noodle) = &pick.noodle {
                composer.select_noodle(noodle)?;
            }
            if let Some(combo) = &pick.combo {
                composer.select_combo(combo)?;
            }
            if let Some(drink) = &pick.drink {
                composer.select_drink(drink)?;
            }
            if let Some(spice) = &pick.spice {
                let level = spice
                    .parse::<SpiceLevel>()
                    .map_err(|_| ValidationError::UnknownOption {
                        kind: "spice".to_string(),
                        value: spice.clone(),
                    })?;
                composer.select_spice(level);
            }

            let line = flow.confirm_item()?;
            tracing::debug!("🛒 Added {} ({})", line.item.name, line.line_total());
        }

        Ok(())
    }
}
