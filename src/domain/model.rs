use crate::domain::serde_helpers::{
    lenient_bool, lenient_option_string, lenient_option_u64, lenient_string, lenient_tags,
    lenient_u32, lenient_u64,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 菜單品項，載入後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub price: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "lenient_tags",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_noodle_selection: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub allow_combo: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_drink: bool,
    #[serde(
        default,
        deserialize_with = "lenient_option_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_option_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u32, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            tags: Vec::new(),
            has_noodle_selection: false,
            allow_combo: false,
            is_drink: false,
            description: None,
            image: None,
        }
    }

    pub fn with_noodle_selection(mut self) -> Self {
        self.has_noodle_selection = true;
        self
    }

    pub fn with_combo(mut self) -> Self {
        self.allow_combo = true;
        self
    }

    pub fn as_drink(mut self) -> Self {
        self.is_drink = true;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_spicy(&self) -> bool {
        self.has_tag("spicy")
    }

    pub fn is_beef(&self) -> bool {
        self.has_tag("beef")
    }

    pub fn is_vegetarian(&self) -> bool {
        self.category.contains('素') || self.has_tag("vegetarian")
    }
}

/// 購物車中的一筆點餐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub unique_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_noodle: Option<String>,
    #[serde(default)]
    pub noodle_price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_combo: Option<String>,
    #[serde(default)]
    pub combo_price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_drink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartLine {
    pub fn unit_price(&self) -> u64 {
        u64::from(self.item.price) + u64::from(self.noodle_price) + u64::from(self.combo_price)
    }

    pub fn line_total(&self) -> u64 {
        self.unit_price() * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(format!("unknown reservation status '{}'", other)),
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<ReservationStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(ReservationStatus::default());
    }
    raw.parse().map_err(serde::de::Error::custom)
}

/// 後端回傳的訂位紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pax: u32,
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub items: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: ReservationStatus,
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub table_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_option_u64")]
    pub total_amount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub created_at: Option<String>,
}

impl Reservation {
    /// 試算表的日期儲存格會以 UTC 時間戳回傳（當地午夜），需換回指定時區才是訂位日期
    pub fn calendar_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(tz).date_naive());
        }
        raw.get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
    }

    /// 以本地時區顯示的日期；無法解析時原樣回傳
    pub fn date_key(&self) -> String {
        self.calendar_date(&Local)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    /// 解析預點內容；格式不符時回傳空清單
    pub fn pre_ordered_lines(&self) -> Vec<CartLine> {
        self.items
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub line_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub points: u64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRegistration {
    pub line_id: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub valid_until: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: String,
}

/// POS 每日營收
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosStat {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub revenue: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub visitors: u64,
}

/// 送往 `makeReservation` 的內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub pax: u8,
    pub items: String,
    pub total_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    pub reservation_id: String,
    pub table_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_from_sheet_row() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "麻辣牛肉麵",
            "price": "220",
            "category": "義大利麵",
            "tags": "spicy,beef",
            "hasNoodleSelection": "TRUE",
            "allowCombo": true,
            "isDrink": ""
        }))
        .unwrap();

        assert_eq!(item.id, "7");
        assert_eq!(item.price, 220);
        assert!(item.has_noodle_selection);
        assert!(item.allow_combo);
        assert!(!item.is_drink);
        assert!(item.is_spicy());
        assert!(item.is_beef());
        assert!(!item.is_vegetarian());
    }

    #[test]
    fn test_vegetarian_from_category() {
        let item = CatalogItem::new("v1", "野菇燉飯", 200, "義式燉飯(素)");
        assert!(item.is_vegetarian());
    }

    #[test]
    fn test_cart_line_serializes_flat_camel_case() {
        let line = CartLine {
            item: CatalogItem::new("p1", "青醬雞肉", 150, "義大利麵").with_noodle_selection(),
            unique_id: "u-1".to_string(),
            quantity: 2,
            selected_noodle: Some("天使細麵".to_string()),
            noodle_price: 10,
            selected_combo: None,
            combo_price: 0,
            selected_drink: None,
            note: Some("不辣".to_string()),
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["uniqueId"], "u-1");
        assert_eq!(value["hasNoodleSelection"], true);
        assert_eq!(value["noodlePrice"], 10);
        assert!(value.get("selectedCombo").is_none());
        assert_eq!(line.unit_price(), 160);
        assert_eq!(line.line_total(), 320);
    }

    #[test]
    fn test_reservation_decoding_and_calendar_date() {
        let reservation: Reservation = serde_json::from_value(serde_json::json!({
            "id": 1001,
            "name": "王小明",
            "phone": "0912345678",
            "date": "2026-10-20T16:00:00.000Z",
            "time": "18:00",
            "pax": "4",
            "status": "Confirmed",
            "tableId": "A3",
            "totalAmount": 580
        }))
        .unwrap();

        assert_eq!(reservation.id.as_deref(), Some("1001"));
        let taipei = chrono::FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            reservation.calendar_date(&taipei),
            NaiveDate::from_ymd_opt(2026, 10, 21)
        );
        assert_eq!(
            reservation.calendar_date(&chrono::Utc),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );
        assert_eq!(reservation.pax, 4);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.total_amount, Some(580));
        assert!(reservation.pre_ordered_lines().is_empty());
    }

    #[test]
    fn test_local_midnight_timestamp_maps_to_booked_day() {
        let mut reservation: Reservation = serde_json::from_value(serde_json::json!({
            "date": "2026-10-19T16:00:00.000Z"
        }))
        .unwrap();
        let taipei = chrono::FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            reservation.calendar_date(&taipei),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );

        reservation.date = "2026-10-20".to_string();
        assert_eq!(
            reservation.calendar_date(&taipei),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );
        assert_eq!(reservation.date_key(), "2026-10-20");

        reservation.date = "下週".to_string();
        assert_eq!(reservation.calendar_date(&taipei), None);
        assert_eq!(reservation.date_key(), "下週");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("cancelled".parse::<ReservationStatus>(), Ok(ReservationStatus::Cancelled));
        assert!("lost".parse::<ReservationStatus>().is_err());
    }
}
