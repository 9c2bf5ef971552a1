use crate::domain::options::{is_time_slot, DEFAULT_PAX, MAX_PAX, MIN_PAX};
use crate::utils::error::ValidationError;
use chrono::{Datelike, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "週一",
        Weekday::Tue => "週二",
        Weekday::Wed => "週三",
        Weekday::Thu => "週四",
        Weekday::Fri => "週五",
        Weekday::Sat => "週六",
        Weekday::Sun => "週日",
    }
}

/// 接受 `Mon`、`monday` 或 `週一`
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    let value = value.trim();
    value.parse::<Weekday>().ok().or_else(|| {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .find(|w| weekday_label(*w) == value)
    })
}

/// 填寫完成的訂位資訊
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInfo {
    pub date: NaiveDate,
    pub time: String,
    pub pax: u8,
    pub name: String,
    pub phone: String,
}

/// 訂位第一步的表單狀態
#[derive(Debug, Clone)]
pub struct BookingForm {
    date: Option<NaiveDate>,
    time: Option<String>,
    pax: u8,
    name: String,
    phone: String,
    closed_weekday: Weekday,
    error: Option<ValidationError>,
}

impl BookingForm {
    pub fn new(closed_weekday: Weekday) -> Self {
        Self {
            date: None,
            time: None,
            pax: DEFAULT_PAX,
            name: String::new(),
            phone: String::new(),
            closed_weekday,
            error: None,
        }
    }

    /// 會員資料帶入姓名與電話
    pub fn prefilled(closed_weekday: Weekday, name: &str, phone: &str) -> Self {
        let mut form = Self::new(closed_weekday);
        form.set_name(name);
        form.set_phone(phone);
        form
    }

    /// 公休日或格式錯誤時清空日期並記錄錯誤；過去的日期不在這裡擋
    pub fn set_date(&mut self, input: &str) -> Result<NaiveDate, ValidationError> {
        let parsed = match NaiveDate::parse_from_str(input.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                return self.reject_date(ValidationError::InvalidDate {
                    value: input.to_string(),
                })
            }
        };

        if parsed.weekday() == self.closed_weekday {
            return self.reject_date(ValidationError::ClosedOnDate {
                date: parsed.format(DATE_FORMAT).to_string(),
                weekday: weekday_label(self.closed_weekday).to_string(),
            });
        }

        self.date = Some(parsed);
        self.error = None;
        Ok(parsed)
    }

    fn reject_date(&mut self, err: ValidationError) -> Result<NaiveDate, ValidationError> {
        tracing::debug!("📅 Date rejected: {}", err);
        self.date = None;
        self.error = Some(err.clone());
        Err(err)
    }

    pub fn set_time(&mut self, slot: &str) -> Result<(), ValidationError> {
        let slot = slot.trim();
        if !is_time_slot(slot) {
            let err = ValidationError::InvalidTimeSlot {
                value: slot.to_string(),
            };
            self.error = Some(err.clone());
            return Err(err);
        }
        self.time = Some(slot.to_string());
        Ok(())
    }

    pub fn increment_pax(&mut self) -> u8 {
        self.pax = (self.pax + 1).min(MAX_PAX);
        self.pax
    }

    pub fn decrement_pax(&mut self) -> u8 {
        self.pax = self.pax.saturating_sub(1).max(MIN_PAX);
        self.pax
    }

    pub fn set_pax(&mut self, pax: u8) -> u8 {
        self.pax = pax.clamp(MIN_PAX, MAX_PAX);
        self.pax
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = phone.trim().to_string();
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn pax(&self) -> u8 {
        self.pax
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn closed_weekday(&self) -> Weekday {
        self.closed_weekday
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// 五個欄位都齊全才能進入點餐
    pub fn validate(&mut self) -> Result<BookingInfo, ValidationError> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date".to_string());
        }
        if self.time.is_none() {
            missing.push("time".to_string());
        }
        if self.name.is_empty() {
            missing.push("name".to_string());
        }
        if self.phone.is_empty() {
            missing.push("phone".to_string());
        }

        match (self.date, self.time.as_ref()) {
            (Some(date), Some(time)) if missing.is_empty() => {
                self.error = None;
                Ok(BookingInfo {
                    date,
                    time: time.clone(),
                    pax: self.pax,
                    name: self.name.clone(),
                    phone: self.phone.clone(),
                })
            }
            _ => {
                let err = ValidationError::IncompleteBooking { missing };
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}
