use crate::core::booking::BookingForm;
use crate::core::catalog::Catalog;
use crate::core::reservation_flow::ReservationFlow;
use crate::domain::model::{Member, MemberRegistration, Reservation};
use crate::domain::ports::{OrderBackend, Storage};
use crate::utils::error::{OrderError, Result, ValidationError};
use chrono::Weekday;

pub const MEMBER_FILE: &str = "member.json";

/// 目前登入的會員；取代全域狀態，由呼叫端持有並傳入各流程
pub struct MemberSession<S: Storage> {
    storage: S,
    member: Option<Member>,
}

impl<S: Storage> MemberSession<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            member: None,
        }
    }

    /// 讀取上次保存的會員；檔案不存在或格式錯誤都視為未登入
    pub async fn restore(storage: S) -> Result<Self> {
        let member = match storage.read_file(MEMBER_FILE).await {
            Ok(bytes) => match serde_json::from_slice::<Member>(&bytes) {
                Ok(member) => Some(member),
                Err(e) => {
                    tracing::warn!("⚠️ Ignoring unreadable saved member: {}", e);
                    None
                }
            },
            Err(OrderError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        if let Some(member) = &member {
            tracing::debug!("👤 Restored member {} ({})", member.name, member.phone);
        }
        Ok(Self { storage, member })
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.member.as_ref().map(|m| m.is_admin).unwrap_or(false)
    }

    pub fn require_member(&self) -> std::result::Result<&Member, ValidationError> {
        self.member.as_ref().ok_or(ValidationError::MembershipRequired)
    }

    pub fn require_admin(&self) -> std::result::Result<&Member, ValidationError> {
        let member = self.require_member()?;
        if !member.is_admin {
            return Err(ValidationError::AdminRequired);
        }
        Ok(member)
    }

    /// 先寫入儲存區，成功後才更新記憶體中的會員
    async fn persist(&mut self, member: Option<Member>) -> Result<()> {
        match &member {
            Some(member) => {
                let data = serde_json::to_vec_pretty(member)?;
                self.storage.write_file(MEMBER_FILE, &data).await?;
            }
            None => self.storage.remove_file(MEMBER_FILE).await?,
        }
        self.member = member;
        Ok(())
    }

    /// 以電話登入或註冊；本地立即生效，後端同步失敗只記錄警告
    pub async fn login(
        &mut self,
        phone: &str,
        name: &str,
        admin_phones: &[String],
        backend: &dyn OrderBackend,
    ) -> Result<&Member> {
        let phone = phone.trim();
        let name = name.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name".to_string());
        }
        if phone.is_empty() {
            missing.push("phone".to_string());
        }
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteLogin { missing }.into());
        }

        let member = Member {
            id: String::new(),
            line_id: format!("phone:{}", phone),
            name: name.to_string(),
            phone: phone.to_string(),
            points: 0,
            is_admin: admin_phones.iter().any(|p| p == phone),
        };
        let registration = MemberRegistration {
            line_id: member.line_id.clone(),
            name: member.name.clone(),
            phone: member.phone.clone(),
        };

        self.persist(Some(member)).await?;
        tracing::info!("👤 Logged in as {} ({})", name, phone);

        if let Err(e) = backend.register_member(&registration).await {
            tracing::warn!("⚠️ Member sync failed, continuing with local profile: {}", e);
        }

        self.require_member().map_err(OrderError::from)
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.persist(None).await
    }

    /// 從後端更新積分，失敗時沿用本地資料
    pub async fn refresh(&mut self, backend: &dyn OrderBackend) -> Result<Option<&Member>> {
        let Some(mut local) = self.member.clone() else {
            return Ok(None);
        };

        match backend.member(&local.line_id).await {
            Ok(Some(remote)) => {
                if !remote.id.is_empty() {
                    local.id = remote.id;
                }
                local.points = remote.points;
                self.persist(Some(local)).await?;
            }
            Ok(None) => {
                tracing::debug!("👤 Member {} not registered on the backend yet", local.phone);
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to refresh member profile: {}", e);
            }
        }
        Ok(self.member.as_ref())
    }

    pub async fn bookings(&self, backend: &dyn OrderBackend) -> Vec<Reservation> {
        let Some(member) = &self.member else {
            return Vec::new();
        };
        match backend.member_reservations(&member.phone).await {
            Ok(bookings) => bookings,
            Err(e) => {
                tracing::warn!("⚠️ Failed to load bookings for {}: {}", member.phone, e);
                Vec::new()
            }
        }
    }

    /// 線上訂位限會員使用，姓名電話由會員資料帶入
    pub fn start_reservation(
        &self,
        catalog: Catalog,
        closed_weekday: Weekday,
    ) -> std::result::Result<ReservationFlow, ValidationError> {
        let member = self.require_member()?;
        let form = BookingForm::prefilled(closed_weekday, &member.name, &member.phone);
        Ok(ReservationFlow::new(form, catalog))
    }
}
