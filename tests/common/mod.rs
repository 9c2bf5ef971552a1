#![allow(dead_code)]

use async_trait::async_trait;
use bistro_order::domain::model::{
    CatalogItem, FaqEntry, Member, MemberRegistration, PosStat, Promotion, Reservation,
    ReservationReceipt, ReservationRequest, ReservationStatus,
};
use bistro_order::{OrderBackend, OrderError, Result};
use tokio::sync::Mutex;

/// 記錄所有呼叫的記憶體後端
#[derive(Default)]
pub struct RecordingBackend {
    pub items: Vec<CatalogItem>,
    pub reservations: Vec<Reservation>,
    pub stats: Vec<PosStat>,
    pub members: Mutex<Vec<Member>>,
    /// 依序回應 makeReservation；用完後一律成功
    pub reservation_outcomes: Mutex<Vec<std::result::Result<ReservationReceipt, String>>>,
    pub fail_reads: bool,
    pub fail_status_updates: bool,
    pub submitted: Mutex<Vec<ReservationRequest>>,
    pub registrations: Mutex<Vec<MemberRegistration>>,
    pub status_updates: Mutex<Vec<(String, ReservationStatus)>>,
}

impl RecordingBackend {
    pub fn with_menu() -> Self {
        Self {
            items: sample_menu(),
            ..Default::default()
        }
    }

    fn read_guard(&self) -> Result<()> {
        if self.fail_reads {
            return Err(OrderError::decode("test", "backend offline"));
        }
        Ok(())
    }
}

pub fn sample_menu() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("p1", "青醬雞肉義大利麵", 150, "義大利麵")
            .with_noodle_selection()
            .with_combo(),
        CatalogItem::new("p2", "麻辣牛肉義大利麵", 220, "義大利麵")
            .with_noodle_selection()
            .with_combo()
            .with_tags(&["spicy", "beef"]),
        CatalogItem::new("r1", "野菇燉飯", 180, "義式燉飯").with_combo(),
        CatalogItem::new("f1", "薯條", 80, "炸物/點心"),
        CatalogItem::new("d1", "紅茶", 40, "飲品").as_drink(),
        CatalogItem::new("d2", "檸檬汁", 50, "飲品").as_drink(),
    ]
}

pub fn reservation(id: &str, date: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id: Some(id.to_string()),
        name: "客人".to_string(),
        phone: "0911111111".to_string(),
        date: date.to_string(),
        time: "18:00".to_string(),
        pax: 2,
        items: None,
        status,
        table_id: Some("A1".to_string()),
        total_amount: None,
        created_at: None,
    }
}

#[async_trait]
impl OrderBackend for RecordingBackend {
    async fn restaurant_items(&self) -> Result<Vec<CatalogItem>> {
        self.read_guard()?;
        Ok(self.items.clone())
    }

    async fn promotions(&self) -> Result<Vec<Promotion>> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn faq(&self) -> Result<Vec<FaqEntry>> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn member(&self, line_id: &str) -> Result<Option<Member>> {
        self.read_guard()?;
        let members = self.members.lock().await;
        Ok(members.iter().find(|m| m.line_id == line_id).cloned())
    }

    async fn register_member(&self, registration: &MemberRegistration) -> Result<()> {
        self.registrations.lock().await.push(registration.clone());
        self.read_guard()
    }

    async fn make_reservation(&self, request: &ReservationRequest) -> Result<ReservationReceipt> {
        self.submitted.lock().await.push(request.clone());
        let mut outcomes = self.reservation_outcomes.lock().await;
        if outcomes.is_empty() {
            return Ok(ReservationReceipt {
                reservation_id: "R-1".to_string(),
                table_id: "T1".to_string(),
            });
        }
        outcomes.remove(0).map_err(OrderError::backend)
    }

    async fn member_reservations(&self, phone: &str) -> Result<Vec<Reservation>> {
        self.read_guard()?;
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.phone == phone)
            .cloned()
            .collect())
    }

    async fn reservations(&self) -> Result<Vec<Reservation>> {
        self.read_guard()?;
        Ok(self.reservations.clone())
    }

    async fn stats(&self) -> Result<Vec<PosStat>> {
        self.read_guard()?;
        Ok(self.stats.clone())
    }

    async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<()> {
        self.status_updates
            .lock()
            .await
            .push((id.to_string(), status));
        if self.fail_status_updates {
            return Err(OrderError::backend("sheet locked"));
        }
        Ok(())
    }
}
