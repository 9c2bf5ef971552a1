use crate::domain::model::{PosStat, Reservation, ReservationStatus};
use crate::domain::ports::OrderBackend;
use crate::utils::error::{Result, ValidationError};
use chrono::{NaiveDate, TimeZone};

/// 已在本地套用、等待後端確認的狀態變更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusChange {
    pub reservation_id: String,
    pub previous: ReservationStatus,
    pub requested: ReservationStatus,
}

/// 管理員後台：訂位列表與營收統計
#[derive(Debug, Clone, Default)]
pub struct AdminBoard {
    reservations: Vec<Reservation>,
    stats: Vec<PosStat>,
}

impl AdminBoard {
    pub fn new(reservations: Vec<Reservation>, stats: Vec<PosStat>) -> Self {
        Self {
            reservations,
            stats,
        }
    }

    /// 兩個查詢同時進行，各自失敗時降級為空清單
    pub async fn load(backend: &dyn OrderBackend) -> Self {
        let (reservations, stats) = tokio::join!(backend.reservations(), backend.stats());

        let reservations = reservations.unwrap_or_else(|e| {
            tracing::warn!("⚠️ Failed to load reservations: {}", e);
            Vec::new()
        });
        let stats = stats.unwrap_or_else(|e| {
            tracing::warn!("⚠️ Failed to load POS stats: {}", e);
            Vec::new()
        });

        tracing::info!(
            "📋 Admin board loaded: {} reservations, {} stat days",
            reservations.len(),
            stats.len()
        );
        Self::new(reservations, stats)
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn stats(&self) -> &[PosStat] {
        &self.stats
    }

    pub fn find(&self, id: &str) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
    }

    /// 訂位日期以 `tz` 的日曆日比對
    pub fn todays_count<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> usize {
        self.reservations
            .iter()
            .filter(|r| r.calendar_date(tz) == Some(today))
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Pending)
            .count()
    }

    pub fn total_revenue(&self) -> u64 {
        self.stats.iter().map(|s| s.revenue).sum()
    }

    pub fn total_visitors(&self) -> u64 {
        self.stats.iter().map(|s| s.visitors).sum()
    }

    pub fn revenue_series(&self) -> Vec<(&str, u64)> {
        self.stats
            .iter()
            .map(|s| (s.date.as_str(), s.revenue))
            .collect()
    }

    pub fn visitor_series(&self) -> Vec<(&str, u64)> {
        self.stats
            .iter()
            .map(|s| (s.date.as_str(), s.visitors))
            .collect()
    }

    /// 第一階段：先在本地更新狀態
    pub fn apply_status(
        &mut self,
        id: &str,
        status: ReservationStatus,
    ) -> std::result::Result<PendingStatusChange, ValidationError> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| ValidationError::UnknownReservation { id: id.to_string() })?;

        let previous = reservation.status;
        reservation.status = status;
        Ok(PendingStatusChange {
            reservation_id: id.to_string(),
            previous,
            requested: status,
        })
    }

    /// 第二階段：後端成功則保留，失敗則還原
    pub fn reconcile(&mut self, change: &PendingStatusChange, outcome: &Result<()>) {
        match outcome {
            Ok(()) => {
                tracing::debug!(
                    "✅ Reservation {} is now {}",
                    change.reservation_id,
                    change.requested
                );
            }
            Err(e) => {
                tracing::warn!(
                    "↩️ Rolling back reservation {} to {}: {}",
                    change.reservation_id,
                    change.previous,
                    e
                );
                if let Some(reservation) = self
                    .reservations
                    .iter_mut()
                    .find(|r| r.id.as_deref() == Some(change.reservation_id.as_str()))
                {
                    if reservation.status == change.requested {
                        reservation.status = change.previous;
                    }
                }
            }
        }
    }

    pub async fn change_status(
        &mut self,
        backend: &dyn OrderBackend,
        id: &str,
        status: ReservationStatus,
    ) -> Result<()> {
        let change = self.apply_status(id, status)?;
        let outcome = backend.update_reservation_status(id, status).await;
        self.reconcile(&change, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::OrderError;

    fn reservation(id: &str, date: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: Some(id.to_string()),
            name: "客人".to_string(),
            phone: "0900000000".to_string(),
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

    fn board() -> AdminBoard {
        AdminBoard::new(
            vec![
                reservation("1", "2026-10-20", ReservationStatus::Pending),
                reservation("2", "2026-10-20T10:00:00.000Z", ReservationStatus::Confirmed),
                reservation("3", "2026-10-21", ReservationStatus::Pending),
            ],
            vec![
                PosStat { date: "10/18".to_string(), revenue: 12000, visitors: 40 },
                PosStat { date: "10/19".to_string(), revenue: 8000, visitors: 25 },
            ],
        )
    }

    #[test]
    fn test_counters() {
        let board = board();
        let today = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(board.todays_count(today, &chrono::Utc), 2);
        assert_eq!(board.pending_count(), 2);
        assert_eq!(board.total_revenue(), 20000);
        assert_eq!(board.total_visitors(), 65);
        assert_eq!(board.revenue_series(), vec![("10/18", 12000), ("10/19", 8000)]);
        assert_eq!(board.visitor_series()[1], ("10/19", 25));
    }

    #[test]
    fn test_todays_count_uses_local_calendar_day() {
        let board = AdminBoard::new(
            vec![
                reservation("1", "2026-10-19T16:00:00.000Z", ReservationStatus::Pending),
                reservation("2", "2026-10-20", ReservationStatus::Pending),
                reservation("3", "2026-10-20T16:00:00.000Z", ReservationStatus::Pending),
            ],
            Vec::new(),
        );
        let taipei = chrono::FixedOffset::east_opt(8 * 3600).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(board.todays_count(today, &taipei), 2);
        assert_eq!(board.todays_count(today, &chrono::Utc), 2);
    }

    #[test]
    fn test_apply_then_confirm() {
        let mut board = board();
        let change = board.apply_status("1", ReservationStatus::Confirmed).unwrap();
        assert_eq!(change.previous, ReservationStatus::Pending);
        assert_eq!(board.find("1").unwrap().status, ReservationStatus::Confirmed);

        board.reconcile(&change, &Ok(()));
        assert_eq!(board.find("1").unwrap().status, ReservationStatus::Confirmed);
        assert_eq!(board.pending_count(), 1);
    }

    #[test]
    fn test_failure_rolls_back() {
        let mut board = board();
        let change = board.apply_status("3", ReservationStatus::Cancelled).unwrap();
        board.reconcile(&change, &Err(OrderError::backend("sheet locked")));
        assert_eq!(board.find("3").unwrap().status, ReservationStatus::Pending);
    }

    #[test]
    fn test_unknown_reservation() {
        let mut board = board();
        assert!(matches!(
            board.apply_status("99", ReservationStatus::Completed),
            Err(ValidationError::UnknownReservation { .. })
        ));
    }
}
