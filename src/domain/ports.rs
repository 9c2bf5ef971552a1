use crate::domain::model::{
    CatalogItem, FaqEntry, Member, MemberRegistration, PosStat, Promotion, Reservation,
    ReservationReceipt, ReservationRequest, ReservationStatus,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Weekday;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn admin_phones(&self) -> &[String];
    fn closed_weekday(&self) -> Weekday;
}

/// 試算表後端：菜單來源與訂位服務
///
/// 每個方法回傳已解析的型別；後端明確拒絕時為 `OrderError::BackendRejection`。
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn restaurant_items(&self) -> Result<Vec<CatalogItem>>;
    async fn promotions(&self) -> Result<Vec<Promotion>>;
    async fn faq(&self) -> Result<Vec<FaqEntry>>;
    async fn member(&self, line_id: &str) -> Result<Option<Member>>;
    async fn register_member(&self, registration: &MemberRegistration) -> Result<()>;
    async fn make_reservation(&self, request: &ReservationRequest) -> Result<ReservationReceipt>;
    async fn member_reservations(&self, phone: &str) -> Result<Vec<Reservation>>;
    async fn reservations(&self) -> Result<Vec<Reservation>>;
    async fn stats(&self) -> Result<Vec<PosStat>>;
    async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<()>;
}
