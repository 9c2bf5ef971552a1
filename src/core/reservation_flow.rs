use crate::core::booking::{BookingForm, BookingInfo, DATE_FORMAT};
use crate::core::cart::Cart;
use crate::core::catalog::Catalog;
use crate::core::composer::OrderComposer;
use crate::domain::model::{CartLine, CatalogItem, ReservationReceipt, ReservationRequest};
use crate::domain::options::FOOD_CATEGORIES;
use crate::domain::ports::OrderBackend;
use crate::utils::error::{OrderError, Result, ValidationError};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    CollectingInfo,
    ComposingOrder,
    Submitting,
    Submitted(ReservationReceipt),
    /// 送出失敗，可以繼續修改再送
    Failed { message: String },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::CollectingInfo => "collecting info",
            FlowState::ComposingOrder => "composing order",
            FlowState::Submitting => "submitting",
            FlowState::Submitted(_) => "submitted",
            FlowState::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一次訂位流程：填寫資訊、預先點餐、送出
///
/// 購物車只屬於這個流程；成功送出後清空並結束。
pub struct ReservationFlow {
    form: BookingForm,
    booking: Option<BookingInfo>,
    catalog: Catalog,
    drinks: Vec<CatalogItem>,
    active_category: String,
    composer: Option<OrderComposer>,
    cart: Cart,
    state: FlowState,
    request_token: String,
}

impl ReservationFlow {
    pub fn new(form: BookingForm, catalog: Catalog) -> Self {
        let drinks = catalog.drinks();
        Self {
            form,
            booking: None,
            catalog,
            drinks,
            active_category: FOOD_CATEGORIES[0].to_string(),
            composer: None,
            cart: Cart::new(),
            state: FlowState::CollectingInfo,
            request_token: Uuid::new_v4().to_string(),
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> Result<&mut BookingForm> {
        if self.state != FlowState::CollectingInfo {
            return Err(self.invalid_state("edit booking info"));
        }
        Ok(&mut self.form)
    }

    pub fn booking(&self) -> Option<&BookingInfo> {
        self.booking.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> u64 {
        self.cart.compute_total()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 最近一次的錯誤訊息（送出失敗或表單驗證）
    pub fn last_error(&self) -> Option<String> {
        match &self.state {
            FlowState::Failed { message } => Some(message.clone()),
            _ => self.form.error().map(|e| e.to_string()),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FlowState::Submitting
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, FlowState::Submitted(_))
    }

    pub fn receipt(&self) -> Option<&ReservationReceipt> {
        match &self.state {
            FlowState::Submitted(receipt) => Some(receipt),
            _ => None,
        }
    }

    fn invalid_state(&self, action: &str) -> OrderError {
        if self.state == FlowState::Submitting {
            return ValidationError::SubmissionInFlight.into();
        }
        ValidationError::InvalidState {
            action: action.to_string(),
            state: self.state.name().to_string(),
        }
        .into()
    }

    /// 點餐階段的動作；失敗狀態視同點餐中
    fn ensure_ordering(&mut self, action: &str) -> Result<()> {
        match self.state {
            FlowState::ComposingOrder => Ok(()),
            FlowState::Failed { .. } => {
                self.state = FlowState::ComposingOrder;
                Ok(())
            }
            _ => Err(self.invalid_state(action)),
        }
    }

    pub fn proceed_to_order(&mut self) -> Result<&BookingInfo> {
        if self.state != FlowState::CollectingInfo {
            return Err(self.invalid_state("proceed to ordering"));
        }
        let info = self.form.validate()?;
        tracing::debug!(
            "📝 Booking info complete: {} {} for {}",
            info.date,
            info.time,
            info.pax
        );
        self.state = FlowState::ComposingOrder;
        Ok(self.booking.insert(info))
    }

    /// 回到第一步修改資訊，購物車保留
    pub fn back_to_info(&mut self) -> Result<()> {
        self.ensure_ordering("go back to booking info")?;
        self.composer = None;
        self.booking = None;
        self.state = FlowState::CollectingInfo;
        Ok(())
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn select_category(&mut self, category: &str) {
        self.active_category = category.to_string();
    }

    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        self.catalog.by_category(&self.active_category)
    }

    pub fn open_item(&mut self, item_id: &str) -> Result<&mut OrderComposer> {
        self.ensure_ordering("open a menu item")?;
        let item = self
            .catalog
            .find(item_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownItem {
                id: item_id.to_string(),
            })?;
        Ok(self.composer.insert(OrderComposer::open(item, &self.drinks)))
    }

    pub fn composer(&self) -> Option<&OrderComposer> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut OrderComposer> {
        self.composer.as_mut()
    }

    pub fn close_item(&mut self) {
        self.composer = None;
    }

    /// 驗證失敗時品項視窗保持開啟，購物車不變
    pub fn confirm_item(&mut self) -> Result<&CartLine> {
        self.ensure_ordering("add to cart")?;
        let composer = self.composer.as_ref().ok_or(ValidationError::NoItemOpen)?;
        let line = composer.commit()?;
        self.composer = None;
        Ok(self.cart.add_line(line))
    }

    pub fn remove_line(&mut self, unique_id: &str) -> Result<bool> {
        self.ensure_ordering("remove a cart line")?;
        Ok(self.cart.remove_line(unique_id))
    }

    /// 放棄預點內容
    pub fn clear_cart(&mut self) -> Result<()> {
        self.ensure_ordering("clear the cart")?;
        self.cart.clear();
        Ok(())
    }

    /// 進入送出中狀態並產生送出內容；送出中再次呼叫會被拒絕
    pub fn begin_submission(&mut self) -> Result<ReservationRequest> {
        if self.state == FlowState::Submitting {
            return Err(ValidationError::SubmissionInFlight.into());
        }
        self.ensure_ordering("submit the reservation")?;

        let booking = self.booking.as_ref().ok_or_else(|| ValidationError::InvalidState {
            action: "submit the reservation".to_string(),
            state: self.state.name().to_string(),
        })?;

        let request = ReservationRequest {
            name: booking.name.clone(),
            phone: booking.phone.clone(),
            date: booking.date.format(DATE_FORMAT).to_string(),
            time: booking.time.clone(),
            pax: booking.pax,
            items: self.cart.to_payload_json()?,
            total_amount: self.cart.compute_total(),
            request_token: Some(self.request_token.clone()),
        };

        self.state = FlowState::Submitting;
        Ok(request)
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<ReservationReceipt>,
    ) -> Result<ReservationReceipt> {
        if self.state != FlowState::Submitting {
            return Err(ValidationError::InvalidState {
                action: "complete the submission".to_string(),
                state: self.state.name().to_string(),
            }
            .into());
        }

        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Reservation {} confirmed, table {}",
                    receipt.reservation_id,
                    receipt.table_id
                );
                self.cart.clear();
                self.state = FlowState::Submitted(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("❌ Reservation submission failed: {}", e);
                self.state = FlowState::Failed {
                    message: e.user_friendly_message(),
                };
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self, backend: &dyn OrderBackend) -> Result<ReservationReceipt> {
        let request = self.begin_submission()?;
        tracing::info!(
            "📤 Submitting reservation for {} on {} {} ({} pax, {} items, total {})",
            request.name,
            request.date,
            request.time,
            request.pax,
            self.cart.len(),
            request.total_amount
        );
        let outcome = backend.make_reservation(&request).await;
        self.complete_submission(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("p1", "青醬雞肉", 150, "義大利麵")
                .with_noodle_selection()
                .with_combo(),
            CatalogItem::new("d1", "Iced Tea", 50, "飲品").as_drink(),
        ])
    }

    fn flow_at_ordering() -> ReservationFlow {
        let form = BookingForm::prefilled(Weekday::Mon, "王小明", "0912345678");
        let mut flow = ReservationFlow::new(form, catalog());
        {
            let form = flow.form_mut().unwrap();
            form.set_date("2026-10-20").unwrap();
            form.set_time("18:00").unwrap();
        }
        flow.proceed_to_order().unwrap();
        flow
    }

    fn receipt() -> ReservationReceipt {
        ReservationReceipt {
            reservation_id: "R-1".to_string(),
            table_id: "A1".to_string(),
        }
    }

    #[test]
    fn test_incomplete_info_stays_collecting() {
        let mut flow = ReservationFlow::new(BookingForm::new(Weekday::Mon), catalog());
        let result = flow.proceed_to_order();
        assert!(matches!(
            result,
            Err(OrderError::Validation(ValidationError::IncompleteBooking { .. }))
        ));
        assert_eq!(flow.state(), &FlowState::CollectingInfo);
        assert!(flow.last_error().is_some());
    }

    #[test]
    fn test_ordering_requires_info_step() {
        let mut flow = ReservationFlow::new(BookingForm::new(Weekday::Mon), catalog());
        assert!(flow.open_item("p1").is_err());
        assert!(flow.begin_submission().is_err());
    }

    #[test]
    fn test_drink_required_keeps_composer_open() {
        let mut flow = flow_at_ordering();
        flow.open_item("p1").unwrap().select_combo("A").unwrap();

        let result = flow.confirm_item();
        assert!(matches!(
            result,
            Err(OrderError::Validation(ValidationError::DrinkRequired))
        ));
        assert!(flow.composer().is_some());
        assert!(flow.cart().is_empty());
    }

    #[test]
    fn test_confirm_item_appends_and_closes() {
        let mut flow = flow_at_ordering();
        {
            let composer = flow.open_item("p1").unwrap();
            composer.select_noodle("天使細麵").unwrap();
            composer.select_combo("B").unwrap();
            composer.select_drink("Iced Tea").unwrap();
        }
        let line = flow.confirm_item().unwrap();
        assert_eq!(line.unit_price(), 290);
        assert!(flow.composer().is_none());
        assert_eq!(flow.total(), 290);
    }

    #[test]
    fn test_confirm_without_open_item() {
        let mut flow = flow_at_ordering();
        assert!(matches!(
            flow.confirm_item(),
            Err(OrderError::Validation(ValidationError::NoItemOpen))
        ));
    }

    #[test]
    fn test_double_submit_is_rejected_while_in_flight() {
        let mut flow = flow_at_ordering();
        let request = flow.begin_submission().unwrap();
        assert_eq!(request.items, "[]");
        assert_eq!(request.total_amount, 0);
        assert!(flow.is_submitting());

        assert!(matches!(
            flow.begin_submission(),
            Err(OrderError::Validation(ValidationError::SubmissionInFlight))
        ));
        assert!(matches!(
            flow.open_item("p1"),
            Err(OrderError::Validation(ValidationError::SubmissionInFlight))
        ));
    }

    #[test]
    fn test_failure_preserves_cart_and_allows_retry() {
        let mut flow = flow_at_ordering();
        flow.open_item("p1").unwrap();
        flow.confirm_item().unwrap();
        let first = flow.begin_submission().unwrap();

        let result = flow.complete_submission(Err(OrderError::backend("沒有空桌")));
        assert!(result.is_err());
        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                message: "訂位失敗: 沒有空桌".to_string()
            }
        );
        assert_eq!(flow.cart().len(), 1);
        assert_eq!(flow.form().name(), "王小明");

        let retry = flow.begin_submission().unwrap();
        assert_eq!(retry.request_token, first.request_token);
        assert_eq!(retry.items, first.items);
    }

    #[test]
    fn test_success_clears_cart_and_finishes() {
        let mut flow = flow_at_ordering();
        flow.open_item("p1").unwrap();
        flow.confirm_item().unwrap();
        flow.begin_submission().unwrap();

        let got = flow.complete_submission(Ok(receipt())).unwrap();
        assert_eq!(got, receipt());
        assert!(flow.is_finished());
        assert!(flow.cart().is_empty());
        assert_eq!(flow.total(), 0);
        assert!(flow.open_item("p1").is_err());
        assert!(flow.begin_submission().is_err());
    }

    #[test]
    fn test_back_to_info_keeps_cart() {
        let mut flow = flow_at_ordering();
        flow.open_item("p1").unwrap();
        flow.confirm_item().unwrap();
        flow.back_to_info().unwrap();

        assert_eq!(flow.state(), &FlowState::CollectingInfo);
        assert_eq!(flow.cart().len(), 1);
        flow.form_mut().unwrap().increment_pax();
        let info = flow.proceed_to_order().unwrap();
        assert_eq!(info.pax, 3);
    }

    #[test]
    fn test_category_filter() {
        let mut flow = flow_at_ordering();
        assert_eq!(flow.visible_items().len(), 1);
        flow.select_category("飲品");
        assert_eq!(flow.visible_items()[0].id, "d1");
    }
}
