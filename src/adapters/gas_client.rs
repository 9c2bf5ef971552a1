use crate::domain::model::{
    CatalogItem, FaqEntry, Member, MemberRegistration, PosStat, Promotion, Reservation,
    ReservationReceipt, ReservationRequest, ReservationStatus,
};
use crate::domain::ports::OrderBackend;
use crate::domain::serde_helpers::{lenient_bool, value_to_string};
use crate::utils::error::{OrderError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// 試算表 API 的共用回應格式
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEnvelope {
    #[serde(default, deserialize_with = "lenient_bool")]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    reservation_id: Option<Value>,
    #[serde(default)]
    table_id: Option<Value>,
}

impl ApiEnvelope {
    /// `success: false` 轉成後端拒絕
    fn accepted(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        let message = self
            .error
            .as_ref()
            .map(value_to_string)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        Err(OrderError::backend(message))
    }

    /// 逐列解析，無法解析的列略過
    fn rows<T: DeserializeOwned>(self, action: &str) -> Result<Vec<T>> {
        let rows = match self.accepted()?.data {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                return Err(OrderError::decode(
                    action,
                    format!("expected a list, got {}", type_name(&other)),
                ))
            }
        };

        let total = rows.len();
        let parsed: Vec<T> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("⚠️ {}: skipping row {}: {}", action, index, e);
                    None
                }
            })
            .collect();

        tracing::debug!("📥 {}: decoded {}/{} rows", action, parsed.len(), total);
        Ok(parsed)
    }

    fn record<T: DeserializeOwned>(self, action: &str) -> Result<Option<T>> {
        match self.accepted()?.data {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| OrderError::decode(action, e.to_string())),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `GET <endpoint>?action=...` 形式的試算表後端
#[derive(Debug, Clone)]
pub struct GasClient {
    client: Client,
    endpoint: String,
}

impl GasClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// 逾時交給 HTTP 層；未設定時不限制
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, action: &str, params: &[(&str, String)]) -> Result<ApiEnvelope> {
        tracing::debug!("📡 Calling {} on {}", action, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", action)])
            .query(params)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("📡 {} response status: {}", action, response.status());

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OrderError::decode(action, e.to_string()))
    }
}

#[async_trait]
impl OrderBackend for GasClient {
    async fn restaurant_items(&self) -> Result<Vec<CatalogItem>> {
        const ACTION: &str = "getRestaurantItems";
        self.call(ACTION, &[]).await?.rows(ACTION)
    }

    async fn promotions(&self) -> Result<Vec<Promotion>> {
        const ACTION: &str = "getPromotions";
        self.call(ACTION, &[]).await?.rows(ACTION)
    }

    async fn faq(&self) -> Result<Vec<FaqEntry>> {
        const ACTION: &str = "getFAQ";
        self.call(ACTION, &[]).await?.rows(ACTION)
    }

    async fn member(&self, line_id: &str) -> Result<Option<Member>> {
        const ACTION: &str = "getMember";
        self.call(ACTION, &[("lineId", line_id.to_string())])
            .await?
            .record(ACTION)
    }

    async fn register_member(&self, registration: &MemberRegistration) -> Result<()> {
        const ACTION: &str = "registerMember";
        let data = serde_json::to_string(registration)?;
        self.call(ACTION, &[("data", data)]).await?.accepted()?;
        Ok(())
    }

    async fn make_reservation(&self, request: &ReservationRequest) -> Result<ReservationReceipt> {
        const ACTION: &str = "makeReservation";
        let data = serde_json::to_string(request)?;
        let envelope = self.call(ACTION, &[("data", data)]).await?.accepted()?;

        let reservation_id = envelope
            .reservation_id
            .as_ref()
            .map(value_to_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| OrderError::decode(ACTION, "missing reservationId"))?;
        let table_id = envelope
            .table_id
            .as_ref()
            .map(value_to_string)
            .unwrap_or_default();

        Ok(ReservationReceipt {
            reservation_id,
            table_id,
        })
    }

    async fn member_reservations(&self, phone: &str) -> Result<Vec<Reservation>> {
        const ACTION: &str = "getMemberReservations";
        self.call(ACTION, &[("phone", phone.to_string())])
            .await?
            .rows(ACTION)
    }

    async fn reservations(&self) -> Result<Vec<Reservation>> {
        const ACTION: &str = "getReservations";
        self.call(ACTION, &[]).await?.rows(ACTION)
    }

    async fn stats(&self) -> Result<Vec<PosStat>> {
        const ACTION: &str = "getStats";
        self.call(ACTION, &[]).await?.rows(ACTION)
    }

    async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<()> {
        const ACTION: &str = "updateReservationStatus";
        self.call(
            ACTION,
            &[("id", id.to_string()), ("status", status.as_str().to_string())],
        )
        .await?
        .accepted()?;
        Ok(())
    }
}
