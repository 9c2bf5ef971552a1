use crate::domain::model::CartLine;
use crate::utils::error::Result;

/// 預點購物車，加入順序即顯示順序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, line: CartLine) -> &CartLine {
        tracing::debug!(
            "🛒 Adding '{}' ({}) to cart, unit price {}",
            line.item.name,
            line.unique_id,
            line.unit_price()
        );
        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    /// 找不到 id 時不做任何事；回傳是否有刪除
    pub fn remove_line(&mut self, unique_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.unique_id != unique_id);
        let removed = self.lines.len() != before;
        if !removed {
            tracing::debug!("🛒 No cart line with id {}, nothing removed", unique_id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn compute_total(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 訂位時附帶的預點內容 (JSON 陣列字串)
    pub fn to_payload_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.lines)?)
    }
}
