use crate::domain::model::{CatalogItem, FaqEntry, Promotion};
use crate::domain::options::FOOD_CATEGORIES;
use crate::domain::ports::OrderBackend;

/// 讀取型 API 失敗時一律降級成空清單，畫面照常顯示
async fn fetch_or_empty<T, F>(what: &str, fetch: F) -> Vec<T>
where
    F: std::future::Future<Output = crate::utils::error::Result<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => {
            tracing::debug!("📥 Loaded {} {}", items.len(), what);
            items
        }
        Err(e) => {
            tracing::warn!("⚠️ Failed to load {}, showing an empty list: {}", what, e);
            Vec::new()
        }
    }
}

pub async fn load_promotions(backend: &dyn OrderBackend) -> Vec<Promotion> {
    fetch_or_empty("promotions", backend.promotions()).await
}

pub async fn load_faq(backend: &dyn OrderBackend) -> Vec<FaqEntry> {
    fetch_or_empty("faq entries", backend.faq()).await
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub async fn load(backend: &dyn OrderBackend) -> Self {
        Self::new(fetch_or_empty("menu items", backend.restaurant_items()).await)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn categories(&self) -> &'static [&'static str] {
        &FOOD_CATEGORIES
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 依名稱找品項，給文字介面使用
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.id == name || item.name == name)
    }

    pub fn drinks(&self) -> Vec<CatalogItem> {
        self.items.iter().filter(|item| item.is_drink).cloned().collect()
    }

    /// 分類欄位可能包含多個分類或附註，所以用包含比對
    pub fn by_category(&self, category: &str) -> Vec<&CatalogItem> {
        if category.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| !item.category.is_empty() && item.category.contains(category))
            .collect()
    }
}
