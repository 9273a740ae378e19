use serde_json::Value;

use super::{AdminApi, ListQuery};
use crate::error::Result;
use crate::models::{Shop, ShopType};
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_shops(
        &self,
        page: PageQuery,
        search: &str,
        shop_type: Option<ShopType>,
    ) -> Result<Page<Shop>> {
        let mut query = ListQuery::page(page).search(search);
        if let Some(shop_type) = shop_type {
            query = query.kind(shop_type.as_str());
        }
        self.get_page("/shops", &query).await
    }

    pub async fn delete_shop(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/shops/{}", id)).await
    }
}
