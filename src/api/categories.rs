use reqwest::Method;
use serde_json::Value;

use super::{AdminApi, ListQuery};
use crate::error::Result;
use crate::forms::{CategoryForm, SubCategoryForm};
use crate::models::{Category, CategoryAnalytics, CategoryType};
use crate::pagination::{Page, PageQuery};

/// Parent pickers load up to this many categories of one type.
pub const PARENT_PICKER_LIMIT: usize = 100;

impl AdminApi {
    pub async fn list_categories(
        &self,
        page: PageQuery,
        search: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> Result<Page<Category>> {
        let mut query = ListQuery::page(page);
        if let Some(search) = search {
            query = query.search(search);
        }
        if let Some(category_type) = category_type {
            query = query.kind(category_type.as_str());
        }
        self.get_page("/categories", &query).await
    }

    /// Candidate parents for a category form of the given type.
    pub async fn parent_candidates(&self, category_type: CategoryType) -> Result<Vec<Category>> {
        let page = PageQuery {
            limit: PARENT_PICKER_LIMIT,
            offset: 0,
        };
        Ok(self
            .list_categories(page, None, Some(category_type))
            .await?
            .data)
    }

    pub async fn create_category(&self, form: CategoryForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/categories", body).await
    }

    pub async fn create_subcategory(&self, form: SubCategoryForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/categories", body).await
    }

    /// Updates go through POST so the multipart image survives PHP-style backends.
    pub async fn update_category(&self, id: u64, form: CategoryForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, &format!("/categories/{}", id), body)
            .await
    }

    pub async fn delete_category(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/categories/{}", id)).await
    }

    pub async fn category_analytics(&self, page: PageQuery) -> Result<Page<CategoryAnalytics>> {
        self.get_page("/categories/analytics", &ListQuery::page(page))
            .await
    }
}
