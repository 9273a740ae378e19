use reqwest::Method;
use serde_json::{json, Value};

use super::{AdminApi, ListQuery};
use crate::error::Result;
use crate::forms::FaqForm;
use crate::models::{Faq, FaqStatus};
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_faqs(
        &self,
        page: PageQuery,
        faq_type: &str,
        search: &str,
    ) -> Result<Page<Faq>> {
        let query = ListQuery::page(page).kind(faq_type).search(search);
        self.get_page("/faqs", &query).await
    }

    pub async fn create_faq(&self, form: FaqForm) -> Result<Value> {
        let body = form.into_json()?;
        self.send_json(Method::POST, "/faqs", &body).await
    }

    pub async fn update_faq(&self, id: &str, form: FaqForm) -> Result<Value> {
        let body = form.into_json()?;
        self.send_json(Method::PUT, &format!("/faqs/{}", id), &body).await
    }

    pub async fn update_faq_status(&self, id: &str, status: FaqStatus) -> Result<Value> {
        self.send_json(
            Method::PUT,
            &format!("/faqs/{}", id),
            &json!({ "status": status.as_str() }),
        )
        .await
    }

    pub async fn delete_faq(&self, id: &str) -> Result<Value> {
        self.delete(&format!("/faqs/{}", id)).await
    }
}
