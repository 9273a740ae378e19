use reqwest::Method;
use serde_json::Value;

use super::{AdminApi, ListQuery};
use crate::error::Result;
use crate::forms::TutorialForm;
use crate::models::Tutorial;
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_tutorials(&self, page: PageQuery, search: &str) -> Result<Page<Tutorial>> {
        let query = ListQuery::page(page).search(search);
        self.get_page("/tutorials", &query).await
    }

    pub async fn create_tutorial(&self, form: TutorialForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/tutorials", body).await
    }

    pub async fn update_tutorial(&self, id: u64, form: TutorialForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, &format!("/tutorials/{}", id), body)
            .await
    }

    pub async fn delete_tutorial(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/tutorials/{}", id)).await
    }
}
