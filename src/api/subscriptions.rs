use reqwest::Method;
use serde_json::Value;

use super::{AdminApi, ListQuery, NO_QUERY};
use crate::error::Result;
use crate::forms::SubscriptionForm;
use crate::models::{Subscriber, Subscription};
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_subscriptions(&self) -> Result<Page<Subscription>> {
        self.get_page("/subscriptions", NO_QUERY).await
    }

    pub async fn create_subscription(&self, form: SubscriptionForm) -> Result<Value> {
        let payload = form.into_payload()?;
        self.send_json(Method::POST, "/subscriptions", &payload).await
    }

    pub async fn update_subscription(&self, id: u64, form: SubscriptionForm) -> Result<Value> {
        let payload = form.into_payload()?;
        self.send_json(Method::PUT, &format!("/subscriptions/{}", id), &payload)
            .await
    }

    pub async fn delete_subscription(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/subscriptions/{}", id)).await
    }

    pub async fn list_subscribers(&self, page: PageQuery) -> Result<Page<Subscriber>> {
        self.get_page("/subscribers", &ListQuery::page(page)).await
    }
}
