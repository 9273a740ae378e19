use reqwest::Method;
use serde_json::{json, Value};

use super::{AdminApi, ListQuery};
use crate::chat::TicketSource;
use crate::error::Result;
use crate::forms::TicketReplyForm;
use crate::models::{Ticket, TicketDetail};
use crate::pagination::{Page, PageQuery};

/// Filters for the ticket list.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: String,
    pub search: String,
    pub priority: String,
}

impl AdminApi {
    pub async fn list_tickets(&self, filter: &TicketFilter, page: PageQuery) -> Result<Page<Ticket>> {
        let query = ListQuery::page(page)
            .status(filter.status.as_str())
            .search(filter.search.as_str())
            .priority(filter.priority.as_str());
        self.get_page("/tickets", &query).await
    }

    /// Fetch a ticket's messages. Never cached so polling sees new replies.
    pub async fn ticket_detail(&self, ticket_id: &str) -> Result<TicketDetail> {
        self.get_fresh(&format!("/ticket/{}/show", ticket_id)).await
    }

    pub async fn reply_ticket(&self, form: TicketReplyForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/ticket/reply", body).await
    }

    pub async fn update_ticket_status(&self, ticket_id: &str, status: &str) -> Result<Value> {
        self.send_json(
            Method::PUT,
            &format!("/ticket/{}/update", ticket_id),
            &json!({ "response_status": status }),
        )
        .await
    }

    pub async fn delete_ticket(&self, ticket_id: &str) -> Result<Value> {
        self.delete(&format!("/ticket/{}/delete", ticket_id)).await
    }
}

impl TicketSource for AdminApi {
    async fn ticket_detail(&self, ticket_id: &str) -> Result<TicketDetail> {
        AdminApi::ticket_detail(self, ticket_id).await
    }
}
