use reqwest::Method;
use serde_json::{json, Value};

use super::{ensure_success, AdminApi, ListQuery, NO_QUERY};
use crate::error::Result;
use crate::models::{Booking, BookingDetail, OrderDetail, OrderItem, PaymentStatus, ShippingStatus};
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_orders(
        &self,
        page: PageQuery,
        search: &str,
        status: Option<ShippingStatus>,
    ) -> Result<Page<OrderItem>> {
        let mut query = ListQuery::page(page).search(search);
        if let Some(status) = status {
            query = query.status(status.as_str());
        }
        self.get_page("/orders", &query).await
    }

    pub async fn order_detail(&self, id: &str) -> Result<OrderDetail> {
        self.get_json(&format!("/orders/{}", id), NO_QUERY).await
    }

    pub async fn change_order_status(&self, id: u64, status: ShippingStatus) -> Result<Value> {
        let body = self.put_shipping_status(id, status).await?;
        ensure_success(body, "update shipping status")
    }

    pub async fn change_order_payment_status(
        &self,
        id: u64,
        status: PaymentStatus,
    ) -> Result<Value> {
        let body = self.put_payment_status(id, status).await?;
        ensure_success(body, "update payment status")
    }

    /// Booking delivery status shares the order endpoint; any 2xx reply counts.
    pub async fn change_booking_status(&self, id: u64, status: ShippingStatus) -> Result<Value> {
        self.put_shipping_status(id, status).await
    }

    pub async fn change_booking_payment_status(
        &self,
        id: u64,
        status: PaymentStatus,
    ) -> Result<Value> {
        self.put_payment_status(id, status).await
    }

    async fn put_shipping_status(&self, id: u64, status: ShippingStatus) -> Result<Value> {
        self.send_json(
            Method::PUT,
            &format!("/orders/{}/status", id),
            &json!({ "status": status.as_str() }),
        )
        .await
    }

    async fn put_payment_status(&self, id: u64, status: PaymentStatus) -> Result<Value> {
        self.send_json(
            Method::PUT,
            &format!("/orders/{}/payment-status", id),
            &json!({ "payment_status": status.as_str() }),
        )
        .await
    }

    pub async fn list_bookings(
        &self,
        page: PageQuery,
        search: &str,
        status: Option<ShippingStatus>,
    ) -> Result<Page<Booking>> {
        let mut query = ListQuery::page(page).search(search);
        if let Some(status) = status {
            query = query.status(status.as_str());
        }
        self.get_page("/bookings", &query).await
    }

    pub async fn booking_detail(&self, id: &str) -> Result<Booking> {
        let detail: BookingDetail = self
            .get_json(&format!("/bookings/{}", id), NO_QUERY)
            .await?;
        Ok(detail.into_booking())
    }
}
