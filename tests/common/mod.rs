//! Common test utilities for integration tests
//! Provides an in-process stub of the admin API and helpers to drive it

#![allow(dead_code)]

use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer};
use hub_admin::{AdminApi, ClientConfig};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Mutex;

pub const TEST_TOKEN: &str = "test-token";

/// Ticket the stub knows the conversation for.
pub const KNOWN_TICKET: &str = "T-100";

/// Order id whose status change the stub refuses.
pub const LOCKED_ORDER: u64 = 999;

/// Booking whose status changes are acknowledged with a bare `{message}` body.
pub const BOOKING_ID: u64 = 9;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// In-memory admin API state.
pub struct StubState {
    pub countries: Mutex<Vec<Value>>,
    pub messages: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl Default for StubState {
    fn default() -> Self {
        StubState {
            countries: Mutex::new(vec![
                country(1, "Kenya", "KE", "+254", "KES"),
                country(2, "Ghana", "GH", "+233", "GHS"),
                country(3, "Nigeria", "NG", "+234", "NGN"),
            ]),
            messages: Mutex::new(vec![
                json!({"id": 1, "message": "My braids were not done", "sender_type": "customer", "created_at": "2024-05-01 10:00"}),
                json!({"id": 2, "message": "Customer arrived late", "sender_type": "provider", "created_at": "2024-05-01 10:05"}),
            ]),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl StubState {
    fn record(&self, req: &HttpRequest, body: &[u8]) {
        let header_value = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    /// Requests received for `method` + `path`, oldest first.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn country(id: u64, name: &str, short_name: &str, dial_code: &str, currency: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "flag": format!("https://cdn.example/flags/{}.png", short_name.to_lowercase()),
        "dial_code": dial_code,
        "currency": currency,
        "short_name": short_name,
    })
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TEST_TOKEN)[..])
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"message": "Unauthenticated."}))
}

/// Pull a text field out of a multipart body.
pub fn multipart_field(body: &str, field: &str) -> Option<String> {
    let marker = format!("name=\"{}\"\r\n\r\n", field);
    let start = body.find(&marker)? + marker.len();
    let end = body[start..].find("\r\n")? + start;
    Some(body[start..end].to_string())
}

#[derive(Deserialize)]
struct PageParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

async fn list_countries(
    state: web::Data<StubState>,
    req: HttpRequest,
    page: web::Query<PageParams>,
) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    let countries = state.countries.lock().unwrap().clone();
    let limit = page.limit.unwrap_or(20);
    let offset = page.offset.unwrap_or(0);
    let data: Vec<Value> = countries.iter().skip(offset).take(limit).cloned().collect();
    HttpResponse::Ok().json(json!({
        "data": data,
        "total": countries.len(),
        "limit": limit,
        "offset": offset,
    }))
}

async fn list_states(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "data": [{"id": 10, "name": "Nairobi County", "country_id": 1}],
            "total": 1,
        }
    }))
}

async fn list_cities(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "data": [
            {"id": 100, "name": "Westlands", "state_id": 10, "country_id": 1},
            {"id": 101, "name": "Karen", "state_id": 10, "country_id": 1},
        ],
    }))
}

async fn create_country(
    state: web::Data<StubState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    if !authorized(&req) {
        return unauthorized();
    }
    let text = String::from_utf8_lossy(&body);
    let Some(name) = multipart_field(&text, "name") else {
        return HttpResponse::UnprocessableEntity().json(json!({"message": "The name field is required."}));
    };
    let mut countries = state.countries.lock().unwrap();
    let id = countries.len() as u64 + 1;
    let short_name = multipart_field(&text, "short_name").unwrap_or_default();
    let dial_code = multipart_field(&text, "dial_code").unwrap_or_default();
    let currency = multipart_field(&text, "currency").unwrap_or_default();
    countries.push(country(id, &name, &short_name, &dial_code, &currency));
    HttpResponse::Created().json(json!({"status": "success", "message": "Country created"}))
}

async fn update_country(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<u64>,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    if !authorized(&req) {
        return unauthorized();
    }
    let Ok(update) = serde_json::from_slice::<Value>(&body) else {
        return HttpResponse::BadRequest().json(json!({"message": "Invalid JSON"}));
    };
    let id = id.into_inner();
    let mut countries = state.countries.lock().unwrap();
    match countries.iter_mut().find(|c| c["id"] == json!(id)) {
        Some(existing) => {
            *existing = update;
            existing["id"] = json!(id);
            HttpResponse::Ok().json(json!({"status": "success"}))
        }
        None => HttpResponse::NotFound().json(json!({"message": "Country not found"})),
    }
}

async fn delete_country(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<u64>,
) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    let id = id.into_inner();
    let mut countries = state.countries.lock().unwrap();
    let before = countries.len();
    countries.retain(|c| c["id"] != json!(id));
    if countries.len() == before {
        HttpResponse::NotFound().json(json!({"message": "Country not found"}))
    } else {
        HttpResponse::Ok().json(json!({"status": "success", "message": "Country deleted"}))
    }
}

fn ticket_row(id: &str, customer: &str, provider: &str, last_message: &str) -> Value {
    json!({
        "ticket_id": id,
        "service_id": 77,
        "service_name": "Hair braiding",
        "customer_name": customer,
        "provider_name": provider,
        "last_message": last_message,
        "status": "ongoing",
        "priority": "high",
    })
}

async fn list_tickets(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "data": [
            ticket_row(KNOWN_TICKET, "Ada Obi", "Kofi Mensah", "Customer arrived late"),
            ticket_row(KNOWN_TICKET, "Ada Obi", "Kofi Mensah", "Customer arrived late"),
            ticket_row("T-200", "Bola Ade", "Zainab Musa", "Refund please"),
        ],
        "total": 3,
    }))
}

async fn show_ticket(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    if id.as_str() != KNOWN_TICKET {
        return HttpResponse::NotFound().json(json!({"error": "Ticket not found"}));
    }
    let messages = state.messages.lock().unwrap().clone();
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "status": "ongoing",
            "messages": messages,
            "participants": {
                "customer": {"full_name": "Ada Obi", "profile_photo": null},
                "provider": {"full_name": "Kofi Mensah", "profile_photo": null},
            },
        }
    }))
}

async fn reply_ticket(
    state: web::Data<StubState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    if !authorized(&req) {
        return unauthorized();
    }
    let text = String::from_utf8_lossy(&body);
    let message = multipart_field(&text, "message").unwrap_or_default();
    let mut messages = state.messages.lock().unwrap();
    let id = messages.len() + 1;
    messages.push(json!({"id": id, "message": message, "sender_type": "admin", "sender_name": "Admin"}));
    HttpResponse::Created().json(json!({"status": "success"}))
}

async fn order_detail(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<u64>,
) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "order_item": {
                "id": 5,
                "order": {
                    "id": id.into_inner(),
                    "order_number": "AH-1001",
                    "shipping_status": "processing",
                    "payment_status": "completed",
                    "created_at": "2024-05-01",
                    "payment_date": "2024-05-01",
                },
                "product": {"id": 3, "title": "Shea butter", "images": ["shea.png"], "price": "12.50"},
                "quantity": 2,
                "price": "12.50",
                "subtotal": 25,
            },
            "stats": {"total_orders": 4, "total_spent": "88.00"},
        }
    }))
}

async fn change_order_status(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<u64>,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    if !authorized(&req) {
        return unauthorized();
    }
    match id.into_inner() {
        LOCKED_ORDER => {
            HttpResponse::Ok().json(json!({"success": false, "message": "Order already delivered"}))
        }
        BOOKING_ID => HttpResponse::Ok().json(json!({"message": "Updated"})),
        _ => HttpResponse::Ok().json(json!({"success": true})),
    }
}

fn booking_row(id: u64, service: Value, amount: &str) -> Value {
    json!({
        "id": id,
        "customer": {"id": 3, "name": "Ada Obi", "email": "ada@example.com"},
        "shop": {"id": 2, "name": "Kofi's Salon"},
        "service": service,
        "amount": amount,
        "delivery_status": "ongoing",
        "payment_status": "pending",
    })
}

async fn list_bookings(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "data": [
                booking_row(
                    BOOKING_ID,
                    json!({"id": 8, "title": "Box braids", "slug": "box-braids", "images": ["braids.png"]}),
                    "40.00",
                ),
                booking_row(
                    10,
                    json!({"id": 11, "title": "Deep clean", "images": "https://cdn.example/clean.png"}),
                    "45.50",
                ),
            ],
            "total": 2,
        }
    }))
}

async fn booking_detail(
    state: web::Data<StubState>,
    req: HttpRequest,
    id: web::Path<u64>,
) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "booking": {
                "id": id.into_inner(),
                "customer": {"name": "Ada Obi", "email": "ada@example.com"},
                "shop": {"name": "Kofi's Salon"},
                "service": {"id": 8, "title": "Box braids", "images": "braids.png"},
                "amount": "40.00",
                "delivery_status": "ongoing",
                "payment_status": "pending",
            },
            "stats": {"total_bookings": 3, "total_revenue": "120.00", "total_completed": 2},
        }
    }))
}

async fn list_subscriptions(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!([
        {"id": 1, "name": "Basic", "monthly_price": "9.99", "features": "<ul><li>5 listings</li></ul>", "payment_link_url": "https://pay.example/basic"},
        {"id": 2, "name": "Pro", "monthly_price": 29, "features": "<ul><li>Unlimited</li></ul>", "payment_link_url": "https://pay.example/pro"},
    ]))
}

async fn create_faq(state: web::Data<StubState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    state.record(&req, &body);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Created().json(json!({"status": "success"}))
}

async fn not_found(state: web::Data<StubState>, req: HttpRequest) -> HttpResponse {
    state.record(&req, &[]);
    HttpResponse::NotFound().json(json!({"message": format!("No route for {}", req.path())}))
}

/// Start the stub admin API on a random local port.
///
/// Returns the server future (spawn it), its address and the shared state.
pub fn create_test_http_server(
) -> std::io::Result<(actix_web::dev::Server, String, web::Data<StubState>)> {
    let state = web::Data::new(StubState::default());
    let app_state = state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/countries", web::get().to(list_countries))
            .route("/states", web::get().to(list_states))
            .route("/cities", web::get().to(list_cities))
            .route("/country/create", web::post().to(create_country))
            .route("/country/update/{id}", web::put().to(update_country))
            .route("/country/delete/{id}", web::delete().to(delete_country))
            .route("/tickets", web::get().to(list_tickets))
            .route("/ticket/reply", web::post().to(reply_ticket))
            .route("/ticket/{id}/show", web::get().to(show_ticket))
            .route("/orders/{id}", web::get().to(order_detail))
            .route("/orders/{id}/status", web::put().to(change_order_status))
            .route("/orders/{id}/payment-status", web::put().to(change_order_status))
            .route("/bookings", web::get().to(list_bookings))
            .route("/bookings/{id}", web::get().to(booking_detail))
            .route("/subscriptions", web::get().to(list_subscriptions))
            .route("/faqs", web::post().to(create_faq))
            .default_service(web::to(not_found))
    })
    .workers(1)
    .bind("127.0.0.1:0")?;

    let addr = server
        .addrs()
        .first()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "No bind address found"))?
        .to_string();

    Ok((server.run(), addr, state))
}

/// Spawn the stub and build a client for it.
pub async fn spawn_stub(token: Option<&str>) -> (AdminApi, web::Data<StubState>) {
    let (server, addr, state) = create_test_http_server().expect("Failed to create test server");
    tokio::spawn(server);

    // Give server a moment to bind
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let config = ClientConfig::with_api_url(&format!("http://{}", addr)).expect("valid stub URL");
    let api = AdminApi::new(&config, token.map(str::to_string)).expect("Failed to build client");
    (api, state)
}
