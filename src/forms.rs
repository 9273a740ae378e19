//! Console forms: required-field validation and request body building.
//!
//! Every form is validated before a request is built, so an empty submission
//! never reaches the server. Create forms that may carry files build multipart
//! bodies; plain updates build JSON.

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::path::Path;

use crate::error::{AdminError, Result};
use crate::models::{CategoryType, Country, FaqStatus, Subscription};

/// Largest category image the console accepts.
pub const MAX_CATEGORY_IMAGE_BYTES: usize = 1024 * 1024;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

pub trait AdminForm {
    fn validate(&self) -> Result<()>;
}

fn invalid(message: &str) -> AdminError {
    AdminError::Validation(message.to_string())
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        ImageUpload {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(ImageUpload::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountryForm {
    pub name: String,
    pub flag: Option<ImageUpload>,
    pub dial_code: String,
    pub currency: String,
    pub short_name: String,
}

impl AdminForm for CountryForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.name)
            || self.flag.is_none()
            || blank(&self.dial_code)
            || blank(&self.currency)
            || blank(&self.short_name)
        {
            return Err(invalid("All fields are required."));
        }
        Ok(())
    }
}

impl CountryForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new()
            .text("name", self.name)
            .text("dial_code", self.dial_code)
            .text("currency", self.currency)
            .text("short_name", self.short_name);
        if let Some(flag) = self.flag {
            form = form.part("flag", flag.into_part()?);
        }
        Ok(form)
    }
}

/// Country edits send the stored record back, flag URL included.
impl AdminForm for Country {
    fn validate(&self) -> Result<()> {
        if blank(&self.name)
            || blank(&self.flag)
            || blank(&self.dial_code)
            || blank(&self.currency)
            || blank(&self.short_name)
        {
            return Err(invalid("All fields are required."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StateForm {
    pub name: String,
    pub country_id: Option<u64>,
}

impl AdminForm for StateForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.name) || self.country_id.is_none() {
            return Err(invalid("Both fields are required."));
        }
        Ok(())
    }
}

impl StateForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new().text("name", self.name);
        if let Some(country_id) = self.country_id {
            form = form.text("country_id", country_id.to_string());
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CityForm {
    pub name: String,
    pub country_id: Option<u64>,
    pub state_id: Option<u64>,
}

impl AdminForm for CityForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.name) || self.country_id.is_none() || self.state_id.is_none() {
            return Err(invalid("All fields are required."));
        }
        Ok(())
    }
}

impl CityForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new().text("name", self.name);
        if let Some(country_id) = self.country_id {
            form = form.text("country_id", country_id.to_string());
        }
        if let Some(state_id) = self.state_id {
            form = form.text("state_id", state_id.to_string());
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub category_type: Option<CategoryType>,
    pub parent_id: Option<u64>,
    pub image: Option<ImageUpload>,
}

/// Image rules for category uploads: JPEG, PNG or WebP, at most 1 MiB.
pub fn check_category_image(image: &ImageUpload) -> Result<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&image.mime_type.as_str()) {
        return Err(invalid("Only JPG, PNG, or WebP images are allowed"));
    }
    if image.bytes.len() > MAX_CATEGORY_IMAGE_BYTES {
        return Err(invalid("Image must be smaller than 1MB"));
    }
    Ok(())
}

impl AdminForm for CategoryForm {
    fn validate(&self) -> Result<()> {
        if self.category_type.is_none() {
            return Err(invalid("Type is required"));
        }
        if blank(&self.name) {
            return Err(invalid("Name is required"));
        }
        if let Some(image) = &self.image {
            check_category_image(image)?;
        }
        Ok(())
    }
}

impl CategoryForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new()
            .text("name", self.name)
            .text("description", self.description);
        if let Some(category_type) = self.category_type {
            form = form.text("type", category_type.as_str());
        }
        if let Some(parent_id) = self.parent_id {
            form = form.text("parent_id", parent_id.to_string());
        }
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubCategoryForm {
    pub name: String,
    pub category_type: Option<CategoryType>,
    pub parent_id: Option<u64>,
}

impl AdminForm for SubCategoryForm {
    fn validate(&self) -> Result<()> {
        if self.category_type.is_none() {
            return Err(invalid("Type is required"));
        }
        if blank(&self.name) {
            return Err(invalid("Name is required"));
        }
        Ok(())
    }
}

impl SubCategoryForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new().text("name", self.name);
        if let Some(category_type) = self.category_type {
            form = form.text("type", category_type.as_str());
        }
        if let Some(parent_id) = self.parent_id {
            form = form.text("parent_id", parent_id.to_string());
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionForm {
    pub name: String,
    pub monthly_price: f64,
    pub features: String,
    pub payment_link: String,
}

impl AdminForm for SubscriptionForm {
    fn validate(&self) -> Result<()> {
        let priced = self.monthly_price.is_finite() && self.monthly_price > 0.0;
        if blank(&self.name) || !priced || blank(&self.features) || blank(&self.payment_link) {
            return Err(invalid("All fields are required"));
        }
        Ok(())
    }
}

impl SubscriptionForm {
    pub fn into_payload(self) -> Result<Subscription> {
        self.validate()?;
        Ok(Subscription {
            id: None,
            name: self.name,
            monthly_price: self.monthly_price,
            features: self.features,
            payment_link_url: self.payment_link,
        })
    }
}

impl From<&Subscription> for SubscriptionForm {
    fn from(plan: &Subscription) -> Self {
        SubscriptionForm {
            name: plan.name.clone(),
            monthly_price: plan.monthly_price,
            features: plan.features.clone(),
            payment_link: plan.payment_link_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FaqForm {
    pub faq_type: String,
    pub question: String,
    pub answer: String,
    pub status: FaqStatus,
}

impl Default for FaqForm {
    fn default() -> Self {
        FaqForm {
            faq_type: String::new(),
            question: String::new(),
            answer: String::new(),
            status: FaqStatus::Active,
        }
    }
}

impl AdminForm for FaqForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.faq_type) {
            return Err(invalid("Type is required"));
        }
        if blank(&self.question) {
            return Err(invalid("Question is required"));
        }
        if blank(&self.answer) {
            return Err(invalid("Answer is required"));
        }
        Ok(())
    }
}

impl FaqForm {
    pub fn into_json(self) -> Result<Value> {
        self.validate()?;
        Ok(json!({
            "question": self.question,
            "answer": self.answer,
            "type": self.faq_type,
            "status": self.status.as_str(),
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TutorialForm {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub image: Option<ImageUpload>,
    /// Image already stored server-side when editing.
    pub existing_image: Option<String>,
}

impl AdminForm for TutorialForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.title) {
            return Err(invalid("Title is required"));
        }
        if blank(&self.description) {
            return Err(invalid("Description is required"));
        }
        let has_image = self.image.is_some()
            || self.existing_image.as_deref().is_some_and(|i| !blank(i));
        if blank(&self.video_url) && !has_image {
            return Err(invalid("Either video URL or image is required"));
        }
        Ok(())
    }
}

impl TutorialForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let form = Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .text("type", "system")
            .text("video_url", self.video_url);
        match self.image {
            Some(image) => Ok(form.part("image", image.into_part()?)),
            None => Ok(form.text("image", "")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TicketReplyForm {
    pub ticket_id: String,
    pub message: String,
    pub attachment: Option<ImageUpload>,
}

impl AdminForm for TicketReplyForm {
    fn validate(&self) -> Result<()> {
        if blank(&self.ticket_id) {
            return Err(invalid("Ticket is required"));
        }
        if blank(&self.message) && self.attachment.is_none() {
            return Err(invalid("Message or attachment is required"));
        }
        Ok(())
    }
}

impl TicketReplyForm {
    pub fn into_multipart(self) -> Result<Form> {
        self.validate()?;
        let mut form = Form::new()
            .text("ticket_id", self.ticket_id)
            .text("message", self.message);
        if let Some(attachment) = self.attachment {
            form = form.part("attachment", attachment.into_part()?);
        }
        Ok(form)
    }
}
