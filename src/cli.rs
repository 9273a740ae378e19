//! Console commands for the admin CLI
//!
//! One subcommand per screen action. List screens print a table and a page
//! footer; `chat` runs the polling dispute viewer with a small line-based
//! command loop on stdin.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::api::{AdminApi, TicketFilter};
use crate::chat::{sidebar_tickets, ChatState, ChatViewer};
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::{AdminError, Result};
use crate::forms::{
    CategoryForm, CityForm, CountryForm, FaqForm, ImageUpload, StateForm, SubCategoryForm,
    SubscriptionForm, TicketReplyForm, TutorialForm,
};
use crate::models::{
    category, format_amount, CategoryType, Country, FaqStatus, Message, Participants,
    PaymentStatus, SenderType, ShippingStatus, ShopType, Ticket,
};
use crate::pagination::{Page, PageQuery, PageState};

/// Tickets loaded into the chat sidebar.
const CHAT_TICKET_LIMIT: usize = 100;

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

impl PageArgs {
    pub fn state(&self, page_size: usize) -> PageState {
        PageState::new(self.page.saturating_sub(1), page_size)
    }
}

#[derive(Debug, Subcommand)]
pub enum ScreenCommand {
    /// Countries, states and cities
    Locations {
        #[command(subcommand)]
        action: LocationAction,
    },
    /// Product, service and delivery categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Vendor shops
    Shops {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Product orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Service bookings
    Bookings {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Subscription plans
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionAction,
    },
    /// Shops subscribed to a plan
    Subscribers {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Frequently asked questions
    Faqs {
        #[command(subcommand)]
        action: FaqAction,
    },
    /// Help tutorials
    Tutorials {
        #[command(subcommand)]
        action: TutorialAction,
    },
    /// Support tickets
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },
    /// Watch dispute conversations
    Chat {
        /// Ticket or service id to open first
        #[arg(long)]
        item: Option<String>,
        /// Only load tickets with this status
        #[arg(long, default_value = "")]
        status: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum LocationAction {
    /// Counts of countries, states and cities
    Summary,
    List(PageArgs),
    Countries(PageArgs),
    States(PageArgs),
    Cities(PageArgs),
    AddCountry {
        #[arg(long, default_value = "")]
        name: String,
        /// Flag image file
        #[arg(long)]
        flag: Option<PathBuf>,
        #[arg(long, default_value = "")]
        dial_code: String,
        #[arg(long, default_value = "")]
        currency: String,
        #[arg(long, default_value = "")]
        short_name: String,
    },
    UpdateCountry {
        id: u64,
        #[arg(long, default_value = "")]
        name: String,
        /// Flag image URL
        #[arg(long, default_value = "")]
        flag: String,
        #[arg(long, default_value = "")]
        dial_code: String,
        #[arg(long, default_value = "")]
        currency: String,
        #[arg(long, default_value = "")]
        short_name: String,
    },
    AddState {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        country_id: Option<u64>,
    },
    AddCity {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        country_id: Option<u64>,
        #[arg(long)]
        state_id: Option<u64>,
    },
    DeleteCountry { id: u64 },
    DeleteState { id: u64 },
    DeleteCity { id: u64 },
}

#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    /// products, services or deliveries
    #[arg(long = "type", default_value = "")]
    pub category_type: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub parent_id: Option<u64>,
    /// JPG, PNG or WebP file under 1MB
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl CategoryArgs {
    async fn into_form(self) -> Result<CategoryForm> {
        Ok(CategoryForm {
            name: self.name,
            description: self.description,
            category_type: CategoryType::parse(&self.category_type),
            parent_id: self.parent_id,
            image: load_image(self.image).await?,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type", default_value = "")]
        category_type: String,
    },
    Create(CategoryArgs),
    CreateSub {
        #[arg(long = "type", default_value = "")]
        category_type: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        parent_id: Option<u64>,
    },
    Update {
        id: u64,
        #[command(flatten)]
        form: CategoryArgs,
    },
    Delete { id: u64 },
    /// Parent choices for a category of the given type
    Parents {
        #[arg(long = "type")]
        category_type: String,
        /// Category being edited, excluded from the choices
        #[arg(long)]
        editing: Option<u64>,
    },
    Analytics(PageArgs),
}

#[derive(Debug, Subcommand)]
pub enum ShopAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "")]
        search: String,
        /// products or services; empty for all
        #[arg(long = "type", default_value = "")]
        shop_type: String,
    },
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum OrderAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    Show { id: String },
    /// Change shipping or delivery status
    Status { id: u64, status: String },
    /// Change payment status
    Payment { id: u64, status: String },
}

#[derive(Debug, Clone, Args)]
pub struct SubscriptionArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
    #[arg(long, default_value = "")]
    pub features: String,
    #[arg(long, default_value = "")]
    pub payment_link: String,
}

impl From<SubscriptionArgs> for SubscriptionForm {
    fn from(args: SubscriptionArgs) -> Self {
        SubscriptionForm {
            name: args.name,
            monthly_price: args.price,
            features: args.features,
            payment_link: args.payment_link,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionAction {
    List,
    Create(SubscriptionArgs),
    Update {
        id: u64,
        #[command(flatten)]
        form: SubscriptionArgs,
    },
    Delete { id: u64 },
}

#[derive(Debug, Clone, Args)]
pub struct FaqArgs {
    #[arg(long = "type", default_value = "")]
    pub faq_type: String,
    #[arg(long, default_value = "")]
    pub question: String,
    #[arg(long, default_value = "")]
    pub answer: String,
    #[arg(long)]
    pub inactive: bool,
}

impl From<FaqArgs> for FaqForm {
    fn from(args: FaqArgs) -> Self {
        FaqForm {
            faq_type: args.faq_type,
            question: args.question,
            answer: args.answer,
            status: if args.inactive {
                FaqStatus::Inactive
            } else {
                FaqStatus::Active
            },
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum FaqAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long = "type", default_value = "")]
        faq_type: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    Create(FaqArgs),
    Update {
        id: String,
        #[command(flatten)]
        form: FaqArgs,
    },
    /// Flip an FAQ between active and inactive
    Toggle {
        id: String,
        /// Current status as listed
        #[arg(long, default_value = "active")]
        current: String,
    },
    Delete { id: String },
}

#[derive(Debug, Clone, Args)]
pub struct TutorialArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub video_url: String,
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Keep the image already stored for this tutorial
    #[arg(long)]
    pub existing_image: Option<String>,
}

impl TutorialArgs {
    async fn into_form(self) -> Result<TutorialForm> {
        Ok(TutorialForm {
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            image: load_image(self.image).await?,
            existing_image: self.existing_image,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum TutorialAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "")]
        search: String,
    },
    Create(TutorialArgs),
    Update {
        id: u64,
        #[command(flatten)]
        form: TutorialArgs,
    },
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum TicketAction {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "")]
        status: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        priority: String,
    },
    Show { ticket_id: String },
    Reply {
        ticket_id: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    Status { ticket_id: String, status: String },
    Delete { ticket_id: String },
}

impl ScreenCommand {
    /// Action name used in "Failed to <action>" messages.
    pub fn action(&self) -> &'static str {
        use ScreenCommand::*;
        match self {
            Locations { action } => match action {
                LocationAction::Summary | LocationAction::List(_) => "load locations",
                LocationAction::Countries(_) => "load countries",
                LocationAction::States(_) => "load states",
                LocationAction::Cities(_) => "load cities",
                LocationAction::AddCountry { .. } => "add country",
                LocationAction::UpdateCountry { .. } => "update country",
                LocationAction::AddState { .. } => "add state",
                LocationAction::AddCity { .. } => "add city",
                LocationAction::DeleteCountry { .. } => "delete country",
                LocationAction::DeleteState { .. } => "delete state",
                LocationAction::DeleteCity { .. } => "delete city",
            },
            Categories { action } => match action {
                CategoryAction::List { .. } | CategoryAction::Parents { .. } => "load categories",
                CategoryAction::Create(_) => "create category",
                CategoryAction::CreateSub { .. } => "create subcategory",
                CategoryAction::Update { .. } => "update category",
                CategoryAction::Delete { .. } => "delete category",
                CategoryAction::Analytics(_) => "load category analytics",
            },
            Shops { action } => match action {
                ShopAction::List { .. } => "load shops",
                ShopAction::Delete { .. } => "delete shop",
            },
            Orders { action } => match action {
                OrderAction::List { .. } => "load orders",
                OrderAction::Show { .. } => "load order details",
                OrderAction::Status { .. } => "update shipping status",
                OrderAction::Payment { .. } => "update payment status",
            },
            Bookings { action } => match action {
                OrderAction::List { .. } => "load bookings",
                OrderAction::Show { .. } => "load booking details",
                OrderAction::Status { .. } => "update delivery status",
                OrderAction::Payment { .. } => "update payment status",
            },
            Subscriptions { action } => match action {
                SubscriptionAction::List => "load subscriptions",
                SubscriptionAction::Create(_) => "create subscription",
                SubscriptionAction::Update { .. } => "update subscription",
                SubscriptionAction::Delete { .. } => "delete subscription",
            },
            Subscribers { .. } => "load subscribers",
            Faqs { action } => match action {
                FaqAction::List { .. } => "load FAQs",
                FaqAction::Create(_) => "create FAQ",
                FaqAction::Update { .. } => "update FAQ",
                FaqAction::Toggle { .. } => "update FAQ status",
                FaqAction::Delete { .. } => "delete FAQ",
            },
            Tutorials { action } => match action {
                TutorialAction::List { .. } => "load tutorials",
                TutorialAction::Create(_) => "create tutorial",
                TutorialAction::Update { .. } => "update tutorial",
                TutorialAction::Delete { .. } => "delete tutorial",
            },
            Tickets { action } => match action {
                TicketAction::List { .. } => "load tickets",
                TicketAction::Show { .. } => "load messages",
                TicketAction::Reply { .. } => "send reply",
                TicketAction::Status { .. } => "update ticket status",
                TicketAction::Delete { .. } => "delete ticket",
            },
            Chat { .. } => "load chat",
        }
    }
}

/// Run one screen command against the API.
pub async fn execute(api: Arc<AdminApi>, config: &ClientConfig, command: ScreenCommand) -> Result<()> {
    let size = config.page_size;
    match command {
        ScreenCommand::Locations { action } => run_locations(&api, size, action).await,
        ScreenCommand::Categories { action } => run_categories(&api, size, action).await,
        ScreenCommand::Shops { action } => match action {
            ShopAction::List {
                page,
                search,
                shop_type,
            } => {
                let state = page.state(size);
                let shops = api
                    .list_shops(state.query(), &search, ShopType::parse_filter(&shop_type))
                    .await?;
                let rows = shops
                    .data
                    .iter()
                    .map(|shop| {
                        vec![
                            shop.id.to_string(),
                            shop.name.clone(),
                            shop.vendor_name().unwrap_or_default(),
                            or_dash(&shop.shop_type),
                            or_dash(&shop.status),
                            or_dash(&shop.created_at),
                        ]
                    })
                    .collect::<Vec<_>>();
                print_page(&["ID", "NAME", "VENDOR", "TYPE", "STATUS", "CREATED"], &rows, &shops, &state);
                Ok(())
            }
            ShopAction::Delete { id } => {
                api.delete_shop(id).await?;
                println!("Shop {} deleted", id);
                Ok(())
            }
        },
        ScreenCommand::Orders { action } => run_orders(&api, size, action).await,
        ScreenCommand::Bookings { action } => run_bookings(&api, size, action).await,
        ScreenCommand::Subscriptions { action } => run_subscriptions(&api, action).await,
        ScreenCommand::Subscribers { page } => {
            let state = page.state(size);
            let subscribers = api.list_subscribers(state.query()).await?;
            let rows = subscribers
                .data
                .iter()
                .map(|sub| {
                    vec![
                        sub.shop_name().to_string(),
                        sub.plan_name().to_string(),
                        or_dash(&sub.status),
                        or_dash(&sub.started_at),
                        or_dash(&sub.expires_at),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["SHOP", "PLAN", "STATUS", "STARTED", "EXPIRES"], &rows, &subscribers, &state);
            Ok(())
        }
        ScreenCommand::Faqs { action } => run_faqs(&api, size, action).await,
        ScreenCommand::Tutorials { action } => run_tutorials(&api, size, action).await,
        ScreenCommand::Tickets { action } => run_tickets(&api, size, action).await,
        ScreenCommand::Chat { item, status } => run_chat(api, config, item, status).await,
    }
}

async fn run_locations(api: &AdminApi, size: usize, action: LocationAction) -> Result<()> {
    match action {
        LocationAction::Summary => {
            let first = PageState::new(0, size).query();
            let (countries, states, cities) = futures::try_join!(
                api.list_countries(first),
                api.list_states(first),
                api.list_cities(first)
            )?;
            println!("Countries: {}", countries.total());
            println!("States:    {}", states.total());
            println!("Cities:    {}", cities.total());
        }
        LocationAction::List(page) => {
            let state = page.state(size);
            let locations = api.list_locations(state.query()).await?;
            let rows = locations
                .data
                .iter()
                .map(|loc| vec![opt_id(loc.id), or_dash(&loc.name)])
                .collect::<Vec<_>>();
            print_page(&["ID", "NAME"], &rows, &locations, &state);
        }
        LocationAction::Countries(page) => {
            let state = page.state(size);
            let countries = api.list_countries(state.query()).await?;
            let rows = countries
                .data
                .iter()
                .map(|c| {
                    vec![
                        opt_id(c.id),
                        c.name.clone(),
                        c.short_name.clone(),
                        c.dial_code.clone(),
                        c.currency.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["ID", "NAME", "CODE", "DIAL", "CURRENCY"], &rows, &countries, &state);
        }
        LocationAction::States(page) => {
            let state = page.state(size);
            let states = api.list_states(state.query()).await?;
            let rows = states
                .data
                .iter()
                .map(|s| {
                    vec![
                        opt_id(s.id),
                        s.name.clone(),
                        s.country
                            .as_ref()
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| s.country_id.to_string()),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["ID", "NAME", "COUNTRY"], &rows, &states, &state);
        }
        LocationAction::Cities(page) => {
            let state = page.state(size);
            let cities = api.list_cities(state.query()).await?;
            let rows = cities
                .data
                .iter()
                .map(|c| vec![opt_id(c.id), c.display_path(), or_dash(&c.updated_at)])
                .collect::<Vec<_>>();
            print_page(&["ID", "CITY", "UPDATED"], &rows, &cities, &state);
        }
        LocationAction::AddCountry {
            name,
            flag,
            dial_code,
            currency,
            short_name,
        } => {
            let form = CountryForm {
                name,
                flag: load_image(flag).await?,
                dial_code,
                currency,
                short_name,
            };
            api.create_country(form).await?;
            println!("Country added");
        }
        LocationAction::UpdateCountry {
            id,
            name,
            flag,
            dial_code,
            currency,
            short_name,
        } => {
            let country = Country {
                id: Some(id),
                name,
                flag,
                dial_code,
                currency,
                short_name,
            };
            api.update_country(id, &country).await?;
            println!("Country {} updated", id);
        }
        LocationAction::AddState { name, country_id } => {
            api.create_state(StateForm { name, country_id }).await?;
            println!("State added");
        }
        LocationAction::AddCity {
            name,
            country_id,
            state_id,
        } => {
            api.create_city(CityForm {
                name,
                country_id,
                state_id,
            })
            .await?;
            println!("City added");
        }
        LocationAction::DeleteCountry { id } => {
            api.delete_country(id).await?;
            println!("Country {} deleted", id);
        }
        LocationAction::DeleteState { id } => {
            api.delete_state(id).await?;
            println!("State {} deleted", id);
        }
        LocationAction::DeleteCity { id } => {
            api.delete_city(id).await?;
            println!("City {} deleted", id);
        }
    }
    Ok(())
}

async fn run_categories(api: &AdminApi, size: usize, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List {
            page,
            search,
            category_type,
        } => {
            let state = page.state(size);
            let categories = api
                .list_categories(
                    state.query(),
                    Some(search.as_str()),
                    CategoryType::parse(&category_type),
                )
                .await?;
            let rows = categories
                .data
                .iter()
                .map(|cat| {
                    vec![
                        cat.id.to_string(),
                        cat.name.clone(),
                        or_dash(&cat.category_type),
                        or_dash(&cat.parent_name),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["ID", "NAME", "TYPE", "PARENT"], &rows, &categories, &state);
        }
        CategoryAction::Create(args) => {
            api.create_category(args.into_form().await?).await?;
            println!("Category created");
        }
        CategoryAction::CreateSub {
            category_type,
            name,
            parent_id,
        } => {
            let form = SubCategoryForm {
                name,
                category_type: CategoryType::parse(&category_type),
                parent_id,
            };
            api.create_subcategory(form).await?;
            println!("Subcategory created");
        }
        CategoryAction::Update { id, form } => {
            api.update_category(id, form.into_form().await?).await?;
            println!("Category {} updated", id);
        }
        CategoryAction::Delete { id } => {
            api.delete_category(id).await?;
            println!("Category {} deleted", id);
        }
        CategoryAction::Parents {
            category_type,
            editing,
        } => {
            let category_type = CategoryType::parse(&category_type)
                .ok_or_else(|| AdminError::Validation("Type is required".to_string()))?;
            let candidates = api.parent_candidates(category_type).await?;
            let rows = category::parent_options(&candidates, editing)
                .into_iter()
                .map(|(id, name)| vec![id.to_string(), name])
                .collect::<Vec<_>>();
            println!("{}", format_table(&["ID", "NAME"], &rows));
        }
        CategoryAction::Analytics(page) => {
            let state = page.state(size);
            let analytics = api.category_analytics(state.query()).await?;
            let rows = analytics
                .data
                .iter()
                .map(|row| {
                    vec![
                        or_dash(&row.name),
                        or_dash(&row.category_type),
                        row.total_sales_count.unwrap_or(0).to_string(),
                        format_amount(row.total_sales_amount),
                        row.total_orders.unwrap_or(0).to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(
                &["CATEGORY", "TYPE", "SALES", "AMOUNT", "ORDERS"],
                &rows,
                &analytics,
                &state,
            );
        }
    }
    Ok(())
}

fn parse_shipping(status: &str) -> Result<Option<ShippingStatus>> {
    if status.trim().is_empty() {
        return Ok(None);
    }
    ShippingStatus::parse(status)
        .map(Some)
        .ok_or_else(|| AdminError::Validation(format!("Unknown status: {}", status)))
}

fn parse_payment(status: &str) -> Result<PaymentStatus> {
    PaymentStatus::parse(status)
        .ok_or_else(|| AdminError::Validation(format!("Unknown payment status: {}", status)))
}

fn require_shipping(status: &str) -> Result<ShippingStatus> {
    parse_shipping(status)?.ok_or_else(|| AdminError::Validation("Status is required".to_string()))
}

async fn run_orders(api: &AdminApi, size: usize, action: OrderAction) -> Result<()> {
    match action {
        OrderAction::List {
            page,
            search,
            status,
        } => {
            let state = page.state(size);
            let orders = api
                .list_orders(state.query(), &search, parse_shipping(&status)?)
                .await?;
            let rows = orders
                .data
                .iter()
                .map(|item| {
                    vec![
                        item.order.id.to_string(),
                        or_dash(&item.order.order_number),
                        item.product
                            .as_ref()
                            .map(|p| p.display_title().to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        item.quantity.to_string(),
                        format_amount(item.subtotal.or(item.price)),
                        item.order.shipping_status.to_string(),
                        item.order.payment_status.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(
                &["ID", "ORDER", "PRODUCT", "QTY", "TOTAL", "SHIPPING", "PAYMENT"],
                &rows,
                &orders,
                &state,
            );
        }
        OrderAction::Show { id } => {
            let detail = api.order_detail(&id).await?;
            let item = &detail.order_item;
            let order = &item.order;
            println!("Order {}", order.order_number.as_deref().unwrap_or(&id));
            if let Some(product) = &item.product {
                println!("Product:  {} x{}", product.display_title(), item.quantity);
            }
            println!("Subtotal: {}", format_amount(item.subtotal));
            println!("Shipping: {}", order.shipping_status);
            println!("Payment:  {}", order.payment_status);
            if let Some(tracking) = &order.tracking_number {
                println!("Tracking: {}", tracking);
            }
            if order.is_cancellable() {
                println!("Untouched order: can still be cancelled");
            }
            for step in order.timeline() {
                println!(
                    "  [{}] {} {}",
                    if step.done { "x" } else { " " },
                    step.label,
                    step.timestamp.as_deref().unwrap_or("")
                );
            }
            if let Some(stats) = &detail.stats {
                println!(
                    "Customer: {} orders, {} spent",
                    stats.total_orders.unwrap_or(0),
                    format_amount(stats.total_spent)
                );
            }
        }
        OrderAction::Status { id, status } => {
            let status = require_shipping(&status)?;
            api.change_order_status(id, status).await?;
            println!("Order {} is now {}", id, status);
        }
        OrderAction::Payment { id, status } => {
            let status = parse_payment(&status)?;
            api.change_order_payment_status(id, status).await?;
            println!("Order {} payment is now {}", id, status);
        }
    }
    Ok(())
}

async fn run_bookings(api: &AdminApi, size: usize, action: OrderAction) -> Result<()> {
    match action {
        OrderAction::List {
            page,
            search,
            status,
        } => {
            let state = page.state(size);
            let bookings = api
                .list_bookings(state.query(), &search, parse_shipping(&status)?)
                .await?;
            let rows = bookings
                .data
                .iter()
                .map(|booking| {
                    vec![
                        booking.id.to_string(),
                        booking
                            .customer
                            .as_ref()
                            .map(|c| c.display_name().to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        booking
                            .service
                            .as_ref()
                            .map(|s| s.display_title().to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        booking.shop_name().unwrap_or("-").to_string(),
                        format_amount(booking.amount()),
                        booking.delivery_status.to_string(),
                        booking.payment_status.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(
                &["ID", "CUSTOMER", "SERVICE", "SHOP", "TOTAL", "DELIVERY", "PAYMENT"],
                &rows,
                &bookings,
                &state,
            );
        }
        OrderAction::Show { id } => {
            let booking = api.booking_detail(&id).await?;
            println!("Booking {}", booking.id);
            if let Some(customer) = &booking.customer {
                println!("Customer: {}", customer.display_name());
                if let Some(email) = &customer.email {
                    println!("Email:    {}", email);
                }
            }
            if let Some(service) = &booking.service {
                println!("Service:  {}", service.display_title());
                if let Some(image) = service.cover_image() {
                    println!("Image:    {}", image);
                }
            }
            println!("Total:    {}", format_amount(booking.amount()));
            println!("Delivery: {}", booking.delivery_status);
            println!("Payment:  {}", booking.payment_status);
        }
        OrderAction::Status { id, status } => {
            let status = require_shipping(&status)?;
            api.change_booking_status(id, status).await?;
            println!("Booking {} is now {}", id, status);
        }
        OrderAction::Payment { id, status } => {
            let status = parse_payment(&status)?;
            api.change_booking_payment_status(id, status).await?;
            println!("Booking {} payment is now {}", id, status);
        }
    }
    Ok(())
}

async fn run_subscriptions(api: &AdminApi, action: SubscriptionAction) -> Result<()> {
    match action {
        SubscriptionAction::List => {
            let plans = api.list_subscriptions().await?;
            let rows = plans
                .data
                .iter()
                .map(|plan| {
                    vec![
                        opt_id(plan.id),
                        plan.name.clone(),
                        format_amount(Some(plan.monthly_price)),
                        plan.features.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            println!("{}", format_table(&["ID", "PLAN", "MONTHLY", "FEATURES"], &rows));
        }
        SubscriptionAction::Create(args) => {
            api.create_subscription(args.into()).await?;
            println!("Subscription created");
        }
        SubscriptionAction::Update { id, form } => {
            api.update_subscription(id, form.into()).await?;
            println!("Subscription {} updated", id);
        }
        SubscriptionAction::Delete { id } => {
            api.delete_subscription(id).await?;
            println!("Subscription {} deleted", id);
        }
    }
    Ok(())
}

async fn run_faqs(api: &AdminApi, size: usize, action: FaqAction) -> Result<()> {
    match action {
        FaqAction::List {
            page,
            faq_type,
            search,
        } => {
            let state = page.state(size);
            let faqs = api.list_faqs(state.query(), &faq_type, &search).await?;
            let rows = faqs
                .data
                .iter()
                .map(|faq| {
                    vec![
                        faq.id.clone(),
                        faq.faq_type.clone(),
                        faq.question.clone(),
                        faq.status.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["ID", "TYPE", "QUESTION", "STATUS"], &rows, &faqs, &state);
        }
        FaqAction::Create(args) => {
            api.create_faq(args.into()).await?;
            println!("FAQ created");
        }
        FaqAction::Update { id, form } => {
            api.update_faq(&id, form.into()).await?;
            println!("FAQ {} updated", id);
        }
        FaqAction::Toggle { id, current } => {
            let current = if current.trim().eq_ignore_ascii_case("inactive") {
                FaqStatus::Inactive
            } else {
                FaqStatus::Active
            };
            let next = current.toggled();
            api.update_faq_status(&id, next).await?;
            println!("FAQ {} is now {}", id, next.as_str());
        }
        FaqAction::Delete { id } => {
            api.delete_faq(&id).await?;
            println!("FAQ {} deleted", id);
        }
    }
    Ok(())
}

async fn run_tutorials(api: &AdminApi, size: usize, action: TutorialAction) -> Result<()> {
    match action {
        TutorialAction::List { page, search } => {
            let state = page.state(size);
            let tutorials = api.list_tutorials(state.query(), &search).await?;
            let rows = tutorials
                .data
                .iter()
                .map(|t| {
                    vec![
                        t.id.to_string(),
                        t.title.clone(),
                        t.youtube_id()
                            .map(|id| format!("youtube:{}", id))
                            .or_else(|| t.image.clone())
                            .unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect::<Vec<_>>();
            print_page(&["ID", "TITLE", "MEDIA"], &rows, &tutorials, &state);
        }
        TutorialAction::Create(args) => {
            api.create_tutorial(args.into_form().await?).await?;
            println!("Tutorial created");
        }
        TutorialAction::Update { id, form } => {
            api.update_tutorial(id, form.into_form().await?).await?;
            println!("Tutorial {} updated", id);
        }
        TutorialAction::Delete { id } => {
            api.delete_tutorial(id).await?;
            println!("Tutorial {} deleted", id);
        }
    }
    Ok(())
}

async fn run_tickets(api: &AdminApi, size: usize, action: TicketAction) -> Result<()> {
    match action {
        TicketAction::List {
            page,
            status,
            search,
            priority,
        } => {
            let state = page.state(size);
            let filter = TicketFilter {
                status,
                search,
                priority,
            };
            let tickets = api.list_tickets(&filter, state.query()).await?;
            let rows = tickets.data.iter().map(ticket_row).collect::<Vec<_>>();
            print_page(&["TICKET", "PARTIES", "SERVICE", "STATUS", "PRIORITY"], &rows, &tickets, &state);
        }
        TicketAction::Show { ticket_id } => {
            let detail = api.ticket_detail(&ticket_id).await?;
            println!(
                "Ticket {} ({})",
                ticket_id,
                detail.status.as_deref().unwrap_or("unknown")
            );
            for message in &detail.messages {
                println!("{}", format_chat_line(message, detail.participants.as_ref()));
            }
        }
        TicketAction::Reply {
            ticket_id,
            message,
            attachment,
        } => {
            let form = TicketReplyForm {
                ticket_id,
                message,
                attachment: load_image(attachment).await?,
            };
            api.reply_ticket(form).await?;
            println!("Reply sent");
        }
        TicketAction::Status { ticket_id, status } => {
            api.update_ticket_status(&ticket_id, &status).await?;
            println!("Ticket {} is now {}", ticket_id, status);
        }
        TicketAction::Delete { ticket_id } => {
            api.delete_ticket(&ticket_id).await?;
            println!("Ticket {} deleted", ticket_id);
        }
    }
    Ok(())
}

/// Input accepted while the chat viewer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Open(String),
    Search(String),
    List,
    Quit,
    Unknown(String),
}

pub fn parse_chat_input(line: &str) -> ChatInput {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "/open" if !rest.is_empty() => ChatInput::Open(rest.to_string()),
        "/search" => ChatInput::Search(rest.to_string()),
        "/list" => ChatInput::List,
        "/quit" | "/q" => ChatInput::Quit,
        _ => ChatInput::Unknown(line.to_string()),
    }
}

async fn run_chat(
    api: Arc<AdminApi>,
    config: &ClientConfig,
    item: Option<String>,
    status: String,
) -> Result<()> {
    let filter = TicketFilter {
        status,
        ..Default::default()
    };
    let page = PageQuery {
        limit: CHAT_TICKET_LIMIT,
        offset: 0,
    };
    let tickets = api.list_tickets(&filter, page).await?.data;
    if tickets.is_empty() {
        println!("No tickets found");
        return Ok(());
    }

    let mut viewer = ChatViewer::new(api, &tickets, item.as_deref(), config.poll_interval);
    let mut updates = viewer.subscribe();
    let (search, mut search_rx) = Debouncer::<String>::new(config.debounce_window);

    print_sidebar(&sidebar_tickets(&tickets, ""));
    println!("Commands: /open <ticket>, /search <text>, /list, /quit");

    let mut input = spawn_stdin_reader();
    let mut printed = TranscriptCursor::default();
    viewer.start().await;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                for line in printed.advance(&state) {
                    println!("{}", line);
                }
            }
            Some(query) = search_rx.recv() => {
                let state = viewer.snapshot().await;
                print_sidebar(&sidebar_tickets(&state.tickets, query.as_str()));
            }
            line = input.recv() => {
                let Some(line) = line else { break };
                match parse_chat_input(&line) {
                    ChatInput::Open(ticket_id) => {
                        if !viewer.select(&ticket_id).await {
                            println!("No ticket {}", ticket_id);
                        }
                    }
                    ChatInput::Search(query) => search.call(query),
                    ChatInput::List => {
                        let state = viewer.snapshot().await;
                        print_sidebar(&state.tickets);
                    }
                    ChatInput::Quit => break,
                    ChatInput::Unknown(text) if text.is_empty() => {}
                    ChatInput::Unknown(text) => println!("Unknown command: {}", text),
                }
            }
        }
    }

    search.cancel();
    viewer.stop();
    Ok(())
}

/// Forward stdin lines to a channel so reads survive `select!` cancellation.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Tracks what part of the active transcript has been printed.
#[derive(Debug, Default)]
pub struct TranscriptCursor {
    ticket_id: Option<String>,
    printed: usize,
}

impl TranscriptCursor {
    /// Lines to print for a new viewer snapshot.
    pub fn advance(&mut self, state: &ChatState) -> Vec<String> {
        let mut lines = Vec::new();
        let active = state.active_id().map(str::to_owned);
        if active != self.ticket_id {
            self.ticket_id = active;
            self.printed = 0;
            if let Some(ticket) = &state.active {
                lines.push(format!("── {} ({}) ──", ticket.headline(), ticket.ticket_id));
            }
        }
        if state.loading {
            return lines;
        }
        if state.messages.len() < self.printed {
            self.printed = 0;
        }
        for message in &state.messages[self.printed..] {
            lines.push(format_chat_line(message, state.participants.as_ref()));
        }
        self.printed = state.messages.len();
        lines
    }
}

fn print_sidebar(tickets: &[Ticket]) {
    let rows = tickets.iter().map(ticket_row).collect::<Vec<_>>();
    println!("{}", format_table(&["TICKET", "PARTIES", "SERVICE", "STATUS", "PRIORITY"], &rows));
}

fn ticket_row(ticket: &Ticket) -> Vec<String> {
    vec![
        ticket.ticket_id.clone(),
        ticket.headline(),
        or_dash(&ticket.service_name),
        or_dash(&ticket.status),
        or_dash(&ticket.priority),
    ]
}

/// One transcript line: `[time] name (role): text`.
pub fn format_chat_line(message: &Message, participants: Option<&Participants>) -> String {
    let (role, participant_name) = match message.sender_type {
        SenderType::Customer => ("customer", participants.and_then(|p| p.customer.full_name.as_deref())),
        SenderType::Provider => ("provider", participants.and_then(|p| p.provider.full_name.as_deref())),
        SenderType::Admin => ("admin", Some("Admin")),
        SenderType::Other => ("unknown", None),
    };
    let name = message
        .sender_name
        .as_deref()
        .or(participant_name)
        .unwrap_or("Unknown");

    let mut line = String::new();
    if let Some(time) = &message.created_at {
        line.push_str(&format!("[{}] ", time));
    }
    line.push_str(&format!("{} ({}):", name, role));
    if !message.message.is_empty() {
        line.push(' ');
        line.push_str(&message.message);
    }
    if let Some(attachment) = &message.attachment {
        line.push_str(&format!(" [attachment: {}]", attachment));
    }
    line
}

/// Left-aligned columns separated by two spaces.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    lines.extend(rows.iter().map(|row| render(row.iter().map(String::as_str).collect())));
    lines.join("\n")
}

/// Position line plus the `--page` values that move around the list.
pub fn format_page_footer<T>(page: &Page<T>, state: &PageState) -> String {
    let pages = page.page_count(state.page_size).max(1) as usize;
    let mut footer = format!(
        "Page {} of {} ({} total)",
        state.page_index + 1,
        pages,
        page.total()
    );

    // Past the end usually means a narrower filter; point back at the start.
    if state.page_index >= pages {
        let mut first = *state;
        first.reset();
        footer.push_str(&format!("  first: --page {}", first.page_index + 1));
        return footer;
    }
    if state.page_index > 0 {
        let mut prev = *state;
        prev.prev();
        footer.push_str(&format!("  prev: --page {}", prev.page_index + 1));
    }
    let mut next = *state;
    next.next();
    if next.page_index < pages {
        footer.push_str(&format!("  next: --page {}", next.page_index + 1));
    }
    footer
}

fn print_page<T>(headers: &[&str], rows: &[Vec<String>], page: &Page<T>, state: &PageState) {
    if rows.is_empty() {
        println!("No records found");
    } else {
        println!("{}", format_table(headers, rows));
    }
    println!("{}", format_page_footer(page, state));
}

async fn load_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>> {
    match path {
        Some(path) => Ok(Some(ImageUpload::load(&path).await?)),
        None => Ok(None),
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn opt_id(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}
