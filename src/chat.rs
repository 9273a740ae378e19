//! Dispute chat viewer
//!
//! Read-only view over support tickets. A spawned task polls the active
//! ticket's detail on a fixed interval and publishes viewer snapshots on a
//! watch channel.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::{JoinHandle, JoinSet};

use crate::error::Result;
use crate::models::{Message, Participants, Ticket, TicketDetail};

/// Anything that can fetch a ticket's conversation.
pub trait TicketSource: Send + Sync + 'static {
    fn ticket_detail(&self, ticket_id: &str)
        -> impl Future<Output = Result<TicketDetail>> + Send;
}

/// Sidebar rows: first occurrence of each ticket id, filtered by `query`.
pub fn sidebar_tickets(tickets: &[Ticket], query: &str) -> Vec<Ticket> {
    let query = query.trim();
    let mut seen = HashSet::new();
    tickets
        .iter()
        .filter(|ticket| seen.insert(ticket.ticket_id.as_str()))
        .filter(|ticket| query.is_empty() || ticket.matches(query))
        .cloned()
        .collect()
}

/// Ticket to open first: the one matching `item` by ticket or service id,
/// otherwise the first row.
pub fn select_initial<'a>(tickets: &'a [Ticket], item: Option<&str>) -> Option<&'a Ticket> {
    let item = item.map(str::trim).filter(|item| !item.is_empty());
    item.and_then(|item| {
        tickets.iter().find(|ticket| {
            ticket.ticket_id == item || ticket.service_id.as_deref() == Some(item)
        })
    })
    .or_else(|| tickets.first())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub tickets: Vec<Ticket>,
    pub active: Option<Ticket>,
    pub messages: Vec<Message>,
    pub participants: Option<Participants>,
    /// Ticket status reported by the last detail fetch.
    pub booking_status: Option<String>,
    pub loading: bool,
}

impl ChatState {
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|ticket| ticket.ticket_id.as_str())
    }

    /// Apply a fetched detail for `ticket_id`. Returns true when anything changed.
    fn apply(&mut self, ticket_id: &str, detail: TicketDetail) -> bool {
        if self.active_id() != Some(ticket_id) {
            log::debug!("Dropping detail for inactive ticket {}", ticket_id);
            return false;
        }

        let mut changed = false;
        if detail.messages.len() != self.messages.len() {
            self.messages = detail.messages;
            changed = true;
        }
        if let Some(participants) = detail.participants {
            if self.participants.as_ref() != Some(&participants) {
                self.participants = Some(participants);
                changed = true;
            }
        }
        if detail.status.is_some() && detail.status != self.booking_status {
            self.booking_status = detail.status;
            changed = true;
        }
        changed
    }
}

/// Polling viewer over a list of tickets.
pub struct ChatViewer<S: TicketSource> {
    source: Arc<S>,
    state: Arc<Mutex<ChatState>>,
    updates: Arc<watch::Sender<ChatState>>,
    active_tx: watch::Sender<Option<String>>,
    poll_interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl<S: TicketSource> ChatViewer<S> {
    /// Build the viewer and pick the initial ticket. Polling starts with `start`.
    pub fn new(
        source: Arc<S>,
        tickets: &[Ticket],
        requested_item: Option<&str>,
        poll_interval: Duration,
    ) -> Self {
        let tickets = sidebar_tickets(tickets, "");
        let active = select_initial(&tickets, requested_item).cloned();
        let state = ChatState {
            participants: active.as_ref().map(Ticket::participants),
            active,
            tickets,
            ..Default::default()
        };

        let (active_tx, _) = watch::channel(state.active_id().map(str::to_owned));
        let (updates, _) = watch::channel(state.clone());

        Self {
            source,
            state: Arc::new(Mutex::new(state)),
            updates: Arc::new(updates),
            active_tx,
            poll_interval,
            task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> ChatState {
        self.state.lock().await.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Switch to another ticket. Participants come from the ticket row right
    /// away; messages arrive on the next tick.
    pub async fn select(&self, ticket_id: &str) -> bool {
        let mut state = self.state.lock().await;
        let Some(ticket) = state
            .tickets
            .iter()
            .find(|ticket| ticket.ticket_id == ticket_id)
            .cloned()
        else {
            log::warn!("Ticket {} is not in the sidebar", ticket_id);
            return false;
        };

        state.participants = Some(ticket.participants());
        state.messages.clear();
        state.booking_status = None;
        state.active = Some(ticket);
        state.loading = self.is_running();
        self.updates.send_replace(state.clone());
        self.active_tx.send_replace(Some(ticket_id.to_string()));
        true
    }

    /// Start polling. A running poller is restarted.
    pub async fn start(&mut self) {
        self.stop();

        {
            let mut state = self.state.lock().await;
            state.loading = true;
            self.updates.send_replace(state.clone());
        }

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let updates = Arc::clone(&self.updates);
        let active_rx = self.active_tx.subscribe();
        let period = self.poll_interval;

        log::info!("Polling ticket detail every {:?}", period);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            let mut inflight = JoinSet::new();
            loop {
                ticker.tick().await;
                while inflight.try_join_next().is_some() {}

                let active = active_rx.borrow().clone();
                inflight.spawn(poll_once(
                    Arc::clone(&source),
                    Arc::clone(&state),
                    Arc::clone(&updates),
                    active,
                ));
            }
        }));
    }

    /// Cancel the interval and any fetch still in flight.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Chat polling stopped");
        }
    }
}

impl<S: TicketSource> Drop for ChatViewer<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_once<S: TicketSource>(
    source: Arc<S>,
    state: Arc<Mutex<ChatState>>,
    updates: Arc<watch::Sender<ChatState>>,
    active: Option<String>,
) {
    let fetched = match &active {
        Some(ticket_id) => Some(source.ticket_detail(ticket_id).await),
        None => None,
    };

    let mut state = state.lock().await;
    let mut changed = false;
    // A tick started before a switch must not end the new ticket's loading.
    let current = state.active_id() == active.as_deref();
    if let (Some(ticket_id), Some(fetched)) = (active, fetched) {
        match fetched {
            Ok(detail) => changed = state.apply(&ticket_id, detail),
            Err(e) => log::error!("Failed to fetch ticket {}: {}", ticket_id, e),
        }
    }
    if state.loading && current {
        state.loading = false;
        changed = true;
    }
    if changed {
        updates.send_replace(state.clone());
    }
}
