/// Integration tests for the dispute chat viewer
///
/// Runs `ChatViewer` over the real `AdminApi` against the stub admin API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{spawn_stub, KNOWN_TICKET, TEST_TOKEN};
use hub_admin::api::TicketFilter;
use hub_admin::chat::{ChatState, ChatViewer};
use hub_admin::forms::TicketReplyForm;
use hub_admin::pagination::PageState;
use tokio::sync::watch;

const POLL: Duration = Duration::from_millis(50);

/// Wait until a published snapshot satisfies `check`.
async fn wait_for(
    updates: &mut watch::Receiver<ChatState>,
    check: impl Fn(&ChatState) -> bool,
) -> ChatState {
    let state = tokio::time::timeout(Duration::from_secs(5), updates.wait_for(|s| check(s)))
        .await
        .expect("viewer did not reach the expected state")
        .expect("viewer dropped")
        .clone();
    state
}

#[tokio::test]
async fn test_viewer_loads_sidebar_and_messages() {
    let (api, _state) = spawn_stub(Some(TEST_TOKEN)).await;
    let api = Arc::new(api);

    let tickets = api
        .list_tickets(&TicketFilter::default(), PageState::default().query())
        .await
        .expect("list tickets");
    assert_eq!(tickets.data.len(), 3);

    let mut viewer = ChatViewer::new(Arc::clone(&api), &tickets.data, Some("77"), POLL);
    let mut updates = viewer.subscribe();

    let initial = updates.borrow().clone();
    assert_eq!(initial.tickets.len(), 2, "duplicate ticket rows collapse");
    assert_eq!(initial.active_id(), Some(KNOWN_TICKET));

    viewer.start().await;
    let state = wait_for(&mut updates, |s| !s.loading && s.messages.len() == 2).await;
    assert_eq!(state.booking_status.as_deref(), Some("ongoing"));
    assert_eq!(
        state.participants.unwrap().customer.full_name.as_deref(),
        Some("Ada Obi")
    );

    viewer.stop();
    assert!(!viewer.is_running());
}

#[tokio::test]
async fn test_viewer_picks_up_new_replies() {
    let (api, _state) = spawn_stub(Some(TEST_TOKEN)).await;
    let api = Arc::new(api);
    let tickets = api
        .list_tickets(&TicketFilter::default(), PageState::default().query())
        .await
        .expect("list tickets");

    let mut viewer = ChatViewer::new(Arc::clone(&api), &tickets.data, None, POLL);
    let mut updates = viewer.subscribe();
    viewer.start().await;
    wait_for(&mut updates, |s| s.messages.len() == 2).await;

    api.reply_ticket(TicketReplyForm {
        ticket_id: KNOWN_TICKET.to_string(),
        message: "We are reviewing this dispute".to_string(),
        attachment: None,
    })
    .await
    .expect("reply");

    let state = wait_for(&mut updates, |s| s.messages.len() == 3).await;
    assert_eq!(state.messages[2].message, "We are reviewing this dispute");
}

#[tokio::test]
async fn test_failed_fetch_keeps_ticket_participants() {
    let (api, state) = spawn_stub(Some(TEST_TOKEN)).await;
    let api = Arc::new(api);
    let tickets = api
        .list_tickets(&TicketFilter::default(), PageState::default().query())
        .await
        .expect("list tickets");

    // The stub has no conversation for T-200, so every poll fails.
    let mut viewer = ChatViewer::new(Arc::clone(&api), &tickets.data, Some("T-200"), POLL);
    let mut updates = viewer.subscribe();
    viewer.start().await;

    let snapshot = wait_for(&mut updates, |s| !s.loading).await;
    assert!(snapshot.messages.is_empty());
    assert_eq!(
        snapshot.participants.unwrap().provider.full_name.as_deref(),
        Some("Zainab Musa")
    );

    tokio::time::sleep(POLL * 3).await;
    assert!(viewer.is_running());
    assert!(state.requests_to("GET", "/ticket/T-200/show").len() >= 2);
}

#[tokio::test]
async fn test_attachment_only_message_is_shown() {
    let (api, state) = spawn_stub(Some(TEST_TOKEN)).await;
    state.messages.lock().unwrap().push(serde_json::json!({
        "id": 3,
        "message": null,
        "attachment": "https://cdn.example/receipt.png",
        "sender_type": "customer",
    }));
    let api = Arc::new(api);
    let tickets = api
        .list_tickets(&TicketFilter::default(), PageState::default().query())
        .await
        .expect("list tickets");

    let mut viewer = ChatViewer::new(Arc::clone(&api), &tickets.data, None, POLL);
    let mut updates = viewer.subscribe();
    viewer.start().await;

    let snapshot = wait_for(&mut updates, |s| s.messages.len() == 3).await;
    assert_eq!(snapshot.messages[2].message, "");
    assert_eq!(
        snapshot.messages[2].attachment.as_deref(),
        Some("https://cdn.example/receipt.png")
    );
}
