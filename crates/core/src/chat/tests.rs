use std::sync::{Arc, Mutex};
use std::time::Duration;

use citechat_service::{ChatAnswer, ErrorKind, Excerpt};
use citechat_test_service::ScriptedAnswerService;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::{
    Chat, ChatBuilder, ChatStrings, EntryDraft, ExchangePhase, OverlayRegion,
    Role, TranscriptStore,
};

fn deadline_answer() -> ChatAnswer {
    ChatAnswer::text_only("The deadline is June 1.")
        .with_source("doc1")
        .with_chunk(Excerpt::new("doc1", "Deadline: June 1."))
}

fn build_chat(service: ScriptedAnswerService) -> (Chat, watch::Receiver<usize>) {
    let (idle_tx, idle_rx) = watch::channel(0usize);
    let chat = ChatBuilder::with_service(service)
        .on_idle(move || {
            idle_tx.send_modify(|n| *n += 1);
        })
        .build();
    (chat, idle_rx)
}

async fn wait_idle(idle_rx: &mut watch::Receiver<usize>, times: usize) {
    timeout(Duration::from_millis(500), idle_rx.wait_for(|n| *n >= times))
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_successful_exchange() {
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    let (chat, mut idle_rx) = build_chat(service.clone());

    chat.submit("What is the deadline?").unwrap();
    wait_idle(&mut idle_rx, 1).await;

    let snapshot = chat.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, ExchangePhase::Idle);
    assert_eq!(snapshot.entries().len(), 2);
    assert_eq!(snapshot.entries()[0].role(), Role::User);
    assert_eq!(snapshot.entries()[0].text(), "What is the deadline?");
    assert_eq!(snapshot.entries()[1].role(), Role::Bot);
    assert_eq!(snapshot.entries()[1].text(), "The deadline is June 1.");
    assert_eq!(snapshot.entries()[1].citations()[0].label, "doc1");
    assert_eq!(service.requests().len(), 1);
    assert_eq!(service.requests()[0].message, "What is the deadline?");

    chat.select_citation("doc1").unwrap();
    let overlay = chat.snapshot().await.unwrap().overlay;
    assert!(overlay.visible);
    assert_eq!(overlay.title, "doc1");
    assert_eq!(overlay.body, "Deadline: June 1.");
    assert_eq!(overlay.external_link, "/documents/doc1");
}

#[tokio::test]
async fn test_blank_submission() {
    let service = ScriptedAnswerService::default();
    let (chat, _idle_rx) = build_chat(service.clone());

    chat.submit("").unwrap();
    chat.submit("   \n").unwrap();

    let snapshot = chat.snapshot().await.unwrap();
    assert!(snapshot.entries().is_empty());
    assert_eq!(snapshot.phase, ExchangePhase::Idle);
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_failed_exchange() {
    let mut service = ScriptedAnswerService::default();
    service.add_failure(ErrorKind::Status(500));
    let (chat, mut idle_rx) = build_chat(service);

    chat.submit("Hello").unwrap();
    wait_idle(&mut idle_rx, 1).await;

    let snapshot = chat.snapshot().await.unwrap();
    assert_eq!(snapshot.entries().len(), 2);
    let bot = &snapshot.entries()[1];
    assert_eq!(bot.role(), Role::Bot);
    assert_eq!(bot.text(), ChatStrings::default().apology);
    assert!(bot.citations().is_empty());
    assert_eq!(snapshot.phase, ExchangePhase::Idle);
}

#[tokio::test]
async fn test_submit_while_sending_is_ignored() {
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    service.add_answer(ChatAnswer::text_only("Second answer"));
    service.set_delay(Duration::from_millis(50));
    let (chat, mut idle_rx) = build_chat(service.clone());

    chat.submit("first").unwrap();
    chat.submit("second").unwrap();

    let snapshot = chat.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, ExchangePhase::Sending);
    assert_eq!(snapshot.entries().len(), 2);
    assert_eq!(snapshot.entries()[1].role(), Role::Placeholder);
    assert_eq!(snapshot.entries()[1].text(), ChatStrings::default().placeholder);

    wait_idle(&mut idle_rx, 1).await;
    let snapshot = chat.snapshot().await.unwrap();
    assert_eq!(snapshot.entries().len(), 2);
    assert!(snapshot.entries().iter().all(|e| e.role() != Role::Placeholder));
    assert_eq!(service.requests().len(), 1);

    // Once idle again, the next submission goes through.
    chat.submit("third").unwrap();
    wait_idle(&mut idle_rx, 2).await;
    let snapshot = chat.snapshot().await.unwrap();
    assert_eq!(snapshot.entries().len(), 4);
    assert_eq!(snapshot.entries()[2].text(), "third");
    assert_eq!(snapshot.entries()[3].text(), "Second answer");
}

#[tokio::test]
async fn test_input_affordances() {
    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Enabled(bool),
        Cleared,
        Focused,
        Transcript(usize),
    }

    let events = Arc::new(Mutex::new(Vec::new()));
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    let (idle_tx, mut idle_rx) = watch::channel(0usize);

    let chat = ChatBuilder::with_service(service)
        .on_input_enabled({
            let events = Arc::clone(&events);
            move |enabled| events.lock().unwrap().push(Event::Enabled(enabled))
        })
        .on_clear_input({
            let events = Arc::clone(&events);
            move || events.lock().unwrap().push(Event::Cleared)
        })
        .on_focus_input({
            let events = Arc::clone(&events);
            move || events.lock().unwrap().push(Event::Focused)
        })
        .on_transcript({
            let events = Arc::clone(&events);
            move |transcript| {
                events
                    .lock()
                    .unwrap()
                    .push(Event::Transcript(transcript.len()))
            }
        })
        .on_idle(move || {
            idle_tx.send_modify(|n| *n += 1);
        })
        .build();

    chat.submit("What is the deadline?").unwrap();
    wait_idle(&mut idle_rx, 1).await;

    assert_eq!(
        *events.lock().unwrap(),
        [
            Event::Focused,
            Event::Enabled(false),
            Event::Cleared,
            Event::Transcript(2),
            Event::Enabled(true),
            Event::Focused,
            Event::Transcript(2),
        ]
    );
}

#[tokio::test]
async fn test_entry_citations_use_their_own_excerpts() {
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    service.add_answer(
        ChatAnswer::text_only("Fees are due in May.")
            .with_source("doc2")
            .with_chunk(Excerpt::new("doc2", "Fees: May.")),
    );
    let (chat, mut idle_rx) = build_chat(service);

    chat.submit("When is the deadline?").unwrap();
    wait_idle(&mut idle_rx, 1).await;
    chat.submit("When are fees due?").unwrap();
    wait_idle(&mut idle_rx, 2).await;

    let first_bot = chat.snapshot().await.unwrap().entries()[1].handle();

    // The working set only holds the latest answer's excerpts.
    chat.select_citation("doc1").unwrap();
    let overlay = chat.snapshot().await.unwrap().overlay;
    assert_eq!(overlay.body, ChatStrings::default().excerpt_not_found);

    chat.select_entry_citation(first_bot, "doc1").unwrap();
    let overlay = chat.snapshot().await.unwrap().overlay;
    assert!(overlay.visible);
    assert_eq!(overlay.title, "doc1");
    assert_eq!(overlay.body, "Deadline: June 1.");
}

#[tokio::test]
async fn test_unknown_entry_citation() {
    let mut service = ScriptedAnswerService::default();
    service.add_failure(ErrorKind::Transport);
    let (chat, mut idle_rx) = build_chat(service);

    chat.submit("Hello").unwrap();
    wait_idle(&mut idle_rx, 1).await;

    let snapshot = chat.snapshot().await.unwrap();
    let user = snapshot.entries()[0].handle();
    let apology = snapshot.entries()[1].handle();

    // The second handle of a fresh store equals the removed placeholder's.
    let mut other = TranscriptStore::default();
    other.append(EntryDraft::user("a"));
    let stale = other.append(EntryDraft::user("b"));

    for entry in [user, apology, stale] {
        chat.select_entry_citation(entry, "doc1").unwrap();
        let overlay = chat.snapshot().await.unwrap().overlay;
        assert!(overlay.visible);
        assert_eq!(overlay.title, "doc1");
        assert_eq!(overlay.body, ChatStrings::default().excerpt_not_found);
        assert_eq!(overlay.external_link, "/documents/doc1");
    }
}

#[tokio::test]
async fn test_overlay_callback() {
    let overlays = Arc::new(Mutex::new(Vec::new()));
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    let (idle_tx, mut idle_rx) = watch::channel(0usize);

    let chat = ChatBuilder::with_service(service)
        .on_overlay({
            let overlays = Arc::clone(&overlays);
            move |overlay| overlays.lock().unwrap().push(overlay.clone())
        })
        .on_idle(move || {
            idle_tx.send_modify(|n| *n += 1);
        })
        .build();

    chat.submit("What is the deadline?").unwrap();
    wait_idle(&mut idle_rx, 1).await;
    assert!(overlays.lock().unwrap().is_empty());

    chat.select_citation("doc1").unwrap();
    chat.click_overlay(OverlayRegion::Outside).unwrap();
    chat.select_citation("doc2").unwrap();
    chat.close_overlay().unwrap();
    chat.snapshot().await.unwrap();

    let seen: Vec<_> = overlays
        .lock()
        .unwrap()
        .iter()
        .map(|o| (o.visible, o.title.clone(), o.body.clone()))
        .collect();
    let not_found = ChatStrings::default().excerpt_not_found;
    assert_eq!(
        seen,
        [
            (true, "doc1".to_owned(), "Deadline: June 1.".to_owned()),
            (false, "doc1".to_owned(), "Deadline: June 1.".to_owned()),
            (true, "doc2".to_owned(), not_found.clone()),
            (false, "doc2".to_owned(), not_found),
        ]
    );
}

#[tokio::test]
async fn test_overlay_dismissal() {
    let mut service = ScriptedAnswerService::default();
    service.add_answer(deadline_answer());
    let (chat, mut idle_rx) = build_chat(service);

    chat.submit("What is the deadline?").unwrap();
    wait_idle(&mut idle_rx, 1).await;

    chat.select_citation("doc1").unwrap();
    chat.select_citation("missing").unwrap();
    let overlay = chat.snapshot().await.unwrap().overlay;
    assert!(overlay.visible);
    assert_eq!(overlay.title, "missing");
    assert_eq!(overlay.body, ChatStrings::default().excerpt_not_found);

    chat.click_overlay(OverlayRegion::Content).unwrap();
    assert!(chat.snapshot().await.unwrap().overlay.visible);
    chat.click_overlay(OverlayRegion::Outside).unwrap();
    assert!(!chat.snapshot().await.unwrap().overlay.visible);

    chat.select_citation("doc1").unwrap();
    chat.close_overlay().unwrap();
    chat.close_overlay().unwrap();
    assert!(!chat.snapshot().await.unwrap().overlay.visible);
}

#[tokio::test]
async fn test_shutdown() {
    let (chat, _idle_rx) = build_chat(ScriptedAnswerService::default());
    chat.snapshot().await.unwrap();
    chat.shutdown();
    assert!(chat.snapshot().await.is_err());
}
