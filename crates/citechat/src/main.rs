//! A terminal host for the chat.

use std::env;
use std::io::Write as _;
use std::time::Duration;

use citechat::core::{
    Chat, ChatBuilder, ChatStrings, DocumentLinks, MessageEntry, OverlayState,
    Role,
};
use citechat::host::read_line;
use citechat::{host, render};
use citechat_http_service::{HttpAnswerService, HttpServiceConfigBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum ChatEvent {
    Idle,
    Overlay(OverlayState),
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(base_url) = env::var("CITECHAT_BASE_URL") else {
        eprintln!("CITECHAT_BASE_URL environment variable is not set");
        return;
    };
    let mut config = HttpServiceConfigBuilder::with_base_url(&base_url);
    if let Ok(chat_path) = env::var("CITECHAT_CHAT_PATH") {
        config = config.with_chat_path(chat_path);
    }
    if let Ok(timeout) = env::var("CITECHAT_TIMEOUT_SECS") {
        let Some(timeout) = host::parse_timeout_secs(&timeout) else {
            eprintln!(
                "CITECHAT_TIMEOUT_SECS must be a positive number of seconds"
            );
            return;
        };
        config = config.with_timeout(timeout);
    }
    let service = match HttpAnswerService::new(config.build()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("failed to create the HTTP client: {err}");
            return;
        }
    };

    let links = env::var("CITECHAT_DOCUMENTS_PREFIX")
        .map(DocumentLinks::with_prefix)
        .unwrap_or_else(|_| {
            DocumentLinks::with_prefix(format!(
                "{}/documents",
                base_url.trim_end_matches('/')
            ))
        });
    let strings = match env::var("CITECHAT_LANG").as_deref() {
        Ok("tr") => ChatStrings::turkish(),
        _ => ChatStrings::default(),
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let chat = ChatBuilder::with_service(service)
        .with_strings(strings.clone())
        .with_document_links(links)
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(ChatEvent::Idle).ok();
            }
        })
        .on_overlay({
            let event_tx = event_tx.clone();
            move |overlay| {
                event_tx.send(ChatEvent::Overlay(overlay.clone())).ok();
            }
        })
        .build();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut last_bot: Option<MessageEntry> = None;
    let mut stdin = io::BufReader::new(io::stdin());

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("quit"), _) => break,
                (Some("close"), _) => {
                    chat.close_overlay().ok();
                }
                (Some("html"), _) => {
                    print_html(&chat, &strings).await;
                    continue;
                }
                (Some("source"), Some(n)) => {
                    let Some(label) = source_label(last_bot.as_ref(), n) else {
                        println!("No such source: {n}");
                        continue;
                    };
                    if let Some(entry) = &last_bot {
                        chat.select_entry_citation(entry.handle(), label).ok();
                    }
                }
                _ => {
                    println!("Commands: :source N, :close, :html, :quit");
                    continue;
                }
            }
            // Wait for the overlay to reflect the command.
            let Some(ChatEvent::Overlay(overlay)) = next_overlay(&mut event_rx).await
            else {
                break 'outer;
            };
            print_overlay(&overlay);
            continue;
        }

        if chat.submit(line).is_err() {
            break;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message(strings.placeholder.clone());

        loop {
            progress_bar.inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };
            if let ChatEvent::Idle = event {
                break;
            }
        }
        progress_bar.finish_and_clear();

        let Ok(snapshot) = chat.snapshot().await else {
            break;
        };
        last_bot = snapshot
            .entries()
            .iter()
            .rev()
            .find(|e| e.role() == Role::Bot)
            .cloned();
        if let Some(entry) = &last_bot {
            print_bot_entry(entry, &strings);
        }
    }
}

async fn next_overlay(
    event_rx: &mut mpsc::UnboundedReceiver<ChatEvent>,
) -> Option<ChatEvent> {
    loop {
        match event_rx.recv().await? {
            event @ ChatEvent::Overlay(_) => return Some(event),
            ChatEvent::Idle => continue,
        }
    }
}

fn source_label<'a>(entry: Option<&'a MessageEntry>, n: &str) -> Option<&'a str> {
    let idx = n.parse::<usize>().ok()?.checked_sub(1)?;
    entry?.citations().get(idx).map(|c| c.label.as_str())
}

fn print_bot_entry(entry: &MessageEntry, strings: &ChatStrings) {
    for line in entry.text().lines() {
        println!("{}🤖 {}", BAR_CHAR.bright_cyan(), line.bright_white());
    }
    if entry.citations().is_empty() {
        return;
    }
    println!("{}{}", BAR_CHAR.bright_cyan(), strings.sources_title);
    for (idx, citation) in entry.citations().iter().enumerate() {
        println!(
            "{}  [{}] {}",
            BAR_CHAR.bright_cyan(),
            idx + 1,
            citation.label.bright_yellow()
        );
    }
}

fn print_overlay(overlay: &OverlayState) {
    if !overlay.visible {
        return;
    }
    let bar = BAR_CHAR.bright_yellow();
    println!("{bar}{}", overlay.title.bold());
    for line in overlay.body.lines() {
        println!("{bar}{line}");
    }
    println!("{bar}{}", overlay.external_link.underline());
}

async fn print_html(chat: &Chat, strings: &ChatStrings) {
    let Ok(snapshot) = chat.snapshot().await else {
        return;
    };
    println!("{}", render::transcript_html(&snapshot.transcript, strings));
    println!("{}", render::overlay_html(&snapshot.overlay));
}
