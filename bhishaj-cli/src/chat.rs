//! Interactive chat in the terminal

use anyhow::{anyhow, Result};
use bhishaj_core::chat::{render_line, ChatEvent, ChatService, ChatSnapshot, Sender, SessionStore};
use bhishaj_core::config::Config;
use bhishaj_core::media::{Composer, FsMediaPicker, MediaPicker, MediaRequest};
use console::style;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::commands::{ChatCommand, HELP};

/// Run the chat REPL until /quit or end of input
pub async fn run_chat(config: &Config, seed: bool) -> Result<()> {
    let mut chat_config = config.chat.clone();
    chat_config.seed_examples |= seed;

    let service = ChatService::new(SessionStore::from_config(chat_config));
    let mut events = service
        .take_event_receiver()
        .await
        .ok_or_else(|| anyhow!("chat event receiver already taken"))?;
    service.start().await;
    info!("Chat started");

    println!("{}", style("Bhishaj").bold().cyan());
    println!("{}", style("Ask a health question, or /help for commands.").dim());
    print_active(&service.snapshot().await);

    let mut composer = Composer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match ChatCommand::parse(&line) {
                    Ok(command) => {
                        if !handle(&service, &mut composer, command).await {
                            break;
                        }
                    }
                    Err(message) => println!("{}", style(message).yellow()),
                }
            }
            Some(event) = events.recv() => {
                print_event(&service, event).await;
            }
        }
    }

    service.stop().await;
    info!("Chat finished");
    Ok(())
}

/// Returns false when the user wants to leave
async fn handle(service: &ChatService, composer: &mut Composer, command: ChatCommand) -> bool {
    match command {
        ChatCommand::Empty => {}
        ChatCommand::Send(text) => {
            composer.set_text(text);
            send(service, composer).await;
        }
        ChatCommand::SendAttachments => send(service, composer).await,
        ChatCommand::AttachImages(paths) => attach(composer, MediaRequest::Images, paths).await,
        ChatCommand::AttachDocuments(paths) => {
            attach(composer, MediaRequest::Documents, paths).await
        }
        ChatCommand::Camera => attach(composer, MediaRequest::Camera, Vec::new()).await,
        ChatCommand::Drop(id) => {
            if composer.remove_attachment(&id) {
                println!("Removed attachment {}", id);
            } else {
                println!("{}", style(format!("No pending attachment {}", id)).yellow());
            }
        }
        ChatCommand::New => {
            service.start_new_chat().await;
            println!("{}", style("New chat. Your next message starts it.").dim());
        }
        ChatCommand::History => print_history(&service.snapshot().await),
        ChatCommand::Switch(target) => {
            let snapshot = service.snapshot().await;
            let id = resolve_session(&snapshot, &target);
            if service.switch_to(&id).await {
                print_active(&service.snapshot().await);
            } else {
                println!("{}", style(format!("No chat {}", target)).yellow());
            }
        }
        ChatCommand::Delete(target) => {
            let snapshot = service.snapshot().await;
            let id = resolve_session(&snapshot, &target);
            if service.delete_session(&id).await {
                println!("Deleted chat {}", id);
            } else {
                println!("{}", style(format!("No chat {}", target)).yellow());
            }
        }
        ChatCommand::Show => print_active(&service.snapshot().await),
        ChatCommand::Help => println!("{}", HELP),
        ChatCommand::Quit => return false,
    }
    true
}

async fn send(service: &ChatService, composer: &mut Composer) {
    if !composer.is_sendable() {
        return;
    }
    let (text, attachments) = composer.take();
    if let Some(receipt) = service.send_message(&text, attachments).await {
        if receipt.created_session {
            let snapshot = service.snapshot().await;
            if let Some(session) = snapshot.active_session() {
                println!("{}", style(format!("Started chat \"{}\"", session.title())).dim());
            }
        }
    }
}

async fn attach(composer: &mut Composer, request: MediaRequest, paths: Vec<PathBuf>) {
    let picker = FsMediaPicker::new(paths);
    match picker.pick(request).await {
        Ok(outcome) => {
            let before = composer.attachments().len();
            if let Some(notice) = composer.accept(outcome) {
                println!("{}", style(notice).yellow());
            }
            for attachment in &composer.attachments()[before..] {
                println!(
                    "Attached {} {} ({})",
                    attachment.kind,
                    attachment.name,
                    style(&attachment.id).dim()
                );
            }
        }
        Err(e) => {
            warn!("Media pick failed: {}", e);
            println!("{}", style(format!("Could not attach: {}", e)).red());
        }
    }
}

async fn print_event(service: &ChatService, event: ChatEvent) {
    let ChatEvent::MessageAppended {
        session_id,
        message,
    } = event
    else {
        return;
    };
    // The user already sees what they typed.
    if message.sender() == Sender::User && message.attachment().is_none() {
        return;
    }

    let snapshot = service.snapshot().await;
    if snapshot.active_session_id.as_deref() == Some(session_id.as_str()) {
        println!("{}", render_line(&message));
    } else if let Some(session) = snapshot.sessions.iter().find(|s| s.id() == session_id) {
        println!(
            "{}",
            style(format!("New message in \"{}\"", session.title())).dim()
        );
    }
}

/// Accept either a 1-based history position or a session id
fn resolve_session(snapshot: &ChatSnapshot, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| snapshot.sessions.get(i))
        .map(|s| s.id().to_string())
        .unwrap_or_else(|| target.to_string())
}

fn print_history(snapshot: &ChatSnapshot) {
    if snapshot.sessions.is_empty() {
        println!("{}", style("No chats yet").dim());
        return;
    }
    for (i, session) in snapshot.sessions.iter().enumerate() {
        let marker = if snapshot.active_session_id.as_deref() == Some(session.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}. {} {}",
            marker,
            i + 1,
            session.title(),
            style(format!("({} messages)", session.messages().len())).dim()
        );
    }
}

fn print_active(snapshot: &ChatSnapshot) {
    match snapshot.active_session() {
        Some(session) => {
            println!("{}", style(session.title()).bold());
            for message in session.messages() {
                println!("{}", render_line(message));
            }
        }
        None => println!("{}", style("New chat").bold()),
    }
}
