//! Async driver for the session store
//!
//! Maps tokio time onto the store's virtual clock, fires due appends from a
//! background task and publishes [`ChatEvent`]s for the screen to re-render.

use std::sync::Arc;

use tokio::sync::{mpsc, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::events::ChatEvent;
use super::store::{Landed, SendReceipt, SessionStore};
use super::types::{Attachment, ChatSession};

/// Point-in-time copy of the store for display
#[derive(Debug, Clone)]
pub struct ChatSnapshot {
    pub sessions: Vec<ChatSession>,
    pub active_session_id: Option<String>,
}

impl ChatSnapshot {
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id() == id)
    }
}

struct Shared {
    store: SessionStore,
    /// Tokio instant matching the store's current virtual time
    last_sync: Instant,
}

impl Shared {
    /// Catch the virtual clock up with real elapsed time
    fn sync(&mut self) -> Vec<Landed> {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_sync);
        self.last_sync = now;
        self.store.advance(elapsed)
    }
}

/// Owns a [`SessionStore`] for the lifetime of a chat screen
pub struct ChatService {
    shared: Arc<RwLock<Shared>>,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    events_rx: Arc<RwLock<Option<mpsc::UnboundedReceiver<ChatEvent>>>>,
    wake: Arc<Notify>,
    running: Arc<RwLock<bool>>,
    task: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl ChatService {
    /// Wrap a store. The background task is not started yet.
    pub fn new(store: SessionStore) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            shared: Arc::new(RwLock::new(Shared {
                store,
                last_sync: Instant::now(),
            })),
            events_tx,
            events_rx: Arc::new(RwLock::new(Some(events_rx))),
            wake: Arc::new(Notify::new()),
            running: Arc::new(RwLock::new(false)),
            task: Arc::new(RwLock::new(None)),
        }
    }

    /// Take the event receiver (can only be called once)
    pub async fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<ChatEvent>> {
        self.events_rx.write().await.take()
    }

    /// Start firing deferred appends in the background
    pub async fn start(&self) {
        {
            let running_guard = self.running.read().await;
            if *running_guard {
                debug!("Chat service already running");
                return;
            }
        }

        *self.running.write().await = true;

        let handle = ChatServiceHandle {
            shared: Arc::clone(&self.shared),
            events_tx: self.events_tx.clone(),
            wake: Arc::clone(&self.wake),
            running: Arc::clone(&self.running),
        };
        let task = tokio::spawn(async move {
            handle.run_loop().await;
        });

        *self.task.write().await = Some(task);
        info!("Chat service started");
    }

    /// Stop the background task. Pending appends stay queued.
    pub async fn stop(&self) {
        *self.running.write().await = false;
        self.wake.notify_one();

        let mut task_guard = self.task.write().await;
        if let Some(task) = task_guard.take() {
            task.abort();
        }
    }

    /// Check if the background task is running
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Apply appends that are due by now, without waiting for the
    /// background task. Returns how many landed.
    pub async fn tick(&self) -> usize {
        // Publish under the lock so events follow the store's append order.
        let mut shared = self.shared.write().await;
        let landed = shared.sync();
        let count = landed.len();
        publish_landed(&self.events_tx, landed);
        count
    }

    /// See [`SessionStore::send_message`]
    pub async fn send_message(&self, text: &str, attachments: Vec<Attachment>) -> Option<SendReceipt> {
        let receipt = {
            let mut shared = self.shared.write().await;
            let landed = shared.sync();
            publish_landed(&self.events_tx, landed);

            let receipt = shared.store.send_message(text, attachments)?;
            let session = shared.store.session(&receipt.session_id);

            if receipt.created_session {
                let title = session.map(|s| s.title().to_string()).unwrap_or_default();
                self.emit(ChatEvent::SessionCreated {
                    session_id: receipt.session_id.clone(),
                    title,
                });
                self.emit(ChatEvent::ActiveChanged {
                    session_id: Some(receipt.session_id.clone()),
                });
            }
            if receipt.text_message_id.is_some() {
                if let Some(message) = session.and_then(|s| s.last_message()) {
                    self.emit(ChatEvent::MessageAppended {
                        session_id: receipt.session_id.clone(),
                        message: message.clone(),
                    });
                }
            }
            receipt
        };

        self.wake.notify_one();
        Some(receipt)
    }

    /// See [`SessionStore::start_new_chat`]
    pub async fn start_new_chat(&self) {
        let mut shared = self.shared.write().await;
        let landed = shared.sync();
        publish_landed(&self.events_tx, landed);

        if shared.store.active_session_id().is_some() {
            shared.store.start_new_chat();
            self.emit(ChatEvent::ActiveChanged { session_id: None });
        }
    }

    /// See [`SessionStore::switch_to`]
    pub async fn switch_to(&self, session_id: &str) -> bool {
        let mut shared = self.shared.write().await;
        let landed = shared.sync();
        publish_landed(&self.events_tx, landed);

        let changed = shared.store.active_session_id() != Some(session_id);
        let switched = shared.store.switch_to(session_id);
        if switched && changed {
            self.emit(ChatEvent::ActiveChanged {
                session_id: Some(session_id.to_string()),
            });
        }
        switched
    }

    /// See [`SessionStore::delete_session`]
    pub async fn delete_session(&self, session_id: &str) -> bool {
        let mut shared = self.shared.write().await;
        let landed = shared.sync();
        publish_landed(&self.events_tx, landed);

        let was_active = shared.store.active_session_id() == Some(session_id);
        let deleted = shared.store.delete_session(session_id);
        if deleted {
            self.emit(ChatEvent::SessionDeleted {
                session_id: session_id.to_string(),
            });
            if was_active {
                self.emit(ChatEvent::ActiveChanged { session_id: None });
            }
        }
        deleted
    }

    /// Copy of the sessions and active pointer
    pub async fn snapshot(&self) -> ChatSnapshot {
        let shared = self.shared.read().await;
        ChatSnapshot {
            sessions: shared.store.sessions().to_vec(),
            active_session_id: shared.store.active_session_id().map(ToString::to_string),
        }
    }

    /// Number of appends still waiting on the timeline
    pub async fn pending(&self) -> usize {
        self.shared.read().await.store.pending()
    }

    fn emit(&self, event: ChatEvent) {
        // Nobody listening is fine.
        let _ = self.events_tx.send(event);
    }
}

fn publish_landed(events_tx: &mpsc::UnboundedSender<ChatEvent>, landed: Vec<Landed>) {
    for Landed {
        session_id,
        message,
    } in landed
    {
        let _ = events_tx.send(ChatEvent::MessageAppended {
            session_id,
            message,
        });
    }
}

/// Handle for the background task (to avoid circular references)
struct ChatServiceHandle {
    shared: Arc<RwLock<Shared>>,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    wake: Arc<Notify>,
    running: Arc<RwLock<bool>>,
}

impl ChatServiceHandle {
    async fn run_loop(&self) {
        debug!("Chat timeline loop started");

        loop {
            if !*self.running.read().await {
                break;
            }

            let wait = {
                let shared = self.shared.read().await;
                let virtual_now = shared.store.now() + shared.last_sync.elapsed();
                shared
                    .store
                    .next_due()
                    .map(|due| due.saturating_sub(virtual_now))
            };

            match wait {
                Some(delay) => {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.wake.notified() => {}
                    }
                }
                None => self.wake.notified().await,
            }

            let mut shared = self.shared.write().await;
            let landed = shared.sync();
            if !landed.is_empty() {
                debug!("{} deferred message(s) landed", landed.len());
            }
            publish_landed(&self.events_tx, landed);
        }

        debug!("Chat timeline loop stopped");
    }
}
