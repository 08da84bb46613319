//! Backend worker thread
//!
//! Owns a current-thread tokio runtime and runs every [`BackendRequest`] as
//! its own task, so a slow suggestion lookup never holds up a list save.
//! Responses go back to the UI thread over a std channel that the event loop
//! drains once per tick. Requests are never cancelled once sent.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::oneshot;

use crate::backend::{BackendClient, BackendError};
use crate::model::{ListId, ListSummary, ShoppingItem, ShoppingList};
use crate::session::Session;

const WORKER_THREAD_NAME: &str = "shoplist-backend";

/// Work for the backend worker.
#[derive(Debug, Clone)]
pub enum BackendRequest {
    /// Validate a stored session token
    RestoreSession { token: String },
    LogIn { username: String, password: String },
    SignUp { email: String, password: String },
    LogOut { session: Session },
    FindLists { session: Session },
    LoadList {
        request_id: u64,
        session: Session,
        list_id: ListId,
    },
    CreateList { session: Session, name: String },
    RenameList {
        session: Session,
        list_id: ListId,
        name: String,
    },
    DeleteList { session: Session, list_id: ListId },
    /// Replace the whole item sequence of a list
    SaveItems {
        save_id: u64,
        session: Session,
        list_id: ListId,
        items: Vec<ShoppingItem>,
    },
    FindSuggestions {
        session: Session,
        query: String,
        limit: usize,
    },
}

/// Results coming back from the worker, one per request.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    SessionRestored(Result<Session, BackendError>),
    LoggedIn(Result<Session, BackendError>),
    SignedUp(Result<Session, BackendError>),
    LoggedOut(Result<(), BackendError>),
    ListsFound(Result<Vec<ListSummary>, BackendError>),
    ListLoaded {
        request_id: u64,
        list_id: ListId,
        result: Result<Option<ShoppingList>, BackendError>,
    },
    ListCreated(Result<ShoppingList, BackendError>),
    ListRenamed {
        list_id: ListId,
        name: String,
        result: Result<(), BackendError>,
    },
    ListDeleted {
        list_id: ListId,
        result: Result<(), BackendError>,
    },
    ItemsSaved {
        save_id: u64,
        list_id: ListId,
        result: Result<(), BackendError>,
    },
    Suggestions {
        query: String,
        result: Result<Vec<String>, BackendError>,
    },
    /// A request task panicked or the runtime could not start
    WorkerFailed(String),
}

impl BackendResponse {
    /// The backend error this response carries, if any.
    pub fn failure(&self) -> Option<&BackendError> {
        match self {
            BackendResponse::SessionRestored(r)
            | BackendResponse::LoggedIn(r)
            | BackendResponse::SignedUp(r) => r.as_ref().err(),
            BackendResponse::LoggedOut(r)
            | BackendResponse::ListRenamed { result: r, .. }
            | BackendResponse::ListDeleted { result: r, .. }
            | BackendResponse::ItemsSaved { result: r, .. } => r.as_ref().err(),
            BackendResponse::ListsFound(r) => r.as_ref().err(),
            BackendResponse::ListLoaded { result, .. } => result.as_ref().err(),
            BackendResponse::ListCreated(r) => r.as_ref().err(),
            BackendResponse::Suggestions { result, .. } => result.as_ref().err(),
            BackendResponse::WorkerFailed(_) => None,
        }
    }
}

/// Create the channels and start the worker.
pub fn start(client: BackendClient) -> (UnboundedSender<BackendRequest>, Receiver<BackendResponse>) {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(client, request_rx, response_tx);
    (request_tx, response_rx)
}

/// Spawn the worker thread
///
/// Panics on the worker thread are logged instead of printed so they do not
/// corrupt the terminal. The loop ends when every request sender is dropped.
pub fn spawn_worker(
    client: BackendClient,
    request_rx: UnboundedReceiver<BackendRequest>,
    response_tx: Sender<BackendResponse>,
) {
    install_panic_logger();
    log::debug!("starting {} backend worker", client.name());

    let spawned = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let failure_tx = response_tx.clone();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        log::error!("Failed to create tokio runtime: {}", e);
                        let _ = response_tx.send(BackendResponse::WorkerFailed(format!(
                            "Failed to start backend worker: {}",
                            e
                        )));
                        return;
                    }
                };
                rt.block_on(worker_loop(client, request_rx, response_tx));
            }));

            if let Err(payload) = result {
                let message = panic_message(payload.as_ref());
                log::error!("Backend worker thread panicked: {}", message);
                let _ = failure_tx.send(BackendResponse::WorkerFailed(message));
            }
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn backend worker: {}", e);
    }
}

/// Log panics raised on the worker thread; other threads keep the previous
/// hook (which restores the terminal).
fn install_panic_logger() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if std::thread::current().name() == Some(WORKER_THREAD_NAME) {
            log::error!(
                "Backend worker panic: {} at {:?}",
                panic_message(info.payload()),
                info.location()
            );
        } else {
            previous(info);
        }
    }));
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic in backend worker".to_string()
    }
}

async fn worker_loop(
    client: BackendClient,
    mut request_rx: UnboundedReceiver<BackendRequest>,
    response_tx: Sender<BackendResponse>,
) {
    // Whole-list writes to one list must land in the order they were sent;
    // each save waits for the previous save of its list to finish.
    let mut save_chains: HashMap<ListId, oneshot::Receiver<()>> = HashMap::new();

    while let Some(request) = request_rx.recv().await {
        let client = client.clone();
        let response_tx = response_tx.clone();

        let (previous_save, done_tx) = match &request {
            BackendRequest::SaveItems { list_id, .. } => {
                let (done_tx, done_rx) = oneshot::channel();
                (save_chains.insert(list_id.clone(), done_rx), Some(done_tx))
            }
            _ => (None, None),
        };

        tokio::spawn(async move {
            if let Some(previous) = previous_save {
                // Err only means the previous save's task is gone
                let _ = previous.await;
            }
            let response = match tokio::spawn(handle_request(client, request)).await {
                Ok(response) => response,
                Err(e) if e.is_panic() => {
                    BackendResponse::WorkerFailed(panic_message(e.into_panic().as_ref()))
                }
                Err(e) => BackendResponse::WorkerFailed(e.to_string()),
            };
            if let Some(e) = response.failure() {
                log::warn!("backend request failed: {}", e);
            }
            let _ = response_tx.send(response);
            drop(done_tx);
        });
    }
    log::debug!("backend worker stopped");
}

async fn handle_request(client: BackendClient, request: BackendRequest) -> BackendResponse {
    match request {
        BackendRequest::RestoreSession { token } => {
            BackendResponse::SessionRestored(client.current_user(&token).await)
        }
        BackendRequest::LogIn { username, password } => {
            BackendResponse::LoggedIn(client.log_in(&username, &password).await)
        }
        BackendRequest::SignUp { email, password } => {
            BackendResponse::SignedUp(client.sign_up(&email, &password).await)
        }
        BackendRequest::LogOut { session } => {
            BackendResponse::LoggedOut(client.log_out(&session).await)
        }
        BackendRequest::FindLists { session } => {
            BackendResponse::ListsFound(client.find_lists(&session).await)
        }
        BackendRequest::LoadList {
            request_id,
            session,
            list_id,
        } => {
            let result = client.load_list(&session, &list_id).await;
            BackendResponse::ListLoaded {
                request_id,
                list_id,
                result,
            }
        }
        BackendRequest::CreateList { session, name } => {
            BackendResponse::ListCreated(client.create_list(&session, &name).await)
        }
        BackendRequest::RenameList {
            session,
            list_id,
            name,
        } => {
            let result = client.rename_list(&session, &list_id, &name).await;
            BackendResponse::ListRenamed {
                list_id,
                name,
                result,
            }
        }
        BackendRequest::DeleteList { session, list_id } => {
            let result = client.delete_list(&session, &list_id).await;
            BackendResponse::ListDeleted { list_id, result }
        }
        BackendRequest::SaveItems {
            save_id,
            session,
            list_id,
            items,
        } => {
            let result = client.save_items(&session, &list_id, &items).await;
            BackendResponse::ItemsSaved {
                save_id,
                list_id,
                result,
            }
        }
        BackendRequest::FindSuggestions {
            session,
            query,
            limit,
        } => {
            let result = client.find_suggestions(&session, &query, limit).await;
            BackendResponse::Suggestions { query, result }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
