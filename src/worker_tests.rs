//! Tests for the backend worker thread

use super::*;
use std::time::Duration;

use crate::backend::{MemoryBackend, Operation};
use crate::model::Category;

const TIMEOUT: Duration = Duration::from_secs(5);

fn demo_worker() -> (
    MemoryBackend,
    UnboundedSender<BackendRequest>,
    Receiver<BackendResponse>,
) {
    let backend = MemoryBackend::demo();
    let (tx, rx) = start(BackendClient::Memory(backend.clone()));
    (backend, tx, rx)
}

fn log_in(tx: &UnboundedSender<BackendRequest>, rx: &Receiver<BackendResponse>) -> Session {
    tx.send(BackendRequest::LogIn {
        username: "demo@example.com".to_string(),
        password: "demo".to_string(),
    })
    .unwrap();
    match rx.recv_timeout(TIMEOUT).unwrap() {
        BackendResponse::LoggedIn(Ok(session)) => session,
        other => panic!("Expected LoggedIn, got {:?}", other),
    }
}

#[test]
fn test_log_in_and_restore_session() {
    let (_backend, tx, rx) = demo_worker();
    let session = log_in(&tx, &rx);

    tx.send(BackendRequest::RestoreSession {
        token: session.session_token.clone(),
    })
    .unwrap();

    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        BackendResponse::SessionRestored(Ok(session))
    );
}

#[test]
fn test_load_list_echoes_request_id() {
    let (_backend, tx, rx) = demo_worker();
    let session = log_in(&tx, &rx);

    tx.send(BackendRequest::FindLists {
        session: session.clone(),
    })
    .unwrap();
    let lists = match rx.recv_timeout(TIMEOUT).unwrap() {
        BackendResponse::ListsFound(Ok(lists)) => lists,
        other => panic!("Expected ListsFound, got {:?}", other),
    };

    tx.send(BackendRequest::LoadList {
        request_id: 7,
        session,
        list_id: lists[0].id.clone(),
    })
    .unwrap();

    match rx.recv_timeout(TIMEOUT).unwrap() {
        BackendResponse::ListLoaded {
            request_id,
            list_id,
            result: Ok(Some(list)),
        } => {
            assert_eq!(request_id, 7);
            assert_eq!(list_id, lists[0].id);
            assert_eq!(list.name, "Weekend groceries");
        }
        other => panic!("Expected ListLoaded, got {:?}", other),
    }
}

#[test]
fn test_save_failure_is_reported_with_save_id() {
    let (backend, tx, rx) = demo_worker();
    let session = log_in(&tx, &rx);
    backend.fail_next(Operation::SaveItems, BackendError::Network("down".to_string()));

    let list_id = ListId("any".to_string());
    tx.send(BackendRequest::SaveItems {
        save_id: 3,
        session,
        list_id: list_id.clone(),
        items: vec![ShoppingItem::new("Milk", Category::Dairy)],
    })
    .unwrap();

    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        BackendResponse::ItemsSaved {
            save_id: 3,
            list_id,
            result: Err(BackendError::Network("down".to_string())),
        }
    );
}

#[test]
fn test_requests_run_concurrently() {
    let backend = MemoryBackend::demo();
    let session = {
        let (tx, rx) = start(BackendClient::Memory(backend.clone()));
        log_in(&tx, &rx)
    };

    let slow = backend.clone().with_latency(Duration::from_millis(400));
    let (tx, rx) = start(BackendClient::Memory(slow));
    let started = std::time::Instant::now();
    tx.send(BackendRequest::FindSuggestions {
        session: session.clone(),
        query: "mi".to_string(),
        limit: 5,
    })
    .unwrap();
    tx.send(BackendRequest::FindLists { session }).unwrap();

    rx.recv_timeout(TIMEOUT).unwrap();
    rx.recv_timeout(TIMEOUT).unwrap();
    assert!(started.elapsed() < Duration::from_millis(790));
    assert_eq!(backend.call_count(Operation::FindSuggestions), 1);
    assert_eq!(backend.call_count(Operation::FindLists), 1);
}

#[test]
fn test_suggestions_echo_query() {
    let (_backend, tx, rx) = demo_worker();
    let session = log_in(&tx, &rx);

    tx.send(BackendRequest::FindSuggestions {
        session,
        query: "mil".to_string(),
        limit: 5,
    })
    .unwrap();

    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        BackendResponse::Suggestions {
            query: "mil".to_string(),
            result: Ok(vec!["Milk".to_string(), "Millet".to_string()]),
        }
    );
}

#[test]
fn test_worker_stops_when_sender_dropped() {
    let (_backend, tx, rx) = demo_worker();
    drop(tx);
    assert!(rx.recv_timeout(TIMEOUT).is_err());
}

#[test]
fn test_failure_exposes_backend_error() {
    let failed = BackendResponse::ListDeleted {
        list_id: ListId("l1".to_string()),
        result: Err(BackendError::NotFound),
    };
    assert_eq!(failed.failure(), Some(&BackendError::NotFound));

    assert_eq!(BackendResponse::LoggedOut(Ok(())).failure(), None);
    assert_eq!(BackendResponse::WorkerFailed("boom".to_string()).failure(), None);
}

#[test]
fn test_saves_to_one_list_run_in_send_order() {
    let backend = MemoryBackend::demo();
    let (tx, rx) = start(BackendClient::Memory(backend.clone()));
    let session = log_in(&tx, &rx);
    tx.send(BackendRequest::CreateList {
        session: session.clone(),
        name: "Weekly".to_string(),
    })
    .unwrap();
    let list_id = match rx.recv_timeout(TIMEOUT).unwrap() {
        BackendResponse::ListCreated(Ok(list)) => list.id,
        other => panic!("Expected ListCreated, got {:?}", other),
    };

    let (tx, rx) = start(BackendClient::Memory(
        backend.with_latency(Duration::from_millis(100)),
    ));
    let milk = vec![ShoppingItem::new("Milk", Category::Dairy)];
    let mut milk_and_eggs = milk.clone();
    milk_and_eggs.push(ShoppingItem::new("Eggs", Category::Dairy));
    let started = std::time::Instant::now();
    for (save_id, items) in [(1, milk), (2, milk_and_eggs.clone())] {
        tx.send(BackendRequest::SaveItems {
            save_id,
            session: session.clone(),
            list_id: list_id.clone(),
            items,
        })
        .unwrap();
    }

    let order: Vec<u64> = (0..2)
        .map(|_| match rx.recv_timeout(TIMEOUT).unwrap() {
            BackendResponse::ItemsSaved { save_id, result, .. } => {
                assert_eq!(result, Ok(()));
                save_id
            }
            other => panic!("Expected ItemsSaved, got {:?}", other),
        })
        .collect();
    assert_eq!(order, vec![1, 2]);
    assert!(started.elapsed() >= Duration::from_millis(200));

    tx.send(BackendRequest::LoadList {
        request_id: 9,
        session,
        list_id,
    })
    .unwrap();
    match rx.recv_timeout(TIMEOUT).unwrap() {
        BackendResponse::ListLoaded {
            result: Ok(Some(list)),
            ..
        } => assert_eq!(list.items, milk_and_eggs),
        other => panic!("Expected ListLoaded, got {:?}", other),
    }
}
