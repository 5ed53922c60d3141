//! Live-query subscription integration tests.
//!
//! Callbacks forward snapshots into std mpsc channels; tests block on
//! `recv_timeout` so they pass deterministically without sleeping for a
//! fixed interval.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use facrev_core::traits::storage::{IFacultyStore, ISettingsStore, IUserStore};
use facrev_core::{Faculty, Role, SiteSettingsUpdate, User};
use facrev_service::subscriptions::{LiveQuery, Snapshot, SubscriptionHub};
use facrev_storage::StorageEngine;

const WAIT: Duration = Duration::from_secs(5);

fn fixture() -> (Arc<StorageEngine>, SubscriptionHub) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let hub = SubscriptionHub::new(Arc::clone(&engine));
    (engine, hub)
}

fn student(id: &str, email: &str) -> User {
    User::new(id.to_string(), email.to_string(), Role::Student, None)
}

#[test]
fn subscribe_delivers_initial_snapshot_synchronously() {
    let (engine, hub) = fixture();
    engine
        .create_faculty(&Faculty::new_listing("Dr. Rao", "SCOPE", "Professor"))
        .unwrap();

    let (tx, rx) = mpsc::channel();
    let _sub = hub
        .subscribe(LiveQuery::AllFaculty, move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();

    // The initial snapshot is delivered before subscribe returns.
    let snap = rx.try_recv().unwrap();
    match snap {
        Snapshot::Faculty(list) => assert_eq!(list.len(), 1),
        other => panic!("unexpected snapshot: {other:?}"),
    }
}

#[test]
fn mutation_pushes_fresh_snapshot() {
    let (engine, hub) = fixture();

    let (tx, rx) = mpsc::channel();
    let _sub = hub
        .subscribe(LiveQuery::AllFaculty, move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();
    let Snapshot::Faculty(initial) = rx.recv_timeout(WAIT).unwrap() else {
        panic!("wrong snapshot kind");
    };
    assert!(initial.is_empty());

    engine
        .create_faculty(&Faculty::new_listing("Dr. Rao", "SCOPE", "Professor"))
        .unwrap();

    let Snapshot::Faculty(updated) = rx.recv_timeout(WAIT).unwrap() else {
        panic!("wrong snapshot kind");
    };
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].name, "Dr. Rao");
}

#[test]
fn unrelated_collection_does_not_fire() {
    let (engine, hub) = fixture();

    let (tx, rx) = mpsc::channel();
    let _sub = hub
        .subscribe(LiveQuery::ChatMessages, move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();
    rx.recv_timeout(WAIT).unwrap(); // initial

    engine
        .create_faculty(&Faculty::new_listing("Dr. Rao", "SCOPE", "Professor"))
        .unwrap();

    assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
}

#[test]
fn cancelled_subscription_never_fires_again() {
    let (engine, hub) = fixture();

    let (tx, rx) = mpsc::channel();
    let sub = hub
        .subscribe(LiveQuery::AllFaculty, move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();
    rx.recv_timeout(WAIT).unwrap(); // initial

    assert!(sub.is_active());
    sub.cancel();
    sub.cancel(); // idempotent
    assert!(!sub.is_active());

    engine
        .create_faculty(&Faculty::new_listing("Dr. Rao", "SCOPE", "Professor"))
        .unwrap();

    assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
}

#[test]
fn cancel_during_write_burst_never_fires_after_cancel() {
    let (engine, hub) = fixture();

    let (tx, rx) = mpsc::channel();
    let sub = hub
        .subscribe(LiveQuery::AllFaculty, move |snap| {
            let _ = tx.send(snap);
        })
        .unwrap();
    rx.recv_timeout(WAIT).unwrap(); // initial

    // Keep mutations flowing from another thread while we cancel.
    let writer_engine = Arc::clone(&engine);
    let writer = std::thread::spawn(move || {
        for i in 0..50 {
            writer_engine
                .create_faculty(&Faculty::new_listing(
                    &format!("Dr. {i}"),
                    "SCOPE",
                    "Professor",
                ))
                .unwrap();
        }
    });

    sub.cancel();
    // Cancel blocks on any in-flight dispatch, so everything already
    // queued for this subscriber has been delivered by now.
    while rx.try_recv().is_ok() {}

    writer.join().unwrap();
    assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
}

#[test]
fn user_document_subscription_observes_deactivation() {
    let (engine, hub) = fixture();
    let user = student("u1", "ravi@vitstudent.ac.in");
    engine.create_user(&user).unwrap();

    let (tx, rx) = mpsc::channel();
    let _sub = hub
        .subscribe(LiveQuery::UserDocument("u1".to_string()), move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();
    let Snapshot::User(Some(initial)) = rx.recv_timeout(WAIT).unwrap() else {
        panic!("expected the user document");
    };
    assert!(initial.is_active);

    engine.set_active("u1", false).unwrap();

    // Coalescing may fold several events together, but the final observed
    // state must show the deactivation.
    let mut last = None;
    while let Ok(snap) = rx.recv_timeout(WAIT) {
        let done = matches!(&snap, Snapshot::User(Some(u)) if !u.is_active);
        last = Some(snap);
        if done {
            break;
        }
    }
    match last {
        Some(Snapshot::User(Some(u))) => assert!(!u.is_active),
        other => panic!("deactivation never observed: {other:?}"),
    }
}

#[test]
fn settings_subscription_sees_toggle() {
    let (engine, hub) = fixture();

    let (tx, rx) = mpsc::channel();
    let _sub = hub
        .subscribe(LiveQuery::Settings, move |snap| {
            tx.send(snap).unwrap();
        })
        .unwrap();
    let Snapshot::Settings(initial) = rx.recv_timeout(WAIT).unwrap() else {
        panic!("wrong snapshot kind");
    };
    assert!(initial.is_chat_enabled);

    engine
        .update_settings(&SiteSettingsUpdate {
            is_chat_enabled: Some(false),
            is_about_page_enabled: None,
        })
        .unwrap();

    let Snapshot::Settings(updated) = rx.recv_timeout(WAIT).unwrap() else {
        panic!("wrong snapshot kind");
    };
    assert!(!updated.is_chat_enabled);
    assert!(updated.is_about_page_enabled);
}

#[test]
fn two_subscribers_on_same_collection_both_fire() {
    let (engine, hub) = fixture();

    let (tx1, rx1) = mpsc::channel();
    let (tx2, rx2) = mpsc::channel();
    let _a = hub
        .subscribe(LiveQuery::Students, move |snap| {
            tx1.send(snap).unwrap();
        })
        .unwrap();
    let _b = hub
        .subscribe(LiveQuery::Students, move |snap| {
            tx2.send(snap).unwrap();
        })
        .unwrap();
    rx1.recv_timeout(WAIT).unwrap();
    rx2.recv_timeout(WAIT).unwrap();

    engine
        .create_user(&student("u1", "ravi@vitstudent.ac.in"))
        .unwrap();

    for rx in [&rx1, &rx2] {
        let Snapshot::Users(users) = rx.recv_timeout(WAIT).unwrap() else {
            panic!("wrong snapshot kind");
        };
        assert_eq!(users.len(), 1);
    }
}
