//! Live-set semantics: a running pass observes mutations made by its own
//! in-flight actions.

use ferrous_dispose::{DisposalController, DisposalEntry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_entry_removed_mid_pass_before_its_turn_is_skipped() {
    let controller = Arc::new(DisposalController::new());
    let victim_ran = Arc::new(AtomicBool::new(false));

    // The first callback removes the second entry before iteration reaches it.
    let victim_slot: Arc<Mutex<Option<DisposalEntry>>> = Arc::new(Mutex::new(None));

    let slot = victim_slot.clone();
    let controller_clone = controller.clone();
    controller.add_callback(move || {
        if let Some(victim) = slot.lock().unwrap().as_ref() {
            assert!(controller_clone.delete(victim));
        }
    });

    let ran = victim_ran.clone();
    let victim = controller.add_callback(move || ran.store(true, Ordering::SeqCst));
    *victim_slot.lock().unwrap() = Some(victim);

    controller.dispose().unwrap();
    assert!(!victim_ran.load(Ordering::SeqCst));
    assert!(controller.disposed());
}

#[test]
fn test_entry_added_mid_pass_runs_in_same_pass() {
    let controller = Arc::new(DisposalController::new());
    let late_ran = Arc::new(AtomicBool::new(false));

    let controller_clone = controller.clone();
    let late = late_ran.clone();
    controller.add_callback(move || {
        let late = late.clone();
        controller_clone.add_callback(move || late.store(true, Ordering::SeqCst));
    });

    controller.dispose().unwrap();
    assert!(late_ran.load(Ordering::SeqCst));

    // The mid-pass registration is a real entry, still held by the set.
    assert_eq!(controller.len(), 2);
}

#[test]
fn test_self_removal_does_not_disturb_the_pass() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let controller = Arc::new(DisposalController::new());

    let entry_slot: Arc<Mutex<Option<DisposalEntry>>> = Arc::new(Mutex::new(None));
    let slot = entry_slot.clone();
    let controller_clone = controller.clone();
    let order_clone = order.clone();
    let first = controller.add_callback(move || {
        order_clone.lock().unwrap().push("first");
        if let Some(me) = slot.lock().unwrap().take() {
            controller_clone.delete(&me);
        }
    });
    *entry_slot.lock().unwrap() = Some(first);

    let order_clone = order.clone();
    controller.add_callback(move || order_clone.lock().unwrap().push("second"));

    controller.dispose().unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(controller.len(), 1);
}

#[tokio::test]
async fn test_async_pass_observes_mid_pass_removal() {
    let controller = Arc::new(DisposalController::new());
    let victim_ran = Arc::new(AtomicBool::new(false));
    let victim_slot: Arc<Mutex<Option<DisposalEntry>>> = Arc::new(Mutex::new(None));

    let slot = victim_slot.clone();
    let controller_clone = controller.clone();
    controller.add_async_callback(move || {
        let slot = slot.clone();
        let controller = controller_clone.clone();
        async move {
            tokio::task::yield_now().await;
            if let Some(victim) = slot.lock().unwrap().as_ref() {
                controller.delete(victim);
            }
        }
    });

    let ran = victim_ran.clone();
    let victim = controller.add_callback(move || ran.store(true, Ordering::SeqCst));
    *victim_slot.lock().unwrap() = Some(victim);

    controller.dispose_async().await.unwrap();
    assert!(!victim_ran.load(Ordering::SeqCst));
}
