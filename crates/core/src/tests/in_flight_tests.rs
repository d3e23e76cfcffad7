// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ActionKind, InFlightGuards, InFlightKey, QuoteAction};

#[test]
fn test_second_acquire_for_same_key_is_refused() {
    let guards = InFlightGuards::new();
    let key = InFlightKey::new(ActionKind::MarkCompleted, "q-1");

    let first = guards.try_acquire(key.clone());
    assert!(first.is_some());
    assert!(guards.is_in_flight(&key));
    assert!(guards.try_acquire(key.clone()).is_none());

    drop(first);
    assert!(!guards.is_in_flight(&key));
    assert!(guards.try_acquire(key).is_some());
}

#[test]
fn test_keys_differ_by_kind_and_entity() {
    let guards = InFlightGuards::new();

    let _complete = guards
        .try_acquire(InFlightKey::new(ActionKind::MarkCompleted, "q-1"))
        .unwrap();
    let _cancel = guards
        .try_acquire(InFlightKey::new(ActionKind::Cancel, "q-1"))
        .unwrap();
    let _other = guards
        .try_acquire(InFlightKey::new(ActionKind::MarkCompleted, "q-2"))
        .unwrap();

    assert_eq!(guards.len(), 3);
}

#[test]
fn test_clones_share_the_same_set() {
    let guards = InFlightGuards::new();
    let clone = guards.clone();
    let _held = guards
        .try_acquire(InFlightKey::new(ActionKind::AcceptAndPay, "q-1"))
        .unwrap();

    assert!(
        clone
            .try_acquire(InFlightKey::new(ActionKind::AcceptAndPay, "q-1"))
            .is_none()
    );
}

#[test]
fn test_key_from_action() {
    let action = QuoteAction::CloseDispute {
        dispute_id: String::from("d-4"),
    };
    let key = InFlightKey::from(&action);
    assert_eq!(key.kind, ActionKind::CloseDispute);
    assert_eq!(key.entity_id, "d-4");
    assert_eq!(key.to_string(), "close_dispute:d-4");
    assert!(key.kind.targets_dispute());
}
