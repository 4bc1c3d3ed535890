mod common;

use std::{cell::RefCell, rc::Rc};

use common::*;
use money_report_core::{
    domain::{IouType, Loadable, ReportAction, ReportStatus, Session, ThreadReport},
    flows::{HeaderController, NavigatingHeader, RecordingNavigator, Route},
    store::{HeaderKey, JsonStore, MemoryStore, StoreBackend, StoreContents},
};
use uuid::Uuid;

/// Store holding one draft with a single held expense and its thread.
fn seeded_store() -> (MemoryStore, HeaderKey) {
    let policy = team_policy();
    let report = expense_report(&policy, ReportStatus::Open, 10_000);
    let transaction = expense(&report, 10_000).held();
    let action = ReportAction::money_request(OWNER, IouType::Create, transaction.transaction_id);
    let thread = ThreadReport {
        report_id: Uuid::new_v4(),
        parent_report_action_id: Some(action.report_action_id),
    };
    let key = HeaderKey::report(report.report_id).with_thread(thread.report_id);

    let mut contents = StoreContents::default();
    contents
        .report_actions
        .insert(report.report_id, vec![action]);
    contents.policies.insert(policy.policy_id, policy);
    contents
        .transactions
        .insert(transaction.transaction_id, transaction);
    contents.threads.insert(thread.report_id, thread);
    contents.reports.insert(report.report_id, report);
    contents.session = Some(Session::new(OWNER, "owner@example.com"));
    (MemoryStore::from_contents(contents), key)
}

#[test]
fn contents_survive_a_json_round_trip() {
    let (store, key) = seeded_store();
    let backend = JsonStore::new(temp_path("store.json"));
    backend.save(store.contents()).unwrap();

    let loaded = backend.load().unwrap();
    assert_eq!(&loaded, store.contents());
    assert_eq!(
        MemoryStore::from_contents(loaded).snapshot_for(key),
        store.snapshot_for(key)
    );
}

#[test]
fn hold_explanation_navigates_once_after_dismissal_state_loads() {
    let (mut store, key) = seeded_store();
    let header = Rc::new(RefCell::new(NavigatingHeader::new(
        HeaderController::new(),
        RecordingNavigator::default(),
    )));
    store.subscribe(key, header.clone());
    assert!(header.borrow().navigator.routes.is_empty());

    store.set_dismissed_hold_use_explanation(Loadable::Loaded(false));
    store.set_offline(true);
    store.set_offline(false);

    assert_eq!(
        header.borrow().navigator.routes,
        vec![Route::ProcessMoneyRequestHold { back_to: None }]
    );

    store.set_dismissed_hold_use_explanation(Loadable::Loaded(true));
    assert_eq!(header.borrow().navigator.routes.len(), 1);
}

#[test]
fn store_update_force_closes_delete_prompt() {
    let (mut store, key) = seeded_store();
    let header = Rc::new(RefCell::new(NavigatingHeader::new(
        HeaderController::new(),
        RecordingNavigator::default(),
    )));
    store.subscribe(key, header.clone());
    assert!(header.borrow_mut().controller.request_delete());

    let mut report = store
        .snapshot_for(key)
        .report
        .expect("report in store");
    report.status = ReportStatus::Approved;
    store.put_report(report);

    let header = header.borrow();
    assert!(!header.controller.state().is_delete_modal_visible);
    assert!(header
        .last_observation
        .as_ref()
        .is_some_and(|o| o.closed_delete_prompt));
}

#[test]
fn writes_for_other_reports_still_republish_latest_state() {
    let (mut store, key) = seeded_store();
    let header = Rc::new(RefCell::new(NavigatingHeader::new(
        HeaderController::new(),
        RecordingNavigator::default(),
    )));
    store.subscribe(key, header.clone());

    let policy = team_policy();
    store.put_report(expense_report(&policy, ReportStatus::Open, 1));

    let header = header.borrow();
    let observation = header.last_observation.as_ref().expect("observed");
    assert_eq!(observation.decision.displayed_amount, "$100.00");
}
