use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{HeaderKey, SharedObserver, SubscriptionId};
use crate::{
    domain::{
        ChatReport, InvoiceReceiver, Loadable, NextStep, Policy, PolicyId, Report, ReportAction,
        ReportId, Session, ThreadReport, Transaction, TransactionId,
    },
    engine::HeaderSnapshot,
};

/// Serializable state of every collection the header reads from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreContents {
    #[serde(default)]
    pub reports: BTreeMap<ReportId, Report>,
    #[serde(default)]
    pub chat_reports: BTreeMap<ReportId, ChatReport>,
    #[serde(default)]
    pub threads: BTreeMap<ReportId, ThreadReport>,
    #[serde(default)]
    pub policies: BTreeMap<PolicyId, Policy>,
    #[serde(default)]
    pub transactions: BTreeMap<TransactionId, Transaction>,
    /// Keyed by the report the actions were posted in.
    #[serde(default)]
    pub report_actions: BTreeMap<ReportId, Vec<ReportAction>>,
    #[serde(default)]
    pub next_steps: BTreeMap<ReportId, NextStep>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub dismissed_hold_use_explanation: Loadable<bool>,
    #[serde(default)]
    pub is_offline: bool,
}

impl StoreContents {
    /// Joins the collections into the snapshot one header evaluates.
    pub fn snapshot_for(&self, key: HeaderKey) -> HeaderSnapshot {
        let report = self.reports.get(&key.report_id).cloned();
        let policy = report
            .as_ref()
            .and_then(|r| self.policies.get(&r.policy_id))
            .cloned();
        let chat_report = report
            .as_ref()
            .and_then(|r| self.chat_reports.get(&r.chat_report_id))
            .cloned();
        let receiver_policy = match chat_report.as_ref().and_then(|c| c.invoice_receiver) {
            Some(InvoiceReceiver::Business { policy_id }) => self.policies.get(&policy_id).cloned(),
            _ => None,
        };
        let transaction_thread = key
            .thread_report_id
            .and_then(|id| self.threads.get(&id))
            .cloned();
        let transactions = self
            .transactions
            .values()
            .filter(|t| t.report_id == key.report_id)
            .cloned()
            .collect();

        HeaderSnapshot {
            report,
            policy,
            chat_report,
            transaction_thread,
            report_actions: self
                .report_actions
                .get(&key.report_id)
                .cloned()
                .unwrap_or_default(),
            transactions,
            session: self.session.clone(),
            is_offline: self.is_offline,
            next_step: self.next_steps.get(&key.report_id).cloned(),
            dismissed_hold_use_explanation: self.dismissed_hold_use_explanation.clone(),
            receiver_policy,
        }
    }
}

struct Subscription {
    id: SubscriptionId,
    key: HeaderKey,
    observer: SharedObserver,
}

/// In-process store. Every write republishes the affected headers to their
/// subscribers.
#[derive(Default)]
pub struct MemoryStore {
    contents: StoreContents,
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("contents", &self.contents)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contents(contents: StoreContents) -> Self {
        Self {
            contents,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> &StoreContents {
        &self.contents
    }

    pub fn into_contents(self) -> StoreContents {
        self.contents
    }

    pub fn report(&self, report_id: ReportId) -> Loadable<&Report> {
        self.contents.reports.get(&report_id).into()
    }

    pub fn policy(&self, policy_id: PolicyId) -> Loadable<&Policy> {
        self.contents.policies.get(&policy_id).into()
    }

    pub fn transaction(&self, transaction_id: TransactionId) -> Loadable<&Transaction> {
        self.contents.transactions.get(&transaction_id).into()
    }

    pub fn session(&self) -> Loadable<&Session> {
        self.contents.session.as_ref().into()
    }

    pub fn snapshot_for(&self, key: HeaderKey) -> HeaderSnapshot {
        self.contents.snapshot_for(key)
    }

    /// Registers `observer` for `key` and hands it the current snapshot.
    pub fn subscribe(&mut self, key: HeaderKey, observer: SharedObserver) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let snapshot = self.contents.snapshot_for(key);
        observer.borrow_mut().on_snapshot(&snapshot);
        self.subscriptions.push(Subscription { id, key, observer });
        debug!(?key, subscription = id.0, "header subscribed");
        id
    }

    /// Returns whether a subscription was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    pub fn put_report(&mut self, report: Report) {
        self.contents.reports.insert(report.report_id, report);
        self.publish();
    }

    pub fn remove_report(&mut self, report_id: ReportId) {
        self.contents.reports.remove(&report_id);
        self.publish();
    }

    pub fn put_chat_report(&mut self, chat_report: ChatReport) {
        self.contents
            .chat_reports
            .insert(chat_report.report_id, chat_report);
        self.publish();
    }

    pub fn put_thread(&mut self, thread: ThreadReport) {
        self.contents.threads.insert(thread.report_id, thread);
        self.publish();
    }

    pub fn put_policy(&mut self, policy: Policy) {
        self.contents.policies.insert(policy.policy_id, policy);
        self.publish();
    }

    pub fn put_transaction(&mut self, transaction: Transaction) {
        self.contents
            .transactions
            .insert(transaction.transaction_id, transaction);
        self.publish();
    }

    pub fn remove_transaction(&mut self, transaction_id: TransactionId) {
        self.contents.transactions.remove(&transaction_id);
        self.publish();
    }

    pub fn put_report_action(&mut self, report_id: ReportId, action: ReportAction) {
        let actions = self.contents.report_actions.entry(report_id).or_default();
        match actions
            .iter_mut()
            .find(|a| a.report_action_id == action.report_action_id)
        {
            Some(existing) => *existing = action,
            None => actions.push(action),
        }
        self.publish();
    }

    pub fn put_next_step(&mut self, report_id: ReportId, next_step: NextStep) {
        self.contents.next_steps.insert(report_id, next_step);
        self.publish();
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.contents.session = session;
        self.publish();
    }

    pub fn set_dismissed_hold_use_explanation(&mut self, value: Loadable<bool>) {
        self.contents.dismissed_hold_use_explanation = value;
        self.publish();
    }

    pub fn set_offline(&mut self, is_offline: bool) {
        self.contents.is_offline = is_offline;
        self.publish();
    }

    /// Applies several writes and publishes once.
    pub fn batch(&mut self, apply: impl FnOnce(&mut StoreContents)) {
        apply(&mut self.contents);
        self.publish();
    }

    fn publish(&mut self) {
        let snapshots: Vec<HeaderSnapshot> = self
            .subscriptions
            .iter()
            .map(|s| self.contents.snapshot_for(s.key))
            .collect();
        for (subscription, snapshot) in self.subscriptions.iter().zip(snapshots.iter()) {
            subscription.observer.borrow_mut().on_snapshot(snapshot);
        }
    }
}
