#![allow(dead_code)]

use std::sync::Mutex;

use money_report_core::{
    currency::CurrencyCode,
    domain::{
        AccountId, ChatReport, IouType, Loadable, Policy, PolicyType, Report, ReportAction,
        ReportStatus, ReportType, Session, ThreadReport, Transaction,
    },
    HeaderSnapshot,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

pub const OWNER: AccountId = 1;
pub const MANAGER: AccountId = 2;
pub const ADMIN: AccountId = 3;
pub const STRANGER: AccountId = 4;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_path(file_name: &str) -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join(file_name);
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn usd() -> CurrencyCode {
    CurrencyCode::new("USD")
}

pub fn team_policy() -> Policy {
    Policy::new(PolicyType::Team).with_admin(ADMIN)
}

/// Expense report owned by [`OWNER`] whose reimbursable total is `amount`
/// minor units. Totals are stored negated, as expense reports keep them.
pub fn expense_report(policy: &Policy, status: ReportStatus, amount: i64) -> Report {
    let mut report = Report::new(ReportType::Expense, OWNER, policy.policy_id, Uuid::new_v4());
    report.status = status;
    report.total = -amount;
    report.unheld_total = Some(-amount);
    report.currency = usd();
    report
}

pub fn expense(report: &Report, amount: i64) -> Transaction {
    Transaction::new(report.report_id, -amount, usd())
}

/// Builder over [`HeaderSnapshot`] for the common report-with-expenses shape.
pub struct SnapshotBuilder {
    snapshot: HeaderSnapshot,
}

impl SnapshotBuilder {
    pub fn new(report: Report, policy: Policy) -> Self {
        let mut chat = ChatReport::new(report.chat_report_id);
        chat.is_policy_expense_chat = true;
        let snapshot = HeaderSnapshot {
            report: Some(report),
            policy: Some(policy),
            chat_report: Some(chat),
            dismissed_hold_use_explanation: Loadable::Loaded(false),
            ..HeaderSnapshot::default()
        };
        Self { snapshot }
    }

    pub fn viewer(mut self, account_id: AccountId) -> Self {
        self.snapshot.session = Some(Session::new(account_id, format!("user{account_id}@example.com")));
        self
    }

    pub fn session(mut self, session: Session) -> Self {
        self.snapshot.session = Some(session);
        self
    }

    pub fn transaction(mut self, transaction: Transaction) -> Self {
        self.snapshot.transactions.push(transaction);
        self
    }

    /// Opens the thread of `transaction` (which must already be added),
    /// created by `actor` as a money request of `iou_type`.
    pub fn thread_for(mut self, transaction_index: usize, actor: AccountId, iou_type: IouType) -> Self {
        let transaction_id = self.snapshot.transactions[transaction_index].transaction_id;
        let action = ReportAction::money_request(actor, iou_type, transaction_id);
        self.snapshot.transaction_thread = Some(ThreadReport {
            report_id: Uuid::new_v4(),
            parent_report_action_id: Some(action.report_action_id),
        });
        self.snapshot.report_actions.push(action);
        self
    }

    pub fn offline(mut self) -> Self {
        self.snapshot.is_offline = true;
        self
    }

    pub fn with(mut self, apply: impl FnOnce(&mut HeaderSnapshot)) -> Self {
        apply(&mut self.snapshot);
        self
    }

    pub fn build(self) -> HeaderSnapshot {
        self.snapshot
    }
}

/// Owner looking at a one-expense draft of `amount` on a team workspace.
pub fn owner_draft(amount: i64) -> SnapshotBuilder {
    let policy = team_policy();
    let report = expense_report(&policy, ReportStatus::Open, amount);
    let transaction = expense(&report, amount);
    SnapshotBuilder::new(report, policy)
        .viewer(OWNER)
        .transaction(transaction)
}

/// Manager looking at a submitted one-expense report on a team workspace.
pub fn manager_submitted(amount: i64) -> SnapshotBuilder {
    let policy = team_policy();
    let mut report = expense_report(&policy, ReportStatus::Submitted, amount);
    report.manager_id = Some(MANAGER);
    let transaction = expense(&report, amount);
    SnapshotBuilder::new(report, policy)
        .viewer(MANAGER)
        .transaction(transaction)
}
