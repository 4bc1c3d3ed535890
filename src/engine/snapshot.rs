use serde::{Deserialize, Serialize};

use crate::domain::{
    AccountId, ChatReport, Loadable, NextStep, Policy, Report, ReportAction, Session,
    ThreadReport, Transaction,
};

/// Everything the engine reads, captured at one instant. Missing entities are
/// `None` and simply switch the features that need them off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeaderSnapshot {
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub policy: Option<Policy>,
    #[serde(default)]
    pub chat_report: Option<ChatReport>,
    #[serde(default)]
    pub transaction_thread: Option<ThreadReport>,
    #[serde(default)]
    pub report_actions: Vec<ReportAction>,
    /// Transactions belonging to `report`.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub is_offline: bool,
    #[serde(default)]
    pub next_step: Option<NextStep>,
    #[serde(default)]
    pub dismissed_hold_use_explanation: Loadable<bool>,
    /// Workspace of a business invoice receiver, when the report is an invoice.
    #[serde(default)]
    pub receiver_policy: Option<Policy>,
}

impl HeaderSnapshot {
    pub fn current_account_id(&self) -> Option<AccountId> {
        self.session.as_ref().map(|s| s.account_id)
    }

    /// The report action the open transaction thread hangs off.
    pub fn originating_action(&self) -> Option<&ReportAction> {
        let parent_id = self.transaction_thread.as_ref()?.parent_report_action_id?;
        self.report_actions
            .iter()
            .find(|action| action.report_action_id == parent_id)
    }

    /// The transaction named by the originating money request action.
    pub fn subject_transaction(&self) -> Option<&Transaction> {
        let action = self.originating_action().filter(|a| a.is_money_request())?;
        let transaction_id = action.iou_transaction_id()?;
        self.transactions
            .iter()
            .find(|t| t.transaction_id == transaction_id)
    }

    /// Transactions checked for card-match and connection violations. Empty
    /// when no transaction thread is open.
    pub fn subject_transactions(&self) -> Vec<&Transaction> {
        self.subject_transaction().into_iter().collect()
    }
}
