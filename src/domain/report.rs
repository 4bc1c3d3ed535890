use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, PolicyId, ReportActionId, ReportId};
use crate::currency::CurrencyCode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportType {
    Expense,
    Iou,
    Invoice,
}

/// Workflow position of a money request report. `Open` is the draft state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    Open,
    Submitted,
    Approved,
    Reimbursed,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ArchiveReason {
    Default,
    AccountClosed,
    AccountMerged,
    PolicyDeleted,
    RemovedFromPolicy,
    BookingEndDateHasPassed,
}

/// An expense, IOU, or invoice report. Totals are minor units; expense reports
/// carry them negated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub report_id: ReportId,
    pub report_type: ReportType,
    #[serde(default)]
    pub status: ReportStatus,
    pub owner_account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<AccountId>,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub non_reimbursable_total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unheld_total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unheld_non_reimbursable_total: Option<i64>,
    pub policy_id: PolicyId,
    pub chat_report_id: ReportId,
    #[serde(default)]
    pub is_waiting_on_bank_account: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<ArchiveReason>,
    /// Set while the workspace chat backing this report is still being
    /// created offline.
    #[serde(default)]
    pub pending_create_chat: bool,
}

impl Report {
    pub fn new(
        report_type: ReportType,
        owner_account_id: AccountId,
        policy_id: PolicyId,
        chat_report_id: ReportId,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            report_type,
            status: ReportStatus::Open,
            owner_account_id,
            manager_id: None,
            currency: CurrencyCode::default(),
            total: 0,
            non_reimbursable_total: 0,
            unheld_total: None,
            unheld_non_reimbursable_total: None,
            policy_id,
            chat_report_id,
            is_waiting_on_bank_account: false,
            archived: None,
            pending_create_chat: false,
        }
    }

    pub fn is_expense_report(&self) -> bool {
        self.report_type == ReportType::Expense
    }

    pub fn is_invoice_report(&self) -> bool {
        self.report_type == ReportType::Invoice
    }

    pub fn is_archived(&self) -> bool {
        self.archived.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvoiceReceiver {
    Individual { account_id: AccountId },
    Business { policy_id: PolicyId },
}

/// The chat the money report lives in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReport {
    pub report_id: ReportId,
    #[serde(default)]
    pub is_policy_expense_chat: bool,
    #[serde(default)]
    pub is_own_policy_expense_chat: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_receiver: Option<InvoiceReceiver>,
}

impl ChatReport {
    pub fn new(report_id: ReportId) -> Self {
        Self {
            report_id,
            is_policy_expense_chat: false,
            is_own_policy_expense_chat: false,
            is_archived: false,
            invoice_receiver: None,
        }
    }
}

/// The one-expense thread hanging off a report action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadReport {
    pub report_id: ReportId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_report_action_id: Option<ReportActionId>,
}

/// Advisory "what happens next" message shown under the header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NextStep {
    #[serde(default)]
    pub message: Vec<String>,
}

impl NextStep {
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    pub fn text(&self) -> String {
        self.message.concat()
    }
}
