use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, PolicyId};
use crate::currency::CurrencyCode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicyType {
    Personal,
    Team,
    Corporate,
}

/// `Optional` is "submit and close": reports never wait on an approver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ApprovalMode {
    Optional,
    #[default]
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AutoReportingFrequency {
    Instant,
    Immediate,
    Weekly,
    #[default]
    Monthly,
    Manual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReimbursementChoice {
    /// Direct reimbursement through a connected bank account.
    Yes,
    No,
    /// Reimbursed outside the product ("pay elsewhere").
    #[default]
    Manual,
}

/// Accounting integrations, in the order they are checked for a connection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectionName {
    QuickbooksOnline,
    QuickbooksDesktop,
    Xero,
    NetSuite,
    SageIntacct,
}

impl ConnectionName {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionName::QuickbooksOnline => "QuickBooks Online",
            ConnectionName::QuickbooksDesktop => "QuickBooks Desktop",
            ConnectionName::Xero => "Xero",
            ConnectionName::NetSuite => "NetSuite",
            ConnectionName::SageIntacct => "Sage Intacct",
        }
    }
}

/// Workspace configuration a report belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub policy_id: PolicyId,
    pub policy_type: PolicyType,
    #[serde(default)]
    pub admin_account_ids: BTreeSet<AccountId>,
    #[serde(default)]
    pub approval_mode: ApprovalMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_approver: Option<AccountId>,
    #[serde(default)]
    pub prevent_self_approval: bool,
    #[serde(default)]
    pub auto_reporting: AutoReportingFrequency,
    /// Scheduled submit.
    #[serde(default)]
    pub harvesting_enabled: bool,
    #[serde(default)]
    pub reimbursement_choice: ReimbursementChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reimburser_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reimbursement_limit: Option<i64>,
    #[serde(default)]
    pub connections: Vec<ConnectionName>,
    #[serde(default)]
    pub output_currency: CurrencyCode,
}

impl Policy {
    pub fn new(policy_type: PolicyType) -> Self {
        Self {
            policy_id: Uuid::new_v4(),
            policy_type,
            admin_account_ids: BTreeSet::new(),
            approval_mode: ApprovalMode::default(),
            default_approver: None,
            prevent_self_approval: false,
            auto_reporting: AutoReportingFrequency::default(),
            harvesting_enabled: false,
            reimbursement_choice: ReimbursementChoice::default(),
            reimburser_email: None,
            auto_reimbursement_limit: None,
            connections: Vec::new(),
            output_currency: CurrencyCode::default(),
        }
    }

    pub fn with_admin(mut self, account_id: AccountId) -> Self {
        self.admin_account_ids.insert(account_id);
        self
    }
}
