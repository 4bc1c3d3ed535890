//! Read-only entities the eligibility engine consumes. Everything here is
//! owned by external data providers and arrives as snapshots.

pub mod action;
pub mod policy;
pub mod report;
pub mod session;
pub mod transaction;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use action::{IouType, ReportAction, ReportActionKind};
pub use policy::{
    ApprovalMode, AutoReportingFrequency, ConnectionName, Policy, PolicyType, ReimbursementChoice,
};
pub use report::{
    ArchiveReason, ChatReport, InvoiceReceiver, NextStep, Report, ReportStatus, ReportType,
    ThreadReport,
};
pub use session::{DelegateAccess, DelegateRole, Session};
pub use transaction::{
    Booking, BookingPaymentType, PendingAction, Receipt, ReceiptState, RterType, Transaction,
    TransactionSource, TransactionStatus, Violation,
};

pub type AccountId = u64;
pub type ReportId = Uuid;
pub type ReportActionId = Uuid;
pub type TransactionId = Uuid;
pub type PolicyId = Uuid;

/// A value streamed in from a provider: either the latest known snapshot or a
/// marker that the provider has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Loadable<T> {
    NotLoaded,
    Loaded(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::NotLoaded)
    }

    pub fn as_ref(&self) -> Loadable<&T> {
        match self {
            Loadable::NotLoaded => Loadable::NotLoaded,
            Loadable::Loaded(value) => Loadable::Loaded(value),
        }
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            Loadable::NotLoaded => None,
            Loadable::Loaded(value) => Some(value),
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::NotLoaded
    }
}

impl<T> From<Option<T>> for Loadable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Loadable::Loaded(value),
            None => Loadable::NotLoaded,
        }
    }
}
