use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReportId, TransactionId};
use crate::currency::CurrencyCode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    #[default]
    Posted,
    Pending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionSource {
    #[default]
    Manual,
    ExpensifyCard,
    CompanyCard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReceiptState {
    Open,
    ScanReady,
    Scanning,
    ScanComplete,
    ScanFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub state: ReceiptState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingPaymentType {
    PayAtEnd,
    PayAtBooking,
}

/// Travel reservation attached to an expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub payment_type: BookingPaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Offline write not yet acknowledged by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PendingAction {
    Add,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RterType {
    BrokenCardConnection,
    BrokenCardConnection530,
    SevenDayPending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Violation {
    Duplicated {
        #[serde(default)]
        dismissed: bool,
    },
    /// Real-time expense resolution: a card charge awaiting match.
    Rter {
        #[serde(default)]
        pending_pattern: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rter_type: Option<RterType>,
    },
    Other {
        code: String,
    },
}

/// A single expense line. `amount` is in minor units, negated on expense
/// reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub report_id: ReportId,
    pub amount: i64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub on_hold: bool,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub source: TransactionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_action: Option<PendingAction>,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl Transaction {
    pub fn new(report_id: ReportId, amount: i64, currency: CurrencyCode) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            report_id,
            amount,
            currency,
            on_hold: false,
            status: TransactionStatus::Posted,
            source: TransactionSource::Manual,
            receipt: None,
            booking: None,
            pending_action: None,
            violations: Vec::new(),
        }
    }

    pub fn held(mut self) -> Self {
        self.on_hold = true;
        self
    }

    pub fn with_receipt(mut self, state: ReceiptState) -> Self {
        self.receipt = Some(Receipt { state, source: None });
        self
    }

    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.violations.push(violation);
        self
    }
}
