use serde::{Deserialize, Serialize};

use crate::domain::{ArchiveReason, TransactionId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusIcon {
    Hourglass,
    Box,
    Stopwatch,
    CreditCardHourglass,
    ReceiptScan,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BrokenConnectionAudience {
    Admin,
    Member,
}

/// The single banner shown under the header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "banner", rename_all = "snake_case")]
pub enum StatusBanner {
    BookingPending,
    BookingArchived,
    ExpensesOnHold,
    BrokenConnection {
        transaction_id: Option<TransactionId>,
        audience: BrokenConnectionAudience,
    },
    PendingMatchWithCreditCard,
    TransactionPending,
    ReceiptScanInProgress,
}

impl StatusBanner {
    pub fn icon(&self) -> StatusIcon {
        match self {
            StatusBanner::BookingPending => StatusIcon::Hourglass,
            StatusBanner::BookingArchived => StatusIcon::Box,
            StatusBanner::ExpensesOnHold => StatusIcon::Stopwatch,
            StatusBanner::BrokenConnection { .. } => StatusIcon::Hourglass,
            StatusBanner::PendingMatchWithCreditCard => StatusIcon::Hourglass,
            StatusBanner::TransactionPending => StatusIcon::CreditCardHourglass,
            StatusBanner::ReceiptScanInProgress => StatusIcon::ReceiptScan,
        }
    }

    /// Translation key for the banner text.
    pub fn message_key(&self) -> &'static str {
        match self {
            StatusBanner::BookingPending => "iou.bookingPendingDescription",
            StatusBanner::BookingArchived => "iou.bookingArchivedDescription",
            StatusBanner::ExpensesOnHold => "iou.expensesOnHold",
            StatusBanner::BrokenConnection {
                audience: BrokenConnectionAudience::Admin,
                ..
            } => "violations.adminBrokenConnectionError",
            StatusBanner::BrokenConnection {
                audience: BrokenConnectionAudience::Member,
                ..
            } => "violations.memberBrokenConnectionError",
            StatusBanner::PendingMatchWithCreditCard => "iou.pendingMatchWithCreditCardDescription",
            StatusBanner::TransactionPending => "iou.transactionPendingDescription",
            StatusBanner::ReceiptScanInProgress => "iou.receiptScanInProgressDescription",
        }
    }

    /// Default English text.
    pub fn description(&self) -> &'static str {
        match self {
            StatusBanner::BookingPending => {
                "This booking is pending because it hasn't been paid yet."
            }
            StatusBanner::BookingArchived => {
                "This booking is archived because the trip date has passed. Add an expense for the final amount if needed."
            }
            StatusBanner::ExpensesOnHold => "All expenses were put on hold.",
            StatusBanner::BrokenConnection {
                audience: BrokenConnectionAudience::Admin,
                ..
            } => "Receipt pending due to broken bank connection. Please resolve in company cards.",
            StatusBanner::BrokenConnection {
                audience: BrokenConnectionAudience::Member,
                ..
            } => {
                "Receipt pending due to broken bank connection. Please ask a workspace admin to resolve, or mark as cash to ignore."
            }
            StatusBanner::PendingMatchWithCreditCard => {
                "Receipt pending match with card transaction. Mark as cash to cancel."
            }
            StatusBanner::TransactionPending => {
                "Transaction pending. It may take a few days to post."
            }
            StatusBanner::ReceiptScanInProgress => {
                "Receipt scan in progress. Check back later or enter the details now."
            }
        }
    }
}

/// Conditions the banner is chosen from.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerConditions {
    pub is_pay_at_end_expense: bool,
    pub is_archived_report: bool,
    pub archive_reason: Option<ArchiveReason>,
    pub has_only_held_expenses: bool,
    pub should_show_broken_connection_violation: bool,
    pub subject_transaction_id: Option<TransactionId>,
    pub is_admin: bool,
    pub has_all_pending_rter_violations: bool,
    pub has_only_pending_transactions: bool,
    pub has_scanning_receipt: bool,
}

/// First matching banner wins. A pay-at-end expense on a report archived for
/// any reason other than the booking ending falls through to the later
/// checks.
pub fn resolve_status_banner(c: &BannerConditions) -> Option<StatusBanner> {
    if c.is_pay_at_end_expense {
        if !c.is_archived_report {
            return Some(StatusBanner::BookingPending);
        }
        if c.archive_reason == Some(ArchiveReason::BookingEndDateHasPassed) {
            return Some(StatusBanner::BookingArchived);
        }
    }
    if c.has_only_held_expenses {
        return Some(StatusBanner::ExpensesOnHold);
    }
    if c.should_show_broken_connection_violation {
        let audience = if c.is_admin {
            BrokenConnectionAudience::Admin
        } else {
            BrokenConnectionAudience::Member
        };
        return Some(StatusBanner::BrokenConnection {
            transaction_id: c.subject_transaction_id,
            audience,
        });
    }
    if c.has_all_pending_rter_violations {
        return Some(StatusBanner::PendingMatchWithCreditCard);
    }
    if c.has_only_pending_transactions {
        return Some(StatusBanner::TransactionPending);
    }
    if c.has_scanning_receipt {
        return Some(StatusBanner::ReceiptScanInProgress);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_beats_everything_else() {
        let conditions = BannerConditions {
            is_pay_at_end_expense: true,
            has_only_held_expenses: true,
            has_scanning_receipt: true,
            ..BannerConditions::default()
        };
        assert_eq!(
            resolve_status_banner(&conditions),
            Some(StatusBanner::BookingPending)
        );
    }

    #[test]
    fn archived_booking_needs_expired_reason() {
        let mut conditions = BannerConditions {
            is_pay_at_end_expense: true,
            is_archived_report: true,
            archive_reason: Some(ArchiveReason::BookingEndDateHasPassed),
            ..BannerConditions::default()
        };
        assert_eq!(
            resolve_status_banner(&conditions),
            Some(StatusBanner::BookingArchived)
        );

        conditions.archive_reason = Some(ArchiveReason::PolicyDeleted);
        assert_eq!(resolve_status_banner(&conditions), None);

        conditions.has_scanning_receipt = true;
        assert_eq!(
            resolve_status_banner(&conditions),
            Some(StatusBanner::ReceiptScanInProgress)
        );
    }

    #[test]
    fn rter_outranks_pending_and_scanning() {
        let conditions = BannerConditions {
            has_all_pending_rter_violations: true,
            has_only_pending_transactions: true,
            has_scanning_receipt: true,
            ..BannerConditions::default()
        };
        let banner = resolve_status_banner(&conditions);
        assert_eq!(banner, Some(StatusBanner::PendingMatchWithCreditCard));
        assert_eq!(banner.map(|b| b.icon()), Some(StatusIcon::Hourglass));
    }

    #[test]
    fn broken_connection_text_depends_on_audience() {
        let conditions = BannerConditions {
            should_show_broken_connection_violation: true,
            is_admin: true,
            ..BannerConditions::default()
        };
        let banner = resolve_status_banner(&conditions).expect("banner");
        assert_eq!(banner.message_key(), "violations.adminBrokenConnectionError");
    }

    #[test]
    fn nothing_to_report_means_no_banner() {
        assert_eq!(resolve_status_banner(&BannerConditions::default()), None);
    }
}
