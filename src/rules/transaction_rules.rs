use crate::domain::{
    AccountId, Policy, ReceiptState, Report, RterType, Transaction, TransactionSource,
    TransactionStatus, Violation,
};

use super::{
    policy_rules::{is_instant_submit_enabled, is_policy_admin},
    report_rules::{is_open_expense_report, is_processing_report},
};

pub fn is_on_hold(transaction: Option<&Transaction>) -> bool {
    transaction.is_some_and(|t| t.on_hold)
}

/// Flagged as a possible duplicate and not yet dismissed.
pub fn is_duplicate(transaction: Option<&Transaction>) -> bool {
    transaction.is_some_and(|t| {
        t.violations
            .iter()
            .any(|v| matches!(v, Violation::Duplicated { dismissed: false }))
    })
}

pub fn is_pending(transaction: &Transaction) -> bool {
    transaction.status == TransactionStatus::Pending
}

pub fn is_expensify_card_transaction(transaction: &Transaction) -> bool {
    transaction.source == TransactionSource::ExpensifyCard
}

pub fn has_receipt(transaction: &Transaction) -> bool {
    transaction.receipt.is_some()
}

pub fn is_receipt_being_scanned(transaction: &Transaction) -> bool {
    matches!(
        transaction.receipt.as_ref().map(|r| r.state),
        Some(ReceiptState::ScanReady | ReceiptState::Scanning)
    )
}

pub fn is_pay_at_end_expense(transaction: Option<&Transaction>) -> bool {
    use crate::domain::BookingPaymentType;

    transaction
        .and_then(|t| t.booking.as_ref())
        .is_some_and(|b| b.payment_type == BookingPaymentType::PayAtEnd)
}

pub fn has_pending_rter_violation(transaction: &Transaction) -> bool {
    transaction.violations.iter().any(|v| {
        matches!(
            v,
            Violation::Rter {
                pending_pattern: true,
                ..
            }
        )
    })
}

/// True only for a non-empty set where every transaction awaits a card match.
pub fn all_have_pending_rter_violation(transactions: &[&Transaction]) -> bool {
    !transactions.is_empty() && transactions.iter().all(|t| has_pending_rter_violation(t))
}

pub fn has_broken_connection_violation(transactions: &[&Transaction]) -> bool {
    transactions.iter().any(|t| {
        t.violations.iter().any(|v| {
            matches!(
                v,
                Violation::Rter {
                    rter_type: Some(
                        RterType::BrokenCardConnection | RterType::BrokenCardConnection530
                    ),
                    ..
                }
            )
        })
    })
}

/// Admins only see the violation while the report is still theirs to act on:
/// a draft, or a submitted report on an instant-submit workspace.
pub fn should_show_broken_connection_violation(
    transactions: &[&Transaction],
    report: Option<&Report>,
    policy: Option<&Policy>,
    account_id: Option<AccountId>,
) -> bool {
    if !has_broken_connection_violation(transactions) {
        return false;
    }
    !is_policy_admin(policy, account_id)
        || is_open_expense_report(report)
        || (is_processing_report(report) && is_instant_submit_enabled(policy))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::currency::CurrencyCode;
    use crate::domain::{AutoReportingFrequency, PolicyType, ReportStatus, ReportType};

    fn txn() -> Transaction {
        Transaction::new(Uuid::new_v4(), -1_000, CurrencyCode::default())
    }

    fn broken() -> Violation {
        Violation::Rter {
            pending_pattern: false,
            rter_type: Some(RterType::BrokenCardConnection530),
        }
    }

    #[test]
    fn dismissed_duplicates_do_not_count() {
        let flagged = txn().with_violation(Violation::Duplicated { dismissed: false });
        let dismissed = txn().with_violation(Violation::Duplicated { dismissed: true });
        assert!(is_duplicate(Some(&flagged)));
        assert!(!is_duplicate(Some(&dismissed)));
        assert!(!is_duplicate(None));
    }

    #[test]
    fn scanning_covers_scan_ready_and_scanning() {
        assert!(is_receipt_being_scanned(&txn().with_receipt(ReceiptState::ScanReady)));
        assert!(is_receipt_being_scanned(&txn().with_receipt(ReceiptState::Scanning)));
        assert!(!is_receipt_being_scanned(&txn().with_receipt(ReceiptState::ScanComplete)));
        assert!(!is_receipt_being_scanned(&txn()));
    }

    #[test]
    fn pending_rter_needs_every_transaction() {
        let pending = txn().with_violation(Violation::Rter {
            pending_pattern: true,
            rter_type: Some(RterType::SevenDayPending),
        });
        let clean = txn();
        assert!(all_have_pending_rter_violation(&[&pending]));
        assert!(!all_have_pending_rter_violation(&[&pending, &clean]));
        assert!(!all_have_pending_rter_violation(&[]));
    }

    #[test]
    fn admins_see_broken_connection_only_on_actionable_reports() {
        let t = txn().with_violation(broken());
        let mut policy = Policy::new(PolicyType::Corporate).with_admin(1);
        let mut report = crate::domain::Report::new(
            ReportType::Expense,
            2,
            policy.policy_id,
            Uuid::new_v4(),
        );

        // Non-admin always sees it.
        assert!(should_show_broken_connection_violation(
            &[&t],
            Some(&report),
            Some(&policy),
            Some(2)
        ));

        report.status = ReportStatus::Submitted;
        assert!(!should_show_broken_connection_violation(
            &[&t],
            Some(&report),
            Some(&policy),
            Some(1)
        ));

        policy.auto_reporting = AutoReportingFrequency::Instant;
        assert!(should_show_broken_connection_violation(
            &[&t],
            Some(&report),
            Some(&policy),
            Some(1)
        ));
    }
}
