use crate::currency::convert_to_display_string;
use crate::domain::{AccountId, Policy, Report, ReportStatus, Transaction};

use super::transaction_rules::{is_on_hold, is_pay_at_end_expense};

/// Report spend split by reimbursability, normalized to positive amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpendBreakdown {
    pub non_reimbursable_spend: i64,
    pub reimbursable_spend: i64,
    pub total_display_spend: i64,
}

pub fn money_request_spend_breakdown(report: Option<&Report>) -> SpendBreakdown {
    report.and_then(checked_spend_breakdown).unwrap_or_default()
}

/// `None` when the totals cancel out or do not fit after normalization.
fn checked_spend_breakdown(report: &Report) -> Option<SpendBreakdown> {
    let non_reimbursable = report.non_reimbursable_total;
    let total = report.total;
    if non_reimbursable.checked_add(total)? == 0 {
        return None;
    }
    // Expense reports may legitimately go negative (card credits, offsets), so
    // only flip their sign instead of taking the absolute value.
    let (non_reimbursable, total) = if report.is_expense_report() {
        (non_reimbursable.checked_neg()?, total.checked_neg()?)
    } else {
        (non_reimbursable.checked_abs()?, total.checked_abs()?)
    };
    Some(SpendBreakdown {
        non_reimbursable_spend: non_reimbursable,
        reimbursable_spend: total.checked_sub(non_reimbursable)?,
        total_display_spend: total,
    })
}

pub fn is_open_expense_report(report: Option<&Report>) -> bool {
    report.is_some_and(|r| r.is_expense_report() && r.status == ReportStatus::Open)
}

pub fn is_processing_report(report: Option<&Report>) -> bool {
    report.is_some_and(|r| r.status == ReportStatus::Submitted)
}

pub fn is_report_approved(report: Option<&Report>) -> bool {
    report.is_some_and(|r| r.status == ReportStatus::Approved)
}

pub fn is_settled(report: Option<&Report>) -> bool {
    report.is_some_and(|r| r.status == ReportStatus::Reimbursed)
}

pub fn is_archived_report(report: Option<&Report>) -> bool {
    report.is_some_and(Report::is_archived)
}

/// Expenses can be removed until the report is approved, paid, or closed.
pub fn can_delete_transaction(report: Option<&Report>) -> bool {
    report.is_some_and(|r| {
        matches!(r.status, ReportStatus::Open | ReportStatus::Submitted) && !r.is_archived()
    })
}

pub fn has_held_expenses(transactions: &[Transaction]) -> bool {
    transactions.iter().any(|t| t.on_hold)
}

pub fn has_only_held_expenses(transactions: &[Transaction]) -> bool {
    !transactions.is_empty() && transactions.iter().all(|t| t.on_hold)
}

/// Whether the report total reflects every pending offline write. Totals go
/// stale when a pending transaction needs a currency conversion the client
/// cannot do, or when a hold was applied optimistically and the server has not
/// yet returned the unheld total.
pub fn has_updated_total(
    report: Option<&Report>,
    policy: Option<&Policy>,
    transactions: &[Transaction],
) -> bool {
    let Some(report) = report else {
        return true;
    };
    let has_pending_transaction = transactions.iter().any(|t| t.pending_action.is_some());
    let has_transaction_with_different_currency =
        transactions.iter().any(|t| t.currency != report.currency);
    let has_different_workspace_currency = report.pending_create_chat
        && report.is_expense_report()
        && policy.is_some_and(|p| p.output_currency != report.currency);
    let has_optimistic_held_expense =
        has_held_expenses(transactions) && report.unheld_total.is_none();

    !(has_pending_transaction
        && (has_transaction_with_different_currency || has_different_workspace_currency))
        && !has_optimistic_held_expense
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonHeldAndFullAmount {
    pub non_held_minor: i64,
    pub full_minor: i64,
    pub non_held_amount: String,
    pub full_amount: String,
    pub has_valid_non_held_amount: bool,
}

pub fn non_held_and_full_amount(
    report: &Report,
    policy: Option<&Policy>,
    transactions: &[Transaction],
    exclude_non_reimbursables: bool,
) -> NonHeldAndFullAmount {
    let sign: i64 = if report.is_expense_report() { -1 } else { 1 };
    let has_pending_transaction = transactions.iter().any(|t| t.pending_action.is_some());

    let (non_held, full) = if has_updated_total(Some(report), policy, transactions)
        && has_pending_transaction
    {
        let unheld = transactions
            .iter()
            .filter(|t| !is_on_hold(Some(*t)))
            .try_fold(0i64, |sum, t| sum.checked_add(t.amount));
        (
            unheld.and_then(|amount| amount.checked_mul(sign)),
            report.total.checked_mul(sign),
        )
    } else {
        let non_reimbursable_total = if exclude_non_reimbursables {
            report.non_reimbursable_total
        } else {
            0
        };
        let unheld_non_reimbursable_total = if exclude_non_reimbursables {
            report.unheld_non_reimbursable_total.unwrap_or(0)
        } else {
            0
        };
        let unheld_total = report.unheld_total.unwrap_or(0);
        (
            unheld_total
                .checked_sub(unheld_non_reimbursable_total)
                .and_then(|amount| amount.checked_mul(sign)),
            report
                .total
                .checked_sub(non_reimbursable_total)
                .and_then(|amount| amount.checked_mul(sign)),
        )
    };
    // An overflowing non-held amount is treated as invalid so the full amount
    // is shown instead.
    let has_valid_non_held_amount = non_held.is_some_and(|amount| amount >= 0);
    let non_held = non_held.unwrap_or(0);
    let full = full.unwrap_or(0);

    NonHeldAndFullAmount {
        non_held_minor: non_held,
        full_minor: full,
        non_held_amount: convert_to_display_string(non_held, &report.currency),
        full_amount: convert_to_display_string(full, &report.currency),
        has_valid_non_held_amount,
    }
}

/// Self-approval is only blocked when the workspace forbids it.
pub fn is_allowed_to_approve_expense_report(
    report: Option<&Report>,
    policy: Option<&Policy>,
    approver_account_id: Option<AccountId>,
) -> bool {
    let Some(report) = report else {
        return true;
    };
    let is_owner = approver_account_id == Some(report.owner_account_id);
    !(policy.is_some_and(|p| p.prevent_self_approval) && is_owner)
}

/// Who a draft goes to when it is submitted.
pub fn submit_to_account_id(report: Option<&Report>, policy: Option<&Policy>) -> Option<AccountId> {
    report
        .and_then(|r| r.manager_id)
        .or_else(|| policy.and_then(|p| p.default_approver))
}

pub fn is_allowed_to_submit_draft_expense_report(
    report: Option<&Report>,
    policy: Option<&Policy>,
) -> bool {
    let submit_to = submit_to_account_id(report, policy);
    is_allowed_to_approve_expense_report(report, policy, submit_to)
}

pub fn can_be_exported(report: Option<&Report>) -> bool {
    report.is_some_and(|r| {
        r.is_expense_report()
            && matches!(
                r.status,
                ReportStatus::Approved | ReportStatus::Closed | ReportStatus::Reimbursed
            )
    })
}

pub fn is_closed_expense_report_with_no_expenses(
    report: Option<&Report>,
    transactions: &[Transaction],
) -> bool {
    report.is_some_and(|r| {
        r.status == ReportStatus::Closed && r.is_expense_report() && transactions.is_empty()
    })
}

pub fn is_current_user_submitter(report: Option<&Report>, account_id: Option<AccountId>) -> bool {
    match (report, account_id) {
        (Some(report), Some(account_id)) => report.owner_account_id == account_id,
        _ => false,
    }
}

/// A pay-at-end report holds exactly one pay-at-end booking.
pub fn is_pay_at_end_expense_report(transactions: &[&Transaction]) -> bool {
    match transactions {
        [only] => is_pay_at_end_expense(Some(*only)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::currency::CurrencyCode;
    use crate::domain::{PendingAction, PolicyType, ReportType};

    fn expense_report(total: i64) -> Report {
        let mut report = Report::new(ReportType::Expense, 1, Uuid::new_v4(), Uuid::new_v4());
        report.total = total;
        report
    }

    #[test]
    fn spend_breakdown_flips_expense_report_sign() {
        let mut report = expense_report(-15_000);
        report.non_reimbursable_total = -5_000;
        let breakdown = money_request_spend_breakdown(Some(&report));
        assert_eq!(breakdown.total_display_spend, 15_000);
        assert_eq!(breakdown.non_reimbursable_spend, 5_000);
        assert_eq!(breakdown.reimbursable_spend, 10_000);
    }

    #[test]
    fn spend_breakdown_defaults_to_zero() {
        assert_eq!(money_request_spend_breakdown(None), SpendBreakdown::default());
        assert_eq!(
            money_request_spend_breakdown(Some(&expense_report(0))),
            SpendBreakdown::default()
        );
    }

    #[test]
    fn unrepresentable_totals_fall_back_to_zero_breakdown() {
        assert_eq!(
            money_request_spend_breakdown(Some(&expense_report(i64::MIN))),
            SpendBreakdown::default()
        );

        let mut iou = Report::new(ReportType::Iou, 1, Uuid::new_v4(), Uuid::new_v4());
        iou.total = i64::MIN;
        assert_eq!(money_request_spend_breakdown(Some(&iou)), SpendBreakdown::default());

        let mut split = expense_report(-1);
        split.non_reimbursable_total = i64::MAX;
        assert_eq!(money_request_spend_breakdown(Some(&split)), SpendBreakdown::default());
    }

    #[test]
    fn overflowing_amounts_never_count_as_valid_non_held() {
        let mut report = expense_report(i64::MIN);
        report.unheld_total = Some(i64::MIN);
        let amounts = non_held_and_full_amount(&report, None, &[], false);
        assert_eq!(amounts.full_minor, 0);
        assert!(!amounts.has_valid_non_held_amount);

        let report = expense_report(-10);
        let mut first = Transaction::new(report.report_id, i64::MAX, CurrencyCode::default());
        first.pending_action = Some(PendingAction::Add);
        let second = Transaction::new(report.report_id, i64::MAX, CurrencyCode::default());
        let amounts = non_held_and_full_amount(&report, None, &[first, second], false);
        assert_eq!(amounts.full_minor, 10);
        assert!(!amounts.has_valid_non_held_amount);
    }

    #[test]
    fn iou_reports_use_absolute_values() {
        let mut report = Report::new(ReportType::Iou, 1, Uuid::new_v4(), Uuid::new_v4());
        report.total = -4_200;
        assert_eq!(
            money_request_spend_breakdown(Some(&report)).reimbursable_spend,
            4_200
        );
    }

    #[test]
    fn optimistic_hold_makes_total_untrustworthy() {
        let report = expense_report(-1_000);
        let held = Transaction::new(report.report_id, -1_000, CurrencyCode::default()).held();
        assert!(!has_updated_total(Some(&report), None, std::slice::from_ref(&held)));

        let mut settled = report.clone();
        settled.unheld_total = Some(0);
        assert!(has_updated_total(Some(&settled), None, &[held]));
    }

    #[test]
    fn pending_foreign_currency_transaction_makes_total_untrustworthy() {
        let report = expense_report(-1_000);
        let mut foreign = Transaction::new(report.report_id, -900, CurrencyCode::new("EUR"));
        foreign.pending_action = Some(PendingAction::Add);
        assert!(!has_updated_total(Some(&report), None, &[foreign]));
    }

    #[test]
    fn non_held_amount_comes_from_server_totals() {
        let mut report = expense_report(-10_000);
        report.unheld_total = Some(-4_000);
        let transactions = vec![
            Transaction::new(report.report_id, -6_000, CurrencyCode::default()).held(),
            Transaction::new(report.report_id, -4_000, CurrencyCode::default()),
        ];
        let amounts = non_held_and_full_amount(&report, None, &transactions, false);
        assert_eq!(amounts.non_held_amount, "$40.00");
        assert_eq!(amounts.full_amount, "$100.00");
        assert!(amounts.has_valid_non_held_amount);
    }

    #[test]
    fn non_held_amount_sums_local_transactions_while_pending() {
        let mut report = expense_report(-10_000);
        report.unheld_total = Some(-10_000);
        let mut pending = Transaction::new(report.report_id, -2_500, CurrencyCode::default());
        pending.pending_action = Some(PendingAction::Add);
        let transactions = vec![
            Transaction::new(report.report_id, -7_500, CurrencyCode::default()).held(),
            pending,
        ];
        let amounts = non_held_and_full_amount(&report, None, &transactions, false);
        assert_eq!(amounts.non_held_minor, 2_500);
        assert_eq!(amounts.full_minor, 10_000);
    }

    #[test]
    fn prevent_self_approval_blocks_owner() {
        let report = expense_report(-100);
        let mut policy = Policy::new(PolicyType::Corporate);
        policy.prevent_self_approval = true;
        assert!(!is_allowed_to_approve_expense_report(
            Some(&report),
            Some(&policy),
            Some(1)
        ));
        assert!(is_allowed_to_approve_expense_report(
            Some(&report),
            Some(&policy),
            Some(2)
        ));
    }

    #[test]
    fn submitting_to_yourself_is_blocked_with_prevent_self_approval() {
        let mut report = expense_report(-100);
        let mut policy = Policy::new(PolicyType::Corporate);
        policy.prevent_self_approval = true;
        policy.default_approver = Some(1);
        assert!(!is_allowed_to_submit_draft_expense_report(
            Some(&report),
            Some(&policy)
        ));

        report.manager_id = Some(9);
        assert!(is_allowed_to_submit_draft_expense_report(
            Some(&report),
            Some(&policy)
        ));
    }

    #[test]
    fn exportable_only_after_approval() {
        let mut report = expense_report(-100);
        assert!(!can_be_exported(Some(&report)));
        report.status = ReportStatus::Approved;
        assert!(can_be_exported(Some(&report)));
        report.status = ReportStatus::Reimbursed;
        assert!(can_be_exported(Some(&report)));
    }

    #[test]
    fn deletion_stops_at_approval() {
        let mut report = expense_report(-100);
        assert!(can_delete_transaction(Some(&report)));
        report.status = ReportStatus::Approved;
        assert!(!can_delete_transaction(Some(&report)));
        assert!(!can_delete_transaction(None));
    }
}
