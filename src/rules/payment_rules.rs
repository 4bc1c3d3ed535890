use crate::domain::{
    ChatReport, InvoiceReceiver, Policy, PolicyType, ReimbursementChoice, Report, ReportStatus,
    ReportType, Session, Transaction,
};

use super::{
    policy_rules::{is_paid_group_policy, is_policy_admin, is_submit_and_close},
    report_rules::{
        is_archived_report, is_open_expense_report, is_pay_at_end_expense_report,
        is_report_approved, is_settled, money_request_spend_breakdown,
    },
    transaction_rules::{has_receipt, is_receipt_being_scanned},
};

/// Whether `session` is the one who settles `report`.
pub fn is_payer(
    session: &Session,
    report: &Report,
    policy: Option<&Policy>,
    only_show_pay_elsewhere: bool,
) -> bool {
    let is_approved = is_report_approved(Some(report));
    let is_admin = policy.is_some_and(|p| p.policy_type != PolicyType::Personal)
        && is_policy_admin(policy, Some(session.account_id));
    let is_manager = report.manager_id == Some(session.account_id);

    if let Some(policy) = policy.filter(|p| is_paid_group_policy(Some(*p))) {
        if policy.reimbursement_choice == ReimbursementChoice::Yes {
            let is_reimburser = policy.reimburser_email.as_deref() == Some(session.email.as_str());
            return (policy.reimburser_email.is_none() || is_reimburser)
                && (is_approved || is_manager);
        }
        if policy.reimbursement_choice == ReimbursementChoice::Manual || only_show_pay_elsewhere {
            return is_admin && (is_approved || is_manager);
        }
        return false;
    }

    is_admin || (matches!(report.report_type, ReportType::Expense | ReportType::Iou) && is_manager)
}

/// Reports under the workspace auto-reimbursement limit are paid without
/// anyone pressing a button.
pub fn can_be_auto_reimbursed(report: &Report, policy: Option<&Policy>, session: &Session) -> bool {
    let Some(policy) = policy else {
        return false;
    };
    let reimbursable_total = money_request_spend_breakdown(Some(report)).total_display_spend;
    let limit = policy.auto_reimbursement_limit.unwrap_or(0);
    is_paid_group_policy(Some(policy))
        && policy.reimbursement_choice == ReimbursementChoice::Yes
        && limit >= reimbursable_total
        && reimbursable_total > 0
        && report.manager_id == Some(session.account_id)
}

pub fn can_approve_iou(
    report: Option<&Report>,
    policy: Option<&Policy>,
    transactions: &[Transaction],
    session: Option<&Session>,
) -> bool {
    let Some(report) = report else {
        return false;
    };
    if !report.is_expense_report() || !is_paid_group_policy(policy) {
        return false;
    }
    if is_submit_and_close(policy) {
        return false;
    }
    let is_current_user_manager =
        session.is_some_and(|s| report.manager_id == Some(s.account_id));
    let is_transaction_being_scanned = transactions
        .iter()
        .any(|t| has_receipt(t) && is_receipt_being_scanned(t));
    let all: Vec<&Transaction> = transactions.iter().collect();

    is_current_user_manager
        && !is_open_expense_report(Some(report))
        && !is_report_approved(Some(report))
        && !is_settled(Some(report))
        && !is_archived_report(Some(report))
        && !is_transaction_being_scanned
        && !is_pay_at_end_expense_report(&all)
}

/// Inputs to [`can_iou_be_paid`] beyond the report itself.
#[derive(Debug, Clone, Copy)]
pub struct PaymentContext<'a> {
    pub chat_report: Option<&'a ChatReport>,
    pub policy: Option<&'a Policy>,
    pub session: Option<&'a Session>,
    /// Workspace of a business invoice receiver.
    pub receiver_policy: Option<&'a Policy>,
    /// Report transactions, used for the approval check.
    pub transactions: &'a [Transaction],
    /// Transactions considered for the pay-at-end check.
    pub subject_transactions: &'a [&'a Transaction],
}

pub fn can_iou_be_paid(
    report: Option<&Report>,
    ctx: &PaymentContext<'_>,
    only_show_pay_elsewhere: bool,
) -> bool {
    let (Some(report), Some(session)) = (report, ctx.session) else {
        return false;
    };
    let policy = ctx.policy;
    let is_policy_expense_chat = ctx.chat_report.is_some_and(|c| c.is_policy_expense_chat);
    let is_chat_report_archived = ctx.chat_report.is_some_and(|c| c.is_archived);
    let iou_settled = is_settled(Some(report));

    if policy.is_some_and(|p| p.reimbursement_choice == ReimbursementChoice::No) {
        if !only_show_pay_elsewhere {
            return false;
        }
        if report.status != ReportStatus::Submitted {
            return false;
        }
    }

    if report.is_invoice_report() {
        if iou_settled {
            return false;
        }
        return match ctx.chat_report.and_then(|c| c.invoice_receiver) {
            Some(InvoiceReceiver::Individual { account_id }) => account_id == session.account_id,
            Some(InvoiceReceiver::Business { policy_id }) => ctx
                .receiver_policy
                .filter(|p| p.policy_id == policy_id)
                .is_some_and(|p| is_policy_admin(Some(p), Some(session.account_id))),
            None => false,
        };
    }

    let is_payer = is_payer(session, report, policy, only_show_pay_elsewhere);
    let is_open_expense_report = is_policy_expense_chat && is_open_expense_report(Some(report));
    let reimbursable_spend = money_request_spend_breakdown(Some(report)).reimbursable_spend;
    let is_auto_reimbursable = can_be_auto_reimbursed(report, policy, session);
    let should_be_approved = can_approve_iou(Some(report), policy, ctx.transactions, Some(session));
    let is_pay_at_end = is_pay_at_end_expense_report(ctx.subject_transactions);

    is_payer
        && !is_open_expense_report
        && !iou_settled
        && !report.is_waiting_on_bank_account
        && reimbursable_spend != 0
        && !is_chat_report_archived
        && !is_auto_reimbursable
        && !should_be_approved
        && !is_pay_at_end
}
