use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    snapshot::HeaderSnapshot,
    status::{resolve_status_banner, BannerConditions, StatusBanner},
};
use crate::currency::{convert_to_display_string, CurrencyCode};
use crate::domain::ConnectionName;
use crate::rules::{
    can_approve_iou, can_be_exported, can_delete_transaction, can_iou_be_paid,
    connected_integration, has_held_expenses, has_only_held_expenses, has_updated_total,
    is_allowed_to_approve_expense_report, is_allowed_to_submit_draft_expense_report,
    is_closed_expense_report_with_no_expenses, is_current_user_submitter, is_duplicate,
    is_expensify_card_transaction, is_on_hold, is_open_expense_report, is_paid_group_policy,
    is_pay_at_end_expense, is_pending, is_policy_admin, is_receipt_being_scanned,
    money_request_spend_breakdown, non_held_and_full_amount, payment_rules::PaymentContext,
    report_rules::is_archived_report, should_show_broken_connection_violation,
    transaction_rules::has_receipt, all_have_pending_rter_violation, NonHeldAndFullAmount,
};

/// How the settlement (pay / approve) button is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPresentation {
    /// Green unless something on the report is held.
    pub use_success_style: bool,
    /// Amount shown on the button; empty when every expense is held.
    pub formatted_amount: String,
    pub is_disabled: bool,
    pub is_loading: bool,
}

/// Every decision the header renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDecision {
    pub can_delete_request: bool,
    pub can_iou_be_paid: bool,
    pub only_show_pay_elsewhere: bool,
    pub should_show_pay_button: bool,
    pub should_show_approve_button: bool,
    pub should_disable_approve_button: bool,
    pub should_show_submit_button: bool,
    pub should_disable_submit_button: bool,
    pub submit_button_success: bool,
    pub should_show_export_integration_button: bool,
    pub connected_integration: Option<ConnectionName>,
    pub should_show_settlement_button: bool,
    pub settlement: SettlementPresentation,
    pub should_show_mark_as_cash_button: bool,
    pub is_duplicate: bool,
    pub should_duplicate_button_be_success: bool,
    pub should_show_status_bar: bool,
    pub status_banner: Option<StatusBanner>,
    pub should_show_next_step: bool,
    pub next_step_message: Option<String>,
    pub should_show_any_button: bool,

    pub has_all_pending_rter_violations: bool,
    pub should_show_broken_connection_violation: bool,
    pub has_held_expenses: bool,
    pub has_only_held_expenses: bool,
    pub has_only_pending_transactions: bool,
    pub has_scanning_receipt: bool,
    pub is_pay_at_end_expense: bool,
    /// The subject transaction is held; drives the hold explanation screen.
    pub is_on_hold: bool,
    pub can_allow_settlement: bool,
    pub is_delegate_access_restricted: bool,
    pub is_invoice_report: bool,

    pub currency: CurrencyCode,
    pub reimbursable_spend: i64,
    pub formatted_amount: String,
    pub displayed_amount: String,
    pub displayed_amount_minor: i64,
    pub non_held_amount: String,
    pub non_held_amount_minor: i64,
    pub full_amount: String,
    pub full_amount_minor: i64,
    pub has_valid_non_held_amount: bool,
    pub transaction_count: usize,
}

impl HeaderDecision {
    /// Whether anything renders below the header row. `narrow_layout` puts the
    /// buttons there too.
    pub fn is_more_content_shown(&self, narrow_layout: bool) -> bool {
        self.should_show_next_step
            || self.should_show_status_bar
            || (self.should_show_any_button && narrow_layout)
    }

    /// Non-held amount offered by the hold menu, when paying only part of the
    /// report is possible.
    pub fn hold_menu_non_held_amount(&self) -> Option<&str> {
        (!self.has_only_held_expenses && self.has_valid_non_held_amount)
            .then_some(self.non_held_amount.as_str())
    }
}

/// Computes the header decisions for `snapshot`. Never fails: absent inputs
/// turn the features depending on them off.
pub fn evaluate(snapshot: &HeaderSnapshot) -> HeaderDecision {
    let report = snapshot.report.as_ref();
    let policy = snapshot.policy.as_ref();
    let session = snapshot.session.as_ref();
    let account_id = snapshot.current_account_id();
    let transactions = snapshot.transactions.as_slice();
    let action = snapshot.originating_action();
    let subject = snapshot.subject_transaction();
    let subject_set = snapshot.subject_transactions();

    let reimbursable_spend = money_request_spend_breakdown(report).reimbursable_spend;
    let is_on_hold = is_on_hold(subject);
    let is_deleted_parent_action = action.is_some_and(|a| a.is_deleted);
    let is_duplicate = is_duplicate(subject);

    // Only the requester may delete; admins can only edit.
    let is_action_owner = matches!(
        (action.and_then(|a| a.actor_account_id), account_id),
        (Some(actor), Some(current)) if actor == current
    );
    let can_delete_request =
        is_action_owner && can_delete_transaction(report) && !is_deleted_parent_action;

    let can_allow_settlement = has_updated_total(report, policy, transactions);
    let is_draft = is_open_expense_report(report);
    let connected_integration = connected_integration(policy);
    let has_held_expenses = has_held_expenses(transactions);
    let has_scanning_receipt = transactions
        .iter()
        .any(|t| has_receipt(t) && is_receipt_being_scanned(t));
    let has_only_pending_transactions = !transactions.is_empty()
        && transactions
            .iter()
            .all(|t| is_expensify_card_transaction(t) && is_pending(t));
    let has_all_pending_rter_violations = all_have_pending_rter_violation(&subject_set);
    let should_show_broken_connection_violation =
        should_show_broken_connection_violation(&subject_set, report, policy, account_id);
    let has_only_held_expenses = has_only_held_expenses(transactions);
    let is_pay_at_end_expense = is_pay_at_end_expense(subject);
    let is_archived_report = is_archived_report(report);
    let is_admin = is_policy_admin(policy, account_id);

    let payment_context = PaymentContext {
        chat_report: snapshot.chat_report.as_ref(),
        policy,
        session,
        receiver_policy: snapshot.receiver_policy.as_ref(),
        transactions,
        subject_transactions: &subject_set,
    };
    let can_iou_be_paid_now = can_iou_be_paid(report, &payment_context, false);
    let only_show_pay_elsewhere =
        !can_iou_be_paid_now && can_iou_be_paid(report, &payment_context, true);
    let should_show_pay_button = can_iou_be_paid_now || only_show_pay_elsewhere;

    let should_show_mark_as_cash_button = has_all_pending_rter_violations
        || (should_show_broken_connection_violation
            && (!is_admin || is_current_user_submitter(report, account_id)));

    let should_show_approve_button =
        can_approve_iou(report, policy, transactions, session) && !has_only_pending_transactions;
    let should_disable_approve_button = should_show_approve_button
        && !is_allowed_to_approve_expense_report(report, policy, account_id);

    let is_owner_or_manager = match (report, account_id) {
        (Some(r), Some(current)) => {
            r.owner_account_id == current || r.manager_id == Some(current)
        }
        _ => false,
    };
    let should_show_submit_button = report.is_some()
        && !is_archived_report
        && is_draft
        && reimbursable_spend != 0
        && !has_all_pending_rter_violations
        && !should_show_broken_connection_violation
        && (is_owner_or_manager || is_admin);

    // Export only takes the slot when neither pay nor submit claimed it.
    let should_show_export_integration_button = !should_show_pay_button
        && !should_show_submit_button
        && connected_integration.is_some()
        && is_admin
        && can_be_exported(report);

    let should_show_settlement_button = (should_show_pay_button || should_show_approve_button)
        && !has_all_pending_rter_violations
        && !should_show_export_integration_button
        && !should_show_broken_connection_violation;

    let should_disable_submit_button =
        should_show_submit_button && !is_allowed_to_submit_draft_expense_report(report, policy);

    let should_show_status_bar = has_all_pending_rter_violations
        || should_show_broken_connection_violation
        || has_only_held_expenses
        || has_scanning_receipt
        || is_pay_at_end_expense
        || has_only_pending_transactions;

    let next_step = snapshot.next_step.as_ref().filter(|step| step.has_message());
    let should_show_next_step = !is_closed_expense_report_with_no_expenses(report, transactions)
        && is_paid_group_policy(policy)
        && next_step.is_some()
        && !should_show_status_bar;

    let should_show_any_button = is_duplicate
        || should_show_settlement_button
        || should_show_approve_button
        || should_show_submit_button
        || should_show_next_step
        || should_show_mark_as_cash_button
        || should_show_export_integration_button;

    let should_duplicate_button_be_success = is_duplicate
        && !should_show_settlement_button
        && !should_show_export_integration_button
        && !should_show_submit_button
        && !should_show_mark_as_cash_button;

    let submit_button_success = snapshot
        .chat_report
        .as_ref()
        .is_some_and(|c| c.is_own_policy_expense_chat)
        && !policy.is_some_and(|p| p.harvesting_enabled);

    let currency = report.map(|r| r.currency.clone()).unwrap_or_default();
    let formatted_amount = convert_to_display_string(reimbursable_spend, &currency);
    let amounts = match report {
        Some(r) => non_held_and_full_amount(r, policy, transactions, should_show_pay_button),
        None => NonHeldAndFullAmount {
            non_held_minor: 0,
            full_minor: 0,
            non_held_amount: convert_to_display_string(0, &currency),
            full_amount: convert_to_display_string(0, &currency),
            has_valid_non_held_amount: false,
        },
    };
    let shows_non_held_amount =
        has_held_expenses && can_allow_settlement && amounts.has_valid_non_held_amount;
    let (displayed_amount, displayed_amount_minor) = if shows_non_held_amount {
        (amounts.non_held_amount.clone(), amounts.non_held_minor)
    } else {
        (formatted_amount.clone(), reimbursable_spend)
    };

    let status_banner = resolve_status_banner(&BannerConditions {
        is_pay_at_end_expense,
        is_archived_report,
        archive_reason: report.and_then(|r| r.archived),
        has_only_held_expenses,
        should_show_broken_connection_violation,
        subject_transaction_id: subject.map(|t| t.transaction_id),
        is_admin,
        has_all_pending_rter_violations,
        has_only_pending_transactions,
        has_scanning_receipt,
    });

    let settlement = SettlementPresentation {
        use_success_style: !has_held_expenses,
        formatted_amount: if has_only_held_expenses {
            String::new()
        } else {
            displayed_amount.clone()
        },
        is_disabled: snapshot.is_offline && !can_allow_settlement,
        is_loading: !snapshot.is_offline && !can_allow_settlement,
    };

    let decision = HeaderDecision {
        can_delete_request,
        can_iou_be_paid: can_iou_be_paid_now,
        only_show_pay_elsewhere,
        should_show_pay_button,
        should_show_approve_button,
        should_disable_approve_button,
        should_show_submit_button,
        should_disable_submit_button,
        submit_button_success,
        should_show_export_integration_button,
        connected_integration,
        should_show_settlement_button,
        settlement,
        should_show_mark_as_cash_button,
        is_duplicate,
        should_duplicate_button_be_success,
        should_show_status_bar,
        status_banner,
        should_show_next_step,
        next_step_message: next_step.map(|step| step.text()),
        should_show_any_button,
        has_all_pending_rter_violations,
        should_show_broken_connection_violation,
        has_held_expenses,
        has_only_held_expenses,
        has_only_pending_transactions,
        has_scanning_receipt,
        is_pay_at_end_expense,
        is_on_hold,
        can_allow_settlement,
        is_delegate_access_restricted: session.is_some_and(|s| s.is_delegate_access_restricted()),
        is_invoice_report: report.is_some_and(|r| r.is_invoice_report()),
        currency,
        reimbursable_spend,
        formatted_amount,
        displayed_amount,
        displayed_amount_minor,
        non_held_amount: amounts.non_held_amount,
        non_held_amount_minor: amounts.non_held_minor,
        full_amount: amounts.full_amount,
        full_amount_minor: amounts.full_minor,
        has_valid_non_held_amount: amounts.has_valid_non_held_amount,
        transaction_count: transactions.len(),
    };

    debug!(
        report_id = ?report.map(|r| r.report_id),
        settlement = decision.should_show_settlement_button,
        submit = decision.should_show_submit_button,
        export = decision.should_show_export_integration_button,
        banner = ?decision.status_banner,
        "evaluated report header"
    );

    decision
}
