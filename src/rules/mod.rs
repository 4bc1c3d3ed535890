//! Business rules the header decisions are built from. Each helper is a pure
//! function over explicit inputs; nothing here reads global state.

pub mod payment_rules;
pub mod policy_rules;
pub mod report_rules;
pub mod transaction_rules;

pub use payment_rules::{
    can_approve_iou, can_be_auto_reimbursed, can_iou_be_paid, is_payer, PaymentContext,
};
pub use policy_rules::{
    connected_integration, is_instant_submit_enabled, is_paid_group_policy, is_policy_admin,
    is_submit_and_close,
};
pub use report_rules::{
    can_be_exported, can_delete_transaction, has_held_expenses, has_only_held_expenses,
    has_updated_total, is_allowed_to_approve_expense_report,
    is_allowed_to_submit_draft_expense_report, is_closed_expense_report_with_no_expenses,
    is_current_user_submitter, is_open_expense_report, is_pay_at_end_expense_report,
    money_request_spend_breakdown, non_held_and_full_amount, NonHeldAndFullAmount,
    SpendBreakdown,
};
pub use transaction_rules::{
    all_have_pending_rter_violation, has_broken_connection_violation, has_pending_rter_violation,
    is_duplicate, is_expensify_card_transaction, is_on_hold, is_pay_at_end_expense, is_pending,
    is_receipt_being_scanned, should_show_broken_connection_violation,
};
