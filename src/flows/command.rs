use serde::{Deserialize, Serialize};
use tracing::info;

use super::navigation::Route;
use crate::domain::{ReportActionId, ReportId, TransactionId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Wallet payment.
    Expensify,
    BusinessBankAccount,
    /// Paid outside the product.
    Elsewhere,
}

/// What a hold menu was opened for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Approve,
    Pay,
}

/// A request for an external executor to act on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ActionCommand {
    SubmitReport {
        report_id: ReportId,
    },
    ApproveReport {
        report_id: ReportId,
        full: bool,
    },
    PayMoneyRequest {
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        full: bool,
    },
    PayInvoice {
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        pay_as_business: bool,
    },
    DeleteMoneyRequest {
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    },
    DeleteTrackExpense {
        report_id: Option<ReportId>,
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    },
    MarkAsCash {
        transaction_id: TransactionId,
        report_id: ReportId,
    },
}

impl ActionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ActionCommand::SubmitReport { .. } => "submit_report",
            ActionCommand::ApproveReport { .. } => "approve_report",
            ActionCommand::PayMoneyRequest { .. } => "pay_money_request",
            ActionCommand::PayInvoice { .. } => "pay_invoice",
            ActionCommand::DeleteMoneyRequest { .. } => "delete_money_request",
            ActionCommand::DeleteTrackExpense { .. } => "delete_track_expense",
            ActionCommand::MarkAsCash { .. } => "mark_as_cash",
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            ActionCommand::DeleteMoneyRequest { .. } | ActionCommand::DeleteTrackExpense { .. }
        )
    }

    /// Hands the command to `executor`. Deletes return where to go once the
    /// confirmation closes.
    pub fn dispatch(&self, executor: &mut dyn ActionExecutor) -> Option<Route> {
        info!(command = self.name(), "dispatching report action");
        match *self {
            ActionCommand::SubmitReport { report_id } => {
                executor.submit_report(report_id);
                None
            }
            ActionCommand::ApproveReport { report_id, full } => {
                executor.approve_report(report_id, full);
                None
            }
            ActionCommand::PayMoneyRequest {
                method,
                chat_report_id,
                report_id,
                full,
            } => {
                executor.pay_report(method, chat_report_id, report_id, full);
                None
            }
            ActionCommand::PayInvoice {
                method,
                chat_report_id,
                report_id,
                pay_as_business,
            } => {
                executor.pay_invoice(method, chat_report_id, report_id, pay_as_business);
                None
            }
            ActionCommand::DeleteMoneyRequest {
                transaction_id,
                report_action_id,
            } => executor.delete_money_request(transaction_id, report_action_id),
            ActionCommand::DeleteTrackExpense {
                report_id,
                transaction_id,
                report_action_id,
            } => executor.delete_track_expense(report_id, transaction_id, report_action_id),
            ActionCommand::MarkAsCash {
                transaction_id,
                report_id,
            } => {
                executor.mark_as_cash(transaction_id, report_id);
                None
            }
        }
    }
}

/// Side-effecting report operations. Each call is fire-and-forget: failures
/// are surfaced by the implementation, never reported back here.
pub trait ActionExecutor {
    fn submit_report(&mut self, report_id: ReportId);
    fn approve_report(&mut self, report_id: ReportId, full: bool);
    fn pay_report(
        &mut self,
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        full: bool,
    );
    fn pay_invoice(
        &mut self,
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        pay_as_business: bool,
    );
    fn delete_money_request(
        &mut self,
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    ) -> Option<Route>;
    fn delete_track_expense(
        &mut self,
        report_id: Option<ReportId>,
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    ) -> Option<Route>;
    fn mark_as_cash(&mut self, transaction_id: TransactionId, report_id: ReportId);
}

/// Executor that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: Vec<ActionCommand>,
    /// Returned from deletes.
    pub route_after_delete: Option<Route>,
}

impl ActionExecutor for RecordingExecutor {
    fn submit_report(&mut self, report_id: ReportId) {
        self.executed.push(ActionCommand::SubmitReport { report_id });
    }

    fn approve_report(&mut self, report_id: ReportId, full: bool) {
        self.executed
            .push(ActionCommand::ApproveReport { report_id, full });
    }

    fn pay_report(
        &mut self,
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        full: bool,
    ) {
        self.executed.push(ActionCommand::PayMoneyRequest {
            method,
            chat_report_id,
            report_id,
            full,
        });
    }

    fn pay_invoice(
        &mut self,
        method: PaymentMethod,
        chat_report_id: ReportId,
        report_id: ReportId,
        pay_as_business: bool,
    ) {
        self.executed.push(ActionCommand::PayInvoice {
            method,
            chat_report_id,
            report_id,
            pay_as_business,
        });
    }

    fn delete_money_request(
        &mut self,
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    ) -> Option<Route> {
        self.executed.push(ActionCommand::DeleteMoneyRequest {
            transaction_id,
            report_action_id,
        });
        self.route_after_delete.clone()
    }

    fn delete_track_expense(
        &mut self,
        report_id: Option<ReportId>,
        transaction_id: Option<TransactionId>,
        report_action_id: ReportActionId,
    ) -> Option<Route> {
        self.executed.push(ActionCommand::DeleteTrackExpense {
            report_id,
            transaction_id,
            report_action_id,
        });
        self.route_after_delete.clone()
    }

    fn mark_as_cash(&mut self, transaction_id: TransactionId, report_id: ReportId) {
        self.executed.push(ActionCommand::MarkAsCash {
            transaction_id,
            report_id,
        });
    }
}

/// Result of a user interaction with the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Execute(ActionCommand),
    ShowNoDelegateAccess,
    ShowHoldMenu(RequestType),
    Ignored(&'static str),
}

impl FlowOutcome {
    pub fn command(&self) -> Option<&ActionCommand> {
        match self {
            FlowOutcome::Execute(command) => Some(command),
            _ => None,
        }
    }
}
