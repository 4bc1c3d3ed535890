use tracing::{debug, warn};

use super::command::{ActionCommand, ActionExecutor, FlowOutcome, PaymentMethod, RequestType};
use super::navigation::{Navigator, Route};
use crate::domain::{Loadable, ReportId};
use crate::engine::{evaluate, HeaderDecision, HeaderSnapshot};
use crate::store::SnapshotObserver;

/// Transient toggles created by user interaction and cleared on completion or
/// cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderUiState {
    pub is_delete_modal_visible: bool,
    pub is_hold_menu_visible: bool,
    pub is_no_delegate_access_menu_visible: bool,
    pub payment_type: Option<PaymentMethod>,
    pub pay_as_business: bool,
    pub request_type: Option<RequestType>,
    pub navigate_back_to_after_delete: Option<Route>,
}

/// What the presentation layer needs after a snapshot update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub decision: HeaderDecision,
    /// Set when the hold explanation screen should open.
    pub navigate_to: Option<Route>,
    /// The delete confirmation was open and has been closed because deleting
    /// is no longer allowed.
    pub closed_delete_prompt: bool,
}

/// Everything the hold menu shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldMenuRequest {
    pub request_type: RequestType,
    pub payment_type: Option<PaymentMethod>,
    pub full_amount: String,
    /// Absent when only the full amount can be settled.
    pub non_held_amount: Option<String>,
    pub transaction_count: usize,
    pub report_id: Option<ReportId>,
    pub chat_report_id: Option<ReportId>,
}

/// (loading, dismissed, on hold) as last seen by the hold explanation check.
type HoldExplanationKey = (bool, bool, bool);

/// Owns the header's transient state and turns user interaction into flow
/// outcomes, always against the latest observed snapshot.
#[derive(Debug)]
pub struct HeaderController {
    snapshot: HeaderSnapshot,
    decision: HeaderDecision,
    state: HeaderUiState,
    last_hold_key: Option<HoldExplanationKey>,
    back_to: Option<String>,
}

impl Default for HeaderController {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderController {
    pub fn new() -> Self {
        let snapshot = HeaderSnapshot::default();
        let decision = evaluate(&snapshot);
        Self {
            snapshot,
            decision,
            state: HeaderUiState::default(),
            last_hold_key: None,
            back_to: None,
        }
    }

    /// Route the hold explanation and duplicate review return to.
    pub fn with_back_to(mut self, back_to: impl Into<String>) -> Self {
        self.back_to = Some(back_to.into());
        self
    }

    pub fn state(&self) -> &HeaderUiState {
        &self.state
    }

    pub fn decision(&self) -> &HeaderDecision {
        &self.decision
    }

    pub fn snapshot(&self) -> &HeaderSnapshot {
        &self.snapshot
    }

    /// Recomputes the decision from `snapshot` and applies the rules that
    /// react to state changes.
    pub fn observe(&mut self, snapshot: HeaderSnapshot) -> Observation {
        self.decision = evaluate(&snapshot);
        self.snapshot = snapshot;

        let closed_delete_prompt =
            self.state.is_delete_modal_visible && !self.decision.can_delete_request;
        if !self.decision.can_delete_request {
            self.state.is_delete_modal_visible = false;
        }
        if closed_delete_prompt {
            debug!("delete no longer allowed, closing confirmation");
        }

        Observation {
            decision: self.decision.clone(),
            navigate_to: self.hold_explanation_route(),
            closed_delete_prompt,
        }
    }

    /// Fires once each time (loading, dismissed, on hold) changes into the
    /// qualifying combination.
    fn hold_explanation_route(&mut self) -> Option<Route> {
        let (is_loading, dismissed) = match self.snapshot.dismissed_hold_use_explanation {
            Loadable::NotLoaded => (true, false),
            Loadable::Loaded(dismissed) => (false, dismissed),
        };
        let key = (is_loading, dismissed, self.decision.is_on_hold);
        let changed = self.last_hold_key != Some(key);
        self.last_hold_key = Some(key);

        if !changed || is_loading || dismissed || !self.decision.is_on_hold {
            return None;
        }
        Some(Route::ProcessMoneyRequestHold {
            back_to: self.back_to.clone(),
        })
    }

    pub fn submit(&mut self) -> FlowOutcome {
        if !self.decision.should_show_submit_button || self.decision.should_disable_submit_button
        {
            return ignored("submit is not available");
        }
        match self.snapshot.report.as_ref() {
            Some(report) => FlowOutcome::Execute(ActionCommand::SubmitReport {
                report_id: report.report_id,
            }),
            None => ignored("report not loaded"),
        }
    }

    pub fn confirm_approval(&mut self) -> FlowOutcome {
        if !self.decision.should_show_approve_button || self.decision.should_disable_approve_button
        {
            return ignored("approve is not available");
        }
        self.state.request_type = Some(RequestType::Approve);
        if self.decision.is_delegate_access_restricted {
            self.state.is_no_delegate_access_menu_visible = true;
            return FlowOutcome::ShowNoDelegateAccess;
        }
        if self.decision.has_held_expenses {
            self.state.is_hold_menu_visible = true;
            return FlowOutcome::ShowHoldMenu(RequestType::Approve);
        }
        self.approve(true)
    }

    fn approve(&self, full: bool) -> FlowOutcome {
        match self.snapshot.report.as_ref() {
            Some(report) => FlowOutcome::Execute(ActionCommand::ApproveReport {
                report_id: report.report_id,
                full,
            }),
            None => ignored("report not loaded"),
        }
    }

    pub fn confirm_payment(
        &mut self,
        method: Option<PaymentMethod>,
        pay_as_business: bool,
    ) -> FlowOutcome {
        if !self.decision.should_show_pay_button {
            return ignored("pay is not available");
        }
        let Some(method) = method else {
            return ignored("no payment method chosen");
        };
        if self.snapshot.chat_report.is_none() {
            return ignored("chat report not loaded");
        }
        self.state.payment_type = Some(method);
        self.state.pay_as_business = pay_as_business;
        self.state.request_type = Some(RequestType::Pay);
        if self.decision.is_delegate_access_restricted {
            self.state.is_no_delegate_access_menu_visible = true;
            return FlowOutcome::ShowNoDelegateAccess;
        }
        if self.decision.has_held_expenses {
            self.state.is_hold_menu_visible = true;
            return FlowOutcome::ShowHoldMenu(RequestType::Pay);
        }
        self.pay(method, pay_as_business, true)
    }

    fn pay(&self, method: PaymentMethod, pay_as_business: bool, full: bool) -> FlowOutcome {
        let Some(chat_report_id) = self.snapshot.chat_report.as_ref().map(|c| c.report_id) else {
            return ignored("chat report not loaded");
        };
        let Some(report) = self.snapshot.report.as_ref() else {
            return ignored("report not loaded");
        };
        let command = if report.is_invoice_report() {
            ActionCommand::PayInvoice {
                method,
                chat_report_id,
                report_id: report.report_id,
                pay_as_business,
            }
        } else {
            ActionCommand::PayMoneyRequest {
                method,
                chat_report_id,
                report_id: report.report_id,
                full,
            }
        };
        FlowOutcome::Execute(command)
    }

    /// Settles the request the hold menu was opened for, either the full
    /// amount or only the non-held part. Closes the menu and clears the
    /// recorded request.
    pub fn confirm_hold_menu(&mut self, full: bool) -> FlowOutcome {
        let Some(menu) = self.hold_menu() else {
            return ignored("hold menu is not open");
        };
        if !full && menu.non_held_amount.is_none() {
            return ignored("nothing outside the hold can be settled");
        }
        let pay_as_business = self.state.pay_as_business;
        self.state.is_hold_menu_visible = false;
        self.state.request_type = None;
        self.state.payment_type = None;
        self.state.pay_as_business = false;

        match menu.request_type {
            RequestType::Approve => {
                if !self.decision.should_show_approve_button
                    || self.decision.should_disable_approve_button
                {
                    return ignored("approve is not available");
                }
                self.approve(full)
            }
            RequestType::Pay => {
                if !self.decision.should_show_pay_button {
                    return ignored("pay is not available");
                }
                match menu.payment_type {
                    Some(method) => self.pay(method, pay_as_business, full),
                    None => ignored("no payment method chosen"),
                }
            }
        }
    }

    /// Opens the delete confirmation. Returns whether it opened.
    pub fn request_delete(&mut self) -> bool {
        self.state.is_delete_modal_visible = self.decision.can_delete_request;
        self.state.is_delete_modal_visible
    }

    pub fn cancel_delete(&mut self) {
        self.state.is_delete_modal_visible = false;
    }

    /// Confirms the open delete prompt, choosing the delete flavour from the
    /// originating action.
    pub fn confirm_delete(&mut self) -> FlowOutcome {
        self.state.is_delete_modal_visible = false;
        if !self.decision.can_delete_request {
            return ignored("delete is not allowed");
        }
        let Some(action) = self.snapshot.originating_action() else {
            return ignored("originating action not loaded");
        };
        let transaction_id = action
            .is_money_request()
            .then(|| action.iou_transaction_id())
            .flatten();
        let command = if action.is_track_expense() {
            ActionCommand::DeleteTrackExpense {
                report_id: self.snapshot.report.as_ref().map(|r| r.report_id),
                transaction_id,
                report_action_id: action.report_action_id,
            }
        } else {
            ActionCommand::DeleteMoneyRequest {
                transaction_id,
                report_action_id: action.report_action_id,
            }
        };
        FlowOutcome::Execute(command)
    }

    /// Called once the delete confirmation finished hiding; yields the route
    /// recorded by the delete, if any.
    pub fn on_delete_modal_hidden(&mut self) -> Option<Route> {
        self.state.navigate_back_to_after_delete.take()
    }

    pub fn mark_as_cash(&mut self) -> FlowOutcome {
        let Some(action) = self.snapshot.originating_action() else {
            return ignored("originating action not loaded");
        };
        let transaction_id = action
            .is_money_request()
            .then(|| action.iou_transaction_id())
            .flatten();
        let report_id = self.snapshot.transaction_thread.as_ref().map(|t| t.report_id);
        match (transaction_id, report_id) {
            (Some(transaction_id), Some(report_id)) => {
                FlowOutcome::Execute(ActionCommand::MarkAsCash {
                    transaction_id,
                    report_id,
                })
            }
            _ => ignored("transaction or thread missing"),
        }
    }

    pub fn review_duplicates(&self) -> Option<Route> {
        if !self.decision.is_duplicate {
            return None;
        }
        let thread = self.snapshot.transaction_thread.as_ref()?;
        Some(Route::TransactionDuplicateReview {
            thread_report_id: thread.report_id,
            back_to: self.back_to.clone(),
        })
    }

    pub fn hold_menu(&self) -> Option<HoldMenuRequest> {
        if !self.state.is_hold_menu_visible {
            return None;
        }
        let request_type = self.state.request_type?;
        Some(HoldMenuRequest {
            request_type,
            payment_type: self.state.payment_type,
            full_amount: self.decision.full_amount.clone(),
            non_held_amount: self.decision.hold_menu_non_held_amount().map(str::to_string),
            transaction_count: self.decision.transaction_count,
            report_id: self.snapshot.report.as_ref().map(|r| r.report_id),
            chat_report_id: self.snapshot.chat_report.as_ref().map(|c| c.report_id),
        })
    }

    pub fn close_hold_menu(&mut self) {
        self.state.is_hold_menu_visible = false;
    }

    pub fn close_no_delegate_access_menu(&mut self) {
        self.state.is_no_delegate_access_menu_visible = false;
    }

    /// Dispatches the command carried by `outcome`, remembering the route a
    /// delete hands back.
    pub fn perform(&mut self, outcome: &FlowOutcome, executor: &mut dyn ActionExecutor) {
        let Some(command) = outcome.command() else {
            return;
        };
        let route = command.dispatch(executor);
        if command.is_delete() {
            self.state.navigate_back_to_after_delete = route;
        }
    }
}

fn ignored(reason: &'static str) -> FlowOutcome {
    warn!(reason, "ignoring header action");
    FlowOutcome::Ignored(reason)
}

/// Feeds store updates through a [`HeaderController`] and forwards automatic
/// navigation to a [`Navigator`].
#[derive(Debug)]
pub struct NavigatingHeader<N> {
    pub controller: HeaderController,
    pub navigator: N,
    pub last_observation: Option<Observation>,
}

impl<N: Navigator> NavigatingHeader<N> {
    pub fn new(controller: HeaderController, navigator: N) -> Self {
        Self {
            controller,
            navigator,
            last_observation: None,
        }
    }
}

impl<N: Navigator> SnapshotObserver for NavigatingHeader<N> {
    fn on_snapshot(&mut self, snapshot: &HeaderSnapshot) {
        let observation = self.controller.observe(snapshot.clone());
        if let Some(route) = observation.navigate_to.clone() {
            self.navigator.navigate_to(route);
        }
        self.last_observation = Some(observation);
    }
}
