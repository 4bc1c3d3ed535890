use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, ReportActionId, TransactionId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IouType {
    Create,
    Track,
    Split,
    Pay,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportActionKind {
    MoneyRequest {
        iou_type: IouType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transaction_id: Option<TransactionId>,
    },
    Comment,
}

/// An entry in the report's action history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportAction {
    pub report_action_id: ReportActionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_account_id: Option<AccountId>,
    #[serde(default)]
    pub is_deleted: bool,
    pub kind: ReportActionKind,
}

impl ReportAction {
    pub fn money_request(
        actor_account_id: AccountId,
        iou_type: IouType,
        transaction_id: TransactionId,
    ) -> Self {
        Self {
            report_action_id: Uuid::new_v4(),
            actor_account_id: Some(actor_account_id),
            is_deleted: false,
            kind: ReportActionKind::MoneyRequest {
                iou_type,
                transaction_id: Some(transaction_id),
            },
        }
    }

    pub fn is_money_request(&self) -> bool {
        matches!(self.kind, ReportActionKind::MoneyRequest { .. })
    }

    pub fn is_track_expense(&self) -> bool {
        matches!(
            self.kind,
            ReportActionKind::MoneyRequest {
                iou_type: IouType::Track,
                ..
            }
        )
    }

    /// Transaction referenced by a money request action.
    pub fn iou_transaction_id(&self) -> Option<TransactionId> {
        match self.kind {
            ReportActionKind::MoneyRequest { transaction_id, .. } => transaction_id,
            ReportActionKind::Comment => None,
        }
    }
}
