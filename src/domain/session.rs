use serde::{Deserialize, Serialize};

use super::AccountId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DelegateRole {
    All,
    Submitter,
}

/// Present when the signed-in user acts on behalf of another account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelegateAccess {
    pub delegator_email: String,
    pub role: DelegateRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub account_id: AccountId,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<DelegateAccess>,
}

impl Session {
    pub fn new(account_id: AccountId, email: impl Into<String>) -> Self {
        Self {
            account_id,
            email: email.into(),
            delegate: None,
        }
    }

    /// Submitter-only delegates may not approve or pay.
    pub fn is_delegate_access_restricted(&self) -> bool {
        matches!(
            self.delegate,
            Some(DelegateAccess {
                role: DelegateRole::Submitter,
                ..
            })
        )
    }
}
