use crate::domain::{
    AccountId, ApprovalMode, AutoReportingFrequency, ConnectionName, Policy, PolicyType,
};

pub fn is_policy_admin(policy: Option<&Policy>, account_id: Option<AccountId>) -> bool {
    match (policy, account_id) {
        (Some(policy), Some(account_id)) => policy.admin_account_ids.contains(&account_id),
        _ => false,
    }
}

/// Team and corporate workspaces.
pub fn is_paid_group_policy(policy: Option<&Policy>) -> bool {
    matches!(
        policy.map(|p| p.policy_type),
        Some(PolicyType::Team | PolicyType::Corporate)
    )
}

pub fn is_submit_and_close(policy: Option<&Policy>) -> bool {
    policy.is_some_and(|p| p.approval_mode == ApprovalMode::Optional)
}

pub fn is_instant_submit_enabled(policy: Option<&Policy>) -> bool {
    policy.is_some_and(|p| p.auto_reporting == AutoReportingFrequency::Instant)
}

/// First connected accounting integration, in canonical integration order.
pub fn connected_integration(policy: Option<&Policy>) -> Option<ConnectionName> {
    policy.and_then(|p| p.connections.iter().min().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_lookup_requires_both_policy_and_account() {
        let policy = Policy::new(PolicyType::Team).with_admin(7);
        assert!(is_policy_admin(Some(&policy), Some(7)));
        assert!(!is_policy_admin(Some(&policy), Some(8)));
        assert!(!is_policy_admin(Some(&policy), None));
        assert!(!is_policy_admin(None, Some(7)));
    }

    #[test]
    fn connected_integration_prefers_canonical_order() {
        let mut policy = Policy::new(PolicyType::Corporate);
        policy.connections = vec![ConnectionName::NetSuite, ConnectionName::Xero];
        assert_eq!(connected_integration(Some(&policy)), Some(ConnectionName::Xero));
        assert_eq!(connected_integration(None), None);
    }

    #[test]
    fn personal_policies_are_not_paid() {
        assert!(!is_paid_group_policy(Some(&Policy::new(PolicyType::Personal))));
        assert!(is_paid_group_policy(Some(&Policy::new(PolicyType::Team))));
        assert!(!is_paid_group_policy(None));
    }
}
