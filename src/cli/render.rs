use crate::{
    config::EngineConfig,
    currency::convert_to_display_string_with,
    engine::HeaderDecision,
};

use super::output::MessageKind;

/// Labels of the buttons the header shows, in display order.
pub fn button_labels(decision: &HeaderDecision) -> Vec<String> {
    let mut labels = Vec::new();
    if decision.should_show_settlement_button {
        let verb = if decision.should_show_pay_button {
            if decision.only_show_pay_elsewhere {
                "pay elsewhere"
            } else {
                "pay"
            }
        } else {
            "approve"
        };
        let mut label = if decision.settlement.formatted_amount.is_empty() {
            verb.to_string()
        } else {
            format!("{verb} {}", decision.settlement.formatted_amount)
        };
        if decision.settlement.is_disabled {
            label.push_str(" (disabled)");
        }
        labels.push(label);
    }
    if decision.should_show_export_integration_button {
        match decision.connected_integration {
            Some(connection) => labels.push(format!("export to {}", connection.label())),
            None => labels.push("export".to_string()),
        }
    }
    if decision.should_show_submit_button {
        labels.push(if decision.should_disable_submit_button {
            "submit (disabled)".to_string()
        } else {
            "submit".to_string()
        });
    }
    if decision.should_show_mark_as_cash_button {
        labels.push("mark as cash".to_string());
    }
    if decision.is_duplicate {
        labels.push("review duplicates".to_string());
    }
    labels
}

/// Human-readable lines for `decision`, amounts formatted with the configured
/// locale.
pub fn render_decision(
    decision: &HeaderDecision,
    config: &EngineConfig,
    narrow: bool,
) -> Vec<(MessageKind, String)> {
    let amount = convert_to_display_string_with(
        decision.displayed_amount_minor,
        &decision.currency,
        &config.locale,
        &config.format,
    );
    let mut lines = vec![
        (MessageKind::Section, "Report header".to_string()),
        (MessageKind::Info, format!("amount: {amount}")),
    ];

    let buttons = button_labels(decision);
    if buttons.is_empty() {
        lines.push((MessageKind::Info, "buttons: none".to_string()));
    } else {
        let placement = if narrow { "below header" } else { "in header" };
        lines.push((
            MessageKind::Info,
            format!("buttons ({placement}): {}", buttons.join(", ")),
        ));
    }

    if decision.can_delete_request {
        lines.push((MessageKind::Info, "more: delete".to_string()));
    }

    if let Some(banner) = decision
        .status_banner
        .as_ref()
        .filter(|_| decision.should_show_status_bar)
    {
        lines.push((MessageKind::Warning, format!("status: {}", banner.description())));
    }
    if let Some(message) = decision
        .next_step_message
        .as_ref()
        .filter(|_| decision.should_show_next_step)
    {
        lines.push((MessageKind::Info, format!("next step: {message}")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::HeaderSnapshot, evaluate};

    #[test]
    fn empty_snapshot_renders_no_buttons() {
        let decision = evaluate(&HeaderSnapshot::default());
        assert!(button_labels(&decision).is_empty());
        let lines = render_decision(&decision, &EngineConfig::default(), false);
        assert!(lines
            .iter()
            .any(|(_, line)| line == "buttons: none"));
        assert!(lines.iter().any(|(_, line)| line == "amount: $0.00"));
    }
}
