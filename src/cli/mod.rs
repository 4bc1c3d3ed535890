pub mod output;
mod render;

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    build_info,
    config::{ConfigManager, EngineConfig},
    engine::HeaderSnapshot,
    errors::ReportError,
    flows::{FlowOutcome, HeaderController, PaymentMethod, RecordingExecutor},
    utils::init_tracing_with,
};

use self::output::{MessageKind, OutputPreferences};

pub use render::{button_labels, render_decision};

const USAGE: &str = "Usage: money_report_cli [--config <file>] [--plain] <command>\n\
Commands:\n  \
evaluate <snapshot.json> [--json] [--narrow]\n  \
act <snapshot.json> <submit|approve|pay|pay-elsewhere|delete|mark-as-cash|review-duplicates> [--settle <full|non-held>] [--json]\n  \
version";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Evaluate {
        snapshot: PathBuf,
        json: bool,
        narrow: bool,
    },
    Act {
        snapshot: PathBuf,
        action: HeaderAction,
        settle: Option<Settlement>,
        json: bool,
    },
    Version,
}

/// Answer given to the hold menu when approving or paying held expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Full,
    NonHeld,
}

impl Settlement {
    fn parse(raw: &str) -> Result<Self, ReportError> {
        match raw {
            "full" => Ok(Settlement::Full),
            "non-held" => Ok(Settlement::NonHeld),
            other => Err(ReportError::Usage(format!(
                "unknown settlement `{other}`, expected `full` or `non-held`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Submit,
    Approve,
    Pay,
    PayElsewhere,
    Delete,
    MarkAsCash,
    ReviewDuplicates,
}

impl HeaderAction {
    fn parse(raw: &str) -> Result<Self, ReportError> {
        let action = match raw {
            "submit" => HeaderAction::Submit,
            "approve" => HeaderAction::Approve,
            "pay" => HeaderAction::Pay,
            "pay-elsewhere" => HeaderAction::PayElsewhere,
            "delete" => HeaderAction::Delete,
            "mark-as-cash" => HeaderAction::MarkAsCash,
            "review-duplicates" => HeaderAction::ReviewDuplicates,
            other => return Err(ReportError::Usage(format!("unknown action `{other}`"))),
        };
        Ok(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    plain: bool,
    command: Command,
}

fn parse_args(args: Vec<String>) -> Result<CliArgs, ReportError> {
    let mut config = None;
    let mut plain = false;
    let mut json = false;
    let mut narrow = false;
    let mut settle = None;
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| ReportError::Usage("--config needs a path".into()))?;
                config = Some(PathBuf::from(path));
            }
            "--plain" => plain = true,
            "--json" => json = true,
            "--narrow" => narrow = true,
            "--settle" => {
                let raw = iter.next().ok_or_else(|| {
                    ReportError::Usage("--settle needs `full` or `non-held`".into())
                })?;
                settle = Some(Settlement::parse(&raw)?);
            }
            flag if flag.starts_with("--") => {
                return Err(ReportError::Usage(format!("unknown option `{flag}`")))
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().ok_or_else(|| ReportError::Usage(USAGE.into()))?;
    if settle.is_some() && name != "act" {
        return Err(ReportError::Usage("--settle only applies to `act`".into()));
    }
    let command = match name.as_str() {
        "evaluate" => Command::Evaluate {
            snapshot: positional
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| ReportError::Usage("evaluate needs a snapshot file".into()))?,
            json,
            narrow,
        },
        "act" => {
            let snapshot = positional
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| ReportError::Usage("act needs a snapshot file".into()))?;
            let action = positional
                .next()
                .ok_or_else(|| ReportError::Usage("act needs an action".into()))?;
            Command::Act {
                snapshot,
                action: HeaderAction::parse(&action)?,
                settle,
                json,
            }
        }
        "version" => Command::Version,
        other => {
            return Err(ReportError::Usage(format!(
                "unknown command `{other}`\n{USAGE}"
            )))
        }
    };

    Ok(CliArgs {
        config,
        plain,
        command,
    })
}

/// Runs one CLI invocation. `args` excludes the program name.
pub fn run_cli(args: Vec<String>) -> Result<(), ReportError> {
    let args = parse_args(args)?;
    let config = load_config(args.config.as_deref())?;
    init_tracing_with(&config.log_filter);
    output::set_preferences(OutputPreferences {
        plain: args.plain,
        quiet: false,
    });
    debug!(command = ?args.command, "running cli command");

    match args.command {
        Command::Evaluate {
            snapshot,
            json,
            narrow,
        } => evaluate_command(&snapshot, json, narrow, &config),
        Command::Act {
            snapshot,
            action,
            settle,
            json,
        } => act_command(&snapshot, action, settle, json),
        Command::Version => {
            let info = build_info();
            println!(
                "money_report_cli {} ({} {}, {} {}, built {})",
                info.version, info.git_hash, info.git_status, info.target, info.profile, info.timestamp
            );
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, ReportError> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(_) => return Ok(EngineConfig::default()),
        },
    };
    manager.load()
}

fn read_snapshot(path: &Path) -> Result<HeaderSnapshot, ReportError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn evaluate_command(
    path: &Path,
    json: bool,
    narrow: bool,
    config: &EngineConfig,
) -> Result<(), ReportError> {
    let snapshot = read_snapshot(path)?;
    let decision = crate::evaluate(&snapshot);
    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }
    for (kind, line) in render_decision(&decision, config, narrow) {
        output::print(kind, line);
    }
    Ok(())
}

fn act_command(
    path: &Path,
    action: HeaderAction,
    settle: Option<Settlement>,
    json: bool,
) -> Result<(), ReportError> {
    let snapshot = read_snapshot(path)?;
    if snapshot.report.is_none() {
        return Err(ReportError::NotLoaded(format!(
            "snapshot {} has no report",
            path.display()
        )));
    }
    let mut controller = HeaderController::new();
    controller.observe(snapshot);
    let mut executor = RecordingExecutor::default();

    let outcome = match action {
        HeaderAction::Submit => controller.submit(),
        HeaderAction::Approve => controller.confirm_approval(),
        HeaderAction::Pay => controller.confirm_payment(Some(PaymentMethod::Expensify), false),
        HeaderAction::PayElsewhere => {
            controller.confirm_payment(Some(PaymentMethod::Elsewhere), false)
        }
        HeaderAction::Delete => {
            if !controller.request_delete() {
                output::warning("deleting this expense is not allowed");
                return Ok(());
            }
            controller.confirm_delete()
        }
        HeaderAction::MarkAsCash => controller.mark_as_cash(),
        HeaderAction::ReviewDuplicates => {
            match controller.review_duplicates() {
                Some(route) => output::success(format!("navigate to {route}")),
                None => output::warning("no duplicates to review"),
            }
            return Ok(());
        }
    };

    let outcome = match (outcome, settle) {
        (FlowOutcome::ShowHoldMenu(_), Some(settle)) => {
            controller.confirm_hold_menu(settle == Settlement::Full)
        }
        (outcome, _) => outcome,
    };
    controller.perform(&outcome, &mut executor);

    match &outcome {
        FlowOutcome::Execute(command) => {
            if json {
                println!("{}", serde_json::to_string_pretty(command)?);
            } else {
                output::success(format!("executed {}", command.name()));
            }
            if let Some(route) = controller.on_delete_modal_hidden() {
                output::info(format!("navigate to {route}"));
            }
        }
        FlowOutcome::ShowNoDelegateAccess => {
            output::warning("delegate access does not allow this action")
        }
        FlowOutcome::ShowHoldMenu(request_type) => {
            output::print(MessageKind::Section, format!("Hold menu ({request_type:?})"));
            if let Some(menu) = controller.hold_menu() {
                output::info(format!("full amount: {}", menu.full_amount));
                match menu.non_held_amount {
                    Some(amount) => output::info(format!("non-held amount: {amount}")),
                    None => output::info("only the full amount can be settled"),
                }
            }
            output::info("rerun with --settle <full|non-held> to continue");
        }
        FlowOutcome::Ignored(reason) => output::warning(format!("ignored: {reason}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_evaluate_with_flags_anywhere() {
        let parsed = parse_args(args(&["--json", "evaluate", "snap.json", "--narrow"])).unwrap();
        assert_eq!(
            parsed.command,
            Command::Evaluate {
                snapshot: PathBuf::from("snap.json"),
                json: true,
                narrow: true,
            }
        );
    }

    #[test]
    fn parses_act_and_config() {
        let parsed =
            parse_args(args(&["--config", "cfg.json", "act", "snap.json", "mark-as-cash"]))
                .unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("cfg.json")));
        assert!(matches!(
            parsed.command,
            Command::Act {
                action: HeaderAction::MarkAsCash,
                ..
            }
        ));
    }

    #[test]
    fn parses_hold_settlement_for_act_only() {
        let parsed =
            parse_args(args(&["act", "snap.json", "approve", "--settle", "non-held"])).unwrap();
        assert!(matches!(
            parsed.command,
            Command::Act {
                action: HeaderAction::Approve,
                settle: Some(Settlement::NonHeld),
                ..
            }
        ));
        assert!(matches!(
            parse_args(args(&["act", "snap.json", "pay", "--settle", "half"])),
            Err(ReportError::Usage(_))
        ));
        assert!(matches!(
            parse_args(args(&["evaluate", "snap.json", "--settle", "full"])),
            Err(ReportError::Usage(_))
        ));
    }

    #[test]
    fn rejects_unknown_command_and_action() {
        assert!(matches!(
            parse_args(args(&["explode"])),
            Err(ReportError::Usage(_))
        ));
        assert!(matches!(
            parse_args(args(&["act", "snap.json", "refund"])),
            Err(ReportError::Usage(_))
        ));
        assert!(matches!(parse_args(Vec::new()), Err(ReportError::Usage(_))));
    }
}
