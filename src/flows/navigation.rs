use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ReportId;

/// Destinations the header can ask the navigation layer for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Explains what holding an expense means.
    ProcessMoneyRequestHold { back_to: Option<String> },
    TransactionDuplicateReview {
        thread_report_id: ReportId,
        back_to: Option<String>,
    },
    Report { report_id: ReportId },
    Home,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ProcessMoneyRequestHold { back_to } => {
                with_back_to("hold-expense-educational", back_to)
            }
            Route::TransactionDuplicateReview {
                thread_report_id,
                back_to,
            } => with_back_to(&format!("r/{thread_report_id}/duplicates/review"), back_to),
            Route::Report { report_id } => format!("r/{report_id}"),
            Route::Home => "home".to_string(),
        }
    }
}

fn with_back_to(path: &str, back_to: &Option<String>) -> String {
    match back_to {
        Some(back_to) => format!("{path}?backTo={back_to}"),
        None => path.to_string(),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Opaque navigation side effect. The header never relies on its outcome.
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
}

/// Keeps every requested route in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub routes: Vec<Route>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, route: Route) {
        self.routes.push(route);
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn paths_carry_back_to_parameter() {
        let route = Route::ProcessMoneyRequestHold {
            back_to: Some("r/123".into()),
        };
        assert_eq!(route.path(), "hold-expense-educational?backTo=r/123");

        let id = Uuid::nil();
        let review = Route::TransactionDuplicateReview {
            thread_report_id: id,
            back_to: None,
        };
        assert_eq!(review.to_string(), format!("r/{id}/duplicates/review"));
    }
}
