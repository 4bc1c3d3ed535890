pub mod json_backend;
pub mod memory;

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{domain::ReportId, engine::HeaderSnapshot, errors::ReportError};

pub type Result<T> = std::result::Result<T, ReportError>;

/// Receives a fresh snapshot every time an entity the header depends on
/// changes.
pub trait SnapshotObserver {
    fn on_snapshot(&mut self, snapshot: &HeaderSnapshot);
}

pub type SharedObserver = Rc<RefCell<dyn SnapshotObserver>>;

/// Identifies one header: the money report plus the transaction thread that is
/// open on top of it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeaderKey {
    pub report_id: ReportId,
    #[serde(default)]
    pub thread_report_id: Option<ReportId>,
}

impl HeaderKey {
    pub fn report(report_id: ReportId) -> Self {
        Self {
            report_id,
            thread_report_id: None,
        }
    }

    pub fn with_thread(mut self, thread_report_id: ReportId) -> Self {
        self.thread_report_id = Some(thread_report_id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Persistence for the whole store.
pub trait StoreBackend {
    fn save(&self, contents: &StoreContents) -> Result<()>;
    fn load(&self) -> Result<StoreContents>;
}

pub use json_backend::{load_contents_from_path, save_contents_to_path, JsonStore};
pub use memory::{MemoryStore, StoreContents};
