//! The action eligibility engine: a pure mapping from a [`HeaderSnapshot`] to
//! a [`HeaderDecision`].

pub mod decision;
pub mod snapshot;
pub mod status;

pub use decision::{evaluate, HeaderDecision, SettlementPresentation};
pub use snapshot::HeaderSnapshot;
pub use status::{BrokenConnectionAudience, StatusBanner, StatusIcon};
