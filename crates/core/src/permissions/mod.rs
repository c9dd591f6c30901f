//! Permission broker: a single promise-shaped answer ("usable or not")
//! over the imperative OS permission API, with an explain-once rationale
//! gate in between.

mod broker;
mod ports;
mod slot;

pub use broker::PermissionBroker;
pub use ports::PermissionsApi;
pub use slot::{PromptReply, PromptSlot, SlotBusy};
