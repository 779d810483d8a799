//! Service runtime: analysis cycles and the triggers that start them.

pub mod cycle;
pub mod http;
pub mod listener;
pub mod scheduler;
pub mod trigger;

pub use cycle::*;
pub use listener::CommandListener;
pub use scheduler::CycleScheduler;
pub use trigger::{Trigger, TriggerSource};
