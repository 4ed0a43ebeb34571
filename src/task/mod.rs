//! Task management module
//!
//! This module provides the daily task log:
//! - Task lifecycle (todo -> doing -> done | carry)
//! - Per-date store of tasks and carried stubs
//! - Carry-forward onto the next business day at save time
//! - Parse and write the task file format

pub mod carry;
pub mod model;
pub mod parser;
pub mod store;

pub use carry::{CarryForwardEngine, CarryReport};
pub use model::{CarryStub, Task, TaskStatus};
pub use parser::{parse, serialize};
pub use store::{DateBucket, Store};
