//! tasklog - Daily task log with business-day carry-forward
//!
//! Tasks are grouped per date. Tasks marked `carry` move on to the next
//! business day when the log is saved.

pub mod app;
pub mod calendar;
pub mod cli;
pub mod task;
pub mod view;
