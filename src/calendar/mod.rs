//! Business-day calendar
//!
//! This module decides which dates are working days:
//! - Exception table lookup with a Monday-Friday fallback
//! - Bounded next/previous business day scans
//! - Loading the exception table from a CSV file

pub mod loader;
pub mod resolver;

pub use loader::CalendarLoader;
pub use resolver::{CalendarException, CalendarResolver};
