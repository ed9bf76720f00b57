//! CLI library components for the medication date finder.

#![allow(missing_docs)]

pub mod commands;
pub mod logging;
pub mod summary;
