//! Core of the fellows.best opportunity directory.

pub mod catalog;
pub mod config;
pub mod deadline;
pub mod error;
pub mod pages;
pub mod share;
pub mod site;
pub mod telemetry;
