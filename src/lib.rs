//! Contractor Billing Engine
//!
//! This crate computes what a contractor is paid and what the client is
//! charged for the hours worked in a month, under employment, mandate and
//! B2B contracts, and aggregates billing records into monthly financial
//! reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
