//! Leave Engine
//!
//! This crate tracks employee leave records and validates vacation requests
//! against CLT-style splitting rules: a 30-day cap per acquisitive period,
//! a 5-day minimum split, and a mandatory 14-day split once the allotment
//! is used up.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod rules;
pub mod service;
pub mod telemetry;
