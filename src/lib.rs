// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Zsun riders: typed rider records from loosely-typed JSON
//!
//! This crate coerces externally supplied rider JSON into typed records,
//! keeps them in a keyed in-memory repository, and derives the display
//! strings shown next to each rider.

pub mod coercion;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{Result, RiderError};
pub use models::Rider;
pub use services::{RiderRepository, RiderSummaryCache};
