// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod codec;
pub mod derived;
pub mod repository;
pub mod summary_cache;

pub use codec::{RiderBatch, RiderInput};
pub use repository::RiderRepository;
pub use summary_cache::RiderSummaryCache;
