// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for riders.

pub mod rider;
pub mod summary;

pub use rider::{FieldSpec, Rider};
pub use summary::RiderSummary;
