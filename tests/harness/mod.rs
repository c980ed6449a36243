// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact gate attack simulation.
//!
//! This module provides utilities for simulating abusive submission
//! patterns against the rate limiter and validator.

pub mod attacks;
pub mod generators;
pub mod metrics;
