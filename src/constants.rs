// ABOUTME: Re-exports application constants from the foundation crate
// ABOUTME: Grouped by domain: cache, limits, pipeline, endpoints, ports, service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module

pub use fridge_core::constants::{cache, endpoints, limits, pipeline, ports, service_names};
