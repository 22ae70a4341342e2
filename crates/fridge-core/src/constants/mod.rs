// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for caching, pipeline budgets and request limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Cache-related constants (expiry windows, key prefixes)
pub mod cache;
/// Request bounds and quota defaults
pub mod limits;
/// Pipeline structure and time budget constants
pub mod pipeline;

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// API base path
    pub const API_BASE: &str = "/api/v1";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
}

/// Service identity reported by health checks and logs
pub mod service_names {
    /// Service name
    pub const FRIDGE_RECIPES_SERVER: &str = "fridge-recipes-server";
}
