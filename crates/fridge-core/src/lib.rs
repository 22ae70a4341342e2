// ABOUTME: Core types and constants for the fridge recipe recommendation service
// ABOUTME: Foundation crate with error handling, request and recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fridge Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! recommendation pipeline. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the pipeline's domain errors
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Requests, recipes, recommendations and cache entries

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (requests, recipes, recommendations)
pub mod models;
