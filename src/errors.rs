// ABOUTME: Re-exports the unified error types from the foundation crate
// ABOUTME: Keeps `crate::errors` paths stable for every module of the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! See `fridge_core::errors` for the definitions.

pub use fridge_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, GenerationError,
    ValidationError,
};
