// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlotdeskError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Commission '{id}' cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: &'static str,
        to: &'static str,
    },

    #[error("Unknown {kind} '{value}'")]
    UnknownStatus { kind: &'static str, value: String },

    #[error("Unknown rejection reason '{0}'")]
    UnknownReason(String),

    #[error("Property '{id}' is {status}, only AVAILABLE plots can be reserved")]
    NotAvailable { id: String, status: &'static str },

    #[error("Reservation hold of {0} seconds is out of range")]
    HoldOutOfRange(u64),
}
