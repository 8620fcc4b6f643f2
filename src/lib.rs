// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod countdown;
pub mod desk;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod metrics;
pub mod models;
pub mod store;
pub mod utils;
pub mod commands;
