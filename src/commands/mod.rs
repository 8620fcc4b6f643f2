// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod properties;
pub mod projects;
pub mod deals;
pub mod commissions;
pub mod leads;
pub mod agents;
pub mod executive;
pub mod reserve;
pub mod exporter;
pub mod settings;
