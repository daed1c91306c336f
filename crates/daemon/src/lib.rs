// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rk-daemon: loads and validates `RootConfig`, wires every root-kernel
//! component together, and serves the admin HTTP surface. Ships as the
//! `rk` binary.

pub mod config;
pub mod kernel;

pub use config::{AdminConfig, ConfigError, DiscoveryConfig, RootConfig, RootSection, TelemetryConfig, TelemetryFilters};
pub use kernel::{RootKernel, ROOT_KERNEL_ID};
