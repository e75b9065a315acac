// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod client;
pub mod config;
pub mod configurator;
pub mod constants;
pub mod error;
pub mod namespaces;

#[cfg(test)]
pub mod test_utils;
