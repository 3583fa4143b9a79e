// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors
// ABOUTME: Helper modules for twinforge-cli
// ABOUTME: Output formatting

pub mod display;
