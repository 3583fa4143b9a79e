// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors
// ABOUTME: Re-exports command modules for twinforge-cli
// ABOUTME: Provides access to projection commands

pub mod projection;
