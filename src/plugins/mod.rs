// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Demonstration plugins.
//!
//! These are external collaborators of the core engine: small
//! [`FunctionPlugin`](crate::functions::FunctionPlugin) implementations
//! showing the registration seam in use. Hosts register their own plugins
//! the same way.

mod clock;
mod web;

pub use clock::ClockPlugin;
pub use web::WebPlugin;
