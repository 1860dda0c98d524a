/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! shared utilities for the Himawari catalog crates: logging macro layer, config loading,
//! date/time helpers and path helpers

pub mod errors;
pub use errors::*;

pub mod config;
pub mod datetime;
pub mod fs;

// re-exported so that the logging macros below resolve in dependent crates
pub use tracing;

use tracing_subscriber::EnvFilter;

/*
 * we intercept logging/tracing macros here to have a central place where we can remove/replace them
 */

#[macro_export]
macro_rules! trace {
    ( $( $id:ident = $e:expr ),* ) => { $crate::tracing::trace!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { $crate::tracing::trace!( $( $e ),* ) }
}

#[macro_export]
macro_rules! debug {
    ( $( $id:ident = $e:expr ),* ) => { $crate::tracing::debug!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { $crate::tracing::debug!( $( $e ),* ) }
}

#[macro_export]
macro_rules! info {
    ( $( $id:ident = $e:expr ),* ) => { $crate::tracing::info!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { $crate::tracing::info!( $( $e ),* ) }
}

#[macro_export]
macro_rules! warn {
    ( $( $id:ident = $e:expr ),* ) => { $crate::tracing::warn!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { $crate::tracing::warn!( $( $e ),* ) }
}

#[macro_export]
macro_rules! error {
    ( $( $id:ident = $e:expr ),* ) => { $crate::tracing::error!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { $crate::tracing::error!( $( $e ),* ) }
}

/// install a fmt subscriber that is controlled by the `RUST_LOG` environment variable, falling
/// back to `default_directive` (e.g. "info" or "himawari_catalog=debug") if that is not set.
/// Calling this more than once is harmless - only the first call installs a subscriber
pub fn init_tracing (default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
