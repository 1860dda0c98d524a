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

use std::path::Path;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use himawari_common::{config::load_config_path, datetime::minutes};
use crate::errors::Result;
use crate::storage::DEFAULT_S3_REGION;
use crate::vocabulary::{check_protocol, parse_connection_type, ConnectionType, Protocol};

/// catalog configuration, normally loaded from a RON file such as
/// ```text
/// CatalogConfig(
///     protocol: "s3",
///     s3_region: "us-east-1",
///     max_concurrent_listings: 4,
/// )
/// ```
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub protocol: String,
    pub base_dir: Option<String>,
    pub s3_region: String,
    /// max number of timeslot directories we list concurrently
    pub max_concurrent_listings: usize,
    pub connection_type: Option<String>,
    /// how far back we look for the latest available data
    pub look_ahead_minutes: u32,
}

impl Default for CatalogConfig {
    fn default ()->Self {
        CatalogConfig {
            protocol: "s3".to_string(),
            base_dir: None,
            s3_region: DEFAULT_S3_REGION.to_string(),
            max_concurrent_listings: 4,
            connection_type: None,
            look_ahead_minutes: 30,
        }
    }
}

impl CatalogConfig {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        Ok( load_config_path( path)? )
    }

    pub fn local (base_dir: &str)->Self {
        CatalogConfig { protocol: "local".to_string(), base_dir: Some(base_dir.to_string()), ..Self::default() }
    }

    pub fn protocol (&self)->Result<Protocol> {
        check_protocol( &self.protocol)
    }

    pub fn connection_type (&self)->Result<Option<ConnectionType>> {
        self.connection_type.as_deref().map( parse_connection_type).transpose()
    }

    pub fn look_ahead (&self)->TimeDelta {
        minutes( self.look_ahead_minutes as i64)
    }
}
