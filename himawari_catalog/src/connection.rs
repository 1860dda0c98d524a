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

//! representation of bucket paths for consumers that do not speak the native object store protocol

use std::collections::BTreeMap;

use crate::errors::{Result, invalid_argument};
use crate::grouping::ResultSet;
use crate::vocabulary::{ConnectionType, Protocol};

pub const S3_HTTPS_DOMAIN: &str = "s3.amazonaws.com";
pub const NC_BYTES_SUFFIX: &str = "#mode=bytes";

/// `s3://<bucket>/<key>` -> `https://<bucket>.s3.amazonaws.com/<key>`
pub fn to_https_path (path: &str)->Result<String> {
    let rest = path.strip_prefix( Protocol::S3.bucket_prefix())
        .ok_or_else(|| invalid_argument( format!("not an s3 path: {path}")))?;
    match rest.split_once('/') {
        Some((bucket,key)) => Ok( format!("https://{bucket}.{S3_HTTPS_DOMAIN}/{key}")),
        None => Ok( format!("https://{rest}.{S3_HTTPS_DOMAIN}"))
    }
}

/// mark url for netCDF byte range access
pub fn add_nc_bytes (url: &str)->String {
    format!("{url}{NC_BYTES_SUFFIX}")
}

pub fn apply_connection_type (path: &str, connection_type: ConnectionType)->Result<String> {
    match connection_type {
        ConnectionType::Bucket => Ok( path.to_string()),
        ConnectionType::Https => to_https_path( path),
        ConnectionType::NcBytes => Ok( add_nc_bytes( &to_https_path( path)?)),
    }
}

fn convert_paths (paths: Vec<String>, connection_type: ConnectionType)->Result<Vec<String>> {
    paths.iter().map(|p| apply_connection_type( p, connection_type)).collect()
}

/// rewrite all paths of a result set. This is a no-op for local storage
pub fn set_connection_type (result: ResultSet, connection_type: Option<ConnectionType>, protocol: Protocol)->Result<ResultSet> {
    let connection_type = match connection_type {
        Some(ct) if protocol.is_bucket() => ct,
        _ => return Ok(result)
    };
    if connection_type == ConnectionType::Bucket {
        return Ok(result)
    }

    match result {
        ResultSet::Files(paths) => Ok( ResultSet::Files( convert_paths( paths, connection_type)?)),
        ResultSet::Grouped(groups) => {
            let mut converted = BTreeMap::new();
            for (k, paths) in groups {
                converted.insert( k, convert_paths( paths, connection_type)?);
            }
            Ok( ResultSet::Grouped( converted))
        }
    }
}
