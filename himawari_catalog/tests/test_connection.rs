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

use std::collections::BTreeMap;
use himawari_catalog::*;
use himawari_catalog::connection::{add_nc_bytes, apply_connection_type, to_https_path};

// run with "cargo test test_xx -- --nocapture"

const S3_PATH: &str = "s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0000/HS_H08_20210101_0000_B01_FLDK_R10_S0110.DAT.bz2";
const HTTPS_PATH: &str = "https://noaa-himawari8.s3.amazonaws.com/AHI-L1b-FLDK/2021/01/01/0000/HS_H08_20210101_0000_B01_FLDK_R10_S0110.DAT.bz2";

#[test]
fn test_https () {
    assert_eq!( to_https_path( S3_PATH).unwrap(), HTTPS_PATH);
    assert_eq!( add_nc_bytes( HTTPS_PATH), format!("{HTTPS_PATH}#mode=bytes"));
    assert!( to_https_path( "/data/HIMAWARI-8/x.bz2").is_err());

    assert_eq!( apply_connection_type( S3_PATH, ConnectionType::Bucket).unwrap(), S3_PATH);
    assert_eq!( apply_connection_type( S3_PATH, ConnectionType::NcBytes).unwrap(), format!("{HTTPS_PATH}#mode=bytes"));
}

#[test]
fn test_result_sets () {
    let rs = ResultSet::Files( vec![S3_PATH.to_string()]);
    let rs = set_connection_type( rs, Some(ConnectionType::Https), Protocol::S3).unwrap();
    assert_eq!( rs, ResultSet::Files( vec![HTTPS_PATH.to_string()]));

    let mut groups = BTreeMap::new();
    groups.insert( GroupValue::Text("B01".into()), vec![S3_PATH.to_string()]);
    let rs = set_connection_type( ResultSet::Grouped( groups), Some(ConnectionType::NcBytes), Protocol::S3).unwrap();
    assert_eq!( rs.paths(), vec![format!("{HTTPS_PATH}#mode=bytes").as_str()]);

    // no-op for local storage
    let local = ResultSet::Files( vec!["/data/HIMAWARI-8/x.bz2".to_string()]);
    assert_eq!( set_connection_type( local.clone(), Some(ConnectionType::Https), Protocol::Local).unwrap(), local);
    assert_eq!( set_connection_type( local.clone(), None, Protocol::S3).unwrap(), local);
}
