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

use chrono::{TimeZone, Utc};
use himawari_common::datetime::*;
use himawari_common::fs::{basename, join_path};
use himawari_common::config::load_config_str;
use serde::Deserialize;

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_floor_to_minutes () {
    let dt = Utc.with_ymd_and_hms( 2021,1,1, 12,37,15).unwrap();
    assert_eq!( floor_to_minutes( dt, 10), Utc.with_ymd_and_hms( 2021,1,1, 12,30,0).unwrap());
    assert_eq!( full_minute( dt), Utc.with_ymd_and_hms( 2021,1,1, 12,37,0).unwrap());
}

#[test]
fn test_time_steps () {
    let start = Utc.with_ymd_and_hms( 2021,1,1, 0,0,0).unwrap();
    let end = Utc.with_ymd_and_hms( 2021,1,1, 0,20,0).unwrap();
    let steps = time_steps( start, end, minutes(10));
    assert_eq!( steps.len(), 3);
    assert_eq!( steps[2], end);

    assert!( time_steps( end, start, minutes(10)).is_empty());
    assert!( time_steps( start, end, secs(0)).is_empty());
}

#[test]
fn test_format_delta () {
    assert_eq!( format_delta( secs(150)), "2m30s");
    assert_eq!( format_delta( minutes(10)), "10m");
    assert_eq!( format_delta( secs(0)), "0s");
    assert_eq!( format_delta( hours(1) + secs(5)), "1h5s");
}

#[test]
fn test_parse_utc_datetime () {
    let expected = Utc.with_ymd_and_hms( 2021,1,1, 0,10,0).unwrap();
    for s in ["2021-01-01 00:10:00", "2021-01-01T00:10:00", "2021-01-01 00:10", "2021-01-01T00:10:00Z", "202101010010"] {
        assert_eq!( parse_utc_datetime(s).unwrap(), expected, "failed to parse {s}");
    }
    assert_eq!( parse_utc_datetime("2021-01-01").unwrap(), Utc.with_ymd_and_hms( 2021,1,1, 0,0,0).unwrap());
    assert!( parse_utc_datetime("yesterday").is_err());
}

#[test]
fn test_paths () {
    assert_eq!( basename("s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0000/a.bz2"), "a.bz2");
    assert_eq!( basename("a.bz2"), "a.bz2");
    assert_eq!( join_path("/data/", "/HIMAWARI-8"), "/data/HIMAWARI-8");
    assert_eq!( join_path("s3://noaa-himawari8", "AHI-L1b-FLDK"), "s3://noaa-himawari8/AHI-L1b-FLDK");
}

#[derive(Deserialize,Debug,PartialEq)]
struct TestConfig {
    name: String,
    interval: u32,
}

#[test]
fn test_load_config_str () {
    let config: TestConfig = load_config_str( r#"TestConfig( name: "fldk", interval: 10 )"#).unwrap();
    assert_eq!( config, TestConfig { name: "fldk".to_string(), interval: 10 });
    assert!( load_config_str::<TestConfig>("TestConfig( name: 42 )").is_err());
}

#[test]
fn test_load_config_path () {
    use std::io::Write;
    use himawari_common::config::load_config_path;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!( file, r#"TestConfig( name: "japan", interval: 150 )"#).unwrap();
    let config: TestConfig = load_config_path( file.path()).unwrap();
    assert_eq!( config.interval, 150);

    assert!( load_config_path::<TestConfig,_>( "/no/such/config.ron").is_err());
}
