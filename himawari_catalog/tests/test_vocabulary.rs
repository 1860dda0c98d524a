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

use himawari_catalog::*;

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_satellite_aliases () {
    assert_eq!( check_satellite("h8").unwrap(), Satellite::Himawari8);
    assert_eq!( check_satellite("HIMAWARI-8").unwrap(), Satellite::Himawari8);
    assert_eq!( check_satellite("himawari9").unwrap(), Satellite::Himawari9);
    assert_eq!( check_satellite(" H09 ").unwrap(), Satellite::Himawari9);

    match check_satellite("goes-16") {
        Err(HimawariCatalogError::InvalidArgument(msg)) => assert!( msg.contains("himawari-8")),
        other => panic!("unexpected result {other:?}")
    }
}

#[test]
fn test_channel_aliases () {
    assert_eq!( check_channel("B01").unwrap(), Channel::B01);
    assert_eq!( check_channel("b13").unwrap(), Channel::B13);
    assert_eq!( check_channel("0.64").unwrap(), Channel::B03);
    assert_eq!( check_channel("red").unwrap(), Channel::B03);
    assert_eq!( check_channel("Blue").unwrap(), Channel::B01);
    assert_eq!( check_channel("12.4").unwrap(), Channel::B15);
    assert_eq!( check_channel("C16").unwrap(), Channel::B16);
    assert!( matches!( check_channel("B17"), Err(HimawariCatalogError::InvalidArgument(_))));

    assert_eq!( check_channels( &["1", "GREEN"]).unwrap(), vec![Channel::B01, Channel::B02]);
    assert!( check_channels( &["1", "purple"]).is_err());
}

#[test]
fn test_sector_aliases () {
    assert_eq!( check_sector("full disk").unwrap(), Sector::FLDK);
    assert_eq!( check_sector("FLDK").unwrap(), Sector::FLDK);
    assert_eq!( check_sector("japan").unwrap(), Sector::Japan);
    assert_eq!( check_sector("target").unwrap(), Sector::Target);
    assert_eq!( check_sector("M").unwrap(), Sector::Landmark);
    assert!( check_sector("CONUS").is_err());

    assert_eq!( check_sector_for_product("F", Product::CMSK).unwrap(), Sector::FLDK);
    assert!( matches!( check_sector_for_product("Japan", Product::RRQPE), Err(HimawariCatalogError::InvalidArgument(_))));
    assert_eq!( check_sector_for_product("Japan", Product::Rad).unwrap(), Sector::Japan);
}

#[test]
fn test_products () {
    assert_eq!( check_product_level("l1b").unwrap(), ProductLevel::L1b);
    assert_eq!( check_product_level("L2").unwrap(), ProductLevel::L2);
    assert!( check_product_level("L3").is_err());

    assert_eq!( check_product("cmsk", Some(ProductLevel::L2)).unwrap(), Product::CMSK);
    assert_eq!( check_product("Rad", None).unwrap(), Product::Rad);
    assert!( check_product("Rad", Some(ProductLevel::L2)).is_err());

    assert_eq!( available_products( Some(&[ProductLevel::L1b][..])), vec![Product::Rad]);
    assert_eq!( available_products( None).len(), 5);
    assert_eq!( available_sectors( Some(Product::CHGT)), vec![Sector::FLDK]);
    assert_eq!( available_sectors( None).len(), 4);
}

#[test]
fn test_scene_abbr () {
    assert_eq!( check_scene_abbr( &["R1","r2"], Some(Sector::Japan)).unwrap(), vec![SceneAbbr::R1, SceneAbbr::R2]);
    assert_eq!( check_scene_abbr( &["R5"], Some(Sector::Landmark)).unwrap(), vec![SceneAbbr::R5]);
    assert!( check_scene_abbr( &["R3"], Some(Sector::Japan)).is_err());
    assert!( check_scene_abbr( &["R1"], Some(Sector::FLDK)).is_err());
    assert!( check_scene_abbr( &["R9"], None).is_err());
}

#[test]
fn test_group_keys_and_connection () {
    assert_eq!( check_group_key("start_time").unwrap(), GroupKey::StartTime);
    assert_eq!( check_group_key("scene_abbr").unwrap(), GroupKey::SceneAbbr);
    assert!( check_group_key("colour").is_err());
    assert_eq!( available_group_keys().len(), 11);

    assert_eq!( check_protocol("S3").unwrap(), Protocol::S3);
    assert_eq!( check_protocol("file").unwrap(), Protocol::Local);
    assert!( matches!( check_protocol("gcs"), Err(HimawariCatalogError::NotImplemented(_))));
    assert_eq!( available_protocols(), vec![Protocol::S3]);

    assert_eq!( check_connection_type( None, Protocol::S3).unwrap(), Some(ConnectionType::Bucket));
    assert_eq!( check_connection_type( Some("nc_bytes"), Protocol::S3).unwrap(), Some(ConnectionType::NcBytes));
    assert_eq!( check_connection_type( Some("https"), Protocol::Local).unwrap(), None);
    assert!( matches!( check_connection_type( Some("ftp"), Protocol::S3), Err(HimawariCatalogError::NotImplemented(_))));
}

#[test]
fn test_sector_cadence () {
    use himawari_common::datetime::{minutes, secs};

    assert_eq!( Sector::FLDK.cadence(), minutes(10));
    assert_eq!( Sector::Japan.cadence(), secs(150));
    assert_eq!( Sector::Target.cadence(), secs(150));
    assert_eq!( Sector::Landmark.cadence(), secs(30));
}
