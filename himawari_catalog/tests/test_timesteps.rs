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

use std::sync::Arc;
use chrono::{DateTime, TimeZone, Utc};
use himawari_catalog::*;
use himawari_common::datetime::minutes;

// run with "cargo test test_xx -- --nocapture"

fn utc (hh: u32, mm: u32)->DateTime<Utc> {
    Utc.with_ymd_and_hms( 2021,1,1, hh,mm,0).unwrap()
}

fn fldk_path (t: DateTime<Utc>)->String {
    format!("s3://noaa-himawari8/AHI-L1b-FLDK/{}/HS_H08_{}_B01_FLDK_R10_S0110.DAT.bz2", t.format("%Y/%m/%d/%H%M"), t.format("%Y%m%d_%H%M"))
}

/// FLDK acquisitions every 10min from 00:00 to 01:00, with "now" at 01:05
fn catalog_without (missing: &[DateTime<Utc>])->Catalog {
    let paths: Vec<String> = (0..=6).map(|i| utc(0,0) + minutes(10*i))
        .filter(|t| !missing.contains(t))
        .map( fldk_path)
        .collect();
    Catalog::new( Arc::new( MemoryFileSystem::new( Protocol::S3, &paths)), None).with_clock(|| utc(1,5))
}

fn query ()->ProductQuery {
    ProductQuery::new( "himawari-8", "L1b", "Rad").with_sector( "FLDK")
}

#[tokio::test]
async fn test_closest_start_time () {
    let catalog = catalog_without( &[]);
    assert_eq!( catalog.find_closest_start_time( &query(), utc(0,23)).await.unwrap(), utc(0,20));
    assert_eq!( catalog.find_closest_start_time( &query(), utc(0,27)).await.unwrap(), utc(0,30));
    assert_eq!( catalog.find_closest_start_time( &query(), utc(0,25)).await.unwrap(), utc(0,20)); // tie goes to earlier

    let files = catalog.find_closest_files( &query(), utc(0,23)).await.unwrap();
    assert_eq!( files, vec![fldk_path( utc(0,20))]);

    let res = catalog.find_closest_start_time( &query(), utc(2,0)).await;
    assert!( matches!( res, Err(HimawariCatalogError::InvalidArgument(_))));

    let res = catalog.find_closest_start_time( &query(), Utc.with_ymd_and_hms( 2020,12,31, 12,0,0).unwrap()).await;
    assert!( matches!( res, Err(HimawariCatalogError::NoDataError(_))));
}

#[tokio::test]
async fn test_latest () {
    let catalog = catalog_without( &[]);
    assert_eq!( catalog.find_latest_start_time( &query(), None).await.unwrap(), utc(1,0));

    let files = catalog.find_latest_files( &query(), 3, true, None).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![utc(0,40), utc(0,50), utc(1,0)]);
    assert_eq!( files[&utc(1,0)], vec![fldk_path( utc(1,0))]);

    let catalog = catalog_without( &[utc(0,40), utc(0,50), utc(1,0)]);
    let res = catalog.find_latest_start_time( &query(), Some(minutes(10))).await;
    assert!( matches!( res, Err(HimawariCatalogError::NoDataError(_))));
}

#[tokio::test]
async fn test_previous_files () {
    let catalog = catalog_without( &[]);

    let files = catalog.find_previous_files( &query(), utc(0,30), 3, false, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![utc(0,0), utc(0,10), utc(0,20)]);

    let files = catalog.find_previous_files( &query(), utc(0,30), 2, true, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![utc(0,20), utc(0,30)]);

    let res = catalog.find_previous_files( &query(), utc(0,10), 3, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::InsufficientDataError(_))));

    let res = catalog.find_previous_files( &query(), utc(0,0), 2, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::NoDataError(_))));
}

#[tokio::test]
async fn test_next_files () {
    let catalog = catalog_without( &[]);

    let files = catalog.find_next_files( &query(), utc(0,30), 2, false, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![utc(0,40), utc(0,50)]);

    let files = catalog.find_next_files( &query(), utc(0,30), 2, true, false).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![utc(0,30), utc(0,40)]);

    // nothing after the latest acquisition
    let res = catalog.find_next_files( &query(), utc(1,0), 1, false, false).await;
    assert!( matches!( res, Err(HimawariCatalogError::NoDataError(_))));
}

#[tokio::test]
async fn test_consistency_checks () {
    let catalog = catalog_without( &[]);
    let res = catalog.find_previous_files( &query(), utc(0,33), 2, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::InconsistentQueryError(_))));

    // without consistency check we start from the closest acquisition
    let files = catalog.find_previous_files( &query(), utc(0,33), 2, false, false).await.unwrap();
    assert_eq!( files.keys().copied().collect::<Vec<_>>(), vec![utc(0,10), utc(0,20)]);

    let catalog = catalog_without( &[utc(0,20)]);
    let res = catalog.find_previous_files( &query(), utc(0,40), 3, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::IrregularIntervalError(_))));

    let files = catalog.find_previous_files( &query(), utc(0,40), 3, false, false).await.unwrap();
    assert_eq!( files.keys().copied().collect::<Vec<_>>(), vec![utc(0,0), utc(0,10), utc(0,30)]);
}

#[tokio::test]
async fn test_https_timesteps () {
    let catalog = catalog_without( &[]);
    let files = catalog.find_previous_files( &query().with_connection_type("https"), utc(0,30), 1, false, true).await.unwrap();
    assert!( files[&utc(0,20)][0].starts_with("https://noaa-himawari8.s3.amazonaws.com/"));
}

fn japan_path (slot: DateTime<Utc>, obs: u32)->String {
    format!("s3://noaa-himawari8/AHI-L1b-Japan/{}/HS_H08_{}_B01_JP{obs:02}_R10_S0101.DAT.bz2", slot.format("%Y/%m/%d/%H%M"), slot.format("%Y%m%d_%H%M"))
}

/// Japan acquisitions every 2m30s within the 23:50 and 00:00 timeslots, with "now" at 00:20
fn japan_catalog ()->Catalog {
    let prev = Utc.with_ymd_and_hms( 2020,12,31, 23,50,0).unwrap();
    let paths: Vec<String> = [prev, utc(0,0)].into_iter()
        .flat_map(|slot| (1..=4).map( move |obs| japan_path( slot, obs)))
        .collect();
    Catalog::new( Arc::new( MemoryFileSystem::new( Protocol::S3, &paths)), None).with_clock(|| utc(0,20))
}

fn japan_query ()->ProductQuery {
    ProductQuery::new( "himawari-8", "L1b", "Rad").with_sector( "Japan")
}

#[tokio::test]
async fn test_japan_timesteps () {
    let catalog = japan_catalog();
    let t = |hh: u32, mm: u32, ss: u32| {
        if hh == 23 { Utc.with_ymd_and_hms( 2020,12,31, hh,mm,ss).unwrap() } else { Utc.with_ymd_and_hms( 2021,1,1, hh,mm,ss).unwrap() }
    };

    assert_eq!( catalog.find_closest_start_time( &japan_query(), t(0,3,0)).await.unwrap(), t(0,2,30));
    assert_eq!( catalog.find_closest_files( &japan_query(), t(0,6,0)).await.unwrap(), vec![japan_path( utc(0,0), 3)]);

    let files = catalog.find_previous_files( &japan_query(), t(0,2,30), 3, false, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![t(23,55,0), t(23,57,30), t(0,0,0)]);
    assert_eq!( files[&t(0,0,0)], vec![japan_path( utc(0,0), 1)]);

    let files = catalog.find_next_files( &japan_query(), t(0,2,30), 2, true, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    assert_eq!( times, vec![t(0,2,30), t(0,5,0)]);

    // 00:01:00 is not a Japan start time
    let res = catalog.find_previous_files( &japan_query(), t(0,1,0), 2, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::InconsistentQueryError(_))));
}

#[tokio::test]
async fn test_landmark_next_files () {
    let paths: Vec<String> = (1..=5)
        .map(|obs| format!("s3://noaa-himawari8/AHI-L1b-Target/2021/01/01/0000/HS_H08_20210101_0000_B01_R4{obs:02}_R10_S0101.DAT.bz2"))
        .collect();
    let catalog = Catalog::new( Arc::new( MemoryFileSystem::new( Protocol::S3, &paths)), None).with_clock(|| utc(0,20));
    let query = ProductQuery::new( "himawari-8", "L1b", "Rad").with_sector( "Landmark");

    let start = Utc.with_ymd_and_hms( 2021,1,1, 0,0,30).unwrap();
    let files = catalog.find_next_files( &query, start, 3, false, true).await.unwrap();
    let times: Vec<DateTime<Utc>> = files.keys().copied().collect();
    let expected: Vec<DateTime<Utc>> = [60, 90, 120].iter().map(|s| utc(0,0) + himawari_common::datetime::secs(*s)).collect();
    assert_eq!( times, expected);
}

#[tokio::test]
async fn test_timestep_count_out_of_range () {
    let catalog = catalog_without( &[]);
    let res = catalog.find_previous_files( &query(), utc(0,30), usize::MAX, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::InvalidArgument(_))));

    let res = catalog.find_next_files( &query(), utc(0,30), i32::MAX as usize, false, true).await;
    assert!( matches!( res, Err(HimawariCatalogError::InvalidArgument(_))));
}
