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

//! directory layout of Himawari archives, both for the public NOAA buckets and local mirrors:
//! ```text
//!   <satellite root>/<product dir>/<YYYY>/<MM>/<DD>/<HHmm>/<files>
//! ```
//! with one `HHmm` directory per 10min FLDK timeslot

use chrono::{DateTime, Utc};

use himawari_common::{warn, fs::join_path, datetime::{floor_to_minutes, minutes, time_steps}};
use crate::errors::{Result, invalid_argument, not_implemented};
use crate::vocabulary::{Product, ProductLevel, Protocol, Satellite, Sector};

/// minutes per timeslot directory
pub const TIMESLOT_MINUTES: u32 = 10;

pub fn product_dir_name (product_level: ProductLevel, product: Product, sector: Sector)->Result<String> {
    match product_level {
        ProductLevel::L1b => {
            if product != Product::Rad {
                return Err( not_implemented( format!("L1b product directory for {product}")))
            }
            let sector = if sector == Sector::Landmark {
                warn!("no separate Landmark directory available, using Target directory instead");
                Sector::Target
            } else {
                sector
            };
            Ok( format!("AHI-L1b-{sector}"))
        }
        ProductLevel::L2 => match product {
            Product::CMSK | Product::CHGT | Product::CPHS => Ok( "AHI-L2-FLDK-Clouds".to_string()),
            Product::RRQPE => Ok( "AHI-L2-FLDK-RainfallRate".to_string()),
            Product::Rad => Err( not_implemented( format!("L2 product directory for {product}")))
        }
    }
}

/// the root directory for a satellite, which is the bucket itself for cloud storage and
/// `<base_dir>/HIMAWARI-<n>` for local archives
pub fn satellite_root (protocol: Protocol, base_dir: Option<&str>, satellite: Satellite)->Result<String> {
    match protocol {
        Protocol::S3 => Ok( format!("{}{}", protocol.bucket_prefix(), satellite.bucket_name())),
        Protocol::Local => {
            let base_dir = base_dir.ok_or_else(|| invalid_argument("no base_dir for local protocol"))?;
            Ok( join_path( base_dir, satellite.dir_name()))
        }
    }
}

pub fn product_dir (protocol: Protocol, base_dir: Option<&str>, satellite: Satellite,
                    product_level: ProductLevel, product: Product, sector: Sector)->Result<String> {
    let root = satellite_root( protocol, base_dir, satellite)?;
    Ok( join_path( &root, &product_dir_name( product_level, product, sector)?))
}

pub fn file_wildcard (product_level: ProductLevel)->&'static str {
    match product_level {
        ProductLevel::L1b => "*.bz2*",
        ProductLevel::L2 => "*.nc*",
    }
}

/// timeslot directory start times that can contain files for the given time range
pub fn timeslot_times (start: DateTime<Utc>, end: DateTime<Utc>)->Vec<DateTime<Utc>> {
    time_steps( floor_to_minutes( start, TIMESLOT_MINUTES), end, minutes( TIMESLOT_MINUTES as i64))
}

pub fn timeslot_dir (product_dir: &str, t: DateTime<Utc>)->String {
    join_path( product_dir, &t.format("%Y/%m/%d/%H%M").to_string())
}

pub fn timeslot_glob_pattern (product_dir: &str, t: DateTime<Utc>, product_level: ProductLevel)->String {
    join_path( &timeslot_dir( product_dir, t), file_wildcard( product_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timeslot_times () {
        let start = Utc.with_ymd_and_hms( 2021,1,1, 0,5,0).unwrap();
        let end = Utc.with_ymd_and_hms( 2021,1,1, 0,20,0).unwrap();
        let ts = timeslot_times( start, end);
        assert_eq!( ts.len(), 3);
        assert_eq!( ts[0], Utc.with_ymd_and_hms( 2021,1,1, 0,0,0).unwrap());
        assert_eq!( ts[2], end);
    }

    #[test]
    fn test_patterns () {
        let dir = product_dir( Protocol::S3, None, Satellite::Himawari8, ProductLevel::L1b, Product::Rad, Sector::FLDK).unwrap();
        assert_eq!( dir, "s3://noaa-himawari8/AHI-L1b-FLDK");
        let t = Utc.with_ymd_and_hms( 2021,1,1, 0,10,0).unwrap();
        assert_eq!( timeslot_glob_pattern( &dir, t, ProductLevel::L1b), "s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0010/*.bz2*");

        let dir = product_dir( Protocol::Local, Some("/data"), Satellite::Himawari9, ProductLevel::L2, Product::RRQPE, Sector::FLDK).unwrap();
        assert_eq!( dir, "/data/HIMAWARI-9/AHI-L2-FLDK-RainfallRate");

        assert_eq!( product_dir_name( ProductLevel::L1b, Product::Rad, Sector::Landmark).unwrap(), "AHI-L1b-Target");
    }
}
