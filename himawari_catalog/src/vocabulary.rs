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

//! canonical vocabulary of the catalog (satellites, sectors, product levels, products, channels,
//! scene abbreviations, grouping keys, protocols and connection types) together with the alias
//! tables that map user input onto it

use std::{collections::HashMap, fmt::Display, str::FromStr};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use lazy_static::lazy_static;

use himawari_common::datetime::{minutes, secs};
use crate::errors::{Result, invalid_argument, not_implemented};

pub const SENSOR: &str = "AHI";

/* #region vocabulary types ***************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,EnumIter,IntoStaticStr)]
pub enum Satellite {
    #[strum(serialize="himawari-8")] #[serde(rename="himawari-8")]
    Himawari8,
    #[strum(serialize="himawari-9")] #[serde(rename="himawari-9")]
    Himawari9,
}

impl Satellite {
    /// the public NOAA bucket that holds the data of this satellite
    pub fn bucket_name (&self)->&'static str {
        match self {
            Satellite::Himawari8 => "noaa-himawari8",
            Satellite::Himawari9 => "noaa-himawari9",
        }
    }

    /// top level directory name within a local archive, e.g. "HIMAWARI-8"
    pub fn dir_name (&self)->&'static str {
        match self {
            Satellite::Himawari8 => "HIMAWARI-8",
            Satellite::Himawari9 => "HIMAWARI-9",
        }
    }

    /// the platform identifier used in filenames, e.g. "H08"
    pub fn platform_shortname (&self)->&'static str {
        match self {
            Satellite::Himawari8 => "H08",
            Satellite::Himawari9 => "H09",
        }
    }
}

/// spatial scan region of AHI
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,EnumIter,IntoStaticStr)]
pub enum Sector {
    FLDK,
    Japan,
    Target,
    Landmark,
}

impl Sector {
    /// max time between consecutive acquisitions of this sector
    pub fn cadence (&self)->TimeDelta {
        match self {
            Sector::FLDK => minutes(10),
            Sector::Japan | Sector::Target => secs(150),
            Sector::Landmark => secs(30),
        }
    }

    /// scene abbreviations that can be scanned within this sector
    pub fn scene_abbrs (&self)->&'static [SceneAbbr] {
        match self {
            Sector::FLDK => &[],
            Sector::Japan => &[SceneAbbr::R1, SceneAbbr::R2],
            Sector::Target => &[SceneAbbr::R3],
            Sector::Landmark => &[SceneAbbr::R4, SceneAbbr::R5],
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,strum::EnumString,EnumIter,IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum ProductLevel {
    L1b,
    L2,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,EnumIter,IntoStaticStr)]
pub enum Product {
    /// L1b radiances
    Rad,
    /// L2 cloud mask
    CMSK,
    /// L2 cloud top height
    CHGT,
    /// L2 cloud phase
    CPHS,
    /// L2 rainfall rate (quantitative precipitation estimate)
    RRQPE,
}

impl Product {
    pub fn product_level (&self)->ProductLevel {
        match self {
            Product::Rad => ProductLevel::L1b,
            _ => ProductLevel::L2
        }
    }
}

/// AHI spectral bands
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,strum::EnumString,EnumIter,IntoStaticStr)]
pub enum Channel {
    B01, B02, B03, B04, B05, B06, B07, B08, B09, B10, B11, B12, B13, B14, B15, B16,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,strum::Display,strum::EnumString,EnumIter,IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum SceneAbbr {
    R1, R2, R3, R4, R5,
}

/// metadata keys we can group result sets by
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display,strum::EnumString,EnumIter,IntoStaticStr)]
#[strum(serialize_all="snake_case")]
#[serde(rename_all="snake_case")]
pub enum GroupKey {
    Product,
    SceneAbbr,
    Channel,
    Sector,
    PlatformShortname,
    StartTime,
    EndTime,
    ProductionTime,
    SpatialRes,
    SegmentNumber,
    SegmentTotal,
}

/// how paths in result sets of bucket searches should be represented
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display,strum::EnumString,EnumIter,IntoStaticStr)]
#[strum(serialize_all="snake_case")]
#[serde(rename_all="snake_case")]
pub enum ConnectionType {
    /// object store native, e.g. `s3://noaa-himawari8/AHI-L1b-FLDK/...`
    Bucket,
    /// public https endpoint of the bucket
    Https,
    /// https plus netCDF byte-range access marker
    NcBytes,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display,EnumIter,IntoStaticStr)]
#[strum(serialize_all="snake_case")]
#[serde(rename_all="snake_case")]
pub enum Protocol {
    S3,
    Local,
}

impl Protocol {
    /// the prefix the filesystem listing strips off and that we have to restore
    pub fn bucket_prefix (&self)->&'static str {
        match self {
            Protocol::S3 => "s3://",
            Protocol::Local => "",
        }
    }

    pub fn is_bucket (&self)->bool {
        matches!(self, Protocol::S3)
    }
}

/* #endregion vocabulary types */

/* #region alias tables *******************************************************************************************/

lazy_static! {
    static ref SATELLITE_ALIASES: HashMap<&'static str, Satellite> = alias_map( &[
        (Satellite::Himawari8, &["H8", "H08", "HIMAWARI-8", "HIMAWARI8"]),
        (Satellite::Himawari9, &["H9", "H09", "HIMAWARI-9", "HIMAWARI9"]),
    ]);

    static ref SECTOR_ALIASES: HashMap<&'static str, Sector> = alias_map( &[
        (Sector::FLDK, &["FLDK", "FULL", "FULLDISK", "FULL DISK", "F"]),
        (Sector::Japan, &["JAPAN", "JAPAN_AREA", "JAPAN AREA", "J"]),
        (Sector::Target, &["TARGET", "TARGET_AREA", "TARGET AREA", "T"]),
        (Sector::Landmark, &["LANDMARK", "M", "MESOSCALE"]),
    ]);

    // see https://www.data.jma.go.jp/mscweb/en/himawari89/space_segment/spsg_ahi.html
    static ref CHANNEL_ALIASES: HashMap<&'static str, Channel> = alias_map( &[
        (Channel::B01, &["B01", "C01", "1", "01", "0.47", "0.46", "BLUE", "B"]),
        (Channel::B02, &["B02", "C02", "2", "02", "0.51", "GREEN", "G"]),
        (Channel::B03, &["B03", "C03", "3", "03", "0.64", "RED", "R"]),
        (Channel::B04, &["B04", "C04", "4", "04", "0.86", "NEAR-IR", "VEGETATION"]),
        (Channel::B05, &["B05", "C05", "5", "05", "1.6", "SNOW/ICE"]),
        (Channel::B06, &["B06", "C06", "6", "06", "2.3", "CLOUD PARTICLE SIZE", "CPS"]),
        (Channel::B07, &["B07", "C07", "7", "07", "3.9", "IR SHORTWAVE WINDOW", "IR SHORTWAVE"]),
        (Channel::B08, &["B08", "C08", "8", "08", "6.2", "UPPER-LEVEL TROPOSPHERIC WATER VAPOUR", "UPPER-LEVEL WATER VAPOUR"]),
        (Channel::B09, &["B09", "C09", "9", "09", "6.9", "7.0", "MID-LEVEL TROPOSPHERIC WATER VAPOUR", "MID-LEVEL WATER VAPOUR"]),
        (Channel::B10, &["B10", "C10", "10", "7.3", "LOWER-LEVEL TROPOSPHERIC WATER VAPOUR", "LOWER-LEVEL WATER VAPOUR"]),
        (Channel::B11, &["B11", "C11", "11", "8.6", "CLOUD-TOP PHASE", "CTP"]),
        (Channel::B12, &["B12", "C12", "12", "9.6", "OZONE"]),
        (Channel::B13, &["B13", "C13", "13", "10.4", "CLEAN IR LONGWAVE WINDOW", "CLEAN IR"]),
        (Channel::B14, &["B14", "C14", "14", "11.2", "IR LONGWAVE WINDOW", "IR LONGWAVE"]),
        (Channel::B15, &["B15", "C15", "15", "12.3", "12.4", "DIRTY LONGWAVE WINDOW", "DIRTY IR"]),
        (Channel::B16, &["B16", "C16", "16", "13.3", "CO2 IR LONGWAVE", "CO2", "CO2 IR"]),
    ]);
}

fn alias_map<T: Copy> (table: &[(T, &[&'static str])])->HashMap<&'static str,T> {
    let mut map = HashMap::new();
    for (key, aliases) in table {
        for alias in *aliases {
            map.insert( *alias, *key);
        }
    }
    map
}

fn lookup_alias<T: Copy + Display + IntoEnumIterator> (map: &HashMap<&'static str,T>, alias: &str, what: &str)->Result<T> {
    let alias = alias.trim().to_uppercase();
    map.get( alias.as_str()).copied().ok_or_else(|| {
        invalid_argument( format!("unknown {what} '{alias}', available: {}", list_of( T::iter())))
    })
}

fn list_of<T: Display> (items: impl IntoIterator<Item=T>)->String {
    items.into_iter().map(|i| i.to_string()).collect::<Vec<String>>().join(", ")
}

/* #endregion alias tables */

/* #region normalization ******************************************************************************************/

pub fn check_satellite (satellite: &str)->Result<Satellite> {
    lookup_alias( &SATELLITE_ALIASES, satellite, "satellite")
}

pub fn check_sector (sector: &str)->Result<Sector> {
    lookup_alias( &SECTOR_ALIASES, sector, "sector")
}

/// check sector alias and that the sector is available for the given product
pub fn check_sector_for_product (sector: &str, product: Product)->Result<Sector> {
    let sector = check_sector( sector)?;
    let valid = available_sectors( Some(product));
    if valid.contains( &sector) {
        Ok(sector)
    } else {
        Err( invalid_argument( format!("valid sectors for product {product} are: {}", list_of( valid))))
    }
}

/// canonical identifiers short circuit the alias lookup
pub fn check_channel (channel: &str)->Result<Channel> {
    let channel = channel.trim().to_uppercase();
    match Channel::from_str( &channel) {
        Ok(c) => Ok(c),
        Err(_) => lookup_alias( &CHANNEL_ALIASES, &channel, "channel")
    }
}

pub fn check_channels<S: AsRef<str>> (channels: &[S])->Result<Vec<Channel>> {
    channels.iter().map(|c| check_channel( c.as_ref())).collect()
}

pub fn check_product_level (product_level: &str)->Result<ProductLevel> {
    ProductLevel::from_str( product_level.trim()).map_err(|_| {
        invalid_argument( format!("unknown product level '{product_level}', available: {}", list_of( ProductLevel::iter())))
    })
}

/// case insensitive product match, optionally restricted to a product level
pub fn check_product (product: &str, product_level: Option<ProductLevel>)->Result<Product> {
    let levels: Vec<ProductLevel> = product_level.into_iter().collect();
    let valid = available_products( if levels.is_empty() { None } else { Some(levels.as_slice()) });
    let product = product.trim();

    valid.iter().find(|p| p.to_string().eq_ignore_ascii_case( product)).copied().ok_or_else(|| {
        match product_level {
            Some(level) => invalid_argument( format!("unknown {level} product '{product}', available: {}", list_of( valid.iter()))),
            None => invalid_argument( format!("unknown product '{product}', available: {}", list_of( valid.iter())))
        }
    })
}

/// check scene abbreviations, and if a sector is provided that they can occur within this sector
pub fn check_scene_abbr<S: AsRef<str>> (scene_abbr: &[S], sector: Option<Sector>)->Result<Vec<SceneAbbr>> {
    let mut abbrs: Vec<SceneAbbr> = Vec::with_capacity( scene_abbr.len());
    for s in scene_abbr {
        let s = s.as_ref().trim();
        let abbr = SceneAbbr::from_str( s).map_err(|_| {
            invalid_argument( format!("unknown scene_abbr '{s}', available: {}", list_of( SceneAbbr::iter())))
        })?;
        abbrs.push( abbr);
    }

    if let Some(sector) = sector {
        let valid = sector.scene_abbrs();
        if valid.is_empty() && !abbrs.is_empty() {
            return Err( invalid_argument( format!("scene_abbr can only be specified for Japan, Target and Landmark sectors (not {sector})")))
        }
        if let Some(a) = abbrs.iter().find(|a| !valid.contains(a)) {
            return Err( invalid_argument( format!("scene_abbr {a} not valid for sector {sector}, available: {}", list_of( valid.iter()))))
        }
    }

    Ok(abbrs)
}

pub fn check_group_key (key: &str)->Result<GroupKey> {
    GroupKey::from_str( key.trim()).map_err(|_| {
        invalid_argument( format!("{key} is not a valid group key, available: {}", list_of( GroupKey::iter())))
    })
}

pub fn check_protocol (protocol: &str)->Result<Protocol> {
    match protocol.trim().to_lowercase().as_str() {
        "s3" => Ok(Protocol::S3),
        "local" | "file" => Ok(Protocol::Local),
        other => Err( not_implemented( format!("protocol '{other}', available: s3, local")))
    }
}

/// resolve the effective connection type for a protocol. Local storage does not have
/// connection types, object store protocols default to `bucket`
pub fn check_connection_type (connection_type: Option<&str>, protocol: Protocol)->Result<Option<ConnectionType>> {
    let ct = match connection_type {
        Some(s) => Some( parse_connection_type(s)?),
        None => None
    };

    if protocol.is_bucket() {
        Ok( Some( ct.unwrap_or( ConnectionType::Bucket)))
    } else {
        Ok( None )
    }
}

pub fn parse_connection_type (s: &str)->Result<ConnectionType> {
    ConnectionType::from_str( s.trim()).map_err(|_| {
        not_implemented( format!("connection type '{s}', available: {}", list_of( ConnectionType::iter())))
    })
}

/* #endregion normalization */

/* #region enumeration queries ************************************************************************************/

pub fn available_satellites ()->Vec<Satellite> {
    Satellite::iter().collect()
}

/// all sectors, or the sectors that are available for a specific product
pub fn available_sectors (product: Option<Product>)->Vec<Sector> {
    match product.map(|p| p.product_level()) {
        Some(ProductLevel::L2) => vec![Sector::FLDK],
        _ => Sector::iter().collect()
    }
}

pub fn available_product_levels ()->Vec<ProductLevel> {
    ProductLevel::iter().collect()
}

pub fn available_products (product_levels: Option<&[ProductLevel]>)->Vec<Product> {
    Product::iter().filter(|p| product_levels.map_or( true, |levels| levels.contains( &p.product_level()))).collect()
}

pub fn available_channels ()->Vec<Channel> {
    Channel::iter().collect()
}

pub fn available_scene_abbrs ()->Vec<SceneAbbr> {
    SceneAbbr::iter().collect()
}

pub fn available_group_keys ()->Vec<GroupKey> {
    GroupKey::iter().collect()
}

/// the cloud bucket protocols (local storage is always available)
pub fn available_protocols ()->Vec<Protocol> {
    Protocol::iter().filter(|p| p.is_bucket()).collect()
}

pub fn available_connection_types ()->Vec<ConnectionType> {
    ConnectionType::iter().collect()
}

/* #endregion enumeration queries */
