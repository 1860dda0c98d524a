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

//! metadata inference from AHI filenames

use std::{collections::BTreeMap, fmt};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use himawari_common::{warn, fs::basename, datetime::{minutes, truncate_to_secs}};
use crate::errors::{Result, inference_error, not_implemented};
use crate::grammar::{ahi_grammar, ParsedFields};
use crate::vocabulary::{
    check_channel, Channel, GroupKey, Product, ProductLevel, Satellite, SceneAbbr, Sector, SENSOR
};

/// product tokens of L2 filenames, in the order in which we match them
pub const L2_PRODUCT_TOKENS: [&str;8] = [
    "HYDRO_RAIN_RATE", "RRQPE", "CLOUD_HEIGHT", "CHGT", "CLOUD_MASK", "CMSK", "CLOUD_PHASE", "CPHS"
];

/// system environment marker of L1b (Himawari Standard) files
pub const L1B_MARKER: &str = "HS";

/// end time of products that do not have one in their filename
pub fn default_scan_duration ()->TimeDelta { minutes(10) }

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct HimawariFileInfo {
    pub path: String,
    pub satellite: Satellite,
    pub sensor: &'static str,
    pub product_level: ProductLevel,
    pub product: Product,
    pub sector: Sector,
    pub scene_abbr: Vec<SceneAbbr>,
    pub channel: Option<Channel>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    pub production_time: Option<DateTime<Utc>>,
    pub platform_shortname: Option<String>,
    pub observation_number: Option<u32>,
    pub spatial_res: Option<u32>,
    pub resolution: Option<String>,
    pub segment_number: Option<u32>,
    pub segment_total: Option<u32>,
    pub version: Option<String>,
    pub system_environment: Option<String>,
}

impl HimawariFileInfo {
    pub fn filename (&self)->&str {
        basename( &self.path)
    }

    /// the value of this file for a given grouping key
    pub fn key_value (&self, key: GroupKey)->GroupValue {
        match key {
            GroupKey::Product => GroupValue::Text( self.product.to_string()),
            GroupKey::SceneAbbr => if self.scene_abbr.is_empty() {
                GroupValue::None
            } else {
                GroupValue::Text( self.scene_abbr.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(","))
            }
            GroupKey::Channel => GroupValue::from( self.channel.map(|c| c.to_string())),
            GroupKey::Sector => GroupValue::Text( self.sector.to_string()),
            GroupKey::PlatformShortname => GroupValue::from( self.platform_shortname.clone()),
            GroupKey::StartTime => GroupValue::Time( self.start_time),
            GroupKey::EndTime => GroupValue::Time( self.end_time),
            GroupKey::ProductionTime => GroupValue::from( self.production_time),
            GroupKey::SpatialRes => GroupValue::from( self.spatial_res),
            GroupKey::SegmentNumber => GroupValue::from( self.segment_number),
            GroupKey::SegmentTotal => GroupValue::from( self.segment_total),
        }
    }
}

/* #region group values *******************************************************************************************/

/// a metadata value we can group and sort by. Absent values are represented as `None`, which
/// sorts before everything else
#[derive(Debug,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub enum GroupValue {
    None,
    Int(u32),
    Text(String),
    Time(DateTime<Utc>),
}

impl GroupValue {
    pub fn as_time (&self)->Option<DateTime<Utc>> {
        if let GroupValue::Time(t) = self { Some(*t) } else { None }
    }
}

impl fmt::Display for GroupValue {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            GroupValue::None => write!(f, "none"),
            GroupValue::Int(i) => write!(f, "{i}"),
            GroupValue::Text(s) => write!(f, "{s}"),
            GroupValue::Time(t) => write!(f, "{}", t.to_rfc3339_opts( SecondsFormat::Secs, true)),
        }
    }
}

// we want to be usable as a JSON map key
impl Serialize for GroupValue {
    fn serialize<S: Serializer> (&self, serializer: S)->std::result::Result<S::Ok,S::Error> {
        serializer.collect_str( self)
    }
}

impl From<Option<String>> for GroupValue {
    fn from (v: Option<String>)->Self { v.map_or( GroupValue::None, GroupValue::Text) }
}

impl From<Option<u32>> for GroupValue {
    fn from (v: Option<u32>)->Self { v.map_or( GroupValue::None, GroupValue::Int) }
}

impl From<Option<DateTime<Utc>>> for GroupValue {
    fn from (v: Option<DateTime<Utc>>)->Self { v.map_or( GroupValue::None, GroupValue::Time) }
}

/* #endregion group values */

/* #region inference **********************************************************************************************/

pub fn infer_product_level (filename: &str)->Result<ProductLevel> {
    if L2_PRODUCT_TOKENS.iter().any(|t| filename.contains(t)) {
        Ok(ProductLevel::L2)
    } else if filename.contains( L1B_MARKER) {
        Ok(ProductLevel::L1b)
    } else {
        Err( inference_error( format!("product level of '{filename}' could not be inferred")))
    }
}

/// the raw product token as used in the filename (which is also our grammar key)
pub fn infer_product_token (filename: &str, product_level: ProductLevel)->Result<&'static str> {
    match product_level {
        ProductLevel::L1b => Ok("Rad"),
        ProductLevel::L2 => L2_PRODUCT_TOKENS.iter().find(|t| filename.contains(*t)).copied()
            .ok_or_else(|| inference_error( format!("L2 product of '{filename}' could not be inferred")))
    }
}

/// map the various L2 product spellings to canonical products
pub fn homogenize_product (token: &str)->Result<Product> {
    match token {
        "Rad" => Ok(Product::Rad),
        "CMSK" | "CLOUD_MASK" => Ok(Product::CMSK),
        "CPHS" | "CLOUD_PHASE" => Ok(Product::CPHS),
        "CHGT" | "CLOUD_HEIGHT" => Ok(Product::CHGT),
        "RRQPE" | "HYDRO_RAIN_RATE" => Ok(Product::RRQPE),
        other => Err( not_implemented( format!("product {other}")))
    }
}

/// split a `<sector><observation number>` token such as "FLDK", "JP03" or "R401" into sector,
/// scene abbreviations and (for repeated sectors) observation number
pub fn decompose_sector_token (token: &str)->Result<(Sector,Vec<SceneAbbr>,Option<u32>)> {
    if token == "FLDK" {
        return Ok( (Sector::FLDK, vec![], None))
    }
    if token.len() < 3 || !token.is_char_boundary(2) {
        return Err( inference_error( format!("unknown sector '{token}'")))
    }

    let (prefix, num) = token.split_at(2);
    // observation numbers have 2 or 3 ASCII digits
    if !(2..=3).contains( &num.len()) || !num.bytes().all(|b| b.is_ascii_digit()) {
        return Err( inference_error( format!("invalid observation number in sector '{token}'")))
    }
    let obs: u32 = num.parse().map_err(|_| inference_error( format!("invalid observation number in sector '{token}'")))?;
    if obs == 0 {
        return Err( inference_error( format!("invalid observation number in sector '{token}'")))
    }

    match prefix {
        "JP" => Ok( (Sector::Japan, vec![SceneAbbr::R1, SceneAbbr::R2], Some(obs))),
        "R3" => Ok( (Sector::Target, vec![SceneAbbr::R3], Some(obs))),
        "R4" => Ok( (Sector::Landmark, vec![SceneAbbr::R4], Some(obs))),
        // any other region index is a landmark area
        _ if prefix.starts_with('R') => Ok( (Sector::Landmark, vec![SceneAbbr::R5], Some(obs))),
        _ => Err( inference_error( format!("unknown sector '{token}'")))
    }
}

fn satellite_from_fields (fields: &ParsedFields, filename: &str)->Result<Satellite> {
    if let Some(sn) = fields.text("platform_shortname") {
        match sn.to_uppercase().as_str() {
            "H08" => Ok(Satellite::Himawari8),
            "H09" => Ok(Satellite::Himawari9),
            _ => Err( inference_error( format!("unknown platform '{sn}' in '{filename}'")))
        }
    } else if let Some(fname) = fields.text("platform_fullname") {
        match fname.to_uppercase().as_str() {
            "HIMAWARI8" => Ok(Satellite::Himawari8),
            "HIMAWARI9" => Ok(Satellite::Himawari9),
            _ => Err( inference_error( format!("unknown platform '{fname}' in '{filename}'")))
        }
    } else {
        Err( inference_error( format!("no platform in '{filename}'")))
    }
}

/// optional time field that is logged and dropped if it is malformed
fn optional_time (fields: &ParsedFields, name: &str, filename: &str)->Option<DateTime<Utc>> {
    if fields.is_malformed( name) {
        warn!("ignoring malformed {} in {}", name, filename);
        None
    } else {
        fields.time( name).map( truncate_to_secs)
    }
}

fn optional_int (fields: &ParsedFields, name: &str, filename: &str)->Option<u32> {
    if fields.is_malformed( name) {
        warn!("ignoring malformed {} in {}", name, filename);
    }
    fields.int( name)
}

/// infer all metadata of a (file or object) path from its basename
pub fn extract_metadata_from_path (path: &str)->Result<HimawariFileInfo> {
    let filename = basename( path);

    let product_level = infer_product_level( filename)?;
    let token = infer_product_token( filename, product_level)?;
    let grammar = ahi_grammar( product_level, token)?;
    let fields = grammar.parse( filename)
        .ok_or_else(|| inference_error( format!("'{filename}' does not match {product_level} {token} filename pattern")))?;

    let product = match fields.text("product") {
        Some(p) => homogenize_product(p)?,
        None => homogenize_product(token)?
    };

    let satellite = satellite_from_fields( &fields, filename)?;

    let mut start_time = match fields.get("start_time") {
        Some(_) => fields.time("start_time").map( truncate_to_secs)
            .ok_or_else(|| inference_error( format!("malformed start_time in '{filename}'")))?,
        None => return Err( inference_error( format!("no start_time in '{filename}'")))
    };
    let mut end_time = optional_time( &fields, "end_time", filename);
    let production_time = optional_time( &fields, "production_time", filename);

    let (sector, scene_abbr, observation_number) = match fields.text("sector_observation_number") {
        Some(token) => decompose_sector_token( token)?,
        None => (Sector::FLDK, vec![], None)
    };

    // repeated sectors are scanned several times within the 10min FLDK timeslot of the filename
    if let Some(obs) = observation_number {
        let cadence = sector.cadence();
        let offset = i32::try_from( obs - 1).ok()
            .and_then(|k| cadence.checked_mul( k))
            .ok_or_else(|| inference_error( format!("observation number {obs} out of range in '{filename}'")))?;
        start_time = start_time.checked_add_signed( offset)
            .ok_or_else(|| inference_error( format!("observation number {obs} out of range in '{filename}'")))?;
        end_time = Some( start_time + cadence);
    }
    let end_time = end_time.unwrap_or_else(|| start_time + default_scan_duration());
    if end_time < start_time {
        return Err( inference_error( format!("end_time before start_time in '{filename}'")))
    }

    let channel = match fields.text("channel") {
        Some(c) if product == Product::Rad => Some( check_channel(c).map_err(|_| inference_error( format!("unknown channel '{c}' in '{filename}'")))?),
        _ => None
    };

    Ok( HimawariFileInfo {
        path: path.to_string(),
        satellite,
        sensor: SENSOR,
        product_level,
        product,
        sector,
        scene_abbr,
        channel,
        start_time,
        end_time,
        production_time,
        platform_shortname: fields.text("platform_shortname").map(|s| s.to_string()),
        observation_number,
        spatial_res: optional_int( &fields, "spatial_res", filename),
        resolution: fields.text("resolution").map(|s| s.to_string()),
        segment_number: optional_int( &fields, "segment_number", filename),
        segment_total: optional_int( &fields, "segment_total", filename),
        version: fields.text("version").map(|s| s.to_string()),
        system_environment: fields.text("system_environment").map(|s| s.to_string()),
    })
}

pub fn extract_metadata_from_filename (filename: &str)->Result<HimawariFileInfo> {
    extract_metadata_from_path( filename)
}

/// fails on the first path that cannot be parsed
pub fn extract_metadata_from_paths<S: AsRef<str>> (paths: &[S])->Result<Vec<HimawariFileInfo>> {
    paths.iter().map(|p| extract_metadata_from_path( p.as_ref())).collect()
}

/// the values of a given key for a list of paths, in path order
pub fn get_key_from_paths<S: AsRef<str>> (paths: &[S], key: GroupKey)->Result<Vec<GroupValue>> {
    paths.iter().map(|p| extract_metadata_from_path( p.as_ref()).map(|fi| fi.key_value( key))).collect()
}

/// the values of a given key for each group of a grouped result set
pub fn get_key_from_grouped_paths<K: Ord + Clone> (groups: &BTreeMap<K,Vec<String>>, key: GroupKey)->Result<BTreeMap<K,Vec<GroupValue>>> {
    let mut map = BTreeMap::new();
    for (k, paths) in groups {
        map.insert( k.clone(), get_key_from_paths( paths, key)?);
    }
    Ok(map)
}

/* #endregion inference */
