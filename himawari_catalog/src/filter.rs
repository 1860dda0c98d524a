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

//! file filters based on acquisition time, channels and scene abbreviations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use himawari_common::{debug, datetime::{truncate_to_secs, utc_now}};
use crate::errors::{Result, invalid_argument};
use crate::metadata::{extract_metadata_from_path, HimawariFileInfo};
use crate::vocabulary::{check_channels, check_product_level, check_scene_abbr, Channel, ProductLevel, SceneAbbr, Sector};

/// user provided filter parameters. Values are aliases that still have to be checked
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    pub channels: Option<Vec<String>>,
    pub scene_abbr: Option<Vec<String>>,
}

impl FilterParameters {
    pub fn new ()->Self { Self::default() }

    pub fn with_channels<S: ToString> (mut self, channels: &[S])->Self {
        self.channels = Some( channels.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_scene_abbr<S: ToString> (mut self, scene_abbr: &[S])->Self {
        self.scene_abbr = Some( scene_abbr.iter().map(|s| s.to_string()).collect());
        self
    }

    /// check the filter parameters against product level and sector. Channels only apply to L1b
    /// products, scene abbreviations only to repeated (non FLDK) sectors
    pub fn validate (&self, product_level: ProductLevel, sector: Option<Sector>)->Result<FileFilter> {
        let channels = match &self.channels {
            Some(channels) if product_level == ProductLevel::L1b => Some( check_channels( channels)?),
            Some(_) => {
                debug!("ignoring channel filter for {} product", product_level);
                None
            }
            None => None
        };

        let scene_abbr = match &self.scene_abbr {
            Some(abbrs) => Some( check_scene_abbr( abbrs, sector)?),
            None => None
        };

        Ok( FileFilter { channels, scene_abbr } )
    }
}

/// validated filter
#[derive(Debug,Clone,Default,PartialEq)]
pub struct FileFilter {
    pub channels: Option<Vec<Channel>>,
    pub scene_abbr: Option<Vec<SceneAbbr>>,
}

impl FileFilter {
    pub fn accepts (&self, fi: &HimawariFileInfo)->bool {
        if let (Some(channels), Some(c)) = (&self.channels, fi.channel) {
            if !channels.contains( &c) { return false }
        }
        if let Some(abbrs) = &self.scene_abbr {
            if !fi.scene_abbr.iter().any(|s| abbrs.contains(s)) { return false }
        }
        true
    }
}

/// a file is only excluded if it ends before the query starts or starts after the query ends
pub fn is_within_interval (fi: &HimawariFileInfo, start: DateTime<Utc>, end: DateTime<Utc>)->bool {
    !(fi.end_time < start || fi.start_time > end)
}

pub fn filter_file (fi: &HimawariFileInfo, start: DateTime<Utc>, end: DateTime<Utc>, filter: &FileFilter)->bool {
    is_within_interval( fi, start, end) && filter.accepts( fi)
}

/// truncate query times to seconds and check they are chronological and not in the future
pub fn check_time_range (start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>)->Result<(DateTime<Utc>,DateTime<Utc>)> {
    let start = truncate_to_secs( start);
    let end = truncate_to_secs( end);

    if start > end {
        return Err( invalid_argument( format!("start_time {start} is after end_time {end}")))
    }
    if end > now {
        return Err( invalid_argument( format!("end_time {end} is in the future")))
    }
    Ok( (start,end) )
}

/// filter a list of paths with the same rules that are used by `Catalog::find_files`
pub fn filter_files<S: AsRef<str>> (paths: &[S], product_level: &str, start: DateTime<Utc>, end: DateTime<Utc>,
                                     filter: &FilterParameters)->Result<Vec<String>> {
    let product_level = check_product_level( product_level)?;
    let (start, end) = check_time_range( start, end, utc_now())?;
    let filter = filter.validate( product_level, None)?;

    let mut selected = Vec::new();
    for path in paths {
        let fi = extract_metadata_from_path( path.as_ref())?;
        if fi.product_level == product_level && filter_file( &fi, start, end, &filter) {
            selected.push( fi.path);
        }
    }
    Ok(selected)
}
