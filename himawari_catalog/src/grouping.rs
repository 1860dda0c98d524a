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

//! result sets, grouping by metadata keys and consistency checks

use std::collections::{BTreeMap, BTreeSet};
use chrono::{DateTime, Utc};
use serde::Serialize;

use himawari_common::datetime::format_delta;
use crate::errors::{Result, irregular_interval};
use crate::metadata::{extract_metadata_from_path, GroupValue, HimawariFileInfo};
use crate::vocabulary::GroupKey;

/// the result of a search, either a flat list of paths or paths grouped by a metadata key
#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Files(Vec<String>),
    Grouped(BTreeMap<GroupValue,Vec<String>>),
}

impl ResultSet {
    /// total number of paths
    pub fn len (&self)->usize {
        match self {
            ResultSet::Files(paths) => paths.len(),
            ResultSet::Grouped(groups) => groups.values().map(|v| v.len()).sum(),
        }
    }

    pub fn is_empty (&self)->bool {
        self.len() == 0
    }

    /// all paths in group order
    pub fn paths (&self)->Vec<&str> {
        match self {
            ResultSet::Files(paths) => paths.iter().map(|p| p.as_str()).collect(),
            ResultSet::Grouped(groups) => groups.values().flatten().map(|p| p.as_str()).collect(),
        }
    }

    pub fn into_files (self)->Vec<String> {
        match self {
            ResultSet::Files(paths) => paths,
            ResultSet::Grouped(groups) => groups.into_values().flatten().collect(),
        }
    }

    pub fn as_files (&self)->Option<&Vec<String>> {
        if let ResultSet::Files(paths) = self { Some(paths) } else { None }
    }

    pub fn as_grouped (&self)->Option<&BTreeMap<GroupValue,Vec<String>>> {
        if let ResultSet::Grouped(groups) = self { Some(groups) } else { None }
    }

    /// apply a path transformation to every entry, keeping the structure
    pub fn map_paths<F> (self, f: F)->ResultSet where F: Fn(String)->String {
        match self {
            ResultSet::Files(paths) => ResultSet::Files( paths.into_iter().map(&f).collect()),
            ResultSet::Grouped(groups) => ResultSet::Grouped(
                groups.into_iter().map(|(k,v)| (k, v.into_iter().map(&f).collect())).collect()
            ),
        }
    }
}

/// group already parsed files. Paths within a group keep their input order
pub fn group_file_infos (infos: &[HimawariFileInfo], key: GroupKey)->BTreeMap<GroupValue,Vec<String>> {
    let mut groups: BTreeMap<GroupValue,Vec<String>> = BTreeMap::new();
    for fi in infos {
        groups.entry( fi.key_value( key)).or_default().push( fi.path.clone());
    }
    groups
}

pub fn group_files<S: AsRef<str>> (paths: &[S], key: GroupKey)->Result<BTreeMap<GroupValue,Vec<String>>> {
    let mut groups: BTreeMap<GroupValue,Vec<String>> = BTreeMap::new();
    for path in paths {
        let fi = extract_metadata_from_path( path.as_ref())?;
        groups.entry( fi.key_value( key)).or_default().push( fi.path);
    }
    Ok(groups)
}

/// check that a sequence of timestamps is evenly spaced. Less than two timestamps are always regular
pub fn check_interval_regularity (times: &[DateTime<Utc>])->Result<()> {
    if times.len() < 2 { return Ok(()) }

    let mut sorted = times.to_vec();
    sorted.sort();
    let intervals: BTreeSet<_> = sorted.windows(2).map(|w| w[1] - w[0]).collect();

    if intervals.len() > 1 {
        let dts: Vec<String> = intervals.iter().map(|d| format_delta(*d)).collect();
        Err( irregular_interval( format!("timesteps are not regular, intervals: {}", dts.join(", "))))
    } else {
        Ok(())
    }
}
