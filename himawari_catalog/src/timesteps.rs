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

//! queries for the nearest, latest and adjacent acquisition timesteps of a product

use std::collections::BTreeMap;
use chrono::{DateTime, TimeDelta, Utc};

use himawari_common::{debug, datetime::{format_delta, truncate_to_secs}};
use crate::connection::set_connection_type;
use crate::errors::{Result, invalid_argument, no_data, insufficient_data, inconsistent_query};
use crate::grouping::{check_interval_regularity, ResultSet};
use crate::metadata::HimawariFileInfo;
use crate::search::{Catalog, ProductQuery, ValidQuery};

/// paths per acquisition start time, in ascending time order
pub type TimestepFiles = BTreeMap<DateTime<Utc>,Vec<String>>;

fn group_by_start_time (infos: Vec<HimawariFileInfo>)->TimestepFiles {
    let mut map: TimestepFiles = BTreeMap::new();
    for fi in infos {
        map.entry( fi.start_time).or_default().push( fi.path);
    }
    map
}

/// the key closest to `time`. Ties go to the earlier time
fn closest_time (times: impl Iterator<Item=DateTime<Utc>>, time: DateTime<Utc>)->Option<DateTime<Utc>> {
    let mut closest: Option<(DateTime<Utc>,TimeDelta)> = None;
    for t in times {
        let d = (t - time).abs();
        if closest.map_or( true, |(_,dc)| d < dc) {
            closest = Some((t,d));
        }
    }
    closest.map(|(t,_)| t)
}

impl Catalog {

    fn check_not_future (&self, time: DateTime<Utc>)->Result<DateTime<Utc>> {
        let time = truncate_to_secs( time);
        if time > self.now() {
            Err( invalid_argument( format!("{time} is in the future")))
        } else {
            Ok(time)
        }
    }

    /// search files within `[start,end]` with `end` clamped to the current time
    async fn timestep_files (&self, vq: &ValidQuery, start: DateTime<Utc>, end: DateTime<Utc>)->Result<TimestepFiles> {
        let end = end.min( truncate_to_secs( self.now()));
        let infos = self.search( vq, truncate_to_secs( start), end).await?;
        Ok( group_by_start_time( infos))
    }

    fn connect (&self, vq: &ValidQuery, files: TimestepFiles)->Result<TimestepFiles> {
        let mut map = BTreeMap::new();
        for (t, paths) in files {
            let paths = set_connection_type( ResultSet::Files(paths), vq.connection_type, self.protocol())?.into_files();
            map.insert( t, paths);
        }
        Ok(map)
    }

    async fn closest_timestep (&self, vq: &ValidQuery, time: DateTime<Utc>)->Result<(DateTime<Utc>,TimestepFiles)> {
        let time = self.check_not_future( time)?;
        let cadence = vq.sector.cadence();
        let files = self.timestep_files( vq, time - cadence, time + cadence).await?;

        match closest_time( files.keys().copied(), time) {
            Some(t) => Ok( (t, files) ),
            None => Err( no_data( format!("no {} {} data within {} of {}", vq.satellite, vq.product, format_delta(cadence), time)))
        }
    }

    /// the actual acquisition start time that is closest to `time`
    pub async fn find_closest_start_time (&self, query: &ProductQuery, time: DateTime<Utc>)->Result<DateTime<Utc>> {
        let vq = self.validate( query)?;
        let (t, _) = self.closest_timestep( &vq, time).await?;
        Ok(t)
    }

    /// the files of the acquisition that is closest to `time`
    pub async fn find_closest_files (&self, query: &ProductQuery, time: DateTime<Utc>)->Result<Vec<String>> {
        let vq = self.validate( query)?;
        let (t, mut files) = self.closest_timestep( &vq, time).await?;
        let paths = files.remove( &t).unwrap_or_default();
        Ok( set_connection_type( ResultSet::Files(paths), vq.connection_type, self.protocol())?.into_files() )
    }

    /// the most recent acquisition start time within the look-ahead window (defaults to the catalog setting)
    pub async fn find_latest_start_time (&self, query: &ProductQuery, look_ahead: Option<TimeDelta>)->Result<DateTime<Utc>> {
        let vq = self.validate( query)?;
        let now = truncate_to_secs( self.now());
        let look_ahead = look_ahead.unwrap_or( self.look_ahead());
        let files = self.timestep_files( &vq, now - look_ahead, now).await?;

        files.keys().next_back().copied()
            .ok_or_else(|| no_data( format!("no {} {} data since {}", vq.satellite, vq.product, now - look_ahead)))
    }

    /// the files of the `n` most recent acquisitions (including the latest one)
    pub async fn find_latest_files (&self, query: &ProductQuery, n: usize, check_consistency: bool, look_ahead: Option<TimeDelta>)->Result<TimestepFiles> {
        let latest = self.find_latest_start_time( query, look_ahead).await?;
        self.find_previous_files( query, latest, n, true, check_consistency).await
    }

    /// the files of the `n` acquisitions before `start_time`
    pub async fn find_previous_files (&self, query: &ProductQuery, start_time: DateTime<Utc>, n: usize,
                                      include_start_time: bool, check_consistency: bool)->Result<TimestepFiles> {
        self.find_adjacent_files( query, start_time, n, include_start_time, check_consistency, false).await
    }

    /// the files of the `n` acquisitions after `start_time`
    pub async fn find_next_files (&self, query: &ProductQuery, start_time: DateTime<Utc>, n: usize,
                                  include_start_time: bool, check_consistency: bool)->Result<TimestepFiles> {
        self.find_adjacent_files( query, start_time, n, include_start_time, check_consistency, true).await
    }

    async fn find_adjacent_files (&self, query: &ProductQuery, start_time: DateTime<Utc>, n: usize,
                                  include_start_time: bool, check_consistency: bool, forward: bool)->Result<TimestepFiles> {
        if n == 0 {
            return Err( invalid_argument( "number of timesteps has to be positive"))
        }
        let vq = self.validate( query)?;
        let start_time = truncate_to_secs( start_time);

        let span = i32::try_from( n).ok()
            .and_then(|n| n.checked_add(1))
            .and_then(|k| vq.sector.cadence().checked_mul( k))
            .ok_or_else(|| invalid_argument( format!("number of timesteps {n} out of range")))?;

        let (closest, _) = self.closest_timestep( &vq, start_time).await?;
        if check_consistency && closest != start_time {
            return Err( inconsistent_query( format!("{start_time} is not an actual start time, closest is {closest}")))
        }

        let bound = if forward { closest.checked_add_signed( span) } else { closest.checked_sub_signed( span) };
        let bound = bound.ok_or_else(|| invalid_argument( format!("number of timesteps {n} out of range")))?;
        let (start, end) = if forward { (closest, bound) } else { (bound, closest) };
        let files = self.timestep_files( &vq, start, end).await?;

        let mut times: Vec<DateTime<Utc>> = files.keys().copied()
            .filter(|t| if forward { *t > closest } else { *t < closest })
            .collect();
        if include_start_time && files.contains_key( &closest) {
            times.push( closest);
            times.sort();
        }

        if times.is_empty() {
            return Err( no_data( format!("no data between {start} and {end}")))
        }
        if times.len() < n {
            return Err( insufficient_data( format!("only {} of {} timesteps available between {start} and {end}", times.len(), n)))
        }

        let selected: Vec<DateTime<Utc>> = if forward {
            times[..n].to_vec()
        } else {
            times[times.len()-n..].to_vec()
        };
        debug!("selected {} timesteps from {} to {}", selected.len(), selected[0], selected[selected.len()-1]);

        if check_consistency {
            let mut ts = selected.clone();
            if !include_start_time { ts.push( closest) }
            check_interval_regularity( &ts)?;
        }

        let mut files = files;
        let selected_files: TimestepFiles = selected.into_iter()
            .filter_map(|t| files.remove( &t).map(|paths| (t, paths)))
            .collect();
        self.connect( &vq, selected_files)
    }
}
