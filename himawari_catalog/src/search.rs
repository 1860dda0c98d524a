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

//! time window search over the timeslot directories of a Himawari archive

use std::sync::Arc;
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use himawari_common::{debug, datetime::{utc_now, minutes}};
use crate::config::CatalogConfig;
use crate::connection::set_connection_type;
use crate::errors::{Result, invalid_argument, storage_error};
use crate::filter::{check_time_range, filter_file, FileFilter, FilterParameters};
use crate::grouping::{group_file_infos, ResultSet};
use crate::layout::{product_dir, satellite_root, timeslot_glob_pattern, timeslot_times};
use crate::metadata::{extract_metadata_from_path, HimawariFileInfo};
use crate::storage::{FileSystem, LocalFileSystem, S3FileSystem};
use crate::vocabulary::{
    check_connection_type, check_group_key, check_product, check_product_level, check_satellite, check_sector,
    ConnectionType, GroupKey, Product, ProductLevel, Protocol, Satellite, Sector
};

pub const DEFAULT_MAX_CONCURRENT_LISTINGS: usize = 4;

/// what we are looking for. All values are user input (aliases) that get normalized by `validate`
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub satellite: String,
    pub product_level: String,
    pub product: String,
    pub sector: Option<String>,
    pub filter: FilterParameters,
    pub group_by: Option<String>,
    pub connection_type: Option<String>,
}

impl ProductQuery {
    pub fn new (satellite: &str, product_level: &str, product: &str)->Self {
        ProductQuery {
            satellite: satellite.to_string(),
            product_level: product_level.to_string(),
            product: product.to_string(),
            ..Self::default()
        }
    }

    pub fn with_sector (mut self, sector: &str)->Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn with_filter (mut self, filter: FilterParameters)->Self {
        self.filter = filter;
        self
    }

    pub fn with_channels<S: ToString> (mut self, channels: &[S])->Self {
        self.filter = self.filter.with_channels( channels);
        self
    }

    pub fn with_scene_abbr<S: ToString> (mut self, scene_abbr: &[S])->Self {
        self.filter = self.filter.with_scene_abbr( scene_abbr);
        self
    }

    pub fn group_by (mut self, key: &str)->Self {
        self.group_by = Some(key.to_string());
        self
    }

    pub fn with_connection_type (mut self, connection_type: &str)->Self {
        self.connection_type = Some(connection_type.to_string());
        self
    }

    /// normalize all aliases and check their consistency. L2 products are only available for
    /// the full disk, L1b queries have to specify a sector
    pub fn validate (&self, protocol: Protocol)->Result<ValidQuery> {
        let satellite = check_satellite( &self.satellite)?;
        let product_level = check_product_level( &self.product_level)?;
        let product = check_product( &self.product, Some(product_level))?;

        let sector = match product_level {
            ProductLevel::L2 => match &self.sector {
                Some(s) => {
                    let sector = check_sector( s)?;
                    if sector != Sector::FLDK {
                        return Err( invalid_argument( format!("L2 products are only available for FLDK, not {sector}")))
                    }
                    sector
                }
                None => Sector::FLDK
            }
            ProductLevel::L1b => match &self.sector {
                Some(s) => check_sector( s)?,
                None => return Err( invalid_argument( "L1b queries require a sector"))
            }
        };

        let filter = self.filter.validate( product_level, Some(sector))?;
        let group_by = self.group_by.as_deref().map( check_group_key).transpose()?;
        let connection_type = check_connection_type( self.connection_type.as_deref(), protocol)?;

        Ok( ValidQuery { satellite, product_level, product, sector, filter, group_by, connection_type } )
    }
}

/// a normalized `ProductQuery`
#[derive(Debug,Clone,PartialEq)]
pub struct ValidQuery {
    pub satellite: Satellite,
    pub product_level: ProductLevel,
    pub product: Product,
    pub sector: Sector,
    pub filter: FileFilter,
    pub group_by: Option<GroupKey>,
    pub connection_type: Option<ConnectionType>,
}

pub type Clock = Arc<dyn Fn()->DateTime<Utc> + Send + Sync>;

/// the search facade over a storage filesystem. Catalogs do not have mutable state and can be
/// shared between tasks
#[derive(Clone)]
pub struct Catalog {
    fs: Arc<dyn FileSystem>,
    base_dir: Option<String>,
    max_concurrent_listings: usize,
    default_connection_type: Option<ConnectionType>,
    look_ahead: chrono::TimeDelta,
    clock: Clock,
}

impl Catalog {
    pub fn new (fs: Arc<dyn FileSystem>, base_dir: Option<&str>)->Self {
        Catalog {
            fs,
            base_dir: base_dir.map(|s| s.to_string()),
            max_concurrent_listings: DEFAULT_MAX_CONCURRENT_LISTINGS,
            default_connection_type: None,
            look_ahead: minutes(30),
            clock: Arc::new( utc_now),
        }
    }

    /// catalog for a local archive with `<base_dir>/HIMAWARI-<n>/..` layout
    pub fn local (base_dir: &str)->Result<Self> {
        if !std::path::Path::new( base_dir).is_dir() {
            return Err( storage_error( format!("base_dir {base_dir} does not exist")))
        }
        Ok( Self::new( Arc::new( LocalFileSystem), Some(base_dir)))
    }

    /// catalog for the public NOAA buckets (anonymous access)
    pub async fn s3 (region: &str)->Self {
        Self::new( Arc::new( S3FileSystem::new( region).await), None)
    }

    pub async fn from_config (config: &CatalogConfig)->Result<Self> {
        let catalog = match config.protocol()? {
            Protocol::S3 => Self::s3( &config.s3_region).await,
            Protocol::Local => {
                let base_dir = config.base_dir.as_deref().ok_or_else(|| invalid_argument("local catalog requires base_dir"))?;
                Self::local( base_dir)?
            }
        };

        Ok( catalog
            .with_max_concurrent_listings( config.max_concurrent_listings)
            .with_default_connection_type( config.connection_type()?)
            .with_look_ahead( config.look_ahead())
        )
    }

    /// use a different time source, e.g. to run queries relative to a simulated "now"
    pub fn with_clock<F> (mut self, clock: F)->Self where F: Fn()->DateTime<Utc> + Send + Sync + 'static {
        self.clock = Arc::new( clock);
        self
    }

    pub fn with_max_concurrent_listings (mut self, n: usize)->Self {
        self.max_concurrent_listings = n.max(1);
        self
    }

    pub fn with_default_connection_type (mut self, connection_type: Option<ConnectionType>)->Self {
        self.default_connection_type = connection_type;
        self
    }

    pub fn with_look_ahead (mut self, look_ahead: chrono::TimeDelta)->Self {
        self.look_ahead = look_ahead;
        self
    }

    pub fn protocol (&self)->Protocol {
        self.fs.protocol()
    }

    pub fn base_dir (&self)->Option<&str> {
        self.base_dir.as_deref()
    }

    pub fn look_ahead (&self)->chrono::TimeDelta {
        self.look_ahead
    }

    pub fn now (&self)->DateTime<Utc> {
        (self.clock)()
    }

    pub fn validate (&self, query: &ProductQuery)->Result<ValidQuery> {
        let mut vq = query.validate( self.protocol())?;
        if query.connection_type.is_none() && self.protocol().is_bucket() {
            if let Some(ct) = self.default_connection_type {
                vq.connection_type = Some(ct);
            }
        }
        Ok(vq)
    }

    /// all files of the queried product that overlap with `[start,end]` and pass the query filters
    pub async fn find_files (&self, query: &ProductQuery, start: DateTime<Utc>, end: DateTime<Utc>)->Result<ResultSet> {
        let vq = self.validate( query)?;
        let (start, end) = check_time_range( start, end, self.now())?;

        let infos = self.search( &vq, start, end).await?;
        let result = match vq.group_by {
            Some(key) => ResultSet::Grouped( group_file_infos( &infos, key)),
            None => ResultSet::Files( infos.into_iter().map(|fi| fi.path).collect())
        };
        set_connection_type( result, vq.connection_type, self.protocol())
    }

    /// the parsed and filtered files in timeslot order. Time range has to be checked by the caller
    pub(crate) async fn search (&self, vq: &ValidQuery, start: DateTime<Utc>, end: DateTime<Utc>)->Result<Vec<HimawariFileInfo>> {
        let protocol = self.protocol();
        let base_dir = self.base_dir.as_deref();

        if protocol == Protocol::Local {
            let root = satellite_root( protocol, base_dir, vq.satellite)?;
            if !self.fs.dir_exists( &root).await? {
                return Err( storage_error( format!("satellite directory {root} does not exist")))
            }
        }

        let dir = product_dir( protocol, base_dir, vq.satellite, vq.product_level, vq.product, vq.sector)?;
        let patterns: Vec<String> = timeslot_times( start, end).into_iter()
            .map(|t| timeslot_glob_pattern( &dir, t, vq.product_level))
            .collect();
        debug!("searching {} timeslot directories of {}", patterns.len(), dir);

        let fs = &self.fs;
        let listings: Vec<Vec<String>> = stream::iter( patterns.iter())
            .map(|pattern| fs.glob( pattern))
            .buffered( self.max_concurrent_listings)
            .try_collect().await?;

        let prefix = protocol.bucket_prefix();
        let mut infos = Vec::new();
        for path in listings.into_iter().flatten() {
            let path = if path.starts_with( prefix) { path } else { format!("{prefix}{path}") };
            let fi = extract_metadata_from_path( &path)?;
            if fi.product == vq.product && fi.sector == vq.sector && filter_file( &fi, start, end, &vq.filter) {
                infos.push( fi);
            }
        }
        debug!("found {} matching files", infos.len());

        Ok(infos)
    }
}
