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

//! command line tool to search Himawari AHI files in the NOAA buckets or local archives, e.g.
//! ```text
//!   find_himawari_files --sector FLDK --channels B01,B03 files "2021-01-01 00:00" "2021-01-01 00:20"
//!   find_himawari_files --protocol local --base-dir /data --sector Japan latest -n 4
//! ```
//! Results are written as JSON to stdout, logging goes to stderr (set RUST_LOG to control).

use std::sync::Arc;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;

use himawari_common::{init_tracing, info, datetime::{minutes, parse_utc_datetime}};
use himawari_catalog::{Catalog, CatalogConfig, FilterParameters, ProductQuery};

#[derive(Parser,Debug)]
#[command(about="search Himawari AHI data files")]
struct CliOpts {
    /// pathname of RON CatalogConfig
    #[arg(long)]
    config: Option<String>,

    /// storage protocol ("s3" or "local"), overrides config
    #[arg(long)]
    protocol: Option<String>,

    /// root directory of local archive
    #[arg(long)]
    base_dir: Option<String>,

    #[arg(long, default_value="himawari-8")]
    satellite: String,

    #[arg(long, default_value="L1b")]
    product_level: String,

    #[arg(long, default_value="Rad")]
    product: String,

    #[arg(long)]
    sector: Option<String>,

    /// comma separated list of channels (aliases allowed)
    #[arg(long, value_delimiter=',')]
    channels: Vec<String>,

    /// comma separated list of scene abbreviations (R1..R5)
    #[arg(long, value_delimiter=',')]
    scene_abbr: Vec<String>,

    /// "bucket", "https" or "nc_bytes"
    #[arg(long)]
    connection_type: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand,Debug)]
enum Cmd {
    /// all files within a time range
    Files {
        start: String,
        end: String,
        /// metadata key to group results by
        #[arg(long)]
        group_by: Option<String>,
    },
    /// files (or start time) of the acquisition closest to a given time
    Closest {
        time: String,
        #[arg(long)]
        start_time_only: bool,
    },
    /// files (or start time) of the most recent acquisitions
    Latest {
        #[arg(short, default_value_t=1)]
        n: usize,
        #[arg(long)]
        check_consistency: bool,
        /// minutes to look back for latest data
        #[arg(long)]
        look_ahead: Option<u32>,
        #[arg(long)]
        start_time_only: bool,
    },
    /// files of the acquisitions preceding a given start time
    Previous {
        time: String,
        #[arg(short, default_value_t=1)]
        n: usize,
        #[arg(long)]
        include_start_time: bool,
        #[arg(long)]
        check_consistency: bool,
    },
    /// files of the acquisitions following a given start time
    Next {
        time: String,
        #[arg(short, default_value_t=1)]
        n: usize,
        #[arg(long)]
        include_start_time: bool,
        #[arg(long)]
        check_consistency: bool,
    },
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

fn parse_time (s: &str)->Result<DateTime<Utc>> {
    Ok( parse_utc_datetime( s)? )
}

fn get_config ()->Result<CatalogConfig> {
    let mut config = match &ARGS.config {
        Some(path) => CatalogConfig::load( path)?,
        None => CatalogConfig::default()
    };
    if let Some(protocol) = &ARGS.protocol { config.protocol = protocol.clone() }
    if let Some(base_dir) = &ARGS.base_dir { config.base_dir = Some(base_dir.clone()) }
    Ok(config)
}

fn get_query ()->ProductQuery {
    let mut filter = FilterParameters::new();
    if !ARGS.channels.is_empty() { filter = filter.with_channels( &ARGS.channels) }
    if !ARGS.scene_abbr.is_empty() { filter = filter.with_scene_abbr( &ARGS.scene_abbr) }

    ProductQuery {
        satellite: ARGS.satellite.clone(),
        product_level: ARGS.product_level.clone(),
        product: ARGS.product.clone(),
        sector: ARGS.sector.clone(),
        filter,
        group_by: None,
        connection_type: ARGS.connection_type.clone(),
    }
}

fn print_json<T: serde::Serialize> (v: &T)->Result<()> {
    println!("{}", serde_json::to_string_pretty( v)?);
    Ok(())
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing("info");

    let config = get_config()?;
    let catalog = Catalog::from_config( &config).await?;
    let query = get_query();
    info!("searching {} {} {} on {}", query.satellite, query.product_level, query.product, catalog.protocol());

    match &ARGS.cmd {
        Cmd::Files { start, end, group_by } => {
            let mut query = query;
            query.group_by = group_by.clone();
            let result = catalog.find_files( &query, parse_time( start)?, parse_time( end)?).await?;
            info!("found {} files", result.len());
            print_json( &result)?;
        }
        Cmd::Closest { time, start_time_only } => {
            let time = parse_time( time)?;
            if *start_time_only {
                print_json( &catalog.find_closest_start_time( &query, time).await?)?;
            } else {
                print_json( &catalog.find_closest_files( &query, time).await?)?;
            }
        }
        Cmd::Latest { n, check_consistency, look_ahead, start_time_only } => {
            let look_ahead = look_ahead.map(|m| minutes( m as i64));
            if *start_time_only {
                print_json( &catalog.find_latest_start_time( &query, look_ahead).await?)?;
            } else {
                print_json( &catalog.find_latest_files( &query, *n, *check_consistency, look_ahead).await?)?;
            }
        }
        Cmd::Previous { time, n, include_start_time, check_consistency } => {
            let files = catalog.find_previous_files( &query, parse_time( time)?, *n, *include_start_time, *check_consistency).await?;
            print_json( &files)?;
        }
        Cmd::Next { time, n, include_start_time, check_consistency } => {
            let files = catalog.find_next_files( &query, parse_time( time)?, *n, *include_start_time, *check_consistency).await?;
            print_json( &files)?;
        }
    }

    Ok(())
}
