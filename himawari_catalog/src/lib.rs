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

//! catalog and query functions for Himawari AHI data files, stored either in the public NOAA
//! buckets or in local archives that mirror the bucket layout.
//!
//! All metadata is inferred from filenames. The main entry point is [`Catalog`], which provides
//! time window searches (`find_files`) and queries for closest, latest, previous and next
//! acquisitions of a [`ProductQuery`].

mod errors;
pub use errors::*;

pub mod vocabulary;
pub mod grammar;
pub mod metadata;
pub mod filter;
pub mod grouping;
pub mod layout;
pub mod storage;
pub mod connection;
pub mod config;
pub mod search;
pub mod timesteps;

pub use vocabulary::*;
pub use metadata::{
    extract_metadata_from_filename, extract_metadata_from_path, extract_metadata_from_paths,
    get_key_from_paths, get_key_from_grouped_paths, GroupValue, HimawariFileInfo
};
pub use filter::{filter_files, FilterParameters};
pub use grouping::{check_interval_regularity, group_files, ResultSet};
pub use storage::{FileSystem, LocalFileSystem, MemoryFileSystem, S3FileSystem};
pub use connection::set_connection_type;
pub use config::CatalogConfig;
pub use search::{Catalog, ProductQuery, ValidQuery};
pub use timesteps::TimestepFiles;
