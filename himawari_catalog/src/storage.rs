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

//! the storage abstraction we search in. Implementations only have to list paths for glob patterns
//! and check directory existence. Listings of bucket filesystems return paths without the protocol
//! prefix (e.g. `noaa-himawari8/AHI-L1b-FLDK/..`), which callers have to restore

use std::path::Path;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_sdk_s3::Client;
use globset::{GlobBuilder, GlobMatcher};

use himawari_common::{trace, fs::{is_existing_dir, path_to_lossy_string}};
use crate::errors::{Result, invalid_argument};
use crate::vocabulary::Protocol;

pub const DEFAULT_S3_REGION: &str = "us-east-1";

#[async_trait]
pub trait FileSystem: Send + Sync {
    fn protocol (&self)->Protocol;

    /// all paths matching the pattern, in lexical order
    async fn glob (&self, pattern: &str)->Result<Vec<String>>;

    async fn dir_exists (&self, path: &str)->Result<bool>;
}

/// pattern matching where `*` does not cross directory boundaries
fn glob_matcher (pattern: &str)->Result<GlobMatcher> {
    Ok( GlobBuilder::new( pattern).literal_separator(true).build()?.compile_matcher() )
}

fn strip_protocol<'a> (protocol: Protocol, path: &'a str)->&'a str {
    path.strip_prefix( protocol.bucket_prefix()).unwrap_or( path)
}

/// the leading path part without any glob meta characters
fn literal_prefix (pattern: &str)->&str {
    match pattern.find(['*','?','[','{']) {
        Some(idx) => &pattern[..idx],
        None => pattern
    }
}

/* #region local filesystem ***************************************************************************************/

pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn protocol (&self)->Protocol { Protocol::Local }

    async fn glob (&self, pattern: &str)->Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in glob::glob( pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push( path_to_lossy_string( &path));
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn dir_exists (&self, path: &str)->Result<bool> {
        Ok( is_existing_dir( Path::new( path)))
    }
}

/* #endregion local filesystem */

/* #region S3 filesystem ******************************************************************************************/

/// anonymous access to public S3 buckets
pub struct S3FileSystem {
    client: Client,
}

impl S3FileSystem {
    pub async fn new (region: &str)->Self {
        let region_provider = RegionProviderChain::first_try( Region::new( region.to_string()));
        let aws_config = aws_config::defaults( BehaviorVersion::latest()).no_credentials().region( region_provider).load().await;
        S3FileSystem { client: Client::new( &aws_config) }
    }

    pub fn from_client (client: Client)->Self {
        S3FileSystem { client }
    }

    fn split_bucket (path: &str)->Result<(&str,&str)> {
        let path = strip_protocol( Protocol::S3, path);
        match path.split_once('/') {
            Some((bucket,key)) => Ok( (bucket,key) ),
            None if !path.is_empty() => Ok( (path, "") ),
            None => Err( invalid_argument( "empty S3 path"))
        }
    }

    async fn list_keys (&self, bucket: &str, prefix: &str)->Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pages = self.client.list_objects_v2().bucket( bucket).prefix( prefix).into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page?;
            for obj in page.contents() {
                if let Some(key) = obj.key() {
                    keys.push( key.to_string());
                }
            }
        }
        trace!("listed {} objects in {}/{}", keys.len(), bucket, prefix);
        Ok(keys)
    }
}

#[async_trait]
impl FileSystem for S3FileSystem {
    fn protocol (&self)->Protocol { Protocol::S3 }

    async fn glob (&self, pattern: &str)->Result<Vec<String>> {
        let (bucket, key_pattern) = Self::split_bucket( pattern)?;
        let matcher = glob_matcher( key_pattern)?;

        let mut paths: Vec<String> = self.list_keys( bucket, literal_prefix( key_pattern)).await?
            .into_iter()
            .filter(|key| matcher.is_match( key))
            .map(|key| format!("{bucket}/{key}"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    async fn dir_exists (&self, path: &str)->Result<bool> {
        let (bucket, key) = Self::split_bucket( path)?;
        if key.is_empty() { return Ok(true) }

        let prefix = format!("{}/", key.trim_end_matches('/'));
        let result = self.client.list_objects_v2().bucket( bucket).prefix( prefix).max_keys(1).send().await?;
        Ok( result.key_count().unwrap_or(0) > 0 )
    }
}

/* #endregion S3 filesystem */

/* #region in-memory filesystem ***********************************************************************************/

/// a fixed set of paths, e.g. from an offline inventory or for testing. Paths can be given
/// with or without protocol prefix
pub struct MemoryFileSystem {
    protocol: Protocol,
    paths: Vec<String>,
}

impl MemoryFileSystem {
    pub fn new<S: ToString> (protocol: Protocol, paths: &[S])->Self {
        let mut paths: Vec<String> = paths.iter().map(|p| strip_protocol( protocol, &p.to_string()).to_string()).collect();
        paths.sort();
        MemoryFileSystem { protocol, paths }
    }

    pub fn len (&self)->usize { self.paths.len() }

    pub fn is_empty (&self)->bool { self.paths.is_empty() }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    fn protocol (&self)->Protocol { self.protocol }

    async fn glob (&self, pattern: &str)->Result<Vec<String>> {
        let matcher = glob_matcher( strip_protocol( self.protocol, pattern))?;
        Ok( self.paths.iter().filter(|p| matcher.is_match( p.as_str())).cloned().collect() )
    }

    async fn dir_exists (&self, path: &str)->Result<bool> {
        let dir = format!("{}/", strip_protocol( self.protocol, path).trim_end_matches('/'));
        Ok( self.paths.iter().any(|p| p.starts_with( &dir)) )
    }
}

/* #endregion in-memory filesystem */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_prefix () {
        assert_eq!( literal_prefix( "AHI-L1b-FLDK/2021/01/01/0000/*.bz2*"), "AHI-L1b-FLDK/2021/01/01/0000/");
        assert_eq!( literal_prefix( "a/b"), "a/b");
    }

    #[tokio::test]
    async fn test_memory_glob () {
        let fs = MemoryFileSystem::new( Protocol::S3, &[
            "s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0000/HS_H08_20210101_0000_B01_FLDK_R10_S0110.DAT.bz2",
            "s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0010/HS_H08_20210101_0010_B01_FLDK_R10_S0110.DAT.bz2",
        ]);
        let paths = fs.glob( "s3://noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0000/*.bz2*").await.unwrap();
        assert_eq!( paths, vec!["noaa-himawari8/AHI-L1b-FLDK/2021/01/01/0000/HS_H08_20210101_0000_B01_FLDK_R10_S0110.DAT.bz2"]);

        assert!( fs.dir_exists( "s3://noaa-himawari8/AHI-L1b-FLDK").await.unwrap());
        assert!( !fs.dir_exists( "s3://noaa-himawari8/AHI-L1b-Japan").await.unwrap());
    }
}
