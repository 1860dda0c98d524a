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

use thiserror::Error;
use aws_sdk_s3::{error::SdkError, operation::list_objects_v2::ListObjectsV2Error};

pub type Result<T> = std::result::Result<T, HimawariCatalogError>;

#[derive(Error,Debug)]
pub enum HimawariCatalogError {
    /// malformed or out-of-domain caller input (unknown alias, chronology violation, future time..)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// storage location does not exist or is not accessible
    #[error("storage error: {0}")]
    StorageError(String),

    /// filename does not match any known grammar or lacks identifying tokens
    #[error("inference error: {0}")]
    InferenceError(String),

    #[error("no data: {0}")]
    NoDataError(String),

    #[error("insufficient data: {0}")]
    InsufficientDataError(String),

    #[error("inconsistent query: {0}")]
    InconsistentQueryError(String),

    #[error("irregular interval: {0}")]
    IrregularIntervalError(String),

    /// unsupported protocol, connection type or product
    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("common error {0}")]
    CommonError( #[from] himawari_common::HimawariCommonError),

    #[error("glob pattern error {0}")]
    GlobPatternError( #[from] glob::PatternError),

    #[error("glob error {0}")]
    GlobError( #[from] glob::GlobError),

    #[error("globset error {0}")]
    GlobSetError( #[from] globset::Error),

    #[error("AWS S3 list objects error {0}")]
    AWSS3ListObjectsError( #[from] SdkError<ListObjectsV2Error>),
}

pub fn invalid_argument (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::InvalidArgument(msg.to_string())
}

pub fn storage_error (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::StorageError(msg.to_string())
}

pub fn inference_error (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::InferenceError(msg.to_string())
}

pub fn no_data (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::NoDataError(msg.to_string())
}

pub fn insufficient_data (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::InsufficientDataError(msg.to_string())
}

pub fn inconsistent_query (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::InconsistentQueryError(msg.to_string())
}

pub fn irregular_interval (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::IrregularIntervalError(msg.to_string())
}

pub fn not_implemented (msg: impl ToString)->HimawariCatalogError {
    HimawariCatalogError::NotImplemented(msg.to_string())
}
