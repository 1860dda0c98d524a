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

//! RON based configuration loading

use std::{fs, path::Path};
use serde::Deserialize;

use crate::errors::Result;

/// load a RON config from the given pathname
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read_to_string(path.as_ref())?;
    load_config_str( &data)
}

/// parse a RON config from a string (mostly for tests and embedded defaults)
pub fn load_config_str<C> (data: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::from_str( data)? )
}
