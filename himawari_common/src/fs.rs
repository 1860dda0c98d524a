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

use std::path::Path;

/// the last element of a '/' separated path or URL. Works for object store keys and
/// local paths alike (we do not want OS specific separators for bucket paths)
pub fn basename (path: &str)->&str {
    let path = path.trim_end_matches('/');
    match path.rfind(['/','\\']) {
        Some(idx) => &path[idx+1..],
        None => path
    }
}

/// join path elements with '/' without duplicating separators
pub fn join_path (base: &str, elem: &str)->String {
    if base.is_empty() {
        elem.to_string()
    } else if base.ends_with('/') {
        format!("{base}{}", elem.trim_start_matches('/'))
    } else {
        format!("{base}/{}", elem.trim_start_matches('/'))
    }
}

pub fn is_existing_dir (path: impl AsRef<Path>)->bool {
    path.as_ref().is_dir()
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().to_string()
}
