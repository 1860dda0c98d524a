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

//! show metadata that is inferred from Himawari AHI filenames, or list the catalog vocabulary
//! ```text
//!   himawari_file_info HS_H08_20210101_0000_B01_FLDK_R10_S0110.DAT.bz2
//!   himawari_file_info --key start_time <paths>..
//!   himawari_file_info --list channels
//! ```

use anyhow::{Result, anyhow};
use clap::Parser;
use lazy_static::lazy_static;
use serde_json::{json, Value};

use himawari_common::init_tracing;
use himawari_catalog::{
    available_channels, available_connection_types, available_group_keys, available_product_levels,
    available_products, available_protocols, available_scene_abbrs, available_satellites, available_sectors,
    check_group_key, check_product, extract_metadata_from_paths, get_key_from_paths
};

#[derive(Parser,Debug)]
#[command(about="show metadata of Himawari AHI files")]
struct CliOpts {
    /// only show the values of this metadata key
    #[arg(long)]
    key: Option<String>,

    /// list available values of a vocabulary item (satellites, sectors, product_levels, products,
    /// channels, scene_abbrs, group_keys, protocols, connection_types)
    #[arg(long)]
    list: Option<String>,

    /// restrict listed sectors to those available for this product
    #[arg(long)]
    product: Option<String>,

    /// file or object paths
    paths: Vec<String>,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

fn names<T: ToString> (items: Vec<T>)->Value {
    json!( items.iter().map(|i| i.to_string()).collect::<Vec<String>>())
}

fn vocabulary (item: &str)->Result<Value> {
    let v = match item {
        "satellites" => names( available_satellites()),
        "sectors" => {
            let product = ARGS.product.as_deref().map(|p| check_product( p, None)).transpose()?;
            names( available_sectors( product))
        }
        "product_levels" => names( available_product_levels()),
        "products" => names( available_products( None)),
        "channels" => names( available_channels()),
        "scene_abbrs" => names( available_scene_abbrs()),
        "group_keys" => names( available_group_keys()),
        "protocols" => names( available_protocols()),
        "connection_types" => names( available_connection_types()),
        other => return Err( anyhow!("unknown vocabulary item '{other}'"))
    };
    Ok(v)
}

fn main()->Result<()> {
    init_tracing("warn");

    let out = if let Some(item) = &ARGS.list {
        vocabulary( item)?
    } else if let Some(key) = &ARGS.key {
        let values = get_key_from_paths( &ARGS.paths, check_group_key( key)?)?;
        names( values)
    } else {
        serde_json::to_value( extract_metadata_from_paths( &ARGS.paths)?)?
    };

    println!("{}", serde_json::to_string_pretty( &out)?);
    Ok(())
}
