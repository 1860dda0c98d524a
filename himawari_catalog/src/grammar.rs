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

//! declarative filename grammars
//!
//! A grammar is a template string with `{name}` placeholders that is compiled into an anchored regular
//! expression with one named capture group per field. Placeholders can carry a format spec:
//! ```text
//!   {name}           non-greedy text
//!   {name:3s}        text of exactly 3 chars
//!   {name:2d}        unsigned integer of exactly 2 digits
//!   {name:%Y%m%d_%H%M}  timestamp (%Y %m %d %H %M %S %j %f directives, other chars literal)
//! ```
//! Fractional seconds (`%f`) are accepted but truncated, i.e. all parsed times have whole second resolution.

use std::collections::HashMap;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{Result, invalid_argument, not_implemented};
use crate::vocabulary::ProductLevel;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
enum TimeDirective {
    Year,
    Month,
    Day,
    DayOfYear,
    Hour,
    Minute,
    Second,
    Fraction,
    Literal(char),
}

impl TimeDirective {
    fn regex (&self)->String {
        match self {
            TimeDirective::Year => "[0-9]{4}".to_string(),
            TimeDirective::DayOfYear => "[0-9]{3}".to_string(),
            TimeDirective::Fraction => "[0-9]{1,9}".to_string(),
            TimeDirective::Literal(c) => regex::escape( &c.to_string()),
            _ => "[0-9]{2}".to_string(),
        }
    }

    fn width (&self)->usize {
        match self {
            TimeDirective::Year => 4,
            TimeDirective::DayOfYear => 3,
            TimeDirective::Fraction => 9,
            TimeDirective::Literal(c) => c.len_utf8(),
            _ => 2,
        }
    }
}

#[derive(Debug,Clone,PartialEq,Eq)]
enum FieldKind {
    Text,
    Int,
    Time(Vec<TimeDirective>),
}

/// value of a matched field. A field that matched the template but could not be converted
/// (e.g. month 13) is `Malformed`, which is different from a field that is not in the grammar
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum FieldValue {
    Text(String),
    Int(u32),
    Time(DateTime<Utc>),
    Malformed(String),
}

/// the fields of a filename that matched a grammar
#[derive(Debug,Clone,Default)]
pub struct ParsedFields {
    values: HashMap<String,FieldValue>
}

impl ParsedFields {
    pub fn get (&self, name: &str)->Option<&FieldValue> {
        self.values.get( name)
    }

    pub fn contains (&self, name: &str)->bool {
        self.values.contains_key( name)
    }

    pub fn text (&self, name: &str)->Option<&str> {
        match self.values.get( name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None
        }
    }

    pub fn int (&self, name: &str)->Option<u32> {
        match self.values.get( name) {
            Some(FieldValue::Int(i)) => Some(*i),
            _ => None
        }
    }

    pub fn time (&self, name: &str)->Option<DateTime<Utc>> {
        match self.values.get( name) {
            Some(FieldValue::Time(t)) => Some(*t),
            _ => None
        }
    }

    pub fn is_malformed (&self, name: &str)->bool {
        matches!( self.values.get( name), Some(FieldValue::Malformed(_)))
    }
}

#[derive(Debug,Clone)]
pub struct FilenameGrammar {
    template: String,
    regex: Regex,
    fields: Vec<(String,FieldKind)>,
}

impl FilenameGrammar {

    pub fn compile (template: &str)->Result<Self> {
        let mut pattern = String::from("^");
        let mut fields: Vec<(String,FieldKind)> = Vec::new();
        let mut rest = template;

        while let Some(i) = rest.find('{') {
            pattern.push_str( &regex::escape( &rest[..i]));
            let Some(j) = rest[i..].find('}') else {
                return Err( invalid_argument( format!("unterminated field in grammar '{template}'")))
            };
            let spec = &rest[i+1..i+j];
            let (name, fmt) = match spec.split_once(':') {
                Some((name,fmt)) => (name, Some(fmt)),
                None => (spec, None)
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err( invalid_argument( format!("invalid field name '{name}' in grammar '{template}'")))
            }

            let (kind, re) = field_kind( fmt, template)?;
            pattern.push_str( &format!("(?P<{name}>{re})"));
            fields.push( (name.to_string(), kind));

            rest = &rest[i+j+1..];
        }
        pattern.push_str( &regex::escape( rest));
        pattern.push('$');

        let regex = Regex::new( &pattern).map_err(|e| invalid_argument( format!("invalid grammar '{template}': {e}")))?;
        Ok( FilenameGrammar { template: template.to_string(), regex, fields } )
    }

    pub fn template (&self)->&str {
        &self.template
    }

    pub fn field_names (&self)->impl Iterator<Item=&str> {
        self.fields.iter().map(|(name,_)| name.as_str())
    }

    pub fn is_match (&self, filename: &str)->bool {
        self.regex.is_match( filename)
    }

    /// match filename against this grammar. Returns `None` if it does not match the template
    pub fn parse (&self, filename: &str)->Option<ParsedFields> {
        let caps = self.regex.captures( filename)?;
        let mut values = HashMap::with_capacity( self.fields.len());

        for (name, kind) in &self.fields {
            if let Some(m) = caps.name( name) {
                let s = m.as_str();
                let v = match kind {
                    FieldKind::Text => FieldValue::Text( s.to_string()),
                    FieldKind::Int => s.parse::<u32>().map( FieldValue::Int).unwrap_or_else(|_| FieldValue::Malformed( s.to_string())),
                    FieldKind::Time(directives) => parse_time( s, directives).map( FieldValue::Time).unwrap_or_else(|| FieldValue::Malformed( s.to_string())),
                };
                values.insert( name.clone(), v);
            }
        }

        Some( ParsedFields { values } )
    }
}

fn field_kind (fmt: Option<&str>, template: &str)->Result<(FieldKind,String)> {
    let Some(fmt) = fmt else { return Ok( (FieldKind::Text, ".+?".to_string())) };

    if fmt.starts_with('%') {
        let directives = time_directives( fmt)?;
        let re: String = directives.iter().map(|d| d.regex()).collect();
        return Ok( (FieldKind::Time(directives), re))
    }

    let conv_pos = fmt.char_indices().last().map(|(i,_)| i).unwrap_or(0);
    let (width, conv) = fmt.split_at( conv_pos);
    let width: usize = width.parse().map_err(|_| invalid_argument( format!("invalid field width '{fmt}' in grammar '{template}'")))?;
    match conv {
        "s" => Ok( (FieldKind::Text, format!(".{{{width}}}"))),
        "d" => Ok( (FieldKind::Int, format!("[0-9]{{{width}}}"))),
        _ => Err( not_implemented( format!("field format '{fmt}' in grammar '{template}'")))
    }
}

fn time_directives (fmt: &str)->Result<Vec<TimeDirective>> {
    let mut directives = Vec::new();
    let mut chars = fmt.chars();

    while let Some(c) = chars.next() {
        if c == '%' {
            let d = match chars.next() {
                Some('Y') => TimeDirective::Year,
                Some('m') => TimeDirective::Month,
                Some('d') => TimeDirective::Day,
                Some('j') => TimeDirective::DayOfYear,
                Some('H') => TimeDirective::Hour,
                Some('M') => TimeDirective::Minute,
                Some('S') => TimeDirective::Second,
                Some('f') => TimeDirective::Fraction,
                Some('%') => TimeDirective::Literal('%'),
                other => return Err( not_implemented( format!("time directive %{} in '{fmt}'", other.unwrap_or(' '))))
            };
            directives.push( d);
        } else {
            directives.push( TimeDirective::Literal(c));
        }
    }
    Ok(directives)
}

fn parse_time (s: &str, directives: &[TimeDirective])->Option<DateTime<Utc>> {
    let (mut year, mut month, mut day, mut doy) = (None, None, None, None);
    let (mut hour, mut minute, mut second) = (0u32, 0u32, 0u32);
    let mut rest = s;

    for d in directives {
        let n = if *d == TimeDirective::Fraction {
            rest.chars().take_while(|c| c.is_ascii_digit()).count().min( d.width())
        } else {
            d.width()
        };
        // widths are in bytes, non-ASCII input has no char boundary there
        let tok = rest.get(..n)?;
        rest = rest.get(n..)?;

        match d {
            TimeDirective::Literal(c) => if !tok.starts_with(*c) { return None },
            TimeDirective::Fraction => {} // whole seconds only
            TimeDirective::Year => year = Some( tok.parse::<i32>().ok()?),
            TimeDirective::Month => month = Some( tok.parse::<u32>().ok()?),
            TimeDirective::Day => day = Some( tok.parse::<u32>().ok()?),
            TimeDirective::DayOfYear => doy = Some( tok.parse::<u32>().ok()?),
            TimeDirective::Hour => hour = tok.parse().ok()?,
            TimeDirective::Minute => minute = tok.parse().ok()?,
            TimeDirective::Second => second = tok.parse().ok()?,
        }
    }
    if !rest.is_empty() { return None }

    let year = year?;
    let date = match doy {
        Some(doy) => NaiveDate::from_yo_opt( year, doy)?,
        None => NaiveDate::from_ymd_opt( year, month.unwrap_or(1), day.unwrap_or(1))?
    };
    let time = NaiveTime::from_hms_opt( hour, minute, second)?;
    Some( NaiveDateTime::new( date, time).and_utc())
}

/* #region AHI grammars ********************************************************************************************/

pub const L1B_RAD_GRAMMAR: &str =
    "{system_environment:2s}_{platform_shortname:3s}_{start_time:%Y%m%d_%H%M}_{channel:3s}_{sector_observation_number}_R{spatial_res:2d}_S{segment_number:2d}{segment_total:2d}.DAT.bz2";

pub const L2_CLOUDS_GRAMMAR: &str =
    "AHI-{product}_{version}_{platform_shortname:3s}_s{start_time:%Y%m%d%H%M%S%f}_e{end_time:%Y%m%d%H%M%S%f}_c{production_time:%Y%m%d%H%M%S%f}.nc";

pub const L2_RRQPE_GRAMMAR: &str =
    "{product}-INST-{resolution}-AHI_{version}_{platform_shortname:3s}_s{start_time:%Y%m%d%H%M%S%f}_e{end_time:%Y%m%d%H%M%S%f}_c{production_time:%Y%m%d%H%M%S%f}.nc";

pub const L2_LEGACY_GRAMMAR: &str =
    "{product}_{platform_fullname:9s}_AHI_{start_time:%Y%m%d_%H%M}.nc";

lazy_static! {
    /// grammars for (product level, product token as it appears in filenames)
    static ref AHI_GRAMMARS: Vec<(ProductLevel,&'static str,FilenameGrammar)> = {
        let entries: [(ProductLevel,&'static str,&'static str);9] = [
            (ProductLevel::L1b, "Rad", L1B_RAD_GRAMMAR),
            (ProductLevel::L2, "CMSK", L2_CLOUDS_GRAMMAR),
            (ProductLevel::L2, "CHGT", L2_CLOUDS_GRAMMAR),
            (ProductLevel::L2, "CPHS", L2_CLOUDS_GRAMMAR),
            (ProductLevel::L2, "RRQPE", L2_RRQPE_GRAMMAR),
            (ProductLevel::L2, "CLOUD_MASK", L2_LEGACY_GRAMMAR),
            (ProductLevel::L2, "CLOUD_HEIGHT", L2_LEGACY_GRAMMAR),
            (ProductLevel::L2, "CLOUD_PHASE", L2_LEGACY_GRAMMAR),
            (ProductLevel::L2, "HYDRO_RAIN_RATE", L2_LEGACY_GRAMMAR),
        ];
        entries.into_iter()
            .map(|(level,token,template)| (level, token, FilenameGrammar::compile(template).expect("invalid AHI grammar")))
            .collect()
    };
}

/// the grammar for filenames of a given product level and (raw) product token
pub fn ahi_grammar (product_level: ProductLevel, product_token: &str)->Result<&'static FilenameGrammar> {
    AHI_GRAMMARS.iter()
        .find(|(level,token,_)| *level == product_level && *token == product_token)
        .map(|(_,_,grammar)| grammar)
        .ok_or_else(|| not_implemented( format!("filename grammar for AHI {product_level} product {product_token}")))
}

/* #endregion AHI grammars */
