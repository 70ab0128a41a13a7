/*
    wasmop Copyright (C) 2021 Rev. Johnny Healey <rev.null@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/Webassembly/wabt/main/include/wabt/opcode.def";
pub const DEFAULT_OUTPUT: &str = "inst.zig";
pub const DEFAULT_USER_AGENT: &str = "wasmopgen";

/// An entry that must be present in the table and is dropped before
/// rendering.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct Exclusion {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// WABT lists `select` twice; the typed variant is the one we keep.
pub fn default_exclusions() -> Vec<Exclusion> {
    vec![Exclusion { name: String::from("@\"select\""), bytes: vec![0x1b] }]
}

/// Where the table text comes from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TableSource {
    Url(String),
    File(PathBuf),
}

/// `-` writes to stdout.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl From<&str> for Output {
    fn from(s: &str) -> Self {
        if s == "-" {
            Output::Stdout
        } else {
            Output::File(PathBuf::from(s))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    source_url: String,
    input: Option<String>,
    output: String,
    user_agent: String,
    timeout_secs: Option<u64>,
    #[serde(default = "default_exclusions")]
    exclusions: Vec<Exclusion>,
}

#[derive(Clone, Debug)]
pub struct GenConfig {
    pub source: TableSource,
    pub output: Output,
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
    pub exclusions: Vec<Exclusion>,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            source: TableSource::Url(String::from(DEFAULT_SOURCE_URL)),
            output: Output::from(DEFAULT_OUTPUT),
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout_secs: None,
            exclusions: default_exclusions(),
        }
    }
}

/// Command line values that take precedence over the config file.
#[derive(Default, Debug)]
pub struct Overrides {
    pub source_url: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

impl GenConfig {
    /// Defaults, then `file` if given, then `overrides`. At least one
    /// exclusion has to remain.
    pub fn read_config(file: Option<&str>, overrides: &Overrides)
        -> Result<GenConfig> {

        let mut settings = config::Config::default();

        settings.set_default("source_url", DEFAULT_SOURCE_URL)?;
        settings.set_default("output", DEFAULT_OUTPUT)?;
        settings.set_default("user_agent", DEFAULT_USER_AGENT)?;

        if let Some(file) = file {
            settings.merge(config::File::with_name(file))?;
        }

        if let Some(url) = &overrides.source_url {
            settings.set("source_url", url.as_str())?;
        }
        if let Some(input) = &overrides.input {
            settings.set("input", input.as_str())?;
        }
        if let Some(output) = &overrides.output {
            settings.set("output", output.as_str())?;
        }

        let raw: RawConfig = settings.try_into()?;
        if raw.exclusions.is_empty() {
            return Err(Error::NoExclusions);
        }
        Ok(GenConfig::from(raw))
    }
}

impl From<RawConfig> for GenConfig {
    fn from(raw: RawConfig) -> Self {
        // A local input wins over the URL.
        let source = match raw.input {
            Some(path) => TableSource::File(PathBuf::from(path)),
            None => TableSource::Url(raw.source_url),
        };
        GenConfig {
            source,
            output: Output::from(raw.output.as_str()),
            user_agent: raw.user_agent,
            timeout_secs: raw.timeout_secs,
            exclusions: raw.exclusions,
        }
    }
}
