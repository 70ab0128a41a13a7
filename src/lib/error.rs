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

use thiserror::Error;

/// Everything that can stop a generator run. None of these are recovered
/// from; the binary reports the error and exits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Bad status code from {url}: {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Without an exclusion nothing checks that the table still has the
    /// duplicate we expect.
    #[error("Configuration error: exclusions must not be empty")]
    NoExclusions,

    /// A record line is missing its closing parenthesis.
    #[error("line {line}: unterminated record")]
    Unterminated { line: usize },

    /// The table format changed upstream.
    #[error("line {line}: expected {expected} fields, found {found}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field {field} has bad hex value {value:?}: {source}")]
    InvalidHex {
        line: usize,
        field: usize,
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("{name}: value {value:#x} does not fit in a byte")]
    ByteRange { name: String, value: u32 },

    /// The table no longer contains an entry we expect to remove.
    #[error("Excluded opcode {name} {bytes:?} not found in table")]
    ExclusionMissing { name: String, bytes: Vec<u8> },

    #[error("Duplicate opcode name {0}")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
