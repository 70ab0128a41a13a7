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

use log::*;
use std::collections::HashSet;
use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::leb128;
use crate::table::OpcodeRecord;

/// A symbolic opcode name and the bytes that encode it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EncodedOpcode {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl EncodedOpcode {
    pub fn new(name: &str, bytes: &[u8]) -> Self {
        EncodedOpcode { name: name.to_string(), bytes: bytes.to_vec() }
    }

    /// Single byte instructions encode as the instruction byte. Prefixed
    /// instructions encode as the prefix byte followed by the LEB128
    /// sub-opcode.
    pub fn encode(record: &OpcodeRecord) -> Result<Self> {
        let bytes = if record.opcode == 0 {
            vec![to_byte(&record.name, record.prefix)?]
        } else {
            let mut bytes = vec![to_byte(&record.name, record.opcode)?];
            bytes.extend(leb128::encode(record.prefix));
            bytes
        };
        Ok(EncodedOpcode { name: record.name.clone(), bytes })
    }

    pub fn matches(&self, name: &str, bytes: &[u8]) -> bool {
        self.name == name && self.bytes == bytes
    }
}

fn to_byte(name: &str, value: u32) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::ByteRange { name: name.to_string(),
                                                       value })
}

pub fn encode_all(records: &[OpcodeRecord]) -> Result<Vec<EncodedOpcode>> {
    records.iter().map(EncodedOpcode::encode).collect()
}

/// Remove the first opcode matching both `name` and `bytes`. The entry has
/// to be there; its absence means the upstream table changed.
pub fn remove_exclusion(opcodes: &mut Vec<EncodedOpcode>, name: &str,
                        bytes: &[u8]) -> Result<EncodedOpcode> {
    match opcodes.iter().position(|op| op.matches(name, bytes)) {
        Some(i) => {
            let removed = opcodes.remove(i);
            info!("Excluded {} {:?}", removed.name, removed.bytes);
            Ok(removed)
        },
        None => Err(Error::ExclusionMissing { name: name.to_string(),
                                              bytes: bytes.to_vec() }),
    }
}

/// Every name ends up as an enum field, so they must be distinct.
pub fn check_unique(opcodes: &[EncodedOpcode]) -> Result<()> {
    let mut seen = HashSet::with_capacity(opcodes.len());
    for op in opcodes {
        if !seen.insert(op.name.as_str()) {
            return Err(Error::DuplicateName(op.name.clone()));
        }
    }
    Ok(())
}
