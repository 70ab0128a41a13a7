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

use crate::error::{Error, Result};

/// Every record in `opcode.def` starts with this macro call.
pub const RECORD_MARKER: &str = "WABT_OPCODE(";

/// `WABT_OPCODE(rtype, type1, type2, type3, mem_size, prefix, code, Name,
/// text, decomp)`
pub const FIELD_COUNT: usize = 10;

const OPCODE_FIELD: usize = 5;
const PREFIX_FIELD: usize = 6;
const NAME_FIELD: usize = 8;

/// One `WABT_OPCODE` row. `opcode` is the leading byte (zero for single
/// byte instructions) and `prefix` the value that follows or, for single
/// byte instructions, the instruction byte itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OpcodeRecord {
    pub line: usize,
    pub opcode: u32,
    pub prefix: u32,
    pub name: String,
}

/// Extract every record from the table text, in the order they appear.
pub fn parse_table(text: &str) -> Result<Vec<OpcodeRecord>> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if !line.starts_with(RECORD_MARKER) {
            continue;
        }
        records.push(parse_record(i + 1, line)?);
    }
    debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Parse a single trimmed line that starts with `RECORD_MARKER`.
pub fn parse_record(line: usize, text: &str) -> Result<OpcodeRecord> {
    let fields = split_fields(line, text)?;
    if fields.len() != FIELD_COUNT {
        return Err(Error::Arity { line,
                                  expected: FIELD_COUNT,
                                  found: fields.len() });
    }

    let opcode = parse_hex(line, OPCODE_FIELD, fields[OPCODE_FIELD])?;
    let prefix = parse_hex(line, PREFIX_FIELD, fields[PREFIX_FIELD])?;
    // The text field is already quoted, which is exactly Zig's @"..."
    // identifier form.
    let name = format!("@{}", fields[NAME_FIELD]);

    trace!("line {}: {} {:#x} {:#x}", line, name, opcode, prefix);
    Ok(OpcodeRecord { line, opcode, prefix, name })
}

fn split_fields(line: usize, text: &str) -> Result<Vec<&str>> {
    let inner = text.strip_prefix(RECORD_MARKER)
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or(Error::Unterminated { line })?;
    Ok(inner.split(',').map(str::trim).collect())
}

fn parse_hex(line: usize, field: usize, value: &str) -> Result<u32> {
    let digits = value.strip_prefix("0x")
                      .or_else(|| value.strip_prefix("0X"))
                      .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|source| Error::InvalidHex {
        line,
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::IntErrorKind;

    const DEMO_TABLE: &str = "\
/* opcode.def excerpt */
#ifndef WABT_OPCODE
#error \"You must define WABT_OPCODE before including this file.\"
#endif

WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x00, Unreachable, \"unreachable\", \"\")
  WABT_OPCODE(I32, I32, I32, ___, 0, 0, 0x6a, I32Add, \"i32.add\", \"+\")  
WABT_OPCODE(I32, F32, ___, ___, 0, 0xfc, 0x00, I32TruncSatF32S, \"i32.trunc_sat_f32_s\", \"\")
";

    #[test]
    fn parses_marked_lines_in_order() {
        let records = parse_table(DEMO_TABLE).expect("Parse failed.");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["@\"unreachable\"", "@\"i32.add\"",
                               "@\"i32.trunc_sat_f32_s\""]);
        assert_eq!(records[1], OpcodeRecord { line: 7,
                                              opcode: 0,
                                              prefix: 0x6a,
                                              name: "@\"i32.add\"".to_string() });
        assert_eq!(records[2].opcode, 0xfc);
        assert_eq!(records[2].prefix, 0);
    }

    #[test]
    fn empty_table() {
        assert!(parse_table("").expect("Parse failed.").is_empty());
        assert!(parse_table("#define WABT_OPCODE(x)\n").expect("Parse failed.")
                                                        .is_empty());
    }

    #[test]
    fn wrong_arity() {
        let short = "WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, Nop, \"nop\")";
        match parse_table(short) {
            Err(Error::Arity { line: 1, expected: 10, found: 9 }) => {},
            r => panic!("Unexpected result: {:?}", r),
        }

        let long = "\n\nWABT_OPCODE(a, b, c, d, e, 0, 0x01, Nop, \"nop\", \"\", x)";
        match parse_table(long) {
            Err(Error::Arity { line: 3, found: 11, .. }) => {},
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn unterminated() {
        let text = "WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, Nop, \"nop\", \"\"";
        match parse_table(text) {
            Err(Error::Unterminated { line: 1 }) => {},
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn bad_hex() {
        let text = "WABT_OPCODE(___, ___, ___, ___, 0, 0, 0xzz, Nop, \"nop\", \"\")";
        match parse_table(text) {
            Err(Error::InvalidHex { line: 1, field: 6, value, .. }) =>
                assert_eq!(value, "0xzz"),
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn hex_overflow() {
        let text = "WABT_OPCODE(___, ___, ___, ___, 0, 0x100000000, 0x01, Nop, \"nop\", \"\")";
        let err = parse_table(text).expect_err("Overflow accepted.");
        match &err {
            Error::InvalidHex { line: 1, field: 5, value, source } => {
                assert_eq!(value, "0x100000000");
                assert_eq!(source.kind(), &IntErrorKind::PosOverflow);
            },
            e => panic!("Unexpected error: {:?}", e),
        }
        assert!(err.to_string().contains("too large"), "{}", err);
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse_hex(1, 5, "0").expect("Parse failed."), 0);
        assert_eq!(parse_hex(1, 5, "0xFD").expect("Parse failed."), 0xfd);
        assert_eq!(parse_hex(1, 5, "0X1b").expect("Parse failed."), 0x1b);
        assert_eq!(parse_hex(1, 5, "100").expect("Parse failed."), 0x100);
        assert!(parse_hex(1, 5, "").is_err());
    }
}
