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

//! Unsigned LEB128, the variable length integer encoding WebAssembly uses
//! for the sub-opcode that follows a prefix byte.

/// Encode `value` as 7-bit groups, least significant first. Every byte but
/// the last has its high bit set. Zero encodes to an empty sequence.
pub fn encode(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    while value > 0 {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        out.push(byte);
    }
    out
}

/// Decode a sequence produced by `encode`, returning the value and the
/// number of bytes consumed. `None` if the input ends mid-value or
/// overflows 32 bits.
pub fn decode(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = 7 * i as u32;
        if shift >= 32 {
            return None;
        }
        let group = (byte & 0x7f) as u32;
        if shift > 0 && group >> (32 - shift) != 0 {
            return None;
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    if bytes.is_empty() {
        Some((0, 0))
    } else {
        None
    }
}
