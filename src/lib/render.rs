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

use std::io::{self, Write};

use crate::opcode::EncodedOpcode;

/// Write the Zig source: `bytes`, mapping each `Inst` to its encoding,
/// followed by the `Inst` enum itself.
pub fn render<W: Write>(out: &mut W, opcodes: &[EncodedOpcode])
    -> io::Result<()> {

    render_bytes_fn(out, opcodes)?;
    writeln!(out)?;
    render_enum(out, opcodes)
}

pub fn render_bytes_fn<W: Write>(out: &mut W, opcodes: &[EncodedOpcode])
    -> io::Result<()> {

    writeln!(out, "pub fn bytes(inst: Inst) []const u8 {{")?;
    writeln!(out, "\treturn switch (inst) {{")?;
    for op in opcodes {
        writeln!(out, "\t\t.{} => &.{{{}}},", op.name, byte_list(&op.bytes))?;
    }
    writeln!(out, "\t}};")?;
    writeln!(out, "}}")
}

pub fn render_enum<W: Write>(out: &mut W, opcodes: &[EncodedOpcode])
    -> io::Result<()> {

    writeln!(out, "pub const Inst = enum {{")?;
    for op in opcodes {
        writeln!(out, "\t{},", op.name)?;
    }
    writeln!(out, "}};")
}

fn byte_list(bytes: &[u8]) -> String {
    bytes.iter()
         .map(|b| b.to_string())
         .collect::<Vec<String>>()
         .join(", ")
}
