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
use std::fs;
use std::io::{self, Write};

use crate::config::{GenConfig, Output};
use crate::error::Result;
use crate::fetch::fetch_table;
use crate::opcode::{self, EncodedOpcode};
use crate::render::render;
use crate::table::{parse_table, OpcodeRecord};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Summary {
    pub parsed: usize,
    pub excluded: usize,
    pub written: usize,
}

/// Parse, encode and filter a table, returning the opcodes to render.
pub fn compile(text: &str, conf: &GenConfig) -> Result<Vec<EncodedOpcode>> {
    compile_records(&parse_table(text)?, conf)
}

pub fn compile_records(records: &[OpcodeRecord], conf: &GenConfig)
    -> Result<Vec<EncodedOpcode>> {

    let mut opcodes = opcode::encode_all(records)?;
    for ex in &conf.exclusions {
        opcode::remove_exclusion(&mut opcodes, &ex.name, &ex.bytes)?;
    }
    opcode::check_unique(&opcodes)?;
    Ok(opcodes)
}

/// Run the whole generator. Nothing is written unless every earlier step
/// succeeded; an existing output file is overwritten.
pub fn generate(conf: &GenConfig) -> Result<Summary> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    generate_with_stdout(conf, &mut lock)
}

/// `generate`, sending `Output::Stdout` to `stdout` instead of the
/// process's standard output.
pub fn generate_with_stdout<W: Write>(conf: &GenConfig, stdout: &mut W)
    -> Result<Summary> {

    let text = fetch_table(conf)?;
    let records = parse_table(&text)?;
    let opcodes = compile_records(&records, conf)?;

    let mut buf = Vec::new();
    render(&mut buf, &opcodes)?;

    match &conf.output {
        Output::Stdout => {
            stdout.write_all(&buf)?;
            stdout.flush()?;
        },
        Output::File(path) => {
            fs::write(path, &buf)?;
            info!("Wrote {} opcodes to {}", opcodes.len(), path.display());
        }
    }

    Ok(Summary { parsed: records.len(),
                 excluded: conf.exclusions.len(),
                 written: opcodes.len() })
}
