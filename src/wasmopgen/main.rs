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

use clap::{Arg, App};
use log::*;
use simplelog::{LevelFilter, TermLogger, TerminalMode};
use std::ffi::OsString;
use wasmop::config::{GenConfig, Overrides};
use wasmop::pipeline::generate;

struct Args {
    config: Option<String>,
    overrides: Overrides,
    level: LevelFilter,
}

fn read_args<I, T>(argv: I) -> Args
    where I: IntoIterator<Item = T>, T: Into<OsString> + Clone {

    let matches = App::new("wasmopgen")
                          .about("Generates Zig opcode tables from WABT's opcode.def")
                          .arg(Arg::with_name("CONFIG")
                               .short("c")
                               .long("config")
                               .help("Config file to use")
                               .takes_value(true)
                               .required(false))
                          .arg(Arg::with_name("URL")
                               .short("u")
                               .long("url")
                               .help("URL of opcode.def")
                               .takes_value(true)
                               .env("WASMOPGEN_URL")
                               .required(false))
                          .arg(Arg::with_name("INPUT")
                               .short("i")
                               .long("input")
                               .help("Read opcode.def from a local file")
                               .takes_value(true)
                               .required(false))
                          .arg(Arg::with_name("OUTPUT")
                               .short("o")
                               .long("output")
                               .help("Output file, - for stdout")
                               .takes_value(true)
                               .env("WASMOPGEN_OUTPUT")
                               .required(false))
                          .arg(Arg::with_name("VERBOSE")
                               .short("v")
                               .multiple(true)
                               .takes_value(false)
                               .help("More logging"))
                          .get_matches_from(argv);

    let level = match matches.occurrences_of("VERBOSE") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let value = |name: &str| matches.value_of(name).map(String::from);
    Args {
        config: value("CONFIG"),
        overrides: Overrides { source_url: value("URL"),
                               input: value("INPUT"),
                               output: value("OUTPUT") },
        level,
    }
}

fn main() {
    let args = read_args(std::env::args_os());

    if let Err(e) = TermLogger::init(args.level,
                                     simplelog::Config::default(),
                                     TerminalMode::Stderr) {
        eprintln!("Failed to start logger: {:?}", e);
    }

    let result = GenConfig::read_config(args.config.as_deref(),
                                        &args.overrides)
                           .and_then(|conf| generate(&conf));

    std::process::exit(match result {
        Ok(summary) => {
            info!("{} records parsed, {} excluded, {} written",
                  summary.parsed, summary.excluded, summary.written);
            0
        },
        Err(err) => {
            error!("{}", err);
            1
        }
    });
}
