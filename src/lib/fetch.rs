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
use reqwest::blocking::Client;
use std::fs;
use std::time::Duration;

use crate::config::{GenConfig, TableSource};
use crate::error::{Error, Result};

/// Retrieve the opcode table text from wherever the config points.
pub fn fetch_table(conf: &GenConfig) -> Result<String> {
    match &conf.source {
        TableSource::Url(url) => fetch_url(url, &conf.user_agent,
                                           conf.timeout_secs),
        TableSource::File(path) => {
            info!("Reading {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
    }
}

/// One blocking GET. No timeout unless `timeout_secs` is set.
pub fn fetch_url(url: &str, user_agent: &str, timeout_secs: Option<u64>)
    -> Result<String> {

    info!("Fetching {}", url);
    let client = Client::builder().user_agent(user_agent)
                                  .timeout(timeout_secs.map(Duration::from_secs))
                                  .build()?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(Error::BadStatus { url: url.to_string(),
                                      status: response.status() });
    }
    let text = response.text()?;
    debug!("Fetched {} bytes", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::thread;

    /// Answer exactly one request with `status` and `body`, returning the
    /// URL to hit and a handle yielding the raw request.
    fn serve_once(status: &'static str, body: &'static str)
        -> (String, thread::JoinHandle<String>) {

        let listener = TcpListener::bind("127.0.0.1:0").expect("Bind failed.");
        let addr = listener.local_addr().expect("No local address");
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Accept failed.");
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).expect("Read failed.");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(stream, "HTTP/1.1 {}\r\n\
                            Content-Type: text/plain\r\n\
                            Content-Length: {}\r\n\
                            Connection: close\r\n\
                            \r\n\
                            {}", status, body.len(), body)
                .expect("Write failed.");
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/opcode.def", addr), handle)
    }

    #[test]
    fn reads_local_file() {
        let path = std::env::temp_dir()
            .join(format!("wasmop-fetch-{}.def", std::process::id()));
        fs::write(&path, "WABT_OPCODE(...)\n").expect("Write failed.");
        let conf = GenConfig { source: TableSource::File(path.clone()),
                               ..GenConfig::default() };
        let result = fetch_table(&conf);
        fs::remove_file(&path).ok();
        assert_eq!(result.expect("Read failed."), "WABT_OPCODE(...)\n");
    }

    #[test]
    fn missing_file() {
        let conf = GenConfig {
            source: TableSource::File(PathBuf::from("/nonexistent/opcode.def")),
            ..GenConfig::default()
        };
        match fetch_table(&conf) {
            Err(Error::Io(_)) => {},
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn bad_url() {
        match fetch_url("not a url", "wasmopgen", Some(1)) {
            Err(Error::Fetch(_)) => {},
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn fetches_body() {
        let (url, server) = serve_once("200 OK",
                                       "WABT_OPCODE(...)\nWABT_OPCODE(...)\n");
        let text = fetch_url(&url, "wasmopgen-test", Some(10))
            .expect("Fetch failed.");
        let request = server.join().expect("Server panicked");
        assert_eq!(text, "WABT_OPCODE(...)\nWABT_OPCODE(...)\n");
        assert!(request.starts_with("GET /opcode.def HTTP/1.1\r\n"));
        assert!(request.to_lowercase().contains("user-agent: wasmopgen-test\r\n"));
    }

    #[test]
    fn bad_status() {
        let (url, server) = serve_once("404 Not Found", "missing");
        let result = fetch_url(&url, "wasmopgen", Some(10));
        server.join().expect("Server panicked");
        match result {
            Err(Error::BadStatus { url: u, status }) => {
                assert_eq!(u, url);
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            },
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn fetch_table_uses_url_source() {
        let (url, server) = serve_once("200 OK", "table");
        let conf = GenConfig { source: TableSource::Url(url),
                               timeout_secs: Some(10),
                               ..GenConfig::default() };
        let result = fetch_table(&conf);
        server.join().expect("Server panicked");
        assert_eq!(result.expect("Fetch failed."), "table");
    }
}
