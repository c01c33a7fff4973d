//! Common test utilities for compsync integration tests

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use assert_cmd::Command;
use tempfile::TempDir;

/// Installer that cannot be spawned; any subprocess attempt fails loudly
pub const MISSING_INSTALLER: &str = "compsync-test-no-such-installer";

/// Registry URL nothing listens on
pub const DEAD_REGISTRY: &str = "http://127.0.0.1:9";

/// A temporary project directory
#[allow(dead_code)]
pub struct TestProject {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    /// Create a project whose installer is [`MISSING_INSTALLER`]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let project = Self { temp, path };
        project.write_file(
            "compsync.yaml",
            &format!("installer: [{MISSING_INSTALLER}, add]\n"),
        );
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// compsync command rooted at this project
    pub fn cmd(&self, registry_url: &str) -> Command {
        let mut cmd = compsync_cmd();
        cmd.arg("-C")
            .arg(&self.path)
            .env("COMPSYNC_REGISTRY_URL", registry_url);
        cmd
    }
}

#[allow(deprecated)]
pub fn compsync_cmd() -> Command {
    let mut cmd = Command::cargo_bin("compsync").expect("Failed to find compsync binary");
    cmd.env_remove("COMPSYNC_PROJECT_DIR")
        .env_remove("COMPSYNC_REGISTRY_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Minimal HTTP server answering GETs from a fixed path table
pub struct RegistryStub {
    pub url: String,
}

impl RegistryStub {
    /// Serve `routes` (path → JSON body); everything else is a 404
    pub fn serve(routes: &[(&str, &str)]) -> Self {
        let routes: HashMap<String, String> = routes
            .iter()
            .map(|(path, body)| ((*path).to_string(), (*body).to_string()))
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind registry stub");
        let url = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read stub address")
        );

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let mut reader = BufReader::new(&stream);
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                // Drain headers
                let mut line = String::new();
                while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
                    line.clear();
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = match routes.get(path) {
                    Some(body) => ("200 OK", body.as_str()),
                    None => ("404 Not Found", "{}"),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = (&stream).write_all(response.as_bytes());
            }
        });

        Self { url }
    }
}

/// Manifest JSON listing `names`
pub fn manifest(names: &[&str]) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"name":"{n}","type":"registry:ui"}}"#))
        .collect();
    format!(r#"{{"name":"test","items":[{}]}}"#, items.join(","))
}
