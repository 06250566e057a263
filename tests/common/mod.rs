#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::process::{Child, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");
        Self {
            _tmp: tmp,
            home,
            work,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("po-harvest");
        cmd.env("HOME", &self.home)
            .env_remove("PO_HARVEST_CSRF_TOKEN")
            .env_remove("PO_HARVEST_SESSION_ID")
            .env("PO_HARVEST_LOG", "off");
        cmd
    }

    /// Starts the binary without waiting, stdout piped, for tests that signal it.
    pub fn spawn(&self, args: &[&str]) -> Child {
        std::process::Command::new(env!("CARGO_BIN_EXE_po-harvest"))
            .env("HOME", &self.home)
            .env_remove("PO_HARVEST_CSRF_TOKEN")
            .env_remove("PO_HARVEST_SESSION_ID")
            .env("PO_HARVEST_LOG", "off")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn po-harvest")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    /// Points the default settings file at `base_url` with pacing disabled.
    pub fn write_settings(&self, base_url: &str) {
        let path = self.home.join(".config/po-harvest/config.toml");
        fs::create_dir_all(path.parent().expect("settings parent")).expect("create settings dir");
        fs::write(
            path,
            format!(
                "[portal]\nbase_url = \"{}\"\ntimeout_ms = 5000\n\n[ingest]\ndelay_ms = 0\n",
                base_url
            ),
        )
        .expect("write settings");
    }

    /// Empty strings in `ids` leave the id cell blank.
    pub fn write_input(&self, name: &str, header: &str, ids: &[&str]) -> PathBuf {
        let path = self.work.join(name);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Supplier").expect("write header");
        sheet.write_string(0, 1, header).expect("write header");
        for (i, id) in ids.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, "PT Contoh").expect("write cell");
            if !id.is_empty() {
                sheet.write_string(row, 1, *id).expect("write cell");
            }
        }
        workbook.save(&path).expect("save input workbook");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.work.join(name)
    }
}

pub fn line_item(dc: &str, date: &str, product: &str, qty: f64) -> Value {
    let mut fields = vec![json!(""); 22];
    fields[0] = json!(dc);
    fields[6] = json!(date);
    fields[18] = json!(product);
    fields[19] = json!(qty);
    Value::Array(fields)
}

pub fn ok_payload(groups: &[(&str, Vec<Value>)]) -> (u16, String) {
    let mut data = serde_json::Map::new();
    for (dc, items) in groups {
        data.insert(dc.to_string(), Value::Array(items.clone()));
    }
    (200, json!({ "data": data }).to_string())
}

pub struct PortalFixture {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl PortalFixture {
    /// Raw request heads received so far, lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// Serves `detailpo` lookups keyed by the `d` query parameter; unknown ids get a 404.
pub fn spawn_portal(responses: Vec<(&str, (u16, String))>) -> PortalFixture {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture portal");
    let addr = listener.local_addr().expect("fixture addr");
    let responses: HashMap<String, (u16, String)> = responses
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else {
                continue;
            };
            let head = read_request_head(&mut stream);
            let doc = document_param(&head).unwrap_or_default();
            seen.lock().expect("requests lock").push(head.to_ascii_lowercase());

            let (status, body) = responses
                .get(&doc)
                .cloned()
                .unwrap_or((404, "not found".to_string()));
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    PortalFixture {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn read_request_head(stream: &mut TcpStream) -> String {
    let mut buf = [0u8; 1024];
    let mut req = Vec::new();
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                req.extend_from_slice(&buf[..n]);
                if req.windows(4).any(|w| w == b"\r\n\r\n") || req.len() > 16 * 1024 {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&req).to_string()
}

fn document_param(head: &str) -> Option<String> {
    let target = head.lines().next()?.split_whitespace().nth(1)?;
    let query = target.split_once('?')?.1;
    query
        .split('&')
        .find_map(|kv| kv.strip_prefix("d="))
        .map(str::to_string)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
