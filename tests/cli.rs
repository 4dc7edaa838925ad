use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("doc-redirect-audit").unwrap();
    for var in [
        "HTTP_PROXY",
        "HTTPS_PROXY",
        "ALL_PROXY",
        "http_proxy",
        "https_proxy",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

// Answers each connection with a redirect chosen by request path.
fn spawn_redirector() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            let location = match request.split_whitespace().nth(1) {
                Some("/wrong") => "https://www.treasuredata.com/",
                _ => "https://docs.treasuredata.com/ok",
            };
            let response = format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                location
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}

#[test]
fn path_is_required() {
    cmd().assert().failure().stderr(contains("--path"));
}

#[test]
fn report_modes_conflict() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg("-p")
        .arg(dir.path())
        .args(["--redirects", "--categories"])
        .assert()
        .failure();
}

#[test]
fn empty_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .arg("-p")
        .arg(dir.path())
        .assert()
        .code(2);
    assert!(!out.path().join("info.csv").exists());
}

#[test]
fn directory_without_loadable_catalogs_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.yml"), "- not a catalog\n").unwrap();
    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .arg("-p")
        .arg(dir.path())
        .assert()
        .code(2);
    assert!(!out.path().join("info.csv").exists());
}

#[test]
fn missing_directory_is_fatal() {
    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .args(["-p", "does-not-exist"])
        .assert()
        .code(2);
}

#[test]
fn category_report() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.yml"),
        "name: Alpha\ncategories:\n  - One\n  - Two\n",
    )
    .unwrap();
    fs::write(dir.path().join("b.yml"), "name: Beta\n").unwrap();
    fs::write(dir.path().join("c.yml"), "- not a catalog\n").unwrap();

    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .arg("-p")
        .arg(dir.path())
        .args(["--categories", "--csv", "cats"])
        .assert()
        .success()
        .stdout(contains("2 catalog(s)"));

    let mut reader = csv::Reader::from_path(out.path().join("cats.csv")).unwrap();
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["Alpha".to_string(), "One\nTwo".to_string()],
            vec!["Beta".to_string(), String::new()],
        ]
    );
}

#[test]
fn redirect_report_flags_wrong_links() {
    let redirector = spawn_redirector();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("fileA.yml"), "docs_path: /a\n").unwrap();
    fs::write(
        dir.path().join("fileB.yml"),
        "docs_path: /b\ndocumentation_links:\n  import: /b\n  export: /wrong\n",
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .arg("-p")
        .arg(dir.path())
        .args(["--redirector", &redirector, "--timeout-secs", "10"])
        .assert()
        .code(1)
        .stdout(contains("3 checked"));

    let mut reader = csv::Reader::from_path(out.path().join("info.csv")).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["Catalog", "Doc path", "Redirect", "Wrong/Default"]
    );

    let mut rows: Vec<(String, String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string(), r[3].to_string())
        })
        .collect();
    rows.sort();

    assert_eq!(
        rows,
        vec![
            ("fileA.yml".to_string(), "/a".to_string(), "no".to_string()),
            ("fileB.yml".to_string(), "/b".to_string(), "no".to_string()),
            ("fileB.yml".to_string(), "/wrong".to_string(), "yes".to_string()),
        ]
    );
}

#[test]
fn clean_redirect_report_exits_zero() {
    let redirector = spawn_redirector();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("only.yml"), "docs_path: /fine\n").unwrap();

    let out = TempDir::new().unwrap();
    cmd()
        .current_dir(out.path())
        .arg("-p")
        .arg(dir.path())
        .args(["--redirector", &redirector, "--log-format", "json"])
        .assert()
        .success();

    assert!(out.path().join("info.csv").exists());
}
