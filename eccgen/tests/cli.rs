mod common;

use {
    common::*,
    std::{
        fs,
        path::Path,
        process::{Command, Output},
    },
    tempfile::TempDir,
};

fn run(dir: &Path, widths: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eccgen-dslx"))
        .arg("--matrix-dir")
        .arg(dir)
        .arg("--encoder-template")
        .arg(dir.join("enc.x.jinja2"))
        .arg("--encoder-output")
        .arg(dir.join("enc.x"))
        .arg("--decoder-template")
        .arg(dir.join("dec.x.jinja2"))
        .arg("--decoder-output")
        .arg(dir.join("dec.x"))
        .arg("--widths")
        .arg(widths)
        .arg("-q")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_hamming_7_4(dir.path());
    write_repetition_3_1(dir.path());
    write_templates(dir.path());
    dir
}

#[test]
fn test_successful_run_exits_zero() {
    let dir = fixture();
    let output = run(dir.path(), "1,4");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let encoder = fs::read_to_string(dir.path().join("enc.x")).unwrap();
    assert!(encoder.contains("let parity_0 = m[0+:u1];"), "{encoder}");
    assert!(dir.path().join("dec.x").is_file());
}

#[test]
fn test_missing_width_exits_nonzero() {
    let dir = fixture();
    let output = run(dir.path(), "4,32");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "{stderr}");
    assert!(stderr.contains("hsiao_G_k32.txt"), "{stderr}");
    assert!(!dir.path().join("enc.x").exists());
    assert!(!dir.path().join("dec.x").exists());
}

#[test]
fn test_bad_template_extension_exits_nonzero() {
    let dir = fixture();
    fs::rename(dir.path().join("dec.x.jinja2"), dir.path().join("dec.jinja2")).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_eccgen-dslx"))
        .arg("--matrix-dir")
        .arg(dir.path())
        .arg("--encoder-template")
        .arg(dir.path().join("enc.x.jinja2"))
        .arg("--encoder-output")
        .arg(dir.path().join("enc.x"))
        .arg("--decoder-template")
        .arg(dir.path().join("dec.jinja2"))
        .arg("--decoder-output")
        .arg(dir.path().join("dec.x"))
        .arg("--widths=1")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".x.jinja2"), "{stderr}");
}
