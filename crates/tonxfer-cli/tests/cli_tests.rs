//! CLI integration tests.
//!
//! The binary is invoked as a process. Nothing here needs network access;
//! the mnemonic is passed through the environment or a temporary file.

use std::io::Write;
use std::process::Command;

use tonxfer_cell::Cell;
use tonxfer_crypto::signing::{verify, PublicKey, Signature};

const GOLDEN_PHRASE: &str = "penalty undo fame place brand south lunar cage \
                             coconut girl lyrics ozone fence riot apology diagram \
                             nature manage there brief wet pole debris annual";

const GOLDEN_ADDRESS: &str = "0:95655f53a0f5e7475a5b32cf622b1ff3bcc1249d2ab2d97099441bf814d0cb38";

const GOLDEN_PUBKEY_HEX: &str =
    "444adf46838680e49a5a93a19d29ac9a0ef13f3dac5f3274232a0990a6755513";

const DESTINATION: &str = "0:20c429e3bb195f46a582c10eb687c6ed182ec58237a55787f245ec992c337118";

/// Helper to run the CLI binary with args and capture output.
/// Returns (exit_code, stdout, stderr).
fn run_cli(args: &[&str], mnemonic: Option<&str>) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tonxfer"));
    cmd.args(args).env_remove("TONXFER_MNEMONIC").env("RUST_LOG", "warn");
    if let Some(phrase) = mnemonic {
        cmd.env("TONXFER_MNEMONIC", phrase);
    }

    match cmd.output() {
        Ok(o) => {
            let code = o.status.code().unwrap_or(-1);
            let stdout = String::from_utf8_lossy(&o.stdout).to_string();
            let stderr = String::from_utf8_lossy(&o.stderr).to_string();
            (code, stdout, stderr)
        }
        Err(e) => panic!("could not run binary: {e}"),
    }
}

fn parse_json(text: &str) -> serde_json::Value {
    match serde_json::from_str(text.trim()) {
        Ok(v) => v,
        Err(e) => panic!("expected JSON, got {text:?}: {e}"),
    }
}

fn temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// -----------------------------------------------------------------------
// Clap parsing
// -----------------------------------------------------------------------

#[test]
fn help_flag_exits_zero() {
    let (code, stdout, _) = run_cli(&["--help"], None);
    assert_eq!(code, 0, "--help should exit 0");
    assert!(stdout.contains("sign"), "help should list subcommands");
}

#[test]
fn version_flag_exits_zero() {
    let (code, stdout, _) = run_cli(&["--version"], None);
    assert_eq!(code, 0);
    assert!(stdout.contains("tonxfer"));
}

#[test]
fn unknown_command_fails() {
    let (code, _, stderr) = run_cli(&["nonexistent"], None);
    assert_ne!(code, 0);
    assert!(!stderr.is_empty());
}

#[test]
fn sign_missing_args_fails() {
    let (code, _, stderr) = run_cli(&["sign", "--to", DESTINATION], Some(GOLDEN_PHRASE));
    assert_ne!(code, 0, "sign without --amount/--seqno should fail");
    assert!(!stderr.is_empty());
}

// -----------------------------------------------------------------------
// address
// -----------------------------------------------------------------------

#[test]
fn address_from_env() {
    let (code, stdout, _) = run_cli(&["--json", "address"], Some(GOLDEN_PHRASE));
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["address"], GOLDEN_ADDRESS);
    assert_eq!(v["public_key"], GOLDEN_PUBKEY_HEX);
}

#[test]
fn address_human_output() {
    let (code, stdout, _) = run_cli(&["address"], Some(GOLDEN_PHRASE));
    assert_eq!(code, 0);
    assert!(stdout.contains(GOLDEN_ADDRESS));
}

#[test]
fn address_from_mnemonic_file() {
    let file = temp_file(&format!("{GOLDEN_PHRASE}\n"));
    let path = file.path().to_string_lossy().to_string();
    let (code, stdout, _) = run_cli(&["--json", "--mnemonic-file", &path, "address"], None);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["address"], GOLDEN_ADDRESS);
}

#[test]
fn masterchain_config_changes_prefix() {
    let config = temp_file(r#"{ "workchain": -1 }"#);
    let path = config.path().to_string_lossy().to_string();
    let (code, stdout, _) = run_cli(&["--json", "--config", &path, "address"], Some(GOLDEN_PHRASE));
    assert_eq!(code, 0);
    let address = parse_json(&stdout)["address"].as_str().unwrap_or_default().to_owned();
    assert_eq!(address, GOLDEN_ADDRESS.replacen("0:", "-1:", 1));
}

#[test]
fn missing_mnemonic_is_json_error() {
    let (code, stdout, stderr) = run_cli(&["--json", "address"], None);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    let err = parse_json(&stderr);
    assert!(err["error"].as_str().unwrap_or_default().contains("TONXFER_MNEMONIC"));
}

#[test]
fn short_mnemonic_rejected() {
    let (code, _, stderr) = run_cli(&["address"], Some("penalty undo fame"));
    assert_eq!(code, 1);
    assert!(stderr.contains("key derivation failed"), "stderr: {stderr}");
}

#[test]
fn invalid_config_rejected() {
    let config = temp_file(r#"{ "message_ttl_secs": 0 }"#);
    let path = config.path().to_string_lossy().to_string();
    let (code, _, stderr) =
        run_cli(&["--json", "--config", &path, "address"], Some(GOLDEN_PHRASE));
    assert_eq!(code, 1);
    assert!(parse_json(&stderr)["error"]
        .as_str()
        .unwrap_or_default()
        .contains("message_ttl_secs"));
}

// -----------------------------------------------------------------------
// sign
// -----------------------------------------------------------------------

#[test]
fn sign_produces_verifiable_envelope() {
    let (code, stdout, stderr) = run_cli(
        &["--json", "sign", "--to", DESTINATION, "--amount", "0.25", "--seqno", "7"],
        Some(GOLDEN_PHRASE),
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let v = parse_json(&stdout);
    assert_eq!(v["from"], GOLDEN_ADDRESS);
    assert_eq!(v["to"], DESTINATION);
    assert_eq!(v["amount"], "0.25");
    assert_eq!(v["seqno"], "7");
    assert_eq!(v["content_hash"].as_str().map(str::len), Some(64));

    // Transport text decodes to [0, len, signature(64), message...].
    let text = v["transport_text"].as_str().unwrap_or_default();
    let decoded = Cell::from_transport_text(text).expect("transport text decodes");
    let envelope = &decoded.payload()[2..];
    let signature = Signature::try_from(&envelope[..64]).expect("64-byte signature");
    let pk: [u8; 32] = hex::decode(GOLDEN_PUBKEY_HEX)
        .expect("hex")
        .try_into()
        .expect("32 bytes");
    verify(&PublicKey::from_bytes(pk), &envelope[64..], &signature).expect("signature verifies");

    // Header: seqno 7 follows the message cell's [1 child, 13 bytes] prefix.
    assert_eq!(&envelope[64..70], &[0x01, 0x0d, 0, 0, 0, 7]);
}

#[test]
fn sign_with_comment_attaches_body() {
    let (code, stdout, _) = run_cli(
        &[
            "--json", "sign", "--to", DESTINATION, "--amount", "1", "--seqno", "0", "--comment",
            "AAED",
        ],
        Some(GOLDEN_PHRASE),
    );
    assert_eq!(code, 0);
    let text = parse_json(&stdout)["transport_text"].as_str().unwrap_or_default().to_owned();
    let decoded = Cell::from_transport_text(&text).expect("transport text decodes");
    assert!(decoded.payload().ends_with(&[0x00, 0x03, 0x00, 0x01, 0x03]));
}

#[test]
fn sign_rejects_bad_destination() {
    let (code, _, stderr) = run_cli(
        &["--json", "sign", "--to", "abc", "--amount", "1", "--seqno", "0"],
        Some(GOLDEN_PHRASE),
    );
    assert_eq!(code, 1);
    assert!(parse_json(&stderr)["error"]
        .as_str()
        .unwrap_or_default()
        .contains("malformed address"));
}

#[test]
fn sign_rejects_bad_amount() {
    let (code, _, stderr) = run_cli(
        &["sign", "--to", DESTINATION, "--amount", "0.0000000001", "--seqno", "0"],
        Some(GOLDEN_PHRASE),
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("--amount"), "stderr: {stderr}");
}

#[test]
fn sign_rejects_bad_comment() {
    let (code, _, stderr) = run_cli(
        &["--json", "sign", "--to", DESTINATION, "--amount", "1", "--seqno", "0", "--comment", "@@"],
        Some(GOLDEN_PHRASE),
    );
    assert_eq!(code, 1);
    assert!(parse_json(&stderr)["error"]
        .as_str()
        .unwrap_or_default()
        .contains("encoding failure"));
}

// -----------------------------------------------------------------------
// preview
// -----------------------------------------------------------------------

#[test]
fn preview_needs_no_mnemonic() {
    // "\0\0hello  world" in base64, padding stripped.
    let (code, stdout, _) = run_cli(&["--json", "preview", "AABoZWxsbyAgd29ybGQ"], None);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["preview"], "hello world");
}

#[test]
fn preview_with_marker() {
    let (code, stdout, _) = run_cli(
        &["--json", "preview", "AABoZWxsbyAgd29ybGQ", "--marker", "world"],
        None,
    );
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["preview"], "world");
}
