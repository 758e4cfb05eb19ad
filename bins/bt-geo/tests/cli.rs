use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const HANOI_HEX: &str = "0101000020E61000009E996038D7755A40FE4465C39A063540";

fn bt_geo() -> Command {
    let mut cmd = Command::cargo_bin("bt-geo").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("BT_GEO_CONFIG");
    cmd
}

#[test]
fn encode_prints_wkb_hex() {
    bt_geo()
        .args(["encode", "21.0285", "105.8542"])
        .assert()
        .success()
        .stdout("0101000020E6100000910F7A36AB765A409EEFA7C64B073540\n");
}

#[test]
fn encode_accepts_negative_latitude() {
    bt_geo()
        .args(["encode", "-6.2088", "106.8456"])
        .assert()
        .success()
        .stdout("0101000020E6100000D95F764F1EB65A40849ECDAACFD518C0\n");
}

#[test]
fn config_cannot_change_srid() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[codec]\nsrid = 3857").unwrap();

    bt_geo()
        .arg("--config")
        .arg(file.path())
        .args(["encode", "21.0285", "105.8542"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn decode_hex_as_json() {
    bt_geo()
        .args(["decode", HANOI_HEX, "--json"])
        .assert()
        .success()
        .stdout(r#"{"latitude":21.025799,"longitude":105.841261}"#.to_string() + "\n");
}

#[test]
fn decode_unrecognized_falls_back_to_origin() {
    bt_geo()
        .args(["decode", "nowhere"])
        .assert()
        .success()
        .stdout("Latitude: 0\nLongitude: 0\n")
        .stderr(predicate::str::contains("Failed to decode location"));
}

#[test]
fn decode_missing_logs_warning() {
    bt_geo()
        .args(["decode", "null"])
        .assert()
        .success()
        .stdout("Latitude: 0\nLongitude: 0\n")
        .stderr(predicate::str::contains("WARN").and(predicate::str::contains("Location missing")));
}

#[test]
fn decode_out_of_range_logs_error_with_values() {
    let hex = "0101000020E610000000000000000069400000000000002440";

    bt_geo()
        .args(["decode", hex])
        .assert()
        .success()
        .stdout("Latitude: 0\nLongitude: 0\n")
        .stderr(
            predicate::str::contains("ERROR")
                .and(predicate::str::contains(hex))
                .and(predicate::str::contains("longitude=200")),
        );
}

#[test]
fn decode_strict_fails() {
    bt_geo()
        .args(["decode", "nowhere", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized location format"));
}

#[test]
fn decode_missing_input() {
    bt_geo()
        .args(["decode", "null", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Location is missing"));
}

#[test]
fn distance_between_formats() {
    bt_geo()
        .args([
            "distance",
            "POINT(105.85 21.0)",
            r#"{"latitude": 21.0, "longitude": 105.86}"#,
            "--meters",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1038."));
}

#[test]
fn endpoints_of_route() {
    bt_geo()
        .args([
            "endpoints",
            "SRID=4326;LINESTRING(105.80 21.00, 105.82 21.02, 105.85 21.03)",
        ])
        .assert()
        .success()
        .stdout("Start: 21 105.8\nEnd: 21.03 105.85\n");
}

#[test]
fn invalid_config_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nshow_target = \"yes\"").unwrap();

    bt_geo()
        .arg("--config")
        .arg(file.path())
        .args(["encode", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
