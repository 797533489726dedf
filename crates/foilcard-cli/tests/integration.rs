//! Integration tests for foilcard-cli.
//!
//! These run the built `foilcard` binary end to end.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `foilcard` binary built by cargo.
fn foilcard_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_foilcard"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run foilcard");
    assert!(
        output.status.success(),
        "foilcard failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_effects_lists_all_effects() {
    let stdout = stdout_of(foilcard_bin().arg("effects"));

    assert!(stdout.contains("Available Effects"));
    for effect in [
        "holographic",
        "foilspray",
        "prizm",
        "interference",
        "chrome",
        "brushedmetal",
        "gold",
        "crystal",
        "vintage",
    ] {
        assert!(stdout.contains(effect), "effects listing should contain '{effect}'");
    }
}

#[test]
fn cli_effect_details_show_clamp() {
    let stdout = stdout_of(foilcard_bin().args(["effects", "gold"]));
    assert!(stdout.contains("goldTone"));
    assert!(stdout.contains("rich / rose / white / antique"));
    assert!(stdout.contains("85 -> 98"));
}

#[test]
fn cli_unknown_effect_fails() {
    let output = foilcard_bin().args(["effects", "sparkles"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_presets_list_has_factory_presets() {
    let stdout = stdout_of(foilcard_bin().args(["presets", "list"]));
    assert!(stdout.contains("gold-rush"));
    assert!(stdout.contains("[factory]"));
}

/// A user file that reuses a factory id is listed as a user preset.
#[cfg(target_os = "linux")]
#[test]
fn cli_presets_list_labels_user_override() {
    let config_home = TempDir::new().unwrap();
    let presets_dir = config_home.path().join("foilcard").join("presets");
    fs::create_dir_all(&presets_dir).unwrap();
    fs::write(
        presets_dir.join("gold-rush.toml"),
        "id = \"gold-rush\"\nname = \"My Gold\"\n[effects.gold]\nintensity = 40\n",
    )
    .unwrap();

    let stdout = stdout_of(
        foilcard_bin()
            .env("XDG_CONFIG_HOME", config_home.path())
            .args(["presets", "list"]),
    );
    let line_for = |id: &str| {
        stdout
            .lines()
            .find(|l| l.trim_start().starts_with(id))
            .unwrap_or_else(|| panic!("{id} missing from:\n{stdout}"))
            .to_string()
    };

    let gold = line_for("gold-rush");
    assert!(gold.contains("My Gold") && gold.contains("[user]"), "{gold}");
    assert!(line_for("rainbow-holo").contains("[factory]"));
}

#[test]
fn cli_presets_show() {
    let stdout = stdout_of(foilcard_bin().args(["presets", "show", "gold-rush"]));
    assert!(stdout.contains("gold.intensity = 80"));
    assert!(stdout.contains("gold.goldTone = rich"));
}

#[test]
fn cli_presets_validate_reports_bad_files() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.toml");
    let bad = temp_dir.path().join("bad.toml");
    fs::write(&good, "id = \"good\"\nname = \"Good\"\n[effects.chrome]\nintensity = 50\n").unwrap();
    fs::write(&bad, "id = \"bad\"\nname = \"Bad\"\n[effects.gold]\ngoldTone = \"green\"\n").unwrap();

    let ok = foilcard_bin()
        .args(["presets", "validate"])
        .arg(&good)
        .output()
        .unwrap();
    assert!(ok.status.success());

    let output = foilcard_bin()
        .args(["presets", "validate"])
        .arg(&good)
        .arg(&bad)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid"));
    assert!(stdout.contains("green"));
}

#[test]
fn cli_clamp_damps_above_soft() {
    let stdout = stdout_of(foilcard_bin().args(["clamp", "holographic", "intensity", "60"]));
    assert!(stdout.contains("60 -> 60"));

    let stdout = stdout_of(foilcard_bin().args(["clamp", "gold", "shimmerSpeed", "150"]));
    assert!(stdout.contains("no clamp rule"));
}

#[test]
fn cli_geometry_json() {
    let stdout = stdout_of(foilcard_bin().args(["geometry", "--y", "75", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["front"], 0.5);
    assert_eq!(json["visible_face"], "front");
}

#[test]
fn cli_geometry_negative_angle() {
    let stdout = stdout_of(foilcard_bin().args(["geometry", "--y", "-90"]));
    assert!(stdout.contains("y=270.0"));
}

#[test]
fn cli_apply_gold_rush() {
    let stdout = stdout_of(foilcard_bin().args(["apply", "gold-rush"]));
    assert!(stdout.contains("gold.intensity = 80"));
    assert!(stdout.contains("Dominant effect: gold"));
}

#[test]
fn cli_apply_with_edits_json() {
    let stdout = stdout_of(foilcard_bin().args([
        "apply",
        "gold-rush",
        "--set",
        "chrome.intensity=84",
        "--set",
        "gold.goldTone=rose",
        "--json",
    ]));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(json["values"]["gold"]["goldTone"], "rose");
    assert_eq!(json["values"]["chrome"]["intensity"], 84.0);
    assert_eq!(json["dominant"]["effect_id"], "chrome");
    assert_eq!(json["phase"], "idle");
}

#[test]
fn cli_apply_preset_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mine.toml");
    fs::write(&path, "id = \"mine\"\nname = \"Mine\"\n[effects.crystal]\nintensity = 60\n").unwrap();

    let stdout = stdout_of(foilcard_bin().arg("apply").arg(&path));
    assert!(stdout.contains("Preset: Mine (mine)"));
    assert!(stdout.contains("crystal.intensity = 60"));
}

#[test]
fn cli_apply_unknown_preset_fails() {
    let output = foilcard_bin().args(["apply", "no-such-preset-xyz"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Preset not found"));
}
