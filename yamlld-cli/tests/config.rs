use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::tempdir;

#[test]
fn convert_respects_pretty_json_from_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.yamlld");
    fs::write(&input, "a: [1, 2]\n").unwrap();

    let config_path = dir.path().join("custom.toml");
    fs::write(&config_path, "[convert]\npretty_json = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("yamlld");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input.as_os_str())
        .arg("--to")
        .arg("jsonld")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert().success().stdout("{\"a\":[1,2]}\n");
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.yamlld");
    fs::write(&input, "a: &x 1\nb: *x\n").unwrap();
    fs::write(
        dir.path().join("yamlld.toml"),
        "[representation]\nprofile = \"extended\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("yamlld");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg("doc.yamlld")
        .arg("--to")
        .arg("jsonld");

    cmd.assert()
        .success()
        .stdout("{\n  \"a\": 1,\n  \"b\": 1\n}\n");
}

#[test]
fn profile_flag_overrides_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.yamlld");
    fs::write(&input, "a: &x 1\nb: *x\n").unwrap();
    fs::write(
        dir.path().join("yamlld.toml"),
        "[representation]\nprofile = \"extended\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("yamlld");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg("doc.yamlld")
        .arg("--to")
        .arg("jsonld")
        .arg("--profile")
        .arg("json");

    cmd.assert().failure().code(1);
}

#[test]
fn dump_version_from_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.jsonld");
    fs::write(&input, "{\"a\": 1}").unwrap();
    let config_path = dir.path().join("custom.toml");
    fs::write(&config_path, "[dump]\nversion = \"1.1\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("yamlld");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input.as_os_str())
        .arg("--to")
        .arg("yamlld")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert().success().stdout("%YAML 1.1\n---\na: 1\n");
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.yamlld");
    fs::write(&input, "a: 1\n").unwrap();

    let mut cmd = cargo_bin_cmd!("yamlld");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input.as_os_str())
        .arg("--to")
        .arg("jsonld")
        .arg("--config")
        .arg("nope.toml");

    cmd.assert().failure().code(1);
}
