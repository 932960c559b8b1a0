//! CLI error specs
//!
//! Verify failures print `error:` with suggestions and exit 1.

use crate::prelude::*;

#[test]
fn missing_directory_suggests_dir_flag() {
    let temp = Project::empty();
    let absent = temp.path().join("absent");

    cli()
        .args(&["--dir", absent.to_str().unwrap(), "resolve"])
        .fails()
        .code(1)
        .stderr_eq(&format!(
            "error: configuration directory {} does not exist\n\nsuggestions:\n  1. Pass an existing configuration directory with --dir\n",
            absent.display()
        ));
}

#[test]
fn unknown_boot_name_fails() {
    let temp = Project::with_main("x\n");

    temp.ck()
        .args(&["--boot", "other.xml", "resolve"])
        .fails()
        .code(1)
        .stderr_has("error: main configuration file other.xml not found")
        .stderr_has("Check the name passed to --file or --boot");
}

#[test]
fn absolute_boot_name_requires_read_only() {
    let temp = Project::with_main("x\n");
    temp.file("elsewhere/standalone.xml", "y\n");
    let outside = temp.path().join("elsewhere/standalone.xml");

    temp.ck()
        .args(&["--boot", outside.to_str().unwrap(), "resolve"])
        .fails()
        .stderr_has("Absolute paths are only accepted with --read-only");

    temp.ck()
        .args(&["--read-only", "--boot", outside.to_str().unwrap(), "resolve"])
        .passes()
        .stdout_has(&format!("boot:      {}", outside.display()));
}

#[test]
fn marker_before_first_boot_suggests_booting() {
    let temp = Project::with_main("x\n");

    temp.ck()
        .args(&["--boot", "last", "resolve"])
        .fails()
        .stderr_has("no configuration file ending in .last.xml")
        .stderr_has("ck boot");
}

#[test]
fn unreadable_input_names_the_file() {
    let temp = Project::with_main("x\n");

    temp.ck()
        .args(&["apply", "missing-input.txt"])
        .fails()
        .code(1)
        .stderr_has("error: could not read missing-input.txt: ")
        .stderr_has("or - to read the configuration from stdin");

    assert_eq!(temp.read("standalone.xml"), "x\n");
}

#[test]
fn invalid_settings_file_fails() {
    let temp = Project::with_main("x\n");
    temp.file("ck.toml", "[history]\nbogus = 1\n");
    let settings = temp.path().join("ck.toml");

    temp.ck()
        .args(&["--config", settings.to_str().unwrap(), "resolve"])
        .fails()
        .stderr_has("error: invalid settings in")
        .stderr_has("-> Settings are read from a [history] table")
        .stderr_has("run without --config");
}

#[test]
fn unknown_command_is_a_usage_error() {
    cli().args(&["frobnicate"]).fails().code(2);
}
