//! Apply specs
//!
//! Verify stores rotate the previous configuration into `current/`.

use crate::prelude::*;

#[test]
fn apply_reports_written_file_and_backup() {
    let temp = Project::with_main("old\n");
    temp.file("input.txt", "new\n");
    let root = temp.path().display();

    temp.ck()
        .args(&["apply", temp.path().join("input.txt").to_str().unwrap()])
        .passes()
        .stdout_eq(&format!(
            "Wrote {root}/standalone.xml\n\
             Previous version saved as {root}/standalone_xml_history/current/standalone.v1.xml\n"
        ));
}

#[test]
fn apply_from_stdin() {
    let temp = Project::with_main("old\n");

    temp.ck().args(&["apply", "-"]).stdin("from stdin\n").passes();

    assert_eq!(temp.read("standalone.xml"), "from stdin\n");
    assert_eq!(temp.read("standalone_xml_history/standalone.last.xml"), "from stdin\n");
}

#[test]
fn history_lists_current_versions() {
    let temp = Project::with_main("old\n");
    temp.ck().args(&["apply", "-"]).stdin("new\n").passes();

    temp.ck().args(&["history"]).passes().stdout_eq(&format!(
        "v1      {}/standalone_xml_history/current/standalone.v1.xml\n",
        temp.path().display()
    ));
}

#[test]
fn history_empty_before_any_store() {
    let temp = Project::with_main("x\n");

    temp.ck().args(&["history"]).passes().stdout_eq("No versions\n");
    temp.ck()
        .args(&["history", "--archives"])
        .passes()
        .stdout_eq("No archived history\n");
}

#[test]
fn next_boot_archives_current_versions() {
    let temp = Project::with_main("0\n");
    temp.ck().args(&["apply", "-"]).stdin("1\n").passes();
    temp.ck().args(&["apply", "-"]).stdin("2\n").passes();

    // the second run archived the first run's v1 and wrote a fresh v1
    assert_eq!(temp.read("standalone_xml_history/current/standalone.v1.xml"), "1\n");
    assert_eq!(temp.list("standalone_xml_history/current"), ["standalone.v1.xml"]);

    let archives = temp.ck().args(&["history", "--archives"]).passes().stdout();
    assert_eq!(archives.lines().count(), 1);
}

#[test]
fn read_only_apply_writes_history_only() {
    let temp = Project::with_main("original\n");

    temp.ck()
        .args(&["--read-only", "apply", "-"])
        .stdin("changed\n")
        .passes()
        .stdout_has("standalone.last.xml");

    assert_eq!(temp.read("standalone.xml"), "original\n");
    assert_eq!(temp.read("standalone_xml_history/standalone.last.xml"), "changed\n");
    assert_eq!(
        temp.read("standalone_xml_history/current/standalone.v1.xml"),
        "original\n"
    );
}

#[test]
fn zero_history_length_keeps_no_versions() {
    let temp = Project::with_main("old\n");

    temp.ck()
        .env("CK_CURRENT_HISTORY_LENGTH", "0")
        .args(&["apply", "-"])
        .stdin("new\n")
        .passes()
        .stdout_eq(&format!("Wrote {}/standalone.xml\n", temp.path().display()));

    temp.ck().args(&["history"]).passes().stdout_eq("No versions\n");
}

#[test]
fn apply_other_file_name() {
    let temp = Project::empty();
    temp.file("app.conf", "a\n");

    temp.ck()
        .args(&["--file", "app.conf", "apply", "-"])
        .stdin("b\n")
        .passes();

    assert_eq!(temp.read("app.conf"), "b\n");
    assert_eq!(temp.read("app_conf_history/current/app.v1.conf"), "a\n");
}
