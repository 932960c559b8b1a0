//! Snapshot lifecycle specs
//!
//! Verify taking, listing, deleting and booting from snapshots.

use crate::prelude::*;

const SNAPSHOTS: &str = "standalone_xml_history/snapshot";

#[test]
fn list_empty() {
    let temp = Project::with_main("x\n");

    temp.ck()
        .args(&["snapshot", "list"])
        .passes()
        .stdout_eq("No snapshots\n");
}

#[test]
fn take_then_list() {
    let temp = Project::with_main("x\n");

    temp.ck()
        .args(&["snapshot", "take"])
        .passes()
        .stdout_has("Took snapshot ");
    let names = temp.list(SNAPSHOTS);
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("standalone.xml"));

    temp.ck().args(&["snapshot", "list"]).passes().stdout_eq(&format!(
        "{}/{}\n  {}\n",
        temp.path().display(),
        SNAPSHOTS,
        names[0]
    ));
}

#[test]
fn list_as_json() {
    let temp = Project::with_main("x\n");
    temp.ck().args(&["snapshot", "take"]).passes();

    temp.ck()
        .args(&["--format", "json", "snapshot", "list"])
        .passes()
        .stdout_has("\"directory\"")
        .stdout_has("\"names\"");
}

#[test]
fn delete_all() {
    let temp = Project::with_main("x\n");
    temp.ck().args(&["snapshot", "take"]).passes();
    std::thread::sleep(std::time::Duration::from_millis(5));
    temp.ck().args(&["snapshot", "take"]).passes();
    assert_eq!(temp.list(SNAPSHOTS).len(), 2);

    temp.ck()
        .args(&["snapshot", "delete", "all"])
        .passes()
        .stdout_eq("Deleted all\n");

    assert!(temp.list(SNAPSHOTS).is_empty());
}

#[test]
fn ambiguous_prefix_is_rejected() {
    let temp = Project::with_main("x\n");
    temp.ck().args(&["snapshot", "take"]).passes();
    std::thread::sleep(std::time::Duration::from_millis(5));
    temp.ck().args(&["snapshot", "take"]).passes();

    temp.ck()
        .args(&["snapshot", "delete", "2"])
        .fails()
        .stderr_has("ambiguous name 2")
        .stderr_has("Use a longer prefix");

    assert_eq!(temp.list(SNAPSHOTS).len(), 2);
}

#[test]
fn boot_from_snapshot_prefix() {
    let temp = Project::with_main("good\n");
    temp.ck().args(&["snapshot", "take"]).passes();
    let name = temp.list(SNAPSHOTS).remove(0);
    temp.file("standalone.xml", "bad\n");

    temp.ck()
        .args(&["--boot", &name[..18], "boot"])
        .passes()
        .stdout_has(&name);

    assert_eq!(temp.read("standalone.xml"), "good\n");
}
