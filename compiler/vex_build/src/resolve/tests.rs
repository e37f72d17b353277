use super::*;
use pretty_assertions::assert_eq;
use std::ffi::OsString;
use std::fs;

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, "#!/bin/sh\n").unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn join_paths(dirs: &[&Path]) -> OsString {
    env::join_paths(dirs).unwrap()
}

#[test]
fn test_candidate_names_without_pathext() {
    assert_eq!(candidate_names("vcc", None), vec!["vcc"]);
}

#[test]
fn test_candidate_names_with_pathext() {
    let pathext = OsString::from(".COM;.EXE;");
    assert_eq!(
        candidate_names("vcc", Some(&pathext)),
        vec!["vcc", "vcc.COM", "vcc.EXE"]
    );
    assert_eq!(candidate_names("vcc.exe", Some(&pathext)), vec!["vcc.exe"]);
}

#[test]
fn test_empty_name_not_found() {
    assert!(matches!(
        search_executable("", None, None),
        Err(BuildError::ExecutableNotFound { .. })
    ));
}

#[test]
fn test_missing_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = join_paths(&[dir.path()]);
    let err = search_executable("vcc", Some(&path), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not find the `vcc` executable; put it on PATH or set VEX_VCC"
    );
}

#[cfg(unix)]
#[test]
fn test_searches_path_in_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    make_executable(&second.path().join("vcc"));
    make_executable(&first.path().join("vcc"));

    let path = join_paths(&[first.path(), second.path()]);
    let found = search_executable("vcc", Some(&path), None).unwrap();
    assert_eq!(found, first.path().join("vcc"));
}

#[cfg(unix)]
#[test]
fn test_skips_non_executable_files() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(first.path().join("vcc"), "not a program").unwrap();
    make_executable(&second.path().join("vcc"));

    let path = join_paths(&[first.path(), second.path()]);
    let found = search_executable("vcc", Some(&path), None).unwrap();
    assert_eq!(found, second.path().join("vcc"));
}

#[cfg(unix)]
#[test]
fn test_explicit_path_bypasses_search() {
    let dir = tempfile::tempdir().unwrap();
    let vcc = dir.path().join("my-vcc");
    make_executable(&vcc);

    let name = vcc.to_string_lossy().into_owned();
    assert_eq!(search_executable(&name, None, None).unwrap(), vcc);
}

#[test]
fn test_explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let name = dir.path().join("missing-vcc").to_string_lossy().into_owned();
    let path = join_paths(&[dir.path()]);
    assert!(search_executable(&name, Some(&path), None).is_err());
}

#[test]
fn test_pathext_extension_found() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("vcc.EXE");
    fs::write(&exe, "").unwrap();
    #[cfg(unix)]
    make_executable(&exe);

    let path = join_paths(&[dir.path()]);
    let pathext = OsString::from(".COM;.EXE");
    assert_eq!(search_executable("vcc", Some(&path), Some(&pathext)).unwrap(), exe);
}
