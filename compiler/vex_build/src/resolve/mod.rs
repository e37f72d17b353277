//! Locating the `vcc` executable.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::BuildError;

/// Extensions tried on Windows when `PATHEXT` is unset.
const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// Resolve `name` against the process environment.
pub fn resolve_executable(name: &str) -> Result<PathBuf, BuildError> {
    let pathext = if cfg!(windows) {
        Some(env::var_os("PATHEXT").unwrap_or_else(|| DEFAULT_PATHEXT.into()))
    } else {
        None
    };
    search_executable(name, env::var_os("PATH").as_deref(), pathext.as_deref())
}

/// Resolve `name` against an explicit search path.
///
/// A name with a directory part is used as given. A bare name is looked up
/// in each directory of `path`, in order. With `pathext` set, each of its
/// `;`-separated extensions is tried after the name itself.
pub fn search_executable(
    name: &str,
    path: Option<&OsStr>,
    pathext: Option<&OsStr>,
) -> Result<PathBuf, BuildError> {
    let not_found = || BuildError::ExecutableNotFound {
        name: name.to_string(),
    };
    if name.is_empty() {
        return Err(not_found());
    }

    let candidates = candidate_names(name, pathext);
    let found = if has_directory(name) {
        candidates
            .iter()
            .map(PathBuf::from)
            .find(|candidate| is_executable(candidate))
    } else {
        path.into_iter()
            .flat_map(env::split_paths)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| candidates.iter().map(move |candidate| dir.join(candidate)))
            .find(|candidate| is_executable(candidate))
    };

    match found {
        Some(path) => {
            tracing::debug!(path = %path.display(), "resolved compiler");
            Ok(path)
        }
        None => Err(not_found()),
    }
}

fn has_directory(name: &str) -> bool {
    name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
}

/// `name`, then `name` with each extension unless it already has one.
fn candidate_names(name: &str, pathext: Option<&OsStr>) -> Vec<String> {
    let mut names = vec![name.to_string()];
    let Some(pathext) = pathext else {
        return names;
    };
    if Path::new(name).extension().is_some() {
        return names;
    }
    names.extend(
        pathext
            .to_string_lossy()
            .split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!("{name}{ext}")),
    );
    names
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests;
