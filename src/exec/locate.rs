use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ExecError};

/// Resolves the tool to an executable path.
///
/// A value containing a path separator is taken as a path; anything else is
/// searched for in `PATH`.
///
/// # Errors
///
/// Returns [`ExecError::ToolNotFound`] when no `PATH` entry holds the tool, or
/// [`ExecError::ToolPathInvalid`] when an explicit path is not a file.
pub fn locate_tool(tool: &str) -> AppResult<PathBuf> {
    locate_in(tool, std::env::var_os("PATH"))
}

pub(super) fn locate_in(tool: &str, search_path: Option<OsString>) -> AppResult<PathBuf> {
    if tool.trim().is_empty() {
        return Err(AppError::exec(ExecError::ToolNotFound {
            tool: tool.to_owned(),
        }));
    }

    if tool.contains('/') || tool.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(tool);
        if is_executable(&path) {
            return Ok(path);
        }
        return Err(AppError::exec(ExecError::ToolPathInvalid { path }));
    }

    search_path
        .as_ref()
        .and_then(|paths| {
            std::env::split_paths(paths)
                .map(|dir| dir.join(tool))
                .find(|candidate| is_executable(candidate))
        })
        .ok_or_else(|| {
            AppError::exec(ExecError::ToolNotFound {
                tool: tool.to_owned(),
            })
        })
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
