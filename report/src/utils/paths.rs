//! Path helpers for links inside the generated page

use std::path::{Component, Path, PathBuf};

/// Drop `.` components and fold `..` into the preceding component
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => normalize(path),
    }
}

/// `path` relative to the directory `base`, with `/` separators so it can be
/// used as a URL in the page
pub fn relative_path<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> String {
    let path = absolute(path.as_ref());
    let base = absolute(base.as_ref());

    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        parts.push("..".to_string());
    }
    for part in &path_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_below_base() {
        assert_eq!(
            relative_path("/runs/out/base/test/imgtest/a.png", "/runs/out"),
            "base/test/imgtest/a.png"
        );
    }

    #[test]
    fn test_relative_path_outside_base() {
        assert_eq!(
            relative_path("/runs/tests/base/shot.png", "/runs/out"),
            "../tests/base/shot.png"
        );
        assert_eq!(relative_path("/runs/out", "/runs/out"), ".");
    }

    #[test]
    fn test_relative_path_normalizes() {
        assert_eq!(
            relative_path("/runs/out/./x/../report-1.html", "/runs/out/"),
            "report-1.html"
        );
    }
}
