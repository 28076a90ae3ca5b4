use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Expands one input path into the files to search, in a stable order.
/// Directories are only entered with `recursive`.
pub fn collect_files(root: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let meta = fs::metadata(root)?;
    if meta.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !recursive {
        return Err(io::Error::other("is a directory"));
    }
    let mut out = Vec::new();
    collect_recursive(root, &mut out);
    Ok(out)
}

// Unreadable subdirectories are skipped.
fn collect_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_recursive(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rsp-fs-walk-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.txt"), "b").unwrap();
        fs::write(dir.join("a.txt"), "a").unwrap();
        fs::write(dir.join("nested").join("c.txt"), "c").unwrap();
        dir
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = scratch_dir("file");
        let file = dir.join("a.txt");
        assert_eq!(collect_files(&file, false).unwrap(), vec![file]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn directory_needs_recursive() {
        let dir = scratch_dir("norec");
        assert!(collect_files(&dir, false).is_err());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn recursive_walk_is_sorted() {
        let dir = scratch_dir("rec");
        let files = collect_files(&dir, true).unwrap();
        assert_eq!(
            files,
            vec![
                dir.join("a.txt"),
                dir.join("b.txt"),
                dir.join("nested").join("c.txt")
            ]
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(collect_files(Path::new("/definitely/not/here/rsp"), false).is_err());
    }
}
