use anyhow::{anyhow, Result};
use std::fs::File;
use std::path::Path;

pub fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}

/// Resolves `path` against `root` unless it is already absolute.
pub fn resolve(root: &Path, path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_missing_file_names_kind_and_path() {
        let err = open(Path::new("/definitely/not/here.yaml"), "project").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Opening project file `/definitely/not/here.yaml`"));
    }

    #[test]
    fn test_resolve() {
        let root = Path::new("/site");
        assert_eq!(PathBuf::from("/site/docs.json"), resolve(root, Path::new("docs.json")));
        assert_eq!(PathBuf::from("/tmp/x.xml"), resolve(root, Path::new("/tmp/x.xml")));
    }
}
