//! Reads the site navigation (`docs.json`) and flattens it into the set of
//! root-relative page paths that belong in the sitemap.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// The site root. Always present in the output of [`extract_pages`].
pub const ROOT_PATH: &str = "/";

const INDEX_SEGMENT: &str = "/index";

/// The top-level navigation document. Only the `navigation.tabs` shape is
/// modelled; every other key in the file is ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NavigationConfig {
    pub navigation: Navigation,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Navigation {
    pub tabs: Vec<Tab>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Tab {
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Group {
    #[serde(default)]
    pub pages: Vec<String>,
}

impl NavigationConfig {
    /// Loads a [`NavigationConfig`] from a JSON file. A missing file is
    /// reported as [`Error::Missing`] so the caller can tell it apart from a
    /// malformed one.
    pub fn from_file(path: &Path) -> Result<NavigationConfig> {
        if !path.exists() {
            return Err(Error::Missing(path.to_owned()));
        }
        let file = File::open(path).map_err(|err| Error::Io {
            path: path.to_owned(),
            err,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Json {
            path: path.to_owned(),
            err,
        })
    }

    /// Iterates every page entry, flattening tabs → groups → pages.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.navigation
            .tabs
            .iter()
            .flat_map(|tab| tab.groups.iter())
            .flat_map(|group| group.pages.iter())
            .map(String::as_str)
    }
}

/// Converts one navigation entry into a root-relative path by dropping the
/// first `/index` in it (`blog/index` becomes `/blog`). A bare `index` has no
/// `/index` to drop and stays `/index`.
pub fn page_path(page: &str) -> String {
    let stripped = page.replacen(INDEX_SEGMENT, "", 1);
    format!("/{}", stripped.trim_start_matches('/'))
}

/// Returns every page path reachable from `config`, plus [`ROOT_PATH`].
pub fn extract_pages(config: &NavigationConfig) -> BTreeSet<String> {
    let mut pages = BTreeSet::new();
    pages.insert(ROOT_PATH.to_owned());
    for page in config.pages() {
        pages.insert(page_path(page));
    }
    pages
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to read the navigation file. All variants are fatal
/// for a run.
#[derive(Debug)]
pub enum Error {
    /// Returned when the navigation file does not exist.
    Missing(PathBuf),

    /// Returned when the navigation file exists but can't be opened.
    Io { path: PathBuf, err: io::Error },

    /// Returned when the navigation file isn't valid JSON or doesn't have the
    /// `navigation.tabs` shape.
    Json { path: PathBuf, err: serde_json::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Missing(path) => {
                write!(f, "Navigation file not found: {}", path.display())
            }
            Error::Io { path, err } => {
                write!(f, "Reading navigation file '{}': {}", path.display(), err)
            }
            Error::Json { path, err } => {
                write!(f, "Parsing navigation file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Missing(_) => None,
            Error::Io { path: _, err } => Some(err),
            Error::Json { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn config(groups: &[&[&str]]) -> NavigationConfig {
        NavigationConfig {
            navigation: Navigation {
                tabs: vec![Tab {
                    groups: groups
                        .iter()
                        .map(|pages| Group {
                            pages: pages.iter().map(|p| p.to_string()).collect(),
                        })
                        .collect(),
                }],
            },
        }
    }

    #[test]
    fn test_page_path() {
        assert_eq!("/guide/setup", page_path("guide/setup"));
        assert_eq!("/blog", page_path("blog/index"));
        assert_eq!("/", page_path("/index"));
        assert_eq!("/", page_path("/"));
        assert_eq!("/docs/api", page_path("docs/index/api"));
        assert_eq!("/guide", page_path("/guide"));
    }

    #[test]
    fn test_page_path_drops_first_index_substring_only() {
        assert_eq!("/index", page_path("index"));
        assert_eq!("/bloging", page_path("blog/indexing"));
        assert_eq!("/a/index", page_path("a/index/index"));
    }

    #[test]
    fn test_root_is_always_present_once() {
        for groups in [
            config(&[]),
            config(&[&["index"]]),
            config(&[&["/", "/index", "guide/setup"]]),
        ]
        .iter()
        {
            let pages = extract_pages(groups);
            assert_eq!(1, pages.iter().filter(|p| p.as_str() == "/").count());
        }
    }

    #[test]
    fn test_extract_pages_dedupes_and_is_idempotent() {
        let nav = config(&[
            &["quickstart", "blog/index", "guide/setup"],
            &["guide/setup", "blog"],
        ]);
        let first = extract_pages(&nav);
        let wanted: Vec<&str> = vec!["/", "/blog", "/guide/setup", "/quickstart"];
        assert_eq!(wanted, first.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(first, extract_pages(&nav));
    }

    #[test]
    fn test_from_file_ignores_unknown_keys() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("docs.json");
        fs::write(
            &path,
            r#"{
                "name": "FastApps",
                "navigation": {
                    "tabs": [
                        {"tab": "Docs", "groups": [{"group": "Start", "pages": ["index", "quickstart"]}]},
                        {"tab": "Blog", "groups": [{"group": "Blog", "pages": ["blog/index"]}]},
                        {"tab": "Empty"}
                    ]
                }
            }"#,
        )?;
        let nav = NavigationConfig::from_file(&path)?;
        assert_eq!(vec!["index", "quickstart", "blog/index"], nav.pages().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_from_file_missing() {
        match NavigationConfig::from_file(Path::new("/no/such/docs.json")) {
            Err(Error::Missing(path)) => assert_eq!(PathBuf::from("/no/such/docs.json"), path),
            other => panic!("wanted Error::Missing, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_invalid_json() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("docs.json");
        fs::write(&path, "{ navigation: ")?;
        match NavigationConfig::from_file(&path) {
            Err(Error::Json { .. }) => Ok(()),
            other => panic!("wanted Error::Json, got {:?}", other),
        }
    }
}
