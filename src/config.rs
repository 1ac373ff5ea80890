//! Resolves the [`Config`] for a run. Every setting has a built-in default;
//! an optional `sitemapper.yaml` project file in the project root overrides
//! those defaults, and command-line [`Overrides`] win over both.

use crate::util::{open, resolve};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the optional project file looked up in the project root.
pub const PROJECT_FILE: &str = "sitemapper.yaml";

const DEFAULT_BASE_URL: &str = "https://www.fastapps.org";
const DEFAULT_NAVIGATION: &str = "docs.json";
const DEFAULT_BLOG_DIRECTORY: &str = "blog";
const DEFAULT_SITEMAP: &str = "public/sitemap.xml";
const DEFAULT_GUIDE: &str = "README_BLOG.md";
const DEFAULT_POST_EXTENSION: &str = "mdx";
const DEFAULT_AUTHOR: &str = "FastApps Team";
const DEFAULT_IMAGE: &str = "/images/default-blog.png";

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct Project {
    base_url: Option<Url>,
    navigation: Option<PathBuf>,
    blog_directory: Option<PathBuf>,
    sitemap: Option<PathBuf>,
    guide: Option<PathBuf>,
    post_extension: Option<String>,
    default_author: Option<String>,
    default_image: Option<String>,
}

/// Settings supplied on the command line. `None` leaves the project file (or
/// default) value in place.
#[derive(Default, Debug)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub sitemap: Option<PathBuf>,
    pub guide: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The site's public origin. Page paths are appended to it verbatim, so
    /// a trailing slash is dropped when rendering (see [`Config::site_url`]).
    pub base_url: Url,

    /// The navigation JSON file (`docs.json`).
    pub navigation_file: PathBuf,

    /// The directory holding the post source files.
    pub blog_directory: PathBuf,

    /// Where the sitemap XML is written.
    pub sitemap_file: PathBuf,

    /// Where the contributor guide Markdown is written.
    pub guide_file: PathBuf,

    /// The post source file extension, without the leading dot.
    pub post_extension: String,

    pub default_author: String,
    pub default_image: String,
}

impl Config {
    /// Loads the configuration for the project rooted at `root`. If
    /// `overrides.config_file` is set that file must exist; otherwise
    /// `{root}/sitemapper.yaml` is used when present and the defaults when
    /// not.
    pub fn from_directory(root: &Path, overrides: Overrides) -> Result<Config> {
        let project = match &overrides.config_file {
            Some(path) => Self::load_project(&resolve(root, path))?,
            None => {
                let path = root.join(PROJECT_FILE);
                if path.exists() {
                    Self::load_project(&path)?
                } else {
                    Project::default()
                }
            }
        };
        Self::from_project(root, project, overrides)
    }

    fn load_project(path: &Path) -> Result<Project> {
        let mut contents = String::new();
        open(path, "project")?.read_to_string(&mut contents)?;
        if contents.trim().is_empty() {
            return Ok(Project::default());
        }
        match serde_yaml::from_str(&contents) {
            Ok(project) => Ok(project),
            Err(e) => Err(anyhow!(
                "Loading configuration `{}`: {}",
                path.display(),
                e
            )),
        }
    }

    fn from_project(root: &Path, project: Project, overrides: Overrides) -> Result<Config> {
        let base_url = match overrides.base_url {
            Some(raw) => match Url::parse(&raw) {
                Ok(url) => url,
                Err(e) => return Err(anyhow!("Invalid base URL `{}`: {}", raw, e)),
            },
            None => match project.base_url {
                Some(url) => url,
                None => Url::parse(DEFAULT_BASE_URL)?,
            },
        };
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Base URL `{}` cannot hold page paths", base_url));
        }

        let post_extension = project
            .post_extension
            .unwrap_or_else(|| DEFAULT_POST_EXTENSION.to_owned())
            .trim_start_matches('.')
            .to_owned();
        if post_extension.is_empty() {
            return Err(anyhow!("`post_extension` must not be empty"));
        }

        let path_or = |value: Option<PathBuf>, default: &str| {
            resolve(root, &value.unwrap_or_else(|| PathBuf::from(default)))
        };

        Ok(Config {
            base_url,
            navigation_file: path_or(project.navigation, DEFAULT_NAVIGATION),
            blog_directory: path_or(project.blog_directory, DEFAULT_BLOG_DIRECTORY),
            sitemap_file: path_or(overrides.sitemap.or(project.sitemap), DEFAULT_SITEMAP),
            guide_file: path_or(overrides.guide.or(project.guide), DEFAULT_GUIDE),
            post_extension,
            default_author: project
                .default_author
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
            default_image: project
                .default_image
                .unwrap_or_else(|| DEFAULT_IMAGE.to_owned()),
        })
    }

    /// The base URL as the prefix for page paths, without a trailing slash.
    pub fn site_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// The blog landing page file, which is not a post.
    pub fn index_file_name(&self) -> String {
        format!("index.{}", self.post_extension)
    }
}
