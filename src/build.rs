//! Exports the [`build_site`] function which stitches together the steps of
//! a run: reading the navigation ([`crate::navigation`]), scanning posts
//! ([`crate::post`]), rendering the sitemap ([`crate::sitemap`]) and the
//! contributor guide ([`crate::guide`]), and writing both to disk.

use crate::config::Config;
use crate::guide;
use crate::navigation::{extract_pages, Error as NavigationError, NavigationConfig};
use crate::post::{Post, Scanner};
use crate::sitemap;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// The instant a run started. Everything in the output that says "now" is
/// derived from one [`Clock`] so the two files agree with each other.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// The sitemap `lastmod` instant.
    pub generated_at: DateTime<Utc>,

    /// The date stamped into the guide, in local time.
    pub local_today: NaiveDate,
}

impl Clock {
    pub fn now() -> Clock {
        let now = Local::now();
        Clock {
            generated_at: now.with_timezone(&Utc),
            local_today: now.date_naive(),
        }
    }

    /// A clock pinned to `generated_at`, with the local date taken as the
    /// UTC date.
    pub fn fixed(generated_at: DateTime<Utc>) -> Clock {
        Clock {
            generated_at,
            local_today: generated_at.date_naive(),
        }
    }

    /// The fallback date for posts that don't declare one (UTC).
    pub fn utc_today(&self) -> NaiveDate {
        self.generated_at.date_naive()
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Summary {
    /// The site URL prefixed onto every page.
    pub site_url: String,

    /// Every page in the sitemap, in sitemap order.
    pub pages: Vec<String>,

    /// Every post, newest first.
    pub posts: Vec<Post>,

    /// The number of pages found in the navigation, the root included.
    pub navigation_pages: usize,

    pub sitemap_file: PathBuf,
    pub guide_file: PathBuf,
}

impl fmt::Display for Summary {
    /// Lists every generated URL and every post with its date.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n📋 Generated pages:")?;
        for page in &self.pages {
            writeln!(f, "  - {}{}", self.site_url, page)?;
        }
        if !self.posts.is_empty() {
            writeln!(f, "\n📝 Blog posts:")?;
            for (i, post) in self.posts.iter().enumerate() {
                writeln!(f, "  {}. {} ({})", i + 1, post.title, post.date)?;
            }
        }
        Ok(())
    }
}

/// Runs the whole pipeline for `config`. Output directories are created as
/// needed. A failure part way through leaves whatever was already written in
/// place.
pub fn build_site(config: &Config, clock: &Clock) -> Result<Summary> {
    info!("Generating sitemap and blog guide");

    let navigation = NavigationConfig::from_file(&config.navigation_file)?;
    info!("Read navigation from `{}`", config.navigation_file.display());

    let navigation_pages = extract_pages(&navigation);
    info!("Found {} navigation pages", navigation_pages.len());

    let index_file_name = config.index_file_name();
    let scanner = Scanner::new(
        &config.post_extension,
        &index_file_name,
        &config.default_author,
        &config.default_image,
        clock.utc_today(),
    );
    let posts = scanner.scan(&config.blog_directory);
    info!("Found {} blog posts", posts.len());

    let pages = sitemap::sort_paths(
        navigation_pages
            .iter()
            .cloned()
            .chain(posts.iter().map(|post| post.url.clone())),
    );
    info!("{} unique pages in total", pages.len());

    let sitemap = sitemap::render(config.site_url(), &pages, &clock.generated_at);
    write_file(&config.sitemap_file, &sitemap)?;
    info!("Wrote sitemap: {}", config.sitemap_file.display());

    let guide = guide::render(&posts, clock.local_today);
    write_file(&config.guide_file, &guide)?;
    info!("Wrote blog guide: {}", config.guide_file.display());

    let summary = Summary {
        site_url: config.site_url().to_owned(),
        pages,
        posts: guide::sort_by_date(&posts).into_iter().cloned().collect(),
        navigation_pages: navigation_pages.len(),
        sitemap_file: config.sitemap_file.clone(),
        guide_file: config.guide_file.clone(),
    };
    print!("{}", summary);
    Ok(summary)
}

/// Writes `contents` to `path`, creating the parent directory first if it
/// doesn't exist.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|err| Error::CreateDirectory {
                path: dir.to_owned(),
                err,
            })?;
            info!("Created directory `{}`", dir.display());
        }
    }
    std::fs::write(path, contents).map_err(|err| Error::Write {
        path: path.to_owned(),
        err,
    })
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for a run. Every variant is fatal.
#[derive(Debug)]
pub enum Error {
    /// Returned when the navigation file is missing or malformed.
    Navigation(NavigationError),

    /// Returned when an output directory can't be created.
    CreateDirectory { path: PathBuf, err: std::io::Error },

    /// Returned when an output file can't be written.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Navigation(err) => err.fmt(f),
            Error::CreateDirectory { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Navigation(err) => Some(err),
            Error::CreateDirectory { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<NavigationError> for Error {
    /// Converts [`NavigationError`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: NavigationError) -> Error {
        Error::Navigation(err)
    }
}
