//! Defines the [`Post`] and [`Scanner`] types. A [`Scanner`] turns a
//! directory of post source files into [`Post`] records, one per file. Post
//! metadata comes from the file's front matter ([`crate::frontmatter`]);
//! anything missing is filled in from the file name and configured defaults,
//! so a post is never dropped because its metadata is absent or unreadable.

use crate::frontmatter::FrontMatter;
use chrono::{DateTime, NaiveDate};
use std::fs::{self, read_dir};
use std::path::Path;
use tracing::{debug, warn};

/// The URL prefix under which every post is published.
pub const BLOG_PREFIX: &str = "/blog";

/// The format of post dates in front matter and of the fallback date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single blog post, normalized from its source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// The source file name without its extension.
    pub slug: String,

    /// The root-relative URL, always `/blog/{slug}`.
    pub url: String,

    pub title: String,
    pub description: String,

    /// `YYYY-MM-DD` when it came from the fallback; otherwise whatever the
    /// front matter said.
    pub date: String,

    pub author: String,
    pub tags: Vec<String>,
    pub image: String,
}

impl Post {
    /// Returns the post's date as a calendar date, if it can be read as one.
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Turns a slug into a title: hyphens become spaces and the first letter of
/// every word is upper-cased (`my-post` → `My Post`).
pub fn humanize(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut in_word = false;
    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        title.push(match is_word && !in_word {
            true => c.to_ascii_uppercase(),
            false => c,
        });
        in_word = is_word;
    }
    title
}

/// Scans post source files into [`Post`] records.
pub struct Scanner<'a> {
    /// The post file extension, without the dot (e.g. `mdx`).
    extension: &'a str,

    /// The landing page's file name (e.g. `index.mdx`), which is skipped.
    index_file_name: &'a str,

    /// The author used when a post doesn't name one.
    default_author: &'a str,

    /// The social image used when a post doesn't name one.
    default_image: &'a str,

    /// The date used when a post doesn't have one.
    today: NaiveDate,
}

impl<'a> Scanner<'a> {
    /// Constructs a new scanner. See fields on [`Scanner`] for argument
    /// descriptions.
    pub fn new(
        extension: &'a str,
        index_file_name: &'a str,
        default_author: &'a str,
        default_image: &'a str,
        today: NaiveDate,
    ) -> Scanner<'a> {
        Scanner {
            extension,
            index_file_name,
            default_author,
            default_image,
            today,
        }
    }

    /// Searches `dir` for post files and returns one [`Post`] per file,
    /// ordered by file name. A directory that can't be read yields no posts;
    /// a file that can't be read yields a [`Post`] made only of fallbacks.
    /// Both cases are logged as warnings.
    pub fn scan(&self, dir: &Path) -> Vec<Post> {
        let entries = match read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Can't read blog directory `{}`: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut file_names = Vec::new();
        for result in entries {
            match result {
                Ok(entry) => {
                    let file_name = entry.file_name().to_string_lossy().into_owned();
                    if self.slug(&file_name).is_some() {
                        file_names.push(file_name);
                    }
                }
                Err(e) => warn!("Can't read entry in `{}`: {}", dir.display(), e),
            }
        }
        file_names.sort();

        file_names
            .iter()
            .filter_map(|file_name| {
                let slug = self.slug(file_name)?;
                Some(self.scan_file(slug, &dir.join(file_name)))
            })
            .collect()
    }

    /// Returns the slug for `file_name`, or `None` if it isn't a post file.
    fn slug<'f>(&self, file_name: &'f str) -> Option<&'f str> {
        if file_name == self.index_file_name {
            return None;
        }
        file_name
            .strip_suffix(self.extension)?
            .strip_suffix('.')
    }

    fn scan_file(&self, slug: &str, path: &Path) -> Post {
        // Invalid UTF-8 is replaced, not rejected.
        match fs::read(path) {
            Ok(bytes) => {
                let front_matter = FrontMatter::parse(&String::from_utf8_lossy(&bytes));
                debug!(
                    "Parsed {} front matter keys from `{}`",
                    front_matter.len(),
                    path.display()
                );
                self.post(slug, &front_matter)
            }
            Err(e) => {
                warn!("Can't read post metadata from `{}`: {}", path.display(), e);
                self.post(slug, &FrontMatter::default())
            }
        }
    }

    /// Builds a [`Post`] from front matter, falling back field by field.
    pub fn post(&self, slug: &str, front_matter: &FrontMatter) -> Post {
        Post {
            slug: slug.to_owned(),
            url: format!("{}/{}", BLOG_PREFIX, slug),
            title: front_matter
                .text(&["title"])
                .unwrap_or_else(|| humanize(slug)),
            description: front_matter.text(&["description"]).unwrap_or_default(),
            date: front_matter
                .text(&["publishDate", "date"])
                .unwrap_or_else(|| self.today.format(DATE_FORMAT).to_string()),
            author: front_matter
                .text(&["author"])
                .unwrap_or_else(|| self.default_author.to_owned()),
            tags: front_matter.list("tags"),
            image: front_matter
                .text(&["image"])
                .unwrap_or_else(|| self.default_image.to_owned()),
        }
    }
}
