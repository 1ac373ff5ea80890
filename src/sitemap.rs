//! Renders the sitemaps.org (0.9) XML document for a set of page paths.

use crate::navigation::ROOT_PATH;
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;

const POST_PREFIX: &str = "/blog/";
const BLOG_INDEX: &str = "/blog";

/// Returns the sitemap priority for a root-relative path. The blog index
/// shares the default priority; only individual posts rank lower.
#[allow(clippy::if_same_then_else)]
pub fn priority(path: &str) -> &'static str {
    if path == ROOT_PATH {
        "1.00"
    } else if path.starts_with(POST_PREFIX) && path != BLOG_INDEX {
        "0.64"
    } else if path == BLOG_INDEX {
        "0.80"
    } else {
        "0.80"
    }
}

/// Removes duplicate paths and orders them: the root first, everything else
/// in ascending lexicographic order.
pub fn sort_paths<I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut paths: Vec<String> = paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect();
    paths.sort_by(|a, b| match (a.as_str() == ROOT_PATH, b.as_str() == ROOT_PATH) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    });
    paths
}

/// Formats the generation instant the way it appears in `<lastmod>`, e.g.
/// `2026-10-18T09:15:02.118Z`.
pub fn timestamp(generated_at: &DateTime<Utc>) -> String {
    generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders the sitemap for `paths`, which must already be deduplicated and
/// ordered (see [`sort_paths`]). Every entry shares the `generated_at`
/// instant as its `lastmod`. `site_url` is prepended to each path verbatim.
pub fn render(site_url: &str, paths: &[String], generated_at: &DateTime<Utc>) -> String {
    let lastmod = timestamp(generated_at);
    let mut xml = String::new();
    xml.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset
      xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
      xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
            http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">
<!-- Auto-generated sitemap - Generated on {} -->


"#,
        lastmod
    ));

    for path in paths {
        let loc = format!("{}{}", site_url, path);
        xml.push_str(&format!(
            "<url>\n  <loc>{}</loc>\n  <lastmod>{}</lastmod>\n  <priority>{}</priority>\n</url>\n",
            htmlescape::encode_minimal(&loc),
            lastmod,
            priority(path)
        ));
    }

    xml.push_str("\n\n\n</urlset>");
    xml
}
