//! The library code for `sitemapper`, which generates a site's `sitemap.xml`
//! and its contributor blog guide in one pass. The pipeline is:
//!
//! 1. Resolving settings ([`crate::config`])
//! 2. Reading the navigation file and flattening it into page paths
//!    ([`crate::navigation`])
//! 3. Scanning the blog directory for posts ([`crate::post`]), reading each
//!    post's front matter ([`crate::frontmatter`])
//! 4. Rendering the sitemap ([`crate::sitemap`]) and the guide
//!    ([`crate::guide`]) and writing both to disk ([`crate::build`])
//!
//! Only the navigation file is required. A missing blog directory, or a post
//! that can't be read, degrades the output rather than failing the run.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod frontmatter;
pub mod guide;
pub mod navigation;
pub mod post;
pub mod sitemap;
mod util;
