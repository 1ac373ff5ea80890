//! Renders the contributor guide: the static writing guide in
//! `templates/blog_guide.md` followed by a generated listing of the
//! published posts, newest first.

use crate::post::Post;
use chrono::NaiveDate;
use std::cmp::Ordering;

const PREAMBLE: &str = include_str!("../templates/blog_guide.md");

const LONG_DATE: &str = "%B %-d, %Y";
const SHORT_DATE: &str = "%b %-d, %Y";

/// Orders posts newest first. The sort is stable, so posts sharing a date
/// keep their scan order; posts whose date can't be read go last.
pub fn sort_by_date(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Formats a post date as e.g. `Mar 1, 2024`. Dates that can't be read are
/// shown as written.
pub fn display_date(post: &Post) -> String {
    match post.parsed_date() {
        Some(date) => date.format(SHORT_DATE).to_string(),
        None => post.date.clone(),
    }
}

/// Renders the full guide. `today` is stamped into the listing header and
/// the closing "last updated" line.
pub fn render(posts: &[Post], today: NaiveDate) -> String {
    let today = today.format(LONG_DATE).to_string();
    let mut guide = String::from(PREAMBLE);
    guide.push_str(&format!(
        "## 📚 Current Blog Posts\n\n*Auto-generated list of current blog posts ({})*\n\n",
        today
    ));

    let sorted = sort_by_date(posts);
    if sorted.is_empty() {
        guide.push_str("\n### 📝 Published Posts\n\n*No blog posts found.*\n\n");
    } else {
        guide.push_str(&format!(
            "\n### 📝 Published Posts ({} posts)\n\n",
            sorted.len()
        ));
        for (i, post) in sorted.iter().enumerate() {
            push_entry(&mut guide, i + 1, post);
        }
    }

    guide.push_str(&format!(
        "\n---\n\n*This guide is continuously updated to maintain the quality and \
         consistency of the FastApps blog. Last updated: {}*",
        today
    ));
    guide
}

fn push_entry(guide: &mut String, number: usize, post: &Post) {
    guide.push_str(&format!("{}. **{}**\n", number, post.title));
    guide.push_str(&format!("   - **URL**: `{}`\n", post.url));
    guide.push_str(&format!("   - **Date**: {}\n", display_date(post)));
    guide.push_str(&format!("   - **Author**: {}\n", post.author));
    if !post.tags.is_empty() {
        guide.push_str(&format!("   - **Tags**: {}\n", post.tags.join(", ")));
    }
    if !post.description.is_empty() {
        guide.push_str(&format!("   - **Description**: {}\n", post.description));
    }
    guide.push('\n');
}
