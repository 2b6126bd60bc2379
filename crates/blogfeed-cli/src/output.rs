//! Plain-text rendering for command output.

use blogfeed_engine::{CategoryCount, ContentItem, FeedStats};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One line per post, then the [`found_line`] footer.
pub fn post_list(items: &[&ContentItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{}  [{}]  {}  ({}, {})\n",
            item.id(),
            item.category(),
            item.title(),
            display_or(item.author(), "unknown author"),
            item.created_at().format(DATE_FORMAT),
        ));
    }
    out.push_str(&found_line(items.len()));
    out
}

/// "No blogs found", "1 blog found", or "N blogs found".
pub fn found_line(count: usize) -> String {
    match count {
        0 => "No blogs found".to_string(),
        1 => "1 blog found".to_string(),
        n => format!("{n} blogs found"),
    }
}

/// A post in full.
pub fn post_detail(item: &ContentItem) -> String {
    let mut out = format!("{}\n", item.title());
    out.push_str(&format!("id:        {}\n", item.id()));
    out.push_str(&format!("category:  {}\n", item.category()));
    out.push_str(&format!(
        "author:    {}\n",
        display_or(item.author(), "unknown author")
    ));
    out.push_str(&format!(
        "created:   {}\n",
        item.created_at().format(DATE_FORMAT)
    ));
    if let Some(updated) = item.updated_at() {
        out.push_str(&format!("updated:   {}\n", updated.format(DATE_FORMAT)));
    }
    if !item.tags().is_empty() {
        let tags: Vec<String> = item.tags().iter().map(|t| format!("#{t}")).collect();
        out.push_str(&format!("tags:      {}\n", tags.join(" ")));
    }
    if let Some(thumbnail) = item.thumbnail() {
        out.push_str(&format!("thumbnail: {thumbnail}\n"));
    }
    if !item.description().is_empty() {
        out.push_str(&format!("\n{}\n", item.description()));
    }
    if !item.body().is_empty() {
        out.push_str(&format!("\n{}\n", item.body()));
    }
    out
}

/// Dashboard totals.
pub fn stats(stats: &FeedStats) -> String {
    format!(
        "Total posts: {}\nCategories:  {}\nAuthors:     {}",
        stats.total, stats.categories, stats.authors
    )
}

/// "Category: count" lines.
pub fn category_counts(counts: &[CategoryCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{}: {}", c.category, c.count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
