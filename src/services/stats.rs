//! Aggregate statistics over a snapshot of blog records.
//!
//! Every function is pure and total: the empty collection yields `0` or `None`,
//! never an error. Records are already validated (likes is `u64`), so no
//! function here needs to reject input. Like sums saturate at `u64::MAX`.
//!
//! Tie-break for the per-author functions: the author whose first record comes
//! earliest in the input wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::BlogRecord;

/// Bucket for records that carry no author.
pub const UNKNOWN_AUTHOR: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// All four statistics for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

pub fn total_likes(blogs: &[BlogRecord]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |total, b| total.saturating_add(b.likes))
}

pub fn favorite_blog(blogs: &[BlogRecord]) -> Option<FavoriteBlog> {
    let mut best: Option<&BlogRecord> = None;
    for blog in blogs {
        // strictly greater: the first maximum is kept
        if best.is_none_or(|b| blog.likes > b.likes) {
            best = Some(blog);
        }
    }

    best.map(|b| FavoriteBlog {
        title: b.title.clone(),
        author: b.author.clone(),
        likes: b.likes,
    })
}

pub fn most_blogs(blogs: &[BlogRecord]) -> Option<AuthorBlogs> {
    let table = tally_by_author(blogs, |_| 1);
    leader(&table).map(|(author, blogs)| AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

pub fn most_likes(blogs: &[BlogRecord]) -> Option<AuthorLikes> {
    let table = tally_by_author(blogs, |b| b.likes);
    leader(&table).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

pub fn summarize(blogs: &[BlogRecord]) -> StatsSummary {
    StatsSummary {
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

fn author_key(blog: &BlogRecord) -> &str {
    blog.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
}

/// One pass: author -> accumulated value, in order of first appearance.
fn tally_by_author<'a, F>(blogs: &'a [BlogRecord], value: F) -> Vec<(&'a str, u64)>
where
    F: Fn(&BlogRecord) -> u64,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut table: Vec<(&'a str, u64)> = Vec::new();

    for blog in blogs {
        let author = author_key(blog);
        match index.get(author) {
            Some(&i) => table[i].1 = table[i].1.saturating_add(value(blog)),
            None => {
                index.insert(author, table.len());
                table.push((author, value(blog)));
            }
        }
    }

    table
}

fn leader<'a>(table: &[(&'a str, u64)]) -> Option<(&'a str, u64)> {
    let mut best: Option<(&'a str, u64)> = None;
    for &(author, n) in table {
        if best.is_none_or(|(_, m)| n > m) {
            best = Some((author, n));
        }
    }
    best
}
