//! Aggregate statistics over a collection of blog posts.
//!
//! Every function here is a pure read-only pass over a borrowed slice:
//! no I/O, no shared state, deterministic for a given input order. Results
//! are order-independent aggregates except where a tie-break rule applies;
//! each tie-break is documented on its function and pinned by a test.

use std::collections::HashMap;

use serde::Serialize;

use crate::BlogPost;

/// The most-liked post, projected to the fields callers care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// The author with the most posts, paired with that count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAuthorByPosts {
    pub author: String,
    pub blogs: usize,
}

/// The author with the highest total like count, paired with that total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAuthorByLikes {
    pub author: String,
    pub likes: i64,
}

/// Sum of `likes` across all posts. Zero for an empty slice.
#[must_use]
pub fn total_likes(posts: &[BlogPost]) -> i64 {
    posts.iter().map(|post| post.likes).sum()
}

/// The post with the maximum `likes` value, or `None` for an empty slice.
///
/// Ties resolve to the first post in input order that attains the maximum.
#[must_use]
pub fn favorite_blog(posts: &[BlogPost]) -> Option<FavoriteBlog> {
    let mut best: Option<&BlogPost> = None;
    for post in posts {
        if best.is_none_or(|b| post.likes > b.likes) {
            best = Some(post);
        }
    }
    best.map(|post| FavoriteBlog {
        title: post.title.clone(),
        author: post.author.clone(),
        likes: post.likes,
    })
}

/// The author with the most posts, or `None` for an empty slice.
///
/// Authors are grouped in order of first appearance; the maximization scan
/// prefers the *last* group that attains the maximum count. This is the
/// opposite of [`favorite_blog`]'s first-max rule and is intentional: it
/// reproduces the reference behavior for this aggregate, where a
/// max-by-last-element sweep over grouped entries keeps the later group on
/// ties. Do not unify the two rules without updating the tie fixtures.
#[must_use]
pub fn most_blogs(posts: &[BlogPost]) -> Option<TopAuthorByPosts> {
    let groups = group_by_author(posts, |count, _| count + 1usize);

    let mut best: Option<(&str, usize)> = None;
    for (author, count) in groups {
        if best.is_none_or(|(_, c)| count >= c) {
            best = Some((author, count));
        }
    }
    best.map(|(author, blogs)| TopAuthorByPosts {
        author: author.to_owned(),
        blogs,
    })
}

/// The author with the highest total like count, or `None` for an empty slice.
///
/// Ties resolve to the author whose first post appears earliest in input
/// order (first-max, same rule as [`favorite_blog`]).
#[must_use]
pub fn most_likes(posts: &[BlogPost]) -> Option<TopAuthorByLikes> {
    let groups = group_by_author(posts, |sum, post| sum + post.likes);

    let mut best: Option<(&str, i64)> = None;
    for (author, sum) in groups {
        if best.is_none_or(|(_, s)| sum > s) {
            best = Some((author, sum));
        }
    }
    best.map(|(author, likes)| TopAuthorByLikes {
        author: author.to_owned(),
        likes,
    })
}

/// Fold posts into per-author accumulators in a single pass, preserving
/// author-first-seen order in the returned groups.
///
/// The auxiliary map only carries indices into `groups`, so enumeration
/// order never depends on hash iteration order.
fn group_by_author<A, F>(posts: &[BlogPost], step: F) -> Vec<(&str, A)>
where
    A: Default + Copy,
    F: Fn(A, &BlogPost) -> A,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, A)> = Vec::new();

    for post in posts {
        let author = post.author.as_str();
        if let Some(&i) = index.get(author) {
            groups[i].1 = step(groups[i].1, post);
        } else {
            index.insert(author, groups.len());
            groups.push((author, step(A::default(), post)));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, author: &str, likes: i64) -> BlogPost {
        BlogPost {
            title: title.to_owned(),
            author: author.to_owned(),
            url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            likes,
        }
    }

    /// The well-known six-post fixture: Martin has 3 posts / 10 likes,
    /// Dijkstra 2 posts / 17 likes, Chan 1 post / 7 likes.
    fn blog_list() -> Vec<BlogPost> {
        vec![
            post("React patterns", "Michael Chan", 7),
            post("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            post("Canonical string reduction", "Edsger W. Dijkstra", 12),
            post("First class tests", "Robert C. Martin", 10),
            post("TDD harms architecture", "Robert C. Martin", 0),
            post("Type wars", "Robert C. Martin", 0),
        ]
    }

    // -- total_likes --------------------------------------------------------

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn total_likes_of_single_post_is_its_likes() {
        let posts = vec![post("Canonical string reduction", "Edsger W. Dijkstra", 5)];
        assert_eq!(total_likes(&posts), 5);
    }

    #[test]
    fn total_likes_sums_across_posts() {
        let posts = vec![post("A", "X", 5), post("B", "Y", 7), post("C", "Z", 12)];
        assert_eq!(total_likes(&posts), 24);
    }

    #[test]
    fn total_likes_of_bigger_list() {
        assert_eq!(total_likes(&blog_list()), 34);
    }

    // -- favorite_blog ------------------------------------------------------

    #[test]
    fn favorite_blog_of_empty_list_is_none() {
        assert_eq!(favorite_blog(&[]), None);
    }

    #[test]
    fn favorite_blog_picks_max_likes() {
        let favorite = favorite_blog(&blog_list()).expect("non-empty list");
        assert_eq!(
            favorite,
            FavoriteBlog {
                title: "Canonical string reduction".to_owned(),
                author: "Edsger W. Dijkstra".to_owned(),
                likes: 12,
            }
        );
    }

    #[test]
    fn favorite_blog_tie_keeps_first_in_input_order() {
        let posts = vec![post("A", "X", 3), post("B", "Y", 9), post("C", "Z", 9)];
        let favorite = favorite_blog(&posts).expect("non-empty list");
        assert_eq!(favorite.title, "B");
        assert_eq!(favorite.author, "Y");
        assert_eq!(favorite.likes, 9);
    }

    #[test]
    fn favorite_blog_projects_away_url() {
        let json = serde_json::to_value(favorite_blog(&blog_list())).expect("serialize");
        assert!(json.get("url").is_none());
        assert_eq!(json["likes"], 12);
    }

    // -- most_blogs ---------------------------------------------------------

    #[test]
    fn most_blogs_of_empty_list_is_none() {
        assert_eq!(most_blogs(&[]), None);
    }

    #[test]
    fn most_blogs_counts_posts_per_author() {
        let top = most_blogs(&blog_list()).expect("non-empty list");
        assert_eq!(
            top,
            TopAuthorByPosts {
                author: "Robert C. Martin".to_owned(),
                blogs: 3,
            }
        );
    }

    #[test]
    fn most_blogs_tie_keeps_last_author_in_first_seen_order() {
        // Both authors have two posts. The grouped scan prefers the LAST
        // maximum, so the author first seen later wins the tie. Note this is
        // deliberately the opposite of favorite_blog's first-max rule.
        let posts = vec![
            post("A1", "Early Author", 1),
            post("B1", "Late Author", 1),
            post("A2", "Early Author", 1),
            post("B2", "Late Author", 1),
        ];
        let top = most_blogs(&posts).expect("non-empty list");
        assert_eq!(top.author, "Late Author");
        assert_eq!(top.blogs, 2);
    }

    #[test]
    fn most_blogs_single_author() {
        let posts = vec![post("A", "Solo", 1), post("B", "Solo", 2)];
        let top = most_blogs(&posts).expect("non-empty list");
        assert_eq!(top.author, "Solo");
        assert_eq!(top.blogs, 2);
    }

    // -- most_likes ---------------------------------------------------------

    #[test]
    fn most_likes_of_empty_list_is_none() {
        assert_eq!(most_likes(&[]), None);
    }

    #[test]
    fn most_likes_sums_likes_per_author() {
        let top = most_likes(&blog_list()).expect("non-empty list");
        assert_eq!(
            top,
            TopAuthorByLikes {
                author: "Edsger W. Dijkstra".to_owned(),
                likes: 17,
            }
        );
    }

    #[test]
    fn most_likes_tie_keeps_first_author_in_first_seen_order() {
        // Both authors total 10 likes; the first-seen author wins (first-max,
        // unlike most_blogs).
        let posts = vec![
            post("A1", "Early Author", 4),
            post("B1", "Late Author", 10),
            post("A2", "Early Author", 6),
        ];
        let top = most_likes(&posts).expect("non-empty list");
        assert_eq!(top.author, "Early Author");
        assert_eq!(top.likes, 10);
    }

    #[test]
    fn most_likes_counts_zero_like_posts() {
        let posts = vec![post("A", "X", 0), post("B", "X", 0)];
        let top = most_likes(&posts).expect("non-empty list");
        assert_eq!(top.author, "X");
        assert_eq!(top.likes, 0);
    }

    // -- purity -------------------------------------------------------------

    #[test]
    fn aggregates_are_idempotent_over_the_same_input() {
        let posts = blog_list();
        assert_eq!(total_likes(&posts), total_likes(&posts));
        assert_eq!(favorite_blog(&posts), favorite_blog(&posts));
        assert_eq!(most_blogs(&posts), most_blogs(&posts));
        assert_eq!(most_likes(&posts), most_likes(&posts));
    }

    #[test]
    fn aggregates_do_not_mutate_input() {
        let posts = blog_list();
        let snapshot = posts.clone();
        let _ = total_likes(&posts);
        let _ = favorite_blog(&posts);
        let _ = most_blogs(&posts);
        let _ = most_likes(&posts);
        assert_eq!(posts, snapshot);
    }

    // -- grouping helper ----------------------------------------------------

    #[test]
    fn group_by_author_preserves_first_seen_order() {
        let posts = vec![
            post("A", "Zeta", 1),
            post("B", "Alpha", 2),
            post("C", "Zeta", 3),
            post("D", "Mid", 4),
        ];
        let groups = group_by_author(&posts, |sum: i64, p| sum + p.likes);
        let authors: Vec<&str> = groups.iter().map(|(a, _)| *a).collect();
        assert_eq!(authors, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(groups[0].1, 4);
    }
}
