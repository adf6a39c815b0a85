//! Blog listing selection.

use crate::domain::entities::BlogMetadata;

/// Return at most `limit` posts, most recent first.
///
/// The sort is stable, so posts sharing a publish date keep their input
/// order. Dates are already typed at this point; malformed front matter is
/// rejected when metadata is loaded, never silently mis-sorted here.
pub fn top_recent(blogs: &[BlogMetadata], limit: usize) -> Vec<BlogMetadata> {
    let mut sorted = blogs.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn blog(slug: &str, date: time::Date) -> BlogMetadata {
        BlogMetadata {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: None,
            date,
        }
    }

    #[test]
    fn selects_most_recent_posts_in_descending_order() {
        let blogs = vec![
            blog("a", date!(2021 - 01 - 01)),
            blog("b", date!(2023 - 05 - 05)),
            blog("c", date!(2022 - 07 - 07)),
        ];

        let recent = top_recent(&blogs, 2);
        let slugs: Vec<&str> = recent.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let blogs = vec![
            blog("first", date!(2022 - 03 - 03)),
            blog("second", date!(2022 - 03 - 03)),
            blog("older", date!(2021 - 01 - 01)),
        ];

        let recent = top_recent(&blogs, 3);
        let slugs: Vec<&str> = recent.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "older"]);
    }

    #[test]
    fn limit_larger_than_input_returns_everything() {
        let blogs = vec![blog("only", date!(2020 - 06 - 15))];
        assert_eq!(top_recent(&blogs, 10).len(), 1);
        assert!(top_recent(&[], 4).is_empty());
    }
}
