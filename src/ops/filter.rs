use crate::model::post::Post;

/// Date sort direction for the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// Canonical sort key for a post date: the trimmed string's first ten
/// characters. Posts with no date key as "0000-00-00", so they land last
/// under Newest and first under Oldest. Zero-padded ISO dates make plain
/// lexicographic comparison order correctly.
fn date_key(date: &str) -> String {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return "0000-00-00".to_string();
    }
    trimmed.chars().take(10).collect()
}

/// Select and order the post list for display.
///
/// A post is selected when its title contains the trimmed search term
/// case-insensitively (an empty term matches everything) AND it carries at
/// least one active tag (an empty active set matches everything). The
/// surviving indices are stably sorted by canonical date key, so posts
/// sharing a date keep their original relative order.
pub fn select_and_order(
    posts: &[Post],
    search_term: &str,
    active_tags: &[String],
    order: SortOrder,
) -> Vec<usize> {
    let term = search_term.trim().to_lowercase();

    let mut selected: Vec<usize> = posts
        .iter()
        .enumerate()
        .filter(|(_, post)| {
            let title_ok = term.is_empty() || post.title.to_lowercase().contains(&term);
            let tags_ok =
                active_tags.is_empty() || post.tags.iter().any(|t| active_tags.contains(t));
            title_ok && tags_ok
        })
        .map(|(i, _)| i)
        .collect();

    selected.sort_by(|&a, &b| {
        let key_a = date_key(&posts[a].date);
        let key_b = date_key(&posts[b].date);
        match order {
            SortOrder::Newest => key_b.cmp(&key_a),
            SortOrder::Oldest => key_a.cmp(&key_b),
        }
    });

    selected
}

// ---------------------------------------------------------------------------
// Cached selection
// ---------------------------------------------------------------------------

/// Memoized wrapper around `select_and_order`.
///
/// The ordering is recomputed only when one of the four inputs changes:
/// search term, active tag set, sort direction, or the post repository's
/// revision counter. Repeated renders with unchanged inputs are free.
#[derive(Debug, Default)]
pub struct SelectionCache {
    key: Option<CacheKey>,
    ordering: Vec<usize>,
    recomputes: u64,
}

#[derive(Debug, PartialEq, Eq)]
struct CacheKey {
    term: String,
    active_tags: Vec<String>,
    order: SortOrder,
    revision: u64,
}

impl SelectionCache {
    pub fn new() -> Self {
        SelectionCache::default()
    }

    /// The display ordering for the given inputs, recomputing only on change.
    /// `revision` must come from the repository that owns `posts`.
    pub fn select(
        &mut self,
        posts: &[Post],
        revision: u64,
        search_term: &str,
        active_tags: &[String],
        order: SortOrder,
    ) -> &[usize] {
        let key = CacheKey {
            term: search_term.to_string(),
            active_tags: active_tags.to_vec(),
            order,
            revision,
        };
        if self.key.as_ref() != Some(&key) {
            self.ordering = select_and_order(posts, search_term, active_tags, order);
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.ordering
    }
}

// ---------------------------------------------------------------------------
// Match highlighting
// ---------------------------------------------------------------------------

/// A display string split around the first case-insensitive occurrence of a
/// search term, original casing preserved in every segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSplit {
    pub prefix: String,
    pub matched: String,
    pub suffix: String,
}

impl TitleSplit {
    fn unmatched(total: &str) -> Self {
        TitleSplit {
            prefix: total.to_string(),
            matched: String::new(),
            suffix: String::new(),
        }
    }
}

/// Split `total` for highlighting: an empty term puts the whole string in
/// the suffix, a term with no occurrence puts it all in the prefix, and a
/// hit splits around the first case-insensitive occurrence.
pub fn split_by_substring(total: &str, term: &str) -> TitleSplit {
    if term.is_empty() {
        return TitleSplit {
            prefix: String::new(),
            matched: String::new(),
            suffix: total.to_string(),
        };
    }

    let hay = total.to_lowercase();
    let needle = term.to_lowercase();

    // Byte offsets found in the lowercased haystack only map back onto the
    // original when lowercasing preserved byte lengths and boundaries.
    let usable = hay.len() == total.len();
    let hit = if usable { hay.find(&needle) } else { total.find(term) };

    match hit {
        Some(i) => {
            let j = i + needle.len();
            if !total.is_char_boundary(i) || !total.is_char_boundary(j) {
                return TitleSplit::unmatched(total);
            }
            TitleSplit {
                prefix: total[..i].to_string(),
                matched: total[i..j].to_string(),
                suffix: total[j..].to_string(),
            }
        }
        None => TitleSplit::unmatched(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, date: &str, tags: &[&str]) -> Post {
        Post {
            title: title.to_string(),
            date: date.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            body: Vec::new(),
        }
    }

    fn sample_posts() -> Vec<Post> {
        vec![
            post("Alpha", "2023-01-01", &["x"]),
            post("Beta", "2024-06-01", &["y"]),
        ]
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    // --- Selection ---

    #[test]
    fn no_filters_newest_orders_by_date_descending() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "", &[], SortOrder::Newest);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn no_filters_oldest_orders_by_date_ascending() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "", &[], SortOrder::Oldest);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn no_filters_returns_every_index() {
        let posts = vec![
            post("a", "2020-01-01", &[]),
            post("b", "2021-01-01", &[]),
            post("c", "2019-01-01", &[]),
        ];
        let mut order = select_and_order(&posts, "", &[], SortOrder::Newest);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn search_term_matches_titles_case_insensitively() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "alp", &[], SortOrder::Newest);
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn search_term_is_trimmed_before_matching() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "  beta  ", &[], SortOrder::Newest);
        assert_eq!(order, vec![1]);
    }

    #[test]
    fn active_tags_filter_with_or_semantics() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "", &tags(&["y"]), SortOrder::Newest);
        assert_eq!(order, vec![1]);

        // Either tag is enough.
        let order = select_and_order(&posts, "", &tags(&["x", "y"]), SortOrder::Newest);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn title_and_tag_filters_combine_with_and() {
        let posts = sample_posts();
        let order = select_and_order(&posts, "alp", &tags(&["y"]), SortOrder::Newest);
        assert!(order.is_empty());
    }

    #[test]
    fn equal_dates_keep_original_relative_order() {
        let posts = vec![
            post("first", "2024-01-01", &[]),
            post("second", "2024-01-01", &[]),
            post("third", "2024-01-01", &[]),
        ];
        assert_eq!(
            select_and_order(&posts, "", &[], SortOrder::Newest),
            vec![0, 1, 2]
        );
        assert_eq!(
            select_and_order(&posts, "", &[], SortOrder::Oldest),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn missing_date_sorts_last_under_newest() {
        let posts = vec![
            post("undated", "", &[]),
            post("dated", "2020-05-05", &[]),
        ];
        assert_eq!(
            select_and_order(&posts, "", &[], SortOrder::Newest),
            vec![1, 0]
        );
        assert_eq!(
            select_and_order(&posts, "", &[], SortOrder::Oldest),
            vec![0, 1]
        );
    }

    #[test]
    fn date_key_trims_and_truncates_timestamps() {
        let posts = vec![
            post("stamped", "  2022-03-04T12:00:00Z ", &[]),
            post("plain", "2022-03-05", &[]),
        ];
        assert_eq!(
            select_and_order(&posts, "", &[], SortOrder::Newest),
            vec![1, 0]
        );
    }

    // --- Cache ---

    #[test]
    fn cache_recomputes_only_when_an_input_changes() {
        let posts = sample_posts();
        let mut cache = SelectionCache::new();

        cache.select(&posts, 0, "", &[], SortOrder::Newest);
        cache.select(&posts, 0, "", &[], SortOrder::Newest);
        assert_eq!(cache.recomputes, 1);

        // Each changed input triggers exactly one recompute.
        cache.select(&posts, 0, "alp", &[], SortOrder::Newest);
        assert_eq!(cache.recomputes, 2);
        cache.select(&posts, 0, "alp", &tags(&["x"]), SortOrder::Newest);
        assert_eq!(cache.recomputes, 3);
        cache.select(&posts, 0, "alp", &tags(&["x"]), SortOrder::Oldest);
        assert_eq!(cache.recomputes, 4);
        cache.select(&posts, 1, "alp", &tags(&["x"]), SortOrder::Oldest);
        assert_eq!(cache.recomputes, 5);

        // And unchanged inputs stay cached after all that.
        let order = cache.select(&posts, 1, "alp", &tags(&["x"]), SortOrder::Oldest);
        assert_eq!(order, &[0]);
        assert_eq!(cache.recomputes, 5);
    }

    // --- Highlight splitting ---

    #[test]
    fn split_empty_term_is_all_suffix() {
        let split = split_by_substring("Hello World", "");
        assert_eq!(split.prefix, "");
        assert_eq!(split.matched, "");
        assert_eq!(split.suffix, "Hello World");
    }

    #[test]
    fn split_no_occurrence_is_all_prefix() {
        let split = split_by_substring("Hello World", "xyz");
        assert_eq!(split.prefix, "Hello World");
        assert_eq!(split.matched, "");
        assert_eq!(split.suffix, "");
    }

    #[test]
    fn split_matches_case_insensitively_preserving_casing() {
        let split = split_by_substring("Hello World", "wor");
        assert_eq!(split.prefix, "Hello ");
        assert_eq!(split.matched, "Wor");
        assert_eq!(split.suffix, "ld");
    }

    #[test]
    fn split_uses_the_first_occurrence_only() {
        let split = split_by_substring("abcabc", "b");
        assert_eq!(split.prefix, "a");
        assert_eq!(split.matched, "b");
        assert_eq!(split.suffix, "cabc");
    }

    #[test]
    fn split_whole_string_match() {
        let split = split_by_substring("Rust", "rust");
        assert_eq!(split.prefix, "");
        assert_eq!(split.matched, "Rust");
        assert_eq!(split.suffix, "");
    }
}
