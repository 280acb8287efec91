//! Fixed-size page slicing over ordered question lists.
//!
//! # Invariants
//! - Page numbers are 1-based.
//! - Consecutive pages never overlap and together cover the input once.
//! - Out-of-range pages yield an empty slice, never a panic.

use crate::model::question::Question;

/// Default page size when configuration does not override it.
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// Returns the `page`-th slice of `page_size` items.
///
/// Page `0` and page size `0` both produce an empty page.
pub fn paginate(page: u32, page_size: u32, items: &[Question]) -> Vec<Question> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }

    let size = page_size as usize;
    let start = ((page - 1) as usize).saturating_mul(size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(size).min(items.len());

    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::{paginate, QUESTIONS_PER_PAGE};
    use crate::model::question::{NewQuestion, Question};

    fn bank(len: i64) -> Vec<Question> {
        (1..=len)
            .map(|id| NewQuestion::new(format!("q{id}"), "a", 1, 1).into_question(id))
            .collect()
    }

    #[test]
    fn page_length_follows_formula() {
        for len in 0..=25_i64 {
            let items = bank(len);
            for page in 1..=4_u32 {
                let expected = (len - i64::from(page - 1) * i64::from(QUESTIONS_PER_PAGE))
                    .clamp(0, i64::from(QUESTIONS_PER_PAGE));
                let got = paginate(page, QUESTIONS_PER_PAGE, &items);
                assert_eq!(got.len() as i64, expected, "len={len} page={page}");
            }
        }
    }

    #[test]
    fn consecutive_pages_cover_items_exactly_once() {
        let items = bank(23);
        let mut seen = Vec::new();
        for page in 1..=3 {
            seen.extend(paginate(page, QUESTIONS_PER_PAGE, &items).into_iter().map(|q| q.id));
        }
        assert_eq!(seen, (1..=23).collect::<Vec<_>>());
        assert!(paginate(4, QUESTIONS_PER_PAGE, &items).is_empty());
    }

    #[test]
    fn second_page_of_twelve_has_two_items() {
        let page = paginate(2, 10, &bank(12));
        assert_eq!(page.iter().map(|q| q.id).collect::<Vec<_>>(), vec![11, 12]);
    }

    #[test]
    fn degenerate_inputs_yield_empty_pages() {
        let items = bank(5);
        assert!(paginate(0, 10, &items).is_empty());
        assert!(paginate(1, 0, &items).is_empty());
        assert!(paginate(u32::MAX, u32::MAX, &items).is_empty());
    }
}
