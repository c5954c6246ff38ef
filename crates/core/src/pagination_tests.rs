// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    first_page = { 1, 20, 20, 0 },
    third_page = { 3, 20, 20, 40 },
    zero_page = { 0, 20, 20, 0 },
    negative_page = { -4, 10, 10, 0 },
    default_per_page = { 2, 0, 20, 20 },
    capped_per_page = { 1, 500, 100, 0 },
)]
fn pagination_clamps(page: i64, per_page: i64, limit: i64, offset: i64) {
    assert_eq!(Pagination::new(page, per_page), Pagination { limit, offset });
}

proptest::proptest! {
    #[test]
    fn consecutive_pages_tile_without_gaps(page in 1i64..100_000, per_page in -5i64..500) {
        let current = Pagination::new(page, per_page);
        let next = Pagination::new(page + 1, per_page);
        proptest::prop_assert!((1..=MAX_PER_PAGE).contains(&current.limit));
        proptest::prop_assert_eq!(next.limit, current.limit);
        proptest::prop_assert_eq!(next.offset, current.offset + current.limit);
    }
}
