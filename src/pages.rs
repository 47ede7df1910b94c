/// One slot in the pagination strip: a real page number or an elided range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

const SHOW_PAGES: u32 = 5;

/// Compute the pages worth showing for `current` out of `total`.
///
/// Short ranges are listed in full. Longer ranges always keep page 1 and the
/// last page visible, with a window of pages around `current` and ellipsis
/// tokens standing in for whatever got elided. The window is widened near
/// either end so the strip never collapses to fewer than four dense pages.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageToken> {
    let mut pages = Vec::new();

    if total <= SHOW_PAGES {
        for p in 1..=total {
            pages.push(PageToken::Page(p));
        }
        return pages;
    }

    pages.push(PageToken::Page(1));

    let mut start = current.saturating_sub(1).max(2);
    let mut end = (current + 1).min(total - 1);

    if current <= 3 {
        end = 4;
    } else if current >= total - 2 {
        start = total - 3;
    }

    if start > 2 {
        pages.push(PageToken::Ellipsis);
    }

    for p in start..=end {
        pages.push(PageToken::Page(p));
    }

    if end < total - 1 {
        pages.push(PageToken::Ellipsis);
    }

    // Always show last page
    pages.push(PageToken::Page(total));

    pages
}

#[cfg(test)]
fn numbers(tokens: &[PageToken]) -> Vec<u32> {
    tokens
        .iter()
        .filter_map(|t| match t {
            PageToken::Page(p) => Some(*p),
            PageToken::Ellipsis => None,
        })
        .collect()
}

#[test]
fn short_ranges_list_every_page() {
    assert_eq!(numbers(&visible_pages(1, 3)), vec![1, 2, 3]);
    assert!(!visible_pages(1, 3).contains(&PageToken::Ellipsis));
    assert_eq!(numbers(&visible_pages(3, 5)), vec![1, 2, 3, 4, 5]);
    assert!(visible_pages(1, 0).is_empty());
}

#[test]
fn early_window_stays_dense() {
    use PageToken::*;
    assert_eq!(
        visible_pages(3, 10),
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
    );
}

#[test]
fn late_window_stays_dense() {
    use PageToken::*;
    assert_eq!(
        visible_pages(8, 10),
        vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
    );
}

#[test]
fn middle_window_elides_both_sides() {
    use PageToken::*;
    assert_eq!(
        visible_pages(50, 100),
        vec![
            Page(1),
            Ellipsis,
            Page(49),
            Page(50),
            Page(51),
            Ellipsis,
            Page(100)
        ]
    );
}

#[test]
fn window_invariants_hold_for_all_small_inputs() {
    for total in 1..=40 {
        for current in 1..=total {
            let tokens = visible_pages(current, total);
            let nums = numbers(&tokens);

            assert!(
                nums.windows(2).all(|w| w[0] < w[1]),
                "pages not strictly increasing for current={current} total={total}"
            );
            assert_eq!(nums.first(), Some(&1));
            assert_eq!(nums.last(), Some(&total));
            assert!(
                nums.contains(&current),
                "current page missing for current={current} total={total}"
            );
            if total <= 5 {
                assert_eq!(nums, (1..=total).collect::<Vec<_>>());
            }
        }
    }
}
