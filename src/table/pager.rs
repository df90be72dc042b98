use std::fmt;

/// Up to this many pages are listed without ellipses.
const MAX_PAGES_SHOWN: u32 = 5;

/// One entry of the pager control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(u32),
    EllipsisStart,
    EllipsisEnd,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(n) => write!(f, "{n}"),
            PageLabel::EllipsisStart | PageLabel::EllipsisEnd => f.write_str("…"),
        }
    }
}

/// Page labels for a pager positioned at `current_page` out of `total_pages`.
///
/// Short ranges are listed in full. Longer ones always show the first and last
/// page around a three-page window on the current one, with an ellipsis on each
/// side where pages are skipped.
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageLabel> {
    if total_pages <= MAX_PAGES_SHOWN {
        return (1..=total_pages).map(PageLabel::Page).collect();
    }

    // Signed so a stray current page (0, or past the end) cannot underflow.
    let current = i64::from(current_page);
    let total = i64::from(total_pages);

    let mut start = (current - 1).max(2);
    let mut end = (current + 1).min(total - 1);
    if current <= 2 {
        end = 4;
    } else if current >= total - 1 {
        start = total - 3;
    }

    let mut labels = vec![PageLabel::Page(1)];
    if start > 2 {
        labels.push(PageLabel::EllipsisStart);
    }
    labels.extend((start..=end).map(|p| PageLabel::Page(p as u32)));
    if end < total - 1 {
        labels.push(PageLabel::EllipsisEnd);
    }
    labels.push(PageLabel::Page(total_pages));
    labels
}
