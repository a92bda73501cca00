//! Navigation link computation for paginated collections.
//!
//! The requested offset is caller-controlled and may lie anywhere, including
//! past the end of the result set. All arithmetic is done in `i128` so that
//! no combination of offset, limit and total can overflow.

use crate::paging::{Page, PageLimits};
use crate::params;
use crate::sticky::StickyFragments;

use serde::{Deserialize, Serialize};

/// A range of the collection addressed by one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// The four navigation windows relative to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindows {
    pub first: PageWindow,
    pub prev: Option<PageWindow>,
    pub next: Option<PageWindow>,
    pub last: PageWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkCalculator {
    limits: PageLimits,
}

impl LinkCalculator {
    pub fn new(limits: PageLimits) -> Self {
        Self { limits }
    }

    /// Compute the windows for `page` given the number of records returned
    /// for it and the total size of the collection.
    ///
    /// Sizes follow the usual formulas (`first` is `offset mod limit` long)
    /// with one departure: a computed size of zero or less becomes `limit`
    /// instead of `0`. That is the case for `first` when `offset` is a
    /// non-zero multiple of `limit`, and for a `prev`/`last` window clipped
    /// to nothing at the start of the collection. Every returned window
    /// therefore normalizes back to itself.
    pub fn windows(&self, result_len: usize, page: &Page, total_count: u64) -> PageWindows {
        let offset = i128::from(page.offset());
        let limit = i128::from(page.limit());
        let count = i128::from(total_count);
        let result_len = result_len as i128;

        let prev = (offset > 0 && count > 0).then(|| {
            let start = if offset <= count {
                offset - limit
            } else {
                offset - ((offset - count) / limit + 1) * limit
            };
            self.window(start, limit, limit)
        });

        let next_start = offset + result_len;
        let next = (next_start < count).then(|| self.window(next_start, limit, limit));

        let first_size = if offset > 0 { offset % limit } else { limit };
        let first = self.window(0, first_size, limit);

        let last_start = if offset < count {
            offset + ((count - offset - 1) / limit) * limit
        } else {
            offset - ((offset - count) / limit + 1) * limit
        };
        let last = self.window(last_start, limit, limit);

        PageWindows {
            first,
            prev,
            next,
            last,
        }
    }

    /// Render the navigation links under `base`, appending `sticky` to each.
    pub fn links(
        &self,
        result_len: usize,
        page: &Page,
        total_count: u64,
        base: &str,
        sticky: &StickyFragments,
    ) -> NavigationLinks {
        let windows = self.windows(result_len, page, total_count);
        let suffix = sticky.query_suffix();
        let render = |w: PageWindow| {
            format!(
                "{base}?{}={}&{}={}{suffix}",
                params::PAGE_OFFSET,
                w.offset,
                params::PAGE_LIMIT,
                w.limit
            )
        };

        NavigationLinks {
            first: Some(render(windows.first)),
            prev: windows.prev.map(render),
            next: windows.next.map(render),
            last: Some(render(windows.last)),
        }
    }

    /// A window starting before zero is cut to start at zero. A window that
    /// ends up empty (aligned `first`, or `last` of an empty collection)
    /// falls back to a full page.
    fn window(&self, start: i128, size: i128, limit: i128) -> PageWindow {
        let (start, size) = if start < 0 {
            (0, size + start)
        } else {
            (start, size)
        };
        let size = if size <= 0 { limit } else { size };
        let max = i128::from(self.limits.max_limit);
        PageWindow {
            offset: u64::try_from(start).unwrap_or(u64::MAX),
            limit: u64::try_from(size.min(max)).unwrap_or(u64::MAX),
        }
    }
}
