// src/domain/pagination.rs

use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 12;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Reads the leading integer of `raw` the lenient way: surrounding
/// whitespace and an optional sign are accepted and anything after the
/// digits is ignored, so `"20.5"` is 20 and `"12abc"` is 12. Values too
/// large for `i64` saturate. `None` when there are no leading digits.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    // all digits, so the parse can only fail on overflow
    let value: i64 = rest[..digits].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// What the caller asked for. Values are taken as-is and clamped by
/// [`paginate`] / [`compute_meta`], so nothing here can be "invalid".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Reads `page` and `limit` from decoded query parameters.
    /// Values without leading digits fall back to the defaults.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let read = |key: &str, default: i64| {
            params
                .get(key)
                .and_then(|v| parse_int_prefix(v))
                .unwrap_or(default)
        };

        Self {
            page: read("page", DEFAULT_PAGE),
            limit: read("limit", DEFAULT_LIMIT),
        }
        .clamped()
    }

    /// page >= 1, limit in [1, MAX_LIMIT].
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }
}

/// Navigation metadata for one page of a sequence.
///
/// `start_index` is 1-based and `end_index` is the exclusive 0-based end,
/// which reads as an inclusive 1-based bound: "showing 21 - 25 of 25".
/// An empty sequence still reports `current_page == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub start_index: usize,
    pub end_index: usize,
}

impl PageMeta {
    /// Metadata reported when there is no data at all. Unlike
    /// `compute_meta(.., 0)` both indices are zero.
    pub fn empty(limit: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            items_per_page: limit,
            has_next_page: false,
            has_prev_page: false,
            next_page: None,
            prev_page: None,
            start_index: 0,
            end_index: 0,
        }
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
    pub items_on_current_page: usize,
}

/// Computes page metadata for `total` items without touching any data.
pub fn compute_meta(request: PageRequest, total: usize) -> PageMeta {
    let PageRequest { page, limit } = request.clamped();
    let page = page as usize;
    let limit = limit as usize;

    let total_pages = total.div_ceil(limit);
    let current_page = page.min(total_pages.max(1));

    let start = (current_page - 1) * limit;
    let end = (start + limit).min(total);

    let has_next_page = current_page < total_pages;
    let has_prev_page = current_page > 1;

    PageMeta {
        current_page,
        total_pages,
        total_items: total,
        items_per_page: limit,
        has_next_page,
        has_prev_page,
        next_page: has_next_page.then(|| current_page + 1),
        prev_page: has_prev_page.then(|| current_page - 1),
        start_index: start + 1,
        end_index: end,
    }
}

/// Slices `items` to the requested page.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let meta = compute_meta(request, items.len());
    let slice = &items[meta.start_index - 1..meta.end_index];

    Page {
        items: slice.to_vec(),
        items_on_current_page: slice.len(),
        meta,
    }
}

/// An entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Number(n) => serializer.serialize_u64(*n as u64),
            PageLink::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page numbers to show around `current`: always the first and last page,
/// a window of roughly `max_visible` pages, and an ellipsis for each gap.
pub fn page_numbers(current: usize, total_pages: usize, max_visible: usize) -> Vec<PageLink> {
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageLink::Number).collect();
    }

    // i64 keeps the window arithmetic honest when `current` sits near 0.
    let current = current as i64;
    let total = total_pages as i64;
    let visible = max_visible as i64;
    let half = visible / 2;

    let mut start = (current - half).max(2);
    let mut end = (current + half).min(total - 1);

    if current <= half + 1 {
        end = (visible - 1).min(total - 1);
    }
    if current >= total - half {
        start = (total - visible + 2).max(2);
    }

    let mut pages = vec![PageLink::Number(1)];
    if start > 2 {
        pages.push(PageLink::Ellipsis);
    }
    pages.extend((start..=end).map(|n| PageLink::Number(n as usize)));
    if end < total - 1 {
        pages.push(PageLink::Ellipsis);
    }
    if total > 1 {
        pages.push(PageLink::Number(total_pages));
    }
    pages
}
