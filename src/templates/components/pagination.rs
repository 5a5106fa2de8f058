use crate::domain::catalog::ListingQuery;
use crate::domain::pagination::{page_numbers, PageLink, PageMeta, DEFAULT_MAX_VISIBLE};
use maud::{html, Markup};

fn page_href(query: &ListingQuery, page: usize) -> String {
    format!("/used-cars?{}", query.to_query_string(page))
}

/// Prev / numbered / next links. Renders nothing for a single page.
pub fn pagination_nav(meta: &PageMeta, query: &ListingQuery) -> Markup {
    if meta.total_pages <= 1 {
        return html! {};
    }

    let links = page_numbers(meta.current_page, meta.total_pages, DEFAULT_MAX_VISIBLE);

    html! {
        nav class="pagination" aria-label="Pagination" {
            @if let Some(prev) = meta.prev_page {
                a class="page-prev" rel="prev" href=(page_href(query, prev)) { "Previous" }
            }
            @for link in &links {
                @match link {
                    PageLink::Number(n) if *n == meta.current_page => {
                        span class="page-current" aria-current="page" { (n) }
                    }
                    PageLink::Number(n) => {
                        a class="page-number" href=(page_href(query, *n)) { (n) }
                    }
                    PageLink::Ellipsis => {
                        span class="page-ellipsis" { "..." }
                    }
                }
            }
            @if let Some(next) = meta.next_page {
                a class="page-next" rel="next" href=(page_href(query, next)) { "Next" }
            }
        }
    }
}
