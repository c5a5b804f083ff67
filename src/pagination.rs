use askama_actix::Template;

/// Pages always shown at the start of the window.
const LEFT_EDGE: i32 = 2;
/// Pages shown before the current page.
const LEFT_CURRENT: i32 = 2;
/// Pages shown after the current page.
const RIGHT_CURRENT: i32 = 4;
/// Pages always shown at the end of the window.
const RIGHT_EDGE: i32 = 2;

/// Page metadata for a listing.
///
/// 1 2 [3] 4 5 6 7 ... 19 20
/// 1 2 ... 8 9 [10] 11 12 13 14 ... 19 20
/// 1 2 ... 14 15 [16] 17 18 19 20
#[derive(Clone, Debug)]
pub struct Pagination {
    /// Link target without the page number, e.g. `/topic/4`.
    pub base_url: String,
    pub page: i32,
    pub per_page: i32,
    pub total_items: i32,
    pub total_pages: i32,
}

/// A single entry of the page window as the template sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub number: i32,
    pub url: String,
    pub current: bool,
    pub gap: bool,
}

#[derive(Template)]
#[template(path = "util/paginator.html")]
struct PaginatorTemplate<'a> {
    pagination: &'a Pagination,
    links: Vec<PageLink>,
}

impl Pagination {
    pub fn new(base_url: impl Into<String>, page: i32, per_page: i32, total_items: i32) -> Self {
        let total_pages = if total_items <= 0 {
            0
        } else {
            (total_items + per_page - 1) / per_page
        };

        Self {
            base_url: base_url.into(),
            page,
            per_page,
            total_items: total_items.max(0),
            total_pages,
        }
    }

    /// Page 1 of an empty list exists; every other page must be within bounds.
    pub fn is_valid_page(page: i32, total_pages: i32) -> bool {
        page >= 1 && (page == 1 || page <= total_pages)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_num(&self) -> Option<i32> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next_num(&self) -> Option<i32> {
        self.has_next().then(|| self.page + 1)
    }

    /// Zero-based page index for the store.
    pub fn page_index(&self) -> usize {
        (self.page.max(1) - 1) as usize
    }

    pub fn has_pages(&self) -> bool {
        self.total_pages > 1
    }

    /// Page numbers to display. None marks a gap between non-contiguous ranges.
    pub fn window(&self) -> Vec<Option<i32>> {
        let mut window = Vec::new();
        let pages_end = self.total_pages + 1;

        if pages_end <= 1 {
            return window;
        }

        let left_end = (1 + LEFT_EDGE).min(pages_end);
        window.extend((1..left_end).map(Some));

        if left_end == pages_end {
            return window;
        }

        let mid_start = left_end.max(self.page - LEFT_CURRENT);
        let mid_end = (self.page + RIGHT_CURRENT + 1).min(pages_end);

        if mid_start > left_end {
            window.push(None);
        }
        window.extend((mid_start..mid_end).map(Some));

        if mid_end >= pages_end {
            return window;
        }

        let right_start = mid_end.max(pages_end - RIGHT_EDGE);

        if right_start > mid_end {
            window.push(None);
        }
        window.extend((right_start..pages_end).map(Some));

        window
    }

    pub fn url_for(&self, page: i32) -> String {
        format!("{}/{}", self.base_url, page)
    }

    pub fn links(&self) -> Vec<PageLink> {
        self.window()
            .into_iter()
            .map(|entry| match entry {
                Some(number) => PageLink {
                    number,
                    url: self.url_for(number),
                    current: number == self.page,
                    gap: false,
                },
                None => PageLink {
                    number: 0,
                    url: String::new(),
                    current: false,
                    gap: true,
                },
            })
            .collect()
    }

    pub fn prev_url(&self) -> String {
        self.prev_num().map(|n| self.url_for(n)).unwrap_or_default()
    }

    pub fn next_url(&self) -> String {
        self.next_num().map(|n| self.url_for(n)).unwrap_or_default()
    }

    pub fn as_html(&self) -> String {
        if !self.has_pages() {
            return String::new();
        }

        let template = PaginatorTemplate {
            pagination: self,
            links: self.links(),
        };
        match template.render() {
            Ok(html) => html,
            Err(e) => {
                log::error!("Pagination::as_html: {}", e);
                "[Paginator Util Error]".to_owned()
            }
        }
    }
}
