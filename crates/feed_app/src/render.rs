use std::fmt::Write;

use feed_core::{ContentViewModel, FetchResult, Term, TermFilter};
use feed_engine::{project_item, DEFAULT_EXCERPT_CHARS};

/// Renders the view as plain text for the terminal.
pub fn render(view: &ContentViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", view.title);
    if !view.subtitle.trim().is_empty() {
        let _ = writeln!(out, "{}", view.subtitle);
    }

    if view.show_filters {
        let _ = writeln!(out, "{}", filter_line(view));
        if view.post_facets_enabled {
            let _ = writeln!(out, "Categories: {}", term_list(&view.categories));
            let _ = writeln!(out, "Tags: {}", term_list(&view.tags));
        }
    }
    out.push('\n');

    match &view.result {
        FetchResult::Idle => {}
        FetchResult::Loading => out.push_str("Loading…\n"),
        FetchResult::Failure { message } => {
            let _ = writeln!(out, "Error: {message}");
            out.push_str("Rerun to retry.\n");
        }
        FetchResult::Success { items, .. } if items.is_empty() => {
            out.push_str("No content found.\n");
        }
        FetchResult::Success { items, .. } => {
            let offset =
                u64::from(view.current_page.saturating_sub(1)) * u64::from(view.page_size);
            for (number, item) in (offset + 1..).zip(items) {
                let summary = project_item(item, DEFAULT_EXCERPT_CHARS);
                let date = summary
                    .published
                    .map(|at| format!("  [{}]", at.format("%Y-%m-%d")))
                    .unwrap_or_default();
                let _ = writeln!(out, "{:>3}. {}{}", number, summary.title, date);
                if !summary.excerpt.is_empty() {
                    let _ = writeln!(out, "     {}", summary.excerpt);
                }
                if let Some(link) = summary.link {
                    let _ = writeln!(out, "     {link}");
                }
            }
        }
    }

    if view.refreshing {
        out.push_str("(refreshing…)\n");
    }
    if matches!(view.result, FetchResult::Success { .. }) {
        let _ = writeln!(out, "\n{}", pagination_line(view));
    }
    out
}

fn filter_line(view: &ContentViewModel) -> String {
    let filters = &view.filters;
    let mut parts = vec![format!("type={}", filters.content_type)];
    if view.post_facets_enabled {
        parts.push(format!("category={}", term_label(filters.category, &view.categories)));
        parts.push(format!("tag={}", term_label(filters.tag, &view.tags)));
        if let Some(query) = filters.search_query() {
            parts.push(format!("search=\"{query}\""));
        }
        parts.push(format!("date={}", filters.date_window));
    }
    if let Some(endpoint) = filters.active_custom_endpoint() {
        parts.push(format!("endpoint={endpoint}"));
    }
    format!("Filters: {}", parts.join(" "))
}

fn term_label(filter: TermFilter, terms: &[Term]) -> String {
    match filter {
        TermFilter::All => "all".to_string(),
        TermFilter::Only(id) => terms
            .iter()
            .find(|term| term.id == id)
            .map(|term| term.name.clone())
            .unwrap_or_else(|| id.to_string()),
    }
}

fn term_list(terms: &[Term]) -> String {
    if terms.is_empty() {
        return "-".to_string();
    }
    terms
        .iter()
        .map(|term| format!("{} ({})", term.name, term.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn pagination_line(view: &ContentViewModel) -> String {
    let links = view
        .page_window
        .iter()
        .map(|page| {
            if *page == view.current_page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("Page {} of {}: {}", view.current_page, view.total_pages, links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use feed_core::{ContentItem, FilterState, Post, RichText};
    use pretty_assertions::assert_eq;

    fn view(result: FetchResult<ContentItem>) -> ContentViewModel {
        ContentViewModel {
            title: "Company news".to_string(),
            subtitle: String::new(),
            show_filters: true,
            post_facets_enabled: true,
            base_url: "https://news.example.com".to_string(),
            filters: FilterState {
                category: TermFilter::Only(5),
                ..FilterState::default()
            },
            categories: vec![Term {
                id: 5,
                name: "Roofing".to_string(),
                slug: "roofing".to_string(),
                count: 12,
            }],
            tags: Vec::new(),
            result,
            refreshing: false,
            current_page: 2,
            total_pages: 7,
            page_size: 10,
            page_window: vec![1, 2, 3, 4, 5],
            auto_refresh_ms: 0,
            dirty: true,
        }
    }

    fn post() -> ContentItem {
        ContentItem::Post(Post {
            id: 1,
            title: RichText::new("Storm &amp; hail"),
            excerpt: RichText::new("<p>Get your <b>roof</b> ready</p>"),
            body: RichText::default(),
            published_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            link: "https://news.example.com/storm".to_string(),
            featured_media: None,
            categories: vec![5],
            tags: Vec::new(),
            author: None,
        })
    }

    #[test]
    fn renders_items_filters_and_pagination() {
        let text = render(&view(FetchResult::Success {
            items: vec![post()],
            total_pages: 7,
        }));

        assert_eq!(
            text,
            "== Company news ==\n\
             Filters: type=posts category=Roofing tag=all date=all\n\
             Categories: Roofing (12)\n\
             Tags: -\n\
             \n \
             11. Storm & hail  [2024-05-01]\n     \
             Get your roof ready\n     \
             https://news.example.com/storm\n\
             \n\
             Page 2 of 7: 1 [2] 3 4 5\n"
        );
    }

    #[test]
    fn numbering_survives_large_page_offsets() {
        let mut model = view(FetchResult::Success {
            items: vec![post()],
            total_pages: 5_000_000,
        });
        model.current_page = 5_000_000;
        model.total_pages = 5_000_000;
        model.page_size = 1_000;
        let text = render(&model);
        assert!(text.contains("4999999001. Storm & hail"), "{text}");
    }

    #[test]
    fn failure_is_shown_without_items() {
        let text = render(&view(FetchResult::Failure {
            message: "http status 500: request failed".to_string(),
        }));
        assert!(text.contains("Error: http status 500: request failed"));
        assert!(!text.contains("Storm"));
    }

    #[test]
    fn hidden_filters_are_not_rendered() {
        let mut model = view(FetchResult::Loading);
        model.show_filters = false;
        let text = render(&model);
        assert!(!text.contains("Filters:"));
        assert!(text.contains("Loading…"));
    }
}
