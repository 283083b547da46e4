//! Markdown rendering for model output.
//!
//! Raw HTML in the source is emitted as escaped text and links with
//! non-web schemes are replaced by `#`, so model output cannot inject markup.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Render untrusted markdown to HTML.
#[must_use]
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(input, options).map(neutralize);

    let mut out = String::with_capacity(input.len() + input.len() / 2);
    html::push_html(&mut out, events);
    out
}

fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

/// Relative URLs and `http`, `https`, `mailto` schemes.
fn is_safe_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            matches!(scheme, "http" | "https" | "mailto")
        }
        _ => true,
    }
}
