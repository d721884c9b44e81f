//! HTML rendering of the transcript and the overlay.
//!
//! Only bot text is treated as markdown. User text and everything that
//! comes from citations is escaped and shown literally.

use std::fmt::Write as _;
use std::iter;

use citechat_core::{
    ChatStrings, MessageEntry, OverlayState, Role, TranscriptStore,
};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Renders markdown to HTML that is safe to insert into the page.
///
/// Raw HTML in the input is escaped rather than passed through, and
/// script links are replaced with `#`.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(sanitize);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|s| scheme.starts_with(s))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, iter::once(Event::Text(text.into())));
    out
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// Renders every entry of the transcript, in order.
pub fn transcript_html(
    transcript: &TranscriptStore,
    strings: &ChatStrings,
) -> String {
    let mut out = String::new();
    for entry in transcript {
        render_entry(&mut out, entry, strings);
    }
    out
}

fn render_entry(out: &mut String, entry: &MessageEntry, strings: &ChatStrings) {
    let id = entry.handle();
    match entry.role() {
        Role::User => {
            let _ = write!(
                out,
                "<div class=\"message user-message\" id=\"{id}\">\
                 <div class=\"avatar\">👤</div>\
                 <div class=\"bubble\">{}</div></div>",
                escape_text(entry.text())
            );
        }
        Role::Placeholder => {
            let _ = write!(
                out,
                "<div class=\"message bot-message\" id=\"{id}\">\
                 <div class=\"avatar\">🤖</div>\
                 <div class=\"bubble thinking\">{}</div></div>",
                escape_text(entry.text())
            );
        }
        Role::Bot => {
            let _ = write!(
                out,
                "<div class=\"message bot-message\" id=\"{id}\">\
                 <div class=\"avatar\">🤖</div>\
                 <div class=\"bubble\">{}",
                markdown_to_html(entry.text())
            );
            if !entry.citations().is_empty() {
                let _ = write!(
                    out,
                    "<div class=\"sources-container\">\
                     <p class=\"sources-title\">{}</p>",
                    escape_text(&strings.sources_title)
                );
                for (idx, citation) in entry.citations().iter().enumerate() {
                    let _ = write!(
                        out,
                        "<a class=\"source-chip\" href=\"#\" \
                         data-entry=\"{id}\" data-index=\"{idx}\">{}</a>",
                        escape_text(&citation.label)
                    );
                }
                out.push_str("</div>");
            }
            out.push_str("</div></div>");
        }
    }
}

/// Renders the overlay, or nothing if it is hidden.
pub fn overlay_html(overlay: &OverlayState) -> String {
    if !overlay.visible {
        return String::new();
    }
    format!(
        "<div id=\"source-modal\" class=\"modal active\">\
         <div class=\"modal-content\">\
         <h3 id=\"modal-title\">{}</h3>\
         <p id=\"modal-text\">{}</p>\
         <a id=\"modal-open-pdf\" href=\"{}\" target=\"_blank\">📄</a>\
         </div></div>",
        escape_text(&overlay.title),
        escape_text(&overlay.body),
        escape_attr(&overlay.external_link),
    )
}
