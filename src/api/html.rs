//! Minimal HTML scaffolding shared by the service's pages.

use std::borrow::Cow;
use std::fmt::Write;

use super::common::Link;

pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Wrap `body` in a complete page
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

/// Render links as an unordered list
pub fn link_list(links: &[Link]) -> String {
    let mut out = String::from("<ul>\n");
    for link in links {
        let label = link
            .title
            .as_deref()
            .or(link.media_type.as_deref())
            .unwrap_or(&link.href);
        let _ = writeln!(
            out,
            "<li><a href=\"{}\" rel=\"{}\">{}</a></li>",
            escape(&link.href),
            escape(&link.rel),
            escape(label)
        );
    }
    out.push_str("</ul>\n");
    out
}
