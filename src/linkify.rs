use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RenderMode;

// Full-width punctuation and brackets end a URL outright: Japanese text
// puts them directly after a link with no space in between.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<>"'()。、．，！？；：「」『』（）【】〈〉《》]+"#)
        .expect("URL pattern is valid")
});

/// Sentence punctuation that is left outside the link when it ends a match.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Strips tags and decodes the entities [`escape_html`] produces, for
/// surfaces that cannot display markup.
pub fn markup_to_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn anchor(url: &str) -> String {
    format!("<a href=\"{0}\" target=\"_blank\" rel=\"noopener noreferrer\">{0}</a>", url)
}

/// Turns every http(s) URL in `text` into an anchor that opens in a new
/// browsing context without an opener handle.
///
/// In [`RenderMode::Markup`] the surrounding text is passed through untouched,
/// so any markup it contains renders live. In [`RenderMode::EscapedText`] the
/// surrounding text and the URLs are escaped and only the generated anchors are
/// trusted.
///
/// Apply once, to raw text. Running it over its own output rewrites the `href`
/// values of the anchors it produced.
pub fn linkify(text: &str, mode: RenderMode) -> String {
    let plain = |s: &str| match mode {
        RenderMode::Markup => s.to_string(),
        RenderMode::EscapedText => escape_html(s),
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in URL_RE.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        // "http://" followed only by punctuation is not a link.
        if url.len() <= url.find("://").map(|i| i + 3).unwrap_or(0) {
            continue;
        }
        let end = m.start() + url.len();

        out.push_str(&plain(&text[last..m.start()]));
        out.push_str(&anchor(&plain(url)));
        last = end;
    }
    out.push_str(&plain(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_anchors(s: &str) -> usize {
        s.matches("<a ").count()
    }

    #[test]
    fn trailing_period_stays_outside_link() {
        let out = linkify("Hi there https://example.com end.", RenderMode::Markup);
        assert_eq!(
            out,
            "Hi there <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com</a> end."
        );

        let out = linkify("Go to https://example.com/docs.", RenderMode::Markup);
        assert!(out.contains("href=\"https://example.com/docs\""));
        assert!(out.ends_with("</a>."));
    }

    #[test]
    fn single_application_yields_one_anchor() {
        let out = linkify("see http://a.b", RenderMode::Markup);
        assert_eq!(count_anchors(&out), 1);
        assert!(out.starts_with("see <a href=\"http://a.b\""));
    }

    #[test]
    fn stops_at_brackets_and_quotes() {
        let out = linkify("(https://x.io/a) and 'http://y.io'", RenderMode::Markup);
        assert!(out.contains("href=\"https://x.io/a\""));
        assert!(out.contains("href=\"http://y.io\""));
        assert!(out.starts_with("("));
        assert_eq!(count_anchors(&out), 2);
    }

    #[test]
    fn keeps_inner_punctuation() {
        let out = linkify("https://a.io/p?q=1&r=2, ok", RenderMode::Markup);
        assert!(out.contains("href=\"https://a.io/p?q=1&r=2\""));
        assert!(out.ends_with("</a>, ok"));
    }

    #[test]
    fn text_without_urls_is_unchanged_in_markup_mode() {
        let s = "no links here, <b>bold</b> though";
        assert_eq!(linkify(s, RenderMode::Markup), s);
    }

    #[test]
    fn escaped_mode_neutralises_surrounding_markup() {
        let out = linkify("<script>x</script> https://a.io?x=1&y=2", RenderMode::EscapedText);
        assert!(out.starts_with("&lt;script&gt;x&lt;/script&gt; "));
        assert!(out.contains("href=\"https://a.io?x=1&amp;y=2\""));
        assert_eq!(count_anchors(&out), 1);
    }

    #[test]
    fn bare_scheme_is_not_linked() {
        assert_eq!(linkify("http://.", RenderMode::Markup), "http://.");
    }

    #[test]
    fn full_width_punctuation_ends_the_link() {
        let out = linkify("詳しくはhttps://example.com。", RenderMode::Markup);
        assert_eq!(
            out,
            "詳しくは<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com</a>。"
        );

        let out = linkify("see https://example.com/faq、ok", RenderMode::Markup);
        assert!(out.contains("href=\"https://example.com/faq\""));
        assert!(out.ends_with("</a>、ok"));

        let out = linkify("「https://a.io/x」（https://b.io）", RenderMode::EscapedText);
        assert!(out.contains("href=\"https://a.io/x\""));
        assert!(out.contains("href=\"https://b.io\""));
        assert!(out.ends_with("</a>）"));
        assert_eq!(count_anchors(&out), 2);
    }

    #[test]
    fn markup_to_text_recovers_readable_text() {
        let html = linkify("a & b <i> https://a.io?x=1&y=2.", RenderMode::EscapedText);
        assert_eq!(markup_to_text(&html), "a & b <i> https://a.io?x=1&y=2.");
        assert_eq!(markup_to_text("<b>Open</b> 9-5"), "Open 9-5");
    }

    #[test]
    fn non_http_schemes_are_ignored() {
        let s = "ftp://files.example.com";
        assert_eq!(linkify(s, RenderMode::Markup), s);
    }
}
