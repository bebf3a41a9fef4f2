//! Trust boundary for author-supplied raw page content.
//!
//! Custom pages carry three channels with three different policies:
//!
//! 1. `html_content` and `custom_head` always pass through an Ammonia
//!    sanitizer with an explicit, auditable allow-list. Embeds are the one
//!    sanctioned escape hatch: `iframe` survives with a constrained
//!    attribute set, nothing script-bearing does.
//! 2. `css_content` is inserted verbatim as a scoped style element. Only
//!    privileged authors can set it; CSS injection is an accepted residual
//!    risk of that authorship model and is not the sanitizer's job.
//! 3. `js_content` is run, not filtered. The emitted element constructs the
//!    script dynamically inside a try/catch harness so a malformed script
//!    reports to the console instead of blanking the page. Upstream write
//!    access control is the real security boundary for this channel.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use ammonia::Builder as AmmoniaBuilder;
use metrics::counter;
use once_cell::sync::Lazy;
use tracing::warn;

pub struct TrustGate {
    body_sanitizer: AmmoniaBuilder<'static>,
    head_sanitizer: AmmoniaBuilder<'static>,
}

static TRUST_GATE: Lazy<Arc<TrustGate>> = Lazy::new(|| Arc::new(TrustGate::new()));

/// Access the shared trust gate, initialised on first use.
pub fn trust_gate() -> Arc<TrustGate> {
    Arc::clone(&TRUST_GATE)
}

impl TrustGate {
    fn new() -> Self {
        Self {
            body_sanitizer: build_body_sanitizer(),
            head_sanitizer: build_head_sanitizer(),
        }
    }

    /// Sanitize the raw HTML channel (`html_content` fallback path).
    pub fn sanitize_html(&self, raw: &str) -> String {
        self.body_sanitizer.clean(raw).to_string()
    }

    /// Sanitize head markup (`custom_head`): metadata and stylesheets
    /// survive, anything executable does not.
    pub fn sanitize_head(&self, raw: &str) -> String {
        self.head_sanitizer.clean(raw).to_string()
    }

    /// Wrap the trusted CSS channel in a scoped style element, verbatim.
    pub fn scoped_style(&self, css: &str) -> String {
        format!("<style data-scope=\"custom-page\">\n{css}\n</style>")
    }

    /// The deliberately-unsanitized script sink.
    ///
    /// The source is embedded as a JSON string and constructed with
    /// `new Function` inside a try/catch, so both syntax and runtime
    /// failures surface as console errors while the rest of the page keeps
    /// rendering. The embedding is `</script>`-safe.
    pub fn script_element(&self, js: &str) -> String {
        let source = match serde_json::to_string(js) {
            Ok(encoded) => encoded.replace("</", "<\\/"),
            Err(err) => {
                warn!(
                    target = "application::trust",
                    error = %err,
                    "Script channel could not be encoded; dropping"
                );
                return String::new();
            }
        };
        counter!("vetrina_script_channel_emitted_total").increment(1);
        format!(
            "<script>(function(){{try{{new Function({source})();}}\
             catch(err){{console.error(\"custom page script failed\",err);}}}})();</script>"
        )
    }
}

fn build_body_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "abbr",
        "article",
        "aside",
        "blockquote",
        "br",
        "button",
        "code",
        "div",
        "em",
        "figcaption",
        "figure",
        "footer",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hr",
        "i",
        "iframe",
        "img",
        "li",
        "main",
        "mark",
        "nav",
        "ol",
        "p",
        "picture",
        "pre",
        "s",
        "section",
        "small",
        "source",
        "span",
        "strong",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from([
        "class",
        "id",
        "title",
        "lang",
        "dir",
        "role",
        "aria-hidden",
        "aria-label",
    ]);
    builder.generic_attributes(generic);

    // The embed escape hatch: iframe survives sanitization with exactly
    // this attribute set, nothing more.
    builder.add_tag_attributes(
        "iframe",
        &[
            "src",
            "allow",
            "allowfullscreen",
            "frameborder",
            "scrolling",
            "target",
            "loading",
            "width",
            "height",
            "title",
        ],
    );
    // Author controls `rel` on anchors directly, so disable Ammonia's
    // automatic `link_rel` injection (which otherwise conflicts with an
    // allow-listed `rel` attribute and is rejected by the builder).
    builder.link_rel(None);
    builder.add_tag_attributes("a", &["target", "rel"]);
    builder.add_tag_attributes(
        "img",
        &["alt", "width", "height", "loading", "decoding", "srcset", "sizes"],
    );
    builder.add_tag_attributes("source", &["srcset", "media", "type"]);
    builder.add_tag_attributes("th", &["align", "colspan", "rowspan", "scope"]);
    builder.add_tag_attributes("td", &["align", "colspan", "rowspan"]);

    // Inline styles survive only after declaration-level filtering.
    builder.add_generic_attributes(&["style"]);
    builder.attribute_filter(|_element, attribute, value| {
        if attribute.eq_ignore_ascii_case("style") {
            sanitize_style_attribute(value).map(Cow::Owned)
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder.add_url_schemes(["http", "https", "mailto", "tel"].iter().copied());

    builder
}

fn build_head_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::empty();

    builder.add_tags(&["meta", "link", "title", "style"]);
    builder.rm_clean_content_tags(&["style"]);
    builder.add_tag_attributes("meta", &["name", "content", "property", "charset"]);
    builder.add_tag_attributes(
        "link",
        &["rel", "href", "type", "media", "sizes", "crossorigin", "as"],
    );
    builder.add_url_schemes(["http", "https"].iter().copied());

    builder
}

fn sanitize_style_attribute(value: &str) -> Option<String> {
    let mut sanitized = Vec::new();

    for declaration in value.split(';') {
        let decl = declaration.trim();
        if decl.is_empty() {
            continue;
        }

        if is_safe_style_declaration(decl) {
            sanitized.push(decl);
        }
    }

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized.join("; "))
    }
}

fn is_safe_style_declaration(decl: &str) -> bool {
    let lower = decl.to_ascii_lowercase();

    const FORBIDDEN_SUBSTRINGS: [&str; 6] = [
        "expression(",
        "javascript:",
        "vbscript:",
        "-moz-binding",
        "behavior:",
        "behaviour:",
    ];

    if FORBIDDEN_SUBSTRINGS
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return false;
    }

    if lower.contains("@import") {
        return false;
    }

    !contains_unsafe_url(&lower)
}

fn contains_unsafe_url(lower_decl: &str) -> bool {
    let mut offset = 0;

    while let Some(start) = lower_decl[offset..].find("url(") {
        let open = offset + start + 4; // skip "url("
        let rest = &lower_decl[open..];
        if let Some(close_rel) = rest.find(')') {
            let close = open + close_rel;
            let target = &lower_decl[open..close];
            let trimmed = target.trim_matches(|c: char| c.is_whitespace() || c == '\'');
            let trimmed = trimmed.trim_matches('"');

            if is_unsafe_url(trimmed) {
                return true;
            }

            offset = close + 1;
        } else {
            // malformed url, treat as unsafe
            return true;
        }
    }

    false
}

fn is_unsafe_url(url: &str) -> bool {
    if url.starts_with("data:image/") {
        return false;
    }

    url.starts_with("javascript:")
        || url.starts_with("vbscript:")
        || url.starts_with("data:")
        || url.starts_with("file:")
        || url.contains("javascript:")
        || url.contains("vbscript:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_stripped_and_conforming_iframes_survive() {
        let gate = TrustGate::new();
        let html = gate.sanitize_html(
            "<script>alert(1)</script><iframe src='x' allow='camera'></iframe>",
        );

        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
        assert!(html.contains("<iframe"));
        assert!(html.contains("allow=\"camera\""));
        assert!(html.contains("src=\"x\""));
    }

    #[test]
    fn iframe_keeps_only_allow_listed_attributes() {
        let gate = TrustGate::new();
        let html = gate.sanitize_html(
            "<iframe src=\"https://example.com/embed\" allowfullscreen loading=\"lazy\" \
             onload=\"alert(1)\" sandbox=\"allow-scripts\"></iframe>",
        );

        assert!(html.contains("allowfullscreen"));
        assert!(html.contains("loading=\"lazy\""));
        assert!(!html.contains("onload"));
        assert!(!html.contains("sandbox"));
    }

    #[test]
    fn event_handler_attributes_are_stripped() {
        let gate = TrustGate::new();
        let html = gate.sanitize_html("<div onclick=\"steal()\" class=\"cta\">Go</div>");

        assert!(html.contains("class=\"cta\""));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn style_attribute_survives_filtering() {
        let gate = TrustGate::new();
        let html = gate.sanitize_html(
            "<div style=\"color: red; background: url('javascript:alert(1)')\">Hi</div>",
        );

        assert!(html.contains("style=\"color: red\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn head_channel_keeps_metadata_and_drops_scripts() {
        let gate = TrustGate::new();
        let head = gate.sanitize_head(
            "<meta name=\"description\" content=\"landing\">\
             <link rel=\"stylesheet\" href=\"https://cdn.example.com/a.css\">\
             <script src=\"https://evil.example.com/x.js\"></script>",
        );

        assert!(head.contains("meta"));
        assert!(head.contains("stylesheet"));
        assert!(!head.contains("script"));
    }

    #[test]
    fn scoped_style_is_verbatim() {
        let gate = TrustGate::new();
        let css = ".hero { color: hotpink; }";
        let style = gate.scoped_style(css);

        assert!(style.contains(css));
        assert!(style.starts_with("<style"));
    }

    #[test]
    fn script_element_wraps_in_guarded_constructor() {
        let gate = TrustGate::new();
        let script = gate.script_element("console.log('hello')");

        assert!(script.contains("new Function"));
        assert!(script.contains("try"));
        assert!(script.contains("catch"));
        assert!(script.contains("console.log('hello')"));
    }

    #[test]
    fn script_element_is_script_close_safe() {
        let gate = TrustGate::new();
        let script = gate.script_element("var x = \"</script><img src=x onerror=alert(1)>\";");

        assert!(!script.contains("</script><img"));
        // exactly one closing tag: the element's own
        assert_eq!(script.matches("</script>").count(), 1);
    }

    #[test]
    fn style_declarations_filter_matches_policy() {
        assert_eq!(
            sanitize_style_attribute("color: red; padding: 4px;").as_deref(),
            Some("color: red; padding: 4px")
        );
        assert!(sanitize_style_attribute("background: url('javascript:alert(1)')").is_none());
        assert!(contains_unsafe_url("background:url(javascript:alert(1))"));
        assert!(!contains_unsafe_url("background:url('https://example.com/bg.png')"));
        assert!(!contains_unsafe_url("background:url('data:image/png;base64,AAAA')"));
    }
}
