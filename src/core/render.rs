//! HTML to plain text rendering.
//!
//! Thin policy layer over `html2text`: images are rewritten before the
//! conversion according to [`RenderOptions`], everything else (paragraphs,
//! emphasis, lists, links) follows the `html2text` text renderer.

use std::sync::LazyLock;

use html2text::render::text_renderer::TrivialDecorator;
use regex::Regex;

/// Default wrap width, matches the classic html2text body width
pub const DEFAULT_WIDTH: usize = 78;

static RE_IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img tag pattern"));
static RE_ALT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\balt\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid alt regex")
});
static RE_SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid src regex")
});

/// How HTML is turned into text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Replace images with their alt text instead of a `![alt](src)` reference
    pub image_to_alt: bool,

    /// Wrap width in columns
    pub width: usize,

    /// Keep emphasis markers and link footnotes
    pub decorate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_to_alt: false,
            width: DEFAULT_WIDTH,
            decorate: true,
        }
    }
}

impl RenderOptions {
    pub fn with_image_to_alt(mut self, image_to_alt: bool) -> Self {
        self.image_to_alt = image_to_alt;
        self
    }
}

/// Render an HTML fragment to plain text
pub fn render_html(html: &str, options: &RenderOptions) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let prepared = rewrite_images(html, options.image_to_alt);
    let width = options.width.max(1);

    if options.decorate {
        html2text::from_read(prepared.as_bytes(), width)
    } else {
        html2text::from_read_with_decorator(prepared.as_bytes(), width, TrivialDecorator::new())
    }
}

/// Replace `<img>` tags with their alt text, or with a markdown image reference
fn rewrite_images(html: &str, image_to_alt: bool) -> String {
    RE_IMG_TAG
        .replace_all(html, |caps: &regex::Captures| {
            let tag = caps.get(0).map_or("", |m| m.as_str());
            let alt = attr_value(&RE_ALT_ATTR, tag);

            if image_to_alt {
                alt.to_string()
            } else {
                format!("![{}]({})", alt, attr_value(&RE_SRC_ATTR, tag))
            }
        })
        .into_owned()
}

fn attr_value<'t>(re: &Regex, tag: &'t str) -> &'t str {
    re.captures(tag)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map_or("", |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_empty_lines(text: &str) -> Vec<&str> {
        text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_paragraph() {
        let text = render_html("<p>Hi</p>", &RenderOptions::default());
        assert_eq!(non_empty_lines(&text), vec!["Hi"]);
    }

    #[test]
    fn test_paragraphs_stay_separate() {
        let text = render_html("<p>first</p><p>second</p>", &RenderOptions::default());
        assert_eq!(non_empty_lines(&text), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_html("", &RenderOptions::default()), "");
        assert_eq!(render_html("  \n ", &RenderOptions::default()), "");
    }

    #[test]
    fn test_entities_decoded() {
        let text = render_html("<p>Fish &amp; Chips</p>", &RenderOptions::default());
        assert!(text.contains("Fish & Chips"));
    }

    #[test]
    fn test_image_to_alt() {
        let html = r#"<p>See <img src="fig1.png" alt="Diagram"> here</p>"#;

        let alt = render_html(html, &RenderOptions::default().with_image_to_alt(true));
        assert!(alt.contains("Diagram"));
        assert!(!alt.contains("fig1.png"));

        let reference = render_html(html, &RenderOptions::default());
        assert!(reference.contains("Diagram"));
        assert!(reference.contains("fig1.png"));
    }

    #[test]
    fn test_rewrite_images_single_quotes_and_missing_alt() {
        assert_eq!(
            rewrite_images("<img alt='x' src='y.png'/>", false),
            "![x](y.png)"
        );
        assert_eq!(rewrite_images(r#"<IMG SRC="z.png">"#, true), "");
    }

    #[test]
    fn test_decoration_toggle() {
        let html = "<p>an <em>important</em> word</p>";

        let decorated = render_html(html, &RenderOptions::default());
        assert!(decorated.contains('*'));

        let plain = render_html(
            html,
            &RenderOptions {
                decorate: false,
                ..RenderOptions::default()
            },
        );
        assert!(plain.contains("important"));
        assert!(!plain.contains('*'));
    }
}
