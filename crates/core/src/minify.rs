//! HTML minification applied to every design before it is persisted.

use minify_html::Cfg;

#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    #[error("minified output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Compacts an HTML document.
///
/// Implementations must leave template actions (`{{.field}}`, `{{range}}`) intact so
/// the stored design still parses.
pub trait Minifier: Send + Sync {
    fn html(&self, html: &str) -> Result<String, MinifyError>;
}

/// [`Minifier`] backed by `minify-html`.
///
/// Closing tags, the `<html>`/`<head>` tags and the doctype are kept so the
/// PDF renderer sees a complete document.
pub struct HtmlMinifier {
    cfg: Cfg,
}

impl HtmlMinifier {
    pub fn new() -> Self {
        let mut cfg = Cfg::new();
        cfg.do_not_minify_doctype = true;
        cfg.keep_closing_tags = true;
        cfg.keep_html_and_head_opening_tags = true;
        cfg.preserve_brace_template_syntax = true;
        Self { cfg }
    }
}

impl Default for HtmlMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Minifier for HtmlMinifier {
    fn html(&self, html: &str) -> Result<String, MinifyError> {
        let minified = minify_html::minify(html.as_bytes(), &self.cfg);
        Ok(String::from_utf8(minified)?)
    }
}
