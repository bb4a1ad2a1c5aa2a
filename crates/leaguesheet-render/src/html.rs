//! Minimal HTML fragment builder.
//!
//! Elements are opened and closed inside one call, so every tag written is
//! also closed. Output is one element per line, indented two spaces per
//! nesting level.

/// Attribute list, `(name, value)`; values are escaped on write
pub type Attrs<'a> = &'a [(&'a str, &'a str)];

#[derive(Debug, Default)]
pub struct HtmlBuilder {
    buf: String,
    depth: usize,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn open_tag(&mut self, tag: &str, attrs: Attrs<'_>) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&html_escape(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }

    fn close_tag(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Element with nested children written by `body`
    pub fn element(
        &mut self,
        tag: &str,
        attrs: Attrs<'_>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.indent();
        self.open_tag(tag, attrs);
        self.buf.push('\n');

        self.depth += 1;
        body(self);
        self.depth -= 1;

        self.indent();
        self.close_tag(tag);
        self.buf.push('\n');
        self
    }

    /// Element holding escaped text
    pub fn leaf(&mut self, tag: &str, attrs: Attrs<'_>, text: &str) -> &mut Self {
        self.leaf_raw(tag, attrs, &html_escape(text))
    }

    /// Element holding markup that is already HTML
    pub fn leaf_raw(&mut self, tag: &str, attrs: Attrs<'_>, html: &str) -> &mut Self {
        self.indent();
        self.open_tag(tag, attrs);
        self.buf.push_str(html);
        self.close_tag(tag);
        self.buf.push('\n');
        self
    }

    /// Element without content or closing tag, e.g. `<col>`
    pub fn void(&mut self, tag: &str, attrs: Attrs<'_>) -> &mut Self {
        self.indent();
        self.open_tag(tag, attrs);
        self.buf.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// HTML-escape a string
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_elements_close_in_order() {
        let mut html = HtmlBuilder::new();
        html.element("table", &[("class", "scores")], |b| {
            b.element("tbody", &[], |b| {
                b.element("tr", &[], |b| {
                    b.leaf("td", &[("class", "home")], "A & B");
                });
            });
        });

        assert_eq!(
            html.finish(),
            "<table class=\"scores\">\n  <tbody>\n    <tr>\n      <td class=\"home\">A &amp; B</td>\n    </tr>\n  </tbody>\n</table>\n"
        );
    }

    #[test]
    fn void_and_raw() {
        let mut html = HtmlBuilder::new();
        html.void("col", &[("width", "45")])
            .leaf_raw("th", &[], "<strong>Ref</strong>");
        assert_eq!(html.finish(), "<col width=\"45\">\n<th><strong>Ref</strong></th>\n");
    }

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"q\""), "&quot;q&quot;");
    }
}
