// SPDX-License-Identifier: MPL-2.0
//! Popup and attribution content.
//!
//! Content is written with a tiny subset of inline HTML: `<b>`/`<strong>`,
//! `<i>`/`<em>`, `<br>` and a handful of entities. Any other tag is dropped
//! while its inner text is kept, so `<a href="..">OpenStreetMap</a>` renders
//! as "OpenStreetMap".

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// Parsed rich text, one `Vec<Span>` per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    source: String,
    lines: Vec<Vec<Span>>,
}

impl RichText {
    /// Parses markup into styled lines.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        let mut parser = Parser::default();
        let mut rest = markup;

        while let Some(start) = rest.find('<') {
            parser.push_text(&rest[..start]);
            match rest[start..].find('>') {
                Some(end) => {
                    parser.apply_tag(&rest[start + 1..start + end]);
                    rest = &rest[start + end + 1..];
                }
                None => {
                    // Unterminated tag, keep it literally.
                    parser.push_text(&rest[start..]);
                    rest = "";
                }
            }
        }
        parser.push_text(rest);

        Self {
            source: markup.to_string(),
            lines: parser.finish(),
        }
    }

    /// The markup this content was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn lines(&self) -> &[Vec<Span>] {
        &self.lines
    }

    /// Text with markup removed and line breaks as `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Default)]
struct Parser {
    lines: Vec<Vec<Span>>,
    current: Vec<Span>,
    bold: u32,
    italic: u32,
}

impl Parser {
    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode_entities(raw);
        let bold = self.bold > 0;
        let italic = self.italic > 0;

        match self.current.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic => last.text.push_str(&text),
            _ => self.current.push(Span { text, bold, italic }),
        }
    }

    fn apply_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match (name.as_str(), closing) {
            ("br", _) => self.lines.push(std::mem::take(&mut self.current)),
            ("b" | "strong", false) => self.bold += 1,
            ("b" | "strong", true) => self.bold = self.bold.saturating_sub(1),
            ("i" | "em", false) => self.italic += 1,
            ("i" | "em", true) => self.italic = self.italic.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Vec<Span>> {
        self.lines.push(self.current);
        self.lines
    }
}

fn decode_entities(raw: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&nbsp;", "\u{a0}"),
        ("&copy;", "©"),
    ];

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        for (entity, replacement) in ENTITIES {
            if tail.starts_with(entity) {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
                continue 'outer;
            }
        }
        out.push('&');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}
