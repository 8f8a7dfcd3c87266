use crate::quote_store::Quote;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub struct Palette {
    pub background: &'static str,
    pub quote: &'static str,
    pub author: &'static str,
}

impl Theme {
    /// Unknown or missing themes render as [`Theme::Light`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#f0f0f0",
                quote: "#333",
                author: "#777",
            },
            Theme::Dark => Palette {
                background: "#333",
                quote: "#f0f0f0",
                author: "#f0f0f0",
            },
        }
    }
}

pub fn render_quote(quote: &Quote, theme: Theme) -> String {
    let palette = theme.palette();
    let (first, second) = split_lines(&quote.quote);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="200" viewBox="0 0 400 200">
  <rect width="100%" height="100%" fill="{background}"/>
  <text x="20" y="40" font-family="Arial" font-size="16" fill="{quote_color}" text-anchor="start">
    <tspan x="20" dy="0">{first}</tspan>
    <tspan x="20" dy="1.2em">{second}</tspan>
  </text>
  <text x="380" y="170" font-family="Arial" font-size="14" fill="{author_color}" text-anchor="end">- {author}</text>
</svg>
"##,
        background = palette.background,
        quote_color = palette.quote,
        author_color = palette.author,
        first = escape_xml(first),
        second = escape_xml(second),
        author = escape_xml(&quote.author),
    )
}

/// Split near the middle, preferring the closest space.
fn split_lines(text: &str) -> (&str, &str) {
    let middle = text.len() / 2;

    let split = text
        .char_indices()
        .filter(|(_, c)| *c == ' ')
        .map(|(i, _)| i)
        .min_by_key(|i| i.abs_diff(middle));

    match split {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
