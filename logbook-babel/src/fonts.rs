//! Character-class font splitting for display headings.
//!
//! The decorative display typeface only carries Latin letters and digits.
//! Heading text is cut into maximal runs of those characters and maximal runs
//! of everything else (punctuation, whitespace, emoji, CJK), and each run is
//! wrapped in a span with its own inline style so the browser falls back to
//! the system font for the second kind.
//!
//! The runs partition the input: concatenated in order they reproduce it
//! exactly.

/// Which font a run is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunClass {
    /// ASCII letters and digits plus Latin-1 Supplement and Latin Extended-A/B
    /// letters (U+00C0 to U+024F).
    Latin,
    Other,
}

/// A maximal run of characters of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRun<'a> {
    pub class: RunClass,
    pub text: &'a str,
}

/// Inline styles applied to each run class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStyles {
    pub latin: String,
    pub fallback: String,
}

impl Default for FontStyles {
    fn default() -> Self {
        Self {
            latin: "font-family: var(--font-display), sans-serif".to_string(),
            fallback: "font-family: var(--font-system), system-ui, sans-serif".to_string(),
        }
    }
}

impl FontStyles {
    pub fn style_for(&self, class: RunClass) -> &str {
        match class {
            RunClass::Latin => &self.latin,
            RunClass::Other => &self.fallback,
        }
    }
}

pub fn classify(c: char) -> RunClass {
    if c.is_ascii_alphanumeric() || ('\u{C0}'..='\u{24F}').contains(&c) {
        RunClass::Latin
    } else {
        RunClass::Other
    }
}

/// Split `text` into maximal same-class runs.
pub fn split_runs(text: &str) -> Vec<FontRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<RunClass> = None;

    for (idx, c) in text.char_indices() {
        let class = classify(c);
        match current {
            Some(prev) if prev == class => {}
            Some(prev) => {
                runs.push(FontRun {
                    class: prev,
                    text: &text[start..idx],
                });
                start = idx;
                current = Some(class);
            }
            None => current = Some(class),
        }
    }

    if let Some(class) = current {
        runs.push(FontRun {
            class,
            text: &text[start..],
        });
    }
    runs
}

/// Render `text` as a sequence of styled spans, escaping the run text.
pub fn font_split_html(text: &str, styles: &FontStyles) -> String {
    split_runs(text)
        .into_iter()
        .map(|run| {
            format!(
                "<span style=\"{}\">{}</span>",
                crate::formats::html::escape_attribute(styles.style_for(run.class)),
                crate::formats::html::escape_text(run.text)
            )
        })
        .collect()
}
