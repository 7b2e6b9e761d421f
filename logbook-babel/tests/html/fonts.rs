//! Font-split properties

use logbook_babel::fonts::{font_split_html, split_runs, FontStyles};
use proptest::prelude::*;
use regex::Regex;

fn visible_text(html: &str) -> String {
    let span = Regex::new(r#"(?s)<span style="[^"]*">(.*?)</span>"#).unwrap();
    span.captures_iter(html)
        .map(|c| {
            c[1].replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&amp;", "&")
        })
        .collect()
}

#[test]
fn test_cjk_and_emoji_fall_back() {
    let styles = FontStyles::default();
    let html = font_split_html("Dock 船 🚢", &styles);
    assert_eq!(html.matches("<span").count(), 2);
    assert_eq!(visible_text(&html), "Dock 船 🚢");
}

proptest! {
    #[test]
    fn runs_reproduce_input(s in any::<String>()) {
        let joined: String = split_runs(&s).iter().map(|run| run.text).collect();
        prop_assert_eq!(joined, s);
    }

    #[test]
    fn runs_are_maximal(s in any::<String>()) {
        let runs = split_runs(&s);
        for pair in runs.windows(2) {
            prop_assert_ne!(pair[0].class, pair[1].class);
        }
        prop_assert!(runs.iter().all(|run| !run.text.is_empty()));
    }

    #[test]
    fn span_text_reproduces_input(s in any::<String>()) {
        let html = font_split_html(&s, &FontStyles::default());
        prop_assert_eq!(visible_text(&html), s);
    }
}
