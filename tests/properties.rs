use bookclean::encoding::repair_mojibake;
use bookclean::extractor::filter_lines;
use bookclean::{clean_html, CleanedText, Cleaner, ContentBlock, Outcome};
use proptest::prelude::*;

fn assert_output_contract(text: &str) {
    if text.is_empty() {
        return;
    }
    assert!(text.ends_with('\n'), "{text:?}");
    assert!(!text.ends_with("\n\n"), "{text:?}");
    assert!(!text.contains("\n\n\n"), "{text:?}");
    assert!(!text.starts_with(char::is_whitespace), "{text:?}");
    for line in text.lines() {
        assert_eq!(line, line.trim(), "untrimmed line in {text:?}");
    }
}

fn inline_text() -> impl Strategy<Value = String> {
    "[A-Za-zéñü0-9 .,;\n\t]{0,40}"
}

/// A small page built from block elements around generated text.
fn page() -> impl Strategy<Value = String> {
    let block = (0..7usize, inline_text(), inline_text()).prop_map(|(kind, a, b)| match kind {
        0 => format!("<p>{a}</p>"),
        1 => format!("<h2>{a}</h2>"),
        2 => format!("<p>{a}<br>{b}</p>"),
        3 => format!("<ul><li>{a}</li><li>{b}</li></ul>"),
        4 => format!("<div class=\"poem\">{a}<br><br>{b}</div>"),
        5 => format!("<pre>{a}\n{b}</pre>"),
        _ => "<hr>".to_string(),
    });
    prop::collection::vec(block, 0..8).prop_map(|blocks| format!("<html><body>{}</body></html>", blocks.concat()))
}

proptest! {
    #[test]
    fn repair_is_idempotent(s in "\\PC{0,60}") {
        let once = repair_mojibake(&s).into_owned();
        let twice = repair_mojibake(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn repair_is_idempotent_on_mojibake(s in "[a-zñéáü“”’ ]{0,30}") {
        // Mis-decode genuine UTF-8 as Latin-1, then repair.
        let broken: String = s.bytes().map(char::from).collect();
        let once = repair_mojibake(&broken).into_owned();
        prop_assert_eq!(repair_mojibake(&once).into_owned(), once);
    }

    #[test]
    fn finish_honours_output_contract(s in "[a b\n\r\t]{0,50}") {
        assert_output_contract(CleanedText::finish(&s).as_str());
    }

    #[test]
    fn cleaned_pages_honour_output_contract(html in page()) {
        if let Outcome::Content(cleaned) = clean_html(&html) {
            assert_output_contract(cleaned.text.as_str());
        }
    }

    #[test]
    fn line_filter_honours_output_contract(s in "[a-z*0-9 \n]{0,80}", aggressive in any::<bool>()) {
        assert_output_contract(filter_lines(&s, aggressive).as_str());
    }

    #[test]
    fn paragraphs_and_headings_are_single_lines(html in page()) {
        for block in Cleaner::default().blocks(&html) {
            match block {
                ContentBlock::Paragraph(text) | ContentBlock::Heading(_, text) => {
                    prop_assert!(!text.contains('\n'), "{:?}", text);
                    prop_assert!(!text.is_empty());
                }
                _ => {}
            }
        }
    }

    #[test]
    fn cleaning_is_deterministic(html in page()) {
        let first = clean_html(&html);
        let second = clean_html(&html);
        prop_assert_eq!(first, second);
    }
}
