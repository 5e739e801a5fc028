use bookclean::extractor::{filter_lines, flatten_html};
use bookclean::{Cleaner, Options, Outcome, Strategy};

fn line_cleaner(aggressive: bool) -> Cleaner {
    Cleaner::new(Options { strategy: Strategy::LineFilter, aggressive, ..Options::default() })
}

/// Decorative separators vanish without leaving a blank line behind.
#[test]
fn separator_line_is_dropped_entirely() {
    let text = filter_lines("He left.\n*** *** ***\nShe stayed.\n", false);
    assert_eq!(text.as_str(), "He left.\nShe stayed.\n");
}

#[test]
fn page_numbers_and_debris_are_dropped() {
    let text = filter_lines("Para one.\n\n17\n\n*\n\n•\n\nPara two.\n", false);
    assert_eq!(text.as_str(), "Para one.\n\nPara two.\n");
}

#[test]
fn aggressive_mode_keeps_short_chapter_headings() {
    let raw = "CHAPTER I\n\nOk.\n\nThe story begins here.\n\nPart 2\n";
    assert_eq!(
        filter_lines(raw, true).as_str(),
        "CHAPTER I\n\nThe story begins here.\n\nPart 2\n"
    );
    assert_eq!(filter_lines(raw, false).as_str(), raw);
}

#[test]
fn gutenberg_html_is_trimmed_to_the_markers() {
    let html = r#"<html><head><title>The Project Gutenberg eBook of Dracula</title></head><body>
<p>This eBook is for the use of anyone anywhere in the United States.</p>
<p>*** START OF THE PROJECT GUTENBERG EBOOK DRACULA ***</p>
<h1>DRACULA</h1>
<h2>CHAPTER I</h2>
<p>3 May. Bistritz.</p>
<p>* * *</p>
<p>4 May.</p>
<p>*** END OF THE PROJECT GUTENBERG EBOOK DRACULA ***</p>
<p>Updated editions will replace the previous one.</p>
</body></html>"#;

    let page = line_cleaner(false).clean_html(html).content().expect("content");
    let text = page.text.as_str();
    assert!(text.starts_with("DRACULA\n"));
    assert!(text.contains("CHAPTER I\n"));
    assert!(text.contains("3 May. Bistritz.\n"));
    assert!(!text.contains("* * *"));
    assert!(!text.contains("anyone anywhere"));
    assert!(!text.contains("Updated editions"));
    assert_eq!(page.structure.chapters.len(), 1);
}

#[test]
fn generic_flattening_sets_headings_apart() {
    let html = "<html><body><header>Site</header><h3>Preface</h3><p>First.</p><aside>Ad</aside><blockquote>Quote.</blockquote></body></html>";
    assert_eq!(flatten_html(html), "PREFACE\n\nFirst.\n\nQuote.");
}

#[test]
fn plain_text_input() {
    let cleaner = Cleaner::default();
    let outcome = cleaner.clean_text("Title Page Here\r\n\r\n\r\n\r\nCHAPTER I\r\n12\r\nIt begins.\r\n");
    let Outcome::Content(page) = outcome else { panic!("expected content") };
    assert_eq!(page.text.as_str(), "Title Page Here\n\nCHAPTER I\nIt begins.\n");
    assert_eq!(page.structure.title.as_deref(), Some("Title Page Here"));
}

#[test]
fn only_debris_is_empty() {
    assert!(Cleaner::default().clean_text("***\n12\n-\n").is_empty());
}

/// The five-star Gutenberg thought break is a separator like `* * *`.
#[test]
fn spaced_star_separator_is_dropped() {
    let page = Cleaner::default()
        .clean_text("It began.\n*       *       *       *       *\nIt ended.\n")
        .content()
        .expect("content");
    assert_eq!(page.text.as_str(), "It began.\nIt ended.\n");
}
