use bookclean::export::{render, suggested_file_name, to_html, to_markdown};
use bookclean::{clean_html, detect_structure, ChapterMarker, ExportFormat, TextStats};
use chrono::NaiveDate;

#[test]
fn chapter_heading_recorded_and_bare_number_ignored() {
    let text = "The Count of Monte Cristo\n\nCHAPTER IV. The Escape\n\n4\n\nDantès waited.\n";
    let structure = detect_structure(text);
    assert_eq!(structure.chapters, vec![ChapterMarker { line: 2, title: "CHAPTER IV. The Escape".into() }]);
}

#[test]
fn title_author_translator_from_a_cleaned_page() {
    let html = "<body><h1>Crime and Punishment</h1><p>by Fyodor Dostoevsky</p>\
        <p>Translated by Constance Garnett</p><h2>Part I</h2><h3>Chapter I</h3><p>On an exceptionally hot evening...</p></body>";
    let page = clean_html(html).content().expect("content");
    let s = &page.structure;
    assert_eq!(s.title.as_deref(), Some("CRIME AND PUNISHMENT"));
    assert_eq!(s.author.as_deref(), Some("by Fyodor Dostoevsky"));
    assert_eq!(s.translator.as_deref(), Some("Translated by Constance Garnett"));
    let titles: Vec<&str> = s.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["PART I", "CHAPTER I"]);
}

#[test]
fn exports_share_block_roles() {
    let text = "CAPÍTULO I\n\nEN UN LUGAR\n\nEn un lugar de la Mancha,\nde cuyo nombre no quiero acordarme.\n";
    let structure = detect_structure(text);

    let html = to_html(text, structure.display_title());
    assert!(html.contains("<h2>CAPÍTULO I</h2>"));
    assert!(html.contains("<h3>EN UN LUGAR</h3>"));
    assert!(html.contains("<p>En un lugar de la Mancha,<br>\nde cuyo nombre no quiero acordarme.</p>"));

    let md = to_markdown(text, &structure);
    assert!(md.starts_with("# CAPÍTULO I\n\n"));
    assert!(md.contains("\n## CAPÍTULO I\n\n### EN UN LUGAR\n\n"));

    assert_eq!(render(ExportFormat::Text, text, &structure), text);
}

#[test]
fn file_names_are_sanitized_and_timestamped() {
    let at = NaiveDate::from_ymd_opt(2025, 12, 31).and_then(|d| d.and_hms_opt(23, 59, 58)).unwrap();
    let structure = detect_structure("Los \"Pazos\" de Ulloa: novela\n");
    assert_eq!(
        suggested_file_name(&structure, ExportFormat::Html, &at),
        "Los Pazos de Ulloa novela_20251231_235958.html"
    );
}

#[test]
fn stats_of_a_cleaned_page() {
    let page = clean_html("<body><p>One two three four.</p><p>Five six.</p></body>").content().unwrap();
    let stats = TextStats::from_text(page.text.as_str());
    assert_eq!(stats.words, 6);
    assert_eq!(stats.paragraphs, 2);
    assert_eq!(stats.lines, 2);
    assert!((stats.words_per_line - 3.0).abs() < f64::EPSILON);
    assert_eq!(stats.reading_minutes, 1);
}
