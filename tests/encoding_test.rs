use bookclean::encoding::{decode_bytes_with_report, DecodeSource};
use bookclean::{clean_bytes, decode_bytes};

/// UTF-8 pages keep every script intact.
#[test]
fn utf8_content_handled_correctly() {
    let html = "<html><head><meta charset=\"utf-8\"></head><body>\
        <h1>Cuentos</h1><p>Mañana, über, 中文, café.</p></body></html>"
        .as_bytes();

    let page = clean_bytes(html).content().expect("content");
    assert_eq!(page.text.as_str(), "CUENTOS\n\nMañana, über, 中文, café.\n");
}

/// ISO-8859-1 declared in the markup is honoured.
#[test]
fn iso88591_converted_to_utf8() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head>\
        <body><h1>Caf\xE9 espa\xF1ol</h1><p>M\xFCnchen</p></body></html>";

    let (text, source) = decode_bytes_with_report(html);
    assert!(matches!(source, DecodeSource::Declared(_)));
    assert!(text.contains("Café español"));

    let page = clean_bytes(html).content().expect("content");
    assert_eq!(page.text.as_str(), "CAFÉ ESPAÑOL\n\nMünchen\n");
}

#[test]
fn content_type_declaration_is_honoured() {
    let html = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head>\
        <body><p>\x93Quoted\x94 \x96 dashed</p></body></html>";
    let page = clean_bytes(html).content().expect("content");
    assert_eq!(page.text.as_str(), "\u{201c}Quoted\u{201d} \u{2013} dashed\n");
}

/// Bytes that are valid UTF-8 win over a wrong declaration.
#[test]
fn valid_utf8_beats_wrong_declaration() {
    let html = "<html><head><meta charset=\"windows-1252\"></head><body><p>Niño</p></body></html>";
    let (text, source) = decode_bytes_with_report(html.as_bytes());
    assert_eq!(source, DecodeSource::Utf8);
    assert!(text.contains("Niño"));
}

/// Undeclared legacy bytes never fail; they decode to something readable.
#[test]
fn undeclared_legacy_bytes_decode() {
    let text = decode_bytes(b"<p>na\xEFve r\xE9sum\xE9 of the caf\xE9 in the \xE9t\xE9</p>");
    assert!(text.contains("na"));
    assert!(!text.contains('\u{fffd}'));
}

/// UTF-8 text that was stored double-encoded is repaired after decoding.
#[test]
fn double_encoded_utf8_is_repaired() {
    let html = "<html><body><p>El niÃ±o y la seÃ±ora</p></body></html>";
    let page = clean_bytes(html.as_bytes()).content().expect("content");
    assert_eq!(page.text.as_str(), "El niño y la señora\n");
}
