use scraper::Html;

/// Permissive parse, reserialize, strict reparse. The source markup is
/// hand-authored and malformed enough that selections against a single
/// raw parse miss rows; round-tripping through the html5 parser yields a
/// normalized tree first.
pub fn parse_tolerant(raw: &str) -> Html {
    let permissive = Html::parse_document(raw);
    Html::parse_document(&permissive.root_element().html())
}
