use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::scrape::dates;
use crate::scrape::types::{PageExtraction, RawCase};

use super::CourtSite;

/// New York Court of Appeals monthly decision lists.
///
/// One hand-authored page per month. Rows are either date headers or
/// 4-cell case rows; a date header applies to every case row after it
/// until the next header supersedes it.
pub struct NyCourtOfAppeals;

// Links back to the list/index pages, never to an opinion document.
const INDEX_LINK_MARKER: &str = "DecisionList";

impl CourtSite for NyCourtOfAppeals {
    fn id(&self) -> &'static str { "ny" }

    fn name(&self) -> &'static str { "New York Court of Appeals" }

    // http://www.nycourts.gov/ctapps/Decisions/2015/Dec15/Dec15.html
    fn source_url(&self, crawl_date: NaiveDate) -> String {
        format!(
            "http://www.nycourts.gov/ctapps/Decisions/{year}/{mon}{yy}/{mon}{yy}.html",
            year = crawl_date.format("%Y"),
            mon = crawl_date.format("%b"),
            yy = crawl_date.format("%y"),
        )
    }

    fn extract(&self, doc: &Html) -> PageExtraction {
        let tr_sel = Selector::parse("tr").unwrap();
        let table_sel = Selector::parse("table").unwrap();

        // Single left-to-right pass. The accumulator is the most recent
        // date header; case rows before any header keep date = None.
        let mut running_date: Option<NaiveDate> = None;
        let mut cases: Vec<RawCase> = Vec::new();

        for row in doc.select(&tr_sel) {
            // rows wrapping a nested table are layout, not data
            if row.select(&table_sel).next().is_some() {
                continue;
            }
            if let Ok(d) = dates::parse_date_string(&flatten_text(&row)) {
                running_date = Some(d);
                continue;
            }
            let Some(cells) = qualifying_cells(&row) else { continue };
            cases.push(RawCase {
                case_name: case_name(&cells[3]),
                download_url: download_url(&cells[1]),
                decision_date: running_date,
                docket_number: docket_number(&cells[0]),
            });
        }

        PageExtraction { cases }
    }
}

/// Row predicate: exactly 4 `td` children and a qualifying document
/// link in the 2nd cell.
fn qualifying_cells<'a>(row: &ElementRef<'a>) -> Option<Vec<ElementRef<'a>>> {
    let cells: Vec<ElementRef<'a>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();
    if cells.len() != 4 {
        return None;
    }
    if download_url(&cells[1]).is_none() {
        return None;
    }
    Some(cells)
}

// First href in the cell that is not an index link.
fn download_url(cell: &ElementRef) -> Option<String> {
    let href_sel = Selector::parse("[href]").unwrap();
    cell.select(&href_sel)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| !href.contains(INDEX_LINK_MARKER))
        .map(|href| href.to_string())
}

// Case-name fragments come from the styled sub-path when present; some
// months drop the markup, so fall back to any text in the cell.
fn case_name(cell: &ElementRef) -> Option<String> {
    let styled_sel = Selector::parse("p font").unwrap();
    let mut parts: Vec<String> = Vec::new();
    for el in cell.select(&styled_sel) {
        collect_text(&el, &mut parts);
    }
    if parts.is_empty() {
        collect_text(cell, &mut parts);
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn docket_number(cell: &ElementRef) -> Option<String> {
    let marker = Regex::new(r"No\.?,?").unwrap();
    let mut parts: Vec<String> = Vec::new();
    collect_text(cell, &mut parts);
    let joined = parts.join(", ");
    if marker.is_match(&joined) {
        Some(sanitize_docket_string(&joined))
    } else {
        None
    }
}

/// Dockets on these pages should read "No. #", but the period is
/// sometimes dropped or typo'd into a comma. Canonicalize on "No. " so
/// the downstream docket sanitation can strip the marker uniformly.
pub fn sanitize_docket_string(raw: &str) -> String {
    if raw.contains("No.") {
        return raw.to_string();
    }
    raw.replace("No ", "No. ").replace("No,", "No.")
}

fn collect_text(el: &ElementRef, parts: &mut Vec<String>) {
    for t in el.text() {
        let t = t.trim();
        if !t.is_empty() {
            parts.push(t.to_string());
        }
    }
}

// Flattened row text for date-header detection.
fn flatten_text(row: &ElementRef) -> String {
    row.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::parse::parse_tolerant;
    use crate::scrape::types::Status;

    fn extract(html: &str) -> PageExtraction {
        let doc = parse_tolerant(html);
        NyCourtOfAppeals.extract(&doc)
    }

    fn case_row(docket: &str, href: &str, name: &str) -> String {
        format!(
            r#"<tr>
              <td><p><font>{docket}</font></p></td>
              <td><p><font><a href="{href}">Opinion</a></font></p></td>
              <td><p><font>M</font></p></td>
              <td><p><font>{name}</font></p></td>
            </tr>"#
        )
    }

    fn date_row(text: &str) -> String {
        format!(r#"<tr><td colspan="4"><p><font>{text}</font></p></td></tr>"#)
    }

    fn page(rows: &[String]) -> String {
        format!("<html><body><table>{}</table></body></html>", rows.join("\n"))
    }

    #[test]
    fn source_url_for_fixed_date() {
        let d = NaiveDate::from_ymd_opt(2015, 12, 3).unwrap();
        assert_eq!(
            NyCourtOfAppeals.source_url(d),
            "http://www.nycourts.gov/ctapps/Decisions/2015/Dec15/Dec15.html"
        );
    }

    #[test]
    fn running_date_applies_to_following_rows() {
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No. 100", "100opn15.pdf", "People v Smith"),
            case_row("No. 101", "101opn15.pdf", "People v Jones"),
            case_row("No. 102", "102opn15.pdf", "Matter of Doe"),
        ]);
        let got = extract(&html);
        let d = NaiveDate::from_ymd_opt(2015, 12, 15).unwrap();
        assert_eq!(got.cases.len(), 3);
        assert!(got.cases.iter().all(|c| c.decision_date == Some(d)));
    }

    #[test]
    fn later_date_header_supersedes() {
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No. 100", "100opn15.pdf", "People v Smith"),
            date_row("December 17, 2015"),
            case_row("No. 101", "101opn15.pdf", "People v Jones"),
        ]);
        let got = extract(&html);
        assert_eq!(
            got.decision_dates(),
            vec![
                NaiveDate::from_ymd_opt(2015, 12, 15),
                NaiveDate::from_ymd_opt(2015, 12, 17),
            ]
        );
    }

    #[test]
    fn case_row_before_any_header_has_no_date() {
        let html = page(&[case_row("No. 100", "100opn15.pdf", "People v Smith")]);
        let got = extract(&html);
        assert_eq!(got.cases.len(), 1);
        assert_eq!(got.cases[0].decision_date, None);
        // everything else still extracted
        assert_eq!(got.cases[0].docket_number.as_deref(), Some("No. 100"));
    }

    #[test]
    fn index_link_rows_are_rejected() {
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No. 100", "DecisionList2015.html", "Not a case"),
            case_row("No. 101", "101opn15.pdf", "People v Jones"),
        ]);
        let got = extract(&html);
        assert_eq!(got.cases.len(), 1);
        assert_eq!(got.cases[0].case_name.as_deref(), Some("People v Jones"));
    }

    #[test]
    fn rows_without_four_cells_are_ignored() {
        let html = page(&[
            date_row("December 15, 2015"),
            r#"<tr><td>No. 99</td><td><a href="99opn15.pdf">x</a></td></tr>"#.to_string(),
            case_row("No. 100", "100opn15.pdf", "People v Smith"),
        ]);
        let got = extract(&html);
        assert_eq!(got.cases.len(), 1);
    }

    #[test]
    fn name_falls_back_to_plain_cell_text() {
        let html = page(&[
            date_row("December 15, 2015"),
            r#"<tr>
              <td>No. 100</td>
              <td><a href="100opn15.pdf">Opinion</a></td>
              <td>M</td>
              <td>People v Smith</td>
            </tr>"#
                .to_string(),
        ]);
        let got = extract(&html);
        assert_eq!(got.cases[0].case_name.as_deref(), Some("People v Smith"));
        assert_eq!(got.cases[0].docket_number.as_deref(), Some("No. 100"));
    }

    #[test]
    fn name_fragments_join_with_comma() {
        let html = page(&[
            date_row("December 15, 2015"),
            r#"<tr>
              <td><p><font>No. 100</font></p></td>
              <td><p><font><a href="100opn15.pdf">Opinion</a></font></p></td>
              <td><p><font>M</font></p></td>
              <td><p><font>Matter of A</font></p><p><font>v B</font></p></td>
            </tr>"#
                .to_string(),
        ]);
        let got = extract(&html);
        assert_eq!(got.cases[0].case_name.as_deref(), Some("Matter of A, v B"));
    }

    #[test]
    fn hazard_rows_keep_their_position() {
        // empty name cell and missing docket marker used to silently drop
        // positions from two of the four sequences
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No. 100", "100opn15.pdf", "People v Smith"),
            r#"<tr>
              <td><p><font>No. 101</font></p></td>
              <td><p><font><a href="101opn15.pdf">Opinion</a></font></p></td>
              <td><p><font>M</font></p></td>
              <td><p><font> </font></p></td>
            </tr>"#
                .to_string(),
            case_row("102", "102opn15.pdf", "Matter of Doe"),
        ]);
        let got = extract(&html);
        assert_eq!(got.cases.len(), 3);
        assert_eq!(got.case_names()[1], None);
        assert_eq!(got.docket_numbers()[1], Some("No. 101"));
        assert_eq!(got.case_names()[2], Some("Matter of Doe"));
        assert_eq!(got.docket_numbers()[2], None);
        // all five sequences stay the same length
        assert_eq!(got.statuses(), vec![Status::Published; 3]);
    }

    #[test]
    fn docket_typos_are_sanitized() {
        assert_eq!(sanitize_docket_string("No 123"), "No. 123");
        assert_eq!(sanitize_docket_string("No, 123"), "No. 123");
        assert_eq!(sanitize_docket_string("No. 123"), "No. 123");
        // idempotent
        assert_eq!(sanitize_docket_string(&sanitize_docket_string("No 123")), "No. 123");
    }

    #[test]
    fn docket_sanitation_applies_during_extraction() {
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No 100", "100opn15.pdf", "People v Smith"),
            case_row("No, 101", "101opn15.pdf", "People v Jones"),
        ]);
        let got = extract(&html);
        assert_eq!(got.docket_numbers(), vec![Some("No. 100"), Some("No. 101")]);
    }

    #[test]
    fn multiple_docket_fragments_join_with_comma() {
        let html = page(&[
            date_row("December 15, 2015"),
            r#"<tr>
              <td><p><font>No. 100</font></p><p><font>No. 101</font></p></td>
              <td><p><font><a href="100opn15.pdf">Opinion</a></font></p></td>
              <td><p><font>M</font></p></td>
              <td><p><font>People v Smith</font></p></td>
            </tr>"#
                .to_string(),
        ]);
        let got = extract(&html);
        assert_eq!(got.docket_numbers()[0], Some("No. 100, No. 101"));
    }

    #[test]
    fn aligned_lengths_for_well_formed_page() {
        let html = page(&[
            date_row("December 15, 2015"),
            case_row("No. 100", "100opn15.pdf", "People v Smith"),
            case_row("No. 101", "101opn15.pdf", "People v Jones"),
        ]);
        let got = extract(&html);
        let n = got.cases.len();
        assert_eq!(n, 2);
        assert_eq!(got.case_names().len(), n);
        assert_eq!(got.download_urls().len(), n);
        assert_eq!(got.decision_dates().len(), n);
        assert_eq!(got.docket_numbers().len(), n);
        assert_eq!(got.statuses().len(), n);
        assert!(got.cases.iter().all(|c| c.is_complete()));
    }

    #[test]
    fn empty_page_extracts_nothing() {
        let got = extract("<html><body><p>No decisions this month.</p></body></html>");
        assert!(got.cases.is_empty());
        assert!(got.statuses().is_empty());
    }
}
