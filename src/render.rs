//! List-rendering building blocks shared by all pages
//!
//! Every page follows the same shape: filter a collection into a bucket,
//! optionally sort it, render each record with field-conditional blocks, and
//! wrap the results in a section with a fallback sentence when empty.

/// Shown in place of a section body when its bucket has no records
pub const EMPTY_SECTION_TEXT: &str = "Nothing here yet. Check back soon.";

/// Ordered subsequence of records matching the predicate.
/// Original relative order is preserved; an empty input yields an empty bucket.
pub fn bucket<'a, T>(records: &'a [T], pred: impl Fn(&T) -> bool) -> Vec<&'a T> {
    records.iter().filter(|r| pred(r)).collect()
}

/// Sort a bucket ascending by an optional numeric key.
/// Records without a key sort last. The sort is stable, so records with
/// equal keys (or no key) keep the order they had in the data file.
pub fn sort_by_order<'a, T>(mut bucket: Vec<&'a T>, key: impl Fn(&T) -> Option<u32>) -> Vec<&'a T> {
    bucket.sort_by_key(|r| key(r).unwrap_or(u32::MAX));
    bucket
}

/// Render a block for an optional field, contributing nothing when the field
/// is absent or empty. Whitespace-only values count as empty.
pub fn opt_block(field: Option<&str>, render: impl Fn(&str) -> String) -> String {
    match field {
        Some(value) if !value.trim().is_empty() => render(value),
        _ => String::new(),
    }
}

/// One page section: heading plus rendered items, or the fallback sentence
/// when the bucket was empty. Never emits an empty container.
pub fn section(title: &str, items: &[String], empty_text: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!("<section>\n<h2>{}</h2>\n", html_escape(title)));
    if items.is_empty() {
        html.push_str(&format!(
            "<p class=\"empty-note\">{}</p>\n",
            html_escape(empty_text)
        ));
    } else {
        for item in items {
            html.push_str(item);
        }
    }
    html.push_str("</section>\n");
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Minimal markdown for abstracts and descriptions: paragraphs plus
/// *italic* and **bold**.
pub fn markdown_to_html(md: &str) -> String {
    let mut html = String::new();
    let paragraphs: Vec<&str> = md.split("\n\n").collect();

    for p in paragraphs {
        let p = p.trim();
        if p.is_empty() {
            continue;
        }

        let mut converted = html_escape(p);

        // Bold first so it does not interfere with italic detection
        while let Some(start) = converted.find("**") {
            if let Some(end) = converted[start + 2..].find("**") {
                let end = start + 2 + end;
                let inner = &converted[start + 2..end];
                converted = format!(
                    "{}<strong>{}</strong>{}",
                    &converted[..start],
                    inner,
                    &converted[end + 2..]
                );
            } else {
                break;
            }
        }

        while let Some(start) = converted.find('*') {
            if let Some(end) = converted[start + 1..].find('*') {
                let end = start + 1 + end;
                let inner = &converted[start + 1..end];
                converted = format!(
                    "{}<em>{}</em>{}",
                    &converted[..start],
                    inner,
                    &converted[end + 1..]
                );
            } else {
                break;
            }
        }

        html.push_str(&format!("<p>{}</p>\n", converted));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Publication};

    fn pub_record(title: &str, category: Category, sort_order: Option<u32>) -> Publication {
        Publication {
            title: title.to_string(),
            authors: None,
            venue: None,
            status: None,
            category,
            abstract_text: None,
            pdf_url: None,
            doi: None,
            github_pdf: None,
            sort_order,
        }
    }

    #[test]
    fn test_bucket_preserves_order_and_partitions() {
        let pubs = vec![
            pub_record("A", Category::PeerReviewed, None),
            pub_record("B", Category::WorkingPapers, Some(2)),
            pub_record("C", Category::WorkingPapers, Some(1)),
        ];
        let peer = bucket(&pubs, |p| p.category == Category::PeerReviewed);
        let working = bucket(&pubs, |p| p.category == Category::WorkingPapers);
        let chapters = bucket(&pubs, |p| p.category == Category::BookChapters);

        assert_eq!(peer.len(), 1);
        assert_eq!(peer[0].title, "A");
        assert_eq!(working.len(), 2);
        assert_eq!(working[0].title, "B");
        assert_eq!(working[1].title, "C");
        assert!(chapters.is_empty());

        // Every record lands in exactly one bucket
        assert_eq!(peer.len() + working.len() + chapters.len(), pubs.len());
    }

    #[test]
    fn test_bucket_of_empty_input_is_empty() {
        let pubs: Vec<Publication> = vec![];
        assert!(bucket(&pubs, |p| p.category == Category::PeerReviewed).is_empty());
    }

    #[test]
    fn test_sort_order_ascending_missing_last() {
        let pubs = vec![
            pub_record("no-key", Category::WorkingPapers, None),
            pub_record("three", Category::WorkingPapers, Some(3)),
            pub_record("one", Category::WorkingPapers, Some(1)),
        ];
        let sorted = sort_by_order(bucket(&pubs, |_| true), |p| p.sort_order);
        let titles: Vec<&str> = sorted.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three", "no-key"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let pubs = vec![
            pub_record("first", Category::WorkingPapers, Some(5)),
            pub_record("second", Category::WorkingPapers, Some(5)),
            pub_record("third", Category::WorkingPapers, None),
            pub_record("fourth", Category::WorkingPapers, None),
        ];
        let sorted = sort_by_order(bucket(&pubs, |_| true), |p| p.sort_order);
        let titles: Vec<&str> = sorted.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_working_papers_example() {
        // [{A, peer-reviewed}, {B, working-papers, 2}, {C, working-papers, 1}]:
        // Working Papers renders C before B, Peer-Reviewed renders exactly A
        let pubs = vec![
            pub_record("A", Category::PeerReviewed, None),
            pub_record("B", Category::WorkingPapers, Some(2)),
            pub_record("C", Category::WorkingPapers, Some(1)),
        ];
        let working = sort_by_order(
            bucket(&pubs, |p| p.category == Category::WorkingPapers),
            |p| p.sort_order,
        );
        let titles: Vec<&str> = working.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B"]);

        let peer = bucket(&pubs, |p| p.category == Category::PeerReviewed);
        let titles: Vec<&str> = peer.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn test_opt_block_missing_and_empty() {
        let render = |v: &str| format!("<p>{}</p>", v);
        assert_eq!(opt_block(Some("hello"), render), "<p>hello</p>");
        assert_eq!(opt_block(None, render), "");
        assert_eq!(opt_block(Some(""), render), "");
        assert_eq!(opt_block(Some("   "), render), "");
    }

    #[test]
    fn test_section_fallback_for_empty_bucket() {
        let html = section("Working Papers", &[], EMPTY_SECTION_TEXT);
        assert!(html.contains("<h2>Working Papers</h2>"));
        assert!(html.contains(EMPTY_SECTION_TEXT));

        let html = section("Working Papers", &["<article>x</article>".to_string()], EMPTY_SECTION_TEXT);
        assert!(html.contains("<article>x</article>"));
        assert!(!html.contains(EMPTY_SECTION_TEXT));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_markdown_emphasis() {
        let html = markdown_to_html("We find **strong** evidence of *selection*.\n\nSecond paragraph.");
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<em>selection</em>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }
}
