//! Display formatting for assistant answers and fallback article lists

use newsdesk_api::Article;

use crate::fallback::MAX_FALLBACK_ITEMS;

/// Strip `**` bold markers and put every enumerated point (`1. `, `2. `, ...)
/// in its own paragraph.
pub fn normalize_answer(text: &str) -> String {
    let clean = text.replace("**", "");

    let mut bounds = vec![0];
    bounds.extend(item_starts(&clean).into_iter().filter(|&i| i > 0));
    bounds.push(clean.len());

    bounds
        .windows(2)
        .map(|w| clean[w[0]..w[1]].trim())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Byte offsets where an enumerated item begins: a digit run not preceded
/// by another digit, then `.`, then whitespace.
fn item_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let mut end = i;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        let followed_by_period_space = bytes.get(end) == Some(&b'.')
            && text[end + 1..].chars().next().is_some_and(char::is_whitespace);
        if followed_by_period_space {
            starts.push(i);
        }

        i = end;
    }

    starts
}

/// One block per article (title, description, publish date), at most
/// [`MAX_FALLBACK_ITEMS`], in the order received.
pub fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .take(MAX_FALLBACK_ITEMS)
        .map(|article| {
            format!(
                "• {}\n  {}\n  Published: {}",
                article.title,
                article.description.as_deref().unwrap_or(""),
                article.published_at.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_enumerated_points() {
        assert_eq!(
            normalize_answer("**Intro** 1. First 2. Second"),
            "Intro\n\n1. First\n\n2. Second"
        );
    }

    #[test]
    fn test_ignores_source_line_breaks() {
        assert_eq!(
            normalize_answer("Summary:\n1. **Gaza** talks resume\n\n\n2. Aid enters\n3. Vote due"),
            "Summary:\n\n1. Gaza talks resume\n\n2. Aid enters\n\n3. Vote due"
        );
    }

    #[test]
    fn test_multi_digit_numbers_stay_whole() {
        assert_eq!(
            normalize_answer("9. nine 10. ten 11. eleven"),
            "9. nine\n\n10. ten\n\n11. eleven"
        );
    }

    #[test]
    fn test_decimals_and_plain_numbers_do_not_split() {
        assert_eq!(
            normalize_answer("Growth hit 3.5% in 2024. Markets rose"),
            "Growth hit 3.5% in\n\n2024. Markets rose"
        );
        assert_eq!(normalize_answer("Version 2.0 shipped"), "Version 2.0 shipped");
        assert_eq!(normalize_answer("Ends with 5."), "Ends with 5.");
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        assert_eq!(normalize_answer("  just text  "), "just text");
        assert_eq!(normalize_answer(""), "");
        assert_eq!(normalize_answer("****"), "");
    }

    #[test]
    fn test_article_blocks() {
        let articles = vec![
            Article {
                title: "Grid upgrade".to_string(),
                description: Some("Utilities invest".to_string()),
                url: "https://a".to_string(),
                image: None,
                published_at: Some("2024-05-01".to_string()),
            },
            Article {
                title: "Solar record".to_string(),
                description: None,
                url: "https://b".to_string(),
                image: None,
                published_at: None,
            },
        ];

        assert_eq!(
            format_articles(&articles),
            "• Grid upgrade\n  Utilities invest\n  Published: 2024-05-01\n\n• Solar record\n  \n  Published: N/A"
        );
    }
}
