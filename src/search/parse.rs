use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

pub const GOOGLE_ORIGIN: &str = "https://google.com";

const RESULT_SELECTOR: &str = "div#search div.g";
const LINK_SELECTOR: &str = "a[href]";
const CHALLENGE_SELECTOR: &str = "div#recaptcha, form#captcha-form, div#captcha-form, form[action*='sorry']";
const NEW_SEARCH_PREFIX: &str = "/search?q=";

static REDIRECT_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://(?:www\.)?google\.[a-z.]+)?/url\?(?:q|url)=").unwrap()
});

static TRACKING_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(?:sa|rct)=.*$").unwrap());

/// Whether the page is an anti-automation challenge instead of results.
pub fn is_challenge_page(body: &str) -> bool {
    let Ok(selector) = Selector::parse(CHALLENGE_SELECTOR) else {
        return false;
    };
    Html::parse_document(body).select(&selector).next().is_some()
}

/// Extracts at most `stop` result URLs from a results page, in document order.
pub fn extract_results(body: &str, stop: usize) -> Vec<String> {
    let (Ok(result_selector), Ok(link_selector)) =
        (Selector::parse(RESULT_SELECTOR), Selector::parse(LINK_SELECTOR))
    else {
        return Vec::new();
    };

    Html::parse_document(body)
        .select(&result_selector)
        .filter_map(|result| result.select(&link_selector).next())
        .filter_map(|link| link.value().attr("href"))
        .map(normalize_result_url)
        .filter(|url| !url.is_empty())
        .take(stop)
        .collect()
}

/// Unwraps redirect links, drops tracking parameters and makes follow-up
/// search links absolute. Applying it twice changes nothing.
pub fn normalize_result_url(raw: &str) -> String {
    let mut url = raw.trim();
    while let Some(wrapper) = REDIRECT_WRAPPER.find(url) {
        url = url[wrapper.end()..].trim_start();
    }

    let stripped = TRACKING_SUFFIX.replace(url, "");
    let url = stripped.trim_end();
    if url.starts_with(NEW_SEARCH_PREFIX) {
        format!("{GOOGLE_ORIGIN}{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(hrefs: &[&str]) -> String {
        let entries: String = hrefs
            .iter()
            .map(|href| format!(r#"<div class="g"><h3><a href="{href}">title</a></h3><span>snippet</span></div>"#))
            .collect();
        format!(
            r#"<html><body><div id="header"><a href="/preferences">x</a></div><div id="search"><div id="rso">{entries}</div></div></body></html>"#
        )
    }

    #[test]
    fn extracts_in_document_order() {
        let page = results_page(&[
            "/url?q=https://a.example/page&sa=U&ved=2ah",
            "https://b.example/",
            "/url?url=https://c.example/x&rct=j",
        ]);
        assert_eq!(
            extract_results(&page, 10),
            vec!["https://a.example/page", "https://b.example/", "https://c.example/x"]
        );
    }

    #[test]
    fn never_exceeds_stop() {
        let hrefs: Vec<String> = (0..15).map(|i| format!("https://site{i}.example/")).collect();
        let hrefs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
        let page = results_page(&hrefs);
        for stop in [0, 1, 5, 10, 15, 20] {
            let results = extract_results(&page, stop);
            assert_eq!(results.len(), stop.min(15));
            assert!(results.len() <= stop);
        }
        assert_eq!(extract_results(&page, 2), vec!["https://site0.example/", "https://site1.example/"]);
    }

    #[test]
    fn missing_container_yields_nothing() {
        let page = r#"<html><body><div class="g"><a href="https://outside.example/">x</a></div></body></html>"#;
        assert!(extract_results(page, 10).is_empty());
        assert!(extract_results("", 10).is_empty());
    }

    #[test]
    fn results_without_links_are_skipped() {
        let page = r#"<div id="search"><div class="g"><span>no link</span></div><div class="g"><a href="https://a.example/">a</a></div></div>"#;
        assert_eq!(extract_results(page, 10), vec!["https://a.example/"]);
    }

    #[test]
    fn challenge_detection() {
        assert!(is_challenge_page(r#"<html><body><div id="recaptcha" class="g-recaptcha"></div></body></html>"#));
        assert!(is_challenge_page(r#"<form id="captcha-form" action="index"></form>"#));
        assert!(!is_challenge_page(&results_page(&["https://a.example/"])));
    }

    #[test]
    fn normalizes_new_search_links() {
        assert_eq!(
            normalize_result_url("/search?q=%2233651580074%22&tbm=isch"),
            "https://google.com/search?q=%2233651580074%22&tbm=isch"
        );
    }

    #[test]
    fn unwraps_absolute_redirects() {
        assert_eq!(
            normalize_result_url("https://www.google.com/url?q=https://a.example/&sa=t"),
            "https://a.example/"
        );
    }

    #[test]
    fn keeps_ordinary_urls() {
        for url in [
            "https://example.com/url?q=kept",
            "https://example.com/contact?phone=33651580074",
            "http://www.scamcallfighters.com/search-phone-33651580074.html",
        ] {
            assert_eq!(normalize_result_url(url), url);
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "/url?q=https://a.example/page&sa=U&ved=2ah",
            "/url?url=https://b.example/&rct=j&q=&esrc=s",
            "/url?q=/url?q=https://nested.example/",
            "/search?q=33651580074&sa=X",
            "https://c.example/?a=1&b=2",
            "  https://d.example/  ",
            "",
        ];
        for sample in samples {
            let once = normalize_result_url(sample);
            assert_eq!(normalize_result_url(&once), once, "{sample}");
        }
    }
}
