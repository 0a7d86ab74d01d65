//! Carousel extractor for the cycani.org landing page
//!
//! Parses the landing-page HTML and extracts the featured carousel slides.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::{CycaniError, Result};
use crate::types::CarouselItem;

const IMAGE_URL_PREFIX: &str = "url('";
const IMAGE_URL_SUFFIX: &str = "');";

/// Parses the landing-page HTML and returns the carousel slides
///
/// Slides are returned in document order, without deduplication. A slide
/// missing its title, link, or a parseable background-image URL is skipped
/// with a warning rather than failing the whole extraction, so the carousel
/// degrades gracefully when one card omits data.
///
/// # Arguments
/// * `html` - Raw HTML string of the landing page
///
/// # Returns
/// Vector of `CarouselItem`, empty if the carousel container is absent
///
/// # Errors
/// Returns `Parse` if a selector fails to compile (programming error)
pub fn extract_carousel(html: &str) -> Result<Vec<CarouselItem>> {
    let document = Html::parse_document(html);

    let slide_selector = Selector::parse(".slide-time-list .swiper-wrapper > div")
        .map_err(|e| CycaniError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut items = Vec::new();

    for element in document.select(&slide_selector) {
        match parse_slide(&element) {
            Some(item) => items.push(item),
            None => warn!("skipping malformed carousel slide"),
        }
    }

    Ok(items)
}

/// Parses a single carousel slide element
///
/// # Returns
/// `Some(CarouselItem)` if all required pieces are present, `None` otherwise
fn parse_slide(element: &ElementRef) -> Option<CarouselItem> {
    let title_selector = Selector::parse(".slide-info-title").ok()?;
    let intro_selector = Selector::parse(".slide-info").ok()?;
    let image_selector = Selector::parse(".slide-wap").ok()?;
    let link_selector = Selector::parse(".lank").ok()?;

    let name = element
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())?;

    if name.is_empty() {
        return None;
    }

    // Background image lives in an inline style attribute as url('...');
    let style = element
        .select(&image_selector)
        .next()
        .and_then(|el| el.value().attr("style"))?;
    let image_url = extract_image_url(style)?;

    let intro = element
        .select(&intro_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let detail_url = element
        .select(&link_selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)?;

    Some(CarouselItem {
        name,
        image_url,
        intro,
        detail_url,
    })
}

/// Extracts the URL between the `url('` and `');` delimiters of a style value
///
/// Returns `None` if either delimiter is absent.
fn extract_image_url(style: &str) -> Option<String> {
    let start = style.find(IMAGE_URL_PREFIX)? + IMAGE_URL_PREFIX.len();
    let rest = &style[start..];
    let end = rest.rfind(IMAGE_URL_SUFFIX)?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(name: &str, image: &str, intro: &str, href: &str) -> String {
        format!(
            r#"<div class="swiper-slide">
                 <div class="slide-wap" style="background-image: url('{image}');"></div>
                 <a class="lank" href="{href}"></a>
                 <div class="slide-info-title">{name}</div>
                 <div class="slide-info">{intro}</div>
               </div>"#
        )
    }

    fn page(slides: &[String]) -> String {
        format!(
            r#"<html><body>
               <div class="slide-time-list"><div class="swiper-wrapper">{}</div></div>
               </body></html>"#,
            slides.concat()
        )
    }

    #[test]
    fn test_extract_empty_document() {
        let items = extract_carousel("<html><body></body></html>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_extract_single_slide() {
        let html = page(&[slide(
            "葬送的芙莉莲",
            "https://www.cycani.org/upload/frieren.jpg",
            "魔法使いの旅",
            "/bangumi/101.html",
        )]);

        let items = extract_carousel(&html).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.name, "葬送的芙莉莲");
        assert_eq!(item.image_url, "https://www.cycani.org/upload/frieren.jpg");
        assert_eq!(item.intro, "魔法使いの旅");
        assert_eq!(item.detail_url, "/bangumi/101.html");
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let html = page(&[
            slide("First", "https://img/1.jpg", "a", "/bangumi/1.html"),
            slide("Second", "https://img/2.jpg", "b", "/bangumi/2.html"),
            slide("Third", "https://img/3.jpg", "c", "/bangumi/3.html"),
        ]);

        let items = extract_carousel(&html).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "First");
        assert_eq!(items[1].name, "Second");
        assert_eq!(items[2].name, "Third");
    }

    #[test]
    fn test_slide_without_url_delimiters_is_skipped() {
        let broken = r#"<div class="swiper-slide">
            <div class="slide-wap" style="background-image: none;"></div>
            <a class="lank" href="/bangumi/9.html"></a>
            <div class="slide-info-title">Broken</div>
            <div class="slide-info">x</div>
          </div>"#
            .to_string();
        let html = page(&[
            slide("Good", "https://img/1.jpg", "a", "/bangumi/1.html"),
            broken,
        ]);

        let items = extract_carousel(&html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Good");
    }

    #[test]
    fn test_slide_without_title_is_skipped() {
        let untitled = r#"<div class="swiper-slide">
            <div class="slide-wap" style="background-image: url('https://img/2.jpg');"></div>
            <a class="lank" href="/bangumi/2.html"></a>
            <div class="slide-info">x</div>
          </div>"#
            .to_string();
        let html = page(&[
            untitled,
            slide("Good", "https://img/1.jpg", "a", "/bangumi/1.html"),
        ]);

        let items = extract_carousel(&html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Good");
    }

    #[test]
    fn test_extract_image_url() {
        assert_eq!(
            extract_image_url("background-image: url('https://img/x.jpg');"),
            Some("https://img/x.jpg".to_string())
        );
        assert_eq!(extract_image_url("background-image: none;"), None);
        assert_eq!(extract_image_url("url('unterminated"), None);
        assert_eq!(extract_image_url(""), None);
    }
}
