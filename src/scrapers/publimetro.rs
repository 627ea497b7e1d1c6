//! Publimetro homepage headline extraction.
//!
//! Publimetro renders story cards with a consistent component vocabulary
//! (`c-heading`, `c-link`, `c-overline`), grouped into block types. Each block
//! type is visited in page order, followed by a catch-all pass over every
//! heading link so stories in unknown blocks are still picked up.
//!
//! # Categories
//!
//! The section label is the `span.c-overline` kicker closest to the story. When
//! a page carries no kicker at all, the section is guessed from the story URL.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

use crate::models::{Headline, Publisher};
use crate::utils::clean_text;

const UNCATEGORIZED: &str = "Sin categoría";

/// URL fragments used to guess a section when no kicker is present.
const SECTION_PATHS: [(&str, &str); 4] = [
    ("/deportes/", "Deportes"),
    ("/entretenimiento/", "Entretenimiento"),
    ("/noticias/", "Noticias"),
    ("/barranquilla/", "Barranquilla"),
];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static TOP_LIST_XL: Lazy<Selector> = Lazy::new(|| selector("article.b-top-table-list-xl"));
static TOP_LIST_SMALL: Lazy<Selector> = Lazy::new(|| selector("article.b-top-table-list-small"));
static CARD_LIST: Lazy<Selector> = Lazy::new(|| selector("div.b-card-list"));
static CARD_MAIN: Lazy<Selector> = Lazy::new(|| selector("article.b-card-list__main-item"));
static CARD_SECONDARY: Lazy<Selector> =
    Lazy::new(|| selector("article.b-card-list__secondary-item"));
static RESULTS_LIST: Lazy<Selector> = Lazy::new(|| selector("div.b-results-list"));
static H2_HEADING: Lazy<Selector> = Lazy::new(|| selector("h2.c-heading"));
static H3_HEADING: Lazy<Selector> = Lazy::new(|| selector("h3.c-heading"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a.c-link"));
static LINK_WITH_HREF: Lazy<Selector> = Lazy::new(|| selector("a.c-link[href]"));
static OVERLINE: Lazy<Selector> = Lazy::new(|| selector("span.c-overline"));
static ANY_LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// Extract headlines from a Publimetro homepage snapshot.
///
/// Returns an empty list for a page with no recognisable stories. Each
/// headline text appears at most once; the first occurrence wins.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn extract_headlines(html: &str) -> Vec<Headline> {
    let document = Html::parse_document(html);
    let mut headlines: Vec<Headline> = Vec::new();

    // Lead stories
    for card in document.select(&TOP_LIST_XL) {
        headlines.extend(card_headline(card, &H2_HEADING));
    }

    // "Para entretenerse" block: only the first one on the page
    if let Some(block) = document.select(&CARD_LIST).next() {
        if let Some(main) = descendants(block, &CARD_MAIN).next() {
            headlines.extend(card_headline(main, &H3_HEADING));
        }
        for card in descendants(block, &CARD_SECONDARY) {
            headlines.extend(card_headline(card, &H3_HEADING));
        }
    }

    for card in document.select(&TOP_LIST_SMALL) {
        headlines.extend(card_headline(card, &H2_HEADING));
    }

    for block in document.select(&RESULTS_LIST) {
        for link in descendants(block, &LINK_WITH_HREF) {
            if is_hidden(link) {
                continue;
            }
            let title = clean_text(&link.text().collect::<String>());
            if title.is_empty() {
                continue;
            }
            headlines.push(Headline {
                category: parent_category(link),
                headline: title,
                link: complete_link(link.value().attr("href").unwrap_or_default()),
            });
        }
    }
    debug!(count = headlines.len(), "Headlines from known blocks");

    // Catch-all: any relative heading link not seen yet
    for link in document.select(&LINK_WITH_HREF) {
        let href = link.value().attr("href").unwrap_or_default();
        if is_hidden(link) || !href.starts_with('/') || !inside_heading(link) {
            continue;
        }
        let title = clean_text(&link.text().collect::<String>());
        if title.is_empty() || headlines.iter().any(|h| h.headline == title) {
            continue;
        }
        headlines.push(Headline {
            category: parent_category(link),
            headline: title,
            link: complete_link(href),
        });
    }

    let headlines = headlines
        .into_iter()
        .unique_by(|h| h.headline.clone())
        .collect::<Vec<_>>();

    info!(count = headlines.len(), "Extracted Publimetro headlines");
    headlines
}

/// Matches of `selector` strictly below `element`.
fn descendants<'a, 'b>(
    element: ElementRef<'a>,
    selector: &'b Selector,
) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .select(selector)
        .filter(move |found| found.id() != element.id())
}

/// Headline of a story card: the first `a.c-link` in its first heading.
fn card_headline(card: ElementRef<'_>, heading: &Selector) -> Option<Headline> {
    let heading = descendants(card, heading).next()?;
    let link = descendants(heading, &LINK).next()?;
    let href = link.value().attr("href")?;
    Some(Headline {
        category: category_for(card),
        headline: clean_text(&link.text().collect::<String>()),
        link: complete_link(href),
    })
}

fn parent_category(element: ElementRef<'_>) -> String {
    match parent_element(element) {
        Some(parent) => category_for(parent),
        None => UNCATEGORIZED.to_string(),
    }
}

/// Section label for a story element.
///
/// Looks for a kicker inside the element, then inside each enclosing element
/// outwards, then falls back to the section paths of the links it contains.
fn category_for(element: ElementRef<'_>) -> String {
    let scopes = std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap));
    for scope in scopes {
        if let Some(kicker) = descendants(scope, &OVERLINE).next() {
            return clean_text(&kicker.text().collect::<String>());
        }
    }

    for link in descendants(element, &ANY_LINK) {
        let href = link.value().attr("href").unwrap_or_default();
        if let Some((_, section)) = SECTION_PATHS.iter().find(|(path, _)| href.contains(path)) {
            return section.to_string();
        }
    }

    UNCATEGORIZED.to_string()
}

fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

fn inside_heading(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| matches!(a.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
}

/// Duplicate, keyboard-inaccessible copies of a link (e.g. image overlays).
fn is_hidden(link: ElementRef<'_>) -> bool {
    link.value().attr("aria-hidden") == Some("true") || link.value().attr("tabindex") == Some("-1")
}

/// Absolute story URL. Relative links are appended to the site root verbatim.
fn complete_link(href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    format!("{}{}", Publisher::Publimetro.base_url(), href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PUBLIMETRO_SAMPLE;
    use std::collections::HashSet;

    #[test]
    fn extracts_every_block() {
        let headlines = extract_headlines(PUBLIMETRO_SAMPLE);

        let titles = headlines.iter().map(|h| h.headline.as_str()).collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec![
                "Fútbol local en auge",
                "Nueva música colombiana",
                "Eventos culturales",
                "Noticias de Barranquilla",
            ]
        );
        assert_eq!(headlines[0].category, "Deportes");
        assert_eq!(headlines[0].link, "https://www.publimetro.co/deportes/futbol-local");
        assert_eq!(headlines[1].category, "Entretenimiento");
        // No kicker of its own: the enclosing card list supplies one
        assert_eq!(headlines[2].category, "Entretenimiento");

        let categories = headlines.iter().map(|h| h.category.as_str()).collect::<HashSet<_>>();
        assert!(categories.len() > 1);
        for headline in &headlines {
            assert!(headline.link.starts_with("https://www.publimetro.co"));
        }
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(extract_headlines("<html><body></body></html>").is_empty());
    }

    #[test]
    fn duplicate_titles_are_collapsed() {
        let html = r#"
            <html><body>
                <article class="b-top-table-list-xl">
                    <h2 class="c-heading"><a class="c-link" href="/noticia-repetida">Noticia repetida</a></h2>
                </article>
                <article class="b-top-table-list-small">
                    <h2 class="c-heading"><a class="c-link" href="/noticia-repetida">Noticia repetida</a></h2>
                </article>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].headline, "Noticia repetida");
        assert_eq!(headlines[0].category, UNCATEGORIZED);
    }

    #[test]
    fn category_falls_back_to_link_sections() {
        let html = r#"
            <html><body>
                <article class="b-top-table-list-xl">
                    <h2 class="c-heading">
                        <a class="c-link" href="/entretenimiento/2025/05/28/estreno/">Gran estreno del fin de semana</a>
                    </h2>
                </article>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        assert_eq!(headlines[0].category, "Entretenimiento");
        assert_eq!(
            headlines[0].link,
            "https://www.publimetro.co/entretenimiento/2025/05/28/estreno/"
        );
    }

    #[test]
    fn relative_links_are_appended_verbatim() {
        let html = r#"
            <html><body>
                <article class="b-top-table-list-xl">
                    <h2 class="c-heading">
                        <a class="c-link" href="/noticias/niño-héroe">Niño héroe rescata a su perro</a>
                    </h2>
                </article>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].link, "https://www.publimetro.co/noticias/niño-héroe");
    }

    #[test]
    fn dot_segments_and_protocol_relative_links_are_not_resolved() {
        assert_eq!(
            complete_link("/a/../b/nota"),
            "https://www.publimetro.co/a/../b/nota"
        );
        assert_eq!(
            complete_link("//cdn.publimetro.co/x/y"),
            "https://www.publimetro.co//cdn.publimetro.co/x/y"
        );
        assert_eq!(
            complete_link("http://otro.com/nota"),
            "http://otro.com/nota"
        );
    }

    #[test]
    fn results_list_skips_hidden_links_and_keeps_absolute_urls() {
        let html = r#"
            <html><body>
                <div class="b-results-list">
                    <div class="c-stack">
                        <a class="c-link" href="/noticias/img" aria-hidden="true">Imagen</a>
                        <a class="c-link" href="/noticias/img" tabindex="-1">Imagen duplicada</a>
                        <a class="c-link" href="https://www.publimetro.co/noticias/2025/05/28/paro/">Paro de transporte en la ciudad</a>
                        <a class="c-link" href="/noticias/vacio">   </a>
                    </div>
                </div>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].headline, "Paro de transporte en la ciudad");
        assert_eq!(headlines[0].category, "Noticias");
        assert_eq!(
            headlines[0].link,
            "https://www.publimetro.co/noticias/2025/05/28/paro/"
        );
    }

    #[test]
    fn catch_all_only_takes_relative_heading_links() {
        let html = r#"
            <html><body>
                <section>
                    <h4><a class="c-link" href="/barranquilla/2025/05/28/carnaval/">Carnaval se prepara</a></h4>
                    <h4><a class="c-link" href="https://otro.com/nota">Nota externa</a></h4>
                    <p><a class="c-link" href="/deportes/nota">Sin encabezado</a></p>
                </section>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].headline, "Carnaval se prepara");
        assert_eq!(headlines[0].category, "Barranquilla");
    }

    #[test]
    fn only_first_card_list_is_read() {
        let html = r#"
            <html><body>
                <div class="b-card-list">
                    <article class="b-card-list__main-item">
                        <span class="c-overline">Entretenimiento</span>
                        <h3 class="c-heading"><a class="c-link" href="/entretenimiento/a">Primera lista</a></h3>
                    </article>
                </div>
                <div class="b-card-list">
                    <article class="b-card-list__main-item">
                        <p><a class="c-link" href="/entretenimiento/b">Segunda lista</a></p>
                    </article>
                </div>
            </body></html>
        "#;
        let headlines = extract_headlines(html);
        let titles = headlines.iter().map(|h| h.headline.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Primera lista"]);
    }
}
