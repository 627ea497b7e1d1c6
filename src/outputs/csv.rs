//! CSV output for the headline table.
//!
//! One header row (`category,headline,link`) followed by one row per
//! headline, standard quoting. No index column.

use crate::error::{PipelineError, Result};
use crate::models::Headline;

pub const CONTENT_TYPE: &str = "text/csv";

pub fn headlines_to_csv(headlines: &[Headline]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if headlines.is_empty() {
        wtr.write_record(["category", "headline", "link"])?;
    }
    for headline in headlines {
        wtr.serialize(headline)?;
    }
    wtr.into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline(category: &str, text: &str, link: &str) -> Headline {
        Headline {
            category: category.to_string(),
            headline: text.to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![
            headline(
                "Politica",
                "Nueva ley aprobada en el congreso",
                "https://www.eltiempo.com/politica/congreso/nueva-ley-aprobada",
            ),
            headline(
                "Deportes",
                "Colombia gana importante partido",
                "https://www.eltiempo.com/deportes/futbol/colombia-gana-partido",
            ),
        ];
        let csv = String::from_utf8(headlines_to_csv(&rows).unwrap()).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "category,headline,link");
        assert_eq!(
            lines[1],
            "Politica,Nueva ley aprobada en el congreso,https://www.eltiempo.com/politica/congreso/nueva-ley-aprobada"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn quotes_fields_with_commas_and_quotes() {
        let rows = vec![headline(
            "Sin categoría",
            "Petro dice \"no\", otra vez",
            "https://www.publimetro.co/noticias/a",
        )];
        let csv = String::from_utf8(headlines_to_csv(&rows).unwrap()).unwrap();
        assert!(csv.contains(r#""Petro dice ""no"", otra vez""#));
    }

    #[test]
    fn empty_table_still_has_header() {
        let csv = String::from_utf8(headlines_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "category,headline,link\n");
    }

    #[test]
    fn parses_back_with_csv_reader() {
        let rows = vec![headline("Deportes", "Fútbol local en auge", "https://www.publimetro.co/deportes/futbol-local")];
        let bytes = headlines_to_csv(&rows).unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let parsed = rdr
            .deserialize::<Headline>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(parsed, rows);
    }
}
