//! Student listings CSV parser
//!
//! Columns are positional:
//! `isbn,title,edition,condition,price,course_number,seller_id,accepts_barter`

use std::io::Read;

use super::{csv_reader, line_of, next_row, CsvParser, Parsed};
use crate::types::{Listing, Result};

/// Number of columns a listing row must have
const LISTING_COLUMNS: usize = 8;

/// Parser for `student_listings.csv`
#[derive(Debug, Default)]
pub struct ListingsParser;

impl ListingsParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(record: &csv::StringRecord) -> Option<Listing> {
        let edition = record[2].parse::<i32>().ok()?;
        let price = record[4].parse::<f64>().ok().filter(|p| p.is_finite())?;

        Some(Listing {
            isbn: record[0].to_string(),
            title: record[1].to_string(),
            edition,
            condition: Some(record[3].to_string()),
            price,
            course_number: record[5].to_string(),
            seller_id: record[6].to_string(),
            accepts_barter: record[7].eq_ignore_ascii_case("true"),
        })
    }
}

impl CsvParser for ListingsParser {
    type Output = Vec<Listing>;

    fn name(&self) -> &str {
        "listings"
    }

    fn parse_reader<R: Read>(&self, reader: R) -> Result<Parsed<Vec<Listing>>> {
        let mut reader = csv_reader(reader);
        let mut listings = Vec::new();
        let mut skipped = 0;

        for result in reader.records() {
            let Some(record) = next_row(self.name(), result, &mut skipped)? else {
                continue;
            };

            if record.len() < LISTING_COLUMNS {
                tracing::warn!(
                    line = line_of(&record),
                    columns = record.len(),
                    "skipping short listing row"
                );
                skipped += 1;
                continue;
            }

            match Self::parse_row(&record) {
                Some(listing) => listings.push(listing),
                None => {
                    tracing::warn!(
                        line = line_of(&record),
                        row = ?record.iter().collect::<Vec<_>>(),
                        "skipping malformed listing row"
                    );
                    skipped += 1;
                }
            }
        }

        tracing::debug!(count = listings.len(), skipped, "parsed listings");
        Ok(Parsed {
            records: listings,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "isbn,title,edition,condition,price,course_number,seller_id,accepts_barter\n";

    fn parse(rows: &str) -> Parsed<Vec<Listing>> {
        ListingsParser::new()
            .parse_str(&format!("{}{}", HEADER, rows))
            .unwrap()
    }

    #[test]
    fn test_parse_single_row() {
        let parsed = parse("978-0-13-468599-1,Effective Java,3,Good,45.50,CS101,s1,true\n");

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records.len(), 1);
        let listing = &parsed.records[0];
        assert_eq!(listing.isbn, "978-0-13-468599-1");
        assert_eq!(listing.title, "Effective Java");
        assert_eq!(listing.edition, 3);
        assert_eq!(listing.condition.as_deref(), Some("Good"));
        assert!((listing.price - 45.5).abs() < f64::EPSILON);
        assert_eq!(listing.course_number, "CS101");
        assert_eq!(listing.seller_id, "s1");
        assert!(listing.accepts_barter);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let parsed = parse(" 111 , Title , 2 , Fair , 10 , CS101 , s9 , TRUE \n");

        let listing = &parsed.records[0];
        assert_eq!(listing.isbn, "111");
        assert_eq!(listing.condition.as_deref(), Some("Fair"));
        assert!(listing.accepts_barter);
    }

    #[test]
    fn test_barter_flag_only_true_is_true() {
        let parsed = parse("1,T,1,Good,1,C,s,yes\n2,T,1,Good,1,C,s,false\n3,T,1,Good,1,C,s,\n");

        assert_eq!(parsed.records.len(), 3);
        assert!(parsed.records.iter().all(|l| !l.accepts_barter));
    }

    #[test]
    fn test_empty_condition_kept_as_blank() {
        let parsed = parse("1,T,1,,10,C,s,false\n");
        assert_eq!(parsed.records[0].condition.as_deref(), Some(""));
    }

    #[test]
    fn test_negative_edition_kept() {
        let parsed = parse("1,T,-1,Good,10,C,s,false\n");

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].edition, -1);
    }

    #[test]
    fn test_quoted_title_with_comma() {
        let parsed = parse("1,\"Calculus, Early Transcendentals\",8,Good,80,MATH200,s1,false\n");

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].title, "Calculus, Early Transcendentals");
        assert_eq!(parsed.records[0].course_number, "MATH200");
    }

    #[test]
    fn test_short_row_skipped() {
        let parsed = parse("1,T,1,Good,10,C,s\n2,T,1,Good,10,C,s,true\n");

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.records[0].isbn, "2");
    }

    #[test]
    fn test_bad_numbers_skipped() {
        let parsed = parse(
            "1,T,first,Good,10,C,s,true\n2,T,1,Good,ten,C,s,true\n3,T,1,Good,NaN,C,s,true\n4,T,1,Good,4,C,s,true\n",
        );

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 3);
        assert_eq!(parsed.records[0].isbn, "4");
    }

    #[test]
    fn test_header_only() {
        let parsed = parse("");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_order_preserved() {
        let parsed = parse(
            "3,T,1,Good,1,C,s,false\n1,T,1,Good,1,C,s,false\n2,T,1,Good,1,C,s,false\n",
        );

        let isbns: Vec<&str> = parsed.records.iter().map(|l| l.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["3", "1", "2"]);
    }
}
