use contracts::domain::import::ProductRow;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "category", "price"];

#[derive(Debug, thiserror::Error)]
pub enum CsvParseError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Parse bulk-import CSV text into validated rows.
///
/// First line is the header; header names are trimmed and lower-cased for
/// matching. Fields are split on bare commas and a single surrounding quote
/// pair is stripped per field — embedded commas or escaped quotes inside
/// quoted fields are not supported and will shift column alignment.
///
/// Rows missing a required value after coercion are dropped without being
/// reported; the caller only sees rows ready for import. Output order
/// follows input order, empty lines are skipped.
pub fn parse_products_csv(text: &str) -> Result<Vec<ProductRow>, CsvParseError> {
    let text = text.trim_start_matches('\u{FEFF}');
    let mut lines = text.split('\n');

    let header_line = lines.next().unwrap_or("");
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvParseError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let values: Vec<String> = line.split(',').map(|v| strip_quotes(v.trim())).collect();

        let mut row = ProductRow {
            name: String::new(),
            category: String::new(),
            price: 0.0,
            description: None,
            features: None,
            image_url: None,
            is_active: None,
        };

        for (index, header) in headers.iter().enumerate() {
            let value = values.get(index).map(String::as_str).unwrap_or("");
            match header.as_str() {
                "name" => row.name = value.to_string(),
                "category" => row.category = value.to_string(),
                "price" => row.price = value.parse::<f64>().unwrap_or(0.0),
                "description" => {
                    row.description = (!value.is_empty()).then(|| value.to_string());
                }
                "image_url" => {
                    row.image_url = (!value.is_empty()).then(|| value.to_string());
                }
                "features" => {
                    let features: Vec<String> = value
                        .split(';')
                        .map(|f| f.trim().to_string())
                        .filter(|f| !f.is_empty())
                        .collect();
                    row.features = (!features.is_empty()).then_some(features);
                }
                "is_active" => {
                    row.is_active = Some(value.eq_ignore_ascii_case("true") || value == "1");
                }
                // Unknown columns are ignored.
                _ => {}
            }
        }

        if !row.name.is_empty() && !row.category.is_empty() && row.price > 0.0 {
            rows.push(row);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!("CSV parse dropped {} row(s) missing required fields", dropped);
    }

    Ok(rows)
}

fn strip_quotes(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_header_names_exactly_the_missing_ones() {
        let err = parse_products_csv("name,price\nBrake Pad,1500").unwrap_err();
        match err {
            CsvParseError::MissingColumns(cols) => assert_eq!(cols, vec!["category"]),
        }
    }

    #[test]
    fn all_headers_missing_reports_all_three() {
        let err = parse_products_csv("sku,qty\nX,1").unwrap_err();
        match err {
            CsvParseError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["name", "category", "price"]);
            }
        }
    }

    #[test]
    fn well_formed_input_yields_one_row_per_line_in_order() {
        let csv = "name,category,price\nBrake Pad,Brakes,1500\nOil Filter,Filters,900\nSpark Plug,Ignition,350";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Brake Pad");
        assert_eq!(rows[1].name, "Oil Filter");
        assert_eq!(rows[2].name, "Spark Plug");
    }

    #[test]
    fn header_only_input_yields_zero_rows_without_error() {
        let rows = parse_products_csv("name,category,price").unwrap();
        assert!(rows.is_empty());
        let rows = parse_products_csv("name,category,price\n\n\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn row_with_empty_required_field_is_dropped() {
        let csv = "name,category,price\nBrake Pad,Brakes,1500\n,Oil,900";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Brake Pad");
        assert_eq!(rows[0].category, "Brakes");
        assert_eq!(rows[0].price, 1500.0);
    }

    #[test]
    fn unparseable_price_defaults_to_zero_and_drops_the_row() {
        let csv = "name,category,price\nBrake Pad,Brakes,abc";
        let rows = parse_products_csv(csv).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn surrounding_quotes_are_stripped() {
        let csv = "name,category,price\n\"Brake Pad\",\"Brakes\",\"1500\"";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows[0].name, "Brake Pad");
        assert_eq!(rows[0].price, 1500.0);
    }

    #[test]
    fn features_split_on_semicolon_and_trimmed() {
        let csv = "name,category,price,features\nBrake Pad,Brakes,1500, ceramic ; low dust ;;";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(
            rows[0].features.as_deref(),
            Some(&["ceramic".to_string(), "low dust".to_string()][..])
        );
    }

    #[test]
    fn is_active_accepts_true_and_literal_one() {
        let csv = "name,category,price,is_active\nA,Brakes,10,TRUE\nB,Brakes,10,1\nC,Brakes,10,no";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows[0].is_active, Some(true));
        assert_eq!(rows[1].is_active, Some(true));
        assert_eq!(rows[2].is_active, Some(false));
    }

    #[test]
    fn headers_match_case_insensitively() {
        let csv = " Name , CATEGORY , Price \nBrake Pad,Brakes,1500";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let csv = "name,category,price,warehouse\nBrake Pad,Brakes,1500,Nairobi";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, None);
    }

    #[test]
    fn bom_is_stripped_before_header_matching() {
        let csv = "\u{FEFF}name,category,price\nBrake Pad,Brakes,1500";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn crlf_input_is_tolerated() {
        let csv = "name,category,price\r\nBrake Pad,Brakes,1500\r\n";
        let rows = parse_products_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Brake Pad");
    }
}
