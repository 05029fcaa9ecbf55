use super::ExportError;
use crate::sdk::geocoding::EnrichedRow;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const HEADER: [&str; 6] = ["Latitude", "Longitude", "Road", "City", "Postcode", "Country"];

/// Writes one workbook with a header row and one row per enriched point.
///
/// Points without an address get blank address cells.
pub fn write_spreadsheet(rows: &[EnrichedRow], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, title) in (0u16..).zip(HEADER) {
        worksheet.write_string(0, col, title)?;
    }

    for (row_index, row) in (1u32..).zip(rows) {
        worksheet.write_number(row_index, 0, row.coordinate.lat)?;
        worksheet.write_number(row_index, 1, row.coordinate.lon)?;

        if let Some(address) = &row.address {
            let fields = [&address.road, &address.city, &address.postcode, &address.country];
            for (col, value) in (2u16..).zip(fields) {
                worksheet.write_string(row_index, col, value.as_str())?;
            }
        }
    }

    workbook.save(path)?;
    log::debug!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::geocoding::AddressRecord;
    use crate::sdk::route::Coordinate;
    use std::fs;

    #[test]
    fn writes_an_xlsx_archive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("coordinates0.xlsx");
        let rows = vec![
            EnrichedRow {
                coordinate: Coordinate::new(38.722, -9.139),
                address: Some(AddressRecord {
                    road: "Rua Augusta".to_string(),
                    city: "Lisboa".to_string(),
                    postcode: "1100-053".to_string(),
                    country: "Portugal".to_string(),
                }),
            },
            EnrichedRow {
                coordinate: Coordinate::new(38.723, -9.14),
                address: None,
            },
        ];

        write_spreadsheet(&rows, &path)?;

        let bytes = fs::read(&path)?;
        assert!(bytes.starts_with(b"PK"), "xlsx files are zip archives");
        Ok(())
    }

    #[test]
    fn header_only_for_empty_rows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.xlsx");
        write_spreadsheet(&[], &path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("coordinates.xlsx");
        assert!(matches!(
            write_spreadsheet(&[], &path),
            Err(ExportError::Spreadsheet(_))
        ));
    }
}
