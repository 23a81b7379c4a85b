use super::{Cell, SheetTable, SpreadsheetWriter};
use crate::delivery::RenderError;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

/// Writes Office Open XML workbooks with a single worksheet.
#[derive(Debug, Default)]
pub struct XlsxSpreadsheetWriter {}

impl XlsxSpreadsheetWriter {
    pub fn new() -> Self {
        XlsxSpreadsheetWriter {}
    }
}

impl SpreadsheetWriter for XlsxSpreadsheetWriter {
    fn write(&self, sheet_name: &str, table: &SheetTable) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name)?;

            for (col, header) in table.headers.iter().enumerate() {
                worksheet.write_string(0, col as u16, header)?;
            }
            for (index, row) in table.rows.iter().enumerate() {
                let row_number = index as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    write_cell(worksheet, row_number, col as u16, cell)?;
                }
            }
        }
        Ok(workbook.save_to_buffer()?)
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Blank => {}
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Number(number) => {
            worksheet.write_number(row, col, *number)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::export::EXPORT_SHEET_NAME;
    use std::io::{Cursor, Read};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn writes_named_sheet_with_rows() {
        let catalog = Catalog::sample();
        let table = SheetTable::from_movies(catalog.movies());
        let bytes = XlsxSpreadsheetWriter::new()
            .write(EXPORT_SHEET_NAME, &table)
            .unwrap();

        assert!(bytes.starts_with(b"PK"));
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"name="data""#));
        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("titulo"));
        assert!(strings.contains("Amelie"));
        assert!(read_part(&bytes, "xl/worksheets/sheet1.xml").contains("<v>2009</v>"));
    }

    #[test]
    fn writes_empty_sheet() {
        let bytes = XlsxSpreadsheetWriter::new()
            .write(EXPORT_SHEET_NAME, &SheetTable::default())
            .unwrap();
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"name="data""#));
    }

    #[test]
    fn invalid_sheet_name_is_a_render_failure() {
        let result = XlsxSpreadsheetWriter::new().write("bad/name", &SheetTable::default());
        assert!(matches!(result, Err(RenderError::Spreadsheet(_))));
    }
}
