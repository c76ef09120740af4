//! XLSX backend on `umya-spreadsheet`.
//!
//! Layout contract: header row at physical row 1, data rows beneath in
//! document order, one sheet per document. Numbers are written through
//! umya's deferred cells so the exact numeric text lands in the file;
//! dates and date-times travel as ISO-8601 text and are re-classified by
//! exact-format parse on decode. Real serial-date cells from foreign files
//! therefore read back as numbers — foreign documents are supported only
//! insofar as their headers match.

use std::collections::BTreeMap;
use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use umya_spreadsheet::{CellRawValue, Worksheet};

use sheetmap_model::{CellValue, Column, Decimal, Document, Record};

use crate::codec::DocumentCodec;
use crate::error::IoError;

/// Excel's default character width is ~7 px at 100% zoom.
const PX_PER_CHAR: f64 = 7.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl XlsxCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for XlsxCodec {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, IoError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "xlsx_encode",
            rows = document.rows().len(),
            columns = document.columns().len()
        )
        .entered();

        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| IoError::Corrupt("fresh workbook has no sheet".to_string()))?;
        sheet.set_name(document.sheet_name());

        for (idx, column) in document.columns().iter().enumerate() {
            let col_num = (idx + 1) as u32;
            sheet
                .get_cell_mut((col_num, 1u32))
                .set_value_string(column.header.clone());
            if let Some(px) = column.width {
                sheet
                    .get_column_dimension_mut(&column_letter(col_num))
                    .set_width(px as f64 / PX_PER_CHAR);
            }
        }

        for (row_idx, record) in document.rows().iter().enumerate() {
            let row_num = (row_idx + 2) as u32;
            for (col_idx, cell) in record.cells().iter().enumerate() {
                let target = sheet.get_cell_mut(((col_idx + 1) as u32, row_num));
                match cell {
                    CellValue::Empty => {
                        target.set_blank();
                    }
                    // Deferred values keep the full digit text in the file
                    // instead of squeezing through an f64 first.
                    CellValue::Int(i) => {
                        target.set_value(i.to_string());
                    }
                    CellValue::Decimal(d) => {
                        target.set_value(d.to_string());
                    }
                    CellValue::Text(s) => {
                        target.set_value_string(s.clone());
                    }
                    CellValue::Bool(b) => {
                        target.set_value_bool(*b);
                    }
                    CellValue::Date(d) => {
                        target.set_value_string(d.to_string());
                    }
                    CellValue::DateTime(dt) => {
                        target.set_value_string(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
                    }
                }
            }
        }

        let mut buf: Vec<u8> = Vec::new();
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, IoError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("xlsx_decode", bytes = bytes.len()).entered();

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)?;
        let sheet = book
            .get_sheet(&0)
            .ok_or_else(|| IoError::Corrupt("workbook has no sheets".to_string()))?;
        let sheet_name = sheet.get_name().to_string();

        let mut grid: BTreeMap<(u32, u32), CellValue> = BTreeMap::new();
        let mut max_row = 0u32;
        let mut max_col = 0u32;
        for cell in sheet.get_cell_collection() {
            let coord = cell.get_coordinate();
            let row = *coord.get_row_num();
            let col = *coord.get_col_num();
            let value = classify(cell.get_cell_value().get_raw_value());
            if value.is_empty() {
                continue;
            }
            max_row = max_row.max(row);
            max_col = max_col.max(col);
            grid.insert((row, col), value);
        }

        // Columns span the populated header row; their headers are whatever
        // text row 1 renders to.
        let mut columns = Vec::new();
        for col in 1..=max_col {
            let header = grid
                .get(&(1, col))
                .map(|v| v.to_string())
                .unwrap_or_default();
            let width = column_width_px(sheet, col);
            columns.push(Column::new(header, width));
        }

        let mut rows = Vec::new();
        for row in 2..=max_row {
            let cells = (1..=max_col)
                .map(|col| grid.remove(&(row, col)).unwrap_or(CellValue::Empty))
                .collect();
            rows.push(Record::new(cells));
        }

        Ok(Document::new(sheet_name, columns, rows)?)
    }
}

fn column_width_px(sheet: &Worksheet, col_num: u32) -> Option<u32> {
    let dimension = sheet.get_column_dimension(&column_letter(col_num))?;
    let width = *dimension.get_width();
    if width > 0.0 {
        Some((width * PX_PER_CHAR).round() as u32)
    } else {
        None
    }
}

fn column_letter(mut col_num: u32) -> String {
    let mut letters = Vec::new();
    while col_num > 0 {
        let rem = ((col_num - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col_num = (col_num - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("column letters are ASCII")
}

/// Classify a raw umya cell into the document model's kinds.
fn classify(raw: &CellRawValue) -> CellValue {
    match raw {
        CellRawValue::Empty => CellValue::Empty,
        CellRawValue::Bool(b) => CellValue::Bool(*b),
        CellRawValue::Numeric(n) => classify_numeric_text(&format!("{n}")),
        CellRawValue::String(s) => classify_string(s.as_ref()),
        CellRawValue::RichText(rt) => CellValue::Text(rt.get_text().to_string()),
        // In-memory deferred values: umya has not committed to a kind yet,
        // so the full classification runs on the raw text.
        CellRawValue::Lazy(s) => classify_lazy(s.as_ref()),
        CellRawValue::Error(_) => CellValue::Empty,
    }
}

fn classify_numeric_text(text: &str) -> CellValue {
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(i) = text.parse::<i64>() {
            return CellValue::Int(i);
        }
    }
    match text.parse::<Decimal>() {
        Ok(d) => CellValue::Decimal(d),
        Err(_) => CellValue::Text(text.to_string()),
    }
}

/// String cells are deliberate text except for the ISO shapes our own
/// write path uses for dates.
fn classify_string(text: &str) -> CellValue {
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    CellValue::Text(text.to_string())
}

fn classify_lazy(text: &str) -> CellValue {
    if text.eq_ignore_ascii_case("TRUE") {
        return CellValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("FALSE") {
        return CellValue::Bool(false);
    }
    let first_numeric = text
        .bytes()
        .next()
        .map(|b| b.is_ascii_digit() || b == b'-' || b == b'+')
        .unwrap_or(false);
    if first_numeric {
        if let Ok(i) = text.parse::<i64>() {
            return CellValue::Int(i);
        }
        if let Ok(d) = text.parse::<Decimal>() {
            return CellValue::Decimal(d);
        }
    }
    classify_string(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn numeric_text_splits_int_from_decimal() {
        assert_eq!(classify_numeric_text("42"), CellValue::Int(42));
        assert_eq!(
            classify_numeric_text("72000.50"),
            CellValue::Decimal("72000.50".parse().unwrap())
        );
        assert_eq!(
            classify_numeric_text("1e3"),
            CellValue::Decimal("1000".parse().unwrap())
        );
    }

    #[test]
    fn string_cells_keep_numeric_looking_text() {
        assert_eq!(classify_string("007"), CellValue::Text("007".to_string()));
        assert_eq!(
            classify_string("2023-01-15"),
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        assert_eq!(
            classify_string("2023-01-15T10:30:00"),
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2023, 1, 15)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn lazy_cells_get_the_full_classification() {
        assert_eq!(classify_lazy("TRUE"), CellValue::Bool(true));
        assert_eq!(classify_lazy("-12"), CellValue::Int(-12));
        assert_eq!(
            classify_lazy("3.50"),
            CellValue::Decimal("3.50".parse().unwrap())
        );
        assert_eq!(classify_lazy("hello"), CellValue::Text("hello".to_string()));
    }
}
