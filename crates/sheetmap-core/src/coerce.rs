//! The coercion seam between raw cells and field values.
//!
//! One [`ColumnType`] impl per mappable Rust type plays the role of a
//! bidirectional converter table, selected statically: a field whose type
//! has no impl fails trait resolution at the derive site instead of at
//! runtime. Decoding is strict — a cell kind that conflicts with the
//! declared type is a hard [`CoerceError`], never silently narrowed.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use sheetmap_model::{CellValue, Decimal, ValueKind};

use crate::error::CoerceError;

fn mismatch(expected: ValueKind, cell: &CellValue) -> CoerceError {
    CoerceError {
        expected,
        found: cell.kind_name(),
        raw: cell.to_string(),
    }
}

/// A field type that maps onto one spreadsheet column.
pub trait ColumnType: Sized {
    /// Declared semantic kind of the column this type occupies.
    const KIND: ValueKind;

    /// Encode the field value as a raw cell. Total: every representable
    /// value has a cell form.
    fn to_cell(&self) -> CellValue;

    /// Decode a raw cell. `Ok(None)` means the cell was blank — the field
    /// keeps whatever value it already holds.
    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError>;
}

macro_rules! integer_column {
    ($($t:ty),* $(,)?) => {$(
        impl ColumnType for $t {
            const KIND: ValueKind = ValueKind::Integer;

            fn to_cell(&self) -> CellValue {
                CellValue::Int(*self as i64)
            }

            fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
                let wide = match cell {
                    CellValue::Empty => return Ok(None),
                    CellValue::Int(i) => *i,
                    // A decimal-kind cell is acceptable only when its value
                    // is exactly integral.
                    CellValue::Decimal(d) => {
                        d.to_i64_exact().ok_or_else(|| mismatch(ValueKind::Integer, cell))?
                    }
                    other => return Err(mismatch(ValueKind::Integer, other)),
                };
                <$t>::try_from(wide)
                    .map(Some)
                    .map_err(|_| mismatch(ValueKind::Integer, cell))
            }
        }
    )*};
}

integer_column!(i8, i16, i32, i64, u8, u16, u32);

impl ColumnType for Decimal {
    const KIND: ValueKind = ValueKind::Decimal;

    fn to_cell(&self) -> CellValue {
        CellValue::Decimal(*self)
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            CellValue::Decimal(d) => Ok(Some(*d)),
            // Widening an integral cell is lossless.
            CellValue::Int(i) => Ok(Some(Decimal::from(*i))),
            other => Err(mismatch(ValueKind::Decimal, other)),
        }
    }
}

impl ColumnType for f64 {
    const KIND: ValueKind = ValueKind::Decimal;

    fn to_cell(&self) -> CellValue {
        // Non-finite floats have no decimal form; they become blanks.
        Decimal::from_f64(*self)
            .map(CellValue::Decimal)
            .unwrap_or(CellValue::Empty)
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            CellValue::Decimal(d) => Ok(Some(d.to_f64())),
            CellValue::Int(i) => Ok(Some(*i as f64)),
            other => Err(mismatch(ValueKind::Decimal, other)),
        }
    }
}

impl ColumnType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_cell(&self) -> CellValue {
        CellValue::Text(self.clone())
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            // Verbatim: no trimming, no stringification of other kinds.
            CellValue::Text(s) => Ok(Some(s.clone())),
            other => Err(mismatch(ValueKind::Text, other)),
        }
    }
}

impl ColumnType for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn to_cell(&self) -> CellValue {
        CellValue::Bool(*self)
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            CellValue::Bool(b) => Ok(Some(*b)),
            other => Err(mismatch(ValueKind::Boolean, other)),
        }
    }
}

impl ColumnType for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_cell(&self) -> CellValue {
        CellValue::Date(*self)
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            CellValue::Date(d) => Ok(Some(*d)),
            // A date-time cell is only consistent with a pure date when its
            // time-of-day is exactly midnight; anything else is data loss
            // and must surface as an error.
            CellValue::DateTime(dt) if dt.time() == NaiveTime::MIN => Ok(Some(dt.date())),
            other => Err(mismatch(ValueKind::Date, other)),
        }
    }
}

impl ColumnType for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_cell(&self) -> CellValue {
        CellValue::DateTime(*self)
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        match cell {
            CellValue::Empty => Ok(None),
            CellValue::DateTime(dt) => Ok(Some(*dt)),
            CellValue::Date(d) => Ok(Some(d.and_time(NaiveTime::MIN))),
            other => Err(mismatch(ValueKind::DateTime, other)),
        }
    }
}

impl<F: ColumnType> ColumnType for Option<F> {
    const KIND: ValueKind = F::KIND;

    fn to_cell(&self) -> CellValue {
        match self {
            Some(v) => v.to_cell(),
            None => CellValue::Empty,
        }
    }

    fn from_cell(cell: &CellValue) -> Result<Option<Self>, CoerceError> {
        if cell.is_empty() {
            return Ok(Some(None));
        }
        F::from_cell(cell).map(|v| Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn integer_accepts_integral_decimal_only() {
        let integral = CellValue::Decimal("42.00".parse().unwrap());
        assert_eq!(i64::from_cell(&integral).unwrap(), Some(42));

        let fractional = CellValue::Decimal("42.5".parse().unwrap());
        let err = i64::from_cell(&fractional).unwrap_err();
        assert_eq!(err.expected, ValueKind::Integer);
        assert_eq!(err.found, "decimal");
    }

    #[test]
    fn integer_range_is_checked() {
        assert!(u8::from_cell(&CellValue::Int(300)).is_err());
        assert!(u32::from_cell(&CellValue::Int(-1)).is_err());
        assert_eq!(i16::from_cell(&CellValue::Int(-12)).unwrap(), Some(-12));
    }

    #[test]
    fn text_is_verbatim_and_strict() {
        assert_eq!(
            String::from_cell(&CellValue::Text("  spaced  ".into())).unwrap(),
            Some("  spaced  ".to_string())
        );
        assert!(String::from_cell(&CellValue::Int(7)).is_err());
    }

    #[test]
    fn date_rejects_nonzero_time() {
        let midnight = CellValue::DateTime(date(2023, 1, 15).and_time(NaiveTime::MIN));
        assert_eq!(NaiveDate::from_cell(&midnight).unwrap(), Some(date(2023, 1, 15)));

        let afternoon = CellValue::DateTime(date(2023, 1, 15).and_hms_opt(14, 0, 0).unwrap());
        let err = NaiveDate::from_cell(&afternoon).unwrap_err();
        assert_eq!(err.expected, ValueKind::Date);
        assert_eq!(err.found, "date-time");
    }

    #[test]
    fn date_time_widens_from_date() {
        let cell = CellValue::Date(date(2023, 1, 15));
        assert_eq!(
            NaiveDateTime::from_cell(&cell).unwrap(),
            Some(date(2023, 1, 15).and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn decimal_widens_from_integer() {
        assert_eq!(
            Decimal::from_cell(&CellValue::Int(85_000)).unwrap(),
            Some(Decimal::from(85_000))
        );
        assert!(Decimal::from_cell(&CellValue::Text("85k".into())).is_err());
    }

    #[test]
    fn blank_cells_decode_as_absent() {
        assert_eq!(i32::from_cell(&CellValue::Empty).unwrap(), None);
        assert_eq!(String::from_cell(&CellValue::Empty).unwrap(), None);
        assert_eq!(
            <Option<i32>>::from_cell(&CellValue::Empty).unwrap(),
            Some(None)
        );
        assert_eq!(
            <Option<i32>>::from_cell(&CellValue::Int(3)).unwrap(),
            Some(Some(3))
        );
    }

    #[test]
    fn option_writes_blank_for_none() {
        let none: Option<i64> = None;
        assert_eq!(none.to_cell(), CellValue::Empty);
        assert_eq!(Some(4i64).to_cell(), CellValue::Int(4));
    }

    #[test]
    fn f64_round_trips_through_decimal_text() {
        let cell = 72000.5f64.to_cell();
        assert_eq!(cell, CellValue::Decimal("72000.5".parse().unwrap()));
        assert_eq!(f64::from_cell(&cell).unwrap(), Some(72000.5));
        assert_eq!(f64::NAN.to_cell(), CellValue::Empty);
    }
}
