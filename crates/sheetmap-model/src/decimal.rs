//! Exact decimal values for cell payloads.
//!
//! Spreadsheet number cells that carry a fractional part are kept as the
//! decimal text they were parsed from — a scaled `i128` mantissa — so a
//! value like `72000.50` survives a write/read cycle without picking up
//! binary-float drift. Comparisons are numeric: `72000.50 == 72000.5`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A fixed-point decimal: `mantissa / 10^scale`.
///
/// The scale is preserved exactly as parsed, so `Display` re-renders the
/// original fractional width (`"72000.50"` stays `"72000.50"`).
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("empty decimal literal")]
    Empty,
    #[error("invalid character in decimal literal `{0}`")]
    InvalidDigit(String),
    #[error("decimal literal `{0}` exceeds the representable range")]
    Overflow(String),
}

const POW10: [i128; 39] = {
    let mut t = [1i128; 39];
    let mut i = 1;
    while i < 39 {
        t[i] = t[i - 1] * 10;
        i += 1;
    }
    t
};

fn pow10(exp: u32) -> Option<i128> {
    POW10.get(exp as usize).copied()
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    pub fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Mantissa/scale with trailing fractional zeros removed.
    fn normalized(&self) -> (i128, u32) {
        let mut m = self.mantissa;
        let mut s = self.scale;
        if m == 0 {
            return (0, 0);
        }
        while s > 0 && m % 10 == 0 {
            m /= 10;
            s -= 1;
        }
        (m, s)
    }

    /// True when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.normalized().1 == 0
    }

    /// The exact `i64` value, if the decimal is integral and fits.
    pub fn to_i64_exact(&self) -> Option<i64> {
        let (m, s) = self.normalized();
        if s != 0 {
            return None;
        }
        i64::try_from(m).ok()
    }

    /// Nearest binary-float approximation. Lossy for > ~15 significant digits.
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 / 10f64.powi(self.scale as i32)
    }

    /// Convert a finite float through its shortest round-trip text form.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // Rust's shortest-repr formatting is exact for round-tripping f64.
        format!("{value}").parse().ok()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal::new(v as i128, 0)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseDecimalError::Empty);
        }

        let (body, exp) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = s[pos + 1..]
                    .parse()
                    .map_err(|_| ParseDecimalError::InvalidDigit(input.to_string()))?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };

        let (negative, digits) = match body.as_bytes().first() {
            Some(&b'-') => (true, &body[1..]),
            Some(&b'+') => (false, &body[1..]),
            _ => (false, body),
        };

        let (int_part, frac_part) = match digits.find('.') {
            Some(pos) => (&digits[..pos], &digits[pos + 1..]),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDecimalError::InvalidDigit(input.to_string()));
        }

        let mut mantissa: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            if !b.is_ascii_digit() {
                return Err(ParseDecimalError::InvalidDigit(input.to_string()));
            }
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add((b - b'0') as i128))
                .ok_or_else(|| ParseDecimalError::Overflow(input.to_string()))?;
        }
        if negative {
            mantissa = -mantissa;
        }

        // Fold the exponent into the scale; a positive remainder shifts the
        // mantissa instead (scale can never go negative).
        let mut scale = frac_part.len() as i64 - exp as i64;
        if scale < 0 {
            let shift =
                pow10((-scale) as u32).ok_or_else(|| ParseDecimalError::Overflow(input.to_string()))?;
            mantissa = mantissa
                .checked_mul(shift)
                .ok_or_else(|| ParseDecimalError::Overflow(input.to_string()))?;
            scale = 0;
        }
        if scale > u32::MAX as i64 {
            return Err(ParseDecimalError::Overflow(input.to_string()));
        }

        Ok(Decimal::new(mantissa, scale as u32))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let abs = self.mantissa.unsigned_abs();
        let divisor = match pow10(self.scale) {
            Some(p) => p as u128,
            None => {
                // Scale beyond 10^38 cannot coexist with a nonzero integer
                // part; render as 0.000…digits.
                let digits = abs.to_string();
                let pad = self.scale as usize - digits.len();
                return write!(f, "{sign}0.{}{digits}", "0".repeat(pad));
            }
        };
        let int_part = abs / divisor;
        let frac_part = abs % divisor;
        write!(
            f,
            "{sign}{int_part}.{frac:0>width$}",
            frac = frac_part,
            width = self.scale as usize
        )
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Decimal {}

impl std::hash::Hash for Decimal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (am, ascale) = self.normalized();
        let (bm, bscale) = other.normalized();
        match (am.signum(), bm.signum()) {
            (x, y) if x != y => return x.cmp(&y),
            (0, 0) => return Ordering::Equal,
            _ => {}
        }
        // Same sign: align scales when the shift fits in i128, otherwise
        // fall back to digit-wise comparison of the absolute values.
        let (lo, hi, diff, flipped) = if ascale <= bscale {
            (am, bm, bscale - ascale, false)
        } else {
            (bm, am, ascale - bscale, true)
        };
        match pow10(diff).and_then(|p| lo.checked_mul(p)) {
            Some(shifted) => {
                if flipped {
                    hi.cmp(&shifted)
                } else {
                    shifted.cmp(&hi)
                }
            }
            None => {
                let ord = cmp_abs_digits(am.unsigned_abs(), ascale, bm.unsigned_abs(), bscale);
                if am < 0 { ord.reverse() } else { ord }
            }
        }
    }
}

fn cmp_abs_digits(a: u128, ascale: u32, b: u128, bscale: u32) -> Ordering {
    let (ai, af) = split_digits(a, ascale);
    let (bi, bf) = split_digits(b, bscale);
    match ai.len().cmp(&bi.len()).then_with(|| ai.cmp(&bi)) {
        Ordering::Equal => {}
        ord => return ord,
    }
    let width = af.len().max(bf.len());
    let pad = |s: String| format!("{s:0<width$}");
    pad(af).cmp(&pad(bf))
}

fn split_digits(abs: u128, scale: u32) -> (String, String) {
    let digits = abs.to_string();
    let scale = scale as usize;
    if scale >= digits.len() {
        ("0".to_string(), format!("{digits:0>scale$}"))
    } else {
        let split = digits.len() - scale;
        (digits[..split].to_string(), digits[split..].to_string())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Decimal;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    // Serialized as the exact decimal text so no consumer is tempted to go
    // through a binary float.
    impl Serialize for Decimal {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Decimal {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(de::Error::custom)
        }
    }
}
