use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Host-resolved image drawn next to a value label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl Icon {
    #[must_use]
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Movement of one candle, decided by a strict three-way open/close comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleDirection {
    Increasing,
    Decreasing,
    Neutral,
}

impl CandleDirection {
    #[must_use]
    pub fn classify(open: f64, close: f64) -> Self {
        if open > close {
            Self::Decreasing
        } else if open < close {
            Self::Increasing
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Neutral => "neutral",
        }
    }
}

/// One OHLC sample. Immutable once constructed.
///
/// Deserialization goes through [`CandleEntry::new`], so decoded entries obey
/// the same invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandleEntry")]
pub struct CandleEntry {
    x: f64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    icon: Option<Icon>,
}

#[derive(Deserialize)]
struct RawCandleEntry {
    x: f64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    icon: Option<Icon>,
}

impl TryFrom<RawCandleEntry> for CandleEntry {
    type Error = ChartError;

    fn try_from(raw: RawCandleEntry) -> ChartResult<Self> {
        let entry = Self::new(raw.x, raw.open, raw.high, raw.low, raw.close)?;
        Ok(match raw.icon {
            Some(icon) => entry.with_icon(icon),
            None => entry,
        })
    }
}

impl CandleEntry {
    /// Builds a validated entry.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(x: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !x.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "candle values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            x,
            open,
            high,
            low,
            close,
            icon: None,
        })
    }

    /// Converts timestamped decimal prices into an entry whose `x` is unix seconds.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            time.timestamp_millis() as f64 / 1000.0,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn open(&self) -> f64 {
        self.open
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn close(&self) -> f64 {
        self.close
    }

    #[must_use]
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Representative y used for nearest-y lookups: the wick midpoint.
    #[must_use]
    pub fn y(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    #[must_use]
    pub fn direction(&self) -> CandleDirection {
        CandleDirection::classify(self.open, self.close)
    }
}

fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{CandleDirection, CandleEntry};

    #[test]
    fn rejects_open_outside_wick() {
        assert!(CandleEntry::new(0.0, 13.0, 12.0, 9.0, 11.0).is_err());
        assert!(CandleEntry::new(0.0, 10.0, 9.0, 12.0, 11.0).is_err());
        assert!(CandleEntry::new(f64::NAN, 10.0, 12.0, 9.0, 11.0).is_err());
    }

    #[test]
    fn decoding_applies_entry_validation() {
        let entry: CandleEntry = serde_json::from_str(
            r#"{"x": 1.0, "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0}"#,
        )
        .expect("valid entry");
        assert_eq!(entry, CandleEntry::new(1.0, 10.0, 12.0, 9.0, 11.0).expect("entry"));

        let inverted = serde_json::from_str::<CandleEntry>(
            r#"{"x": 1.0, "open": 10.0, "high": 9.0, "low": 12.0, "close": 11.0}"#,
        );
        assert!(inverted.is_err());

        let round_trip: CandleEntry = serde_json::to_string(&entry)
            .and_then(|json| serde_json::from_str(&json))
            .expect("round trip");
        assert_eq!(round_trip, entry);
    }

    #[test]
    fn classification_is_strict_three_way() {
        assert_eq!(CandleDirection::classify(10.0, 11.0), CandleDirection::Increasing);
        assert_eq!(CandleDirection::classify(11.0, 8.0), CandleDirection::Decreasing);
        assert_eq!(CandleDirection::classify(8.0, 8.0), CandleDirection::Neutral);
    }

    #[test]
    fn decimal_time_entry_uses_unix_seconds() {
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("time");
        let entry = CandleEntry::from_decimal_time(
            time,
            Decimal::new(1005, 1),
            Decimal::new(1020, 1),
            Decimal::new(1000, 1),
            Decimal::new(1010, 1),
        )
        .expect("entry");
        assert_eq!(entry.x(), 1_704_153_600.0);
        assert_eq!(entry.open(), 100.5);
        assert_eq!(entry.y(), 101.0);
    }
}
