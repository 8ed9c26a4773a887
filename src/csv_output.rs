//! CSV output format for phase-name zero-token rates
//!
//! `--format csv` emits the per-phase-name table for spreadsheet analysis.

use crate::aggregate::PhaseNameRate;

/// CSV formatter for the zero-token rate table
#[derive(Debug)]
pub struct CsvRateOutput<'a> {
    rates: &'a [PhaseNameRate],
}

impl<'a> CsvRateOutput<'a> {
    pub fn new(rates: &'a [PhaseNameRate]) -> Self {
        Self { rates }
    }

    fn header() -> &'static str {
        "phase_name,total,zero_count,zero_rate_percent"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for rate in self.rates {
            output.push_str(&format!(
                "{},{},{},{:.1}\n",
                Self::escape_field(&rate.phase_name),
                rate.total,
                rate.zero_count,
                rate.zero_rate_percent
            ));
        }

        output
    }
}
