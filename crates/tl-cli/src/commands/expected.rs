//! Expected command: working hours expected for a period.

use std::io::Write;

use anyhow::Result;
use tl_core::{ExpectedHours, Period};

pub fn run<W: Write>(writer: &mut W, expected: &ExpectedHours, period: Period) -> Result<()> {
    writeln!(
        writer,
        "Expected hours per {period}: {}",
        expected.for_period(period)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_prints_hours_for_period() {
        let mut output = Vec::new();
        run(&mut output, &ExpectedHours::default(), Period::Month).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Expected hours per month: 130\n");
    }

    #[test]
    fn expected_uses_configured_week() {
        let expected = ExpectedHours {
            workhours_per_week: 40,
            ..ExpectedHours::default()
        };
        let mut output = Vec::new();
        run(&mut output, &expected, Period::Week).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Expected hours per week: 40\n");
    }
}
