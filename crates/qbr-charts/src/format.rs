//! Value-label formatting shared by all charts.

/// How a segment value is rendered inside a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Thousands separators, no decimals: `12,345`.
    Count,
    /// One decimal place and a percent sign: `66.7%`.
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Count => group_thousands(value),
            ValueFormat::Percent => format!("{value:.1}%"),
        }
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < -0.5 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
