/// Unit systems understood by the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Imperial,
    Metric,
    Standard,
}

impl Units {
    /// Anything that isn't `imperial` or `metric` falls back to `Standard`.
    pub fn parse(value: &str) -> Self {
        match value {
            "imperial" => Units::Imperial,
            "metric" => Units::Metric,
            _ => Units::Standard,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Units::Imperial => "F",
            Units::Metric => "C",
            Units::Standard => "K",
        }
    }
}

/// Shorthand letter shown next to temperatures.
pub fn letter_for_units(units: Option<&str>) -> &'static str {
    units.map(Units::parse).unwrap_or(Units::Standard).letter()
}
