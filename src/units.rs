/// Measurement system requested from the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Celsius; the API is asked for `unitGroup=metric`.
    #[default]
    Metric,
    /// Fahrenheit; no unit-group parameter is sent and the API default applies.
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    /// Temperature suffix shown next to every reading.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_follows_unit() {
        assert_eq!(Unit::Metric.suffix(), "°C");
        assert_eq!(Unit::Imperial.suffix(), "°F");
    }

    #[test]
    fn default_is_metric() {
        assert_eq!(Unit::default(), Unit::Metric);
        assert_eq!(Unit::default().as_str(), "metric");
    }
}
