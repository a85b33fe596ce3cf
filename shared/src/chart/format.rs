use serde::{Deserialize, Serialize};

/// Unit attached to a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    #[default]
    None,
    /// Money, carrying its symbol (e.g. `€`)
    Currency(String),
    Percent,
    /// Any other label, shown verbatim but never used on the axis
    Custom(String),
}

impl Unit {
    pub fn euro() -> Self {
        Unit::Currency("€".to_string())
    }

    pub fn symbol(&self) -> &str {
        match self {
            Unit::None => "",
            Unit::Currency(symbol) | Unit::Custom(symbol) => symbol,
            Unit::Percent => "%",
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, Unit::Currency(_))
    }

    /// Where the symbol conventionally goes
    pub fn default_position(&self) -> UnitPosition {
        match self {
            Unit::Currency(_) => UnitPosition::Prefix,
            _ => UnitPosition::Suffix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitPosition {
    Prefix,
    #[default]
    Suffix,
}

/// Round half away from zero and print with `decimals` places, never `-0`
pub fn fixed(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor + 0.0;
    format!("{:.*}", decimals as usize, rounded)
}

/// Display a data value: money to cents, everything else to whole numbers
pub fn format_value(value: f64, unit: &Unit) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    if unit.is_currency() {
        fixed(value, 2)
    } else {
        fixed(value, 0)
    }
}

/// Attach the unit symbol on the requested side
pub fn with_unit(text: &str, unit: &Unit, position: UnitPosition) -> String {
    match position {
        UnitPosition::Prefix => format!("{}{}", unit.symbol(), text),
        UnitPosition::Suffix => format!("{}{}", text, unit.symbol()),
    }
}

/// Gridline label: currency prefixes, percent suffixes, anything else is bare
pub fn axis_label(value: f64, unit: &Unit) -> String {
    let number = fixed(value, 0);
    match unit {
        Unit::Currency(symbol) => format!("{}{}", symbol, number),
        Unit::Percent => format!("{}%", number),
        Unit::None | Unit::Custom(_) => number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(-2.5, 0), "-3");
        assert_eq!(fixed(1.005 * 1000.0, 0), "1005");
        assert_eq!(fixed(12.345, 1), "12.3");
        assert_eq!(fixed(-0.2, 0), "0");
    }

    #[test]
    fn test_format_value_by_unit() {
        assert_eq!(format_value(1550.234, &Unit::euro()), "1550.23");
        assert_eq!(format_value(12.6, &Unit::Percent), "13");
        assert_eq!(format_value(349.4, &Unit::None), "349");
        assert_eq!(format_value(f64::NAN, &Unit::euro()), "N/A");
        assert_eq!(format_value(f64::INFINITY, &Unit::None), "N/A");
    }

    #[test]
    fn test_axis_label_by_unit() {
        assert_eq!(axis_label(6432.4, &Unit::euro()), "€6432");
        assert_eq!(axis_label(20.0, &Unit::Percent), "20%");
        assert_eq!(axis_label(7.0, &Unit::Custom("carts".into())), "7");
        assert_eq!(axis_label(7.6, &Unit::None), "8");
    }

    #[test]
    fn test_with_unit_placement() {
        assert_eq!(with_unit("10.00", &Unit::euro(), UnitPosition::Prefix), "€10.00");
        assert_eq!(with_unit("12", &Unit::Percent, UnitPosition::Suffix), "12%");
        assert_eq!(with_unit("5", &Unit::None, UnitPosition::Prefix), "5");
    }
}
