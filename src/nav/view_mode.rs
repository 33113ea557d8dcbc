use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_day() {
        assert_eq!(ViewMode::default(), ViewMode::Day);
    }

    #[test]
    fn test_yaml_uses_lowercase_names() {
        let yaml = serde_norway::to_string(&ViewMode::Month).unwrap();
        assert_eq!(yaml.trim(), "month");
        let parsed: ViewMode = serde_norway::from_str("week").unwrap();
        assert_eq!(parsed, ViewMode::Week);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ViewMode::Day.label(), "Day");
        assert_eq!(ViewMode::Week.label(), "Week");
        assert_eq!(ViewMode::Month.label(), "Month");
    }
}
