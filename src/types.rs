//! Type-safe answer options for the questionnaire
//!
//! Each question offers a closed set of choices. Modelling them as enums
//! keeps stray strings out of the wizard: anything that does not parse into
//! one of these variants is simply not an answer.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Age range bucket (step 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum AgeRange {
    #[strum(to_string = "13–17", serialize = "13-17")]
    Teen,
    #[strum(to_string = "18–24", serialize = "18-24")]
    YoungAdult,
    #[strum(to_string = "25–34", serialize = "25-34")]
    Adult,
    #[strum(to_string = "35–44", serialize = "35-44")]
    MidAdult,
    #[strum(to_string = "45+")]
    Senior,
}

/// Gender (step 2); drives the theme from step 3 onwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Preferred clothing style (step 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Style {
    Casual,
    Formal,
    Sporty,
    Chic,
}

/// Color palette (step 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Palette {
    Neutral,
    Cool,
    Warm,
}

/// Display labels of every variant, in declaration order.
pub fn labels<T: IntoEnumIterator + ToString>() -> Vec<String> {
    T::iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_age_labels_use_en_dash() {
        assert_eq!(
            labels::<AgeRange>(),
            vec!["13–17", "18–24", "25–34", "35–44", "45+"]
        );
    }

    #[test]
    fn test_age_accepts_ascii_hyphen() {
        assert_eq!(AgeRange::from_str("18-24").unwrap(), AgeRange::YoungAdult);
        assert_eq!(AgeRange::from_str("18–24").unwrap(), AgeRange::YoungAdult);
        assert_eq!(AgeRange::YoungAdult.to_string(), "18–24");
    }

    #[test]
    fn test_closed_sets_reject_unknown_values() {
        assert!(Gender::from_str("Robot").is_err());
        assert!(Style::from_str("casual ").is_err());
        assert!(Palette::from_str("").is_err());
        assert!(AgeRange::from_str("99").is_err());
    }

    #[test]
    fn test_option_counts() {
        assert_eq!(labels::<Gender>().len(), 3);
        assert_eq!(labels::<Style>().len(), 4);
        assert_eq!(labels::<Palette>().len(), 3);
    }
}
