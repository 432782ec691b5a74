use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const FEET_PER_METER: f64 = 3.28084;
const METERS_PER_INCH: f64 = 0.0254;
const POUNDS_PER_KG: f64 = 2.205;

/// How the feet label of a height is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HeightStyle {
    /// Whole feet and inches, e.g. `5'7"`.
    #[default]
    Imperial,
    /// Tenths of a foot split into a feet part and a trailing digit, e.g. `5 ' 6''`.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub meters: f64,
    pub feet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub kg: f64,
    pub lbs: u32,
}

impl Height {
    /// Build from the API's decimetre value.
    pub fn from_decimetres(decimetres: u32, style: HeightStyle) -> Self {
        let meters = f64::from(decimetres) / 10.0;
        let feet = match style {
            HeightStyle::Imperial => format_feet_inches(meters),
            HeightStyle::Legacy => format_legacy_feet(meters),
        };
        Height { meters, feet }
    }
}

impl Weight {
    /// Build from the API's hectogram value.
    pub fn from_hectograms(hectograms: u32) -> Self {
        let kg = f64::from(hectograms) / 10.0;
        Weight {
            kg,
            lbs: kg_to_pounds(kg),
        }
    }
}

pub fn kg_to_pounds(kg: f64) -> u32 {
    (kg * POUNDS_PER_KG).round() as u32
}

/// `1.7` -> `5'7"`.
pub fn format_feet_inches(meters: f64) -> String {
    let total_inches = (meters / METERS_PER_INCH).round() as u32;
    format!("{}'{}\"", total_inches / 12, total_inches % 12)
}

/// Tenths of a foot, rounded up.
pub fn legacy_feet_tenths(meters: f64) -> u64 {
    let feet = meters * FEET_PER_METER;
    (feet * 10.0).ceil() as u64
}

/// Split the digits of [`legacy_feet_tenths`] into `<feet> ' <digit>''`.
///
/// The last digit is always the second part, except that at most four digits
/// are shown. A single digit gets a leading `0` feet part.
pub fn format_legacy_feet(meters: f64) -> String {
    let digits = legacy_feet_tenths(meters).to_string();
    let (head, tail) = match digits.len() {
        0 | 1 => ("0", digits.as_str()),
        2 | 3 => digits.split_at(digits.len() - 1),
        _ => (&digits[..3], &digits[3..4]),
    };
    format!("{} ' {}''", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn digits_of(label: &str) -> String {
        label.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    #[rstest]
    #[case(17, "5'7\"")]
    #[case(7, "2'4\"")]
    #[case(1, "0'4\"")]
    #[case(20, "6'7\"")]
    #[case(145, "47'7\"")]
    fn test_imperial_height(#[case] decimetres: u32, #[case] expected: &str) {
        let height = Height::from_decimetres(decimetres, HeightStyle::Imperial);
        assert_eq!(height.feet, expected);
        assert_eq!(height.meters, f64::from(decimetres) / 10.0);
    }

    #[rstest]
    #[case(1, "0 ' 4''")] // 4: single digit
    #[case(7, "2 ' 3''")] // 23: two digits
    #[case(35, "11 ' 5''")] // 115: three digits
    #[case(1000, "328 ' 1''")] // 3281: four digits
    fn test_legacy_height_boundaries(#[case] decimetres: u32, #[case] expected: &str) {
        let height = Height::from_decimetres(decimetres, HeightStyle::Legacy);
        assert_eq!(height.feet, expected);
    }

    #[rstest]
    #[case(7)]
    #[case(30)]
    #[case(31)]
    #[case(304)]
    #[case(305)]
    #[case(1000)]
    fn test_legacy_digits_concatenate_to_tenths(#[case] decimetres: u32) {
        let meters = f64::from(decimetres) / 10.0;
        let label = format_legacy_feet(meters);
        let concatenated: u64 = digits_of(&label).parse().unwrap();
        assert_eq!(concatenated, legacy_feet_tenths(meters));
    }

    #[test]
    fn test_pounds_are_integral_and_stable() {
        let weight = Weight::from_hectograms(69);
        assert_eq!(weight.kg, 6.9);
        assert_eq!(weight.lbs, 15);
        // Recomputing from the stored kilograms never drifts.
        assert_eq!(kg_to_pounds(weight.kg), weight.lbs);
        assert_eq!(kg_to_pounds(weight.kg), kg_to_pounds(weight.kg));
    }

    #[test]
    fn test_height_style_parse() {
        assert_eq!("legacy".parse::<HeightStyle>().unwrap(), HeightStyle::Legacy);
        assert_eq!(HeightStyle::Imperial.to_string(), "imperial");
    }
}
