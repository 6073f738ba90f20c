//! Small formatting helpers used when building reports.

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"new york"` becomes `"New York"` and `"o'hare"` becomes `"O'Hare"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

/// First character upper-cased, everything after it lower-cased.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_to(celsius * 9.0 / 5.0 + 32.0, 2)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Renders a temperature the way it reads in a report: whole numbers keep a
/// single decimal (`15.0`), anything else uses the shortest exact form.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_multiword_and_punctuation() {
        assert_eq!(title_case("london"), "London");
        assert_eq!(title_case("new YORK"), "New York");
        assert_eq!(title_case("o'hare"), "O'Hare");
        assert_eq!(title_case("rio-de-janeiro"), "Rio-De-Janeiro");
        assert_eq!(title_case("são paulo"), "São Paulo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize("LIGHT RAIN"), "Light rain");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn fahrenheit_is_rounded_to_two_places() {
        assert_eq!(celsius_to_fahrenheit(15.0), 59.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(celsius_to_fahrenheit(21.37), 70.47);
        assert_eq!(celsius_to_fahrenheit(0.01), 32.02);
    }

    #[test]
    fn format_decimal_keeps_one_place_for_whole_numbers() {
        assert_eq!(format_decimal(15.0), "15.0");
        assert_eq!(format_decimal(59.0), "59.0");
        assert_eq!(format_decimal(-3.0), "-3.0");
        assert_eq!(format_decimal(12.34), "12.34");
        assert_eq!(format_decimal(70.47), "70.47");
    }
}
