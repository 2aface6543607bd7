use crate::error::InputError;

/// Validates a name/calories pair typed by the user.
///
/// Returns the trimmed name and the parsed calorie value.
pub fn parse_food_input(name: &str, calories: &str) -> Result<(String, f64), InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::BlankName);
    }

    let raw = calories.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| InputError::InvalidCalories(raw.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::InvalidCalories(raw.to_string()));
    }
    if value <= 0.0 {
        return Err(InputError::NonPositiveCalories(value));
    }

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_input() {
        assert_eq!(
            parse_food_input("  Apple ", "95").unwrap(),
            ("Apple".to_string(), 95.0)
        );
        assert_eq!(parse_food_input("Oats", "150.5").unwrap().1, 150.5);
    }

    #[test]
    fn test_rejects_blank_name() {
        assert_eq!(parse_food_input("   ", "95"), Err(InputError::BlankName));
    }

    #[test]
    fn test_rejects_bad_calories() {
        assert_eq!(
            parse_food_input("Apple", "lots"),
            Err(InputError::InvalidCalories("lots".to_string()))
        );
        assert_eq!(
            parse_food_input("Apple", "NaN"),
            Err(InputError::InvalidCalories("NaN".to_string()))
        );
        assert_eq!(
            parse_food_input("Apple", "0"),
            Err(InputError::NonPositiveCalories(0.0))
        );
        assert_eq!(
            parse_food_input("Apple", "-5"),
            Err(InputError::NonPositiveCalories(-5.0))
        );
    }
}
