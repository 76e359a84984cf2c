//! Utility functions and helpers

/// Format a money amount with exactly two decimal places
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Generate a unique record ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(25.5), "25.50");
        assert_eq!(format_amount(12.0), "12.00");
        assert_eq!(format_amount(3.14159), "3.14");
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
