use crate::error::{AppError, AppResult};
use regex::Regex;

pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_name(name: &str) -> AppResult<()> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(AppError::ValidationError(
            "Name must be 2-50 characters".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_event_title(title: &str) -> AppResult<()> {
    let len = title.trim().chars().count();
    if !(3..=100).contains(&len) {
        return Err(AppError::ValidationError(
            "Title must be 3-100 characters".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_event_description(description: Option<&str>) -> AppResult<()> {
    if let Some(description) = description
        && description.chars().count() > 1000
    {
        return Err(AppError::ValidationError(
            "Description must be max 1000 characters".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_event_capacity(capacity: i64) -> AppResult<()> {
    if !(1..=1000).contains(&capacity) {
        return Err(AppError::ValidationError(
            "Capacity must be 1-1000".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::ValidationError(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_comment_text(text: &str) -> AppResult<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            "Comment text is required".to_string(),
        ));
    }
    if trimmed.chars().count() > 500 {
        return Err(AppError::ValidationError(
            "Comment must be less than 500 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@university.edu").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("spaces in@mail.com").is_err());
        assert!(validate_email("john@nodot").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_event_fields() {
        assert!(validate_event_title("Hackathon").is_ok());
        assert!(validate_event_title("Hi").is_err());
        assert!(validate_event_description(Some("short")).is_ok());
        assert!(validate_event_description(Some(&"x".repeat(1001))).is_err());
        assert!(validate_event_description(None).is_ok());
        assert!(validate_event_capacity(1).is_ok());
        assert!(validate_event_capacity(1000).is_ok());
        assert!(validate_event_capacity(0).is_err());
        assert!(validate_event_capacity(1001).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_comment_text() {
        assert!(validate_comment_text("nice event").is_ok());
        assert!(validate_comment_text("   ").is_err());
        assert!(validate_comment_text(&"x".repeat(501)).is_err());
    }
}
