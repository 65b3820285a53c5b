use super::ApiError;

pub fn validate_item_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid item ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_user_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id(1).is_ok());
        assert!(validate_item_id(12345).is_ok());
        assert!(validate_item_id(0).is_err());
        assert!(validate_item_id(-1).is_err());
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id(7).is_ok());
        assert!(validate_user_id(0).is_err());
        assert!(validate_user_id(-3).is_err());
    }
}
