//! Validation helpers for DTOs.

use validator::ValidationError;

/// Maximum accepted length of a client-asserted team identifier.
const MAX_TEAM_ID_LEN: usize = 64;

/// Validates that a team ID is non-empty, at most 64 characters, and free of
/// control characters.
///
/// # Examples
///
/// ```ignore
/// validate_team_id("team-42")   // Ok
/// validate_team_id("")          // Err - empty
/// validate_team_id("a\nb")      // Err - control character
/// ```
pub fn validate_team_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(invalid("team_id_empty", "Team ID must not be empty".into()));
    }

    if id.len() > MAX_TEAM_ID_LEN {
        return Err(invalid(
            "team_id_length",
            format!(
                "Team ID must be at most {MAX_TEAM_ID_LEN} characters (got {})",
                id.len()
            ),
        ));
    }

    if id.chars().any(char::is_control) {
        return Err(invalid(
            "team_id_format",
            "Team ID must not contain control characters".into(),
        ));
    }

    Ok(())
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
