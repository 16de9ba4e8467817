use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the offending key in the `DETAIL` part of the error
/// (`Key (email)=(a@x.com) already exists.`), which diesel exposes through
/// `DatabaseErrorInformation::details`. Both the detail and the primary
/// message are searched.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)"
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#)
                .expect("valid table pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into `(entity, field, value)`.
    ///
    /// The key/value pair from the message wins over the constraint name, so
    /// multi-word columns survive; the constraint name is the fallback for
    /// the field and the source of the entity.
    ///
    /// # Examples
    /// ```
    /// use user_service::error::ConstraintParser;
    ///
    /// let result = ConstraintParser::parse_unique_violation(
    ///     "duplicate key value violates unique constraint \"users_email_active_idx\"",
    ///     Some("Key (email)=(a@x.com) already exists."),
    ///     Some("users_email_active_idx"),
    /// );
    /// assert_eq!(
    ///     result,
    ///     Some(("users".to_string(), "email".to_string(), "a@x.com".to_string()))
    /// );
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));
        let from_constraint = constraint_name.and_then(Self::parse_constraint_name);

        match (key_value, from_constraint) {
            (Some((field, value)), Some((entity, _))) => Some((entity, field, value)),
            (Some((field, value)), None) => {
                let entity =
                    Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
                Some((entity, field, value))
            }
            (None, Some((entity, field))) => Some((entity, field, "duplicate_value".to_string())),
            (None, None) => None,
        }
    }

    /// Parses a not-null violation into the offending column name.
    ///
    /// ```
    /// use user_service::error::ConstraintParser;
    ///
    /// let message = "null value in column \"email\" of relation \"users\" violates not-null constraint";
    /// assert_eq!(
    ///     ConstraintParser::parse_not_null_violation(message, None),
    ///     Some("email".to_string())
    /// );
    /// ```
    pub fn parse_not_null_violation(message: &str, column_name: Option<&str>) -> Option<String> {
        column_name
            .map(str::to_string)
            .or_else(|| Self::extract_column(message))
    }

    /// Splits a constraint name into entity and field.
    ///
    /// - "users_email_key" -> ("users", "email")
    /// - "users_username_active_idx" -> ("users", "username")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = constraint_name.split('_').collect();
        if parts.len() >= 3 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
        None
    }

    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(text).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    pub fn extract_column(text: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table(text: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_reads_detail() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key value violates unique constraint \"users_username_active_idx\"",
            Some("Key (username)=(alice) already exists."),
            Some("users_username_active_idx"),
        );
        assert_eq!(
            result,
            Some(("users".to_string(), "username".to_string(), "alice".to_string()))
        );
    }

    #[test]
    fn test_unique_violation_with_detail_inlined_in_message() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(test@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "test@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_unique_violation_falls_back_to_constraint_name() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key value violates unique constraint",
            None,
            Some("users_email_active_idx"),
        );
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "duplicate_value".to_string()
            ))
        );
    }

    #[test]
    fn test_unique_violation_without_any_hint() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("something went wrong", None, None),
            None
        );
    }

    #[test]
    fn test_key_value_allows_empty_value() {
        assert_eq!(
            ConstraintParser::extract_key_value("Key (email)=() already exists."),
            Some(("email".to_string(), String::new()))
        );
    }

    #[test]
    fn test_parse_constraint_name_too_short() {
        assert_eq!(ConstraintParser::parse_constraint_name("users_pkey"), None);
    }

    #[test]
    fn test_not_null_prefers_reported_column() {
        assert_eq!(
            ConstraintParser::parse_not_null_violation("whatever", Some("username")),
            Some("username".to_string())
        );
        assert_eq!(
            ConstraintParser::parse_not_null_violation("no column here", None),
            None
        );
    }

    #[test]
    fn test_extract_table_from_relation() {
        let message = "null value in column \"email\" of relation \"users\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::extract_table(message),
            Some("users".to_string())
        );
    }
}
