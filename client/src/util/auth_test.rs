use super::*;

// =============================================================================
// validate_username
// =============================================================================

#[test]
fn username_accepts_short_and_mixed_case() {
    assert!(validate_username("abc"));
    assert!(validate_username("User_123"));
}

#[test]
fn username_rejects_too_short() {
    assert!(!validate_username("ab"));
}

#[test]
fn username_length_bounds() {
    assert!(validate_username(&"a".repeat(20)));
    assert!(!validate_username(&"a".repeat(21)));
}

#[test]
fn username_rejects_space_and_symbols() {
    assert!(!validate_username("user name"));
    assert!(!validate_username("user-name"));
    assert!(!validate_username("user@example"));
}

#[test]
fn username_rejects_blank() {
    assert!(!validate_username(""));
    assert!(!validate_username("    "));
}

#[test]
fn username_rejects_non_ascii_letters() {
    assert!(!validate_username("usér"));
}

// =============================================================================
// validate_password
// =============================================================================

#[test]
fn password_accepts_six_chars() {
    assert!(validate_password("abcdef"));
}

#[test]
fn password_rejects_five_chars() {
    assert!(!validate_password("abcde"));
}

#[test]
fn password_length_upper_bound() {
    assert!(validate_password(&"x".repeat(50)));
    assert!(!validate_password(&"x".repeat(51)));
}

#[test]
fn password_rejects_blank() {
    assert!(!validate_password("        "));
}

// =============================================================================
// password_strength
// =============================================================================

#[test]
fn strength_lowercase_only_is_weak() {
    assert_eq!(password_strength("abcdef"), PasswordStrength::Weak);
}

#[test]
fn strength_mixed_case_with_digits_is_medium() {
    assert_eq!(password_strength("Abcdef12"), PasswordStrength::Medium);
}

#[test]
fn strength_all_classes_is_strong() {
    assert_eq!(password_strength("Ab1!efgh@9Z"), PasswordStrength::Strong);
}

#[test]
fn strength_short_password_is_always_weak() {
    assert_eq!(password_strength("A1!b"), PasswordStrength::Weak);
    assert_eq!(password_strength(""), PasswordStrength::Weak);
}

#[test]
fn strength_long_lowercase_reaches_medium() {
    // len >= 8, len >= 12, lowercase
    assert_eq!(password_strength("abcdefghijkl"), PasswordStrength::Medium);
}

#[test]
fn strength_labels_and_meter() {
    assert_eq!(PasswordStrength::Weak.to_string(), "weak");
    assert_eq!(PasswordStrength::Medium.label(), "medium");
    assert_eq!(PasswordStrength::Strong.meter_percent(), 100);
}

// =============================================================================
// format_display_name
// =============================================================================

#[test]
fn display_name_preferred_when_present() {
    assert_eq!(format_display_name("alice", Some("Alice A.")), "Alice A.");
}

#[test]
fn display_name_falls_back_to_username() {
    assert_eq!(format_display_name("alice", None), "alice");
    assert_eq!(format_display_name("alice", Some("   ")), "alice");
}
