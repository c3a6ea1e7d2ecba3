//! User-facing response texts.
//!
//! Command results carry no distinct error channel; the message text is the
//! only success/failure signal, so these strings are an exact contract with
//! the chat surface. A localization catalog would slot in here.

/// Capitalizes the first character of a token for sentence position.
#[must_use]
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Confirmation after enabling alerts.
#[must_use]
pub fn alerts_enabled(target: &str, space: &str) -> String {
    format!("Alerts for {target} are now enabled for the {space} space.")
}

/// Confirmation after disabling alerts.
#[must_use]
pub fn alerts_disabled(target: &str, space: &str) -> String {
    format!("Alerts for {target} are now disabled for the {space} space.")
}

/// Informational response to disabling when nothing is configured.
#[must_use]
pub fn no_alerts_to_disable(space: &str) -> String {
    format!("No alerts are enabled for the {space} space.")
}

/// Gate failure: the target must already be enabled.
#[must_use]
pub fn must_be_enabled(target: &str, space: &str, bot: &str) -> String {
    format!(
        "{} alerts must already be enabled for the {space} space. Ask {bot} for the alert commands.",
        capitalize(target)
    )
}

/// Gate failure for threshold changes, naming the requested threshold.
#[must_use]
pub fn must_be_enabled_with_threshold(target: &str, space: &str, threshold: u8, bot: &str) -> String {
    format!(
        "{} alerts must already be enabled with a threshold at or below {threshold}% for the {space} space. Ask {bot} for the alert commands.",
        capitalize(target)
    )
}

/// Validation failure: threshold outside `[1, 100]`.
#[must_use]
pub fn invalid_threshold(threshold: u8) -> String {
    format!("{threshold}% is not a valid threshold. Thresholds must be between 1% and 100%.")
}

/// Precondition failure: the kind is not enabled for the space.
#[must_use]
pub fn please_enable(kind: &str) -> String {
    format!("Please enable {kind} alerts before setting a threshold.")
}

/// Confirmation after a threshold change.
#[must_use]
pub fn threshold_set(kind: &str, threshold: u8, space: &str) -> String {
    format!("The {kind} alert threshold is now {threshold}% for the {space} space.")
}

/// Combined confirmation for the enable-and-set command.
#[must_use]
pub fn enabled_with_threshold(kind: &str, threshold: u8, space: &str) -> String {
    format!("You will be alerted when {kind} usage exceeds {threshold}% in the {space} space.")
}

/// Redirect notice sent to both old and new rooms when alerts move.
#[must_use]
pub fn room_moved(space: &str, room: &str) -> String {
    format!("Alerts for the {space} space will now be sent to the {room} room.")
}

/// Per-space header line in the alert listing.
#[must_use]
pub fn list_enabled(space: &str) -> String {
    format!("Alerts enabled for the {space} space:")
}

/// Listing response when no space has any alert enabled.
#[must_use]
pub fn list_off() -> String {
    "No alerts are currently enabled.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_tokens() {
        assert_eq!(capitalize("cpu"), "Cpu");
        assert_eq!(capitalize("all"), "All");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn gate_message_capitalizes_target() {
        let msg = must_be_enabled("memory", "dev", "guardbot");
        assert!(msg.starts_with("Memory alerts"));
        assert!(msg.contains("dev space"));
        assert!(msg.contains("guardbot"));
    }

    #[test]
    fn invalid_threshold_names_value() {
        assert!(invalid_threshold(101).starts_with("101%"));
    }
}
