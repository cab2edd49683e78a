//! Keyboard shortcuts for rating and submitting.
//!
//! A single document-level `keydown` listener resolves every key through
//! [`RatingHotkeys::resolve`], so one Enter press can never submit twice.

use serde::{Deserialize, Serialize};

/// Rating choices, matching the values of the rating radio inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Pass,
    Unsure,
    Fail,
}

impl Rating {
    /// Radio input value for this rating.
    pub fn value(&self) -> &'static str {
        match self {
            Rating::Pass => "0",
            Rating::Unsure => "1",
            Rating::Fail => "2",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.value() == value)
    }

    /// Get the display name for this rating.
    pub fn name(&self) -> &'static str {
        match self {
            Rating::Pass => "Pass",
            Rating::Unsure => "Unsure",
            Rating::Fail => "Fail",
        }
    }

    pub fn all() -> &'static [Rating] {
        &[Rating::Pass, Rating::Unsure, Rating::Fail]
    }
}

/// State of the rating radio group on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingGroup {
    /// The page has no rating radios (click annotation only)
    Absent,
    /// Rating radios exist but none is checked
    Unchecked,
    /// A rating is checked
    Checked,
}

/// Where keyboard focus is when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusContext {
    /// Focus is inside a text entry element
    pub in_text_entry: bool,
    pub rating_group: RatingGroup,
}

impl FocusContext {
    /// Build a context from the active element's tag name and, for
    /// `<input>` elements, its `type` attribute.
    pub fn new(
        active_tag: Option<&str>,
        input_type: Option<&str>,
        rating_group: RatingGroup,
    ) -> Self {
        Self {
            in_text_entry: active_tag.is_some_and(|tag| is_text_entry(tag, input_type)),
            rating_group,
        }
    }
}

/// What a key press should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Check the radio for this rating
    SelectRating(Rating),
    /// Run the submission path
    Submit,
    /// Let the browser handle the key
    Ignore,
}

/// Input types that take no typed text. A focused rating radio must not
/// swallow the next shortcut.
const NON_TEXT_INPUT_TYPES: &[&str] = &["radio", "checkbox", "button", "submit", "reset"];

/// Whether keyboard input on this element belongs to the user, not to shortcuts.
pub fn is_text_entry(tag: &str, input_type: Option<&str>) -> bool {
    if tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    if !tag.eq_ignore_ascii_case("input") {
        return false;
    }
    match input_type {
        Some(kind) => !NON_TEXT_INPUT_TYPES
            .iter()
            .any(|t| kind.eq_ignore_ascii_case(t)),
        None => true,
    }
}

/// Hotkeys for selecting a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHotkeys {
    #[serde(default = "default_pass")]
    pub pass: char,
    #[serde(default = "default_unsure")]
    pub unsure: char,
    #[serde(default = "default_fail")]
    pub fail: char,
}

fn default_pass() -> char {
    'p'
}

fn default_unsure() -> char {
    'u'
}

fn default_fail() -> char {
    'f'
}

impl Default for RatingHotkeys {
    fn default() -> Self {
        Self {
            pass: default_pass(),
            unsure: default_unsure(),
            fail: default_fail(),
        }
    }
}

impl RatingHotkeys {
    /// Get the rating bound to a `KeyboardEvent.key` value, ignoring case.
    pub fn rating_for_key(&self, key: &str) -> Option<Rating> {
        let mut chars = key.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }

        if c == self.pass.to_ascii_lowercase() {
            Some(Rating::Pass)
        } else if c == self.unsure.to_ascii_lowercase() {
            Some(Rating::Unsure)
        } else if c == self.fail.to_ascii_lowercase() {
            Some(Rating::Fail)
        } else {
            None
        }
    }

    /// Get the hotkey for a rating.
    pub fn key_for_rating(&self, rating: Rating) -> char {
        match rating {
            Rating::Pass => self.pass,
            Rating::Unsure => self.unsure,
            Rating::Fail => self.fail,
        }
    }

    /// Decide what a key press does in the given focus context.
    ///
    /// Enter submits unless the page has a rating group with nothing checked.
    pub fn resolve(&self, key: &str, focus: FocusContext) -> KeyAction {
        if focus.in_text_entry {
            return KeyAction::Ignore;
        }

        if key.eq_ignore_ascii_case("enter") {
            return match focus.rating_group {
                RatingGroup::Unchecked => KeyAction::Ignore,
                RatingGroup::Absent | RatingGroup::Checked => KeyAction::Submit,
            };
        }

        match (self.rating_for_key(key), focus.rating_group) {
            (Some(rating), RatingGroup::Unchecked | RatingGroup::Checked) => {
                KeyAction::SelectRating(rating)
            }
            _ => KeyAction::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(group: RatingGroup) -> FocusContext {
        FocusContext::new(Some("BODY"), None, group)
    }

    #[test]
    fn test_rating_values() {
        assert_eq!(Rating::Pass.value(), "0");
        assert_eq!(Rating::Unsure.value(), "1");
        assert_eq!(Rating::Fail.value(), "2");
        assert_eq!(Rating::from_value("2"), Some(Rating::Fail));
        assert_eq!(Rating::from_value("3"), None);
    }

    #[test]
    fn test_hotkeys_ignore_case() {
        let keys = RatingHotkeys::default();
        assert_eq!(keys.rating_for_key("p"), Some(Rating::Pass));
        assert_eq!(keys.rating_for_key("P"), Some(Rating::Pass));
        assert_eq!(keys.rating_for_key("u"), Some(Rating::Unsure));
        assert_eq!(keys.rating_for_key("F"), Some(Rating::Fail));
        assert_eq!(keys.rating_for_key("x"), None);
        assert_eq!(keys.rating_for_key("pp"), None);
        assert_eq!(keys.rating_for_key(""), None);
    }

    #[test]
    fn test_select_rating() {
        let keys = RatingHotkeys::default();
        assert_eq!(
            keys.resolve("u", focus(RatingGroup::Unchecked)),
            KeyAction::SelectRating(Rating::Unsure)
        );
        // Changing an existing choice is allowed
        assert_eq!(
            keys.resolve("f", focus(RatingGroup::Checked)),
            KeyAction::SelectRating(Rating::Fail)
        );
    }

    #[test]
    fn test_rating_keys_do_nothing_without_a_rating_group() {
        let keys = RatingHotkeys::default();
        assert_eq!(keys.resolve("p", focus(RatingGroup::Absent)), KeyAction::Ignore);
    }

    #[test]
    fn test_enter_submission_gate() {
        let keys = RatingHotkeys::default();
        assert_eq!(keys.resolve("Enter", focus(RatingGroup::Absent)), KeyAction::Submit);
        assert_eq!(keys.resolve("Enter", focus(RatingGroup::Checked)), KeyAction::Submit);
        assert_eq!(keys.resolve("Enter", focus(RatingGroup::Unchecked)), KeyAction::Ignore);
    }

    #[test]
    fn test_text_entry_swallows_shortcuts() {
        let keys = RatingHotkeys::default();
        for (tag, kind) in [
            ("INPUT", Some("text")),
            ("INPUT", None),
            ("input", Some("number")),
            ("TEXTAREA", None),
        ] {
            let ctx = FocusContext::new(Some(tag), kind, RatingGroup::Checked);
            assert!(ctx.in_text_entry, "{} {:?}", tag, kind);
            assert_eq!(keys.resolve("Enter", ctx), KeyAction::Ignore);
            assert_eq!(keys.resolve("p", ctx), KeyAction::Ignore);
        }
    }

    #[test]
    fn test_focused_radio_keeps_shortcuts() {
        let keys = RatingHotkeys::default();
        let ctx = FocusContext::new(Some("INPUT"), Some("radio"), RatingGroup::Checked);

        assert!(!ctx.in_text_entry);
        assert_eq!(keys.resolve("u", ctx), KeyAction::SelectRating(Rating::Unsure));
        assert_eq!(keys.resolve("Enter", ctx), KeyAction::Submit);

        assert!(!FocusContext::new(Some("BUTTON"), None, RatingGroup::Checked).in_text_entry);
        assert!(!FocusContext::new(None, None, RatingGroup::Checked).in_text_entry);
    }

    #[test]
    fn test_custom_hotkeys_from_json() {
        let keys: RatingHotkeys = serde_json::from_str(r#"{"pass": "a"}"#).unwrap();
        assert_eq!(keys.key_for_rating(Rating::Pass), 'a');
        assert_eq!(keys.key_for_rating(Rating::Fail), 'f');
        assert_eq!(keys.rating_for_key("A"), Some(Rating::Pass));
        assert_eq!(keys.rating_for_key("p"), None);
    }
}
