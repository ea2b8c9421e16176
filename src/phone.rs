//! Indian mobile number extraction from conversation text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{PhoneNumber, Transcript};

// Accepts "+91 9XXXXXXXXX", "0 9XXXXXXXXX", and bare "9XXXXXXXXX"; the ten
// digits themselves must be contiguous.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?91[\s-]*)?(?:0[\s-]*)?([6-9][0-9]{9})").expect("valid regex")
});

/// Find the first Indian mobile number in `text`, canonicalized to +91 form.
pub fn find_phone(text: &str) -> Option<PhoneNumber> {
    let captures = PHONE_RE.captures(text)?;
    let digits = captures.get(1)?.as_str();
    PhoneNumber::from_national(digits)
}

/// Find the first Indian mobile number anywhere in a transcript.
pub fn extract_phone(transcript: &Transcript) -> Option<PhoneNumber> {
    find_phone(&transcript.flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number() {
        let phone = find_phone("you can call me at 9876543210 anytime").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");
    }

    #[test]
    fn test_prefixed_numbers() {
        assert_eq!(
            find_phone("+91 9876543210").unwrap().as_str(),
            "+919876543210"
        );
        assert_eq!(
            find_phone("+91-9876543210").unwrap().as_str(),
            "+919876543210"
        );
        assert_eq!(
            find_phone("call 09876543210").unwrap().as_str(),
            "+919876543210"
        );
        assert_eq!(
            find_phone("919876543210").unwrap().as_str(),
            "+919876543210"
        );
    }

    #[test]
    fn test_rejects_invalid() {
        // Landline-style leading digits are not mobile numbers.
        assert!(find_phone("my number is 1234567890").is_none());
        assert!(find_phone("no number here").is_none());
        assert!(find_phone("too short 987654321").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let phone = find_phone("mine is 9876543210, office is 8765432109").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");
    }

    #[test]
    fn test_extract_from_transcript() {
        let mut t = Transcript::new();
        t.push_turn("assistant", "What is your phone number?");
        t.push_turn("user", "It's +91 9123456780");
        assert_eq!(
            extract_phone(&t).unwrap().as_str(),
            "+919123456780"
        );

        let empty = Transcript::new();
        assert!(extract_phone(&empty).is_none());
    }
}
