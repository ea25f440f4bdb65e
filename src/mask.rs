//! Partial redaction of sensitive values for display.
//!
//! Positions are counted in chars so multi-byte input never splits a
//! character.

use thiserror::Error;

/// Mask used in emails. Its length never depends on the input.
const EMAIL_MASK: &str = "*****";

/// Number of trailing phone characters left visible.
const PHONE_VISIBLE: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaskError {
    #[error("Malformed email address: expected <local>@<name>.<suffix>")]
    MalformedEmail,
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Masks an email as `tes*****@ex*****.com`.
///
/// Keeps the first 3 chars of the local part, the first 2 of the domain name
/// and the label right after the first dot. Labels after a second dot are
/// dropped.
///
/// # Errors
///
/// Returns [`MaskError::MalformedEmail`] if there is no `@` or the domain has
/// no `.`.
pub fn email(addr: &str) -> Result<String, MaskError> {
    let mut parts = addr.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().ok_or(MaskError::MalformedEmail)?;

    let mut labels = domain.split('.');
    let name = labels.next().unwrap_or_default();
    let suffix = labels.next().ok_or(MaskError::MalformedEmail)?;

    Ok(format!(
        "{}{EMAIL_MASK}@{}{EMAIL_MASK}.{}",
        prefix(local, 3),
        prefix(name, 2),
        suffix
    ))
}

/// Replaces every digit except those in the last 5 chars with `x`.
/// Other characters are kept.
pub fn phone(digits: &str) -> String {
    let len = digits.chars().count();
    let hidden = len.saturating_sub(PHONE_VISIBLE);

    digits
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden && c.is_ascii_digit() { 'x' } else { c })
        .collect()
}

/// Keeps `start_keep` leading and `end_keep` trailing chars and replaces the
/// rest with `mask_char`.
///
/// Input no longer than `start_keep + end_keep` is returned unchanged.
pub fn text(data: &str, start_keep: usize, end_keep: usize, mask_char: char) -> String {
    let len = data.chars().count();
    let keep = start_keep.saturating_add(end_keep);
    if len <= keep {
        return data.to_string();
    }

    data.chars()
        .enumerate()
        .map(|(i, c)| {
            if i < start_keep || i >= len - end_keep {
                c
            } else {
                mask_char
            }
        })
        .collect()
}

/// [`text`] keeping 2 chars on each side, masked with `*`.
pub fn text_default(data: &str) -> String {
    text(data, 2, 2, '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_masks_local_and_domain() {
        assert_eq!(
            email("test@example.com"),
            Ok("tes*****@ex*****.com".to_string())
        );
    }

    #[test]
    fn test_email_mask_has_fixed_length() {
        assert_eq!(
            email("averyveryverylongname@x.io"),
            Ok("ave*****@x*****.io".to_string())
        );
        assert_eq!(email("a@b.c"), Ok("a*****@b*****.c".to_string()));
    }

    #[test]
    fn test_email_drops_labels_after_second_dot() {
        assert_eq!(
            email("john@mail.example.co.uk"),
            Ok("joh*****@ma*****.example".to_string())
        );
    }

    #[test]
    fn test_email_malformed() {
        assert_eq!(email("no-at-sign.com"), Err(MaskError::MalformedEmail));
        assert_eq!(email("user@localhost"), Err(MaskError::MalformedEmail));
        assert_eq!(email(""), Err(MaskError::MalformedEmail));
    }

    #[test]
    fn test_phone() {
        assert_eq!(phone("1234567890"), "xxxxx67890");
        assert_eq!(phone("+1 (555) 123-4567"), "+x (xxx) xxx-4567");
        assert_eq!(phone("12345"), "12345");
        assert_eq!(phone("123"), "123");
        assert_eq!(phone(""), "");
    }

    #[test]
    fn test_text() {
        assert_eq!(text("testingtesting", 2, 2, '*'), "te**********ng");
        assert_eq!(text("secret", 1, 0, '#'), "s#####");
        assert_eq!(text("secret", 0, 3, '-'), "---ret");
    }

    #[test]
    fn test_text_below_threshold_is_unchanged() {
        assert_eq!(text("ab", 2, 2, '*'), "ab");
        assert_eq!(text("abcd", 2, 2, '*'), "abcd");
        assert_eq!(text("abcde", 2, 2, '*'), "ab*de");
        assert_eq!(text("anything", usize::MAX, 1, '*'), "anything");
    }

    #[test]
    fn test_text_default_and_multibyte() {
        assert_eq!(text_default("1234567890"), "12******90");
        assert_eq!(text_default("ñandú-ñandú"), "ña*******dú");
    }
}
