//! Memo/reference grammar validation.
//!
//! Accepts 0-16 ASCII characters drawn from uppercase letters, digits, and
//! dash, where letter-only and digit-only groups must strictly alternate
//! and the memo may not end on a dash. Implemented as the 5-state DFA
//! described by the grammar: `{START, DIGIT, DIGIT_DASH, UPPER, UPPER_DASH}`.
use mochimo_types::CoreError;

const MAX_LEN: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Digit,
    DigitDash,
    Upper,
    UpperDash,
}

/// Validates a memo string against the grammar, returning `Ok(())` or
/// `CoreError::InvalidMemo`.
pub fn validate(memo: &str) -> Result<(), CoreError> {
    if memo.len() > MAX_LEN || !memo.is_ascii() {
        return Err(CoreError::InvalidMemo(memo.to_string()));
    }

    let mut state = State::Start;
    for c in memo.chars() {
        state = match (state, c) {
            (State::Start, c) if c.is_ascii_digit() => State::Digit,
            (State::Start, c) if c.is_ascii_uppercase() => State::Upper,
            (State::UpperDash, c) if c.is_ascii_digit() => State::Digit,
            (State::DigitDash, c) if c.is_ascii_uppercase() => State::Upper,
            (State::Digit, c) if c.is_ascii_digit() => State::Digit,
            (State::Upper, c) if c.is_ascii_uppercase() => State::Upper,
            (State::Digit, '-') => State::DigitDash,
            (State::Upper, '-') => State::UpperDash,
            _ => return Err(CoreError::InvalidMemo(memo.to_string())),
        };
    }

    match state {
        State::Start | State::Digit | State::Upper => Ok(()),
        State::DigitDash | State::UpperDash => Err(CoreError::InvalidMemo(memo.to_string())),
    }
}

/// Right-pads a validated memo with zero bytes to the transaction's fixed
/// 16-byte field.
pub fn pad(memo: &str) -> Result<[u8; 16], CoreError> {
    validate(memo)?;
    let mut out = [0u8; 16];
    out[..memo.len()].copy_from_slice(memo.as_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_memo() {
        assert!(validate("").is_ok());
    }

    #[test]
    fn accepts_valid_grammar() {
        for memo in ["ABC-123", "123-ABC", "AB-12-CD", "PAYMENT", "42"] {
            assert!(validate(memo).is_ok(), "expected {memo} to be accepted");
        }
    }

    #[test]
    fn rejects_invalid_grammar() {
        for memo in ["ABC-DEF", "123-456", "Test-1", "ABC-"] {
            assert!(validate(memo).is_err(), "expected {memo} to be rejected");
        }
    }

    #[test]
    fn rejects_overlong_memo() {
        assert!(validate("ABCDEFGHIJKLMNOPQ").is_err());
    }

    #[test]
    fn pad_right_pads_with_zero_bytes() {
        let padded = pad("AB").unwrap();
        assert_eq!(&padded[..2], b"AB");
        assert!(padded[2..].iter().all(|&b| b == 0));
    }
}
