//! Numeric status lines.

use std::fmt;

use crate::error::DictError;

const CODE_WIDTH: usize = 3;

/// A parsed `DDD detail text` status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: u16,
    class: u8,
    detail: String,
}

impl Status {
    /// Parses a status line with its line terminator already removed.
    ///
    /// # Errors
    ///
    /// Returns [`DictError::MalformedStatus`] unless the line starts with
    /// three ASCII digits followed by a space.
    pub fn parse(line: &str) -> Result<Self, DictError> {
        let malformed = || DictError::MalformedStatus {
            line: line.to_owned(),
        };
        let (digits, rest) = line.split_at_checked(CODE_WIDTH).ok_or_else(malformed)?;
        if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }
        let detail = rest.strip_prefix(' ').ok_or_else(malformed)?;
        let code = digits.parse::<u16>().map_err(|_| malformed())?;
        let class = digits
            .bytes()
            .next()
            .map(|byte| byte - b'0')
            .ok_or_else(malformed)?;
        Ok(Self {
            code,
            class,
            detail: detail.to_owned(),
        })
    }

    /// Three-digit reply code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Hundreds digit of the code.
    #[must_use]
    pub const fn class(&self) -> u8 {
        self.class
    }

    /// Free text following the code.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Consumes the status, keeping only its detail text.
    #[must_use]
    pub fn into_detail(self) -> String {
        self.detail
    }
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:03} {}", self.code, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_banner() {
        let status = Status::parse("220 Welcome").expect("banner parses");
        assert_eq!(status.code(), 220);
        assert_eq!(status.class(), 2);
        assert_eq!(status.detail(), "Welcome");
    }

    #[rstest]
    #[case("150 2 definitions retrieved", 150, 1, "2 definitions retrieved")]
    #[case(r#"151 "apple" fd "desc""#, 151, 1, r#""apple" fd "desc""#)]
    #[case("552 no match", 552, 5, "no match")]
    #[case("250 ", 250, 2, "")]
    #[case("099 odd", 99, 0, "odd")]
    fn derives_class_from_hundreds_digit(
        #[case] line: &str,
        #[case] code: u16,
        #[case] class: u8,
        #[case] detail: &str,
    ) {
        let status = Status::parse(line).expect("status parses");
        assert_eq!(status.code(), code);
        assert_eq!(status.class(), class);
        assert_eq!(status.detail(), detail);
    }

    #[rstest]
    #[case::no_digits("bad")]
    #[case::empty("")]
    #[case::short_code("25 ok")]
    #[case::missing_space("250ok")]
    #[case::bare_code("250")]
    #[case::data_line(".")]
    #[case::letters_in_code("2x0 ok")]
    #[case::multibyte("2é0 ok")]
    fn rejects_malformed_lines(#[case] line: &str) {
        let error = Status::parse(line).expect_err("line must be rejected");
        assert!(
            matches!(error, DictError::MalformedStatus { line: ref seen } if seen == line),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn display_reproduces_the_wire_form() {
        let status = Status::parse("250 ok [d/m/c = 2/0/20; 0.000r 0.000u 0.000s]")
            .expect("status parses");
        assert_eq!(
            status.to_string(),
            "250 ok [d/m/c = 2/0/20; 0.000r 0.000u 0.000s]"
        );
    }
}
