//! Maps status lines onto the next step of an exchange.
//!
//! Each exchange declares the codes that let it proceed. Everything else
//! falls through to a class-level default: the `55x` "nothing found" family
//! becomes an empty result for the lookups that allow one, and any other
//! code fails the call.

use std::ops::RangeInclusive;

use crate::status::Status;

/// Codes meaning "no such database, strategy, match or word".
pub const NO_RESULT_CODES: RangeInclusive<u16> = 550..=555;

const SUCCESS_CLASS: u8 = 2;
const PERMANENT_ERROR_CLASS: u8 = 5;

/// The protocol step a status line answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// Greeting sent when the connection opens.
    Banner,
    /// Opening reply to `show db`.
    ShowDatabases,
    /// Opening reply to `show strat`.
    ShowStrategies,
    /// Opening reply to `define`.
    Define,
    /// Header of one definition block inside a `define` reply.
    DefinitionBlock,
    /// Opening reply to `match`.
    Match,
    /// Final status closing a multi-line reply.
    Completion,
}

/// What the caller does after reading a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Continue with the exchange (read the body, if one is declared).
    Proceed,
    /// Return an empty result; no body follows.
    EmptyResult,
    /// Abort the call with a protocol error.
    Fail,
}

struct Expectation {
    codes: &'static [u16],
    accepts_success_class: bool,
    allows_empty: bool,
}

impl Exchange {
    const fn expectation(self) -> Expectation {
        match self {
            Self::Banner => Expectation {
                codes: &[220],
                accepts_success_class: true,
                allows_empty: false,
            },
            Self::ShowDatabases => Expectation {
                codes: &[110],
                accepts_success_class: false,
                allows_empty: true,
            },
            Self::ShowStrategies => Expectation {
                codes: &[111],
                accepts_success_class: false,
                allows_empty: true,
            },
            Self::Define => Expectation {
                codes: &[150],
                accepts_success_class: false,
                allows_empty: true,
            },
            Self::DefinitionBlock => Expectation {
                codes: &[151],
                accepts_success_class: false,
                allows_empty: false,
            },
            Self::Match => Expectation {
                codes: &[152],
                accepts_success_class: false,
                allows_empty: true,
            },
            Self::Completion => Expectation {
                codes: &[250],
                accepts_success_class: false,
                allows_empty: false,
            },
        }
    }
}

/// Classifies `status` as the reply to `exchange`.
#[must_use]
pub fn disposition(exchange: Exchange, status: &Status) -> Disposition {
    let expectation = exchange.expectation();
    if expectation.codes.contains(&status.code()) {
        return Disposition::Proceed;
    }
    match status.class() {
        SUCCESS_CLASS if expectation.accepts_success_class => Disposition::Proceed,
        PERMANENT_ERROR_CLASS
            if expectation.allows_empty && NO_RESULT_CODES.contains(&status.code()) =>
        {
            Disposition::EmptyResult
        }
        _ => Disposition::Fail,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn status(line: &str) -> Status {
        Status::parse(line).expect("fixture status parses")
    }

    #[rstest]
    #[case(Exchange::Banner, "220 dict.example ready", Disposition::Proceed)]
    #[case(Exchange::Banner, "230 greetings", Disposition::Proceed)]
    #[case(Exchange::Banner, "530 access denied", Disposition::Fail)]
    #[case(Exchange::Banner, "420 server temporarily unavailable", Disposition::Fail)]
    #[case(Exchange::Banner, "552 no match", Disposition::Fail)]
    #[case(Exchange::ShowDatabases, "110 3 databases present", Disposition::Proceed)]
    #[case(Exchange::ShowDatabases, "554 no databases present", Disposition::EmptyResult)]
    #[case(Exchange::ShowStrategies, "111 2 strategies present", Disposition::Proceed)]
    #[case(Exchange::ShowStrategies, "555 no strategies available", Disposition::EmptyResult)]
    #[case(Exchange::Define, "150 2 definitions retrieved", Disposition::Proceed)]
    #[case(Exchange::Define, "550 invalid database", Disposition::EmptyResult)]
    #[case(Exchange::Define, "552 no match", Disposition::EmptyResult)]
    #[case(Exchange::Match, "152 4 matches found", Disposition::Proceed)]
    #[case(Exchange::Match, "551 invalid strategy", Disposition::EmptyResult)]
    #[case(Exchange::Match, "552 no match", Disposition::EmptyResult)]
    #[case(Exchange::Match, "553 reserved", Disposition::EmptyResult)]
    #[case(Exchange::Match, "500 command not recognized", Disposition::Fail)]
    #[case(Exchange::Match, "501 syntax error, illegal parameters", Disposition::Fail)]
    #[case(Exchange::Match, "503 command parameter not implemented", Disposition::Fail)]
    #[case(Exchange::Match, "556 unknown", Disposition::Fail)]
    #[case(Exchange::Match, "420 server temporarily unavailable", Disposition::Fail)]
    #[case(Exchange::Match, "250 ok", Disposition::Fail)]
    #[case(Exchange::Match, "999 nonsense", Disposition::Fail)]
    #[case(Exchange::DefinitionBlock, r#"151 "apple" fd "desc""#, Disposition::Proceed)]
    #[case(Exchange::DefinitionBlock, "552 no match", Disposition::Fail)]
    #[case(Exchange::Completion, "250 ok", Disposition::Proceed)]
    #[case(Exchange::Completion, "220 hello again", Disposition::Fail)]
    #[case(Exchange::Completion, "552 no match", Disposition::Fail)]
    fn partitions_replies(
        #[case] exchange: Exchange,
        #[case] line: &str,
        #[case] expected: Disposition,
    ) {
        assert_eq!(disposition(exchange, &status(line)), expected);
    }
}
