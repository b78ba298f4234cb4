use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::error::{BvhError, BvhResult};

/// Cursor over the whitespace-delimited tokens of a .bvh file.
///
/// Any run of spaces, tabs, carriage returns or newlines is a single
/// separator, so indentation and line structure carry no meaning and no
/// empty tokens are ever produced.
pub struct Tokens<'a> {
    iter: Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Tokens<'a> {
        Tokens {
            iter: text.split_whitespace().peekable(),
        }
    }

    pub fn next(&mut self) -> Option<&'a str> {
        self.iter.next()
    }

    pub fn peek(&mut self) -> Option<&'a str> {
        self.iter.peek().copied()
    }

    /// Next token, or [`BvhError::TruncatedBlock`] if the stream ended.
    pub fn next_or_truncated(&mut self) -> BvhResult<&'a str> {
        self.iter.next().ok_or(BvhError::TruncatedBlock)
    }

    pub fn next_f64(&mut self) -> BvhResult<f64> {
        let token = self.next_or_truncated()?;
        token
            .parse::<f64>()
            .map_err(|_| BvhError::malformed(format!("expected a number, found `{token}`")))
    }

    pub fn next_usize(&mut self) -> BvhResult<usize> {
        let token = self.next_or_truncated()?;
        token
            .parse::<usize>()
            .map_err(|_| BvhError::malformed(format!("expected an integer, found `{token}`")))
    }

    /// Consume a keyword that may carry its trailing colon glued on
    /// (`Frames:`) or as a separate `:` token (`Frames` `:`). The bare
    /// keyword with no colon at all is also accepted.
    pub fn expect_keyword(&mut self, keyword: &str) -> BvhResult<()> {
        let token = self.next_or_truncated()?;
        let stripped = token.strip_suffix(':').unwrap_or(token);
        if stripped != keyword {
            return Err(BvhError::malformed(format!(
                "expected `{keyword}`, found `{token}`"
            )));
        }
        if stripped == token && self.peek() == Some(":") {
            self.next();
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
