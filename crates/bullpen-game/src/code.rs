//! Secret/guess codes and bulls-and-cows scoring.

use std::fmt;

/// Parse error for [`Code`]: wrong length, a character outside `1`-`9`,
/// or a repeated digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("code must be 4 distinct digits 1-9")]
pub struct InvalidCode;

/// A validated 4-character code: every character a digit `1`-`9`, all
/// four distinct. Zero is excluded, so there are 9*8*7*6 possible codes.
///
/// Stored as the raw ASCII bytes — positional comparison during scoring
/// works directly on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code([u8; 4]);

impl Code {
    /// Parses and validates a code from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        let bytes = s.as_bytes();
        let digits: [u8; 4] = bytes.try_into().map_err(|_| InvalidCode)?;
        if !digits.iter().all(|b| (b'1'..=b'9').contains(b)) {
            return Err(InvalidCode);
        }
        // No repeats. Four elements, so pairwise is the whole check.
        for i in 0..4 {
            for j in (i + 1)..4 {
                if digits[i] == digits[j] {
                    return Err(InvalidCode);
                }
            }
        }
        Ok(Self(digits))
    }

    /// Scores `guess` against this code as the secret.
    ///
    /// Positional-first: a position that matches exactly is a bull and is
    /// never reconsidered as a cow. Codes have no repeated digits, so no
    /// multiset bookkeeping is needed beyond that.
    pub fn score(&self, guess: &Code) -> Score {
        let mut bulls = 0;
        let mut cows = 0;
        for i in 0..4 {
            if guess.0[i] == self.0[i] {
                bulls += 1;
            } else if self.0.contains(&guess.0[i]) {
                cows += 1;
            }
        }
        Score { bulls, cows }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            fmt::Write::write_char(f, char::from(b))?;
        }
        Ok(())
    }
}

/// The result of scoring one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Positions matching the secret exactly in value and position.
    pub bulls: u8,
    /// Digits present in the secret but at a different position.
    pub cows: u8,
}

impl Score {
    /// A guess wins when all four positions are bulls.
    pub fn is_win(&self) -> bool {
        self.bulls == 4
    }
}
