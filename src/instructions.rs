//! Instruction vocabulary understood by the robot firmware.
//!
//! Each instruction is a single ASCII byte on the wire; an instruction
//! sequence is sent as the concatenation of its tokens.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Enter the bingo area through lane 4 (left course).
    EnterL4,
    /// Enter the bingo area through lane 6 (left course).
    EnterL6,
    /// Enter the bingo area through lane 5 (right course).
    EnterR5,
    /// Enter the bingo area through lane 8 (right course).
    EnterR8,
    Straight,
    /// Two straight moves run as one.
    StraightStraight,
    SpinLeft,
    SpinRight,
    Spin180,
    /// Drive up to the black line in front of the target circle.
    PrepareToPut,
    /// Deposit the carried block from the black line.
    Put,
}

impl Instruction {
    pub const ALL: [Instruction; 11] = [
        Instruction::EnterL4,
        Instruction::EnterL6,
        Instruction::EnterR5,
        Instruction::EnterR8,
        Instruction::Straight,
        Instruction::StraightStraight,
        Instruction::SpinLeft,
        Instruction::SpinRight,
        Instruction::Spin180,
        Instruction::PrepareToPut,
        Instruction::Put,
    ];

    pub fn token(self) -> u8 {
        match self {
            Instruction::EnterL4 => b'a',
            Instruction::EnterL6 => b'b',
            Instruction::EnterR5 => b'c',
            Instruction::EnterR8 => b'd',
            Instruction::Straight => b's',
            Instruction::StraightStraight => b'w',
            Instruction::SpinLeft => b'l',
            Instruction::SpinRight => b'r',
            Instruction::Spin180 => b't',
            Instruction::PrepareToPut => b'p',
            Instruction::Put => b'q',
        }
    }

    pub fn from_token(token: u8) -> Option<Instruction> {
        Instruction::ALL.into_iter().find(|i| i.token() == token)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token() as char)
    }
}

/// An ordered instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions(Vec<Instruction>);

impl Instructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.0.push(instruction);
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().map(|i| i.token()).collect()
    }

    /// Replaces the trailing straight move with the approach-and-deposit
    /// maneuver. The robot stops on the black line short of the final circle
    /// and puts the block from there.
    pub fn finish_with_put(&mut self) {
        if self.0.last() == Some(&Instruction::Straight) {
            self.0.pop();
        }
        self.0.push(Instruction::PrepareToPut);
        self.0.push(Instruction::Put);
    }

    /// Merges each pair of consecutive straight moves into one
    /// [`Instruction::StraightStraight`], scanning left to right without
    /// overlap: three straights become a double straight and a single one.
    pub fn compress(self) -> Self {
        let mut out = Vec::with_capacity(self.0.len());
        let mut it = self.0.into_iter().peekable();
        while let Some(i) = it.next() {
            if i == Instruction::Straight && it.peek() == Some(&Instruction::Straight) {
                it.next();
                out.push(Instruction::StraightStraight);
            } else {
                out.push(i);
            }
        }
        Self(out)
    }
}

impl From<Vec<Instruction>> for Instructions {
    fn from(v: Vec<Instruction>) -> Self {
        Self(v)
    }
}

impl FromIterator<Instruction> for Instructions {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Instruction> for Instructions {
    fn extend<T: IntoIterator<Item = Instruction>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(""))
    }
}

impl FromStr for Instructions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| {
                u8::try_from(c)
                    .ok()
                    .and_then(Instruction::from_token)
                    .ok_or(Error::UnknownToken(c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Instruction::*;

    #[test]
    fn tokens_are_unique() {
        let tokens = Instruction::ALL.iter().map(|i| i.token()).unique().count();
        assert_eq!(tokens, Instruction::ALL.len());
        for i in Instruction::ALL {
            assert_eq!(Instruction::from_token(i.token()), Some(i));
        }
    }

    #[test]
    fn compress_merges_pairs_left_to_right() {
        let two: Instructions = vec![EnterL4, Straight, Straight, Put].into();
        assert_eq!(two.compress().as_slice(), &[EnterL4, StraightStraight, Put]);

        let three: Instructions = vec![Straight, Straight, Straight].into();
        assert_eq!(three.compress().as_slice(), &[StraightStraight, Straight]);

        let four: Instructions = vec![Straight, Straight, Straight, Straight].into();
        assert_eq!(
            four.compress().as_slice(),
            &[StraightStraight, StraightStraight]
        );

        let split: Instructions = vec![Straight, SpinLeft, Straight].into();
        assert_eq!(split.clone().compress(), split);
    }

    #[test]
    fn finish_with_put_drops_only_a_trailing_straight() {
        let mut seq: Instructions = vec![EnterL6, SpinRight, Straight].into();
        seq.finish_with_put();
        assert_eq!(seq.as_slice(), &[EnterL6, SpinRight, PrepareToPut, Put]);
    }

    #[test]
    fn display_and_parse() {
        let seq: Instructions = vec![EnterR8, Spin180, StraightStraight, PrepareToPut, Put].into();
        assert_eq!(seq.to_string(), "dtwpq");
        assert_eq!("dtwpq".parse::<Instructions>().unwrap(), seq);
        assert_eq!(seq.to_bytes(), b"dtwpq".to_vec());
        assert_eq!(
            "ax".parse::<Instructions>(),
            Err(Error::UnknownToken('x'))
        );
        assert_eq!(
            "aé".parse::<Instructions>(),
            Err(Error::UnknownToken('é'))
        );
    }
}
