//! Identifiers for plan components and the people that hold them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique key for a plan component within a simulator.
///
/// Keys are handed out sequentially in insertion order, which also makes them
/// the secondary tie-break when two components emit transforms on the same
/// date. They display as letters: `AA` through `ZZ`, then `AAA` onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentKey(pub u16);

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Each label width holds 26^width keys
        let mut n = u32::from(self.0);
        let mut width = 2;
        while n >= 26u32.pow(width) {
            n -= 26u32.pow(width);
            width += 1;
        }
        let mut label = [b'A'; 4];
        for slot in label[..width as usize].iter_mut().rev() {
            *slot = b'A' + (n % 26) as u8;
            n /= 26;
        }
        for &letter in &label[..width as usize] {
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

/// Which person in the household a component or cash flow belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Holder {
    Primary,
    Partner,
}

impl Holder {
    pub const ALL: [Holder; 2] = [Holder::Primary, Holder::Partner];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Holder::Primary => 0,
            Holder::Partner => 1,
        }
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Primary => write!(f, "primary"),
            Holder::Partner => write!(f, "partner"),
        }
    }
}
