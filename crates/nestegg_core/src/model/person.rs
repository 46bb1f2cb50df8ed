use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A member of the household
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub birthday: Date,
}

impl Person {
    pub fn new(birthday: Date) -> Self {
        Self { birthday }
    }
}
