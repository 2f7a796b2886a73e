// Mark value object
// The answer a user gives on a matches card

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Yes,
    No,
    Maybe,
}

impl Mark {
    /// Yes and maybe both count as interest in the other user.
    pub fn is_positive(&self) -> bool {
        matches!(self, Mark::Yes | Mark::Maybe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_and_maybe_are_positive() {
        assert!(Mark::Yes.is_positive());
        assert!(Mark::Maybe.is_positive());
        assert!(!Mark::No.is_positive());
    }

    #[test]
    fn unknown_marks_are_rejected_on_the_wire() {
        let mark: Mark = serde_json::from_str("\"maybe\"").expect("deserialize mark");
        assert_eq!(mark, Mark::Maybe);
        assert!(serde_json::from_str::<Mark>("\"skip\"").is_err());
    }
}
