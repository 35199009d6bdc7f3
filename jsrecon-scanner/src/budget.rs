use std::fmt;
use std::str::FromStr;

/// Remaining depth of script-to-script reference following.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionBudget {
    /// Never exhausts; only the visited set stops the descent.
    #[default]
    Unlimited,
    Remaining(u32),
}

impl RecursionBudget {
    pub fn is_exhausted(self) -> bool {
        matches!(self, RecursionBudget::Remaining(0))
    }

    /// Budget for one level deeper.
    pub fn descend(self) -> Self {
        match self {
            RecursionBudget::Unlimited => RecursionBudget::Unlimited,
            RecursionBudget::Remaining(n) => RecursionBudget::Remaining(n.saturating_sub(1)),
        }
    }
}

impl fmt::Display for RecursionBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecursionBudget::Unlimited => write!(f, "unlimited"),
            RecursionBudget::Remaining(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for RecursionBudget {
    type Err = String;

    /// Accepts a non-negative number or `inf`/`infinity`/`unlimited`.
    /// A fractional depth rounds up, so `2.5` follows three levels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(RecursionBudget::Unlimited);
        }

        match trimmed.to_lowercase().as_str() {
            "inf" | "+inf" | "infinity" | "+infinity" | "unlimited" => {
                return Ok(RecursionBudget::Unlimited);
            }
            _ => {}
        }

        let depth: f64 = trimmed
            .parse()
            .map_err(|_| format!("'{}' is not a number", trimmed))?;

        if depth.is_nan() || depth < 0.0 {
            return Err(format!("'{}' is not a non-negative number", trimmed));
        }
        if depth.is_infinite() || depth >= u32::MAX as f64 {
            return Ok(RecursionBudget::Unlimited);
        }

        Ok(RecursionBudget::Remaining(depth.ceil() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_depth() {
        assert_eq!("3".parse(), Ok(RecursionBudget::Remaining(3)));
        assert_eq!("0".parse(), Ok(RecursionBudget::Remaining(0)));
    }

    #[test]
    fn test_parse_fractional_depth_rounds_up() {
        assert_eq!("2.5".parse(), Ok(RecursionBudget::Remaining(3)));
        assert_eq!("0.1".parse(), Ok(RecursionBudget::Remaining(1)));
    }

    #[test]
    fn test_parse_unlimited_forms() {
        for input in ["inf", "Infinity", "unlimited", "", "  "] {
            assert_eq!(
                input.parse::<RecursionBudget>(),
                Ok(RecursionBudget::Unlimited),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage_and_negatives() {
        assert!("deep".parse::<RecursionBudget>().is_err());
        assert!("-1".parse::<RecursionBudget>().is_err());
        assert!("NaN".parse::<RecursionBudget>().is_err());
    }

    #[test]
    fn test_descend() {
        assert_eq!(
            RecursionBudget::Remaining(2).descend(),
            RecursionBudget::Remaining(1)
        );
        assert_eq!(
            RecursionBudget::Remaining(0).descend(),
            RecursionBudget::Remaining(0)
        );
        assert_eq!(RecursionBudget::Unlimited.descend(), RecursionBudget::Unlimited);
    }

    #[test]
    fn test_exhaustion() {
        assert!(RecursionBudget::Remaining(0).is_exhausted());
        assert!(!RecursionBudget::Remaining(1).is_exhausted());
        assert!(!RecursionBudget::Unlimited.is_exhausted());
    }
}
