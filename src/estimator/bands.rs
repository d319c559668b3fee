use serde::Serialize;
use std::fmt;

/// Score band shown on the results page. Derived from the score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CreditBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditBand {
    /// Thresholds are checked highest first: >=750, >=700, >=650.
    pub fn from_score(score: u32) -> Self {
        if score >= 750 {
            CreditBand::Excellent
        } else if score >= 700 {
            CreditBand::Good
        } else if score >= 650 {
            CreditBand::Fair
        } else {
            CreditBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditBand::Poor => "Poor",
            CreditBand::Fair => "Fair",
            CreditBand::Good => "Good",
            CreditBand::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for CreditBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perceived lending risk. Ordered from worst to best so that it grows with the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 700 {
            RiskLevel::Low
        } else if score >= 650 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(CreditBand::from_score(300), CreditBand::Poor);
        assert_eq!(CreditBand::from_score(649), CreditBand::Poor);
        assert_eq!(CreditBand::from_score(650), CreditBand::Fair);
        assert_eq!(CreditBand::from_score(699), CreditBand::Fair);
        assert_eq!(CreditBand::from_score(700), CreditBand::Good);
        assert_eq!(CreditBand::from_score(749), CreditBand::Good);
        assert_eq!(CreditBand::from_score(750), CreditBand::Excellent);
        assert_eq!(CreditBand::from_score(900), CreditBand::Excellent);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_score(649), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(650), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(699), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(700), RiskLevel::Low);
    }

    #[test]
    fn test_band_and_risk_monotonic() {
        let mut prev_band = CreditBand::from_score(300);
        let mut prev_risk = RiskLevel::from_score(300);
        for score in 301..=900 {
            let band = CreditBand::from_score(score);
            let risk = RiskLevel::from_score(score);
            assert!(band >= prev_band, "band dropped at {}", score);
            assert!(risk >= prev_risk, "risk got worse at {}", score);
            prev_band = band;
            prev_risk = risk;
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CreditBand::Excellent.to_string(), "Excellent");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }
}
