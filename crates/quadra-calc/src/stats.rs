//! Work counters for an integration call.

/// Statistics gathered while integrating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    /// Integrand evaluations, probes included.
    pub evaluations: u64,
    /// Segments whose estimate was folded into the total.
    pub accepted: u64,
    /// Segments that were bisected.
    pub splits: u64,
    /// Deepest subdivision level reached.
    pub max_depth: u32,
    /// Highest quadrature degree used.
    pub max_degree: usize,
}

impl IntegrationStats {
    /// Combines counters of independently integrated pieces.
    pub fn merge(&self, other: &IntegrationStats) -> IntegrationStats {
        IntegrationStats {
            evaluations: self.evaluations + other.evaluations,
            accepted: self.accepted + other.accepted,
            splits: self.splits + other.splits,
            max_depth: self.max_depth.max(other.max_depth),
            max_degree: self.max_degree.max(other.max_degree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let a = IntegrationStats {
            evaluations: 10,
            accepted: 2,
            splits: 1,
            max_depth: 1,
            max_degree: 8,
        };
        let b = IntegrationStats {
            evaluations: 5,
            accepted: 1,
            splits: 0,
            max_depth: 0,
            max_degree: 16,
        };
        let m = a.merge(&b);
        assert_eq!(m.evaluations, 15);
        assert_eq!(m.accepted, 3);
        assert_eq!(m.max_degree, 16);
        assert_eq!(m.max_depth, 1);
    }
}
