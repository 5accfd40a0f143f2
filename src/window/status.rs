use std::fmt;

/// Default warning threshold for window utilization (80%)
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;

/// Default critical threshold for window utilization (95%)
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.95;

/// How full a request window is once a prompt and completion are counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowStatus {
    Ok { utilization: f64, remaining: u64 },
    Warning { utilization: f64, remaining: u64 },
    Critical { utilization: f64, remaining: u64 },
    Exceeded { overage: u64 },
}

impl WindowStatus {
    pub fn should_proceed(&self) -> bool {
        !matches!(self, Self::Exceeded { .. })
    }

    pub fn utilization(&self) -> Option<f64> {
        match self {
            Self::Ok { utilization, .. }
            | Self::Warning { utilization, .. }
            | Self::Critical { utilization, .. } => Some(*utilization),
            Self::Exceeded { .. } => None,
        }
    }

    /// Tokens still free in the window; zero once it is exceeded.
    pub fn remaining(&self) -> u64 {
        match self {
            Self::Ok { remaining, .. }
            | Self::Warning { remaining, .. }
            | Self::Critical { remaining, .. } => *remaining,
            Self::Exceeded { .. } => 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::Warning { .. } => "warning",
            Self::Critical { .. } => "critical",
            Self::Exceeded { .. } => "exceeded",
        }
    }
}

impl fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exceeded { overage } => write!(f, "exceeded by {overage} tokens"),
            Self::Ok { utilization, remaining }
            | Self::Warning { utilization, remaining }
            | Self::Critical { utilization, remaining } => write!(
                f,
                "{} ({:.0}% used, {remaining} tokens remaining)",
                self.label(),
                utilization * 100.0
            ),
        }
    }
}

/// Tokens requested from a model's request window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenWindow {
    pub limit: u64,
    pub requested: u64,
    pub status: WindowStatus,
}

impl TokenWindow {
    pub fn new(limit: u64, requested: u64) -> Self {
        Self::with_thresholds(
            limit,
            requested,
            DEFAULT_WARNING_THRESHOLD,
            DEFAULT_CRITICAL_THRESHOLD,
        )
    }

    pub fn with_thresholds(limit: u64, requested: u64, warning: f64, critical: f64) -> Self {
        let utilization = if limit == 0 {
            0.0
        } else {
            requested as f64 / limit as f64
        };
        let remaining = limit.saturating_sub(requested);

        let status = if requested > limit {
            WindowStatus::Exceeded {
                overage: requested - limit,
            }
        } else if utilization >= critical {
            WindowStatus::Critical {
                utilization,
                remaining,
            }
        } else if utilization >= warning {
            WindowStatus::Warning {
                utilization,
                remaining,
            }
        } else {
            WindowStatus::Ok {
                utilization,
                remaining,
            }
        };

        Self {
            limit,
            requested,
            status,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.status.remaining()
    }

    pub fn fits(&self) -> bool {
        self.status.should_proceed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_status() {
        assert!(matches!(
            TokenWindow::new(2049, 1000).status,
            WindowStatus::Ok { remaining: 1049, .. }
        ));
        assert!(matches!(
            TokenWindow::new(2000, 1700).status,
            WindowStatus::Warning { .. }
        ));
        assert!(matches!(
            TokenWindow::new(2000, 1950).status,
            WindowStatus::Critical { .. }
        ));
        assert!(matches!(
            TokenWindow::new(2049, 2100).status,
            WindowStatus::Exceeded { overage: 51 }
        ));
    }

    #[test]
    fn test_window_boundaries() {
        let full = TokenWindow::new(1025, 1025);
        assert!(full.fits());
        assert_eq!(full.remaining(), 0);

        let over = TokenWindow::new(1025, 1026);
        assert!(!over.fits());
        assert!(over.status.utilization().is_none());
    }

    #[test]
    fn test_window_status_display() {
        assert_eq!(
            TokenWindow::new(2000, 1000).status.to_string(),
            "ok (50% used, 1000 tokens remaining)"
        );
        assert_eq!(
            TokenWindow::new(2000, 1700).status.to_string(),
            "warning (85% used, 300 tokens remaining)"
        );
        assert_eq!(
            TokenWindow::new(2049, 2100).status.to_string(),
            "exceeded by 51 tokens"
        );
    }

    #[test]
    fn test_exceeded_has_nothing_remaining() {
        let window = TokenWindow::new(2049, 2100);
        assert_eq!(window.status.remaining(), 0);
        assert_eq!(window.remaining(), 0);
    }

    #[test]
    fn test_zero_limit() {
        let window = TokenWindow::new(0, 0);
        assert!(window.fits());
        assert_eq!(window.status.utilization(), Some(0.0));
    }
}
