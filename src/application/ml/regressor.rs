use super::forest_regressor::{ForestParameters, ForestRegressor};
use super::mlp_regressor::{MlpParameters, MlpRegressor};
use crate::domain::ports::Regressor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressorKind {
    #[default]
    Mlp,
    Forest,
}

impl std::str::FromStr for RegressorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mlp" => Ok(RegressorKind::Mlp),
            "forest" | "random_forest" => Ok(RegressorKind::Forest),
            _ => anyhow::bail!("Invalid regressor: {}. Must be 'mlp' or 'forest'", s),
        }
    }
}

impl fmt::Display for RegressorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressorKind::Mlp => write!(f, "mlp"),
            RegressorKind::Forest => write!(f, "forest"),
        }
    }
}

/// Everything needed to build a fresh, unfitted regressor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegressorConfig {
    pub kind: RegressorKind,
    pub mlp: MlpParameters,
    pub forest: ForestParameters,
}

impl RegressorConfig {
    pub fn new(kind: RegressorKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn build(&self) -> Box<dyn Regressor> {
        match self.kind {
            RegressorKind::Mlp => Box::new(MlpRegressor::new(self.mlp.clone())),
            RegressorKind::Forest => Box::new(ForestRegressor::new(self.forest.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(RegressorKind::from_str("MLP").unwrap(), RegressorKind::Mlp);
        assert_eq!(
            RegressorKind::from_str(" forest ").unwrap(),
            RegressorKind::Forest
        );
        assert_eq!(
            RegressorKind::from_str("random_forest").unwrap(),
            RegressorKind::Forest
        );
        assert!(RegressorKind::from_str("lstm").is_err());
    }

    #[test]
    fn test_build_selects_backend() {
        assert_eq!(RegressorConfig::default().build().name(), "Feed-forward MLP");
        assert_eq!(
            RegressorConfig::new(RegressorKind::Forest).build().name(),
            "SmartCore Random Forest"
        );
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [RegressorKind::Mlp, RegressorKind::Forest] {
            assert_eq!(RegressorKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}
