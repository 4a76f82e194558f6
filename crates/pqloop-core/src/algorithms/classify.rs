//! Constant/balanced classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{NetError, NetResult};
use crate::network::NetworkController;

/// Oracle family, used both as the input and as the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    Constant,
    Balanced,
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Constant => write!(f, "Constant"),
            OracleKind::Balanced => write!(f, "Balanced"),
        }
    }
}

impl FromStr for OracleKind {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" => Ok(OracleKind::Constant),
            "balanced" => Ok(OracleKind::Balanced),
            other => Err(NetError::InvalidConfiguration(format!(
                "unknown oracle kind '{other}', expected constant or balanced"
            ))),
        }
    }
}

impl NetworkController {
    /// Run the classifier on a fresh network of `n` units.
    ///
    /// Any running network is stopped first. The sequence is randomize,
    /// flip one random slot for a balanced oracle, randomize again, measure.
    /// An all-zero measurement reads as `Constant`. The network is stopped
    /// again before returning, including on error.
    #[instrument(skip(self))]
    pub async fn classify(&self, n: usize, oracle: OracleKind) -> NetResult<OracleKind> {
        self.stop().await?;
        self.start(n).await?;

        let measured = async {
            self.apply_global_randomize().await?;
            if oracle == OracleKind::Balanced {
                self.apply_flip(self.entropy.index(n)).await?;
            }
            self.apply_global_randomize().await?;
            self.measure().await
        }
        .await;

        self.stop().await?;
        let measured = measured?;

        let verdict = if measured.is_all_zero() {
            OracleKind::Constant
        } else {
            OracleKind::Balanced
        };
        info!(measured = %measured, verdict = %verdict, "Classified");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oracle_kind() {
        assert_eq!("constant".parse::<OracleKind>().unwrap(), OracleKind::Constant);
        assert_eq!("Balanced".parse::<OracleKind>().unwrap(), OracleKind::Balanced);
        assert!("linear".parse::<OracleKind>().is_err());
    }
}
