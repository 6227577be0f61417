//! Built-in AWS architecture diagrams.
//!
//! Each [`Blueprint`] declares one complete diagram through the
//! [`DiagramBuilder`](crate::DiagramBuilder). The two are independent
//! examples of the same pattern.

mod multi_account;
mod shared_vpc;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use stratus_core::{error::ConstructError, semantic::Diagram};

/// A built-in diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blueprint {
    /// Organization with Dev/Test/Prod accounts, one VPC each, shared logging and KMS.
    MultiAccount,
    /// Network account sharing one VPC with workload accounts, plus a compliance account.
    SharedVpc,
}

impl Blueprint {
    /// All blueprints.
    pub const ALL: [Blueprint; 2] = [Self::MultiAccount, Self::SharedVpc];

    /// Declares the diagram.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] if the declaration is malformed.
    pub fn build(self) -> Result<Diagram, ConstructError> {
        match self {
            Self::MultiAccount => multi_account::build(),
            Self::SharedVpc => shared_vpc::build(),
        }
    }
}

impl FromStr for Blueprint {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-account" => Ok(Self::MultiAccount),
            "shared-vpc" => Ok(Self::SharedVpc),
            _ => Err("Unknown blueprint"),
        }
    }
}

impl From<Blueprint> for &'static str {
    fn from(val: Blueprint) -> Self {
        match val {
            Blueprint::MultiAccount => "multi-account",
            Blueprint::SharedVpc => "shared-vpc",
        }
    }
}

impl Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_names_roundtrip() {
        for blueprint in Blueprint::ALL {
            assert_eq!(blueprint.to_string().parse::<Blueprint>(), Ok(blueprint));
        }
        assert!("single-account".parse::<Blueprint>().is_err());
    }

    #[test]
    fn test_every_blueprint_builds() {
        for blueprint in Blueprint::ALL {
            let diagram = blueprint.build().unwrap();
            assert!(!diagram.nodes().is_empty(), "{blueprint} has no nodes");
            assert!(!diagram.edges().is_empty(), "{blueprint} has no edges");
        }
    }
}
