//! Infrastructure node kinds.
//!
//! Every node in a diagram carries a [`NodeKind`] describing which service it
//! stands for. Kinds are grouped into a [`Category`], and the category decides
//! how the node is drawn (shape and fill) since Stratus does not ship service
//! icons.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Service category a [`NodeKind`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Management,
    Network,
    Compute,
    Database,
    Security,
    Storage,
}

impl Category {
    /// Graphviz shape used for nodes of this category.
    pub fn shape(self) -> &'static str {
        match self {
            Self::General => "ellipse",
            Self::Management => "folder",
            Self::Network => "hexagon",
            Self::Compute => "box",
            Self::Database => "cylinder",
            Self::Security => "octagon",
            Self::Storage => "tab",
        }
    }

    /// Fill color used for nodes of this category, in Graphviz hex notation.
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::General => "#d5dbdb",
            Self::Management => "#f9d0e3",
            Self::Network => "#ddd0ff",
            Self::Compute => "#fbd8bf",
            Self::Database => "#c8d8fa",
            Self::Security => "#f8d0d5",
            Self::Storage => "#d9ecc4",
        }
    }
}

impl From<Category> for &'static str {
    fn from(val: Category) -> Self {
        match val {
            Category::General => "general",
            Category::Management => "management",
            Category::Network => "network",
            Category::Compute => "compute",
            Category::Database => "database",
            Category::Security => "security",
            Category::Storage => "storage",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// The infrastructure element a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    User,
    OrganizationsAccount,
    Vpc,
    PublicSubnet,
    PrivateSubnet,
    InternetGateway,
    NatGateway,
    TransitGateway,
    LoadBalancer,
    Ec2,
    Rds,
    S3,
    Kms,
    Iam,
    CloudTrail,
    Config,
    GuardDuty,
    SecurityHub,
    CloudWatch,
    Generic,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [NodeKind; 20] = [
        Self::User,
        Self::OrganizationsAccount,
        Self::Vpc,
        Self::PublicSubnet,
        Self::PrivateSubnet,
        Self::InternetGateway,
        Self::NatGateway,
        Self::TransitGateway,
        Self::LoadBalancer,
        Self::Ec2,
        Self::Rds,
        Self::S3,
        Self::Kms,
        Self::Iam,
        Self::CloudTrail,
        Self::Config,
        Self::GuardDuty,
        Self::SecurityHub,
        Self::CloudWatch,
        Self::Generic,
    ];

    /// Returns the category this kind belongs to.
    pub fn category(self) -> Category {
        match self {
            Self::User | Self::Generic => Category::General,
            Self::OrganizationsAccount | Self::CloudTrail | Self::Config | Self::CloudWatch => {
                Category::Management
            }
            Self::Vpc
            | Self::PublicSubnet
            | Self::PrivateSubnet
            | Self::InternetGateway
            | Self::NatGateway
            | Self::TransitGateway
            | Self::LoadBalancer => Category::Network,
            Self::Ec2 => Category::Compute,
            Self::Rds => Category::Database,
            Self::Kms | Self::Iam | Self::GuardDuty | Self::SecurityHub => Category::Security,
            Self::S3 => Category::Storage,
        }
    }
}

impl FromStr for NodeKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| <&'static str>::from(*kind) == s)
            .ok_or("Unsupported node kind")
    }
}

impl From<NodeKind> for &'static str {
    fn from(val: NodeKind) -> Self {
        match val {
            NodeKind::User => "user",
            NodeKind::OrganizationsAccount => "organizations_account",
            NodeKind::Vpc => "vpc",
            NodeKind::PublicSubnet => "public_subnet",
            NodeKind::PrivateSubnet => "private_subnet",
            NodeKind::InternetGateway => "internet_gateway",
            NodeKind::NatGateway => "nat_gateway",
            NodeKind::TransitGateway => "transit_gateway",
            NodeKind::LoadBalancer => "load_balancer",
            NodeKind::Ec2 => "ec2",
            NodeKind::Rds => "rds",
            NodeKind::S3 => "s3",
            NodeKind::Kms => "kms",
            NodeKind::Iam => "iam",
            NodeKind::CloudTrail => "cloud_trail",
            NodeKind::Config => "config",
            NodeKind::GuardDuty => "guard_duty",
            NodeKind::SecurityHub => "security_hub",
            NodeKind::CloudWatch => "cloud_watch",
            NodeKind::Generic => "generic",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_from_str_valid() {
        let kind: NodeKind = "nat_gateway".parse().unwrap();
        assert_eq!(kind, NodeKind::NatGateway);

        let kind: NodeKind = "rds".parse().unwrap();
        assert_eq!(kind, NodeKind::Rds);
    }

    #[test]
    fn test_node_kind_from_str_invalid() {
        let result: Result<NodeKind, _> = "NatGateway".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_every_kind_parses_its_own_name() {
        for kind in NodeKind::ALL {
            let parsed: NodeKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_categories() {
        assert_eq!(NodeKind::LoadBalancer.category(), Category::Network);
        assert_eq!(NodeKind::Rds.category(), Category::Database);
        assert_eq!(NodeKind::S3.category(), Category::Storage);
        assert_eq!(NodeKind::Kms.category(), Category::Security);
        assert_eq!(NodeKind::OrganizationsAccount.category(), Category::Management);
    }

    #[test]
    fn test_category_fill_colors_are_hex() {
        for kind in NodeKind::ALL {
            let fill = kind.category().fill_color();
            assert!(fill.starts_with('#'));
            assert_eq!(fill.len(), 7);
        }
    }
}
