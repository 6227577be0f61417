//! Network account sharing one VPC with workload accounts, audited by a
//! compliance account.

use stratus_core::{
    error::ConstructError,
    kind::NodeKind,
    semantic::{Connector, Diagram, NodeId, RankDirection},
    style::LineStyle,
};

use crate::DiagramBuilder;

pub const TITLE: &str = "AWS Shared VPC with Compliance";

const WORKLOADS: [&str; 2] = ["Payments", "Analytics"];

struct SharedNetwork {
    transit: NodeId,
    alb: NodeId,
    /// One app server per workload, in [`WORKLOADS`] order.
    apps: Vec<NodeId>,
    db: NodeId,
}

struct Compliance {
    trail: NodeId,
    config: NodeId,
    guard_duty: NodeId,
    security_hub: NodeId,
    audit_logs: NodeId,
}

pub(super) fn build() -> Result<Diagram, ConstructError> {
    let mut builder = DiagramBuilder::new(TITLE).with_direction(RankDirection::LeftRight);

    let users = builder.node(NodeKind::User, "Users")?;

    let workloads = builder.cluster("AWS Organization", |org| {
        WORKLOADS
            .iter()
            .map(|name| org.node(NodeKind::OrganizationsAccount, format!("{name} Account")))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let network = builder.cluster("Network Account", shared_network)?;
    let compliance = builder.cluster("Compliance Account", compliance_account)?;

    builder.connect(users, network.alb, Connector::flow().with_label("HTTPS"))?;
    builder.fan_out(network.alb, &network.apps, Connector::flow())?;
    builder.fan_in(&network.apps, network.db, Connector::flow())?;

    for (account, app) in workloads.iter().zip(&network.apps) {
        builder.connect(
            *account,
            *app,
            Connector::association()
                .with_label("RAM share")
                .with_line(LineStyle::Dashed),
        )?;
    }

    builder.fan_in(
        &[network.transit, network.db],
        compliance.trail,
        Connector::flow().with_line(LineStyle::Dotted),
    )?;
    builder.fan_in(
        &[compliance.trail, compliance.config],
        compliance.audit_logs,
        Connector::flow(),
    )?;
    builder.chain(
        &[compliance.guard_duty, compliance.security_hub],
        Connector::flow().with_label("findings"),
    )?;
    builder.connect(
        compliance.config,
        compliance.security_hub,
        Connector::flow().with_label("rule results"),
    )?;

    Ok(builder.build())
}

fn shared_network(account: &mut DiagramBuilder) -> Result<SharedNetwork, ConstructError> {
    let transit = account.node(NodeKind::TransitGateway, "Transit Gateway")?;

    account.cluster("Shared VPC", |vpc| {
        let igw = vpc.node(NodeKind::InternetGateway, "IGW")?;
        let nat = vpc.node(NodeKind::NatGateway, "NAT Gateway")?;
        vpc.connect(igw, nat, Connector::association())?;

        let alb = vpc.cluster("Public Subnet", |public| {
            public.node(NodeKind::LoadBalancer, "Shared ALB")
        })?;
        let (apps, db) = vpc.cluster("Private Subnet", |private| {
            let apps = WORKLOADS
                .iter()
                .map(|name| private.node(NodeKind::Ec2, format!("{name} App")))
                .collect::<Result<Vec<_>, _>>()?;
            let db = private.node(NodeKind::Rds, "Shared RDS")?;
            Ok::<_, ConstructError>((apps, db))
        })?;

        vpc.connect(transit, igw, Connector::association().with_min_len(2))?;

        Ok(SharedNetwork {
            transit,
            alb,
            apps,
            db,
        })
    })
}

fn compliance_account(account: &mut DiagramBuilder) -> Result<Compliance, ConstructError> {
    Ok(Compliance {
        trail: account.node(NodeKind::CloudTrail, "CloudTrail")?,
        config: account.node(NodeKind::Config, "AWS Config")?,
        guard_duty: account.node(NodeKind::GuardDuty, "GuardDuty")?,
        security_hub: account.node(NodeKind::SecurityHub, "Security Hub")?,
        audit_logs: account.node(NodeKind::S3, "Audit Log Bucket")?,
    })
}
