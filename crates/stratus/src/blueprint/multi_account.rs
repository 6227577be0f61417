//! AWS organization with one account and one VPC per environment.

use stratus_core::{
    error::ConstructError,
    kind::NodeKind,
    semantic::{Connector, Diagram, NodeId, RankDirection},
};

use crate::DiagramBuilder;

pub const TITLE: &str = "AWS Multi-Env Architecture";

const ENVIRONMENTS: [&str; 3] = ["Dev", "Test", "Prod"];

/// Handles of the per-environment VPC nodes that take part in edges.
struct EnvironmentVpc {
    alb: NodeId,
    app: NodeId,
    db: NodeId,
}

pub(super) fn build() -> Result<Diagram, ConstructError> {
    let mut builder = DiagramBuilder::new(TITLE).with_direction(RankDirection::LeftRight);

    let developer = builder.node(NodeKind::User, "Developer")?;
    builder.node(NodeKind::OrganizationsAccount, "Shared Services/Security Acc")?;

    let accounts = builder.cluster("AWS Organization", |org| {
        ENVIRONMENTS
            .iter()
            .map(|env| org.node(NodeKind::OrganizationsAccount, format!("{env} Account")))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let vpcs = ENVIRONMENTS
        .iter()
        .map(|env| environment_vpc(&mut builder, env))
        .collect::<Result<Vec<_>, _>>()?;

    let kms = builder.node(NodeKind::Kms, "KMS Keys")?;
    let central_logs = builder.node(NodeKind::S3, "Central Log Bucket")?;

    builder.fan_out(
        developer,
        &accounts,
        Connector::flow().with_label("Deploy via CI/CD"),
    )?;

    for vpc in &vpcs {
        builder.chain(&[vpc.alb, vpc.app, vpc.db], Connector::flow())?;
    }

    let databases: Vec<_> = vpcs.iter().map(|vpc| vpc.db).collect();
    builder.fan_in(&databases, central_logs, Connector::flow())?;

    let encrypted: Vec<_> = databases
        .iter()
        .copied()
        .chain(std::iter::once(central_logs))
        .collect();
    builder.fan_out(kms, &encrypted, Connector::association())?;

    Ok(builder.build())
}

fn environment_vpc(
    builder: &mut DiagramBuilder,
    env: &str,
) -> Result<EnvironmentVpc, ConstructError> {
    builder.cluster(format!("{env} VPC"), |vpc| {
        vpc.node(NodeKind::InternetGateway, "IGW")?;
        vpc.node(NodeKind::NatGateway, "NAT Gateway")?;

        let alb = vpc.cluster("Public Subnet", |public| {
            public.node(NodeKind::LoadBalancer, format!("{env} ALB"))
        })?;
        let (app, db) = vpc.cluster("Private Subnet", |private| {
            let app = private.node(NodeKind::Ec2, "App Server")?;
            let db = private.node(NodeKind::Rds, format!("{env} RDS"))?;
            Ok::<_, ConstructError>((app, db))
        })?;

        Ok(EnvironmentVpc { alb, app, db })
    })
}
