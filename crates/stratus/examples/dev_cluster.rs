//! Declares a small environment by hand and renders it next to the working
//! directory.
//!
//! ```sh
//! cargo run -p stratus --example dev_cluster
//! ```

use stratus::{
    DiagramBuilder, Renderer, StratusError,
    kind::NodeKind,
    semantic::{Connector, RankDirection},
};

fn main() -> Result<(), StratusError> {
    let mut builder =
        DiagramBuilder::new("Dev Cluster").with_direction(RankDirection::TopBottom);

    let developer = builder.node(NodeKind::User, "Developer")?;
    let (alb, apps, db) = builder.cluster("Dev VPC", |vpc| {
        let alb = vpc.cluster("Public Subnet", |public| {
            public.node(NodeKind::LoadBalancer, "Dev ALB")
        })?;
        vpc.cluster("Private Subnet", |private| {
            let apps = vec![
                private.node(NodeKind::Ec2, "App 1")?,
                private.node(NodeKind::Ec2, "App 2")?,
            ];
            let db = private.node(NodeKind::Rds, "Dev RDS")?;
            Ok::<_, StratusError>((alb, apps, db))
        })
    })?;

    builder.connect(developer, alb, Connector::flow().with_label("HTTPS"))?;
    builder.fan_out(alb, &apps, Connector::flow())?;
    builder.fan_in(&apps, db, Connector::flow())?;

    let diagram = builder.build();
    let path = Renderer::default().render(&diagram, None)?;
    println!("Diagram saved as: {}", path.display());

    Ok(())
}
