use anyhow::Context;
use riskgraph::{EventRecord, PaperRecord, PolicyRecord, RiskGraphConfig, Workspace};

fn demo_papers() -> Vec<PaperRecord> {
    vec![
        PaperRecord {
            id: "2103.01234".to_string(),
            title: "Cold-weather failure modes of natural gas supply to the power grid".to_string(),
            summary: Some(
                "Frozen wellheads and compressor trips cascaded into generator outages during the February freeze."
                    .to_string(),
            ),
            published: Some("2021-03-02".to_string()),
        },
        PaperRecord {
            id: "2207.04567".to_string(),
            title: "Heatwave-driven demand peaks and transformer ageing".to_string(),
            summary: Some("Sustained high temperature accelerates insulation loss in distribution transformers.".to_string()),
            published: Some("2022-07-11".to_string()),
        },
    ]
}

fn demo_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            external_id: "uri-2021".to_string(),
            name: "Winter Storm Uri".to_string(),
            description: Some("Rolling blackouts after a grid emergency left millions without power.".to_string()),
            start_time: Some("2021-02-13".to_string()),
            end_time: Some("2021-02-17".to_string()),
            region: Some("Texas".to_string()),
            asset_type: Some("power".to_string()),
            severity: Some(0.95),
        },
        EventRecord {
            external_id: "pnw-heat-2021".to_string(),
            name: "Pacific Northwest heat dome".to_string(),
            description: Some("Record heat strained utilities and rail infrastructure.".to_string()),
            start_time: Some("2021-06-25".to_string()),
            end_time: Some("2021-07-07".to_string()),
            region: Some("Pacific Northwest".to_string()),
            asset_type: Some("power".to_string()),
            severity: Some(0.7),
        },
    ]
}

fn demo_policies() -> Vec<PolicyRecord> {
    vec![PolicyRecord {
        external_id: "tx-sb3".to_string(),
        name: "Texas Senate Bill 3".to_string(),
        description: Some("Weatherization requirements for generators and gas facilities.".to_string()),
        jurisdiction: Some("Texas".to_string()),
        start_date: Some("2021-06-08".to_string()),
        end_date: None,
        category: Some("energy".to_string()),
    }]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("RiskGraph v{}", riskgraph::version());
    println!("==========================================");

    let mut config = match std::env::var("RISKGRAPH_CONFIG") {
        Ok(path) => RiskGraphConfig::from_file(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => RiskGraphConfig::default(),
    };
    config.apply_env();

    let mut workspace = Workspace::from_config(&config).context("building workspace")?;

    let report = workspace
        .ingest(&demo_papers(), &demo_events(), &demo_policies())
        .await
        .context("ingesting demo data")?;
    println!(
        "\nIngested {} papers, {} events, {} policies ({} locations, {} relationships, {} derived links)",
        report.papers, report.events, report.policies, report.locations, report.relationships, report.derived_links
    );

    println!("\nTop risks:");
    for (id, metrics) in workspace.metrics().ranked_by_risk(5) {
        println!(
            "  {:<32} risk {:.3}  degree {}  centrality {:.3}",
            id.as_str(),
            metrics.risk_score,
            metrics.degree,
            metrics.degree_centrality
        );
    }

    let question = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let question = if question.trim().is_empty() {
        "Which events threatened the power grid and which policies responded?".to_string()
    } else {
        question
    };

    println!("\nQ: {}", question);
    let answer = workspace.answer(&question, 0).await?;
    println!("[{:?}] {}", answer.status, answer.answer);
    for item in &answer.contexts {
        println!("  - {} ({:.3})", item.id, item.score.unwrap_or_default());
    }

    Ok(())
}
