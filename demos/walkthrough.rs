use anyhow::Context;
use serde_json::json;
use std::sync::Arc;
use storage::collections::USERS;
use storage::dto::competition::NewCompetition;
use storage::dto::user::Identity;
use storage::dto::weight::WeightRequest;
use storage::models::ApprovalState;
use storage::{Fields, MemoryStore};
use tracker::{StoreContext, SyncEngine, TrackerConfig, telemetry};

fn profile(role: &str, team: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("role".to_string(), json!(role));
    fields.insert("team".to_string(), json!(team));
    fields
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("info");

    let config = TrackerConfig::from_env().context("Failed to load tracker configuration")?;

    let store = Arc::new(MemoryStore::new());
    store.seed(USERS, "coach@example.com", profile("leader", "red"));

    let context = Arc::new(StoreContext::new(config.event_capacity));
    let engine = SyncEngine::new(store.clone(), context.clone(), config.teams.clone());

    let mut events = context.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!("event: {:?}", event);
        }
    });

    engine
        .sign_in(Identity::new("coach@example.com", "Coach"))
        .await
        .context("Failed to sign in")?;

    for (team, weight) in [("red", 1.0), ("blue", 1.5)] {
        engine.add_weight(WeightRequest::new(team, weight)).await?;
    }

    let win = engine
        .add_competition(NewCompetition::new("red", "blue"))
        .await?;
    let tie = engine
        .add_competition(NewCompetition::tie("red", "blue"))
        .await?;

    engine
        .update_approval_state(&win.record.id, ApprovalState::Approved)
        .await?;
    engine
        .update_approval_state(&tie.record.id, ApprovalState::Approved)
        .await?;

    let approved = context.ledger().in_state(ApprovalState::Approved);
    tracing::info!("{} competitions awaiting publication", approved.len());

    let published = engine.publish_all().await?;
    tracing::info!("Published {} competitions", published.len());

    for competition in context.ledger().snapshot() {
        println!(
            "{:<36} {:>6} vs {:<6} {:<9} tied={}",
            competition.id,
            competition.winner,
            competition.loser,
            competition.approval_state,
            competition.tied
        );
    }
    println!("teams: {}", engine.competition_names().join(", "));

    engine.sign_out();
    Ok(())
}
