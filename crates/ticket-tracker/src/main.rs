//! # Ticket Tracker Demo
//!
//! Walks one ticket through its lifecycle:
//! 1. Registers a category, a priority and a user.
//! 2. Submits a ticket whose title is too short and shows the rejection.
//! 3. Submits a valid ticket, patches its status, and lists every ticket with its relations.
//!
//! Configuration is read from the file named by `TICKET_TRACKER_CONFIG`, or defaults.

use record_store::tracing::setup_tracing_with;
use record_store::PageRequest;
use ticket_tracker::config::TrackerConfig;
use ticket_tracker::lifecycle::TrackerSystem;
use ticket_tracker::model::{Ticket, TicketPatch, TicketStatus};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = match std::env::var("TICKET_TRACKER_CONFIG") {
        Ok(path) => TrackerConfig::load(path).map_err(|e| e.to_string())?,
        Err(_) => TrackerConfig::default(),
    };
    setup_tracing_with(&config.logging.filter);

    info!("Starting ticket tracker");
    let system = TrackerSystem::new(&config);

    let span = tracing::info_span!("reference_data");
    let (bug, high, alice) = async {
        let bug = system.categories.find_or_create("BUG").await?;
        let high = system.priorities.find_or_create("HIGH").await?;
        let alice = system.users.find_or_create("alice").await?;
        Ok::<_, ticket_tracker::registry::RegistryError>((bug, high, alice))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let (Some(category), Some(priority), Some(user)) = (bug.id, high.id, alice.id) else {
        return Err("reference data was not assigned ids".to_string());
    };

    let span = tracing::info_span!("ticket_submission");
    let ticket = async {
        let rejected = Ticket::new("Help", "Cannot log in since last update")
            .with_category(category)
            .with_priority(priority)
            .with_user(user);
        if let Err(e) = system.tickets.create(rejected).await {
            warn!(error = %e, "Ticket rejected");
        }

        let ticket = Ticket::new("Login broken", "Cannot log in since last update")
            .with_category(category)
            .with_priority(priority)
            .with_user(user);
        system.tickets.create(ticket).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let id = ticket.id.ok_or("created ticket has no id")?;
    info!(%id, status = ?ticket.status, "Ticket created successfully");

    let patch = TicketPatch {
        status: Some(TicketStatus::InProgress),
        ..TicketPatch::default()
    };
    if let Some(patched) = system
        .tickets
        .patch(id, patch)
        .await
        .map_err(|e| e.to_string())?
    {
        info!(%id, status = ?patched.status, "Ticket picked up");
    }

    let page = system
        .tickets
        .find_all_with_eager_relationships(PageRequest::default())
        .await
        .map_err(|e| e.to_string())?;
    for details in &page.items {
        info!(
            id = ?details.ticket.id,
            title = ?details.ticket.title,
            category = ?details.category.as_ref().map(|c| c.name.as_str()),
            priority = ?details.priority.as_ref().map(|p| p.name.as_str()),
            user = ?details.user.as_ref().map(|u| u.login.as_str()),
            "Listed"
        );
    }
    info!(total = page.total, "Listing complete");

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
