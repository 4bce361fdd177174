use crate::config::TrackerConfig;
use crate::model::{Category, Priority, Ticket, User};
use crate::registry::{CategoryRegistry, PriorityRegistry, UserDirectory};
use crate::ticket_service::TicketService;
use record_store::StoreActor;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running ticket tracker: four stores plus the services built on them.
///
/// # Example
///
/// ```rust
/// use ticket_tracker::config::TrackerConfig;
/// use ticket_tracker::lifecycle::TrackerSystem;
/// use ticket_tracker::model::Ticket;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = TrackerSystem::new(&TrackerConfig::default());
///
///     let bug = system.categories.find_or_create("BUG").await?;
///     let high = system.priorities.find_or_create("HIGH").await?;
///     let ticket = Ticket::new("Login broken", "Cannot log in since last update")
///         .with_category(bug.id.unwrap())
///         .with_priority(high.id.unwrap());
///     let saved = system.tickets.create(ticket).await?;
///     assert!(saved.id.is_some());
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct TrackerSystem {
    pub tickets: TicketService,
    pub categories: CategoryRegistry,
    pub priorities: PriorityRegistry,
    pub users: UserDirectory,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl TrackerSystem {
    /// Spawns every store and wires the services. Must be called inside a tokio runtime.
    ///
    /// A zero `buffer_size` from a hand-built config is raised to 1; files go through
    /// [`TrackerConfig::validate`] instead.
    pub fn new(config: &TrackerConfig) -> Self {
        let buffer_size = config.store.buffer_size.max(1);

        let (ticket_actor, ticket_store) = StoreActor::<Ticket>::new(buffer_size);
        let (category_actor, category_store) = StoreActor::<Category>::new(buffer_size);
        let (priority_actor, priority_store) = StoreActor::<Priority>::new(buffer_size);
        let (user_actor, user_store) = StoreActor::<User>::new(buffer_size);

        let handles = vec![
            tokio::spawn(ticket_actor.run()),
            tokio::spawn(category_actor.run()),
            tokio::spawn(priority_actor.run()),
            tokio::spawn(user_actor.run()),
        ];

        let categories = CategoryRegistry::new(category_store);
        let priorities = PriorityRegistry::new(priority_store);
        let users = UserDirectory::new(user_store);
        let tickets = TicketService::new(
            ticket_store,
            categories.clone(),
            priorities.clone(),
            users.clone(),
            config.tickets.clone(),
        );

        Self {
            tickets,
            categories,
            priorities,
            users,
            handles,
        }
    }

    /// Drops every client held by the system and waits for the stores to drain.
    ///
    /// Clones handed out earlier keep their store alive, so drop them first or this waits for
    /// them. Returns the first store task that panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");

        // Closing the channels makes each store's receive loop end
        drop(self.tickets);
        drop(self.categories);
        drop(self.priorities);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
