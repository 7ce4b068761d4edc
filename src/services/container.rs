//! Service Container - Centralized service access.
//!
//! Resolvers receive the container through the GraphQL context and pick
//! the service they need, so the schema depends on service traits only.

use std::sync::Arc;

use super::{MeetingManager, MeetingService, UserManager, UserService};
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get meeting service
    fn meetings(&self) -> Arc<dyn MeetingService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    meeting_service: Arc<dyn MeetingService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(user_service: Arc<dyn UserService>, meeting_service: Arc<dyn MeetingService>) -> Self {
        Self {
            user_service,
            meeting_service,
        }
    }

    /// Create service container sharing one Unit of Work over the connection pool
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            user_service: Arc::new(UserManager::new(uow.clone())),
            meeting_service: Arc::new(MeetingManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn meetings(&self) -> Arc<dyn MeetingService> {
        self.meeting_service.clone()
    }
}
