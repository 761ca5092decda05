//! Persistence adapters for the repository ports.

mod memory;

pub use memory::{
    InMemoryBookingRepository, InMemoryListingRepository, InMemoryProfileRepository,
    InMemoryUserRepository,
};
