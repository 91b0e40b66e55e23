//! # Cache Function Handlers
//!
//! The functions hosted by the gateway: a producer and a consumer acting as
//! policy-scoped cache users against Redis, and a relay that forwards its
//! event to another function through the invocation client.
//!
//! Each handler corresponds to one cache user with a Redis-style access
//! string (`on ~* -@all +SET` for the producer) and authenticates with
//! credentials parsed from that user's secret document.

pub mod command;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod policy;
pub mod relay;
pub mod store;

pub use command::CacheCommand;
pub use credentials::CacheCredentials;
pub use error::{CacheError, Result};
pub use handlers::{CacheFunction, CONSUMER_ACCESS_STRING, PRODUCER_ACCESS_STRING};
pub use policy::AccessPolicy;
pub use relay::RelayFunction;
pub use store::CacheStore;
