//! GraphQL boundary for graphmusic.
//!
//! # Responsibility
//! - Declare the GraphQL types and root objects over `MusicService`.
//! - Expose the schema through a single raw-body HTTP endpoint.
//!
//! # Invariants
//! - Resolvers hold no state of their own; the service is read from the
//!   schema context on every call.
//! - Any execution error is reported to HTTP callers as status 400 with the
//!   first error message.

pub mod http;
pub mod resolver;
pub mod schema;
pub mod types;

pub use http::{router, GRAPHQL_PATH};
pub use resolver::{MutationRoot, QueryRoot};
pub use schema::{build_schema, MusicSchema, SharedMusicService};
pub use types::{MusicInput, MusicObject};
