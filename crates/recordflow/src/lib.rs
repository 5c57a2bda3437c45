//! Relational records to directed-graph diagrams.
//!
//! Walks a primary record collection plus up to two auxiliary linked
//! collections into an abstract node/edge graph, serializes it as a DOT
//! description, and renders it through a supervised engine that is
//! replaced wholesale on failure or timeout.

pub mod builder;
pub mod clock;
pub mod dot;
pub mod engine;
pub mod errors;
pub mod events;
pub mod model;
pub mod pipeline;
pub mod proxy;
pub mod records;
pub mod settings;

pub use builder::*;
pub use clock::*;
pub use dot::*;
pub use engine::*;
pub use errors::*;
pub use events::*;
pub use model::*;
pub use pipeline::*;
pub use proxy::*;
pub use records::*;
pub use settings::*;
