//! Dynamic region projection for wilderness maps.
//!
//! A [`Space`] represents a very large or unbounded coordinate-addressed
//! area using a small, recycled pool of [`ProjectedRoom`] resources that
//! are lazily bound onto whichever coordinates are currently occupied.
//! When an occupant moves, the room is rebound to the new coordinates
//! instead of the occupant walking between pre-built rooms. Occupants
//! converging on the same coordinate merge into one room; an occupant
//! leaving a shared room gets a freshly bound one; vacated rooms return
//! to a free pool instead of being destroyed.
//!
//! # Components
//!
//! - [`MapProvider`]: pluggable validity/naming/customization policy,
//!   with [`GridMapProvider`] as the default first-quadrant infinite grid.
//! - [`ProjectedRoom`] + [`DirectionalLink`]: the recyclable room
//!   resource and its 8 permanent compass links.
//! - [`Space`]: the manager owning the occupant→coordinate table, the
//!   coordinate→room table, and the free pool.
//! - [`SpaceRegistry`]: named spaces with idempotent creation and the
//!   wilderness-level `enter` entry point.
//! - [`SpaceSnapshot`]: serializable durable state for save/reload.
//!
//! All mutating operations take `&mut Space`, so a space is serialized
//! by ownership; embedders running sessions in parallel wrap the
//! registry in a mutex. Operation rate is bounded by player action
//! frequency, so coarse locking is not a throughput concern.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod provider;
pub mod registry;
pub mod room;
pub mod snapshot;
pub mod space;

pub use provider::{GridMapProvider, MapProvider, SpaceView};
pub use registry::{SpaceRegistry, DEFAULT_SPACE_NAME};
pub use room::{DirectionalLink, ProjectedRoom};
pub use snapshot::SpaceSnapshot;
pub use space::Space;
