pub mod plant;
pub mod snapshot;
pub mod user;

pub use plant::{NewPlant, NewPlantRequest, Plant, PlantSummary};
pub use snapshot::{NewSnapshot, NewSnapshotRequest, Snapshot};
pub use user::{NewUser, NewUserRequest, User};
