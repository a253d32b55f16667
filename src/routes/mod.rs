pub mod fallback;
pub mod health;
pub mod plants;
pub mod snapshots;
pub mod users;

pub use fallback::{method_not_allowed, route_not_found};
pub use health::health_check;
pub use plants::{create_plant, delete_plant, get_plant, list_plants};
pub use snapshots::{create_snapshot, list_snapshots};
pub use users::{create_user, get_user, list_users};
