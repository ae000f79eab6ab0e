pub mod assignments;
pub mod auth;
pub mod bookings;
pub mod notifications;
pub mod payments;
pub mod ratings;
pub mod time_slots;
pub mod users;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use bookings::configure_bookings_routes;
pub use notifications::configure_notifications_routes;
pub use payments::configure_payments_routes;
pub use ratings::configure_ratings_routes;
pub use time_slots::configure_time_slots_routes;
pub use users::configure_user_routes;
