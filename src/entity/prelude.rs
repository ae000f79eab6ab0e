pub use super::assignments::Entity as Assignments;
pub use super::bookings::Entity as Bookings;
pub use super::notifications::Entity as Notifications;
pub use super::payments::Entity as Payments;
pub use super::ratings::Entity as Ratings;
pub use super::time_slot_ranges::Entity as TimeSlotRanges;
pub use super::time_slots::Entity as TimeSlots;
pub use super::users::Entity as Users;
