pub use super::activity_log::Entity as ActivityLog;
pub use super::categories::Entity as Categories;
pub use super::claims::Entity as Claims;
pub use super::items::Entity as Items;
pub use super::messages::Entity as Messages;
pub use super::notifications::Entity as Notifications;
pub use super::users::Entity as Users;
