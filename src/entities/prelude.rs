pub use super::items::Entity as Items;
