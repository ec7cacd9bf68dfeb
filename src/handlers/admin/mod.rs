// handlers/admin/mod.rs - Super admin handlers (x-admin-key gated)

pub mod delete;
pub mod list;
pub mod update;

pub use delete::system_delete;
pub use list::systems_list;
pub use update::system_update;
