pub mod console;
pub mod load;
pub mod menu;
pub mod register;
pub mod save;

pub use console::Console;
pub use load::{load_users, merge_users, LoadOutcome, MergeOutcome};
pub use menu::{run, MenuChoice};
pub use register::register_user;
pub use save::save_users;
