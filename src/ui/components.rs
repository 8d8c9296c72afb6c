pub mod controls;
pub mod gauge;
pub mod library_list;
pub mod player;
pub mod progress;
