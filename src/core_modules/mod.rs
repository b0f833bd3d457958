pub mod perception;
pub mod scene;
pub mod signal;
pub mod visibility;
pub mod watch_pair;
