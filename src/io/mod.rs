pub mod forest_io;
pub mod state;
