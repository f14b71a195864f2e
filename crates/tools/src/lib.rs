pub mod check;
pub mod level_file;
pub mod logging;
pub mod settings;
