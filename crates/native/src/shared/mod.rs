pub mod appearance;
pub mod config;
pub mod spawner;
pub mod storage;
