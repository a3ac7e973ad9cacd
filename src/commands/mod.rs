pub mod add;
pub mod export;
pub mod find;
pub mod import;
pub mod init;
pub mod list;
