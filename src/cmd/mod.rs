pub mod events;
pub mod init;
pub mod root;
