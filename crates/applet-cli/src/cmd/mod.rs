pub mod activity;
pub mod applet;
pub mod init;
pub mod serve;
pub mod service;
