pub mod activity;
pub mod composer;
pub mod footer;
pub mod header;
pub mod helpers;
pub mod suggestion_list;
pub mod transcript;
