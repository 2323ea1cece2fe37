pub mod dependencies;
pub mod link;
pub mod settings;
