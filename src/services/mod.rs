pub mod conversation;
pub mod language;
pub mod normalizer;
pub mod render;
pub mod session_manager;
pub mod translator;
pub mod webhook;
