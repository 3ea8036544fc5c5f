pub mod character;
pub mod content;
pub mod scene;
pub mod script;
