pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod publish;
pub mod settings;
