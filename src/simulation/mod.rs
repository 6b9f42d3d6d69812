pub mod engine;
pub mod forces;
pub mod history;
pub mod replay;
pub mod states;
pub mod vec2;
