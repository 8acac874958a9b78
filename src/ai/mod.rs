mod claude;
mod gateway;

pub use claude::ClaudeModel;
pub use gateway::{DraftingGateway, TextModel};
