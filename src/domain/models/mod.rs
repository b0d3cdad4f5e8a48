mod chat_interaction;

pub use chat_interaction::*;
