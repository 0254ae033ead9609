pub mod traits;
pub mod bedrock;
pub mod composer;
pub mod fallback;
pub mod prompt;
pub mod scripted;

pub use bedrock::BedrockStyleGenerator;
pub use composer::NarrativeComposer;
pub use fallback::fallback_response;
pub use scripted::ScriptedGenerator;
pub use traits::TextGenerator;
