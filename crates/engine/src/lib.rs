pub mod anchor;
pub mod autocomplete;
pub mod context;
pub mod events;
pub mod expression;
pub mod highlight;
pub mod session;
pub mod surface;

pub use autocomplete::Candidate;
pub use context::{CursorContext, WordQuery};
pub use expression::codec::{decode, encode};
pub use expression::tokens::{tokenize, DisplayToken};
pub use session::{EditorSession, KeyIntent, Notification};
pub use surface::{EditSurface, MemorySurface, Selection};
