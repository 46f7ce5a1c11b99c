// Library crate: the editor core, its command protocol and test helpers.
// The runner binary and the wasm bridge are thin shells over these modules.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod shortcuts;
pub mod state;

pub use error::EditorError;
pub use state::SceneStore;
