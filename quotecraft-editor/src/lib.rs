//! Editor state controller for QuoteCraft calculators
//!
//! `quotecraft-editor` holds the state of one calculator being edited: its
//! ordered fields, which field is selected, and which deletion awaits
//! confirmation. It turns user intents into new states.
//!
//! # Layers
//!
//! - [`EditorSession`]: pure value-in/value-out transitions over the field list
//! - [`Editor`]: a session plus drag tracking, a revision counter, and
//!   non-blocking saves through a [`FieldSink`]
//! - [`EditorCommand`]: intents as data, for scripted replay
//! - [`EditorConfig`]: layered configuration (defaults, file, `QUOTECRAFT_*`)
//!
//! # Example
//!
//! ```rust,ignore
//! use quotecraft_editor::{CalculatorDocument, Editor};
//! use quotecraft_fields::{FieldChange, FieldKind};
//!
//! let mut editor = Editor::open(CalculatorDocument::new("calc-1", "Deck Quote")).build();
//! let id = editor.add_field(FieldKind::Number);
//! editor.update_field(&id, &FieldChange::Label { value: "Square Feet".into() });
//! assert_eq!(editor.fields()[0].variable_name(), "square_feet");
//! ```

pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
mod save_queue;
pub mod session;
pub mod sink;

pub use command::{parse_script, EditorCommand, FieldRef};
pub use config::{EditorConfig, ENV_PREFIX};
pub use document::{CalculatorDocument, DocumentFormat};
pub use editor::{Editor, EditorBuilder};
pub use error::{EditorError, Result};
pub use session::EditorSession;
pub use sink::{FieldSink, FileSink, MemorySink};
