//! Core types shared by the expression editor crates: the host's variable
//! catalog, the built-in formula catalog and the structured document.

pub mod commit;
pub mod document;
pub mod functions;
pub mod variable;

pub use commit::Commit;
pub use document::{Document, Inline, VariableAttrs};
pub use functions::{FormulaDescriptor, ParamInfo, FORMULAS};
pub use variable::{VarType, Variable, VariableCatalog};
