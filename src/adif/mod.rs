// ADIF (Amateur Data Interchange Format) Parser and Writer
// Reference: https://adif.org/

pub mod bands;
pub mod import;
pub mod modes;
pub mod parser;
pub mod writer;

pub use import::{draft_from_record, RecordProblem};
pub use modes::{get_mode_group, normalize_mode, ModeGroup};
pub use parser::{parse_adif, AdifFile, AdifRecord};
pub use writer::{render_adif, AdifOutput};
