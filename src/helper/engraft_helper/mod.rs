pub mod background;
pub mod correction;
pub mod emitter;
pub mod error;
pub mod read_ids;
pub mod report;
pub mod resolver;
pub mod sample;
pub mod utils;

pub use background::BackgroundRates;
pub use correction::{Correction, correct};
pub use emitter::{EngraftmentRecord, OUTPUT_HEADER, RecordEmitter};
pub use error::EngraftError;
pub use read_ids::{ReadPartition, load_read_ids};
pub use report::{EngraftReport, SkippedSample};
pub use resolver::{AmbiguitySplit, resolve};
pub use sample::{AlignmentKey, AlignmentRole, SampleDescriptor, mapping_fields};
pub use utils::{ensure_exists, log_line, sample_progress_bar};
