use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngraftError {
    #[error("Mapping file does not exist: {0}")]
    MappingFileNotFound(String),
    #[error("Missing input for sample {sample}: {path}")]
    MissingInput { sample: String, path: String },
    #[error("Malformed mapping row at line {line}: expected 8 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },
    #[error("Mapping row at line {line} is not valid UTF-8")]
    UndecodableRow { line: u64 },
    #[error("No reads found in FASTQ file: {path}")]
    EmptySample { path: String },
    #[error("Post-treatment sample {0} has zero reads, no fraction can be computed")]
    ZeroTotalReads(String),
    #[error("Alignment correction factor is zero for sample {0}")]
    ZeroCorrection(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
