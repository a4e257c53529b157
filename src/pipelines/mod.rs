pub mod engraft;
pub mod tabulate;

pub use engraft::run_engraft;
pub use tabulate::run_tabulate;
