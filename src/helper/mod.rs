pub mod engraft_helper;
pub mod io;
pub mod tabulate;
